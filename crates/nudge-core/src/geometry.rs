#![forbid(unsafe_code)]

//! Geometric primitives in page space.
//!
//! Coordinates are `f64` and unbounded: restriction sentinels use
//! `f64::INFINITY` / `f64::NEG_INFINITY` to mean "no bound on this side".

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin / zero displacement.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of this vector.
    #[inline]
    #[must_use]
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).hypot()
    }

    /// Whether either axis is non-zero.
    #[inline]
    #[must_use]
    pub fn is_nonzero(self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A measured rectangle.
///
/// `width` and `height` are stored rather than recomputed so a host may
/// report a layout size that differs from the edge span (e.g. transforms).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its four edges, deriving width and height.
    #[inline]
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Create a rectangle from its top-left corner and size.
    #[inline]
    #[must_use]
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn to_xy(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Distances from `point` to each edge, measured inward.
    ///
    /// `left`/`top` are `point - edge`, `right`/`bottom` are `edge - point`.
    #[must_use]
    pub fn offsets_from(&self, point: Point) -> Sides {
        Sides {
            top: point.y - self.top,
            right: self.right - point.x,
            bottom: self.bottom - point.y,
            left: point.x - self.left,
        }
    }
}

/// A rectangle whose edges may each be absent.
///
/// Used for restriction bounds and offset records, where an absent edge
/// falls back to a caller-chosen default. `x`/`y` are accepted on the wire
/// as aliases of `left`/`top`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialRect {
    #[serde(alias = "x", skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(alias = "y", skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
}

impl PartialRect {
    /// Create a partial rectangle with all four edges present.
    #[must_use]
    pub const fn edges(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
        }
    }

    /// A partial rectangle carrying only a point (as `left`/`top`).
    #[must_use]
    pub const fn point(point: Point) -> Self {
        Self {
            left: Some(point.x),
            top: Some(point.y),
            right: None,
            bottom: None,
        }
    }

    /// Top-left corner; absent axes read as `0`.
    #[must_use]
    pub fn to_xy(&self) -> Point {
        Point::new(self.left.unwrap_or(0.0), self.top.unwrap_or(0.0))
    }

    /// Complete the rectangle, taking every absent edge from `defaults`.
    #[must_use]
    pub fn fill(&self, defaults: Sides) -> Sides {
        Sides {
            top: self.top.unwrap_or(defaults.top),
            right: self.right.unwrap_or(defaults.right),
            bottom: self.bottom.unwrap_or(defaults.bottom),
            left: self.left.unwrap_or(defaults.left),
        }
    }
}

impl From<Rect> for PartialRect {
    fn from(rect: Rect) -> Self {
        Self::edges(rect.top, rect.right, rect.bottom, rect.left)
    }
}

impl From<Sides> for PartialRect {
    fn from(sides: Sides) -> Self {
        Self::edges(sides.top, sides.right, sides.bottom, sides.left)
    }
}

/// A value per edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Sides {
    /// All edges zero.
    pub const ZERO: Self = Self::all(0.0);

    /// Create new sides with equal values.
    #[must_use]
    pub const fn all(val: f64) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl From<(f64, f64, f64, f64)> for Sides {
    fn from((top, right, bottom, left): (f64, f64, f64, f64)) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}
