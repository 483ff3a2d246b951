#![forbid(unsafe_code)]

//! Snapping to targets.
//!
//! Pulls the position toward the single best candidate among the configured
//! targets. With `relativePoints`, every fractional anchor on the start
//! rectangle is snapped independently and the best anchor/target pair wins.
//!
//! # Candidate selection
//!
//! Candidates are visited in order (anchor-major, then target order). The
//! first one becomes the incumbent; each later candidate replaces it when
//! [`beats`] holds:
//!
//! | candidate | incumbent | winner |
//! |-----------|-----------|--------|
//! | in range, finite range | in range, finite range | smaller `distance / range` |
//! | in range, infinite range | in range, finite range | incumbent |
//! | in range, finite range | in range, infinite range | candidate |
//! | in range | out of range | candidate |
//! | out of range | in range | incumbent |
//! | otherwise | | smaller raw distance |
//!
//! An infinite-range candidate is always in range, but it never displaces a
//! finite-range candidate that is also in range.

use std::fmt;
use std::sync::Arc;

use nudge_core::{PartialRect, Phase, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::modifier::{Feedback, Modifier, ModifyContext, SetContext, StartContext};
use crate::options::{ModifierConfig, RectSource};
use crate::session::Session;
use crate::status::Status;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A snap point; an absent axis does not pull on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Overrides the modifier's default range for this point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
}

impl SnapPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            range: None,
        }
    }

    /// Builder: set the point's own range.
    #[must_use]
    pub const fn with_range(mut self, range: f64) -> Self {
        self.range = Some(range);
        self
    }
}

/// A regular grid of snap points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Horizontal spacing.
    pub x: f64,
    /// Vertical spacing.
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    /// Position of the grid node at index `(0, 0)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Point>,
    /// Clamp grid nodes to these edges; absent edges are unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<PartialRect>,
}

impl GridSpec {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            range: None,
            offset: None,
            limits: None,
        }
    }

    /// Nearest grid node to `relative`, clamped to the limits.
    ///
    /// An axis whose spacing is not a positive finite number yields no
    /// value, so that axis keeps the relative coordinate.
    #[must_use]
    pub fn nearest(&self, relative: Point) -> SnapPoint {
        let offset = self.offset.unwrap_or(Point::ZERO);
        let limits = self.limits.unwrap_or_default();
        let axis = |value: f64, spacing: f64, origin: f64, low: Option<f64>, high: Option<f64>| {
            if !(spacing.is_finite() && spacing > 0.0) {
                return None;
            }
            let node = round_half_up((value - origin) / spacing) * spacing + origin;
            Some(
                node.min(high.unwrap_or(f64::INFINITY))
                    .max(low.unwrap_or(f64::NEG_INFINITY)),
            )
        };

        SnapPoint {
            x: axis(relative.x, self.x, offset.x, limits.left, limits.right),
            y: axis(relative.y, self.y, offset.y, limits.top, limits.bottom),
            range: self.range,
        }
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Produces a snap point from the origin-relative position, or `None` for
/// "no candidate".
pub type SnapFn = Arc<dyn Fn(Point, &Session) -> Option<SnapPoint> + Send + Sync>;

/// One configured snap target.
#[derive(Clone, Deserialize)]
#[serde(untagged)]
pub enum SnapTarget {
    Grid {
        grid: GridSpec,
    },
    Point(SnapPoint),
    #[serde(skip)]
    Generator(SnapFn),
}

impl SnapTarget {
    /// A generator evaluated for every anchor on every tick.
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn(Point, &Session) -> Option<SnapPoint> + Send + Sync + 'static,
    {
        Self::Generator(Arc::new(f))
    }

    /// Snap to the top-left corner of `rect`.
    #[must_use]
    pub fn from_rect(rect: &Rect, range: Option<f64>) -> Self {
        let corner = rect.to_xy();
        Self::Point(SnapPoint {
            x: Some(corner.x),
            y: Some(corner.y),
            range,
        })
    }

    fn resolve(&self, relative: Point, session: &Session) -> Option<SnapPoint> {
        match self {
            Self::Grid { grid } => Some(grid.nearest(relative)),
            Self::Point(point) => Some(*point),
            Self::Generator(f) => f(relative, session),
        }
    }
}

impl fmt::Debug for SnapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid { grid } => f.debug_struct("Grid").field("grid", grid).finish(),
            Self::Point(point) => f.debug_tuple("Point").field(point).finish(),
            Self::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl From<SnapPoint> for SnapTarget {
    fn from(point: SnapPoint) -> Self {
        Self::Point(point)
    }
}

/// Keywords accepted for the snap offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SnapOffsetKeyword {
    /// Keep the pointer's start offset from the origin.
    #[serde(rename = "startCoords")]
    StartCoords,
}

/// Base offset applied to every target.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SnapOffset {
    Keyword(SnapOffsetKeyword),
    Source(RectSource),
}

impl SnapOffset {
    pub const START_COORDS: Self = Self::Keyword(SnapOffsetKeyword::StartCoords);
}

/// `snap` option record.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapOptions {
    pub enabled: bool,
    pub end_only: bool,
    /// Default range for targets without their own.
    pub range: f64,
    pub targets: Option<Vec<SnapTarget>>,
    pub offset: Option<SnapOffset>,
    /// Overrides the target's origin for this modifier.
    pub origin: Option<RectSource>,
    /// Fractional `{x, y}` anchors in `[0, 1]` over the start rectangle.
    pub relative_points: Option<Vec<Point>>,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            end_only: false,
            range: f64::INFINITY,
            targets: None,
            offset: None,
            origin: None,
            relative_points: None,
        }
    }
}

impl SnapOptions {
    /// Enabled snapping to `targets` with an infinite default range.
    #[must_use]
    pub fn new(targets: Vec<SnapTarget>) -> Self {
        Self {
            enabled: true,
            targets: Some(targets),
            ..Self::default()
        }
    }

    fn has_relative_points(&self) -> bool {
        self.relative_points
            .as_ref()
            .is_some_and(|points| !points.is_empty())
    }

    fn resolve_origin(&self, session: &Session) -> Point {
        self.origin
            .as_ref()
            .and_then(|source| source.resolve(session, session.start_coords.page))
            .map_or_else(|| session.origin(), |rect| rect.to_xy())
    }
}

impl ModifierConfig for SnapOptions {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn end_only(&self) -> bool {
        self.end_only
    }
}

// ---------------------------------------------------------------------------
// Candidate selection
// ---------------------------------------------------------------------------

/// A candidate point in origin-relative space with its effective range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub point: Point,
    pub range: f64,
}

/// A candidate evaluated against the current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Closest {
    pub point: Point,
    pub range: f64,
    pub distance: f64,
    pub in_range: bool,
    /// `point - position`.
    pub delta: Point,
}

impl Closest {
    fn evaluate(candidate: SnapCandidate, position: Point) -> Self {
        let delta = candidate.point - position;
        let distance = delta.hypot();
        Self {
            point: candidate.point,
            range: candidate.range,
            distance,
            in_range: distance <= candidate.range,
            delta,
        }
    }

    fn normalized_distance(&self) -> f64 {
        if self.distance == 0.0 {
            0.0
        } else {
            self.distance / self.range
        }
    }
}

/// Whether `candidate` replaces `incumbent` as the best snap.
#[must_use]
pub fn beats(candidate: &Closest, incumbent: &Closest) -> bool {
    match (candidate.in_range, incumbent.in_range) {
        (true, true) => match (candidate.range.is_finite(), incumbent.range.is_finite()) {
            (true, true) => candidate.normalized_distance() < incumbent.normalized_distance(),
            (false, true) => false,
            (true, false) => true,
            (false, false) => candidate.distance < incumbent.distance,
        },
        (true, false) => true,
        (false, true) => false,
        (false, false) => candidate.distance < incumbent.distance,
    }
}

/// Best candidate for `position`; `None` when there are no candidates.
#[must_use]
pub fn select_closest(position: Point, candidates: &[SnapCandidate]) -> Option<Closest> {
    candidates
        .iter()
        .map(|candidate| Closest::evaluate(*candidate, position))
        .reduce(|best, next| if beats(&next, &best) { next } else { best })
}

// ---------------------------------------------------------------------------
// Modifier
// ---------------------------------------------------------------------------

/// Per-anchor offsets computed at phase start.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapOffsets(pub Vec<Point>);

impl Default for SnapOffsets {
    fn default() -> Self {
        Self(vec![Point::ZERO])
    }
}

/// Observer payload for one snap tick. Positions are origin-relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapFeedback {
    pub range: f64,
    pub locked: bool,
    /// Chosen snap point.
    pub point: Option<Point>,
    /// Unsnapped position.
    pub real: Point,
    pub delta: Point,
}

/// The snap modifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snap;

impl Modifier for Snap {
    type Options = SnapOptions;
    type Offset = SnapOffsets;

    const NAME: &'static str = "snap";

    fn defaults() -> SnapOptions {
        SnapOptions::default()
    }

    fn start(ctx: &StartContext<'_>, options: &SnapOptions) -> SnapOffsets {
        let session = ctx.session;
        let origin = options.resolve_origin(session);

        let snap_offset = match &options.offset {
            Some(SnapOffset::Keyword(SnapOffsetKeyword::StartCoords)) => {
                session.start_coords.page - origin
            }
            Some(SnapOffset::Source(source)) => source
                .resolve(session, session.start_coords.page)
                .map_or(Point::ZERO, |rect| rect.to_xy()),
            None => Point::ZERO,
        };

        match (ctx.rect, options.relative_points.as_deref()) {
            (Some(rect), Some(points)) if !points.is_empty() => SnapOffsets(
                points
                    .iter()
                    .map(|anchor| Point {
                        x: ctx.start_offset.left - rect.width * anchor.x + snap_offset.x,
                        y: ctx.start_offset.top - rect.height * anchor.y + snap_offset.y,
                    })
                    .collect(),
            ),
            _ => SnapOffsets(vec![snap_offset]),
        }
    }

    fn set(ctx: &SetContext<'_>, options: &SnapOptions, offsets: &SnapOffsets, status: &mut Status) {
        let session = ctx.session;
        let page = ctx.modified - options.resolve_origin(session);
        let targets = options.targets.as_deref().unwrap_or_default();

        let mut candidates = Vec::with_capacity(offsets.0.len() * targets.len());
        for offset in &offsets.0 {
            let relative = page - *offset;
            for target in targets {
                let Some(point) = target.resolve(relative, session) else {
                    continue;
                };
                candidates.push(SnapCandidate {
                    point: Point {
                        x: point.x.map_or(relative.x, |x| x + offset.x),
                        y: point.y.map_or(relative.y, |y| y + offset.y),
                    },
                    range: point.range.unwrap_or(options.range),
                });
            }
        }

        let closest = select_closest(page, &candidates);
        let detail = status.snap_detail_mut();
        detail.real = page;
        detail.target = closest.map(|c| c.point);
        if let Some(c) = closest {
            detail.range = c.range;
        }

        match closest {
            Some(c) => {
                status.delta = c.delta;
                status.locked = c.in_range;
            }
            None => status.reset(),
        }
    }

    fn modify_coords(
        ctx: &mut ModifyContext<'_>,
        options: &SnapOptions,
        status: &Status,
    ) -> Option<Feedback> {
        if !options.enabled || (ctx.phase == Phase::Start && options.has_relative_points()) {
            return None;
        }

        if status.locked {
            ctx.translate(status.delta);
        }

        let detail = status.snap.unwrap_or_default();
        Some(Feedback::Snap(SnapFeedback {
            range: detail.range,
            locked: status.locked,
            point: detail.target,
            real: detail.real,
            delta: status.delta,
        }))
    }
}
