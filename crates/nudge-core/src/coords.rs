#![forbid(unsafe_code)]

//! Page/client coordinate pairs.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// One pointer position in both page and client space.
///
/// The two representations always move in lockstep: any correction applied
/// to one is applied to the other.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoordsPair {
    pub page: Point,
    pub client: Point,
}

impl CoordsPair {
    /// Create a pair from explicit page and client positions.
    #[must_use]
    pub const fn new(page: Point, client: Point) -> Self {
        Self { page, client }
    }

    /// A pair whose page and client positions coincide (no scroll offset).
    #[must_use]
    pub const fn uniform(point: Point) -> Self {
        Self {
            page: point,
            client: point,
        }
    }

    /// Shift both positions by `delta` in place.
    pub fn translate(&mut self, delta: Point) {
        self.page += delta;
        self.client += delta;
    }
}
