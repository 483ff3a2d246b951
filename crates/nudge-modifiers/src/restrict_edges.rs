#![forbid(unsafe_code)]

//! Edge restriction for resizes.
//!
//! Clamps the edges being dragged between an **inner** rectangle (the edge
//! may not move inward past it) and an **outer** rectangle (the edge may not
//! move outward past it):
//!
//! ```text
//! top:    y' = min(max(outer.top    + off.top,    y), inner.top    + off.top)
//! bottom: y' = max(min(outer.bottom + off.bottom, y), inner.bottom + off.bottom)
//! left:   x' = min(max(outer.left   + off.left,   x), inner.left   + off.left)
//! right:  x' = max(min(outer.right  + off.right,  x), inner.right  + off.right)
//! ```
//!
//! `off` folds the pointer's start distance to each edge into the configured
//! offset, so the edge itself is clamped rather than the pointer. An absent
//! edge on either rectangle never constrains.

use nudge_core::{Edges, Phase, Point, Sides};
use serde::Deserialize;

use crate::modifier::{Feedback, Modifier, ModifyContext, SetContext, StartContext};
use crate::options::{ModifierConfig, RectSource};
use crate::status::Status;

/// Inner bound that never constrains inward.
pub const NO_INNER: Sides = Sides {
    top: f64::INFINITY,
    left: f64::INFINITY,
    bottom: f64::NEG_INFINITY,
    right: f64::NEG_INFINITY,
};

/// Outer bound that never constrains outward.
pub const NO_OUTER: Sides = Sides {
    top: f64::NEG_INFINITY,
    left: f64::NEG_INFINITY,
    bottom: f64::INFINITY,
    right: f64::INFINITY,
};

/// `restrictEdges` option record.
///
/// ```json
/// {
///   "enabled": true,
///   "inner": { "top": 200, "left": 200, "right": 400, "bottom": 400 },
///   "outer": { "top": 0, "left": 0, "right": 600, "bottom": 600 }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RestrictEdgesOptions {
    pub enabled: bool,
    pub end_only: bool,
    pub inner: Option<RectSource>,
    pub outer: Option<RectSource>,
    /// Shifts both bounds; resolved once at phase start.
    pub offset: Option<RectSource>,
}

impl RestrictEdgesOptions {
    /// Enabled restriction between `inner` and `outer`.
    #[must_use]
    pub fn new(inner: Option<RectSource>, outer: Option<RectSource>) -> Self {
        Self {
            enabled: true,
            inner,
            outer,
            ..Self::default()
        }
    }
}

impl ModifierConfig for RestrictEdgesOptions {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn end_only(&self) -> bool {
        self.end_only
    }
}

/// The edge restriction modifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictEdges;

impl Modifier for RestrictEdges {
    type Options = RestrictEdgesOptions;
    type Offset = Sides;

    const NAME: &'static str = "restrictEdges";

    fn defaults() -> RestrictEdgesOptions {
        RestrictEdgesOptions::default()
    }

    fn start(ctx: &StartContext<'_>, options: &RestrictEdgesOptions) -> Sides {
        let offset = options
            .offset
            .as_ref()
            .and_then(|source| source.resolve(ctx.session, ctx.session.start_coords.page))
            .map_or(Point::ZERO, |rect| rect.to_xy());
        let start = ctx.start_offset;

        Sides {
            top: offset.y + start.top,
            left: offset.x + start.left,
            bottom: offset.y - start.bottom,
            right: offset.x - start.right,
        }
    }

    fn set(ctx: &SetContext<'_>, options: &RestrictEdgesOptions, offset: &Sides, status: &mut Status) {
        let session = ctx.session;
        let Some(edges) = session.prepared.active_edges() else {
            return;
        };
        if !session.interacting() {
            return;
        }

        let page = ctx.modified;
        let inner = resolve_bound(options.inner.as_ref(), ctx, NO_INNER);
        let outer = resolve_bound(options.outer.as_ref(), ctx, NO_OUTER);

        status.reset();
        let clamped = clamp_edges(page, edges, &inner, &outer, offset);

        status.delta = clamped - page;
        status.locked = status.delta.is_nonzero();
    }

    fn modify_coords(
        ctx: &mut ModifyContext<'_>,
        options: &RestrictEdgesOptions,
        status: &Status,
    ) -> Option<Feedback> {
        if options.enabled && ctx.phase != Phase::Start && status.locked {
            ctx.translate(status.delta);
        }
        None
    }
}

fn resolve_bound(source: Option<&RectSource>, ctx: &SetContext<'_>, sentinel: Sides) -> Sides {
    source
        .and_then(|source| source.resolve(ctx.session, ctx.modified))
        .unwrap_or_default()
        .fill(sentinel)
}

/// Clamp `page` on each active edge between `outer` and `inner`, both shifted
/// by `offset`.
#[must_use]
pub fn clamp_edges(page: Point, edges: Edges, inner: &Sides, outer: &Sides, offset: &Sides) -> Point {
    let mut clamped = page;

    if edges.contains(Edges::TOP) {
        clamped.y = (outer.top + offset.top).max(page.y).min(inner.top + offset.top);
    } else if edges.contains(Edges::BOTTOM) {
        clamped.y = (outer.bottom + offset.bottom)
            .min(page.y)
            .max(inner.bottom + offset.bottom);
    }

    if edges.contains(Edges::LEFT) {
        clamped.x = (outer.left + offset.left).max(page.x).min(inner.left + offset.left);
    } else if edges.contains(Edges::RIGHT) {
        clamped.x = (outer.right + offset.right)
            .min(page.x)
            .max(inner.right + offset.right);
    }

    clamped
}
