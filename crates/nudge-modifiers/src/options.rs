#![forbid(unsafe_code)]

//! Per-target, per-action modifier configuration.
//!
//! Options are keyed by action name, then by modifier. A modifier whose
//! record is absent for the running action is skipped at every phase.
//!
//! Records deserialize from camelCase JSON with `#[serde(default)]`, so a
//! partial record is merged over the modifier's defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use nudge_core::{ActionName, PartialRect, Point, Rect};
use serde::Deserialize;

use crate::error::Result;
use crate::restrict_edges::RestrictEdgesOptions;
use crate::session::Session;
use crate::snap::SnapOptions;

// ---------------------------------------------------------------------------
// Common option surface
// ---------------------------------------------------------------------------

/// Flags every modifier option record carries.
pub trait ModifierConfig {
    fn enabled(&self) -> bool;
    /// The constraint only applies at the end of the interaction.
    fn end_only(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Rectangle sources
// ---------------------------------------------------------------------------

/// Computes a rectangle from the current position and the session.
pub type RectFn = Arc<dyn Fn(Point, &Session) -> Option<PartialRect> + Send + Sync>;

/// Keywords accepted in place of a literal rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RectKeyword {
    /// The target's own measured rectangle.
    #[serde(rename = "self")]
    Target,
}

/// Where a restriction or offset rectangle comes from.
#[derive(Clone, Deserialize)]
#[serde(untagged)]
pub enum RectSource {
    Keyword(RectKeyword),
    Rect(PartialRect),
    #[serde(skip)]
    Computed(RectFn),
}

impl RectSource {
    /// A literal point, stored as `left`/`top`.
    #[must_use]
    pub fn point(point: Point) -> Self {
        Self::Rect(PartialRect::point(point))
    }

    /// A closure evaluated every time the source is resolved.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(Point, &Session) -> Option<PartialRect> + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Resolve against the session at `coords`.
    ///
    /// `None` means the rectangle is unavailable; callers substitute their
    /// own sentinel.
    #[must_use]
    pub fn resolve(&self, session: &Session, coords: Point) -> Option<PartialRect> {
        match self {
            Self::Keyword(RectKeyword::Target) => session.target.rect().map(PartialRect::from),
            Self::Rect(rect) => Some(*rect),
            Self::Computed(f) => f(coords, session),
        }
    }
}

impl fmt::Debug for RectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => f.debug_tuple("Keyword").field(keyword).finish(),
            Self::Rect(rect) => f.debug_tuple("Rect").field(rect).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<PartialRect> for RectSource {
    fn from(rect: PartialRect) -> Self {
        Self::Rect(rect)
    }
}

// ---------------------------------------------------------------------------
// Action / target options
// ---------------------------------------------------------------------------

/// Options for one action on one target.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionOptions {
    /// Origin that action coordinates are expressed relative to.
    pub origin: Option<Point>,
    pub restrict_edges: Option<RestrictEdgesOptions>,
    pub snap: Option<SnapOptions>,
}

impl ActionOptions {
    /// Builder: configure edge restriction.
    #[must_use]
    pub fn with_restrict_edges(mut self, options: RestrictEdgesOptions) -> Self {
        self.restrict_edges = Some(options);
        self
    }

    /// Builder: configure snapping.
    #[must_use]
    pub fn with_snap(mut self, options: SnapOptions) -> Self {
        self.snap = Some(options);
        self
    }
}

/// Options for every action a target supports.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TargetOptions {
    actions: BTreeMap<ActionName, ActionOptions>,
}

impl TargetOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON record keyed by action name.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder: set the options for `name`.
    #[must_use]
    pub fn with_action(mut self, name: ActionName, options: ActionOptions) -> Self {
        self.actions.insert(name, options);
        self
    }

    #[must_use]
    pub fn action(&self, name: ActionName) -> Option<&ActionOptions> {
        self.actions.get(&name)
    }

    /// Look up an action by its wire name.
    pub fn action_by_name(&self, name: &str) -> Result<Option<&ActionOptions>> {
        let name: ActionName = name.parse()?;
        Ok(self.action(name))
    }

    pub fn action_mut(&mut self, name: ActionName) -> Option<&mut ActionOptions> {
        self.actions.get_mut(&name)
    }

    pub fn actions_mut(&mut self) -> impl Iterator<Item = (ActionName, &mut ActionOptions)> {
        self.actions.iter_mut().map(|(name, options)| (*name, options))
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// The object being manipulated.
///
/// Measuring the rectangle is the host's job (DOM, scene graph, ...); the
/// pipeline only asks for it at phase start.
pub trait Target: fmt::Debug {
    fn options(&self) -> &TargetOptions;

    /// Current rectangle in page space, if it can be measured.
    fn rect(&self) -> Option<Rect>;

    /// Default origin for `action`.
    fn origin(&self, action: ActionName) -> Point {
        self.options()
            .action(action)
            .and_then(|options| options.origin)
            .unwrap_or(Point::ZERO)
    }
}

/// A target with fixed options and an optional fixed rectangle.
#[derive(Debug, Clone, Default)]
pub struct StaticTarget {
    pub options: TargetOptions,
    pub rect: Option<Rect>,
}

impl StaticTarget {
    #[must_use]
    pub fn new(options: TargetOptions) -> Self {
        Self {
            options,
            rect: None,
        }
    }

    /// Builder: set the measured rectangle.
    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }
}

impl Target for StaticTarget {
    fn options(&self) -> &TargetOptions {
        &self.options
    }

    fn rect(&self) -> Option<Rect> {
        self.rect
    }
}
