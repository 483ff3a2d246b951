#![forbid(unsafe_code)]

//! The modifier contract and its closed set of implementations.
//!
//! Every modifier implements [`Modifier`]: `start` computes immutable
//! per-phase data, `set` writes a correction into the modifier's
//! [`Status`], and `modify_coords` applies a locked correction to the
//! session's shared coordinates. [`ModifierKind`] is the closed tag the
//! registry orders; dispatch is a `match`, never a name lookup.

use std::fmt;
use std::str::FromStr;

use nudge_core::{Phase, Point, Rect, Sides};
use serde::Serialize;

use crate::error::ModifierError;
use crate::options::{ActionOptions, ModifierConfig};
use crate::restrict_edges::{RestrictEdges, RestrictEdgesOptions};
use crate::session::Session;
use crate::snap::{Snap, SnapFeedback, SnapOffsets, SnapOptions};
use crate::status::Status;

// ---------------------------------------------------------------------------
// Phase contexts
// ---------------------------------------------------------------------------

/// Inputs to [`Modifier::start`].
#[derive(Debug, Clone, Copy)]
pub struct StartContext<'a> {
    pub session: &'a Session,
    /// Rectangle measured at phase start, if available.
    pub rect: Option<Rect>,
    pub start_offset: Sides,
}

/// Inputs to [`Modifier::set`].
#[derive(Debug, Clone, Copy)]
pub struct SetContext<'a> {
    pub session: &'a Session,
    /// Pointer position with the corrections of earlier modifiers applied.
    pub modified: Point,
}

/// Inputs to [`Modifier::modify_coords`].
#[derive(Debug)]
pub struct ModifyContext<'a> {
    pub page: &'a mut Point,
    pub client: &'a mut Point,
    pub phase: Phase,
}

impl ModifyContext<'_> {
    /// Add `delta` to both page and client coordinates.
    pub fn translate(&mut self, delta: Point) {
        *self.page += delta;
        *self.client += delta;
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// A coordinate-constraint plugin.
pub trait Modifier {
    /// Per-action configuration record.
    type Options: ModifierConfig + Clone;
    /// Data computed once at phase start.
    type Offset: Clone + Default;

    /// Registry and configuration name.
    const NAME: &'static str;

    /// Default option record merged into every action schema.
    fn defaults() -> Self::Options;

    fn start(ctx: &StartContext<'_>, options: &Self::Options) -> Self::Offset;

    fn set(
        ctx: &SetContext<'_>,
        options: &Self::Options,
        offset: &Self::Offset,
        status: &mut Status,
    );

    /// Apply a locked correction in place; returns auxiliary data for
    /// observers.
    fn modify_coords(
        ctx: &mut ModifyContext<'_>,
        options: &Self::Options,
        status: &Status,
    ) -> Option<Feedback>;
}

// ---------------------------------------------------------------------------
// Closed dispatch
// ---------------------------------------------------------------------------

/// Tag of a registered modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierKind {
    RestrictEdges,
    Snap,
}

impl ModifierKind {
    pub const ALL: [Self; 2] = [Self::Snap, Self::RestrictEdges];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RestrictEdges => RestrictEdges::NAME,
            Self::Snap => Snap::NAME,
        }
    }

    /// This modifier's record within `action`, if configured.
    #[must_use]
    pub fn options(self, action: &ActionOptions) -> Option<ModifierOptionsRef<'_>> {
        match self {
            Self::RestrictEdges => action
                .restrict_edges
                .as_ref()
                .map(ModifierOptionsRef::RestrictEdges),
            Self::Snap => action.snap.as_ref().map(ModifierOptionsRef::Snap),
        }
    }

    /// Install this modifier's default record into `action` unless one is
    /// already configured.
    pub fn apply_defaults(self, action: &mut ActionOptions) {
        match self {
            Self::RestrictEdges => {
                action
                    .restrict_edges
                    .get_or_insert_with(RestrictEdges::defaults);
            }
            Self::Snap => {
                action.snap.get_or_insert_with(Snap::defaults);
            }
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModifierKind {
    type Err = ModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ModifierError::UnknownModifier { name: s.to_owned() })
    }
}

/// A borrowed option record tagged by modifier.
#[derive(Debug, Clone, Copy)]
pub enum ModifierOptionsRef<'a> {
    RestrictEdges(&'a RestrictEdgesOptions),
    Snap(&'a SnapOptions),
}

impl ModifierConfig for ModifierOptionsRef<'_> {
    fn enabled(&self) -> bool {
        match self {
            Self::RestrictEdges(options) => options.enabled(),
            Self::Snap(options) => options.enabled(),
        }
    }

    fn end_only(&self) -> bool {
        match self {
            Self::RestrictEdges(options) => options.end_only(),
            Self::Snap(options) => options.end_only(),
        }
    }
}

impl ModifierOptionsRef<'_> {
    #[must_use]
    pub const fn kind(&self) -> ModifierKind {
        match self {
            Self::RestrictEdges(_) => ModifierKind::RestrictEdges,
            Self::Snap(_) => ModifierKind::Snap,
        }
    }

    #[must_use]
    pub fn start(&self, ctx: &StartContext<'_>) -> ModifierOffset {
        match self {
            Self::RestrictEdges(options) => {
                ModifierOffset::RestrictEdges(RestrictEdges::start(ctx, options))
            }
            Self::Snap(options) => ModifierOffset::Snap(Snap::start(ctx, options)),
        }
    }

    /// Run `set`; an offset that is missing or belongs to another modifier
    /// is replaced by the modifier's default offset.
    pub fn set(&self, ctx: &SetContext<'_>, offset: Option<&ModifierOffset>, status: &mut Status) {
        match (self, offset) {
            (Self::RestrictEdges(options), Some(ModifierOffset::RestrictEdges(offset))) => {
                RestrictEdges::set(ctx, options, offset, status);
            }
            (Self::RestrictEdges(options), _) => {
                RestrictEdges::set(ctx, options, &Sides::default(), status);
            }
            (Self::Snap(options), Some(ModifierOffset::Snap(offsets))) => {
                Snap::set(ctx, options, offsets, status);
            }
            (Self::Snap(options), _) => {
                Snap::set(ctx, options, &SnapOffsets::default(), status);
            }
        }
    }

    pub fn modify_coords(&self, ctx: &mut ModifyContext<'_>, status: &Status) -> Option<Feedback> {
        match self {
            Self::RestrictEdges(options) => RestrictEdges::modify_coords(ctx, options, status),
            Self::Snap(options) => Snap::modify_coords(ctx, options, status),
        }
    }
}

/// Phase-start data of one modifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ModifierOffset {
    RestrictEdges(Sides),
    Snap(SnapOffsets),
}

/// Auxiliary data surfaced by `modify_coords` for observers such as visual
/// feedback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "modifier", rename_all = "camelCase")]
pub enum Feedback {
    Snap(SnapFeedback),
}
