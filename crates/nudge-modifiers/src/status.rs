#![forbid(unsafe_code)]

//! Per-session modifier state.
//!
//! A [`Status`] is owned by exactly one session and mutated in place on
//! every tick. Only `delta` and `locked` are reset at phase start; data a
//! modifier stashes alongside them survives across ticks.

use std::collections::BTreeMap;

use nudge_core::{Point, Sides};
use serde::Serialize;

use crate::modifier::{Feedback, ModifierKind, ModifierOffset};
use crate::registry::ModifierRegistry;

/// Snap's private per-session record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SnapDetail {
    /// Unsnapped position, relative to the snap origin.
    pub real: Point,
    /// Chosen snap point, relative to the snap origin (`None` when no candidate
    /// was produced).
    pub target: Option<Point>,
    /// Effective range of the chosen point.
    pub range: f64,
}

/// Mutable state of one modifier within one session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Status {
    /// Additive page-space correction.
    pub delta: Point,
    /// The modifier is currently constraining the position.
    pub locked: bool,
    /// Stashed by the snap modifier; never cleared by [`reset`](Self::reset).
    pub snap: Option<SnapDetail>,
}

impl Status {
    /// Zero `delta` and clear `locked`, leaving modifier-private data
    /// untouched.
    pub fn reset(&mut self) {
        self.delta = Point::ZERO;
        self.locked = false;
    }

    pub fn snap_detail_mut(&mut self) -> &mut SnapDetail {
        self.snap.get_or_insert_with(SnapDetail::default)
    }
}

/// Aggregate correction computed by one pipeline tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ModifierResult {
    /// Sum of the deltas of every locked modifier.
    pub delta: Point,
    /// Pointer position with every locked delta applied.
    pub coords: Point,
    /// `coords` differ from the session's current page coordinates.
    pub changed: bool,
    /// At least one modifier is locked.
    pub locked: bool,
    /// A move notification should be emitted for this tick.
    pub should_move: bool,
}

/// Modifier sub-state of one interaction session.
#[derive(Debug, Clone, Default)]
pub struct ModifiersState {
    /// Distances from the initiating pointer to the manipulated rectangle's
    /// edges; zero when no rectangle was available.
    pub start_offset: Sides,
    /// Per-modifier data computed once at phase start.
    pub offsets: BTreeMap<ModifierKind, ModifierOffset>,
    pub statuses: BTreeMap<ModifierKind, Status>,
    /// Result of the latest tick.
    pub result: Option<ModifierResult>,
    /// Auxiliary payloads from the latest `set_cur_coords` pass.
    pub feedback: Vec<Feedback>,
}

impl ModifiersState {
    /// Fresh state with a reset status for every registered modifier.
    #[must_use]
    pub fn new(registry: &ModifierRegistry) -> Self {
        let mut state = Self::default();
        state.reset_statuses(registry);
        state
    }

    /// Reset the status of every registered modifier, creating it if absent.
    pub fn reset_statuses(&mut self, registry: &ModifierRegistry) {
        for kind in registry.iter() {
            self.statuses.entry(kind).or_default().reset();
        }
    }

    #[must_use]
    pub fn status(&self, kind: ModifierKind) -> Option<&Status> {
        self.statuses.get(&kind)
    }
}
