#![forbid(unsafe_code)]

//! Interaction sessions and a minimal host driver.
//!
//! [`Session`] is the view of an in-progress manipulation the modifiers
//! read: coordinates, the prepared action, and the target. [`Interaction`]
//! pairs it with the session-owned [`ModifiersState`] and drives the
//! lifecycle signals through a [`Scope`].
//!
//! ```text
//! new -> start -> (pointer_move)* -> end
//!          \-> resume (after a suspension) -> (pointer_move)* -> end
//! ```

use std::fmt;
use std::sync::Arc;

use nudge_core::{CoordsPair, Flow, Phase, Point, PreparedAction, Signal, SignalArgs};

use crate::options::{ActionOptions, Target};
use crate::scope::Scope;
use crate::status::{ModifierResult, ModifiersState};

/// One in-progress pointer manipulation.
#[derive(Clone)]
pub struct Session {
    pub start_coords: CoordsPair,
    pub cur_coords: CoordsPair,
    pub prepared: PreparedAction,
    pub target: Arc<dyn Target>,
    interacting: bool,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("start_coords", &self.start_coords)
            .field("cur_coords", &self.cur_coords)
            .field("prepared", &self.prepared)
            .field("interacting", &self.interacting)
            .finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub fn new(target: Arc<dyn Target>, prepared: PreparedAction) -> Self {
        Self {
            start_coords: CoordsPair::default(),
            cur_coords: CoordsPair::default(),
            prepared,
            target,
            interacting: false,
        }
    }

    /// The action has started and not yet ended.
    #[inline]
    #[must_use]
    pub const fn interacting(&self) -> bool {
        self.interacting
    }

    pub fn set_interacting(&mut self, interacting: bool) {
        self.interacting = interacting;
    }

    /// Options of the prepared action on the target.
    #[must_use]
    pub fn action_options(&self) -> Option<&ActionOptions> {
        self.target.options().action(self.prepared.name)
    }

    /// The target's default origin for the prepared action.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.target.origin(self.prepared.name)
    }
}

/// A session together with its modifier sub-state.
#[derive(Debug, Clone)]
pub struct Interaction {
    pub session: Session,
    pub modifiers: ModifiersState,
    move_ticks: u64,
}

impl Interaction {
    /// Create an interaction and emit [`Signal::New`].
    #[must_use]
    pub fn new(scope: &Scope, target: Arc<dyn Target>, prepared: PreparedAction) -> Self {
        let mut interaction = Self {
            session: Session::new(target, prepared),
            modifiers: ModifiersState::default(),
            move_ticks: 0,
        };
        scope.emit(
            Signal::New,
            &mut interaction,
            &mut SignalArgs::new(Phase::Start),
        );
        interaction
    }

    /// Latest aggregate correction.
    #[must_use]
    pub fn result(&self) -> Option<&ModifierResult> {
        self.modifiers.result.as_ref()
    }

    /// Start the action with the pointer at `coords`.
    pub fn start(&mut self, scope: &Scope, coords: CoordsPair) -> Flow {
        self.session.start_coords = coords;
        self.session.cur_coords = coords;
        self.move_ticks = 0;
        let flow = scope.emit(
            Signal::BeforeActionStart,
            self,
            &mut SignalArgs::new(Phase::Start),
        );
        self.session.set_interacting(true);
        flow
    }

    /// Record a new raw pointer position and run one move tick.
    ///
    /// Returns [`Flow::Suppress`] when the move should not be delivered.
    /// Moves on a session that is not interacting are ignored.
    pub fn pointer_move(&mut self, scope: &Scope, coords: CoordsPair) -> Flow {
        if !self.session.interacting() {
            return Flow::Continue;
        }
        self.session.cur_coords = coords;
        let args = SignalArgs {
            interacting_before_move: self.move_ticks > 0,
            ..SignalArgs::new(Phase::Move)
        };
        self.do_move(scope, args)
    }

    /// Continue a suspended session with the pointer at `coords`.
    pub fn resume(&mut self, scope: &Scope, coords: CoordsPair) -> Flow {
        self.session.cur_coords = coords;
        let flow = scope.emit(
            Signal::ActionResume,
            self,
            &mut SignalArgs::new(Phase::Resume),
        );
        self.session.set_interacting(true);
        flow
    }

    /// End the action, first running one synthetic move if a listener asks
    /// for it (end-only modifiers).
    pub fn end(&mut self, scope: &Scope) -> Flow {
        let mut args = SignalArgs::new(Phase::End);
        let flow = scope.emit(Signal::BeforeActionEnd, self, &mut args);
        if args.pre_end_move_requested {
            let pre_end = SignalArgs {
                pre_end: true,
                ..SignalArgs::new(Phase::Move)
            };
            self.do_move(scope, pre_end);
        }
        self.session.set_interacting(false);
        flow
    }

    fn do_move(&mut self, scope: &Scope, mut args: SignalArgs) -> Flow {
        let flow = scope.emit(Signal::BeforeActionMove, self, &mut args);
        self.move_ticks = self.move_ticks.saturating_add(1);
        flow
    }
}
