#![forbid(unsafe_code)]

//! Synchronous lifecycle signals.
//!
//! A [`SignalBus`] is an ordered list of plain `fn` listeners, each
//! registered against one [`Signal`]. [`emit`](SignalBus::emit) invokes the
//! listeners for that signal in subscription order, on the caller's stack.
//!
//! # Invariants
//!
//! 1. Listeners run in the order they were registered.
//! 2. A listener returning [`Flow::Suppress`] stops the dispatch of the
//!    current signal; later listeners for that signal do not run and the
//!    emitter receives `Suppress`.
//! 3. Listeners may mutate the shared [`SignalArgs`]; the emitter observes
//!    every mutation after `emit` returns.

use std::fmt;

// ---------------------------------------------------------------------------
// Signals and phases
// ---------------------------------------------------------------------------

/// Lifecycle signals emitted by an interaction session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// A session object was created.
    New,
    /// The action is about to start.
    BeforeActionStart,
    /// A suspended session continues.
    ActionResume,
    /// The pointer moved while the action is running.
    BeforeActionMove,
    /// The action is about to end.
    BeforeActionEnd,
}

/// Lifecycle phase a signal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Start,
    Move,
    Resume,
    End,
}

/// Per-emission arguments shared by every listener of one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalArgs {
    pub phase: Phase,
    /// This move is the synthetic move issued right before the action ends.
    pub pre_end: bool,
    /// The session was already interacting before this move (not its first
    /// tick).
    pub interacting_before_move: bool,
    /// Set by a `BeforeActionEnd` listener to ask the emitter for one final
    /// synthetic move.
    pub pre_end_move_requested: bool,
}

impl SignalArgs {
    /// Arguments for a signal of `phase`, all flags cleared.
    #[must_use]
    pub const fn new(phase: Phase) -> Self {
        Self {
            phase,
            pre_end: false,
            interacting_before_move: false,
            pre_end_move_requested: false,
        }
    }
}

/// Listener verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    /// Stop dispatching this signal and report suppression to the emitter.
    Suppress,
}

impl Flow {
    #[inline]
    #[must_use]
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppress)
    }
}

/// A listener: shared context `C`, mutable subject `T`, shared arguments.
pub type Listener<C, T> = fn(&C, &mut T, &mut SignalArgs) -> Flow;

// ---------------------------------------------------------------------------
// SignalBus
// ---------------------------------------------------------------------------

/// Ordered multi-subscriber signal dispatcher.
pub struct SignalBus<C, T> {
    listeners: Vec<(Signal, Listener<C, T>)>,
}

impl<C, T> fmt::Debug for SignalBus<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<C, T> Default for SignalBus<C, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, T> SignalBus<C, T> {
    /// Create an empty bus.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Subscribe `listener` to `signal`, after any existing subscribers.
    pub fn on(&mut self, signal: Signal, listener: Listener<C, T>) {
        self.listeners.push((signal, listener));
    }

    /// Number of listeners subscribed to `signal`.
    #[must_use]
    pub fn listener_count(&self, signal: Signal) -> usize {
        self.listeners.iter().filter(|(s, _)| *s == signal).count()
    }

    /// Dispatch `signal` to its listeners in subscription order.
    pub fn emit(&self, signal: Signal, ctx: &C, subject: &mut T, args: &mut SignalArgs) -> Flow {
        for (subscribed, listener) in &self.listeners {
            if *subscribed != signal {
                continue;
            }
            if listener(ctx, subject, args).is_suppressed() {
                return Flow::Suppress;
            }
        }
        Flow::Continue
    }
}
