// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, action descriptors, and lifecycle signals.
//!
//! # Role in nudge
//! `nudge-core` holds the host-agnostic vocabulary shared by the pointer
//! layer, the action layer, and the modifier pipeline (`nudge-modifiers`).
//!
//! # Primary responsibilities
//! - **Geometry**: page-space points, rectangles, partial rectangles, sides.
//! - **Coordinates**: page/client pairs updated in lockstep.
//! - **Actions**: the prepared action descriptor and resize edge flags.
//! - **Signals**: the synchronous, ordered lifecycle signal bus.

pub mod action;
pub mod coords;
pub mod geometry;
pub mod logging;
pub mod signal;

pub use action::{ActionName, Edges, ParseActionError, PreparedAction};
pub use coords::CoordsPair;
pub use geometry::{PartialRect, Point, Rect, Sides};
pub use signal::{Flow, Listener, Phase, Signal, SignalArgs, SignalBus};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
