#![forbid(unsafe_code)]

//! Structured logging re-exports.
//!
//! With the `tracing` feature enabled, the `tracing` macros are re-exported
//! here so downstream crates log through `nudge_core` without naming the
//! dependency themselves.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
