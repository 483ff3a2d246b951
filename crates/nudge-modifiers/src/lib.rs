// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Coordinate modifiers for drag, resize and gesture sessions.
//!
//! # Role in nudge
//! `nudge-modifiers` sits between pointer input and the action layer. On
//! every lifecycle signal of an [`Interaction`] it runs the registered
//! modifiers in order and produces one [`ModifierResult`]: where the target
//! should go and whether a move should be delivered at all.
//!
//! # Primary responsibilities
//! - **Contract**: [`Modifier`] with `start`, `set` and `modify_coords`,
//!   dispatched through the closed [`ModifierKind`].
//! - **Modifiers**: [`RestrictEdges`] clamps resized edges; [`Snap`] pulls
//!   the pointer to the best in-range target.
//! - **Pipeline**: [`pipeline`] phase operations and signal listeners.
//! - **Registry**: ordered [`ModifierRegistry`] with default option records.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//!
//! use nudge_core::{ActionName, CoordsPair, Point, PreparedAction};
//! use nudge_modifiers::{
//!     ActionOptions, Interaction, Scope, SnapOptions, SnapPoint, StaticTarget, TargetOptions,
//! };
//!
//! let scope = Scope::standard();
//! let snap = SnapOptions {
//!     range: 10.0,
//!     ..SnapOptions::new(vec![SnapPoint::new(100.0, 100.0).into()])
//! };
//! let drag = ActionOptions::default().with_snap(snap);
//! let target = Arc::new(StaticTarget::new(
//!     TargetOptions::new().with_action(ActionName::Drag, drag),
//! ));
//!
//! let mut interaction = Interaction::new(&scope, target, PreparedAction::new(ActionName::Drag));
//! interaction.start(&scope, CoordsPair::uniform(Point::new(0.0, 0.0)));
//! interaction.pointer_move(&scope, CoordsPair::uniform(Point::new(95.0, 104.0)));
//!
//! assert_eq!(interaction.session.cur_coords.page, Point::new(100.0, 100.0));
//! ```

pub mod error;
pub mod modifier;
pub mod options;
pub mod pipeline;
pub mod registry;
pub mod restrict_edges;
pub mod scope;
pub mod session;
pub mod snap;
pub mod status;

pub use error::{ModifierError, Result};
pub use modifier::{
    Feedback, Modifier, ModifierKind, ModifierOffset, ModifierOptionsRef, ModifyContext,
    SetContext, StartContext,
};
pub use options::{
    ActionOptions, ModifierConfig, RectFn, RectKeyword, RectSource, StaticTarget, Target,
    TargetOptions,
};
pub use registry::ModifierRegistry;
pub use restrict_edges::{RestrictEdges, RestrictEdgesOptions, clamp_edges};
pub use scope::{ModifierBus, Scope};
pub use session::{Interaction, Session};
pub use snap::{
    GridSpec, Snap, SnapFeedback, SnapFn, SnapOffset, SnapOffsets, SnapOptions, SnapPoint,
    SnapTarget,
};
pub use status::{ModifierResult, ModifiersState, SnapDetail, Status};
