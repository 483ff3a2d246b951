#![forbid(unsafe_code)]

//! Prepared action descriptors.
//!
//! An action is prepared by the gesture layer before a session starts: it
//! names the kind of manipulation and, for resizes, which edges are being
//! dragged.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of manipulation a session performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionName {
    Drag,
    Resize,
    Gesture,
}

impl ActionName {
    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Resize => "resize",
            Self::Gesture => "gesture",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action name: {name}")]
pub struct ParseActionError {
    pub name: String,
}

impl FromStr for ActionName {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drag" => Ok(Self::Drag),
            "resize" => Ok(Self::Resize),
            "gesture" => Ok(Self::Gesture),
            other => Err(ParseActionError {
                name: other.to_owned(),
            }),
        }
    }
}

bitflags! {
    /// Edges of the target being manipulated by a resize.
    ///
    /// `TOP`/`BOTTOM` and `LEFT`/`RIGHT` are mutually exclusive within one
    /// session; when both are set the first of each pair wins.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Edges: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
    }
}

/// The action a session was prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreparedAction {
    pub name: ActionName,
    /// Edges grabbed by the pointer (resize only).
    pub edges: Option<Edges>,
    /// Edges moved together with the grabbed ones, when the action links them
    /// (e.g. aspect-ratio preserving resizes).
    pub linked_edges: Option<Edges>,
}

impl PreparedAction {
    /// A prepared action with no edge information.
    #[must_use]
    pub const fn new(name: ActionName) -> Self {
        Self {
            name,
            edges: None,
            linked_edges: None,
        }
    }

    /// A resize grabbing `edges`.
    #[must_use]
    pub const fn resize(edges: Edges) -> Self {
        Self {
            name: ActionName::Resize,
            edges: Some(edges),
            linked_edges: None,
        }
    }

    /// Builder: set the linked edges.
    #[must_use]
    pub const fn with_linked_edges(mut self, edges: Edges) -> Self {
        self.linked_edges = Some(edges);
        self
    }

    /// Edges actually constrained this session: linked edges if present,
    /// otherwise the grabbed edges.
    #[must_use]
    pub fn active_edges(&self) -> Option<Edges> {
        self.linked_edges.or(self.edges)
    }
}
