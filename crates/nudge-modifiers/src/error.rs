#![forbid(unsafe_code)]

//! Modifier configuration errors.
//!
//! The pipeline itself never fails; these cover registry setup and parsing
//! option records.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModifierError>;

#[derive(Debug, Error)]
pub enum ModifierError {
    #[error("modifier already registered: {name}")]
    DuplicateModifier { name: &'static str },

    #[error("unknown modifier: {name}")]
    UnknownModifier { name: String },

    #[error(transparent)]
    UnknownAction(#[from] nudge_core::ParseActionError),

    #[error("invalid modifier options: {0}")]
    Config(#[from] serde_json::Error),
}
