//! Error types for the batch packer and settings loading

use thiserror::Error;

/// Errors raised while packing quads into a [`Batch`](crate::renderer::Batch).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// Pushing would exceed the fixed instance capacity of the batch.
    #[error("batch overflow: capacity {capacity} instances, tried to hold {requested}")]
    Overflow {
        /// Maximum instances the batch was created with.
        capacity: usize,
        /// Instance count the push would have produced.
        requested: usize,
    },
}

/// Errors raised while loading [`Settings`](crate::Settings).
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings document is not valid JSON for the settings schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the game cannot run with.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
