//! Error types for the stage toolkit.

use thiserror::Error;

/// Stage-level errors.
///
/// These are configuration errors: they surface synchronously at load or
/// construction time, never later during dispatch or rendering.
#[derive(Debug, Clone, Error)]
pub enum StageError {
    /// A texture required by a widget is absent from its sheet.
    #[error("texture `{name}` missing from sprite `{owner}`'s sheet")]
    MissingTexture { owner: String, name: String },

    /// A sheet descriptor failed to parse.
    #[error("failed to parse sheet descriptor: {0}")]
    InvalidSheet(String),

    /// A widget configuration that cannot produce a working sprite.
    #[error("invalid configuration for `{owner}`: {reason}")]
    InvalidConfig { owner: String, reason: String },

    /// No atlas registered under the given name.
    #[error("no atlas registered under `{0}`")]
    UnknownAtlas(String),
}

/// A specialized Result type for stage operations.
pub type Result<T> = std::result::Result<T, StageError>;
