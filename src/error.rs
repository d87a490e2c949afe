//! Error types for the render-peek library.

use thiserror::Error;

/// Errors raised at the edges of the library.
///
/// Observing and committing renders never fails; these only surface when
/// converting caller values into [`Props`](crate::Props), when no runtime is
/// available to schedule the flash reset, or when parsing settings.
#[derive(Debug, Error)]
pub enum PeekError {
    /// Props must serialize to a JSON object (a map of named values).
    #[error("props must serialize to an object, got {0}")]
    NotAnObject(&'static str),

    /// The props value could not be serialized.
    #[error("failed to serialize props: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No tokio runtime was running on the calling thread.
    #[error("no tokio runtime available to schedule the flash reset")]
    NoRuntime,

    /// A duration string could not be parsed.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}
