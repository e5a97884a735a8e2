//! Error types for tutor-knowledge.

/// Errors that can occur while building a knowledge store.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    /// Two chunks were assigned the same identifier.
    #[error("duplicate chunk id: {0}")]
    DuplicateId(String),

    /// Course content could not be decoded.
    #[error("invalid course content: {0}")]
    Content(#[from] serde_json::Error),
}

/// Result type alias using `KnowledgeError`.
pub type Result<T> = std::result::Result<T, KnowledgeError>;
