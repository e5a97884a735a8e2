use tutor_llm::LlmError;

/// Failure of a single `chat` invocation. Callers recover through `fallback`.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("completion timed out after {0}s")]
    Timeout(u64),

    #[error("completion failed: {0}")]
    Generation(#[from] LlmError),
}

/// Missing or unusable completion configuration, detected before any network call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration: {field}")]
    Missing { field: &'static str },

    #[error("invalid configuration for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
