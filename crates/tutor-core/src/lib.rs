//! Retrieval-augmented support chat over the course knowledge base, plus configuration.

pub mod chat;
pub mod config;
pub mod error;

pub use chat::{ChatConfig, ChatReply, ChatService, SourceRef};
pub use config::Config;
pub use error::{ChatError, ConfigError};
