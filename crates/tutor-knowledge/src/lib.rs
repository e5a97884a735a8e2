//! In-memory course knowledge base with keyword relevance search.
//!
//! Static course content (pages, section metadata, quizzes, worked explanations)
//! is materialized once into immutable [`Chunk`]s. [`KnowledgeStore::search`]
//! scores every chunk against a free-text query and returns the best matches.
//! The store is read-only after construction, so it can be shared across
//! concurrent requests behind an `Arc` without locking.

pub mod chunk;
pub mod content;
pub mod error;
pub mod scoring;
pub mod store;

pub use chunk::{Chunk, ChunkCategory};
pub use content::{CourseContent, Quiz, QuizQuestion, Section};
pub use error::{KnowledgeError, Result};
pub use scoring::ScoringWeights;
pub use store::{KnowledgeStore, ScoredChunk};
