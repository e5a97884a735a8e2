//! Retrieval-augmented chat over the course knowledge base.
//!
//! One invocation runs strictly in order: search, build context, generate,
//! post-process. When search finds nothing the model is never called.

pub mod prompt;
pub mod rules;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tutor_knowledge::{Chunk, KnowledgeStore};
use tutor_llm::{LlmProvider, Message};

use crate::error::ChatError;

pub const NO_MATCH_ANSWER: &str = "I couldn't find specific information about that in the \
training materials. Try rephrasing your question, or use terms from the course such as a \
page topic or an error category name.";

pub const APOLOGY_ANSWER: &str = "I'm sorry, I can't answer your question right now. Please \
try again in a moment, or reach out to your mentor.";

/// Orchestration knobs. Defaults match the reference behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub search_limit: usize,
    pub real_time_search_limit: usize,
    pub fallback_search_limit: usize,
    pub history_window: usize,
    pub example_context_chars: usize,
    pub default_context_chars: usize,
    pub fallback_excerpt_chars: usize,
    pub timeout_seconds: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            search_limit: 10,
            real_time_search_limit: 12,
            fallback_search_limit: 3,
            history_window: 4,
            example_context_chars: 4000,
            default_context_chars: 2500,
            fallback_excerpt_chars: 600,
            timeout_seconds: 25,
        }
    }
}

impl ChatConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    pub source: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub answer: String,
    pub sources: Vec<SourceRef>,
    pub context_used: Vec<String>,
}

impl ChatReply {
    fn canned(answer: &str) -> Self {
        Self {
            answer: answer.to_owned(),
            sources: Vec::new(),
            context_used: Vec::new(),
        }
    }

    fn from_chunks(answer: String, chunks: &[&Chunk]) -> Self {
        Self {
            answer,
            sources: chunks
                .iter()
                .map(|c| SourceRef {
                    source: c.source.clone(),
                    id: c.id.clone(),
                })
                .collect(),
            context_used: chunks.iter().map(|c| c.source.clone()).collect(),
        }
    }
}

/// Answers support questions from the knowledge base through a completion provider.
pub struct ChatService<P: LlmProvider> {
    store: Arc<KnowledgeStore>,
    provider: Arc<P>,
    config: ChatConfig,
}

impl<P: LlmProvider> ChatService<P> {
    #[must_use]
    pub fn new(store: Arc<KnowledgeStore>, provider: Arc<P>, config: ChatConfig) -> Self {
        Self {
            store,
            provider,
            config,
        }
    }

    /// Generate an answer to `message` grounded in the knowledge base.
    ///
    /// `history` is supplied by the caller; only its last
    /// [`history_window`](ChatConfig::history_window) turns are sent.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::EmptyMessage`] for a blank message,
    /// [`ChatError::Timeout`] when the provider does not answer in time, and
    /// [`ChatError::Generation`] when the provider fails. No retry is attempted;
    /// callers should fall back to [`fallback`](Self::fallback).
    pub async fn chat(&self, message: &str, history: &[Message]) -> Result<ChatReply, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let is_real_time = rules::detect_real_time_scenario(message);
        let limit = if is_real_time {
            self.config.real_time_search_limit
        } else {
            self.config.search_limit
        };

        let chunks = self.store.search(message, limit);
        if chunks.is_empty() {
            tracing::debug!(is_real_time, "no knowledge base match");
            return Ok(ChatReply::canned(NO_MATCH_ANSWER));
        }

        let context = prompt::build_context(&chunks, &self.config);
        let system = prompt::build_system_prompt(&context, is_real_time);
        let messages =
            prompt::assemble_messages(system, history, self.config.history_window, message);

        let answer = match tokio::time::timeout(
            self.config.timeout(),
            self.provider.chat(&messages),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => return Err(ChatError::Timeout(self.config.timeout_seconds)),
        };

        let rewritten = rules::answer_first(message, &answer, is_real_time);
        tracing::info!(
            provider = self.provider.name(),
            is_real_time,
            chunks = chunks.len(),
            history = messages.len() - 2,
            rewritten = rewritten.is_some(),
            "chat answered"
        );

        Ok(ChatReply::from_chunks(
            rewritten.unwrap_or(answer),
            &chunks,
        ))
    }

    /// Degraded answer built from the best-matching chunk without calling the provider.
    #[must_use]
    pub fn fallback(&self, message: &str) -> ChatReply {
        let chunks = self
            .store
            .search(message, self.config.fallback_search_limit);

        let Some(top) = chunks.first() else {
            return ChatReply::canned(APOLOGY_ANSWER);
        };

        let excerpt = prompt::truncate_chars(&top.content, self.config.fallback_excerpt_chars);
        let ellipsis = if excerpt.len() < top.content.len() {
            "..."
        } else {
            ""
        };
        let answer = format!(
            "I can't reach the assistant right now, but this part of the training material \
             looks relevant ({source}):\n\n{excerpt}{ellipsis}\n\nPlease try again shortly \
             for a complete answer.",
            source = top.source,
        );

        ChatReply::from_chunks(answer, &[*top])
    }

    /// [`chat`](Self::chat), degrading to [`fallback`](Self::fallback) on any failure.
    pub async fn respond(&self, message: &str, history: &[Message]) -> ChatReply {
        match self.chat(message, history).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "chat failed, using fallback answer");
                self.fallback(message)
            }
        }
    }
}
