mod env;
mod types;


pub use types::*;

use std::path::Path;

use anyhow::Context;
use tutor_knowledge::ScoringWeights;

use crate::chat::ChatConfig;
use crate::error::ConfigError;

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Check that completion settings are usable before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an empty endpoint or model or a missing
    /// API key, and [`ConfigError::Invalid`] for zero limits, caps or timeouts and for
    /// scoring weights that would let token hits outrank a whole-query match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "llm.base_url",
            });
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Missing { field: "llm.model" });
        }
        if self.secrets.api_key.is_none() {
            return Err(ConfigError::Missing {
                field: "TUTOR_LLM_API_KEY",
            });
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::Invalid {
                field: "llm.max_tokens",
                reason: "must be greater than zero",
            });
        }
        if self.chat.timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "chat.timeout_seconds",
                reason: "must be greater than zero",
            });
        }

        let chat = &self.chat;
        for (field, value) in [
            ("chat.search_limit", chat.search_limit),
            ("chat.real_time_search_limit", chat.real_time_search_limit),
            ("chat.fallback_search_limit", chat.fallback_search_limit),
            ("chat.fallback_excerpt_chars", chat.fallback_excerpt_chars),
            ("chat.example_context_chars", chat.example_context_chars),
            ("chat.default_context_chars", chat.default_context_chars),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        let weights = &self.search;
        if weights.exact_content <= weights.exact_source {
            return Err(ConfigError::Invalid {
                field: "search.exact_content",
                reason: "must be greater than search.exact_source",
            });
        }
        if weights.exact_source <= weights.token_occurrence {
            return Err(ConfigError::Invalid {
                field: "search.exact_source",
                reason: "must be greater than search.token_occurrence",
            });
        }
        Ok(())
    }

    fn default() -> Self {
        Self {
            llm: LlmConfig {
                base_url: "https://api.openai.com/v1".into(),
                model: "gpt-4o-mini".into(),
                max_tokens: 1024,
            },
            knowledge: KnowledgeConfig::default(),
            search: ScoringWeights::default(),
            chat: ChatConfig::default(),
            secrets: ResolvedSecrets::default(),
        }
    }
}
