use std::fmt;

use serde::Deserialize;
use tutor_knowledge::ScoringWeights;

use crate::chat::ChatConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub search: ScoringWeights,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(skip)]
    pub secrets: ResolvedSecrets,
}

fn default_max_tokens() -> u32 {
    1024
}

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_course_path() -> String {
    "config/course.json".into()
}

#[derive(Debug, Deserialize)]
pub struct KnowledgeConfig {
    #[serde(default = "default_course_path")]
    pub course_path: String,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            course_path: default_course_path(),
        }
    }
}

/// Wrapper for sensitive strings with redacted Debug/Display.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Secrets resolved from the environment; never read from the config file.
#[derive(Debug, Default)]
pub struct ResolvedSecrets {
    pub api_key: Option<Secret>,
}
