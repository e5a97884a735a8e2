use super::{Config, Secret};

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TUTOR_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("TUTOR_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("TUTOR_LLM_MAX_TOKENS") {
            if let Ok(n) = v.parse::<u32>() {
                self.llm.max_tokens = n;
            } else {
                tracing::warn!("ignoring invalid TUTOR_LLM_MAX_TOKENS value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TUTOR_CHAT_TIMEOUT") {
            if let Ok(secs) = v.parse::<u64>() {
                self.chat.timeout_seconds = secs;
            } else {
                tracing::warn!("ignoring invalid TUTOR_CHAT_TIMEOUT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("TUTOR_COURSE_PATH") {
            self.knowledge.course_path = v;
        }
        if let Ok(v) = std::env::var("TUTOR_LLM_API_KEY")
            && !v.trim().is_empty()
        {
            self.secrets.api_key = Some(Secret::new(v));
        }
    }
}
