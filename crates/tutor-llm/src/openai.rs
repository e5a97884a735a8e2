use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::provider::{LlmProvider, Message};

/// Provider for any endpoint speaking the OpenAI `chat/completions` protocol.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Clone for OpenAiProvider {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

impl OpenAiProvider {
    #[must_use]
    pub fn new(api_key: String, mut base_url: String, model: String, max_tokens: u32) -> Self {
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: crate::http::default_client(Duration::from_secs(60)),
            api_key,
            base_url,
            model,
            max_tokens,
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_client(crate::http::default_client(timeout))
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, messages: &[Message]) -> Result<String, LlmError> {
        let api_messages = convert_messages(messages);
        let body = ChatRequest {
            model: &self.model,
            messages: &api_messages,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.map_err(LlmError::Http)?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            tracing::error!("completion API error {status}: {text}");
            return Err(LlmError::Status {
                provider: "openai".into(),
                status: status.as_u16(),
            });
        }

        let resp: ChatResponse = serde_json::from_str(&text)?;

        if let Some(ref usage) = resp.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion API usage"
            );
        }

        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyResponse {
                provider: "openai".into(),
            })
    }
}

impl LlmProvider for OpenAiProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        self.send_request(messages).await
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "openai"
    }
}

fn convert_messages(messages: &[Message]) -> Vec<ApiMessage<'_>> {
    messages
        .iter()
        .map(|msg| ApiMessage {
            role: msg.role.as_str(),
            content: &msg.content,
        })
        .collect()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ApiMessage<'a>],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(
            "test-key".into(),
            format!("{}/v1/", server.uri()),
            "gpt-4o-mini".into(),
            512,
        )
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 5 }
        })
    }

    #[test]
    fn new_strips_trailing_slashes() {
        let p = OpenAiProvider::new("k".into(), "http://host/v1///".into(), "m".into(), 10);
        assert_eq!(p.base_url, "http://host/v1");
    }

    #[test]
    fn debug_redacts_api_key() {
        let p = OpenAiProvider::new("sk-secret".into(), "http://host".into(), "m".into(), 10);
        let debug = format!("{p:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn convert_messages_maps_roles() {
        let msgs = vec![Message::system("sys"), Message::user("hi")];
        let api = convert_messages(&msgs);
        assert_eq!(api[0].role, "system");
        assert_eq!(api[1].role, "user");
        assert_eq!(api[1].content, "hi");
    }

    #[test]
    fn name_is_openai() {
        let p = OpenAiProvider::new("k".into(), "http://host".into(), "m".into(), 10);
        assert_eq!(p.name(), "openai");
    }

    #[tokio::test]
    async fn chat_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 512,
                "messages": [{ "role": "user", "content": "hello" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hi there")))
            .expect(1)
            .mount(&server)
            .await;

        let answer = provider_for(&server)
            .chat(&[Message::user("hello")])
            .await
            .unwrap();
        assert_eq!(answer, "hi there");
    }

    #[tokio::test]
    async fn chat_server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .chat(&[Message::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn chat_rate_limit_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .chat(&[Message::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[tokio::test]
    async fn chat_malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .chat(&[Message::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Json(_)));
    }

    #[tokio::test]
    async fn chat_without_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .chat(&[Message::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn chat_null_content_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": null } }]
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .chat(&[Message::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn chat_unreachable_errors() {
        let p = OpenAiProvider::new("k".into(), "http://127.0.0.1:1".into(), "m".into(), 10);
        let err = p.chat(&[Message::user("hello")]).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
