//! Anthropic Messages API provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use triage::{ApiCredential, ClassifierError, TextGenerator};

/// Default API base URL. The provider appends `/v1/messages`.
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";

/// Anthropic API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Pinned model identifier used for every classification.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Output token cap for a classification response.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [RequestMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic Claude provider.
///
/// Sends one single-turn user message per call. No retry and no request
/// timeout beyond what the hosting platform imposes.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: Client,
    api_key: ApiCredential,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Creates a provider with the default endpoint, model, and token cap.
    pub fn new(api_key: ApiCredential) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: ANTHROPIC_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Sets a custom base URL (e.g. a proxy or a test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reuses an existing HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Returns the model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for AnthropicProvider {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, ClassifierError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifierError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Text-generation provider returned an error status");
            return Err(ClassifierError::Unavailable {
                status: status.as_u16(),
            });
        }

        let envelope: MessagesResponse =
            response
                .json()
                .await
                .map_err(|e| ClassifierError::MalformedResponse {
                    message: e.to_string(),
                })?;

        debug!(blocks = envelope.content.len(), "Parsed messages response");

        envelope
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| ClassifierError::MalformedResponse {
                message: "response contained no text content block".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider(server: &MockServer) -> AnthropicProvider {
        AnthropicProvider::new(ApiCredential::new("test-key").unwrap()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_returns_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({
                "model": DEFAULT_MODEL,
                "max_tokens": 1024,
                "messages": [{ "role": "user", "content": "classify me" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_01",
                "model": DEFAULT_MODEL,
                "content": [
                    { "type": "text", "text": "first" },
                    { "type": "text", "text": "second" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider(&server).generate("classify me").await.unwrap();

        assert_eq!(text, "first");
    }

    #[tokio::test]
    async fn test_generate_skips_non_text_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    { "type": "thinking", "thinking": "hmm" },
                    { "type": "text", "text": "answer" }
                ]
            })))
            .mount(&server)
            .await;

        let text = provider(&server).generate("p").await.unwrap();

        assert_eq!(text, "answer");
    }

    #[tokio::test]
    async fn test_error_status_maps_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = provider(&server).generate("p").await.unwrap_err();

        assert_eq!(err, ClassifierError::Unavailable { status: 503 });
    }

    #[tokio::test]
    async fn test_missing_text_block_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
            .mount(&server)
            .await;

        let err = provider(&server).generate("p").await.unwrap_err();

        assert!(matches!(err, ClassifierError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = provider(&server).generate("p").await.unwrap_err();

        assert!(matches!(err, ClassifierError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_transport() {
        // Nothing listens on port 9 on the loopback interface.
        let provider = AnthropicProvider::new(ApiCredential::new("k").unwrap())
            .with_base_url("http://127.0.0.1:9");

        let err = provider.generate("p").await.unwrap_err();

        assert!(matches!(err, ClassifierError::Transport { .. }));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let provider = AnthropicProvider::new(ApiCredential::new("k").unwrap())
            .with_base_url("http://proxy.local/");
        assert_eq!(provider.messages_url(), "http://proxy.local/v1/messages");
        assert_eq!(provider.model(), DEFAULT_MODEL);
    }
}
