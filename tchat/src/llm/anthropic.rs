//! Anthropic Claude API client implementation
//!
//! Implements the LlmClient trait for Anthropic's Messages API. One call maps
//! to one POST; there is no retry or streaming layer.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{CompletionRequest, CompletionResponse, ContentBlock, LlmClient, LlmError, Message, StopReason, TokenUsage};
use crate::config::LlmConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude API client
pub struct AnthropicClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Create a client with explicit settings
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        max_tokens: u32,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let model = model.into();
        debug!(%model, %max_tokens, ?timeout, "AnthropicClient::new: called");
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(LlmError::Network)?;

        Ok(Self {
            model,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            max_tokens,
        })
    }

    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "from_config: called");
        let api_key = config.get_api_key()?;

        Self::new(
            config.model.clone(),
            api_key,
            config.base_url.clone(),
            config.max_tokens,
            config.timeout_ms.map(Duration::from_millis),
        )
    }

    /// Build the request body for the Anthropic API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");
        let mut body = serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens.min(self.max_tokens),
            "messages": self.convert_messages(&request.messages),
        });

        if let Some(system) = &request.system_prompt {
            debug!("build_request_body: adding system prompt");
            body["system"] = serde_json::json!(system);
        }

        if !request.tools.is_empty() {
            debug!(tool_count = %request.tools.len(), "build_request_body: adding tools");
            body["tools"] = serde_json::json!(
                request
                    .tools
                    .iter()
                    .map(|t| t.to_anthropic_schema())
                    .collect::<Vec<_>>()
            );
        }

        body
    }

    /// Convert internal Message types to Anthropic API format
    fn convert_messages(&self, messages: &[Message]) -> Vec<serde_json::Value> {
        debug!(message_count = %messages.len(), "convert_messages: called");
        messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role,
                    "content": msg.content.iter().map(|b| self.convert_content_block(b)).collect::<Vec<_>>(),
                })
            })
            .collect()
    }

    /// Convert a ContentBlock to Anthropic API format
    fn convert_content_block(&self, block: &ContentBlock) -> serde_json::Value {
        match block {
            ContentBlock::Text { text } => {
                serde_json::json!({
                    "type": "text",
                    "text": text,
                })
            }
            ContentBlock::ToolUse { id, name, input } => {
                debug!(%id, %name, "convert_content_block: ToolUse block");
                serde_json::json!({
                    "type": "tool_use",
                    "id": id,
                    "name": name,
                    "input": input,
                })
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => {
                debug!(%tool_use_id, %is_error, "convert_content_block: ToolResult block");
                serde_json::json!({
                    "type": "tool_result",
                    "tool_use_id": tool_use_id,
                    "content": content,
                    "is_error": is_error,
                })
            }
        }
    }

    /// Parse the Anthropic API response, keeping block order intact
    fn parse_response(&self, api_response: AnthropicResponse) -> CompletionResponse {
        debug!(?api_response.stop_reason, "parse_response: called");
        let mut content = Vec::with_capacity(api_response.content.len());

        for block in api_response.content {
            match block {
                AnthropicContentBlock::Text { text } => {
                    content.push(ContentBlock::Text { text });
                }
                AnthropicContentBlock::ToolUse { id, name, input } => {
                    debug!(%id, %name, "parse_response: ToolUse block");
                    content.push(ContentBlock::ToolUse { id, name, input });
                }
                AnthropicContentBlock::Other => {
                    debug!("parse_response: skipping unsupported block type");
                }
            }
        }

        CompletionResponse {
            content,
            stop_reason: api_response
                .stop_reason
                .as_deref()
                .map(StopReason::from_anthropic)
                .unwrap_or(StopReason::EndTurn),
            usage: TokenUsage {
                input_tokens: api_response.usage.input_tokens,
                output_tokens: api_response.usage.output_tokens,
            },
        }
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, message_count = %request.messages.len(), "complete: called");
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(url)
            .header("x-api-key", self.api_key.clone())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let text = response.text().await?;
        let api_response: AnthropicResponse = serde_json::from_str(&text)?;
        let parsed = self.parse_response(api_response);
        info!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            stop_reason = ?parsed.stop_reason,
            "complete: success"
        );
        Ok(parsed)
    }
}

// Anthropic API response types

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
    stop_reason: Option<String>,
    #[serde(default)]
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum AnthropicContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ToolDefinition;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str, max_tokens: u32) -> AnthropicClient {
        AnthropicClient::new(
            "claude-sonnet-4",
            "test-key",
            base_url,
            max_tokens,
            Some(Duration::from_secs(30)),
        )
        .unwrap()
    }

    fn request(messages: Vec<Message>, tools: Vec<ToolDefinition>, max_tokens: u32) -> CompletionRequest {
        CompletionRequest {
            system_prompt: None,
            messages,
            tools,
            max_tokens,
        }
    }

    #[test]
    fn test_build_request_body_basic() {
        let client = test_client("https://api.anthropic.com", 1024);
        let body = client.build_request_body(&request(vec![Message::user("Hello")], vec![], 1024));

        assert_eq!(body["model"], "claude-sonnet-4");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert_eq!(body["messages"][0]["content"][0]["text"], "Hello");
        assert!(body.get("tools").is_none());
        assert!(body.get("system").is_none());
    }

    #[test]
    fn test_build_request_body_with_tools_and_system() {
        let client = test_client("https://api.anthropic.com", 1024);
        let mut req = request(
            vec![Message::user("Read a file")],
            vec![ToolDefinition::new(
                "read_file",
                "Read a file",
                serde_json::json!({"type": "object", "properties": {"path": {"type": "string"}}}),
            )],
            1024,
        );
        req.system_prompt = Some("Be brief".to_string());

        let body = client.build_request_body(&req);

        assert_eq!(body["system"], "Be brief");
        assert!(body["tools"].is_array());
        assert_eq!(body["tools"][0]["name"], "read_file");
        assert!(body["tools"][0]["input_schema"].is_object());
    }

    #[test]
    fn test_build_request_body_tool_result_round() {
        let client = test_client("https://api.anthropic.com", 1024);
        let messages = vec![
            Message::user("what's in a.txt?"),
            Message::assistant_blocks(vec![ContentBlock::tool_use(
                "toolu_1",
                "read_file",
                serde_json::json!({"path": "a.txt"}),
            )]),
            Message::user_blocks(vec![ContentBlock::tool_result("toolu_1", "hello", false)]),
        ];

        let body = client.build_request_body(&request(messages, vec![], 1024));

        assert_eq!(body["messages"][1]["role"], "assistant");
        assert_eq!(body["messages"][1]["content"][0]["type"], "tool_use");
        assert_eq!(body["messages"][2]["content"][0]["type"], "tool_result");
        assert_eq!(body["messages"][2]["content"][0]["tool_use_id"], "toolu_1");
        assert_eq!(body["messages"][2]["content"][0]["is_error"], false);
    }

    #[test]
    fn test_max_tokens_capped() {
        let client = test_client("https://api.anthropic.com", 1000);
        let body = client.build_request_body(&request(vec![], vec![], 5000));
        assert_eq!(body["max_tokens"], 1000);
    }

    #[test]
    fn test_parse_response_keeps_interleaved_order() {
        let client = test_client("https://api.anthropic.com", 1024);
        let api_response: AnthropicResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "text", "text": "first"},
                {"type": "tool_use", "id": "toolu_1", "name": "list_files", "input": {}},
                {"type": "text", "text": "second"}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }))
        .unwrap();

        let parsed = client.parse_response(api_response);

        assert_eq!(parsed.content.len(), 3);
        assert_eq!(parsed.content[0], ContentBlock::text("first"));
        assert!(matches!(&parsed.content[1], ContentBlock::ToolUse { name, .. } if name == "list_files"));
        assert_eq!(parsed.content[2], ContentBlock::text("second"));
        assert_eq!(parsed.stop_reason, StopReason::ToolUse);
        assert_eq!(parsed.usage.input_tokens, 10);
    }

    #[tokio::test]
    async fn test_complete_against_mock_server() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_123",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": "Hello! How can I help?"}],
                "model": "claude-sonnet-4",
                "stop_reason": "end_turn",
                "stop_sequence": null,
                "usage": {"input_tokens": 12, "output_tokens": 8}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), 1024);
        let response = client
            .complete(request(vec![Message::user("Hello?")], vec![], 1024))
            .await
            .unwrap();

        assert_eq!(response.content, vec![ContentBlock::text("Hello! How can I help?")]);
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert_eq!(response.usage.output_tokens, 8);
    }

    #[tokio::test]
    async fn test_complete_api_error_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), 1024);
        let err = client
            .complete(request(vec![Message::user("Hello?")], vec![], 1024))
            .await
            .unwrap_err();

        match err {
            LlmError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal");
            }
            other => panic!("Expected ApiError, got {other:?}"),
        }
    }
}
