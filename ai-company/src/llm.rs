//! Claude API client with tool-use support.
//!
//! Every agent talks to the model through the [`ChatModel`] trait: a system
//! prompt built from its role, the running conversation, and the tool
//! definitions it is allowed to call.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default Anthropic endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
/// Default model for all agents.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: MessageContent,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: MessageContent::Blocks(blocks),
        }
    }

    pub fn user_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Blocks(blocks),
        }
    }
}

/// Message content — either a simple string or structured blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse(ToolUseBlock),
    #[serde(rename = "tool_result")]
    ToolResult(ToolResultBlock),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUseBlock {
    pub id: String,
    pub name: String,
    pub input: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResultBlock {
    pub tool_use_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Tool definition as advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Response from the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

impl ApiResponse {
    /// Concatenated text blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// All tool-use blocks, in the order the model emitted them.
    pub fn tool_uses(&self) -> Vec<&ToolUseBlock> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse(tu) => Some(tu),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl Usage {
    pub fn add(&mut self, other: &Usage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }

    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Anything that can answer a conversation turn.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[ToolDef],
        max_tokens: u32,
    ) -> Result<ApiResponse>;
}

/// Claude API client.
pub struct LlmClient {
    api_key: String,
    model: String,
    api_base: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn chat(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[ToolDef],
        max_tokens: u32,
    ) -> Result<ApiResponse> {
        if self.api_key.is_empty() {
            anyhow::bail!("ANTHROPIC_API_KEY is not set (export it or add it to .env)");
        }

        let mut body = serde_json::json!({
            "model": &self.model,
            "max_tokens": max_tokens,
            "system": system,
            "messages": messages,
        });

        if !tools.is_empty() {
            body["tools"] = serde_json::to_value(tools)?;
        }

        let resp = self
            .http
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to call Claude API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Claude API error {status}: {body}");
        }

        resp.json::<ApiResponse>()
            .await
            .context("Failed to parse Claude response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_response() {
        let raw = r#"{
            "content": [
                {"type": "text", "text": "Let me search. "},
                {"type": "tool_use", "id": "toolu_1", "name": "web_search", "input": {"query": "rust"}},
                {"type": "text", "text": "Done."}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 12, "output_tokens": 7}
        }"#;
        let resp: ApiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.text(), "Let me search. Done.");
        let uses = resp.tool_uses();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].name, "web_search");
        assert_eq!(uses[0].input["query"], "rust");
        assert_eq!(resp.usage.unwrap().total(), 19);
    }

    #[test]
    fn tool_result_omits_missing_error_flag() {
        let block = ContentBlock::ToolResult(ToolResultBlock {
            tool_use_id: "toolu_1".to_string(),
            content: "ok".to_string(),
            is_error: None,
        });
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "tool_result");
        assert!(json.get("is_error").is_none());
    }

    #[test]
    fn plain_user_message_serializes_as_string() {
        let json = serde_json::to_value(Message::user("你好")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "你好");
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let client = LlmClient::new("k".into()).with_api_base("http://localhost:8080/");
        assert_eq!(client.messages_url(), "http://localhost:8080/v1/messages");
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = LlmClient::new(String::new()).with_api_base("http://127.0.0.1:9");
        let err = client
            .chat("system", &[Message::user("hi")], &[], 16)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }
}
