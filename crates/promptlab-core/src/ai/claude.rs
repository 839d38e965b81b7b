use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use anyhow::{Result, anyhow};

use crate::state::{ChatMessage, ChatRole};

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1000;
/// Used only when the conversation carries its own system prompt
const SYSTEM_TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct ClaudeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Clone)]
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ClaudeClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, ANTHROPIC_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// A leading system message moves to the top-level `system` field, the
    /// rest stay in order as `messages`.
    fn build_request<'a>(model: &'a str, messages: &'a [ChatMessage]) -> ClaudeRequest<'a> {
        let (system, rest) = match messages.split_first() {
            Some((first, rest)) if first.role == ChatRole::System => {
                (Some(first.content.as_str()), rest)
            }
            _ => (None, messages),
        };

        ClaudeRequest {
            model,
            max_tokens: MAX_TOKENS,
            system,
            temperature: system.map(|_| SYSTEM_TEMPERATURE),
            messages: rest
                .iter()
                .map(|m| ClaudeMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }

    pub async fn chat_raw(&self, model: &str, messages: &[ChatMessage]) -> Result<Value> {
        let request = Self::build_request(model, messages);

        let response = self.client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Claude API error {}: {}", status, text));
        }

        Ok(response.json().await?)
    }

    /// Concatenated text of every text block in the reply
    pub fn reply_text(raw: Value) -> Result<String> {
        let claude_response: ClaudeResponse = serde_json::from_value(raw)?;
        Ok(claude_response.content.into_iter()
            .filter(|c| c.kind == "text")
            .map(|c| c.text)
            .collect())
    }

    pub fn list_models() -> Vec<String> {
        vec![
            "claude-sonnet-4-20250514".to_string(),
            "claude-3-5-sonnet-20241022".to_string(),
            "claude-3-5-haiku-20241022".to_string(),
            "claude-3-opus-20240229".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_message_is_split_out() {
        let messages = vec![
            ChatMessage::system("Be Socratic."),
            ChatMessage::user("0.8 or 0.12?"),
        ];
        let request = serde_json::to_value(ClaudeClient::build_request("claude-3-5-haiku", &messages)).unwrap();
        assert_eq!(request["system"], "Be Socratic.");
        assert_eq!(request["max_tokens"], 1000);
        assert!(request["temperature"].is_number());
        assert_eq!(request["messages"], json!([{"role": "user", "content": "0.8 or 0.12?"}]));
    }

    #[test]
    fn test_plain_user_message_has_no_system() {
        let messages = vec![ChatMessage::user("hello")];
        let request = serde_json::to_value(ClaudeClient::build_request("claude-3-5-haiku", &messages)).unwrap();
        assert!(request.get("system").is_none());
        assert!(request.get("temperature").is_none());
    }

    #[test]
    fn test_reply_text_joins_text_blocks() {
        let raw = json!({
            "content": [
                {"type": "text", "text": "Which is "},
                {"type": "tool_use", "id": "t1"},
                {"type": "text", "text": "larger?"}
            ]
        });
        assert_eq!(ClaudeClient::reply_text(raw).unwrap(), "Which is larger?");
    }
}
