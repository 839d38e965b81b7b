//! Direct calls to model providers, bypassing the backend.

pub mod claude;
pub mod openai;

pub use claude::ClaudeClient;
pub use openai::OpenAIClient;

use std::time::Instant;

use anyhow::{Result, anyhow};
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::dispatch::ResponseRecord;
use crate::provider::Provider;
use crate::state::ChatMessage;

/// A provider client ready to take a conversation
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(OpenAIClient),
    Claude(ClaudeClient),
}

impl ProviderClient {
    /// Client for the provider serving `model`, keyed from `config`.
    pub fn for_model(config: &Config, model: &str) -> Result<Self> {
        let provider =
            Provider::for_model(model).ok_or_else(|| anyhow!("Model not found {}", model))?;
        let key = config
            .api_key(provider)
            .ok_or_else(|| anyhow!("Key not found in env: set {}", provider.key_env_var()))?;

        Ok(match provider {
            Provider::OpenAI => ProviderClient::OpenAI(OpenAIClient::new(key)),
            Provider::Gemini => ProviderClient::OpenAI(OpenAIClient::gemini(key)),
            Provider::Claude => ProviderClient::Claude(ClaudeClient::new(key)),
        })
    }

    pub async fn chat_raw(&self, model: &str, messages: &[ChatMessage]) -> Result<Value> {
        match self {
            ProviderClient::OpenAI(client) => client.chat_raw(model, messages).await,
            ProviderClient::Claude(client) => client.chat_raw(model, messages).await,
        }
    }

    pub fn reply_text(&self, raw: Value) -> Result<String> {
        match self {
            ProviderClient::OpenAI(_) => OpenAIClient::reply_text(raw),
            ProviderClient::Claude(_) => ClaudeClient::reply_text(raw),
        }
    }

    /// Run a conversation and time it, producing the same record the backend
    /// returns alongside the provider's untouched reply.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<(ResponseRecord, Value)> {
        let start = Instant::now();
        let raw = self.chat_raw(model, messages).await?;
        let time_elapsed = start.elapsed().as_secs_f64();
        info!(model, time_elapsed, "provider replied");

        let record = ResponseRecord {
            model: model.to_string(),
            prompt: serde_json::to_value(messages)?,
            response: self.reply_text(raw.clone())?,
            time_elapsed: Some(time_elapsed),
        };
        Ok((record, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_is_rejected() {
        let err = ProviderClient::for_model(&Config::new(), "llama3.2")
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Model not found llama3.2");
    }

    #[test]
    fn test_missing_key_is_reported() {
        let err = ProviderClient::for_model(&Config::new(), "claude-3-5-haiku-20241022")
            .err()
            .unwrap();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_gemini_routes_through_openai_format() {
        let mut config = Config::new();
        config.gemini_api_key = Some("g-key".to_string());
        let client = ProviderClient::for_model(&config, "gemini-2.0-flash").unwrap();
        assert!(matches!(client, ProviderClient::OpenAI(_)));
    }
}
