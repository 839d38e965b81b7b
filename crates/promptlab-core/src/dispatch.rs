//! Requests to the prompt lab backend.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::DispatchError;
use crate::state::ChatMessage;

pub const TEST_PROMPT_PATH: &str = "/api/testPrompt";
pub const GENERATE_INTERFACE_PATH: &str = "/interface/generate";

/// Body for the prompt test endpoint. The backend tells the two shapes apart
/// by which key is present, so a flow picks exactly one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestPayload {
    Messages {
        model: String,
        messages: Vec<ChatMessage>,
    },
    Message {
        model: String,
        message: String,
    },
}

impl RequestPayload {
    pub fn model(&self) -> &str {
        match self {
            RequestPayload::Messages { model, .. } | RequestPayload::Message { model, .. } => model,
        }
    }
}

/// The fields of a prompt test reply that get rendered.
///
/// Nothing is validated: a missing or mistyped field just comes out empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub model: String,
    /// Either the message array that was sent or a plain string
    pub prompt: Value,
    pub response: String,
    pub time_elapsed: Option<f64>,
}

impl ResponseRecord {
    pub fn from_json(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            model: text("model"),
            prompt: value.get("prompt").cloned().unwrap_or(Value::Null),
            response: text("response"),
            time_elapsed: value.get("time_elapsed").and_then(Value::as_f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceRequest {
    pub description: String,
    pub model: String,
    #[serde(rename = "useRag")]
    pub use_rag: bool,
}

/// Reply of the interface endpoint. Decoded field by field like
/// [`ResponseRecord`], so one bad field never hides `error` or `response`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterfaceResponse {
    pub response: String,
    pub model: String,
    pub time_elapsed: Option<f64>,
    pub description: String,
    pub error: Option<String>,
}

impl InterfaceResponse {
    pub fn from_json(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(String::from);

        Self {
            response: text("response").unwrap_or_default(),
            model: text("model").unwrap_or_default(),
            time_elapsed: value.get("time_elapsed").and_then(Value::as_f64),
            description: text("description").unwrap_or_default(),
            error: text("error"),
        }
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST `body` as JSON and return the parsed reply.
    ///
    /// Non-2xx statuses become [`DispatchError::Network`], keeping the body's
    /// `error` field when there is one.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, DispatchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending request");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(String::from));
            return Err(DispatchError::Network {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn test_prompt(&self, payload: &RequestPayload) -> Result<Value, DispatchError> {
        debug!(model = payload.model(), "testing prompt");
        self.post_json(TEST_PROMPT_PATH, payload).await
    }

    pub async fn generate_interface(
        &self,
        request: &InterfaceRequest,
    ) -> Result<InterfaceResponse, DispatchError> {
        debug!(model = %request.model, use_rag = request.use_rag, "generating interface");
        let body = self.post_json(GENERATE_INTERFACE_PATH, request).await?;
        Ok(InterfaceResponse::from_json(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shapes_are_distinct() {
        let messages = RequestPayload::Messages {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::system("sys")],
        };
        assert_eq!(
            serde_json::to_value(&messages).unwrap(),
            json!({"model": "gpt-4o-mini", "messages": [{"role": "system", "content": "sys"}]})
        );

        let message = RequestPayload::Message {
            model: "gpt-4o-mini".into(),
            message: "hi".into(),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"model": "gpt-4o-mini", "message": "hi"})
        );
    }

    #[test]
    fn test_interface_request_uses_camel_case_flag() {
        let request = InterfaceRequest {
            description: "d".into(),
            model: "m".into(),
            use_rag: true,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"description": "d", "model": "m", "useRag": true})
        );
    }

    #[test]
    fn test_record_tolerates_missing_and_mistyped_fields() {
        let record = ResponseRecord::from_json(&json!({"model": 7, "response": "ok"}));
        assert_eq!(record.model, "");
        assert_eq!(record.response, "ok");
        assert_eq!(record.prompt, Value::Null);
        assert_eq!(record.time_elapsed, None);

        let record = ResponseRecord::from_json(&json!(["not", "an", "object"]));
        assert_eq!(record, ResponseRecord::default());
    }

    #[test]
    fn test_interface_response_defaults() {
        let response = InterfaceResponse::from_json(&json!({"response": "<p>x</p>"}));
        assert_eq!(response.response, "<p>x</p>");
        assert_eq!(response.error, None);
        assert_eq!(response.time_elapsed, None);
    }

    #[test]
    fn test_interface_response_keeps_good_fields_next_to_bad_ones() {
        let response = InterfaceResponse::from_json(&json!({
            "error": "model refused",
            "time_elapsed": "n/a"
        }));
        assert_eq!(response.error.as_deref(), Some("model refused"));
        assert_eq!(response.time_elapsed, None);

        let response = InterfaceResponse::from_json(&json!({
            "response": "<p>hi</p>",
            "model": "gpt-4o",
            "time_elapsed": 1.5,
            "description": null
        }));
        assert_eq!(response.response, "<p>hi</p>");
        assert_eq!(response.model, "gpt-4o");
        assert_eq!(response.time_elapsed, Some(1.5));
        assert_eq!(response.description, "");
        assert_eq!(response.error, None);
    }
}
