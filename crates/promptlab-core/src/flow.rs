//! Send handlers, one per page.
//!
//! Each handler reads a fresh parameter snapshot from the page, builds the
//! request, waits on the single network round trip and renders the outcome
//! back into the page. Failures are shown inline as `Error: ...` and also
//! returned so the caller can decide on an exit status.

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::ai::ProviderClient;
use crate::config::Config;
use crate::dispatch::{BackendClient, InterfaceRequest, RequestPayload, ResponseRecord};
use crate::error::{DispatchError, FlowError};
use crate::fields::{
    AddingParams, CustomParams, InterfaceParams, Page, SocraticParams, DESCRIPTION, MODEL_SELECT,
    RESPONSES,
};
use crate::prompt::{adding, socratic};
use crate::provider::Provider;
use crate::render::{HistoryRow, InterfacePanel, PanelState};
use crate::state::ChatMessage;

pub const GENERIC_INTERFACE_FAILURE: &str = "Failed to generate interface. Please try again.";
pub const DIRECT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

fn show_error<P: Page, E: std::fmt::Display>(page: &mut P, err: &E) {
    error!("request failed: {}", err);
    page.set_response_text(&format!("Error: {}", err));
}

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

/// Dispatch a payload and append a history row when it succeeds.
async fn send_and_record<P: Page>(
    page: &mut P,
    backend: &BackendClient,
    payload: &RequestPayload,
) -> Result<(ResponseRecord, Value), DispatchError> {
    match backend.test_prompt(payload).await {
        Ok(body) => {
            let record = ResponseRecord::from_json(&body);
            info!(model = %record.model, time_elapsed = ?record.time_elapsed, "prompt answered");
            page.append_history_row(HistoryRow::from_record(&record));
            Ok((record, body))
        }
        Err(e) => {
            show_error(page, &e);
            Err(e)
        }
    }
}

/// Free-form prompt page: `{model, message}`, reply echoed as JSON.
pub async fn run_custom<P: Page>(
    page: &mut P,
    backend: &BackendClient,
    default_model: &str,
) -> Result<ResponseRecord, DispatchError> {
    let params = CustomParams::collect(&*page, default_model);
    let payload = RequestPayload::Message {
        model: params.model,
        message: params.prompt,
    };

    let (record, body) = send_and_record(page, backend, &payload).await?;
    page.set_response_text(&pretty(&body));
    Ok(record)
}

/// Socratic dialogue page. The reply also lands in the first empty response slot,
/// which makes it part of the dialogue for the next send.
pub async fn run_socratic<P: Page>(
    page: &mut P,
    backend: &BackendClient,
    default_model: &str,
) -> Result<ResponseRecord, DispatchError> {
    let params = SocraticParams::collect(&*page, default_model);
    let payload = RequestPayload::Messages {
        messages: socratic::construct_prompt(&params),
        model: params.model,
    };

    let (record, _) = send_and_record(page, backend, &payload).await?;
    if !page.fill_first_empty(RESPONSES, &record.response) {
        debug!("no empty response slot to fill");
    }
    Ok(record)
}

/// Decimal addition reflection page.
pub async fn run_adding<P: Page>(
    page: &mut P,
    backend: &BackendClient,
    default_model: &str,
) -> Result<ResponseRecord, DispatchError> {
    let params = AddingParams::collect(&*page, default_model);
    let payload = RequestPayload::Messages {
        messages: adding::construct_prompt(&params),
        model: params.model,
    };

    let (record, _) = send_and_record(page, backend, &payload).await?;
    Ok(record)
}

/// Prompt page that talks to the provider directly instead of the backend.
/// Successful calls are timed and recorded like backend replies.
pub async fn run_direct<P: Page>(
    page: &mut P,
    config: &Config,
    default_model: &str,
) -> Result<ResponseRecord> {
    let params = CustomParams::collect(&*page, default_model);
    match ProviderClient::for_model(config, &params.model) {
        Ok(client) => run_direct_with(page, &client, &params).await,
        Err(e) => {
            show_error(page, &e);
            Err(e)
        }
    }
}

pub async fn run_direct_with<P: Page>(
    page: &mut P,
    client: &ProviderClient,
    params: &CustomParams,
) -> Result<ResponseRecord> {
    let messages = match Provider::for_model(&params.model) {
        Some(Provider::Claude) => vec![ChatMessage::user(params.prompt.as_str())],
        _ => vec![
            ChatMessage::system(DIRECT_SYSTEM_PROMPT),
            ChatMessage::user(params.prompt.as_str()),
        ],
    };

    match client.complete(&params.model, &messages).await {
        Ok((record, raw)) => {
            page.set_response_text(&pretty(&raw));
            page.append_history_row(HistoryRow::from_record(&record));
            Ok(record)
        }
        Err(e) => {
            show_error(page, &e);
            Err(e)
        }
    }
}

/// Interface generation form and its single results panel.
#[derive(Debug, Default)]
pub struct InterfaceFlow {
    state: PanelState,
}

impl InterfaceFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Code from the last successful generation
    pub fn generated_code(&self) -> Option<&str> {
        match &self.state {
            PanelState::Success(data) => Some(data.response.as_str()),
            _ => None,
        }
    }

    pub async fn submit<P: Page>(
        &mut self,
        page: &mut P,
        backend: &BackendClient,
    ) -> Result<(), FlowError> {
        let params = InterfaceParams::collect(&*page);
        if !params.is_complete() {
            page.set_response_text(&FlowError::MissingFields.to_string());
            return Err(FlowError::MissingFields);
        }

        page.hide_results();
        self.state = PanelState::Submitting;
        info!(model = %params.model, "generating interface");

        let request = InterfaceRequest {
            description: params.description,
            model: params.model,
            use_rag: params.use_rag,
        };

        let outcome = backend.generate_interface(&request).await;
        let result = match outcome {
            Ok(data) => {
                self.state = match data.error.clone() {
                    Some(message) => PanelState::Error(message),
                    None => PanelState::Success(data),
                };
                Ok(())
            }
            Err(e) => {
                error!("error generating interface: {}", e);
                let message = match &e {
                    DispatchError::Network {
                        message: Some(message),
                        ..
                    } => message.clone(),
                    _ => GENERIC_INTERFACE_FAILURE.to_string(),
                };
                self.state = PanelState::Error(message);
                Err(e.into())
            }
        };

        if let Some(html) = InterfacePanel::render(&self.state) {
            page.show_results(html);
        }
        result
    }

    /// Clear the form and hide the panel, ready for a new description.
    pub fn generate_another<P: Page>(&mut self, page: &mut P) {
        page.set_field(DESCRIPTION, "");
        page.set_field(MODEL_SELECT, "");
        self.close(page);
    }

    pub fn close<P: Page>(&mut self, page: &mut P) {
        page.hide_results();
        self.state = PanelState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldReader, MemoryPage, USE_RAG};

    #[tokio::test]
    async fn test_incomplete_form_is_rejected_before_sending() {
        // Nothing listens here; reaching the network would fail the test.
        let backend = BackendClient::new("http://127.0.0.1:9");
        let mut page = MemoryPage::new().with_field(MODEL_SELECT, "gpt-4o");
        page.show_results("<p>old</p>".to_string());

        let mut flow = InterfaceFlow::new();
        let err = flow.submit(&mut page, &backend).await.unwrap_err();

        assert!(matches!(err, FlowError::MissingFields));
        assert_eq!(page.response_text, "Please fill in all required fields");
        assert_eq!(flow.state(), &PanelState::Idle);
        assert!(page.results_visible);
    }

    #[test]
    fn test_generate_another_resets_form() {
        let mut page = MemoryPage::new()
            .with_field(DESCRIPTION, "Number line game")
            .with_field(MODEL_SELECT, "gpt-4o")
            .with_field(USE_RAG, "on");
        page.show_results("<p>panel</p>".to_string());

        let mut flow = InterfaceFlow::new();
        flow.generate_another(&mut page);

        assert_eq!(page.read(DESCRIPTION), "");
        assert_eq!(page.read(MODEL_SELECT), "");
        assert!(!page.results_visible);
        assert_eq!(flow.state(), &PanelState::Idle);
        assert_eq!(flow.generated_code(), None);
    }

    #[tokio::test]
    async fn test_direct_without_key_shows_error() {
        let mut page = MemoryPage::new()
            .with_field(MODEL_SELECT, "gpt-4o-mini")
            .with_field(crate::fields::PROMPT_INPUT, "hi");
        let result = run_direct(&mut page, &Config::new(), "gpt-4o-mini").await;

        assert!(result.is_err());
        assert!(page.response_text.starts_with("Error: Key not found"));
        assert!(page.history.is_empty());
    }
}
