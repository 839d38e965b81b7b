pub mod actions;
pub mod ai;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod flow;
pub mod prompt;
pub mod provider;
pub mod render;
pub mod state;

// Re-export main types for convenience
pub use ai::{ClaudeClient, OpenAIClient, ProviderClient};
pub use config::Config;
pub use dispatch::{BackendClient, InterfaceRequest, InterfaceResponse, RequestPayload, ResponseRecord};
pub use error::{ActionError, ClipboardError, DispatchError, FlowError};
pub use fields::{FieldReader, MemoryPage, Page};
pub use flow::InterfaceFlow;
pub use provider::Provider;
pub use render::{HistoryRow, HistoryTable, InterfacePanel, PanelState};
pub use state::{ChatMessage, ChatRole};
