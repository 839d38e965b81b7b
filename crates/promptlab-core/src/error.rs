use std::path::PathBuf;

/// Failure of a request to the backend.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The backend answered outside the 2xx range.
    #[error("HTTP error! status: {status}")]
    Network {
        status: u16,
        /// `error` field of the body, when the backend sent one
        message: Option<String>,
    },
    /// The request never got an answer (offline, DNS, refused connection).
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    /// The body was not JSON at all.
    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            DispatchError::Network { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(error: reqwest::Error) -> Self {
        DispatchError::Transport(error)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to copy to clipboard: {0}")]
pub struct ClipboardError(#[from] arboard::Error);

/// Failure of one of the generated-interface panel actions.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error("could not open a browser: {0}")]
    Open(#[source] std::io::Error),
}

/// Why the interface generation form did not produce a panel.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
