use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "promptlab")]
#[command(version, about = "Test tutoring prompts against language models")]
pub struct Cli {
    /// Backend base URL (overrides config and PROMPTLAB_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the form values come from
#[derive(Args, Debug, Default)]
pub struct PageArgs {
    /// JSON page file holding fields, repeated groups and history
    #[arg(long, global = true)]
    pub page: Option<PathBuf>,

    /// Set a field, e.g. --field model-select=gpt-4o (repeatable)
    #[arg(short, long = "field", value_parser = parse_field, global = true)]
    pub fields: Vec<(String, String)>,

    /// Append a value to a repeated group, e.g. --push userPrompt=0.12 (repeatable)
    #[arg(long = "push", value_parser = parse_field, global = true)]
    pub pushes: Vec<(String, String)>,

    /// Write the updated page back to --page after sending
    #[arg(long, global = true)]
    pub save: bool,

    /// Write the session history table as HTML
    #[arg(long, global = true)]
    pub history_html: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Send(SendCommand),
    /// Show or change saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List known models per provider
    Models,
}

/// Commands that read the page and send it somewhere
#[derive(Subcommand, Debug)]
pub enum SendCommand {
    /// Send the prompt-input field as a single message
    Custom,
    /// Send the socratic dialogue page
    Socratic,
    /// Send the decimal addition reflection page
    Adding,
    /// Call the model provider directly, skipping the backend
    Direct,
    /// Generate an educational interface from a description
    Interface(InterfaceArgs),
}

#[derive(Args, Debug, Default)]
pub struct InterfaceArgs {
    /// Save the generated HTML into this directory
    #[arg(long)]
    pub download: Option<PathBuf>,

    /// Copy the generated code to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Open the generated interface in the default browser
    #[arg(long)]
    pub open: bool,

    /// Write the results panel markup to this file
    #[arg(long)]
    pub panel_html: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration (keys masked)
    Show,
    /// Save the default model
    SetModel { model: String },
    /// Save the backend URL
    SetBackend { url: String },
}

/// Parse `id=value`. Only the first `=` splits, so values may contain `=`.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => {
            Ok((id.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected id=value, got '{}'", raw)),
    }
}
