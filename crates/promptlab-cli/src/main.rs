use anyhow::{Result, bail};
use clap::Parser;
use promptlab_core::{
    actions, flow, BackendClient, ClaudeClient, Config, InterfaceFlow, MemoryPage, OpenAIClient,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod page;

use cli::{Cli, Commands, ConfigAction, InterfaceArgs, PageArgs, SendCommand};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()
        .unwrap_or_else(|e| {
            warn!("could not read config, using defaults: {}", e);
            Config::new()
        })
        .with_env();
    if let Some(url) = &cli.backend {
        config.backend_url = Some(url.clone());
    }

    match cli.command {
        Commands::Config { action } => run_config(action, &config),
        Commands::Models => {
            list_models();
            Ok(())
        }
        Commands::Send(command) => run_page_command(command, &cli.page, &config).await,
    }
}

async fn run_page_command(command: SendCommand, args: &PageArgs, config: &Config) -> Result<()> {
    let mut page = page::assemble(args)?;
    let backend = BackendClient::new(config.backend_url());
    let model = config.default_model();

    let sent: Result<()> = match command {
        SendCommand::Custom => flow::run_custom(&mut page, &backend, model)
            .await
            .map(|_| ())
            .map_err(Into::into),
        SendCommand::Socratic => flow::run_socratic(&mut page, &backend, model)
            .await
            .map(|_| ())
            .map_err(Into::into),
        SendCommand::Adding => flow::run_adding(&mut page, &backend, model)
            .await
            .map(|_| ())
            .map_err(Into::into),
        SendCommand::Direct => flow::run_direct(&mut page, config, model).await.map(|_| ()),
        SendCommand::Interface(interface_args) => {
            run_interface(&mut page, &backend, &interface_args).await
        }
    };

    if !page.response_text.is_empty() {
        output::print_response(&page.response_text);
    }
    if sent.is_ok() {
        if let Some(row) = page.history.rows().last() {
            output::print_row(row);
        }
    }

    finish(&page, args)?;
    sent
}

async fn run_interface(
    page: &mut MemoryPage,
    backend: &BackendClient,
    args: &InterfaceArgs,
) -> Result<()> {
    let mut interface = InterfaceFlow::new();
    let submitted = interface.submit(page, backend).await;
    output::print_panel_state(interface.state());

    if let (Some(path), Some(html)) = (&args.panel_html, &page.results) {
        std::fs::write(path, html)?;
        println!("Panel written to {}", path.display());
    }
    submitted?;

    let Some(code) = interface.generated_code() else {
        bail!("the backend did not return any code");
    };

    if let Some(dir) = &args.download {
        let path = actions::download(dir, code)?;
        println!("📥 Saved {}", path.display());
    }
    if args.copy {
        match actions::copy_to_clipboard(code) {
            Ok(()) => println!("✅ Copied!"),
            Err(e) => eprintln!("{}. Please select and copy the code manually.", e),
        }
    }
    if args.open {
        let path = actions::open_in_browser(code)?;
        println!("🔗 Opened {}", path.display());
    }

    Ok(())
}

fn finish(page: &MemoryPage, args: &PageArgs) -> Result<()> {
    if let Some(path) = &args.history_html {
        std::fs::write(path, page.history.to_html())?;
    }
    if args.save {
        match &args.page {
            Some(path) => page::save(page, path)?,
            None => warn!("--save needs --page, nothing written"),
        }
    }
    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show => {
            output::print_config(config);
            println!("Config file: {}", Config::get_config_path()?.display());
        }
        ConfigAction::SetModel { model } => {
            Config::save_default_model(&model)?;
            println!("Default model set to {}", model);
        }
        ConfigAction::SetBackend { url } => {
            let mut saved = Config::load().unwrap_or_else(|_| Config::new());
            saved.backend_url = Some(url.clone());
            saved.save()?;
            println!("Backend set to {}", url);
        }
    }
    Ok(())
}

fn list_models() {
    println!("OpenAI:");
    for model in OpenAIClient::list_models() {
        println!("  {}", model);
    }
    println!("Anthropic:");
    for model in ClaudeClient::list_models() {
        println!("  {}", model);
    }
    println!("Gemini:");
    println!("  gemini-2.0-flash");
    println!("  gemini-1.5-pro");
}
