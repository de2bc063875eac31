use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::{broadcast, mpsc};
use tracing_subscriber::EnvFilter;

use bizcore_tui::api::ApiClient;
use bizcore_tui::app::actions::Request;
use bizcore_tui::app::state::{self, AppMessage, AppState};
use bizcore_tui::config::Settings;
use bizcore_tui::session::SessionContext;
use bizcore_tui::ui::app::TuiApp;

#[derive(Parser, Debug)]
#[command(name = "bizcore-tui")]
#[command(about = "Terminal admin console for BizCore users, roles and permissions")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Backend base URL, including the /api prefix
    #[arg(long)]
    api_url: Option<String>,

    /// Rows per table page
    #[arg(long)]
    page_size: Option<usize>,

    /// UI language code (en, uz, ru, ...)
    #[arg(short, long)]
    language: Option<String>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.api_url {
            settings.api_base_url = url.clone();
        }
        if let Some(size) = self.page_size {
            settings.page_size = size;
        }
        if let Some(language) = &self.language {
            settings.language = language.clone();
        }
    }
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(settings: &Settings) -> Result<()> {
    let path = Path::new(&settings.log_file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load settings
    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);

    init_logging(&settings)?;
    tracing::info!(api = %settings.api_base_url, language = %settings.language, "starting");

    // Panics go to the log, not the terminal
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {}", info);
    }));

    let api = ApiClient::new(&settings.api_base_url, settings.request_timeout(), SessionContext::new())?;

    // Create channels for communication
    let (state_tx, state_rx) = mpsc::channel(256);
    let (ui_update_tx, _) = broadcast::channel(100);

    // Create shared application state
    let state = Arc::new(AppState::new(settings, args.config.clone(), api, ui_update_tx));

    // Start state manager
    let manager_state = state.clone();
    let manager_tx = state_tx.clone();
    let state_manager_handle = tokio::spawn(async move {
        state::run_state_manager(manager_state, state_rx, manager_tx).await;
    });

    // Labels for the login screen; the session is not needed for these
    let language = state.translator.read().await.language().to_string();
    for request in [Request::LoadCatalog(language), Request::LoadLanguages] {
        state_tx.send(AppMessage::Request(request)).await?;
    }

    // Run TUI (blocks until user quits)
    let result = match TuiApp::new(state, state_tx).await {
        Ok(mut tui) => tui.run().await,
        Err(e) => Err(e),
    };

    state_manager_handle.abort();
    tracing::info!("exiting");

    result
}
