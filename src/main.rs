//! linkdeck - main entry point

use anyhow::Context;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use linkdeck::app::App;
use linkdeck::cli::{Cli, Commands};
use linkdeck::pointer::Modality;
use linkdeck::store::BookmarkStore;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::stdout;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Initialize the tracing subscriber. RUST_LOG overrides the default level.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point
fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("linkdeck starting up");

    let cli = Cli::parse_args();
    let store_path = cli.store.clone().unwrap_or_else(default_store_path);

    match cli.command {
        Some(Commands::Validate { store }) => match BookmarkStore::load(&store) {
            Ok(loaded) => match loaded.validate() {
                Ok(()) => {
                    info!("store validation successful");
                    println!(
                        "store file is valid: {} ({} bookmarks)",
                        store.display(),
                        loaded.len()
                    );
                }
                Err(e) => {
                    error!(error = %e, "store validation failed");
                    eprintln!("store validation failed: {e}");
                    std::process::exit(1);
                }
            },
            Err(e) => {
                error!(error = %e, "failed to load store file");
                eprintln!("failed to load store file: {e}");
                std::process::exit(1);
            }
        },
        Some(Commands::Run { input }) => run_dashboard(&store_path, input)?,
        None => run_dashboard(&store_path, Modality::default())?,
    }

    Ok(())
}

/// Platform data directory, falling back to the working directory.
fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "linkdeck")
        .map(|dirs| dirs.data_dir().join("bookmarks.json"))
        .unwrap_or_else(|| PathBuf::from("bookmarks.json"))
}

/// Run the TUI dashboard.
fn run_dashboard(store_path: &Path, input: Modality) -> anyhow::Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    crossterm::execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut app = App::new(store_path.to_path_buf(), input)?;
    let result = app.run(&mut terminal);

    // always attempt cleanup, even if the app failed
    let _ = crossterm::execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
    let _ = disable_raw_mode();

    result.map_err(Into::into)
}
