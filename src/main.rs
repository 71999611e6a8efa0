use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use letter_sheet::app;
use letter_sheet::config::{ImportPolicy, SheetConfig};
use letter_sheet::sheet::SheetManager;
use letter_sheet::store::{FileStore, default_data_dir};
use letter_sheet::ui;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved sheet and the log file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory that :export writes to
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Print the saved sheet as JSON to stdout (for piping)
    #[arg(long, short = 'j')]
    json_export: bool,

    /// Replace the saved sheet with a JSON file and exit
    #[arg(long, short = 'i')]
    import: Option<PathBuf>,

    /// Reduce imported cells to single uppercase letters
    #[arg(long)]
    sanitize_import: bool,

    /// Refuse to save sheets larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    quota: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() && !cli.json_export && cli.import.is_none() {
        eprintln!("letter-sheet error: Pipe detected but -j or -i flag not provided.");
        std::process::exit(1);
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let _guard = init_logging(&data_dir)?;

    let policy = if cli.sanitize_import {
        ImportPolicy::Sanitize
    } else {
        ImportPolicy::Preserve
    };
    let config = SheetConfig::default().with_import_policy(policy);
    let mut store = FileStore::new(&data_dir);
    if let Some(bytes) = cli.quota {
        store = store.with_quota(bytes);
    }
    let mut manager = SheetManager::new(config, Box::new(store));

    if let Some(path) = &cli.import {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file: {}", path.display()))?;
        manager.load();
        manager
            .import_snapshot(&raw)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        eprintln!("Imported {}", path.display());
        return Ok(());
    }

    if cli.json_export {
        manager.load();
        let export = manager.export_snapshot()?;
        println!("{}", export.contents);
        return Ok(());
    }

    // Otherwise, run the interactive UI
    tracing::info!(data_dir = %data_dir.display(), "Starting letter-sheet");
    let app_state = app::AppState::new(manager, cli.export_dir);
    ui::run_app(app_state)?;

    Ok(())
}

/// Log to `letter-sheet.log` in the data directory; the terminal belongs to the UI
fn init_logging(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, "letter-sheet.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    Ok(guard)
}
