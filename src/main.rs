//! Malascreen: Symptom-based malaria risk screening
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use malascreen::tui::App;

/// Set up the tracing subscriber.
///
/// Log output must never reach the terminal while the TUI owns the
/// alternate screen, so an interactive session logs to a file. With
/// `MALASCREEN_LOG_MODE=stdout` (or a non-TTY stdout, e.g. piped runs)
/// logs go to stdout instead. The returned guard flushes the
/// non-blocking writer on drop.
fn init_logging() -> Result<WorkerGuard> {
    let mode = std::env::var("MALASCREEN_LOG_MODE").unwrap_or_else(|_| "auto".to_string());
    let to_file = match mode.as_str() {
        "file" => true,
        "stdout" => false,
        _ => std::io::stdout().is_terminal(),
    };

    let (writer, guard) = if to_file {
        let log_file = std::env::var("MALASCREEN_LOG_FILE")
            .unwrap_or_else(|_| "malascreen.log".to_string());
        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Missing log directory should not block startup.
            let _ = std::fs::create_dir_all(parent);
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let _guard = init_logging()?;

    tracing::info!("Starting Malascreen...");

    let mut app = App::new()?;
    app.run()?;

    tracing::info!("Malascreen shutdown complete.");
    Ok(())
}
