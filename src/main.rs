//! CardioPulse: Heart disease risk assessment
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiopulse::adapters::sanitize::SanitizingMakeWriter;
use cardiopulse::config::Settings;
use cardiopulse::tui::App;

fn main() -> Result<()> {
    // Writing logs to the terminal corrupts the alternate screen, so an
    // interactive session logs to a file and a piped one to stdout.
    let log_mode = std::env::var("CARDIOPULSE_LOG_MODE").unwrap_or_else(|_| "auto".to_string());

    let interactive = std::io::stdout().is_terminal();
    let use_file = match log_mode.as_str() {
        "file" => true,
        "stdout" => false,
        // auto
        _ => interactive,
    };

    let (writer, _guard) = if use_file {
        let log_file = std::env::var("CARDIOPULSE_LOG_FILE")
            .unwrap_or_else(|_| "cardiopulse.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort: the open below reports the real failure.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .with_context(|| format!("Cannot open log file {log_file}"))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    let settings = Settings::from_env()?;
    tracing::info!("Starting CardioPulse...");

    let mut app = App::new(&settings);
    app.run()?;

    tracing::info!("CardioPulse shutdown complete.");
    Ok(())
}
