//! Glycoscope: diabetes dataset explorer and health profile checker.
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glycoscope::adapters::sanitize::SanitizingMakeWriter;
use glycoscope::tui::App;
use glycoscope::Config;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logging to the terminal corrupts the alternate screen, so an
    // interactive session logs to a file unless told otherwise.
    let use_file = config.log_mode.use_file(std::io::stdout().is_terminal());

    let (writer, _guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: the open below reports the real failure.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!(data_path = %config.data_path.display(), "Starting Glycoscope...");

    let mut app = App::new(config);
    app.run()?;

    tracing::info!("Glycoscope shutdown complete.");
    Ok(())
}
