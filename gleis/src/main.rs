use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gleis::buffer::ConnectionBuffer;
use gleis::config::{ConfigResolver, Settings, log_file_from_env};
use gleis::locator::Locator;
use gleis::scheduler::RefreshScheduler;
use gleis::transport::TransportClient;
use gleis::ui;

const DEFAULT_LOG_FILTER: &str = "gleis=info";

#[tokio::main]
async fn main() -> ExitCode {
    init_logging(&log_file_from_env());
    let settings = Settings::from_env();

    let transport = match TransportClient::new(settings.transport.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create transit client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let locator = match Locator::from_settings(&settings, || ConfigResolver::standard().resolve()) {
        Ok(locator) => locator,
        Err(e) => {
            error!("failed to create location provider: {e}");
            return ExitCode::FAILURE;
        }
    };

    let buffer = Arc::new(ConnectionBuffer::new(transport, locator));

    // Fill the board before the first frame; failures just leave it empty.
    buffer.refresh().await;

    let scheduler = RefreshScheduler::start(buffer.clone(), settings.refresh_interval);
    info!(
        refresh_secs = settings.refresh_interval.as_secs(),
        display_limit = settings.display_limit,
        "dashboard started"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    let result = ui::run(
        &buffer,
        settings.display_limit,
        settings.render_interval,
        shutdown,
    )
    .await;

    scheduler.stop().await;

    match result {
        Ok(()) => {
            info!("dashboard stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Send logs to the configured file, since the dashboard owns the terminal.
fn init_logging(log_file: &Path) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file {}: {e}. Logging is disabled.",
                log_file.display()
            );
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
}
