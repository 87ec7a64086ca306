//! slircbot - line-oriented host for the slirc-bot dispatcher.
//!
//! Reads raw protocol lines on stdin and writes reply lines on stdout.

use slirc_bot::config::{self, Config};
use slirc_bot::services::Toolbox;
use slirc_bot::telemetry::spans;
use slirc_bot::{Dispatcher, Line};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{Instrument, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "slircbot.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Configuration error");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    slirc_bot::metrics::init();

    let (tx, mut rx) = mpsc::unbounded_channel::<Line>();
    let mut dispatcher = Dispatcher::from_config(&config)?.with_sink(tx);
    dispatcher.add_commands(Arc::new(Toolbox::new()))?;

    info!(
        prefix = %config.bot.prefix,
        nickname = ?config.bot.nickname,
        commands = dispatcher.registry().len(),
        "Starting slircbot"
    );

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = rx.recv().await {
            if let Err(e) = stdout.write_all(line.to_string().as_bytes()).await {
                error!(error = %e, "Failed to write reply");
                break;
            }
            if let Err(e) = stdout.flush().await {
                error!(error = %e, "Failed to flush stdout");
                break;
            }
        }
    });

    let nickname = config.bot.nickname.as_deref();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(raw) = lines.next_line().await? {
        if raw.trim().is_empty() {
            continue;
        }
        let line: Line = match raw.parse() {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, raw = %raw, "Failed to parse line");
                continue;
            }
        };
        let span = spans::line(&line.command, line.nick());
        match dispatcher.on_line(&line, nickname).instrument(span).await {
            Ok(outcome) => debug!(?outcome, "Dispatched line"),
            Err(e) => error!(error = %e, code = e.error_code(), "Command failed"),
        }
    }

    for (command, count) in dispatcher.registry().usage_stats() {
        info!(command = %command, count, "Command usage");
    }

    // Dropping the dispatcher closes the reply channel so the writer drains and exits.
    drop(dispatcher);
    writer.await?;
    info!("Input closed, shutting down");
    Ok(())
}
