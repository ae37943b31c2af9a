//! Board server entry point
//!
//! Polls the configured spreadsheet feed and serves the live leaderboard.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tokio::signal;

use board::{Board, BoardError, BoardResult};
use shared::logging;
use shared::messages::config::{DEFAULT_DOCUMENT_ID, DEFAULT_FEED_URL};
use shared::{BoardConfig, ComponentId, FeedConfig, SheetConfig, SyncConfig, component_info};
use syncer::{RealFeedClient, SyncController};

const FEED_URL_ENV: &str = "LEADERBOARD_FEED_URL";
const DOCUMENT_ID_ENV: &str = "LEADERBOARD_DOCUMENT_ID";

#[derive(Parser, Debug)]
#[command(name = "board")]
#[command(about = "Live leaderboard fed from a spreadsheet")]
struct Args {
    /// Port for HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Feed endpoint (falls back to LEADERBOARD_FEED_URL)
    #[arg(long)]
    feed_url: Option<String>,

    /// Spreadsheet document id (falls back to LEADERBOARD_DOCUMENT_ID)
    #[arg(long)]
    document_id: Option<String>,

    /// Selectable sheet as NAME[:asc|:desc]; repeat for more, the first is shown at startup
    #[arg(long = "sheet")]
    sheets: Vec<String>,

    /// Polling interval in milliseconds
    #[arg(long, default_value = "30000")]
    interval_ms: u64,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value = "10000")]
    request_timeout_ms: u64,

    /// Column holding participant names
    #[arg(long, default_value = "Nom")]
    name_field: String,

    /// Column holding scores
    #[arg(long, default_value = "Score")]
    score_field: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> BoardResult<BoardConfig> {
        let sheets = if self.sheets.is_empty() {
            BoardConfig::default().sheets
        } else {
            self.sheets
                .iter()
                .map(|spec| SheetConfig::parse(spec))
                .collect::<Result<Vec<_>, _>>()?
        };

        let feed = FeedConfig {
            base_url: self
                .feed_url
                .or_else(|| std::env::var(FEED_URL_ENV).ok())
                .unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            document_id: self
                .document_id
                .or_else(|| std::env::var(DOCUMENT_ID_ENV).ok())
                .unwrap_or_else(|| DEFAULT_DOCUMENT_ID.to_string()),
            name_field: self.name_field,
            score_field: self.score_field,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        };

        let sync = SyncConfig {
            interval: Duration::from_millis(self.interval_ms),
            ..SyncConfig::default()
        };

        let config = BoardConfig {
            bind_port: self.port,
            sheets,
            feed,
            sync,
        };
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> BoardResult<()> {
    // Environment defaults must be in place before arguments fall back to them
    let _ = dotenv::dotenv();
    let args = Args::parse();

    logging::init_tracing_with_level(ComponentId::Board, Some(&args.log_level));

    let config = args.into_config()?;
    logging::log_startup(
        ComponentId::Board,
        &format!("board on port {} with {} sheet(s)", config.bind_port, config.sheets.len()),
    );

    let addr: SocketAddr = format!("127.0.0.1:{}", config.bind_port)
        .parse()
        .map_err(|e| BoardError::config(format!("Invalid port: {}", e)))?;

    let feed = RealFeedClient::new(config.feed.clone())?;
    let (handle, updates) = SyncController::new(feed, config.sync.clone()).spawn();

    let board = Board::new(&config, handle)?;
    let pump = board.spawn_update_pump(updates);
    board.start().await?;

    component_info!(ComponentId::Board, feed = %config.feed.base_url, "🔗 Feed configured");

    board.run(addr, shutdown_signal()).await?;
    pump.abort();

    logging::log_shutdown(ComponentId::Board, "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ComponentId::Board, "Received Ctrl+C signal"),
        Err(err) => {
            logging::log_error(ComponentId::Board, "Signal handling", &err);
            std::future::pending::<()>().await;
        }
    }
}
