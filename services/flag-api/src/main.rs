//! Flag API Server
//!
//! Serves the flag generator page and renders flags on demand.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use flag_api::config::{default_cache_dir, ThrottleConfig};
use flag_api::{build_router, metrics, AppState};
use flag_assets::AssetConfig;

/// Flag API Server
#[derive(Parser, Debug)]
#[command(name = "flag-api")]
#[command(about = "Renders Independence Day flags with a name in the footer")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "FLAG_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "FLAG_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Directory for cached renders
    #[arg(long, env = "FLAG_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Requests allowed per client per window
    #[arg(long, default_value_t = 5, env = "FLAG_RATE_LIMIT")]
    rate_limit: usize,

    /// Rate limit window in seconds
    #[arg(long, default_value_t = 10, env = "FLAG_RATE_WINDOW_SECS")]
    rate_window_secs: u64,

    /// Lifetime of a cached render in seconds
    #[arg(long, default_value_t = 86_400, env = "FLAG_CACHE_TTL_SECS")]
    cache_ttl_secs: u64,

    /// TrueType font to use instead of the downloaded one
    #[arg(long, env = "FLAG_FONT_PATH")]
    font_path: Option<PathBuf>,

    /// Never touch the network (no font download, no badge icon)
    #[arg(long, env = "FLAG_OFFLINE")]
    offline: bool,
}

impl Args {
    fn throttle_config(&self) -> ThrottleConfig {
        ThrottleConfig {
            rate_limit: self.rate_limit,
            rate_window: Duration::from_secs(self.rate_window_secs),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            cache_dir: self.cache_dir.clone().unwrap_or_else(default_cache_dir),
        }
    }

    fn asset_config(&self) -> AssetConfig {
        AssetConfig {
            font_path: self.font_path.clone(),
            offline: self.offline,
            ..AssetConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus = metrics::install_recorder()?;
    info!("Prometheus metrics exporter initialized");

    let throttle_config = args.throttle_config();
    info!(
        cache_dir = %throttle_config.cache_dir.display(),
        rate_limit = throttle_config.rate_limit,
        rate_window_secs = args.rate_window_secs,
        offline = args.offline,
        "Starting flag API server"
    );

    let state = match AppState::new(&throttle_config, args.asset_config(), Some(prometheus)) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to initialize application state: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = build_router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Flag API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server failed")?;

    Ok(())
}
