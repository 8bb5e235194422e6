//! Flag CLI
//!
//! Renders the Independence Day flag with a name in the footer, saves it to
//! the downloads folder and opens it with the platform viewer.

mod opener;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flag_assets::{AssetConfig, NetworkAssets};
use flag_common::{validate_name, FlagError};
use renderer::layout::BADGE_ICON_CODE;
use renderer::{save_png, FlagRenderer, RenderAssets};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::opener::Platform;

/// Flag CLI
#[derive(Parser, Debug)]
#[command(name = "flag-cli")]
#[command(about = "Generate an Indian flag image with a footer name")]
struct Args {
    /// Footer name (2-30 chars)
    name: String,

    /// Output image file, relative to the downloads folder
    #[arg(short, long, default_value = "indian_flag.png")]
    output: PathBuf,

    /// TrueType font to use instead of the downloaded one
    #[arg(long, env = "FLAG_FONT_PATH")]
    font_path: Option<PathBuf>,

    /// Never touch the network (no font download, no badge icon)
    #[arg(long, env = "FLAG_OFFLINE")]
    offline: bool,

    /// Save the image without opening it
    #[arg(long)]
    no_open: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to create Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let code = runtime.block_on(async {
        tokio::select! {
            result = generate(&args) => report(result, args.no_open),
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Operation cancelled by user.");
                1
            }
        }
    });

    // Exit without waiting on a render that may still be running
    std::process::exit(code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Validate, resolve assets, render and save. Returns the written path.
async fn generate(args: &Args) -> Result<PathBuf> {
    let name = validate_name(&args.name)?;

    let platform = Platform::current();
    let dir = output::downloads_dir(platform);
    let path = output::prepare_output(&dir, &args.output)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    debug!(path = %path.display(), ?platform, "Resolved output path");

    let provider = NetworkAssets::new(AssetConfig {
        font_path: args.font_path.clone(),
        offline: args.offline,
        ..AssetConfig::default()
    });
    let assets = RenderAssets::resolve(&provider, BADGE_ICON_CODE).await;

    let image = tokio::task::spawn_blocking(move || FlagRenderer::default().render(&name, &assets))
        .await
        .context("Render task failed")?;

    // Written within one poll: a cancelled render leaves nothing on disk
    let saved = save_png(&image, &path)?;
    Ok(saved)
}

/// Print the outcome and pick the exit code.
fn report(result: Result<PathBuf>, no_open: bool) -> i32 {
    let path = match result {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    println!("Flag image saved to {}", path.display());
    if !no_open {
        open_image(&path);
    }
    0
}

fn open_image(path: &std::path::Path) {
    let result = opener::detect().and_then(|viewer| {
        debug!(opener = viewer.name(), "Opening image");
        viewer.open(path)
    });

    match result {
        Ok(()) => {}
        Err(FlagError::PlatformUnsupported(reason)) => {
            warn!(reason = %reason, "No viewer available");
            eprintln!("Warning: {}. Image saved at: {}", reason, path.display());
        }
        Err(e) => {
            eprintln!("Warning: could not open image: {}", e);
        }
    }
}
