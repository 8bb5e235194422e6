//! `AssetProvider` backed by local files and HTTP.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use image::RgbaImage;
use renderer::assets::load_font_file;
use renderer::{AssetProvider, Typeface};
use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::AssetConfig;

/// Resolves the font until one is found and fetches icons on demand.
///
/// A resolved face is kept for the life of the provider. A failed lookup
/// is not remembered, so the next call searches the disk and retries the
/// download.
pub struct NetworkAssets {
    config: AssetConfig,
    client: Option<Client>,
    font: OnceCell<Typeface>,
}

impl NetworkAssets {
    /// Build the provider. Without an HTTP client it behaves as if offline.
    pub fn new(config: AssetConfig) -> Self {
        let client = if config.offline {
            None
        } else {
            match Client::builder()
                .user_agent(concat!("flag-generator/", env!("CARGO_PKG_VERSION")))
                .build()
            {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!(error = %e, "Failed to create HTTP client, assets limited to disk");
                    None
                }
            }
        };

        Self {
            config,
            client,
            font: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    async fn resolve_font(&self) -> Option<Typeface> {
        for path in self.config.font_candidates() {
            if !path.is_file() {
                continue;
            }
            if let Some(face) = load_font_file(&path) {
                debug!(path = %path.display(), "Using font from disk");
                return Some(face);
            }
        }

        let client = self.client.as_ref()?;
        match self.download_font(client).await {
            Ok(face) => Some(face),
            Err(e) => {
                warn!(url = %self.config.font_url, error = %e, "Font download failed");
                None
            }
        }
    }

    async fn download_font(&self, client: &Client) -> Result<Typeface> {
        info!(url = %self.config.font_url, "Downloading font");

        let bytes = client
            .get(&self.config.font_url)
            .timeout(self.config.font_timeout)
            .send()
            .await
            .context("Font request failed")?
            .error_for_status()
            .context("Font server returned an error")?
            .bytes()
            .await
            .context("Failed to read font body")?
            .to_vec();

        let face = Typeface::from_bytes(bytes.clone())
            .ok_or_else(|| anyhow!("downloaded font could not be parsed"))?;

        let target = self.config.font_home().join(&self.config.font_file_name);
        match persist(target.clone(), bytes).await {
            Ok(()) => info!(path = %target.display(), "Font saved"),
            // The parsed face is still usable for this process
            Err(e) => warn!(path = %target.display(), error = %e, "Failed to save font"),
        }

        Ok(face)
    }

    async fn fetch_icon(&self, client: &Client, code: &str) -> Result<RgbaImage> {
        let url = self.config.icon_url(code);
        let bytes = client
            .get(&url)
            .timeout(self.config.icon_timeout)
            .send()
            .await
            .with_context(|| format!("Icon request to {} failed", url))?
            .error_for_status()
            .context("Icon server returned an error")?
            .bytes()
            .await
            .context("Failed to read icon body")?;

        let icon = image::load_from_memory(&bytes).context("Failed to decode icon")?;
        Ok(icon.to_rgba8())
    }
}

/// Write `bytes` to `target` via a uniquely named sibling temp file and a
/// rename. The temp file is removed if the write fails.
async fn persist(target: PathBuf, bytes: Vec<u8>) -> Result<()> {
    tokio::task::spawn_blocking(move || -> Result<()> {
        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".font-")
            .suffix(".partial")
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(&bytes).context("Failed to write font")?;
        tmp.persist(&target)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to move font into {}", target.display()))?;
        Ok(())
    })
    .await
    .context("Font save task failed")?
}

#[async_trait]
impl AssetProvider for NetworkAssets {
    async fn font(&self) -> Option<Typeface> {
        self.font
            .get_or_try_init(|| async { self.resolve_font().await.ok_or(()) })
            .await
            .ok()
            .cloned()
    }

    async fn icon(&self, code: &str) -> Option<RgbaImage> {
        let client = self.client.as_ref()?;
        match self.fetch_icon(client, code).await {
            Ok(icon) => Some(icon),
            Err(e) => {
                warn!(icon = code, error = %e, "Icon unavailable");
                None
            }
        }
    }
}
