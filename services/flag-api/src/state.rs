//! Application state for the flag API.

use std::sync::Arc;

use anyhow::{Context, Result};
use flag_assets::{AssetConfig, NetworkAssets};
use metrics_exporter_prometheus::PrometheusHandle;
use renderer::{AssetProvider, FlagRenderer};

use crate::config::ThrottleConfig;
use crate::throttle::RequestThrottleCache;

/// Shared application state.
pub struct AppState {
    /// Rate and cache tables.
    pub throttle: RequestThrottleCache,

    /// Font and badge supply, resolved per render.
    pub assets: Arc<dyn AssetProvider>,

    pub renderer: FlagRenderer,

    /// Prometheus exposition handle; `None` when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        throttle_config: &ThrottleConfig,
        asset_config: AssetConfig,
        prometheus: Option<PrometheusHandle>,
    ) -> Result<Self> {
        let throttle = RequestThrottleCache::new(throttle_config).with_context(|| {
            format!(
                "Failed to create cache directory {}",
                throttle_config.cache_dir.display()
            )
        })?;

        Ok(Self {
            throttle,
            assets: Arc::new(NetworkAssets::new(asset_config)),
            renderer: FlagRenderer::default(),
            prometheus,
        })
    }

    /// State with a custom asset provider (tests, offline deployments).
    pub fn with_assets(
        throttle_config: &ThrottleConfig,
        assets: Arc<dyn AssetProvider>,
    ) -> Result<Self> {
        let throttle = RequestThrottleCache::new(throttle_config)
            .context("Failed to create cache directory")?;
        Ok(Self {
            throttle,
            assets,
            renderer: FlagRenderer::default(),
            prometheus: None,
        })
    }
}
