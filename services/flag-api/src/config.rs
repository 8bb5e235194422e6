//! Throttle and cache settings.

use std::path::PathBuf;
use std::time::Duration;

/// Default number of requests a client may make per window.
pub const DEFAULT_RATE_LIMIT: usize = 5;

/// Default sliding window length.
pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(10);

/// Default lifetime of a cached render.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24);

#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Maximum requests per client inside `rate_window`
    pub rate_limit: usize,
    pub rate_window: Duration,
    /// Age (by file mtime) after which a cached render is deleted
    pub cache_ttl: Duration,
    /// Directory holding `<sha256>.png` renders
    pub cache_dir: PathBuf,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_window: DEFAULT_RATE_WINDOW,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_dir: default_cache_dir(),
        }
    }
}

/// `<system temp>/flag_cache`
pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join("flag_cache")
}
