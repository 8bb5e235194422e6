//! Per-client rate limiting and the render cache.
//!
//! Both tables live in one [`RequestThrottleCache`] built at startup and
//! shared by every request. Each table sits behind its own lock; neither
//! lock is held while a flag is being drawn.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use flag_common::FlagError;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::ThrottleConfig;

/// Cache key of a validated name: lowercase hex SHA-256 of its UTF-8 bytes.
pub fn cache_key(name: &str) -> String {
    format!("{:x}", Sha256::digest(name.as_bytes()))
}

// ============================================================================
// Rate limiting
// ============================================================================

/// Sliding-window limiter keyed by client identity.
#[derive(Debug)]
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    hits: HashMap<String, VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            hits: HashMap::new(),
        }
    }

    /// Admit and record a request from `client`, or refuse it.
    pub fn check_and_record(&mut self, client: &str) -> bool {
        self.check_and_record_at(client, Instant::now())
    }

    /// Same as [`check_and_record`](Self::check_and_record) with an explicit clock.
    ///
    /// Timestamps older than the window are evicted first, and clients left
    /// with no hits are forgotten. A refused request is not recorded.
    pub fn check_and_record_at(&mut self, client: &str, now: Instant) -> bool {
        let window = self.window;
        self.hits.retain(|_, hits| {
            while let Some(&oldest) = hits.front() {
                if now.saturating_duration_since(oldest) > window {
                    hits.pop_front();
                } else {
                    break;
                }
            }
            !hits.is_empty()
        });

        if self.recorded(client) >= self.limit {
            return false;
        }
        self.hits.entry(client.to_string()).or_default().push_back(now);
        true
    }

    /// Requests currently counted against `client`.
    pub fn recorded(&self, client: &str) -> usize {
        self.hits.get(client).map_or(0, VecDeque::len)
    }

    /// Clients with at least one hit inside the window.
    pub fn clients(&self) -> usize {
        self.hits.len()
    }
}

// ============================================================================
// Render cache
// ============================================================================

/// Index of rendered flags on disk, keyed by [`cache_key`].
#[derive(Debug)]
pub struct RenderCache {
    dir: PathBuf,
    ttl: Duration,
    index: HashMap<String, PathBuf>,
}

impl RenderCache {
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        Self {
            dir,
            ttl,
            index: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the render for `key` is stored.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.png", key))
    }

    /// Drop entries whose file is gone and delete renders older than the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn purge(&mut self, now: SystemTime) -> usize {
        let ttl = self.ttl;
        let before = self.index.len();

        self.index.retain(|key, path| {
            let modified = match std::fs::metadata(path.as_path()).and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(_) => {
                    debug!(cache_key = %key, "Dropping cache entry with missing file");
                    return false;
                }
            };

            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
            if age > ttl {
                if let Err(e) = std::fs::remove_file(path.as_path()) {
                    warn!(path = %path.display(), error = %e, "Failed to delete expired render");
                }
                debug!(cache_key = %key, age_secs = age.as_secs(), "Expired cache entry");
                return false;
            }
            true
        });

        before - self.index.len()
    }

    /// The stored render for `key`, if indexed and still on disk.
    pub fn lookup(&self, key: &str) -> Option<PathBuf> {
        self.index.get(key).filter(|path| path.exists()).cloned()
    }

    pub fn insert(&mut self, key: String, path: PathBuf) {
        self.index.insert(key, path);
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

// ============================================================================
// Shared front
// ============================================================================

/// Result of [`RequestThrottleCache::get_or_render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOutcome {
    /// A fresh render already existed; nothing was drawn.
    Hit(PathBuf),
    /// The render function ran and its output was indexed.
    Rendered(PathBuf),
}

impl CacheOutcome {
    pub fn path(&self) -> &Path {
        match self {
            CacheOutcome::Hit(path) | CacheOutcome::Rendered(path) => path,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheOutcome::Hit(_))
    }
}

/// Process-wide rate and cache tables.
pub struct RequestThrottleCache {
    limiter: Mutex<RateLimiter>,
    cache: Mutex<RenderCache>,
}

impl RequestThrottleCache {
    /// Build the tables and make sure the cache directory exists.
    pub fn new(config: &ThrottleConfig) -> std::io::Result<Self> {
        std::fs::create_dir_all(&config.cache_dir)?;
        Ok(Self {
            limiter: Mutex::new(RateLimiter::new(config.rate_limit, config.rate_window)),
            cache: Mutex::new(RenderCache::new(config.cache_dir.clone(), config.cache_ttl)),
        })
    }

    /// Admit and record a request from `client_id`.
    pub async fn check_and_record(&self, client_id: &str) -> bool {
        self.limiter.lock().await.check_and_record(client_id)
    }

    /// Return the cached render for `key`, or run `render_fn` to produce it.
    ///
    /// Expired and orphaned entries are purged first. `render_fn` receives
    /// the target path and runs on the blocking pool with no lock held.
    pub async fn get_or_render<F>(&self, key: &str, render_fn: F) -> Result<CacheOutcome, FlagError>
    where
        F: FnOnce(PathBuf) -> Result<PathBuf, FlagError> + Send + 'static,
    {
        let target = {
            let mut cache = self.cache.lock().await;
            let purged = cache.purge(SystemTime::now());
            if purged > 0 {
                debug!(purged, "Purged cache entries");
            }
            if let Some(path) = cache.lookup(key) {
                return Ok(CacheOutcome::Hit(path));
            }
            cache.path_for(key)
        };

        if let Some(dir) = target.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let path = tokio::task::spawn_blocking(move || render_fn(target))
            .await
            .map_err(|e| FlagError::Render(format!("Render task failed: {}", e)))??;

        self.cache.lock().await.insert(key.to_string(), path.clone());
        Ok(CacheOutcome::Rendered(path))
    }

    /// Number of indexed renders.
    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }
}
