//! Flag API Service Library
//!
//! HTTP front end for the flag renderer: a generator page, the
//! `/generate` endpoint behind a per-client sliding-window rate limit and
//! a file-backed render cache, plus health and Prometheus endpoints.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod page;
pub mod router;
pub mod state;
pub mod throttle;

pub use config::ThrottleConfig;
pub use router::build_router;
pub use state::AppState;
pub use throttle::{CacheOutcome, RateLimiter, RenderCache, RequestThrottleCache};
