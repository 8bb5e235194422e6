//! Error types for the flag generator.

use thiserror::Error;

/// Result type alias using FlagError.
pub type FlagResult<T> = Result<T, FlagError>;

/// Primary error type shared by the CLI and the web front end.
#[derive(Debug, Error)]
pub enum FlagError {
    // === Request Errors ===
    #[error("{0}")]
    InvalidName(String),

    #[error("Too many requests. Please wait.")]
    RateLimited,

    // === Asset Errors ===
    /// Font or icon could not be obtained. Callers degrade instead of failing.
    #[error("Asset unavailable: {0}")]
    AssetUnavailable(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    // === Platform Errors ===
    #[error("No known way to open files on this platform: {0}")]
    PlatformUnsupported(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl FlagError {
    /// Short machine-readable code for JSON error bodies and log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            FlagError::InvalidName(_) => "invalid_name",
            FlagError::RateLimited => "rate_limited",
            FlagError::AssetUnavailable(_) => "asset_unavailable",
            FlagError::Render(_) => "render_failed",
            FlagError::PlatformUnsupported(_) => "platform_unsupported",
            FlagError::Io(_) => "io_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            FlagError::InvalidName(_) => 400,
            FlagError::RateLimited => 429,
            _ => 500,
        }
    }
}

impl From<std::io::Error> for FlagError {
    fn from(err: std::io::Error) -> Self {
        FlagError::Io(err.to_string())
    }
}
