//! Font and icon supply for the renderer.
//!
//! Rendering never fetches anything itself. Callers resolve a
//! [`RenderAssets`] through an [`AssetProvider`] first; a provider that
//! cannot deliver returns `None` and the render degrades (built-in font,
//! no badge).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::RgbaImage;
use tracing::{debug, warn};

use crate::text::Typeface;

/// Source of the font and of decorative icons.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    /// The TrueType face to draw text with, if one can be obtained.
    async fn font(&self) -> Option<Typeface>;

    /// A decorative icon by code point (e.g. `"1f54a"`), if one can be obtained.
    async fn icon(&self, code: &str) -> Option<RgbaImage>;
}

/// Everything a single render needs besides the name.
#[derive(Debug, Clone)]
pub struct RenderAssets {
    pub typeface: Typeface,
    pub badge: Option<RgbaImage>,
}

impl RenderAssets {
    /// Built-in font and no badge. Fully deterministic, never touches disk.
    pub fn offline() -> Self {
        Self {
            typeface: Typeface::Builtin,
            badge: None,
        }
    }

    /// Ask `provider` for the font and the badge icon.
    pub async fn resolve(provider: &dyn AssetProvider, icon_code: &str) -> Self {
        let typeface = match provider.font().await {
            Some(face) => face,
            None => {
                warn!("Font unavailable, falling back to built-in font");
                Typeface::Builtin
            }
        };

        let badge = provider.icon(icon_code).await;
        if badge.is_none() {
            debug!(icon = icon_code, "Badge icon unavailable, skipping");
        }

        Self { typeface, badge }
    }
}

/// Provider backed only by the local filesystem. Never supplies icons.
#[derive(Debug, Clone, Default)]
pub struct LocalAssets {
    font_path: Option<PathBuf>,
}

impl LocalAssets {
    pub fn new(font_path: Option<PathBuf>) -> Self {
        Self { font_path }
    }
}

/// Read and parse a font file, logging instead of failing.
pub fn load_font_file(path: &Path) -> Option<Typeface> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let face = Typeface::from_bytes(bytes);
            if face.is_none() {
                warn!(path = %path.display(), "Font file could not be parsed");
            }
            face
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read font file");
            None
        }
    }
}

#[async_trait]
impl AssetProvider for LocalAssets {
    async fn font(&self) -> Option<Typeface> {
        let path = self.font_path.as_ref()?;
        load_font_file(path)
    }

    async fn icon(&self, _code: &str) -> Option<RgbaImage> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_assets_without_font_path() {
        let assets = RenderAssets::resolve(&LocalAssets::default(), "1f54a").await;
        assert!(assets.typeface.is_builtin());
        assert!(assets.badge.is_none());
    }

    #[tokio::test]
    async fn test_local_assets_with_unreadable_font() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();

        let provider = LocalAssets::new(Some(bogus));
        assert!(provider.font().await.is_none());

        let missing = LocalAssets::new(Some(dir.path().join("missing.ttf")));
        assert!(missing.font().await.is_none());
    }
}
