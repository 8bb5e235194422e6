//! Flag composition.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use flag_common::ValidatedName;
use image::RgbImage;
use tracing::debug;

use crate::assets::RenderAssets;
use crate::badge::paste_badge;
use crate::emblem::SpokeEmblem;
use crate::error::RenderError;
use crate::gradient::{fill_rows, fill_vertical_gradient};
use crate::layout::{FlagLayout, FONT_SIZE, GREEN, HEADER_TEXT, SAFFRON, WHITE};
use crate::png::create_png_rgb;
use crate::text::draw_gradient_text;

/// Draws flags with a fixed layout. Holds no state between renders.
#[derive(Debug, Clone)]
pub struct FlagRenderer {
    layout: FlagLayout,
    emblem: SpokeEmblem,
    font_size: f32,
    header_text: String,
}

impl Default for FlagRenderer {
    fn default() -> Self {
        Self::new(FlagLayout::default())
    }
}

impl FlagRenderer {
    pub fn new(layout: FlagLayout) -> Self {
        Self {
            layout,
            emblem: SpokeEmblem::default(),
            font_size: FONT_SIZE,
            header_text: HEADER_TEXT.to_string(),
        }
    }

    pub fn layout(&self) -> &FlagLayout {
        &self.layout
    }

    /// Compose the flag for `name`. Same inputs always give the same pixels.
    pub fn render(&self, name: &ValidatedName, assets: &RenderAssets) -> RgbImage {
        let start = Instant::now();
        let layout = &self.layout;
        let mut img = RgbImage::from_pixel(layout.width, layout.height, WHITE);

        let [saffron, white, green] = layout.stripes();
        fill_rows(&mut img, saffron, SAFFRON);
        fill_rows(&mut img, white, WHITE);
        fill_rows(&mut img, green, GREEN);

        let (cx, cy) = layout.emblem_center();
        self.emblem.draw(&mut img, cx, cy);

        let (upper, lower) = layout.header_halves();
        fill_vertical_gradient(&mut img, upper, SAFFRON, WHITE);
        fill_vertical_gradient(&mut img, lower, WHITE, GREEN);
        let (upper, lower) = layout.footer_halves();
        fill_vertical_gradient(&mut img, upper, SAFFRON, WHITE);
        fill_vertical_gradient(&mut img, lower, WHITE, GREEN);

        let face = &assets.typeface;

        // Header caption
        let metrics = face.measure(&self.header_text, self.font_size);
        let origin = layout.header_text_origin(&metrics);
        draw_gradient_text(&mut img, face, origin, self.font_size, &self.header_text, SAFFRON, GREEN);
        if let Some(icon) = &assets.badge {
            paste_badge(&mut img, icon, layout.badge_placement(origin, &metrics));
        }

        // Footer name
        let metrics = face.measure(name.as_str(), self.font_size);
        let origin = layout.footer_text_origin(&metrics);
        draw_gradient_text(&mut img, face, origin, self.font_size, name.as_str(), SAFFRON, GREEN);
        if let Some(icon) = &assets.badge {
            paste_badge(&mut img, icon, layout.badge_placement(origin, &metrics));
        }

        debug!(
            name = %name,
            builtin_font = face.is_builtin(),
            badge = assets.badge.is_some(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered flag"
        );

        img
    }

    /// Render and write a PNG to `path`, returning the path written.
    pub fn render_to_file(
        &self,
        name: &ValidatedName,
        assets: &RenderAssets,
        path: &Path,
    ) -> Result<PathBuf, RenderError> {
        let img = self.render(name, assets);
        save_png(&img, path)
    }
}

/// Compose a flag with the default layout.
pub fn render_flag(name: &ValidatedName, assets: &RenderAssets) -> RgbImage {
    FlagRenderer::default().render(name, assets)
}

/// Encode a canvas as PNG bytes.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, RenderError> {
    create_png_rgb(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Encode `img` and write it to `path`.
///
/// The bytes go to a uniquely named temporary file in the same directory
/// that is then renamed over `path`, so readers never observe a
/// half-written image and concurrent writers never share a temp file.
/// The temporary is removed if anything fails before the rename.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<PathBuf, RenderError> {
    let bytes = encode_png(img)?;

    let io_err = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".flag-")
        .suffix(".partial")
        .tempfile_in(dir)
        .map_err(io_err)?;
    tmp.write_all(&bytes).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    Ok(path.to_path_buf())
}
