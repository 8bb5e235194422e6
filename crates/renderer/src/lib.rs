//! Flag rendering.
//!
//! Composes a fixed-layout flag image:
//! - Saffron, white and green stripes
//! - A spoke emblem centered in the white stripe
//! - Gradient header and footer bands
//! - Gradient-filled caption and name, each with an optional badge icon

pub mod assets;
pub mod badge;
pub mod emblem;
pub mod error;
pub mod flag;
pub mod glyphs;
pub mod gradient;
pub mod layout;
pub mod png;
pub mod text;

pub use assets::{AssetProvider, LocalAssets, RenderAssets};
pub use error::RenderError;
pub use flag::{encode_png, render_flag, save_png, FlagRenderer};
pub use layout::FlagLayout;
pub use text::{TextMetrics, Typeface};
