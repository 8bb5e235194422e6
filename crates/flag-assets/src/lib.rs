//! Font and icon supply over the network.
//!
//! [`NetworkAssets`] implements the renderer's `AssetProvider`: the font is
//! looked up on disk, downloaded once if missing and kept beside the
//! executable; icons are fetched live with a short timeout. Every failure
//! degrades to "unavailable" and is only logged.

pub mod config;
pub mod network;

pub use config::AssetConfig;
pub use network::NetworkAssets;
