//! Where the CLI writes its image.

use std::path::{Path, PathBuf};

use crate::opener::Platform;

/// Termux shared-storage download folders, in order of preference.
const TERMUX_DOWNLOADS: [&str; 2] = ["storage/downloads", "storage/Download"];

/// The user's home directory, as the shell would expand `~`.
pub fn home_dir() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~").into_owned())
}

/// Downloads folder for `platform`.
pub fn downloads_dir(platform: Platform) -> PathBuf {
    downloads_dir_in(platform, &home_dir())
}

/// Downloads folder for `platform` relative to `home`.
///
/// On Termux the first existing shared-storage folder wins, defaulting to
/// the first candidate.
pub fn downloads_dir_in(platform: Platform, home: &Path) -> PathBuf {
    match platform {
        Platform::Termux => TERMUX_DOWNLOADS
            .iter()
            .map(|rel| home.join(rel))
            .find(|dir| dir.is_dir())
            .unwrap_or_else(|| home.join(TERMUX_DOWNLOADS[0])),
        Platform::MacOs | Platform::Windows | Platform::Linux => home.join("Downloads"),
        Platform::Other => home.to_path_buf(),
    }
}

/// Create `dir` if needed and join `output` onto it.
///
/// An absolute `output` is used as given.
pub fn prepare_output(dir: &Path, output: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(output);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(path)
}
