//! Asset locations and fetch limits.

use std::path::PathBuf;
use std::time::Duration;

/// Where the font and icons come from.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Download location of the TrueType font
    pub font_url: String,
    /// File name the font is stored under
    pub font_file_name: String,
    /// Explicit font file, tried before anything else
    pub font_path: Option<PathBuf>,
    /// Directory the downloaded font is written to (default: beside the executable)
    pub font_dir: Option<PathBuf>,
    /// Icon URL with a `{code}` placeholder
    pub icon_url_template: String,
    /// Per-request timeout for icon fetches
    pub icon_timeout: Duration,
    /// Timeout for the one-time font download
    pub font_timeout: Duration,
    /// Never touch the network
    pub offline: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            font_url: "https://github.com/google/fonts/raw/refs/heads/main/ofl/hindmadurai/HindMadurai-Bold.ttf"
                .to_string(),
            font_file_name: "HindMadurai-Bold.ttf".to_string(),
            font_path: None,
            font_dir: None,
            icon_url_template: "https://github.com/twitter/twemoji/raw/master/assets/72x72/{code}.png"
                .to_string(),
            icon_timeout: Duration::from_secs(5),
            font_timeout: Duration::from_secs(30),
            offline: false,
        }
    }
}

impl AssetConfig {
    /// Config that resolves the font from disk only and never fetches icons.
    pub fn offline(font_path: Option<PathBuf>) -> Self {
        Self {
            font_path,
            offline: true,
            ..Self::default()
        }
    }

    pub fn icon_url(&self, code: &str) -> String {
        self.icon_url_template.replace("{code}", code)
    }

    /// Directory the font is persisted in: the configured one, else the
    /// executable's directory, else the current directory.
    pub fn font_home(&self) -> PathBuf {
        if let Some(dir) = &self.font_dir {
            return dir.clone();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Font files to try, in order, before downloading.
    pub fn font_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = &self.font_path {
            candidates.push(path.clone());
        }
        candidates.push(self.font_home().join(&self.font_file_name));
        if let Ok(cwd) = std::env::current_dir() {
            let in_cwd = cwd.join(&self.font_file_name);
            if !candidates.contains(&in_cwd) {
                candidates.push(in_cwd);
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AssetConfig::default();
        assert_eq!(config.icon_timeout, Duration::from_secs(5));
        assert_eq!(config.font_file_name, "HindMadurai-Bold.ttf");
        assert!(!config.offline);
    }

    #[test]
    fn test_icon_url() {
        let config = AssetConfig::default();
        assert_eq!(
            config.icon_url("1f54a"),
            "https://github.com/twitter/twemoji/raw/master/assets/72x72/1f54a.png"
        );
    }

    #[test]
    fn test_font_candidates_order() {
        let config = AssetConfig {
            font_path: Some(PathBuf::from("/opt/fonts/custom.ttf")),
            font_dir: Some(PathBuf::from("/opt/flag")),
            ..AssetConfig::default()
        };
        let candidates = config.font_candidates();
        assert_eq!(candidates[0], PathBuf::from("/opt/fonts/custom.ttf"));
        assert_eq!(candidates[1], PathBuf::from("/opt/flag/HindMadurai-Bold.ttf"));
        assert!(candidates.len() <= 3);
    }
}
