//! Opening the saved image with the platform viewer.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use flag_common::FlagError;
use tracing::debug;

/// Platforms with a known way to open files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    /// Android terminal, detected through its `PREFIX`.
    Termux,
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        let prefix = std::env::var("PREFIX").ok();
        Self::detect(std::env::consts::OS, prefix.as_deref())
    }

    /// Classify an OS name (as in `std::env::consts::OS`) and `PREFIX` value.
    pub fn detect(os: &str, prefix: Option<&str>) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            "linux" | "android" if prefix.map_or(false, |p| p.contains("com.termux")) => Platform::Termux,
            "linux" => Platform::Linux,
            _ => Platform::Other,
        }
    }
}

/// Something that can show a file to the user.
pub trait FileOpener {
    fn name(&self) -> &str;

    fn open(&self, path: &Path) -> Result<(), FlagError>;
}

/// Opens files by running an external program with the path appended.
#[derive(Debug, Clone)]
pub struct CommandOpener {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandOpener {
    pub fn new(program: impl Into<PathBuf>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl FileOpener for CommandOpener {
    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("opener")
    }

    fn open(&self, path: &Path) -> Result<(), FlagError> {
        let status = self.command(path).status()?;
        debug!(opener = self.name(), status = %status, "Viewer exited");
        Ok(())
    }
}

/// Find `program` in the directories of a `PATH`-style value.
pub fn find_in_path(program: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// The opener for `platform`, searching `path_var` for Unix viewers.
pub fn opener_for(platform: Platform, path_var: &OsStr) -> Result<CommandOpener, FlagError> {
    let lookup = |program: &str| {
        find_in_path(program, path_var)
            .map(|found| CommandOpener::new(found, &[]))
            .ok_or_else(|| FlagError::PlatformUnsupported(format!("{} not found", program)))
    };

    match platform {
        Platform::MacOs => Ok(CommandOpener::new("open", &[])),
        // The empty title keeps `start` from treating a quoted path as one
        Platform::Windows => Ok(CommandOpener::new("cmd", &["/C", "start", ""])),
        Platform::Termux => lookup("termux-open"),
        Platform::Linux => lookup("xdg-open"),
        Platform::Other => Err(FlagError::PlatformUnsupported(
            std::env::consts::OS.to_string(),
        )),
    }
}

/// The opener for the running platform.
pub fn detect() -> Result<Box<dyn FileOpener>, FlagError> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    let opener = opener_for(Platform::current(), &path_var)?;
    Ok(Box::new(opener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_detection() {
        assert_eq!(Platform::detect("macos", None), Platform::MacOs);
        assert_eq!(Platform::detect("windows", None), Platform::Windows);
        assert_eq!(Platform::detect("linux", None), Platform::Linux);
        assert_eq!(Platform::detect("linux", Some("/usr")), Platform::Linux);
        assert_eq!(
            Platform::detect("linux", Some("/data/data/com.termux/files/usr")),
            Platform::Termux
        );
        assert_eq!(Platform::detect("freebsd", None), Platform::Other);
    }

    #[test]
    fn test_missing_viewer_is_unsupported() {
        let empty = tempfile::tempdir().unwrap();
        let result = opener_for(Platform::Linux, empty.path().as_os_str());
        assert!(matches!(result, Err(FlagError::PlatformUnsupported(msg)) if msg.contains("xdg-open")));

        let result = opener_for(Platform::Termux, empty.path().as_os_str());
        assert!(matches!(result, Err(FlagError::PlatformUnsupported(msg)) if msg.contains("termux-open")));

        assert!(opener_for(Platform::Other, empty.path().as_os_str()).is_err());
    }

    #[test]
    fn test_viewer_found_on_path() {
        let bin = tempfile::tempdir().unwrap();
        let fake = bin.path().join("xdg-open");
        std::fs::write(&fake, b"#!/bin/sh\n").unwrap();

        let opener = opener_for(Platform::Linux, bin.path().as_os_str()).unwrap();
        assert_eq!(opener.name(), "xdg-open");
        assert_eq!(find_in_path("xdg-open", bin.path().as_os_str()), Some(fake));
    }

    #[test]
    fn test_fixed_openers() {
        let none = OsStr::new("");
        assert_eq!(opener_for(Platform::MacOs, none).unwrap().name(), "open");
        assert_eq!(opener_for(Platform::Windows, none).unwrap().name(), "cmd");
    }
}
