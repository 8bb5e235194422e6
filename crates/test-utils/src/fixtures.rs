//! Common test fixtures for name handling and rendering.

use flag_common::{validate_name, ValidatedName};

/// Names every entry point must accept (before trimming).
pub const VALID_NAMES: &[&str] = &[
    "A. Kumar",
    "Priya",
    "Jo",
    "O'Neil-Smith, Jr.",
    "  padded name  ",
    "abcdefghijklmnopqrstuvwxyz0123",
];

/// Names every entry point must reject.
pub const INVALID_NAMES: &[&str] = &[
    "",
    " ",
    "A",
    "abcdefghijklmnopqrstuvwxyz01234",
    "Priya!",
    "<b>bold</b>",
    "snake_case",
    "Zoë",
];

/// A validated name for tests that only need *some* name.
pub fn sample_name() -> ValidatedName {
    validated("A. Kumar")
}

/// Validate a name that the test knows to be valid.
pub fn validated(raw: &str) -> ValidatedName {
    validate_name(raw).unwrap_or_else(|e| panic!("fixture name {:?} is invalid: {}", raw, e))
}

/// Bold TrueType fonts commonly installed on Linux hosts.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
];

/// A TrueType font for tests of the outline path.
///
/// `FLAG_TEST_FONT` overrides the search. Returns `None` when no font is
/// found; callers skip rather than fail.
pub fn system_font() -> Option<std::path::PathBuf> {
    if let Some(path) = std::env::var_os("FLAG_TEST_FONT") {
        let path = std::path::PathBuf::from(path);
        return path.is_file().then_some(path);
    }
    SYSTEM_FONT_PATHS
        .iter()
        .map(std::path::PathBuf::from)
        .find(|path| path.is_file())
}
