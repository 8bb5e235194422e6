//! Name validation shared by every entry point.
//!
//! A name is trimmed, must be between [`MIN_NAME_LEN`] and [`MAX_NAME_LEN`]
//! characters, and may only contain ASCII letters, digits, spaces and
//! `.,'-`. Nothing else is normalized.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::FlagError;

/// Minimum accepted name length, in characters.
pub const MIN_NAME_LEN: usize = 2;

/// Maximum accepted name length, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// A name that passed [`validate_name`]. Can only be built through validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedName(String);

impl ValidatedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidatedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ValidatedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl FromStr for ValidatedName {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_name(s)
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | ',' | '\'' | '-')
}

/// Validate a raw name for the flag footer.
pub fn validate_name(raw: &str) -> Result<ValidatedName, FlagError> {
    let name = raw.trim();

    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(FlagError::InvalidName(format!(
            "Name must be between {} and {} characters.",
            MIN_NAME_LEN, MAX_NAME_LEN
        )));
    }

    if !name.chars().all(is_allowed) {
        return Err(FlagError::InvalidName(
            "Name contains invalid characters.".to_string(),
        ));
    }

    Ok(ValidatedName(name.to_string()))
}
