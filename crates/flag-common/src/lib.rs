//! Common types shared by the flag renderer and both front ends.

pub mod error;
pub mod name;

pub use error::{FlagError, FlagResult};
pub use name::{validate_name, ValidatedName, MAX_NAME_LEN, MIN_NAME_LEN};
