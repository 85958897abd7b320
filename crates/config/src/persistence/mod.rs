//! Config file access.
//!
//! Responsibilities:
//! - Locate the standard configuration file.
//! - Read and parse the profile file.
//!
//! Does NOT handle:
//! - Loading environment variables (see `loader`).
//! - Writing profiles back to disk; the file is managed by hand.

mod file;
mod path;

pub use file::{ConfigFile, ConfigFileError, read_config_file};
pub use path::default_config_path;
