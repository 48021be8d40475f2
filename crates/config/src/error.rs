//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A bracket pair entry is malformed.
	#[error("invalid bracket pair {open:?} {close:?}: {reason}")]
	InvalidPair {
		/// The opening delimiter as written.
		open: String,
		/// The closing delimiter as written.
		close: String,
		/// What is wrong with it.
		reason: &'static str,
	},

	/// A delimiter character appears in more than one pair.
	#[error("bracket {0:?} is used by more than one pair")]
	DuplicateBracket(char),

	/// The scan limit must allow at least one step.
	#[error("brackets.scan-limit must be at least 1")]
	ZeroScanLimit,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
