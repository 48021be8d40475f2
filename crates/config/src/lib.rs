//! Configuration for climb.
//!
//! Configuration is written in TOML and every field is optional:
//!
//! ```toml
//! [brackets]
//! # Single-character delimiter pairs matched by the bracket oracle.
//! pairs = [["(", ")"], ["[", "]"], ["{", "}"]]
//! # Cap on bracket tokens visited by one outward scan.
//! scan-limit = 100000
//!
//! # Candidate kinds offered to grow/shrink, innermost first.
//! [candidates]
//! words = true
//! brackets = true
//! lines = true
//! document = true
//! ```
//!
//! # Configuration Files
//!
//! [`Config::load_default`] reads `$XDG_CONFIG_HOME/climb/config.toml` (or the
//! platform equivalent) and falls back to defaults when it does not exist.

pub mod error;

use std::path::{Path, PathBuf};

pub use error::{ConfigError, Result};
use serde::Deserialize;

pub use climb_select::DEFAULT_SCAN_LIMIT;

/// Parsed and validated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
	/// Bracket matching settings.
	pub brackets: BracketConfig,
	/// Which candidate ranges grow/shrink offers.
	pub candidates: CandidateConfig,
}

/// A single-character bracket pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
	pub open: char,
	pub close: char,
}

impl BracketPair {
	pub const fn new(open: char, close: char) -> Self {
		Self { open, close }
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketConfig {
	/// Delimiter pairs; no character appears twice.
	pub pairs: Vec<BracketPair>,
	/// Cap on bracket tokens visited by one outward scan.
	pub scan_limit: usize,
}

impl Default for BracketConfig {
	fn default() -> Self {
		Self {
			pairs: vec![BracketPair::new('(', ')'), BracketPair::new('[', ']'), BracketPair::new('{', '}')],
			scan_limit: DEFAULT_SCAN_LIMIT,
		}
	}
}

impl BracketConfig {
	/// The pair opened by `ch`.
	pub fn pair_opened_by(&self, ch: char) -> Option<BracketPair> {
		self.pairs.iter().copied().find(|pair| pair.open == ch)
	}

	/// The pair closed by `ch`.
	pub fn pair_closed_by(&self, ch: char) -> Option<BracketPair> {
		self.pairs.iter().copied().find(|pair| pair.close == ch)
	}
}

/// Candidate kinds offered by the text range provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CandidateConfig {
	/// The word under the cursor.
	pub words: bool,
	/// Interior and full span of each enclosing bracket pair.
	pub brackets: bool,
	/// The content of the cursor's line.
	pub lines: bool,
	/// The whole document.
	pub document: bool,
}

impl Default for CandidateConfig {
	fn default() -> Self {
		Self {
			words: true,
			brackets: true,
			lines: true,
			document: true,
		}
	}
}

/// On-disk shape before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
	brackets: RawBrackets,
	candidates: CandidateConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct RawBrackets {
	pairs: Vec<(String, String)>,
	scan_limit: usize,
}

impl Default for RawBrackets {
	fn default() -> Self {
		let defaults = BracketConfig::default();
		Self {
			pairs: defaults
				.pairs
				.iter()
				.map(|pair| (pair.open.to_string(), pair.close.to_string()))
				.collect(),
			scan_limit: defaults.scan_limit,
		}
	}
}

impl Config {
	/// Parse a TOML string into a validated [`Config`].
	pub fn from_toml(input: &str) -> Result<Self> {
		let raw: RawConfig = toml::from_str(input)?;
		Ok(Self {
			brackets: validate_brackets(raw.brackets)?,
			candidates: raw.candidates,
		})
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::from_toml(&content)
	}

	/// Load the user configuration file, or defaults if there is none.
	pub fn load_default() -> Result<Self> {
		match default_path() {
			Some(path) if path.exists() => Self::load(path),
			_ => Ok(Self::default()),
		}
	}
}

/// Location of the user configuration file.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("climb").join("config.toml"))
}

fn validate_brackets(raw: RawBrackets) -> Result<BracketConfig> {
	if raw.scan_limit == 0 {
		return Err(ConfigError::ZeroScanLimit);
	}
	let mut pairs: Vec<BracketPair> = Vec::with_capacity(raw.pairs.len());
	for (open, close) in raw.pairs {
		let pair = parse_pair(&open, &close)?;
		for ch in [pair.open, pair.close] {
			if pairs.iter().any(|seen| seen.open == ch || seen.close == ch) {
				return Err(ConfigError::DuplicateBracket(ch));
			}
		}
		pairs.push(pair);
	}
	Ok(BracketConfig {
		pairs,
		scan_limit: raw.scan_limit,
	})
}

fn parse_pair(open: &str, close: &str) -> Result<BracketPair> {
	let invalid = |reason| ConfigError::InvalidPair {
		open: open.to_string(),
		close: close.to_string(),
		reason,
	};
	let (Some(open_ch), Some(close_ch)) = (single_char(open), single_char(close)) else {
		return Err(invalid("delimiters must be single characters"));
	};
	if open_ch == close_ch {
		return Err(invalid("opening and closing delimiters must differ"));
	}
	if open_ch.is_alphanumeric() || open_ch.is_whitespace() || close_ch.is_alphanumeric() || close_ch.is_whitespace() {
		return Err(invalid("delimiters must be punctuation"));
	}
	Ok(BracketPair::new(open_ch, close_ch))
}

fn single_char(s: &str) -> Option<char> {
	let mut chars = s.chars();
	let ch = chars.next()?;
	chars.next().is_none().then_some(ch)
}
