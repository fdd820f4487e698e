//! Error types.
//!
//! Only conditions a player or a config file can cause are errors. Misuse of
//! the widget API (stale widget ids, impossible sizes) panics instead, since
//! there is nothing sensible for the caller to do about it at runtime.

use std::io;
use std::path::PathBuf;

/// A recoverable failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// A key binding named a key we don't know about.
  #[error("unrecognized key name: {0:?}")]
  UnknownKey(String),

  /// An option was read that neither the user config nor the defaults define.
  #[error("option [{section}] {key} is not set")]
  MissingOption {
    /// The config section.
    section: String,
    /// The key within the section.
    key: String,
  },

  /// An option's stored value could not be parsed as the requested type.
  #[error("option [{section}] {key} is not a valid {expected}: {value:?}")]
  BadOption {
    /// The config section.
    section: String,
    /// The key within the section.
    key: String,
    /// The type we wanted, e.g. `"integer"`.
    expected: &'static str,
    /// The raw stored value.
    value: String,
  },

  /// A config file could not be parsed.
  #[error("could not parse {}: {source}", path.display())]
  ConfigParse {
    /// The offending file.
    path: PathBuf,
    /// The parser's complaint.
    source: ini::ParseError,
  },

  /// Reading or writing a file failed.
  #[error(transparent)]
  Io(#[from] io::Error),
}

/// A `Result` with [`Error`] as its error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
