use std::{io, path::PathBuf};

use kak_change_inner_config::error::ConfigError;
use log::SetLoggerError;
use thiserror::Error;
use tree_sitter::LanguageError;

#[derive(Debug, Error)]
pub enum OhNo {
  #[error("nothing to do; please either use --rc or provide a mode and a delimiter")]
  NothingToDo,

  #[error("no enclosing unit starts with '{delimiter}'")]
  NoMatchingUnit { delimiter: char },

  #[error("{key} is not a delimiter")]
  InvalidDelimiter { key: String },

  #[error("invalid cursor {cursor}: {err}")]
  InvalidCursor { cursor: String, err: String },

  #[error("cannot read buffer from {}: {err}", .path.display())]
  CannotReadBuffer { path: PathBuf, err: io::Error },

  #[error("cannot serialize change: {err}")]
  CannotSerializeChange {
    #[from]
    err: serde_json::Error,
  },

  #[error("cannot initialize logging: {err}")]
  LoggerInit {
    #[from]
    err: SetLoggerError,
  },

  #[error("configuration error: {err}")]
  ConfigError {
    #[from]
    err: ConfigError,
  },

  #[error("cannot load grammar for language {lang}: {err}")]
  CannotLoadGrammar { lang: String, err: String },

  #[error("cannot parse buffer")]
  CannotParseBuffer,

  #[error("language error: {err}")]
  LangError {
    #[from]
    err: LanguageError,
  },
}

#[cfg(test)]
mod tests {
  use super::OhNo;

  #[test]
  fn no_matching_unit_message() {
    let err = OhNo::NoMatchingUnit { delimiter: '[' };
    assert_eq!(err.to_string(), "no enclosing unit starts with '['");
  }
}
