//! Logging related module.

use crate::error::OhNo;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Verbosity {
  #[default]
  Off,
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl Verbosity {
  pub fn from_count(count: u8) -> Self {
    match count {
      0 => Self::Off,
      1 => Self::Error,
      2 => Self::Warn,
      3 => Self::Info,
      4 => Self::Debug,
      _ => Self::Trace,
    }
  }

  pub fn to_level(self) -> Option<log::Level> {
    match self {
      Verbosity::Error => Some(log::Level::Error),
      Verbosity::Warn => Some(log::Level::Warn),
      Verbosity::Info => Some(log::Level::Info),
      Verbosity::Debug => Some(log::Level::Debug),
      Verbosity::Trace => Some(log::Level::Trace),
      Verbosity::Off => None,
    }
  }

  /// Install the logger on stderr; nothing is logged when off.
  pub fn init(self) -> Result<(), OhNo> {
    if let Some(level) = self.to_level() {
      simple_logger::init_with_level(level)?;
    }

    Ok(())
  }
}
