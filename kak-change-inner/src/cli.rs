use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::change::Mode;

#[derive(Debug, Parser)]
#[clap(
  about = "Change the inside or outside of the unit around the cursor starting with a given delimiter.",
  version
)]
pub struct Cli {
  /// Whether to change the inside of the unit, or the unit itself.
  #[clap(value_enum, required_unless_present = "rc")]
  pub mode: Option<CliMode>,

  /// File holding the buffer content; standard input is read if absent.
  pub file: Option<PathBuf>,

  /// Delimiter the unit starts with.
  ///
  /// Either a single char or a Kakoune key name, such as <lt> or <space>.
  #[clap(short, long, required_unless_present = "rc")]
  pub delimiter: Option<String>,

  /// Cursor position, as <line>.<col>; both are 1-based, and the column is in bytes.
  #[clap(long, default_value = "1.1")]
  pub cursor: String,

  /// Count the command was invoked with; a non-zero count copies instead of deleting.
  #[clap(long, default_value_t = 0)]
  pub count: u32,

  /// Filetype of the buffer, used to pick a tree-sitter grammar.
  #[clap(long)]
  pub filetype: Option<String>,

  /// Whether we start from Kakoune; in that case, Kakoune commands are printed instead of the result.
  #[clap(short, long)]
  pub kakoune: bool,

  /// Print a JSON report of the change instead of the result.
  #[clap(long)]
  pub json: bool,

  /// Print the Kakoune commands to source, and exit.
  #[clap(long)]
  pub rc: bool,

  /// Verbosity.
  ///
  /// Can be accumulated to get more verbosity. Without this flag, logging is disabled. Then, for each applicaton of the
  /// flag, the obtained verbosity follows this order: error, warn, info, debug, trace. Thus, if you use -v, you will
  /// only get error messages. If you use -vv, you will also see warnings. The maximum verbosity is achieved with -vvvvv
  /// for trace logs.
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliMode {
  Inner,
  Outer,
}

impl From<CliMode> for Mode {
  fn from(mode: CliMode) -> Self {
    match mode {
      CliMode::Inner => Mode::Inner,
      CliMode::Outer => Mode::Outer,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use clap::Parser;

  use super::{Cli, CliMode};

  #[test]
  fn kakoune_invocation() {
    let cli = Cli::try_parse_from([
      "kak-change-inner",
      "--kakoune",
      "--cursor",
      "3.7",
      "--count",
      "2",
      "--filetype",
      "rust",
      "--delimiter",
      "<lt>",
      "outer",
      "/tmp/buf",
    ])
    .unwrap();

    assert_eq!(cli.mode, Some(CliMode::Outer));
    assert_eq!(cli.delimiter.as_deref(), Some("<lt>"));
    assert_eq!(cli.cursor, "3.7");
    assert_eq!(cli.count, 2);
    assert_eq!(cli.file.as_deref(), Some(Path::new("/tmp/buf")));
    assert!(cli.kakoune);
  }

  #[test]
  fn rc_only() {
    let cli = Cli::try_parse_from(["kak-change-inner", "--rc"]).unwrap();
    assert!(cli.rc);
    assert_eq!(cli.mode, None);

    assert!(Cli::try_parse_from(["kak-change-inner", "inner"]).is_err());
  }
}
