mod change;
mod cli;
mod document;
mod error;
mod expand;
mod flash;
mod grammars;
mod kakoune;
mod logging;
mod protocol;
mod selection;
mod surface;

use std::{
  fs,
  io::{self, Read},
  path::Path,
};

use change::{change_inner, change_outer, Action, Change, InvokeMode, Mode, Options};
use clap::Parser;
use cli::Cli;
use error::OhNo;
use expand::{syntax::SyntaxExpander, text::TextExpander, Expander};
use kak_change_inner_config::Config;
use logging::Verbosity;
use surface::Surface;

use crate::{
  document::Document,
  grammars::Grammar,
  kakoune::{buffer::KakouneBuffer, rc, selection::Pos},
  protocol::response::Payload,
};

fn main() {
  let cli = Cli::parse();
  let kakoune = cli.kakoune;

  if let Err(err) = start(cli) {
    match Failure::new(&err, kakoune) {
      Failure::Kakoune(fail) => println!("{fail}"),
      Failure::Terminal(msg) => eprintln!("{msg}"),
    }

    log::error!("{err}");
    std::process::exit(1);
  }
}

/// How a failure is reported, regardless of the log level.
#[derive(Debug, Eq, PartialEq)]
enum Failure {
  /// `fail` command on stdout, the only output Kakoune reads.
  Kakoune(String),

  /// Message for stderr.
  Terminal(String),
}

impl Failure {
  fn new(err: &OhNo, kakoune: bool) -> Self {
    if kakoune {
      let fail = Payload::Fail {
        message: err.to_string(),
      };
      Failure::Kakoune(fail.to_kak())
    } else {
      Failure::Terminal(format!("kak-change-inner: {err}"))
    }
  }
}

fn start(cli: Cli) -> Result<(), OhNo> {
  Verbosity::from_count(cli.verbose).init()?;

  if cli.rc {
    println!("{}", rc::static_kak());
    return Ok(());
  }

  let (Some(mode), Some(key)) = (cli.mode, cli.delimiter.as_deref()) else {
    return Err(OhNo::NothingToDo);
  };
  let mode = Mode::from(mode);
  let delimiter = kakoune::parse_delimiter(key)?;
  let invoke = InvokeMode::from_count(cli.count);

  let config = Config::load_default_user()?;
  log::trace!("running with configuration:\n{config:#?}");
  let options = Options::from_config(&config);

  let cursor = Pos::parse_kak_str(&cli.cursor).ok_or_else(|| OhNo::InvalidCursor {
    cursor: cli.cursor.clone(),
    err: "expected <line>.<col>".to_owned(),
  })?;
  let text = read_buffer(cli.file.as_deref())?;

  // the grammar must outlive the expander
  let grammar = match cli.filetype.as_deref().filter(|ft| !ft.is_empty()) {
    Some(filetype) => Grammar::load_for_filetype(&config, filetype).unwrap_or_else(|err| {
      log::warn!("{err}; falling back to plain text");
      None
    }),
    None => None,
  };
  let expander: Box<dyn Expander> = match grammar {
    Some(ref grammar) => Box::new(SyntaxExpander::new(grammar.lang(), &text)?),
    None => Box::new(TextExpander::new(&text)),
  };

  if cli.kakoune {
    let mut buffer = KakouneBuffer::new(text, cursor)?;
    apply(&mut buffer, &*expander, mode, delimiter, invoke, &options)?;

    let response = buffer.into_response();
    log::debug!("sending {} commands to Kakoune", response.payloads().len());
    if let Some(kak) = response.to_kak() {
      println!("{kak}");
    }

    return Ok(());
  }

  let offset = cursor.to_offset(&text).ok_or_else(|| OhNo::InvalidCursor {
    cursor: cli.cursor.clone(),
    err: "outside of the buffer".to_owned(),
  })?;
  let mut doc = Document::new(text, offset);
  let change = apply(&mut doc, &*expander, mode, delimiter, invoke, &options)?;

  if cli.json {
    println!("{}", serde_json::to_string(&change)?);
    return Ok(());
  }

  match change.action {
    Action::Delete => print!("{}", doc.into_text()),

    Action::CopyWithFlash => {
      log::debug!("flashing {:?}", doc.overlays().active());
      print!("{}", doc.register().get().unwrap_or_default());
    }
  }

  Ok(())
}

fn apply<S>(
  surface: &mut S,
  expander: &dyn Expander,
  mode: Mode,
  delimiter: char,
  invoke: InvokeMode,
  options: &Options,
) -> Result<Change, OhNo>
where
  S: Surface,
{
  match mode {
    Mode::Inner => change_inner(surface, expander, delimiter, invoke, options),
    Mode::Outer => change_outer(surface, expander, delimiter, invoke, options),
  }
}

/// Read the buffer content from `path`, or from stdin.
fn read_buffer(path: Option<&Path>) -> Result<String, OhNo> {
  match path {
    Some(path) => fs::read_to_string(path).map_err(|err| OhNo::CannotReadBuffer {
      path: path.to_owned(),
      err,
    }),

    None => {
      let mut text = String::new();
      io::stdin()
        .read_to_string(&mut text)
        .map_err(|err| OhNo::CannotReadBuffer {
          path: "<stdin>".into(),
          err,
        })?;

      Ok(text)
    }
  }
}
