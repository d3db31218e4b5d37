//! Change inner / change outer.
//!
//! Both commands look for the smallest unit enclosing the cursor whose first char is a given delimiter, by growing a
//! selection one unit at a time. The outer variant acts on the unit itself, the inner variant on the unit it grew
//! from. The region is then either killed or copied and flashed.

use std::time::Duration;

use kak_change_inner_config::Config;
use serde::Serialize;

use crate::{
  error::OhNo,
  expand::{Expander, Expansion},
  selection::{char_at, Selection},
  surface::Surface,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  Inner,
  Outer,
}

/// What to do with the region once found.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
  /// Remove the region, moving it to the default register.
  Delete,

  /// Copy the region to the default register and highlight it briefly.
  CopyWithFlash,
}

/// How the command was invoked.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InvokeMode {
  #[default]
  Primary,
  Alternate,
}

impl InvokeMode {
  /// Any count turns the command into its alternate form.
  pub fn from_count(count: u32) -> Self {
    if count == 0 {
      Self::Primary
    } else {
      Self::Alternate
    }
  }

  pub fn action(self) -> Action {
    match self {
      InvokeMode::Primary => Action::Delete,
      InvokeMode::Alternate => Action::CopyWithFlash,
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
  pub flash_duration: Duration,
  pub flash_face: String,
  pub forward_on_miss: bool,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      flash_duration: Duration::from_millis(200),
      flash_face: "ChangeInnerFlash".to_owned(),
      forward_on_miss: false,
    }
  }
}

impl Options {
  pub fn from_config(config: &Config) -> Self {
    Self {
      flash_duration: Duration::from_millis(config.flash.duration_ms),
      flash_face: config.flash.face.clone(),
      forward_on_miss: config.search.forward_on_miss,
    }
  }
}

/// Report of an applied change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Change {
  pub mode: Mode,
  pub action: Action,
  pub delimiter: char,
  pub selection: Selection,

  /// Text that was killed or copied.
  pub text: String,
}

pub fn change_inner<S, E>(
  surface: &mut S,
  expander: &E,
  delimiter: char,
  invoke: InvokeMode,
  options: &Options,
) -> Result<Change, OhNo>
where
  S: Surface + ?Sized,
  E: Expander + ?Sized,
{
  change(surface, expander, delimiter, Mode::Inner, invoke, options)
}

pub fn change_outer<S, E>(
  surface: &mut S,
  expander: &E,
  delimiter: char,
  invoke: InvokeMode,
  options: &Options,
) -> Result<Change, OhNo>
where
  S: Surface + ?Sized,
  E: Expander + ?Sized,
{
  change(surface, expander, delimiter, Mode::Outer, invoke, options)
}

/// Find the region and apply the action matching `invoke` to it.
///
/// Nothing is changed on the surface if no region is found.
fn change<S, E>(
  surface: &mut S,
  expander: &E,
  delimiter: char,
  mode: Mode,
  invoke: InvokeMode,
  options: &Options,
) -> Result<Change, OhNo>
where
  S: Surface + ?Sized,
  E: Expander + ?Sized,
{
  let text = surface.text();
  let sel = find_region(
    expander,
    text,
    surface.cursor(),
    delimiter,
    mode,
    options.forward_on_miss,
  )?;
  let content = sel.slice(text).unwrap_or_default().to_owned();

  let action = invoke.action();
  log::debug!("{action:?} {mode:?} {delimiter}: {sel:?}");
  materialize(surface, sel, action, options);

  Ok(Change {
    mode,
    action,
    delimiter,
    selection: sel,
    text: content,
  })
}

fn materialize<S>(surface: &mut S, sel: Selection, action: Action, options: &Options)
where
  S: Surface + ?Sized,
{
  // an empty interior leaves the buffer and the register alone
  if sel.is_empty() {
    log::debug!("empty region at {}; nothing to do", sel.start);
    return;
  }

  match action {
    Action::Delete => surface.kill(sel),

    Action::CopyWithFlash => {
      surface.copy(sel);
      surface.flash(sel, &options.flash_face, options.flash_duration);
    }
  }
}

/// Region to change around `cursor`.
///
/// With `forward_on_miss`, a failed search is retried once from just after the next occurrence of `delimiter` on the
/// cursor line.
pub fn find_region<E>(
  expander: &E,
  text: &str,
  cursor: usize,
  delimiter: char,
  mode: Mode,
  forward_on_miss: bool,
) -> Result<Selection, OhNo>
where
  E: Expander + ?Sized,
{
  let err = match search(expander, text, cursor, delimiter, mode) {
    Err(err) if forward_on_miss => err,
    res => return res,
  };

  let Some(next) = next_on_line(text, cursor, delimiter) else {
    return Err(err);
  };

  log::debug!("no enclosing {delimiter}; retrying from {next}");
  search(expander, text, next, delimiter, mode)
}

/// Grow a selection from `cursor` until its start is `delimiter`.
fn search<E>(
  expander: &E,
  text: &str,
  cursor: usize,
  delimiter: char,
  mode: Mode,
) -> Result<Selection, OhNo>
where
  E: Expander + ?Sized,
{
  let no_match = || OhNo::NoMatchingUnit { delimiter };
  let point = Selection::point(cursor);
  let on_delimiter = char_at(text, cursor) == Some(delimiter);

  // a quote under the cursor may close its string rather than open it
  let closing = on_delimiter
    && expander
      .expand(text, point)
      .is_some_and(|unit| unit.ends_at(&point));

  let start = match mode {
    // step inside the unit the delimiter opens
    Mode::Inner if on_delimiter && !closing => cursor + delimiter.len_utf8(),
    _ => cursor,
  };
  let mut expansion = Expansion::new(expander, text, Selection::point(start));

  // the point itself would match; start from the unit the delimiter opens or closes instead
  if (closing || (mode == Mode::Outer && on_delimiter)) && !expansion.expand() {
    return Err(no_match());
  }

  loop {
    let sel = expansion.current();
    log::trace!("trying {sel:?}");

    if sel.starts_with(text, delimiter) {
      break;
    }

    if sel.start == 0 || !expansion.expand() {
      return Err(no_match());
    }
  }

  match mode {
    Mode::Inner => Ok(expansion.contract()),
    Mode::Outer => Ok(expansion.current()),
  }
}

/// Offset right after the next `delimiter` following the cursor char, on the cursor line.
fn next_on_line(text: &str, cursor: usize, delimiter: char) -> Option<usize> {
  let from = cursor + char_at(text, cursor).map_or(0, char::len_utf8);
  let rest = text.get(from..)?;
  let line = &rest[..rest.find('\n').unwrap_or(rest.len())];

  line
    .find(delimiter)
    .map(|i| from + i + delimiter.len_utf8())
}
