//! Commands sent back to Kakoune.

use std::time::Duration;

use itertools::Itertools;

use crate::kakoune::selection::Sel;

/// Name of the highlighter used to flash regions.
pub const FLASH_HIGHLIGHTER: &str = "window/change-inner-flash";

/// `range-specs` option holding the flashed region.
pub const FLASH_OPTION: &str = "change_inner_flash";

/// Response sent to Kakoune.
///
/// The response is printed on stdout and evaluated by the calling client.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Response {
  payloads: Vec<Payload>,
}

impl Response {
  pub fn push(&mut self, payload: Payload) {
    self.payloads.push(payload);
  }

  pub fn payloads(&self) -> &[Payload] {
    &self.payloads
  }

  pub fn to_kak(&self) -> Option<String> {
    // empty payload means no response
    if self.payloads.is_empty() {
      return None;
    }

    Some(self.payloads.iter().map(Payload::to_kak).join("\n"))
  }
}

/// Response payload.
#[derive(Debug, Eq, PartialEq)]
pub enum Payload {
  /// Replace the selections.
  Select { sels: Vec<Sel> },

  /// Set the default register.
  SetRegister { content: String },

  /// Delete the selections, without touching registers.
  DeleteSelections,

  /// Highlight a range for a while.
  ///
  /// The highlighter is removed by a shell job sending a command back to the session once the duration is over.
  Flash {
    range: Sel,
    face: String,
    duration: Duration,
  },

  /// Report an error to the user.
  Fail { message: String },
}

impl Payload {
  pub fn to_kak(&self) -> String {
    match self {
      Payload::Select { sels } => {
        let sels_str = sels.iter().map(|sel| sel.to_kak_str()).join(" ");
        format!("select {sels_str}")
      }

      Payload::SetRegister { content } => format!("set-register dquote {}", quote(content)),

      Payload::DeleteSelections => "execute-keys <a-d>".to_owned(),

      Payload::Flash {
        range,
        face,
        duration,
      } => {
        let range_str = quote(&format!("{}|{face}", range.to_kak_str()));
        let secs = format!("{}.{:03}", duration.as_secs(), duration.subsec_millis());

        [
          format!("set-option window {FLASH_OPTION} %val{{timestamp}} {range_str}"),
          format!("add-highlighter -override {FLASH_HIGHLIGHTER} ranges {FLASH_OPTION}"),
          format!(
            r#"nop %sh{{ {{ sleep {secs}; printf 'evaluate-commands -client %s remove-highlighter {FLASH_HIGHLIGHTER}\n' "$kak_client" | kak -p "$kak_session"; }} >/dev/null 2>&1 </dev/null & }}"#
          ),
        ]
        .join("\n")
      }

      Payload::Fail { message } => format!("fail {}", quote(message)),
    }
  }
}

/// Quote a string so that Kakoune reads it as a single word, verbatim.
pub fn quote(s: &str) -> String {
  format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::{quote, Payload, Response};
  use crate::kakoune::selection::{Pos, Sel};

  fn sel() -> Sel {
    Sel {
      anchor: Pos { line: 1, col: 5 },
      cursor: Pos { line: 2, col: 1 },
    }
  }

  #[test]
  fn quoting() {
    assert_eq!(quote("abc"), "'abc'");
    assert_eq!(quote("it's"), "'it''s'");
    assert_eq!(quote(""), "''");
  }

  #[test]
  fn empty_response() {
    assert_eq!(Response::default().to_kak(), None);
  }

  #[test]
  fn kill_commands() {
    let mut resp = Response::default();
    resp.push(Payload::Select { sels: vec![sel()] });
    resp.push(Payload::SetRegister {
      content: "a 'b'".to_owned(),
    });
    resp.push(Payload::DeleteSelections);

    assert_eq!(
      resp.to_kak().as_deref(),
      Some("select 1.5,2.1\nset-register dquote 'a ''b'''\nexecute-keys <a-d>")
    );
  }

  #[test]
  fn flash_commands() {
    let flash = Payload::Flash {
      range: sel(),
      face: "ChangeInnerFlash".to_owned(),
      duration: Duration::from_millis(200),
    };
    let kak = flash.to_kak();
    let lines: Vec<_> = kak.lines().collect();

    assert_eq!(
      lines[0],
      "set-option window change_inner_flash %val{timestamp} '1.5,2.1|ChangeInnerFlash'"
    );
    assert_eq!(
      lines[1],
      "add-highlighter -override window/change-inner-flash ranges change_inner_flash"
    );
    assert!(lines[2].starts_with("nop %sh{ { sleep 0.200; "));
    assert!(lines[2].ends_with("& }"));
  }

  #[test]
  fn fail_command() {
    let fail = Payload::Fail {
      message: "no enclosing unit starts with '['".to_owned(),
    };

    assert_eq!(fail.to_kak(), "fail 'no enclosing unit starts with ''['''");
  }
}
