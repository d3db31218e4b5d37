//! Kakoune buffers, edited by sending commands back to Kakoune.

use std::time::Duration;

use crate::{
  error::OhNo,
  kakoune::selection::{Pos, Sel},
  protocol::response::{Payload, Response},
  selection::Selection,
  surface::Surface,
};

/// Snapshot of a Kakoune buffer.
///
/// Edits are applied to the snapshot and recorded as commands, to be evaluated by Kakoune afterwards.
#[derive(Debug)]
pub struct KakouneBuffer {
  text: String,
  cursor: usize,
  response: Response,
}

impl KakouneBuffer {
  pub fn new(text: impl Into<String>, cursor: Pos) -> Result<Self, OhNo> {
    let text = text.into();
    let offset = cursor.to_offset(&text).ok_or_else(|| OhNo::InvalidCursor {
      cursor: cursor.to_kak_str(),
      err: "outside of the buffer".to_owned(),
    })?;

    Ok(Self {
      text,
      cursor: offset,
      response: Response::default(),
    })
  }

  pub fn into_response(self) -> Response {
    self.response
  }

  fn select(&mut self, sel: Selection) -> Option<Sel> {
    let kak_sel = Sel::from_selection(&self.text, sel);
    if kak_sel.is_none() {
      log::warn!("cannot select {sel:?} in Kakoune");
    }

    kak_sel
  }
}

impl Surface for KakouneBuffer {
  fn text(&self) -> &str {
    &self.text
  }

  fn cursor(&self) -> usize {
    self.cursor
  }

  fn kill(&mut self, sel: Selection) {
    let Some(kak_sel) = self.select(sel) else {
      return;
    };

    let killed: String = self.text.drain(sel.start..sel.end).collect();
    self.cursor = sel.start;

    self.response.push(Payload::Select {
      sels: vec![kak_sel],
    });
    self.response.push(Payload::SetRegister { content: killed });
    self.response.push(Payload::DeleteSelections);
  }

  fn copy(&mut self, sel: Selection) {
    if let Some(content) = sel.slice(&self.text) {
      let content = content.to_owned();
      self.response.push(Payload::SetRegister { content });
    }
  }

  fn flash(&mut self, sel: Selection, face: &str, duration: Duration) {
    let Some(range) = self.select(sel) else {
      return;
    };

    self.response.push(Payload::Flash {
      range,
      face: face.to_owned(),
      duration,
    });
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::KakouneBuffer;
  use crate::{
    change::{change_inner, change_outer, InvokeMode, Options},
    error::OhNo,
    expand::text::TextExpander,
    kakoune::selection::Pos,
    protocol::response::Payload,
    surface::Surface,
  };

  const TEXT: &str = "let s = \"semantic kill\";\n";

  #[test]
  fn invalid_cursor() {
    assert!(matches!(
      KakouneBuffer::new(TEXT, Pos { line: 3, col: 1 }),
      Err(OhNo::InvalidCursor { cursor, .. }) if cursor == "3.1"
    ));
  }

  #[test]
  fn kill_selects_then_deletes() {
    let mut buf = KakouneBuffer::new(TEXT, Pos { line: 1, col: 12 }).unwrap();
    let expander = TextExpander::new(TEXT);
    change_inner(
      &mut buf,
      &expander,
      '"',
      InvokeMode::Primary,
      &Options::default(),
    )
    .unwrap();

    assert_eq!(buf.text(), "let s = \"\";\n");
    assert_eq!(
      buf.into_response().to_kak().as_deref(),
      Some("select 1.10,1.22\nset-register dquote 'semantic kill'\nexecute-keys <a-d>")
    );
  }

  #[test]
  fn copy_sets_register_then_flashes() {
    let mut buf = KakouneBuffer::new(TEXT, Pos { line: 1, col: 12 }).unwrap();
    let expander = TextExpander::new(TEXT);
    let options = Options {
      flash_duration: Duration::from_millis(300),
      ..Options::default()
    };
    change_outer(&mut buf, &expander, '"', InvokeMode::Alternate, &options).unwrap();

    assert_eq!(buf.text(), TEXT);

    let resp = buf.into_response();
    let payloads = resp.payloads();
    assert_eq!(
      payloads[0],
      Payload::SetRegister {
        content: "\"semantic kill\"".to_owned()
      }
    );
    assert!(matches!(
      &payloads[1],
      Payload::Flash { range, face, duration }
        if range.to_kak_str() == "1.9,1.23"
          && face == "ChangeInnerFlash"
          && *duration == Duration::from_millis(300)
    ));
  }
}
