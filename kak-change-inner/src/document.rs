//! In-memory editing surface.

use std::time::Duration;

use crate::{
  flash::Overlays,
  selection::Selection,
  surface::{Register, Surface},
};

/// A buffer held in memory, with its cursor, its default register and its highlights.
#[derive(Debug, Default)]
pub struct Document {
  text: String,
  cursor: usize,
  register: Register,
  overlays: Overlays,
}

impl Document {
  /// Create a document with the cursor at byte `cursor`.
  ///
  /// The cursor is clamped to the buffer and moved back to the closest char boundary.
  pub fn new(text: impl Into<String>, cursor: usize) -> Self {
    let text = text.into();
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
      cursor -= 1;
    }

    Self {
      text,
      cursor,
      ..Self::default()
    }
  }

  pub fn register(&self) -> &Register {
    &self.register
  }

  pub fn overlays(&self) -> &Overlays {
    &self.overlays
  }

  pub fn into_text(self) -> String {
    self.text
  }
}

impl Surface for Document {
  fn text(&self) -> &str {
    &self.text
  }

  fn cursor(&self) -> usize {
    self.cursor
  }

  fn kill(&mut self, sel: Selection) {
    let killed: String = self.text.drain(sel.start..sel.end).collect();
    log::debug!("killed {} bytes at {}", killed.len(), sel.start);

    self.register.set(killed);
    self.cursor = sel.start;
  }

  fn copy(&mut self, sel: Selection) {
    if let Some(content) = sel.slice(&self.text) {
      self.register.set(content);
    }
  }

  fn flash(&mut self, sel: Selection, face: &str, duration: Duration) {
    // detached; the overlay table is shared with the timer
    let _ = self.overlays.flash(sel, face, duration);
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::Document;
  use crate::{selection::Selection, surface::Surface};

  #[test]
  fn cursor_is_clamped() {
    assert_eq!(Document::new("abc", 10).cursor(), 3);
    assert_eq!(Document::new("é", 1).cursor(), 0);
  }

  #[test]
  fn kill_moves_text_to_register() {
    let mut doc = Document::new("a(bc)d", 3);
    doc.kill(Selection::new(2, 4));

    assert_eq!(doc.text(), "a()d");
    assert_eq!(doc.cursor(), 2);
    assert_eq!(doc.register().get(), Some("bc"));
  }

  #[test]
  fn copy_and_flash_keep_text() {
    let mut doc = Document::new("a(bc)d", 3);
    doc.copy(Selection::new(1, 5));
    doc.flash(Selection::new(1, 5), "Flash", Duration::from_secs(10));

    assert_eq!(doc.text(), "a(bc)d");
    assert_eq!(doc.cursor(), 3);
    assert_eq!(doc.register().get(), Some("(bc)"));
    assert_eq!(doc.overlays().active()[0].sel, Selection::new(1, 5));
  }
}
