//! Editing surfaces.
//!
//! A surface is whatever owns the buffer being edited: an in-memory [`Document`](crate::document::Document), or a
//! Kakoune buffer driven by commands ([`KakouneBuffer`](crate::kakoune::buffer::KakouneBuffer)). Changes only go
//! through this interface.

use std::time::Duration;

use crate::selection::Selection;

pub trait Surface {
  /// Content of the buffer.
  fn text(&self) -> &str;

  /// Byte offset of the cursor.
  fn cursor(&self) -> usize;

  /// Remove `sel` from the buffer, moving its text to the default register.
  fn kill(&mut self, sel: Selection);

  /// Copy the text of `sel` to the default register, leaving the buffer as is.
  fn copy(&mut self, sel: Selection);

  /// Highlight `sel` with `face` for `duration`.
  ///
  /// Must return right away; removing the highlight is done later on.
  fn flash(&mut self, sel: Selection, face: &str, duration: Duration);
}

/// The default register, holding the last killed or copied text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Register {
  content: Option<String>,
}

impl Register {
  pub fn set(&mut self, content: impl Into<String>) {
    self.content = Some(content.into());
  }

  pub fn get(&self) -> Option<&str> {
    self.content.as_deref()
  }
}
