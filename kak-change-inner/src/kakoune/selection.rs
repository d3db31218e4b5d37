//! Selections as recognized by Kakoune, and their conversion from / to byte offsets.

use crate::selection::Selection;

/// A single position in a buffer.
///
/// Kakoune positions are _1-based_, and columns are counted in bytes.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Pos {
  pub line: usize,
  pub col: usize,
}

impl Pos {
  /// Read a [`Pos`] from Kakoune-formatted string; i.e. <line>.<col>.
  ///
  /// Return [`None`] if parsing failed.
  pub fn parse_kak_str(s: &str) -> Option<Self> {
    let (line, col) = s.split_once('.')?;
    let line = line.parse().ok()?;
    let col = col.parse().ok()?;

    Some(Self { line, col })
  }

  pub fn to_kak_str(&self) -> String {
    format!("{}.{}", self.line, self.col)
  }

  /// Position of the byte at `offset` in `text`.
  pub fn from_offset(text: &str, offset: usize) -> Self {
    let before = &text[..offset];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);

    Self {
      line: before.matches('\n').count() + 1,
      col: offset - line_start + 1,
    }
  }

  /// Byte offset of this position in `text`.
  ///
  /// The end of a line (where its newline is, if any) is a valid position. Return [`None`] if the position is outside
  /// of `text` or in the middle of a char.
  pub fn to_offset(&self, text: &str) -> Option<usize> {
    if self.line == 0 || self.col == 0 {
      return None;
    }

    let line_start = if self.line == 1 {
      0
    } else {
      text.match_indices('\n').nth(self.line - 2)?.0 + 1
    };
    let line_len = text[line_start..]
      .find('\n')
      .unwrap_or(text.len() - line_start);

    let offset = line_start + self.col - 1;
    (self.col - 1 <= line_len && text.is_char_boundary(offset)).then_some(offset)
  }
}

/// A single Kakoune selection, containing an anchor and a cursor.
///
/// Kakoune selections are always inclusive, while [`Selection`] is exclusive on its end boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sel {
  pub anchor: Pos,
  pub cursor: Pos,
}

impl Sel {
  /// Kakoune selection covering `sel` in `text`, with the anchor first.
  ///
  /// Kakoune cannot select nothing, so [`None`] is returned for an empty selection.
  pub fn from_selection(text: &str, sel: Selection) -> Option<Self> {
    let last = sel.slice(text)?.chars().next_back()?;

    Some(Self {
      anchor: Pos::from_offset(text, sel.start),
      cursor: Pos::from_offset(text, sel.end - last.len_utf8()),
    })
  }

  /// Kakoune string representation.
  ///
  /// The anchor always come first; then the cursor.
  pub fn to_kak_str(&self) -> String {
    format!(
      "{anchor_line}.{anchor_col},{cursor_line}.{cursor_col}",
      anchor_line = self.anchor.line,
      anchor_col = self.anchor.col,
      cursor_line = self.cursor.line,
      cursor_col = self.cursor.col
    )
  }
}

#[cfg(test)]
mod tests {
  use super::{Pos, Sel};
  use crate::selection::Selection;

  const TEXT: &str = "fn f() {\n  \"été\"\n}\n";

  #[test]
  fn pos_parsing() {
    assert_eq!(
      Pos::parse_kak_str("123.456"),
      Some(Pos {
        line: 123,
        col: 456
      })
    );
    assert_eq!(Pos::parse_kak_str("123"), None);
    assert_eq!(Pos::parse_kak_str("1.x"), None);
  }

  #[test]
  fn offsets() {
    let quote = TEXT.find('"').unwrap();
    let pos = Pos::from_offset(TEXT, quote);

    assert_eq!(pos, Pos { line: 2, col: 3 });
    assert_eq!(pos.to_offset(TEXT), Some(quote));
    assert_eq!(Pos { line: 1, col: 1 }.to_offset(TEXT), Some(0));

    // on the newline
    assert_eq!(Pos { line: 1, col: 9 }.to_offset(TEXT), Some(8));
    assert_eq!(Pos { line: 1, col: 10 }.to_offset(TEXT), None);

    // inside é
    assert_eq!(Pos { line: 2, col: 5 }.to_offset(TEXT), None);

    assert_eq!(Pos { line: 0, col: 1 }.to_offset(TEXT), None);
    assert_eq!(Pos { line: 9, col: 1 }.to_offset(TEXT), None);
  }

  #[test]
  fn inclusive_selections() {
    let start = TEXT.find('é').unwrap();
    let sel = Selection::new(start, start + "été".len());
    let kak_sel = Sel::from_selection(TEXT, sel).unwrap();

    // the last é starts two bytes before the end
    assert_eq!(kak_sel.to_kak_str(), "2.4,2.7");
    assert_eq!(Sel::from_selection(TEXT, Selection::point(start)), None);
  }
}
