//! Byte-offset selections over a buffer, and the boundary matcher used by the search.

use serde::Serialize;

/// A half-open `[start, end)` span of a buffer, in bytes.
///
/// Both offsets are on char boundaries and `start <= end`. A selection with `start == end` is a point (a collapsed
/// cursor).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Selection {
  pub start: usize,
  pub end: usize,
}

impl Selection {
  pub fn new(start: usize, end: usize) -> Self {
    debug_assert!(start <= end, "selection start {start} after its end {end}");
    Self { start, end }
  }

  /// Collapsed selection at `offset`.
  pub fn point(offset: usize) -> Self {
    Self {
      start: offset,
      end: offset,
    }
  }

  /// Selection spanning all of `text`.
  pub fn whole(text: &str) -> Self {
    Self::new(0, text.len())
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  pub fn len(&self) -> usize {
    self.end - self.start
  }

  /// Whether this selection strictly grows `other`.
  ///
  /// A point is enclosed by a selection covering the char right after it; a non-empty selection is enclosed by any
  /// other selection covering it entirely.
  pub fn encloses(&self, other: &Selection) -> bool {
    if self == other {
      return false;
    }

    if other.is_empty() {
      self.start <= other.start && other.start < self.end
    } else {
      self.start <= other.start && other.end <= self.end
    }
  }

  /// Whether `other` is a point right at the end of this non-empty selection.
  ///
  /// This is where the cursor is when it rests on the delimiter closing an interior.
  pub fn ends_at(&self, other: &Selection) -> bool {
    other.is_empty() && !self.is_empty() && self.end == other.start
  }

  /// Whether the text at the start of the selection begins with `delimiter`.
  pub fn starts_with(&self, text: &str, delimiter: char) -> bool {
    text
      .get(self.start..)
      .is_some_and(|rest| rest.starts_with(delimiter))
  }

  /// Text covered by the selection, if the selection fits `text`.
  pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
    text.get(self.start..self.end)
  }
}

/// Char starting at `offset`, if any.
pub fn char_at(text: &str, offset: usize) -> Option<char> {
  text.get(offset..)?.chars().next()
}

#[cfg(test)]
mod tests {
  use super::{char_at, Selection};

  #[test]
  fn point_enclosure() {
    let p = Selection::point(3);

    assert!(Selection::new(3, 4).encloses(&p));
    assert!(Selection::new(0, 10).encloses(&p));
    assert!(!Selection::new(0, 3).encloses(&p));
    assert!(!Selection::new(4, 8).encloses(&p));
    assert!(!p.encloses(&p));
  }

  #[test]
  fn range_enclosure() {
    let sel = Selection::new(2, 5);

    assert!(Selection::new(2, 6).encloses(&sel));
    assert!(Selection::new(1, 5).encloses(&sel));
    assert!(!Selection::new(2, 5).encloses(&sel));
    assert!(!Selection::new(3, 8).encloses(&sel));
  }

  #[test]
  fn interior_ending_at_point() {
    let p = Selection::point(4);

    assert!(Selection::new(2, 4).ends_at(&p));
    assert!(!Selection::new(2, 5).ends_at(&p));
    assert!(!Selection::point(4).ends_at(&p));
    assert!(!Selection::new(2, 4).ends_at(&Selection::new(4, 5)));
  }

  #[test]
  fn boundary_matching() {
    let text = r#"f("é")"#;

    assert!(Selection::new(1, 7).starts_with(text, '('));
    assert!(Selection::point(2).starts_with(text, '"'));
    assert!(!Selection::point(0).starts_with(text, '('));
    assert!(!Selection::point(text.len()).starts_with(text, ')'));

    // in the middle of a multi-byte char
    assert!(!Selection::point(4).starts_with(text, '"'));
  }

  #[test]
  fn chars_at_offsets() {
    let text = "aé!";

    assert_eq!(char_at(text, 0), Some('a'));
    assert_eq!(char_at(text, 1), Some('é'));
    assert_eq!(char_at(text, 3), Some('!'));
    assert_eq!(char_at(text, 4), None);
    assert_eq!(Selection::new(1, 3).slice(text), Some("é"));
  }
}
