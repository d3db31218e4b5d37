//! Grammar-agnostic expansion over plain text.
//!
//! Units, from the smallest: words, the inside of a quoted string, the quoted string, the inside of a bracket pair, the
//! bracket pair, and finally the whole buffer. Strings and bracket pairs are found once, when the expander is built;
//! words are looked up on demand on the line of the selection.

use unicode_segmentation::UnicodeSegmentation;

use super::Expander;
use crate::selection::Selection;

/// Plain-text expander, for buffers without a known grammar.
#[derive(Debug)]
pub struct TextExpander {
  /// Strings and bracket pairs, both inside and outside.
  spans: Vec<Selection>,

  /// Non-empty insides only.
  interiors: Vec<Selection>,
}

impl TextExpander {
  pub fn new(text: &str) -> Self {
    let mut spans = Vec::new();
    let mut interiors = Vec::new();
    let mut opened: Vec<(char, usize)> = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
      match c {
        '"' | '\'' | '`' => {
          let Some(close) = closing_quote(text, i, c) else {
            continue;
          };

          let inside = Selection::new(i + 1, close);
          spans.push(inside);
          spans.push(Selection::new(i, close + 1));
          if !inside.is_empty() {
            interiors.push(inside);
          }

          // brackets inside strings do not count
          while chars.next_if(|&(j, _)| j <= close).is_some() {}
        }

        '(' | '[' | '{' => opened.push((c, i)),

        ')' | ']' | '}' => {
          let open = opening_bracket(c);
          if let Some(idx) = opened.iter().rposition(|&(o, _)| o == open) {
            let (_, start) = opened[idx];
            opened.truncate(idx);

            let inside = Selection::new(start + 1, i);
            spans.push(inside);
            spans.push(Selection::new(start, i + 1));
            if !inside.is_empty() {
              interiors.push(inside);
            }
          }
        }

        _ => (),
      }
    }

    log::trace!("found {} string / bracket units", spans.len());
    Self { spans, interiors }
  }

  /// Word enclosing `sel`, looked up on the line where `sel` starts.
  fn word(text: &str, sel: Selection) -> Option<Selection> {
    let line_start = text[..sel.start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[sel.start..]
      .find('\n')
      .map_or(text.len(), |i| sel.start + i);

    text[line_start..line_end]
      .split_word_bound_indices()
      .filter(|(_, word)| word.chars().any(|c| c.is_alphanumeric() || c == '_'))
      .map(|(i, word)| Selection::new(line_start + i, line_start + i + word.len()))
      .find(|word| word.encloses(&sel))
  }
}

impl Expander for TextExpander {
  fn expand(&self, text: &str, sel: Selection) -> Option<Selection> {
    // on a closing delimiter
    if let Some(interior) = self.interiors.iter().find(|interior| interior.ends_at(&sel)) {
      return Some(*interior);
    }

    Self::word(text, sel)
      .into_iter()
      .chain(self.spans.iter().copied())
      .filter(|span| span.encloses(&sel))
      .min_by_key(|span| (span.len(), span.start))
      .or_else(|| {
        let whole = Selection::whole(text);
        whole.encloses(&sel).then_some(whole)
      })
  }
}

/// Offset of the quote closing the string opened at `open`.
///
/// Backslashes escape the next char. Single-quoted strings stop at the end of the line, so that apostrophes in prose
/// do not swallow the rest of the buffer.
fn closing_quote(text: &str, open: usize, quote: char) -> Option<usize> {
  let mut chars = text[open + quote.len_utf8()..].char_indices();

  while let Some((i, c)) = chars.next() {
    match c {
      '\\' => {
        chars.next();
      }

      '\n' if quote == '\'' => return None,

      c if c == quote => return Some(open + quote.len_utf8() + i),

      _ => (),
    }
  }

  None
}

fn opening_bracket(close: char) -> char {
  match close {
    ')' => '(',
    ']' => '[',
    _ => '{',
  }
}

#[cfg(test)]
mod tests {
  use super::TextExpander;
  use crate::{
    expand::{Expander, Expansion},
    selection::Selection,
  };

  const TEXT: &str = r#"function test() { return "semantic kill"; }"#;

  fn span_of(text: &str, needle: &str) -> Selection {
    let start = text.find(needle).unwrap();
    Selection::new(start, start + needle.len())
  }

  /// Every unit visited when expanding from `start` until the whole buffer.
  fn ladder(text: &str, start: Selection) -> Vec<&str> {
    let expander = TextExpander::new(text);
    let mut expansion = Expansion::new(&expander, text, start);
    let mut units = Vec::new();

    while expansion.expand() {
      units.push(expansion.current().slice(text).unwrap());
    }

    units
  }

  #[test]
  fn ladder_from_word() {
    let cursor = TEXT.find("mantic").unwrap();

    assert_eq!(
      ladder(TEXT, Selection::point(cursor)),
      vec![
        "semantic",
        "semantic kill",
        r#""semantic kill""#,
        r#" return "semantic kill"; "#,
        r#"{ return "semantic kill"; }"#,
        TEXT,
      ]
    );
  }

  #[test]
  fn point_on_opening_quote() {
    let expander = TextExpander::new(TEXT);
    let quote = TEXT.find('"').unwrap();

    assert_eq!(
      expander.expand(TEXT, Selection::point(quote)),
      Some(span_of(TEXT, r#""semantic kill""#))
    );
  }

  #[test]
  fn brackets_inside_strings_are_ignored() {
    let text = r#"f(")", g)"#;
    let expander = TextExpander::new(text);
    let cursor = text.find('g').unwrap();

    assert_eq!(
      expander.expand(text, Selection::new(cursor, cursor + 1)),
      Some(span_of(text, r#"")", g"#))
    );
  }

  #[test]
  fn point_on_closing_bracket() {
    let text = "f(ab)";
    let expander = TextExpander::new(text);
    let close = text.find(')').unwrap();

    assert_eq!(
      ladder(text, Selection::point(close)),
      vec!["ab", "(ab)", text]
    );

    // nothing inside
    let text = "f()";
    let close = text.find(')').unwrap();
    assert_eq!(
      TextExpander::new(text).expand(text, Selection::point(close)),
      Some(Selection::new(1, 3))
    );
    assert_eq!(
      expander.expand("f(ab)", Selection::new(2, 4)),
      Some(Selection::new(1, 5))
    );
  }

  #[test]
  fn escaped_quotes() {
    let text = r#"x = "a \" b";"#;
    let expander = TextExpander::new(text);
    let cursor = text.find('b').unwrap();

    assert_eq!(
      expander.expand(text, Selection::new(cursor, cursor + 1)),
      Some(span_of(text, r#"a \" b"#))
    );
  }

  #[test]
  fn apostrophes_stay_on_their_line() {
    let text = "don't\n(x)";
    let expander = TextExpander::new(text);
    let cursor = text.find('x').unwrap();

    assert_eq!(
      expander.expand(text, Selection::new(cursor, cursor + 1)),
      Some(Selection::new(cursor - 1, cursor + 2))
    );
  }

  #[test]
  fn nested_pairs() {
    let text = "f(a, g(b, c))";
    let cursor = text.find('b').unwrap();

    assert_eq!(
      ladder(text, Selection::point(cursor)),
      vec!["b", "b, c", "(b, c)", "a, g(b, c)", "(a, g(b, c))", text]
    );
  }

  #[test]
  fn whole_buffer_is_the_last_unit() {
    let text = "plain words";
    let expander = TextExpander::new(text);

    assert_eq!(
      expander.expand(text, Selection::new(0, 5)),
      Some(Selection::whole(text))
    );
    assert_eq!(expander.expand(text, Selection::whole(text)), None);
  }
}
