//! Kakoune integration.

pub mod buffer;
pub mod rc;
pub mod selection;

use crate::error::OhNo;

/// Kakoune names of keys that do not stand for themselves.
const KEY_NAMES: &[(&str, char)] = &[
  ("<lt>", '<'),
  ("<gt>", '>'),
  ("<minus>", '-'),
  ("<plus>", '+'),
  ("<semicolon>", ';'),
  ("<percent>", '%'),
  ("<space>", ' '),
];

/// Read a delimiter from a key, as reported by Kakoune in `%val{key}`.
pub fn parse_delimiter(key: &str) -> Result<char, OhNo> {
  if let Some(&(_, c)) = KEY_NAMES.iter().find(|(name, _)| *name == key) {
    return Ok(c);
  }

  let mut chars = key.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) => Ok(c),
    _ => Err(OhNo::InvalidDelimiter {
      key: key.to_owned(),
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::parse_delimiter;
  use crate::error::OhNo;

  #[test]
  fn delimiters() {
    assert_eq!(parse_delimiter("\"").unwrap(), '"');
    assert_eq!(parse_delimiter("(").unwrap(), '(');
    assert_eq!(parse_delimiter("é").unwrap(), 'é');
    assert_eq!(parse_delimiter("<lt>").unwrap(), '<');
    assert_eq!(parse_delimiter("<space>").unwrap(), ' ');

    assert!(matches!(
      parse_delimiter("<esc>"),
      Err(OhNo::InvalidDelimiter { key }) if key == "<esc>"
    ));
    assert!(parse_delimiter("").is_err());
  }
}
