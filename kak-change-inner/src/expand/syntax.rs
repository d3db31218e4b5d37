//! Tree-sitter driven expansion.
//!
//! Expanding walks from the smallest node covering the selection up to the root. A node surrounded by a pair of
//! anonymous delimiter children (quotes, brackets) first yields its interior, then the node itself.

use tree_sitter::{Language, Node, Parser, Tree};

use super::Expander;
use crate::{
  error::OhNo,
  selection::{char_at, Selection},
};

/// Opening / closing delimiters whose interior is a unit on its own.
const PAIRS: &[(&str, &str)] = &[
  ("\"", "\""),
  ("'", "'"),
  ("`", "`"),
  ("(", ")"),
  ("[", "]"),
  ("{", "}"),
  ("<", ">"),
  ("|", "|"),
];

/// Expander backed by a tree-sitter tree.
pub struct SyntaxExpander {
  tree: Tree,
}

impl SyntaxExpander {
  /// Parse `text` with `lang`.
  pub fn new(lang: Language, text: &str) -> Result<Self, OhNo> {
    let mut parser = Parser::new();
    parser.set_language(lang)?;

    let tree = parser
      .parse(text.as_bytes(), None)
      .ok_or(OhNo::CannotParseBuffer)?;

    log::trace!("parsed buffer: {}", tree.root_node().to_sexp());
    Ok(Self { tree })
  }

  /// Interior of a delimited node, if the node is delimited.
  fn interior(node: &Node) -> Option<Selection> {
    let count = node.child_count();
    if count < 2 {
      return None;
    }

    let open = node.child(0)?;
    let close = node.child(count - 1)?;

    if open.is_named() || close.is_named() || open.end_byte() > close.start_byte() {
      return None;
    }

    PAIRS
      .iter()
      .any(|&(o, c)| open.kind() == o && close.kind() == c)
      .then(|| Selection::new(open.end_byte(), close.start_byte()))
  }
}

impl Expander for SyntaxExpander {
  fn expand(&self, text: &str, sel: Selection) -> Option<Selection> {
    // a point stands for the char under the cursor
    let end = match char_at(text, sel.start) {
      Some(c) if sel.is_empty() => sel.start + c.len_utf8(),
      _ => sel.end,
    };
    let mut node = self
      .tree
      .root_node()
      .descendant_for_byte_range(sel.start, end);

    // delimiter tokens are not units; start from the node they delimit
    if let Some(token) = node.filter(|n| !n.is_named() && n.child_count() == 0) {
      node = token.parent().or(node);
    }

    // on a closing delimiter
    if let Some(interior) = node
      .as_ref()
      .and_then(Self::interior)
      .filter(|interior| interior.ends_at(&sel))
    {
      return Some(interior);
    }

    while let Some(n) = node {
      let outer = Selection::new(n.start_byte(), n.end_byte());
      let found = Self::interior(&n)
        .into_iter()
        .chain(Some(outer))
        .find(|unit| unit.encloses(&sel));

      if found.is_some() {
        log::trace!("expanding {sel:?} with {kind}", kind = n.kind());
        return found;
      }

      node = n.parent();
    }

    let whole = Selection::whole(text);
    whole.encloses(&sel).then_some(whole)
  }
}
