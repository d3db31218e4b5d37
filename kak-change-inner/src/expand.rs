//! Semantic-unit expansion.
//!
//! An [`Expander`] knows how to grow a selection to the next enclosing semantic unit (a word, a string, a bracketed
//! block, a syntax node, etc.). It holds no notion of a current selection: every call takes the selection to grow and
//! returns a new one. [`Expansion`] records the steps taken, so that contracting is exactly undoing the last step.

pub mod syntax;
pub mod text;

use crate::selection::Selection;

/// Grow selections to the next enclosing semantic unit.
pub trait Expander {
  /// Smallest unit strictly enclosing `sel` in `text`, if any.
  ///
  /// A point on a closing delimiter stands for the end of the interior it closes: that interior is the first unit.
  ///
  /// `text` must be the text the expander was built for.
  fn expand(&self, text: &str, sel: Selection) -> Option<Selection>;
}

/// A chain of expansions, starting from an initial selection.
pub struct Expansion<'a, E: ?Sized> {
  expander: &'a E,
  text: &'a str,
  steps: Vec<Selection>,
  current: Selection,
}

impl<'a, E> Expansion<'a, E>
where
  E: Expander + ?Sized,
{
  pub fn new(expander: &'a E, text: &'a str, start: Selection) -> Self {
    Self {
      expander,
      text,
      steps: Vec::new(),
      current: start,
    }
  }

  pub fn current(&self) -> Selection {
    self.current
  }

  /// Grow the current selection by one unit.
  ///
  /// Return `false` when no larger unit exists. An expander answering with something that does not strictly enclose
  /// the current selection is treated the same way, so that a chain always terminates. The only exception is the first
  /// step from a point on a closing delimiter, which may yield the interior ending right there.
  pub fn expand(&mut self) -> bool {
    let Some(next) = self.expander.expand(self.text, self.current) else {
      return false;
    };

    if !next.encloses(&self.current) && !next.ends_at(&self.current) {
      log::warn!(
        "expander returned {next:?}, which does not enclose {current:?}",
        current = self.current
      );
      return false;
    }

    self.steps.push(self.current);
    self.current = next;
    true
  }

  /// Undo the last expansion; no-op when nothing was expanded.
  pub fn contract(&mut self) -> Selection {
    if let Some(prev) = self.steps.pop() {
      self.current = prev;
    }

    self.current
  }
}
