//! Tree-sitter grammars, loaded at runtime from shared objects.

use std::path::Path;

use kak_change_inner_config::Config;
use libloading::Symbol;

use crate::error::OhNo;

/// A loaded grammar.
pub struct Grammar {
  lang: tree_sitter::Language,

  // the language points into the library; it must stay loaded as long as the language is used
  _lib: libloading::Library,
}

impl Grammar {
  pub fn lang(&self) -> tree_sitter::Language {
    self.lang
  }

  /// Load the grammar of a filetype, as configured.
  ///
  /// Return [`None`] if no grammar is installed for that filetype.
  pub fn load_for_filetype(config: &Config, filetype: &str) -> Result<Option<Self>, OhNo> {
    let Some(path) = config
      .languages
      .get_grammar_path(&config.grammars, filetype)
    else {
      return Ok(None);
    };

    if !path.exists() {
      log::debug!("no grammar for {filetype} at {}", path.display());
      return Ok(None);
    }

    let symbol = config.languages.get_grammar_symbol(filetype);
    log::info!("loading {filetype} grammar: {} ({symbol})", path.display());

    Self::load(filetype, &path, &symbol).map(Some)
  }

  /// Load a grammar from `path`, looking up the `symbol` constructor.
  pub fn load(lang: &str, path: &Path, symbol: &str) -> Result<Self, OhNo> {
    let lib = unsafe { libloading::Library::new(path) };
    let lib = lib.map_err(|err| OhNo::CannotLoadGrammar {
      lang: lang.to_owned(),
      err: err.to_string(),
    })?;

    let ctor: Result<Symbol<unsafe extern "C" fn() -> tree_sitter::Language>, _> =
      unsafe { lib.get(symbol.as_bytes()) };
    let ctor = ctor.map_err(|err| OhNo::CannotLoadGrammar {
      lang: lang.to_owned(),
      err: format!("cannot find language: {err}"),
    })?;
    let lang = unsafe { ctor() };

    Ok(Self { lang, _lib: lib })
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use kak_change_inner_config::Config;

  use super::Grammar;
  use crate::error::OhNo;

  #[test]
  fn missing_library() {
    let res = Grammar::load("nope", Path::new("/does/not/exist/nope.so"), "tree_sitter_nope");
    assert!(matches!(res, Err(OhNo::CannotLoadGrammar { lang, .. }) if lang == "nope"));
  }

  #[test]
  fn missing_grammar_is_not_an_error() {
    let mut config = Config::load_default_config().unwrap();
    config.grammars.path = Some("/does/not/exist".into());

    assert!(matches!(
      Grammar::load_for_filetype(&config, "rust"),
      Ok(None)
    ));
  }
}
