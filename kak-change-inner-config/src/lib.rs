//! Configuration for the change-inner / change-outer commands.

pub mod error;

use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration object used by the commands.
///
/// User configuration being opt-in for every option, a different type is used, [`UserConfig`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Config {
  pub flash: FlashConfig,
  pub search: SearchConfig,

  #[serde(default)]
  pub grammars: GrammarsConfig,

  #[serde(flatten)]
  pub languages: LanguagesConfig,
}

impl Config {
  /// Default configuration using the `default-config.toml` file.
  const DEFAULT_CONFIG_CONTENT: &'static str = include_str!("../../default-config.toml");

  pub fn load_default_config() -> Result<Self, ConfigError> {
    log::debug!("loading default configuration");

    toml::from_str(Self::DEFAULT_CONFIG_CONTENT).map_err(|err| ConfigError::CannotParseConfig {
      err: err.to_string(),
    })
  }

  /// Load the default configuration, the user configuration, and merge both.
  pub fn load_default_user() -> Result<Self, ConfigError> {
    let mut config = Self::load_default_config()?;
    match UserConfig::load_from_xdg() {
      Ok(user_config) => {
        config.merge_user_config(user_config);
      }

      Err(err) => {
        log::warn!("cannot load user config: {err}");
      }
    }

    Ok(config)
  }

  /// Merge the config with a user-provided one.
  pub fn merge_user_config(&mut self, user_config: UserConfig) {
    if let Some(user_flash) = user_config.flash {
      self.flash.merge_user_config(user_flash);
    }

    if let Some(user_search) = user_config.search {
      self.search.merge_user_config(user_search);
    }

    if let Some(user_grammars) = user_config.grammars {
      self.grammars.merge_user_config(user_grammars);
    }

    if let Some(language) = user_config.language {
      self.languages.merge_user_config(language);
    }
  }
}

/// Flash configuration.
///
/// A flash is the short highlight shown over a region that was copied instead of deleted.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FlashConfig {
  /// How long the highlight stays, in milliseconds.
  pub duration_ms: u64,

  /// Face used to highlight the copied region.
  pub face: String,
}

impl FlashConfig {
  fn merge_user_config(&mut self, user_config: UserFlashConfig) {
    if let Some(duration_ms) = user_config.duration_ms {
      self.duration_ms = duration_ms;
    }

    if let Some(face) = user_config.face {
      self.face = face;
    }
  }
}

/// Search configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SearchConfig {
  /// When no enclosing unit matches, retry once from just after the next occurrence of the delimiter on the cursor
  /// line.
  pub forward_on_miss: bool,
}

impl SearchConfig {
  fn merge_user_config(&mut self, user_config: UserSearchConfig) {
    if let Some(forward_on_miss) = user_config.forward_on_miss {
      self.forward_on_miss = forward_on_miss;
    }
  }
}

/// Where compiled tree-sitter grammars live.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GrammarsConfig {
  /// Directory holding `<lang>.so` grammars.
  ///
  /// When absent, the grammars installed by kak-tree-sitter are used.
  pub path: Option<PathBuf>,
}

impl GrammarsConfig {
  fn merge_user_config(&mut self, user_config: GrammarsConfig) {
    if user_config.path.is_some() {
      self.path = user_config.path;
    }
  }

  /// Directory where grammars are looked up when nothing else is configured.
  pub fn default_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("kak-tree-sitter/grammars"))
  }
}

/// Languages configuration.
///
/// This is akin to a map from the language name and the language config ([`LanguageConfig`]).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LanguagesConfig {
  #[serde(default)]
  pub language: HashMap<String, LanguageConfig>,
}

impl LanguagesConfig {
  fn merge_user_config(&mut self, user_config: HashMap<String, LanguageConfig>) {
    for (lang, user_config) in user_config {
      self.language.entry(lang).or_default().merge_user_config(user_config);
    }
  }

  /// Get the configuration for `lang`.
  pub fn get_lang_conf(&self, lang: impl AsRef<str>) -> Option<&LanguageConfig> {
    self.language.get(lang.as_ref())
  }

  /// Get the grammar path for a given language.
  ///
  /// An explicit per-language path wins; otherwise `<lang>.so` is looked up in the configured grammars directory, and
  /// then in the default one.
  pub fn get_grammar_path(&self, grammars: &GrammarsConfig, lang: impl AsRef<str>) -> Option<PathBuf> {
    let lang = lang.as_ref();

    if let Some(path) = self.get_lang_conf(lang).and_then(|conf| conf.grammar.clone()) {
      return Some(path);
    }

    grammars
      .path
      .clone()
      .or_else(GrammarsConfig::default_dir)
      .map(|dir| dir.join(format!("{lang}.so")))
  }

  /// Name of the function exported by the grammar of `lang`.
  pub fn get_grammar_symbol(&self, lang: impl AsRef<str>) -> String {
    let lang = lang.as_ref();
    self
      .get_lang_conf(lang)
      .and_then(|conf| conf.symbol.clone())
      .unwrap_or_else(|| format!("tree_sitter_{}", lang.replace(['.', '-'], "_")))
  }
}

/// Specific language configuration.
///
/// Every field is optional; a missing field falls back to what is derived from the language name.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LanguageConfig {
  /// Path to the compiled grammar.
  pub grammar: Option<PathBuf>,

  /// Name of the function returning the tree-sitter language.
  pub symbol: Option<String>,
}

impl LanguageConfig {
  fn merge_user_config(&mut self, user_config: LanguageConfig) {
    if user_config.grammar.is_some() {
      self.grammar = user_config.grammar;
    }

    if user_config.symbol.is_some() {
      self.symbol = user_config.symbol;
    }
  }
}

/// User version of configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
  pub flash: Option<UserFlashConfig>,
  pub search: Option<UserSearchConfig>,
  pub grammars: Option<GrammarsConfig>,
  pub language: Option<HashMap<String, LanguageConfig>>,
}

impl UserConfig {
  /// Load the config from the default user location (XDG).
  pub fn load_from_xdg() -> Result<Self, ConfigError> {
    log::debug!("loading user configuration");

    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("kak-change-inner/config.toml");
    Self::load(path)
  }

  /// Load the configuration from a given path.
  fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();

    log::debug!("loading configuration at {path}", path = path.display());

    let content = fs::read_to_string(path).map_err(|err| ConfigError::CannotReadConfig {
      path: path.to_owned(),
      err,
    })?;

    toml::from_str(&content).map_err(|err| ConfigError::CannotParseConfig {
      err: err.to_string(),
    })
  }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserFlashConfig {
  pub duration_ms: Option<u64>,
  pub face: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserSearchConfig {
  pub forward_on_miss: Option<bool>,
}
