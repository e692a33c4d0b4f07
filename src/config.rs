//! Configuration loading.
//!
//! `defaults/gitpaint.default.toml` is embedded into the crate so the
//! documented defaults and runtime behavior stay in sync. Callers layer
//! user files and single-key overrides on top via [`Loader`] before
//! deserializing into [`GitpaintConfig`].

use crate::error::Result;
use crate::palette::Palette;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/gitpaint.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GitpaintConfig {
    pub language: LanguageConfig,
    /// Token name to SGR parameters.
    #[serde(default)]
    pub palette: BTreeMap<String, String>,
}

impl GitpaintConfig {
    /// Resolve the palette table, rejecting unknown token names.
    pub fn palette(&self) -> Result<Palette> {
        Palette::from_entries(
            self.palette
                .iter()
                .map(|(name, sgr)| (name.as_str(), sgr.as_str())),
        )
    }
}

/// Language-tag handling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageConfig {
    pub canonical: String,
    pub aliases: Vec<String>,
    pub plain: Vec<String>,
    pub auto_detect: bool,
}

impl LanguageConfig {
    pub fn is_alias(&self, tag: &str) -> bool {
        tag == self.canonical || self.aliases.iter().any(|alias| alias == tag)
    }

    pub fn is_plain(&self, tag: &str) -> bool {
        self.plain.iter().any(|plain| plain == tag)
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            canonical: "git-bash".to_string(),
            aliases: ["git", "git-output", "gitbash"].map(String::from).to_vec(),
            plain: ["", "text", "txt", "plain", "plaintext"]
                .map(String::from)
                .to_vec(),
            auto_detect: true,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `language.auto_detect = false`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> std::result::Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> std::result::Result<GitpaintConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> std::result::Result<GitpaintConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::palette::ColorToken;
    use std::io::Write;

    #[test]
    fn embedded_defaults_match_builtin_values() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.language, LanguageConfig::default());
        assert_eq!(config.palette().expect("palette"), Palette::ansi16());
    }

    #[test]
    fn aliases_include_the_canonical_tag() {
        let language = LanguageConfig::default();
        for tag in ["git-bash", "git", "git-output", "gitbash"] {
            assert!(language.is_alias(tag), "{tag}");
        }
        assert!(!language.is_alias("bash"));
        assert!(language.is_plain(""));
        assert!(language.is_plain("plaintext"));
        assert!(!language.is_plain("git"));
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("language.auto_detect", false)
            .expect("override to apply")
            .set_override("palette.hash", "38;5;214")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.language.auto_detect);
        let palette = config.palette().expect("palette");
        assert_eq!(palette.sgr(ColorToken::Hash), "38;5;214");
        assert_eq!(palette.sgr(ColorToken::Added), "32");
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[language]\naliases = [\"git-console\"]").expect("write");

        let config = Loader::new().with_file(file.path()).build().expect("config");
        assert!(config.language.is_alias("git-console"));
        assert_eq!(config.language.canonical, "git-bash");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/gitpaint.toml")
            .build()
            .expect("config");
        assert!(config.language.auto_detect);
    }

    #[test]
    fn unknown_palette_token_is_rejected() {
        let config = Loader::new()
            .set_override("palette.chartreuse", "92")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(matches!(config.palette(), Err(Error::UnknownToken(name)) if name == "chartreuse"));
    }
}
