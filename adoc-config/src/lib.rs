//! Shared configuration loader for the adoc parser.
//!
//! `defaults/adoc.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AdocConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/adoc.default.toml");

/// Top-level configuration consumed by adoc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AdocConfig {
    pub parser: ParserConfig,
    pub include: IncludeConfig,
}

/// Knobs of the parsing engine itself.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub max_nesting_depth: usize,
    /// Global attributes, consulted after the document's own attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// How `include::` directives are resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct IncludeConfig {
    pub enabled: bool,
    pub base_dir: PathBuf,
    pub encoding: String,
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

    /// Apply a single key/value override, e.g. `parser.attributes.env`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AdocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AdocConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parser.max_nesting_depth, 64);
        assert!(config.parser.attributes.is_empty());
        assert!(config.include.enabled);
        assert_eq!(config.include.encoding, "utf-8");
        assert_eq!(config.include.base_dir, PathBuf::from("."));
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.max_nesting_depth", 8i64)
            .expect("override to apply")
            .set_override("parser.attributes.product", "adoc")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.max_nesting_depth, 8);
        assert_eq!(
            config.parser.attributes.get("product").map(String::as_str),
            Some("adoc")
        );
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile_in_target("layered.toml");
        writeln!(
            file.1,
            "[include]\nenabled = false\nbase_dir = \"docs\"\nencoding = \"utf-8\""
        )
        .expect("write config");
        let config = Loader::new()
            .with_file(&file.0)
            .build()
            .expect("config to build");
        assert!(!config.include.enabled);
        assert_eq!(config.include.base_dir, PathBuf::from("docs"));
        assert_eq!(config.parser.max_nesting_depth, 64);
        let _ = std::fs::remove_file(&file.0);
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/adoc.toml")
            .build()
            .expect("config to build");
        assert!(config.include.enabled);
    }

    #[test]
    fn required_file_must_exist() {
        let result = Loader::new()
            .with_file("/definitely/not/here/adoc.toml")
            .build();
        assert!(result.is_err());
    }

    fn tempfile_in_target(name: &str) -> (PathBuf, std::fs::File) {
        let path = std::env::temp_dir().join(format!("adoc-config-{}-{}", std::process::id(), name));
        let file = std::fs::File::create(&path).expect("create temp config");
        (path, file)
    }
}
