//! Shared configuration loader for the psan review tools.
//!
//! `defaults/psan.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`PsanConfig`].
//!
//! Layers apply in the order they are added and later layers win key by key. The `psan` CLI
//! stacks them as:
//!
//! ```text
//!   embedded defaults  <  ./psan.toml (if present)  <  --config <file>  <  --margin <n>
//! ```
//!
//! Command-line flags go in through [`Loader::set_override`], which always beats files.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use psan_parser::FeatureOptions;
use psan_render::{RenderOptions, Vocabulary};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/psan.default.toml");

/// Top-level configuration consumed by psan applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PsanConfig {
    pub render: RenderConfig,
    pub features: FeaturesConfig,
}

/// Window and styling knobs of the review renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub margin: usize,
    pub fade_tail: bool,
    pub classes: ClassesConfig,
}

/// Class names written for each decision and element kind.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassesConfig {
    pub token: String,
    pub candidate: String,
    pub public: String,
    pub secret: String,
    pub rule: String,
    pub highlight: String,
    pub fade: String,
}

/// Attribute names the feature extractor reads.
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturesConfig {
    pub element: String,
    pub status_attribute: String,
    pub confirmed_prefix: String,
    pub label_attribute: String,
}

impl From<ClassesConfig> for Vocabulary {
    fn from(classes: ClassesConfig) -> Self {
        Vocabulary {
            token: classes.token,
            candidate: classes.candidate,
            public: classes.public,
            secret: classes.secret,
            rule: classes.rule,
            highlight: classes.highlight,
            fade: classes.fade,
        }
    }
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions {
            margin: config.margin,
            fade_tail: config.fade_tail,
            vocabulary: config.classes.into(),
        }
    }
}

impl From<FeaturesConfig> for FeatureOptions {
    fn from(config: FeaturesConfig) -> Self {
        FeatureOptions {
            element: config.element,
            status_attribute: config.status_attribute,
            confirmed_prefix: config.confirmed_prefix,
            label_attribute: config.label_attribute,
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

    /// Apply a single key/value override, e.g. `render.margin` from the command line.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PsanConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PsanConfig, ConfigError> {
    Loader::new().build()
}
