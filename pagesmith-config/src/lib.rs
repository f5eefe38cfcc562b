//! Configuration loader for pagesmith.
//!
//! `defaults/pagesmith.default.toml` is embedded into every binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user files and single-key
//! overrides on top via [`Loader`], deserialize into [`PagesmithConfig`], and turn that into
//! validated [`EnhanceOptions`] before touching any document.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use pagesmith::page::enhancing::{
    EnhanceOptions, ImageMatchOptions, KeywordCategory, LinkOptions, RoleWeights,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/pagesmith.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PagesmithConfig {
    /// Passed through to whatever renders HTML
    #[serde(default)]
    pub css_classes: BTreeMap<String, String>,
    pub image_matching: ImageMatchingConfig,
    pub affiliate_links: AffiliateLinksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageMatchingConfig {
    pub keyword_weight: u32,
    pub phrase_weight: u32,
    pub min_score: u32,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub review: u32,
    #[serde(default)]
    pub lead: u32,
    #[serde(default)]
    pub body: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AffiliateLinksConfig {
    pub platforms: Vec<String>,
    pub occurrence_cap: usize,
    #[serde(default)]
    pub cap_overrides: BTreeMap<String, usize>,
}

/// Loading or validating configuration failed.
#[derive(Debug)]
pub enum LoadError {
    /// File missing, unreadable, or the wrong shape
    Source(config::ConfigError),
    /// Well-formed but unusable
    Invalid(pagesmith::ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Source(err) => write!(f, "failed to load configuration: {}", err),
            LoadError::Invalid(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Source(err) => Some(err),
            LoadError::Invalid(err) => Some(err),
        }
    }
}

impl From<config::ConfigError> for LoadError {
    fn from(err: config::ConfigError) -> Self {
        LoadError::Source(err)
    }
}

impl From<pagesmith::ConfigError> for LoadError {
    fn from(err: pagesmith::ConfigError) -> Self {
        LoadError::Invalid(err)
    }
}

impl PagesmithConfig {
    pub fn image_options(&self) -> ImageMatchOptions {
        let matching = &self.image_matching;
        ImageMatchOptions {
            keyword_weight: matching.keyword_weight,
            phrase_weight: matching.phrase_weight,
            min_score: matching.min_score,
            categories: matching
                .categories
                .iter()
                .map(|(name, category)| KeywordCategory {
                    name: name.clone(),
                    keywords: category.keywords.clone(),
                    weights: RoleWeights {
                        review: category.review,
                        lead: category.lead,
                        body: category.body,
                    },
                })
                .collect(),
        }
    }

    pub fn link_options(&self) -> LinkOptions {
        let links = &self.affiliate_links;
        LinkOptions {
            platforms: links.platforms.clone(),
            occurrence_cap: links.occurrence_cap,
            cap_overrides: links.cap_overrides.clone(),
        }
    }

    /// Validated options for the enhancer.
    pub fn enhance_options(&self) -> Result<EnhanceOptions, LoadError> {
        Ok(EnhanceOptions::new(
            self.image_options(),
            self.link_options(),
        )?)
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

    /// Layer TOML text, e.g. a config embedded in a test.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, LoadError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PagesmithConfig, LoadError> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PagesmithConfig, LoadError> {
    Loader::new().build()
}
