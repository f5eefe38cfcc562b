//! Enhancement options
//!
//!     Static, validated settings for one run. They are checked once, when built, so an
//!     invalid platform list or keyword table stops the pipeline before any document is
//!     processed.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::page::error::ConfigError;

/// Anchors per platform per document unless overridden
pub const DEFAULT_OCCURRENCE_CAP: usize = 3;

/// Bonus a category adds, by the role of the section being illustrated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleWeights {
    /// Platform review sections
    #[serde(default)]
    pub review: u32,
    /// The level-1 section at the top of the page
    #[serde(default)]
    pub lead: u32,
    /// Everything else
    #[serde(default)]
    pub body: u32,
}

/// A family of image keywords (logos, featured shots, screenshots)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
    pub weights: RoleWeights,
}

impl KeywordCategory {
    pub fn new(name: &str, keywords: &[&str], weights: RoleWeights) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            weights,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMatchOptions {
    /// Score per keyword shared by the section and the image
    pub keyword_weight: u32,
    /// Score when the image title contains the reviewed platform's full name
    pub phrase_weight: u32,
    /// Best scores below this are no match
    pub min_score: u32,
    pub categories: Vec<KeywordCategory>,
}

impl Default for ImageMatchOptions {
    fn default() -> Self {
        Self {
            keyword_weight: 10,
            phrase_weight: 50,
            min_score: 10,
            categories: vec![
                KeywordCategory::new(
                    "logo",
                    &["logo", "icon", "brand"],
                    RoleWeights {
                        review: 30,
                        lead: 0,
                        body: 0,
                    },
                ),
                KeywordCategory::new(
                    "featured",
                    &["featured", "hero", "banner"],
                    RoleWeights {
                        review: 0,
                        lead: 30,
                        body: 5,
                    },
                ),
                KeywordCategory::new(
                    "screenshot",
                    &["screenshot", "lobby", "homepage", "interface"],
                    RoleWeights {
                        review: 5,
                        lead: 0,
                        body: 10,
                    },
                ),
            ],
        }
    }
}

impl ImageMatchOptions {
    /// Trim and lowercase keywords; reject categories left empty.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        for category in &mut self.categories {
            category.keywords = category
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if category.keywords.is_empty() {
                return Err(ConfigError::EmptyKeywordCategory(category.name.clone()));
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOptions {
    /// Platform names to link, as they appear in text
    pub platforms: Vec<String>,
    pub occurrence_cap: usize,
    /// Per-platform caps, keyed by platform name (any case)
    #[serde(default)]
    pub cap_overrides: BTreeMap<String, usize>,
}

impl LinkOptions {
    pub fn new(platforms: Vec<String>) -> Self {
        Self {
            platforms,
            occurrence_cap: DEFAULT_OCCURRENCE_CAP,
            cap_overrides: BTreeMap::new(),
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.occurrence_cap = cap;
        self
    }

    pub fn with_override(mut self, platform: impl Into<String>, cap: usize) -> Self {
        self.cap_overrides.insert(platform.into(), cap);
        self
    }

    /// Cap for one platform, falling back to the global cap.
    pub fn cap_for(&self, platform: &str) -> usize {
        let wanted = platform.trim().to_lowercase();
        self.cap_overrides
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, cap)| *cap)
            .unwrap_or(self.occurrence_cap)
    }

    /// Trim names and check the list is usable.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.platforms.is_empty() {
            return Err(ConfigError::MissingPlatforms);
        }

        let mut seen = HashMap::new();
        for (index, name) in self.platforms.iter_mut().enumerate() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(ConfigError::BlankPlatformName(index));
            }
            if name.contains('\n') {
                return Err(ConfigError::PlatformNameWithNewline(name.clone()));
            }
            if seen.insert(name.to_lowercase(), name.clone()).is_some() {
                return Err(ConfigError::DuplicatePlatform(name.clone()));
            }
        }

        // override keys are rewritten to the configured spelling of their platform
        let mut overrides = BTreeMap::new();
        for (key, cap) in std::mem::take(&mut self.cap_overrides) {
            let Some(platform) = seen.get(&key.trim().to_lowercase()) else {
                return Err(ConfigError::UnknownCapOverride(key));
            };
            if overrides.insert(platform.clone(), cap).is_some() {
                return Err(ConfigError::DuplicatePlatform(key));
            }
        }
        self.cap_overrides = overrides;

        Ok(self)
    }
}

/// Everything enhancement needs besides the libraries themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceOptions {
    pub images: ImageMatchOptions,
    pub links: LinkOptions,
}

impl EnhanceOptions {
    pub fn new(images: ImageMatchOptions, links: LinkOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            images: images.validate()?,
            links: links.validate()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platforms(names: &[&str]) -> LinkOptions {
        LinkOptions::new(names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn test_valid_options() {
        let options = EnhanceOptions::new(
            ImageMatchOptions::default(),
            platforms(&[" Bet365 ", "Stake"]).with_override("bet365", 1),
        )
        .expect("valid");
        assert_eq!(options.links.platforms, vec!["Bet365", "Stake"]);
        assert_eq!(options.links.cap_for("BET365"), 1);
        assert_eq!(options.links.cap_for("Stake"), DEFAULT_OCCURRENCE_CAP);
    }

    #[test]
    fn test_missing_platforms() {
        assert_eq!(platforms(&[]).validate(), Err(ConfigError::MissingPlatforms));
    }

    #[test]
    fn test_blank_and_duplicate_platforms() {
        assert_eq!(
            platforms(&["Stake", "  "]).validate(),
            Err(ConfigError::BlankPlatformName(1))
        );
        assert_eq!(
            platforms(&["Stake", "STAKE"]).validate(),
            Err(ConfigError::DuplicatePlatform("STAKE".into()))
        );
    }

    #[test]
    fn test_unknown_override() {
        assert_eq!(
            platforms(&["Stake"]).with_override("Bet365", 2).validate(),
            Err(ConfigError::UnknownCapOverride("Bet365".into()))
        );
    }

    #[test]
    fn test_empty_keyword_category() {
        let mut images = ImageMatchOptions::default();
        images.categories[0].keywords = vec!["  ".into()];
        assert_eq!(
            images.validate(),
            Err(ConfigError::EmptyKeywordCategory("logo".into()))
        );
    }

    #[test]
    fn test_override_keys_take_platform_spelling() {
        let options = platforms(&["Stake", "BC.Game"])
            .with_override(" Stake ", 1)
            .with_override("bc.game", 0)
            .validate()
            .expect("valid");
        assert_eq!(
            options.cap_overrides.into_iter().collect::<Vec<_>>(),
            vec![("BC.Game".to_string(), 0), ("Stake".to_string(), 1)]
        );
    }

    #[test]
    fn test_override_listed_twice() {
        assert_eq!(
            platforms(&["Stake"])
                .with_override("Stake", 1)
                .with_override("stake", 2)
                .validate(),
            Err(ConfigError::DuplicatePlatform("stake".into()))
        );
    }

    #[test]
    fn test_cap_for_ignores_case_beyond_ascii() {
        let options = platforms(&["Ñandú Bet"])
            .with_override("ÑANDÚ BET", 1)
            .validate()
            .expect("valid");
        assert_eq!(options.cap_for("ñandú bet"), 1);
    }
}
