//! Configuration types for locale negotiation.
//!
//! This module defines [`LocaleConfig`] and [`LanguageRule`], which
//! describe the registered languages, their tag patterns, the alias
//! table, and the optional locale-data directory. The types are cheap to
//! clone and easy to deserialize from external configuration formats
//! such as JSON, TOML, or YAML.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named language and the ordered tag patterns that recognize it.
///
/// Pattern order is significant: within a rule the first matching pattern
/// wins. `*` in a raw pattern matches any sequence of characters (so
/// `"en-*"` covers `"en-US"` and `"en-GB"` but not `"en"`), and `-` is
/// taken literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRule {
    /// Language name returned by lookups (unless an alias overrides it).
    pub name: String,
    /// Raw tag patterns, tried in order.
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl LanguageRule {
    /// Builds a rule from a name and any iterable of patterns.
    pub fn new(
        name: impl Into<String>,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Runtime configuration for locale negotiation.
///
/// Rules are scanned in declaration order; that order is the deterministic
/// iteration contract for overlapping patterns. Callers should rely on
/// the positional priority of the Accept-Language input rather than on a
/// particular ordering across rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Semantic version of the locale configuration.
    pub version: u32,
    /// Language name returned when nothing matches.
    pub default_language: String,
    /// Registered language rules, scanned in declaration order.
    pub rules: Vec<LanguageRule>,
    /// Optional external-facing aliases keyed by rule name
    /// (e.g. `"zh"` → `".zh"`). An empty map means no aliasing.
    pub aliases: HashMap<String, String>,
    /// Directory of JSON locale files loaded at store creation; `None`
    /// skips loading entirely.
    pub locale_dir: Option<PathBuf>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            version: 1,
            default_language: "en".into(),
            rules: Vec::new(),
            aliases: HashMap::new(),
            locale_dir: None,
        }
    }
}

impl LocaleConfig {
    /// Creates a configuration with the given default language and no
    /// rules.
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
            ..Self::default()
        }
    }

    /// Appends a language rule; declaration order is scan order.
    pub fn with_rule(
        mut self,
        name: impl Into<String>,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.rules.push(LanguageRule::new(name, patterns));
        self
    }

    /// Registers an external-facing alias for a rule name.
    pub fn with_alias(mut self, name: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), alias.into());
        self
    }

    /// Sets the locale-data directory loaded at store creation.
    pub fn with_locale_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.locale_dir = Some(dir.into());
        self
    }

    /// Validates internal consistency of this configuration.
    ///
    /// Inexpensive and I/O-free; intended to run at process start-up
    /// before any locale traffic. Pattern syntax is not checked here;
    /// that is the compile step's job.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::UnsupportedVersion {
                version: self.version,
            });
        }
        if self.default_language.is_empty() {
            return Err(ConfigError::EmptyDefaultLanguage);
        }
        let mut seen = HashSet::new();
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.name.is_empty() {
                return Err(ConfigError::EmptyRuleName { index });
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(ConfigError::DuplicateRule {
                    name: rule.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Errors that can occur when validating a [`LocaleConfig`].
///
/// These are configuration-time issues and are intended to be surfaced
/// during service start-up rather than at lookup time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// Version 0 is reserved and invalid.
    #[error("unsupported locale config version: {version}")]
    UnsupportedVersion {
        /// The rejected version value.
        version: u32,
    },
    /// The default language must be a non-empty name.
    #[error("default_language must not be empty")]
    EmptyDefaultLanguage,
    /// Every rule needs a name for lookups to return.
    #[error("language rule at index {index} has an empty name")]
    EmptyRuleName {
        /// Position of the offending rule in declaration order.
        index: usize,
    },
    /// Two rules with the same name would make alias resolution ambiguous.
    #[error("duplicate language rule `{name}`")]
    DuplicateRule {
        /// The repeated rule name.
        name: String,
    },
}
