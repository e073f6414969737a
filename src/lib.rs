//! # Locale Negotiate (`locale`)
//!
//! ## Purpose
//!
//! `locale` resolves HTTP `Accept-Language` headers against a configured
//! set of language rules, loads per-language message trees from JSON
//! directories, and merges trees so a sparse translation can fall back to
//! a base language. Rule patterns are compiled once into an immutable
//! matcher; after construction every lookup is infallible and safe to run
//! from any number of threads.
//!
//! In a typical deployment you will:
//! - Describe your languages once in a [`LocaleConfig`]: match rules with
//!   `*` wildcards, optional aliases, a default language, and the
//!   directory holding locale JSON files.
//! - Call [`LocaleStore::create`] during startup so bad patterns and
//!   unreadable files fail fast, before any request is served.
//! - Resolve each request with [`LocaleStore::lookup`] and render from
//!   the resolved language's trees, using [`merge`] to overlay them.
//!
//! ## Core Types
//!
//! - [`LocaleConfig`]: declarative configuration with builder helpers and
//!   a `validate` step.
//! - [`CompiledMatcher`]: rules compiled to anchored match expressions;
//!   [`CompiledMatcher::lookup`] maps a header value to a language name.
//! - [`Tree`] / [`TreeValue`]: a message tree whose nodes are nested maps
//!   and whose terminals are opaque JSON values.
//! - [`merge`]: overlays one optional tree onto another, second side
//!   winning, always producing a fresh tree.
//! - [`LocaleStore`]: validated config, compiled matcher, and loaded
//!   trees behind one facade.
//! - [`LocaleLoader`] / [`JsonDirLoader`]: the seam for supplying trees,
//!   with the JSON-directory loader as the production implementation.
//! - [`LocaleError`]: everything construction can fail with.
//!
//! ## Example Usage
//!
//! ```rust
//! use locale::{LocaleConfig, LocaleStore};
//!
//! let config = LocaleConfig::new("ja")
//!     .with_rule("ja", ["ja"])
//!     .with_rule("en", ["en", "en-*"])
//!     .with_rule("zh", ["zh", "zh-*"])
//!     .with_alias("zh", ".zh");
//!
//! let store = LocaleStore::create(config).expect("locale init");
//!
//! // Position in the header decides priority; declared q-weights do not.
//! assert_eq!(store.lookup("ar-DZ,zh;q=0.8,ja;q=0.6"), ".zh");
//! assert_eq!(store.lookup("en-US,fr;q=0.5"), "en");
//! assert_eq!(store.lookup("xx-YY"), "ja");
//! ```
//!
//! ## Observability
//!
//! Install a [`LookupMetrics`] implementation via [`set_lookup_metrics`]
//! to record per-lookup latency and hit/miss outcomes. This is typically
//! done once during service startup so every matcher shares the same
//! metrics backend. Store construction additionally emits `tracing`
//! events under the `locale.create` span; lookups themselves log nothing.

pub mod config;
pub mod error;
pub mod matcher;
pub mod merge;
pub mod metrics;
pub mod store;
pub mod tree;

pub use crate::config::{ConfigError, LanguageRule, LocaleConfig};
pub use crate::error::{LoadError, LocaleError, PatternError};
pub use crate::matcher::CompiledMatcher;
pub use crate::merge::merge;
pub use crate::metrics::{LookupMetrics, set_lookup_metrics};
pub use crate::store::{JsonDirLoader, LocaleLoader, LocaleStore};
pub use crate::tree::{Tree, TreeValue};
