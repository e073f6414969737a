//! Error types surfaced by matcher compilation and locale loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// A configured tag pattern could not be compiled into a match
/// expression.
///
/// Fatal to construction: no partial compiled state is retained and the
/// error is surfaced to the caller, never retried.
#[derive(Debug, Error)]
#[error("invalid tag pattern `{pattern}` for language `{language}`: {source}")]
pub struct PatternError {
    /// Name of the rule whose pattern failed.
    pub language: String,
    /// The raw pattern as configured, before substitution.
    pub pattern: String,
    /// Underlying compile failure.
    pub source: regex::Error,
}

/// A locale file could not be read or parsed.
///
/// Any `LoadError` aborts the entire directory walk; no partial store is
/// ever produced.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a file or directory failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file or directory that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// A file's content is not a JSON mapping.
    #[error("failed to parse locale file {}: {source}", path.display())]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
}

/// Errors produced by [`LocaleStore::create`](crate::LocaleStore::create).
#[derive(Debug, Error)]
pub enum LocaleError {
    /// The configuration failed validation.
    #[error("invalid locale configuration: {0}")]
    Config(#[from] ConfigError),
    /// A tag pattern failed to compile.
    #[error("pattern compilation failed: {0}")]
    Pattern(#[from] PatternError),
    /// Loading the locale directory failed.
    #[error("locale load failed: {0}")]
    Load(#[from] LoadError),
}
