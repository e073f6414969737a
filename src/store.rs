use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{Level, info, warn};

use crate::config::LocaleConfig;
use crate::error::{LoadError, LocaleError};
use crate::matcher::CompiledMatcher;
use crate::tree::Tree;

/// Source of locale trees, keyed by locale name.
///
/// The store only dictates the key shape (relative path minus the file
/// extension, `/`-separated); where the trees come from is up to the
/// loader. [`JsonDirLoader`] reads them from a directory of JSON files,
/// a test double can serve them from memory.
pub trait LocaleLoader {
    fn load(&self, dir: &Path) -> Result<HashMap<String, Tree>, LoadError>;
}

/// Loads every `*.json` file under a directory, recursively.
///
/// A file's locale name is its path relative to the loaded directory,
/// with the `.json` extension dropped and `/` as the separator on every
/// platform: `hello/world/ja.json` becomes `hello/world/ja`, and
/// `conf.ja.json` becomes `conf.ja`. Files with other extensions are
/// ignored; symlinks are skipped. The first unreadable or unparsable
/// file aborts the whole load.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDirLoader;

impl LocaleLoader for JsonDirLoader {
    fn load(&self, dir: &Path) -> Result<HashMap<String, Tree>, LoadError> {
        let mut trees = HashMap::new();
        walk_dir(dir, dir, &mut trees)?;
        Ok(trees)
    }
}

fn walk_dir(root: &Path, dir: &Path, trees: &mut HashMap<String, Tree>) -> Result<(), LoadError> {
    let reader = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in reader {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        entries.push(entry);
    }
    // Name order keeps the walk deterministic across platforms.
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

        if file_type.is_dir() {
            walk_dir(root, &path, trees)?;
        } else if file_type.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            let name = locale_name(root, &path);
            let tree = read_tree(&path)?;
            tracing::debug!(name = %name, path = %path.display(), "locale_file_loaded");
            trees.insert(name, tree);
        }
    }

    Ok(())
}

fn locale_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let segments: Vec<_> = relative
        .with_extension("")
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    segments.join("/")
}

fn read_tree(path: &Path) -> Result<Tree, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.is_empty() {
        return Ok(Tree::new());
    }

    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// A validated configuration, its compiled matcher, and the locale trees
/// loaded for it.
///
/// Construction is the only fallible step; afterward the store is
/// immutable and every accessor is infallible, so one store can serve
/// concurrent readers without coordination.
#[derive(Debug)]
pub struct LocaleStore {
    config: LocaleConfig,
    matcher: CompiledMatcher,
    trees: HashMap<String, Tree>,
}

impl LocaleStore {
    /// Validates `config`, compiles its matcher, and loads locale trees
    /// from `config.locale_dir` (when set) with [`JsonDirLoader`].
    pub fn create(config: LocaleConfig) -> Result<Self, LocaleError> {
        Self::create_with_loader(config, &JsonDirLoader)
    }

    /// Same as [`LocaleStore::create`] but with a caller-supplied loader.
    pub fn create_with_loader(
        config: LocaleConfig,
        loader: &dyn LocaleLoader,
    ) -> Result<Self, LocaleError> {
        let started = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "locale.create",
            default_language = %config.default_language
        );
        let _guard = span.enter();

        match Self::create_inner(config, loader) {
            Ok(store) => {
                info!(
                    languages = store.config.rules.len(),
                    trees = store.trees.len(),
                    elapsed_micros = started.elapsed().as_micros(),
                    "locale_create_success"
                );
                Ok(store)
            }
            Err(err) => {
                warn!(error = %err, "locale_create_failure");
                Err(err)
            }
        }
    }

    fn create_inner(config: LocaleConfig, loader: &dyn LocaleLoader) -> Result<Self, LocaleError> {
        config.validate()?;
        let matcher = CompiledMatcher::compile(&config)?;
        let trees = match &config.locale_dir {
            Some(dir) => loader.load(dir)?,
            None => HashMap::new(),
        };

        Ok(Self {
            config,
            matcher,
            trees,
        })
    }

    /// Resolves an `Accept-Language` value; see [`CompiledMatcher::lookup`].
    pub fn lookup(&self, accept_language: &str) -> &str {
        self.matcher.lookup(accept_language)
    }

    /// The tree loaded under this locale name, if any.
    pub fn tree(&self, name: &str) -> Option<&Tree> {
        self.trees.get(name)
    }

    /// True when a rule with exactly this name is configured.
    pub fn has_language(&self, name: &str) -> bool {
        self.matcher.has_language(name)
    }

    /// Names of every loaded tree, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    /// Number of loaded trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// True when no trees are loaded.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// The compiled matcher backing [`LocaleStore::lookup`].
    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }

    /// The validated configuration this store was created from.
    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }
}
