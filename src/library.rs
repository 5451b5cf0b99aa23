//! Directory-backed poem corpus.
//!
//! A corpus root holds one directory per category. Only directories whose
//! name contains a CJK unified ideograph are treated as categories, which
//! skips tooling folders (`.git`, `scripts`, ...) that share the root.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PoemError, PoemErrorKind};
use crate::poem::{parse_poem_json, PoemParseOptions, PoemRecord};

/// Poems grouped by category name, categories in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoemLibrary {
    categories: BTreeMap<String, Vec<PoemRecord>>,
}

impl PoemLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `root` for category directories and load every `*.json` file.
    ///
    /// Files that fail to read or parse are logged and skipped. Categories
    /// with no surviving poems are still recorded.
    pub fn load(root: &Path, options: &PoemParseOptions) -> Result<Self, PoemError> {
        if !root.is_dir() {
            return Err(PoemError::new(
                PoemErrorKind::Root,
                "POEM_ROOT_MISSING",
                "poem root is not a directory",
            )
            .with_path(root.display().to_string()));
        }

        let mut library = Self::new();
        for dir in sorted_entries(root)? {
            let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !dir.is_dir() || !is_category_dir_name(name) {
                continue;
            }
            let poems = load_category_dir(&dir, options)?;
            log::debug!("category {} loaded {} poems", name, poems.len());
            library.categories.insert(name.to_string(), poems);
        }
        Ok(library)
    }

    /// Insert or replace one category.
    pub fn insert(&mut self, category: impl Into<String>, poems: Vec<PoemRecord>) {
        self.categories.insert(category.into(), poems);
    }

    /// Iterate categories in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[PoemRecord])> {
        self.categories
            .iter()
            .map(|(name, poems)| (name.as_str(), poems.as_slice()))
    }

    /// Poems for one category.
    pub fn get(&self, category: &str) -> Option<&[PoemRecord]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Number of categories, including empty ones.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Total poems across all categories.
    pub fn poem_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// True when no category holds a poem.
    pub fn is_empty(&self) -> bool {
        self.poem_count() == 0
    }
}

/// Whether a directory name marks a poem category.
pub fn is_category_dir_name(name: &str) -> bool {
    name.chars().any(|ch| ('\u{4e00}'..='\u{9fff}').contains(&ch))
}

/// Read and parse one poem source file.
pub fn load_poem_file(path: &Path, options: &PoemParseOptions) -> Result<Vec<PoemRecord>, PoemError> {
    let bytes = fs::read(path).map_err(|e| PoemError::from(e).with_path(path.display().to_string()))?;
    parse_poem_json(&bytes, options).map_err(|e| e.with_path(path.display().to_string()))
}

fn load_category_dir(dir: &Path, options: &PoemParseOptions) -> Result<Vec<PoemRecord>, PoemError> {
    let mut poems = Vec::new();
    for path in sorted_entries(dir)? {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == "json");
        if !is_json || !path.is_file() {
            continue;
        }
        match load_poem_file(&path, options) {
            Ok(mut parsed) => poems.append(&mut parsed),
            Err(err) => log::warn!("skipping {}: {}", path.display(), err),
        }
    }
    Ok(poems)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, PoemError> {
    let entries = fs::read_dir(dir).map_err(|e| PoemError::from(e).with_path(dir.display().to_string()))?;
    let mut out: Vec<PathBuf> = entries.filter_map(Result::ok).map(|e| e.path()).collect();
    out.sort();
    Ok(out)
}
