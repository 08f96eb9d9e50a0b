use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use locale_collate_core::Category;
use tracing::{debug, warn};

/// Source of compiled locale data, one blob per category and locale name.
pub trait LocaleDataProvider {
    fn locale_data(&self, category: Category, name: &str) -> Option<Cow<'_, [u8]>>;
}

impl<P: LocaleDataProvider + ?Sized> LocaleDataProvider for &P {
    fn locale_data(&self, category: Category, name: &str) -> Option<Cow<'_, [u8]>> {
        (**self).locale_data(category, name)
    }
}

/// Reads `<root>/<locale>/<LC_*>` files, the layout of `/usr/share/locale`.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, category: Category, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains('/') || name == "." || name == ".." {
            return None;
        }
        Some(self.root.join(name).join(category.file_name()))
    }
}

impl LocaleDataProvider for DirectoryProvider {
    fn locale_data(&self, category: Category, name: &str) -> Option<Cow<'_, [u8]>> {
        let Some(path) = self.path_for(category, name) else {
            warn!(locale = name, "refusing locale name that is not a single path component");
            return None;
        };
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), size = bytes.len(), "read locale data");
                Some(Cow::Owned(bytes))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "locale data not found");
                None
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read locale data");
                None
            }
        }
    }
}

/// In-memory locale data, for embedded tables and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    entries: BTreeMap<(Category, String), Vec<u8>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, name: &str, bytes: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.insert((category, name.to_string()), bytes)
    }

    pub fn with(mut self, category: Category, name: &str, bytes: Vec<u8>) -> Self {
        self.insert(category, name, bytes);
        self
    }
}

impl LocaleDataProvider for MemoryProvider {
    fn locale_data(&self, category: Category, name: &str) -> Option<Cow<'_, [u8]>> {
        self.entries
            .get(&(category, name.to_string()))
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
    }
}
