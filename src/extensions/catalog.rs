//! Compiled-in extension catalog and directory-based enablement.
//!
//! Packs are registered by name with a factory. Which packs a run loads is
//! decided either explicitly or by scanning an extensions directory: every
//! file whose stem names a registered pack enables it, in the order the
//! directory lists them.

use std::path::Path;
use std::rc::Rc;

use tracing::warn;

use crate::core::ExtensionError;

use super::Extension;

/// Constructs a fresh extension instance for one simulation.
pub type ExtensionFactory = Rc<dyn Fn() -> Result<Box<dyn Extension>, ExtensionError>>;

#[derive(Clone)]
struct CatalogEntry {
    name: String,
    factory: ExtensionFactory,
}

/// Named extension factories in registration order.
#[derive(Clone, Default)]
pub struct ExtensionCatalog {
    entries: Vec<CatalogEntry>,
}

impl ExtensionCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory. A later registration under the same name wins.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn Extension>, ExtensionError> + 'static,
    {
        let name = name.into();
        self.entries.retain(|e| e.name != name);
        self.entries.push(CatalogEntry {
            name,
            factory: Rc::new(factory),
        });
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<ExtensionFactory> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| Rc::clone(&e.factory))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every registered pack, in registration order.
    #[must_use]
    pub fn all(&self) -> Vec<(String, ExtensionFactory)> {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), Rc::clone(&e.factory)))
            .collect()
    }

    /// Packs enabled by files in `dir`, in directory enumeration order.
    ///
    /// Stems that match no registered pack are logged and ignored. A missing
    /// directory enables nothing.
    pub fn enabled_in_dir(&self, dir: &Path) -> std::io::Result<Vec<(String, ExtensionFactory)>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut enabled: Vec<(String, ExtensionFactory)> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if enabled.iter().any(|(name, _)| name == stem) {
                continue;
            }
            match self.get(stem) {
                Some(factory) => enabled.push((stem.to_string(), factory)),
                None => warn!(file = %path.display(), "no extension named {stem:?}, ignoring"),
            }
        }
        Ok(enabled)
    }
}

impl std::fmt::Debug for ExtensionCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
