use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::{LoadError, Loader, Root};

/// Loaded trees by name, so each document is compiled once and shared by
/// every agent that runs it.
#[derive(Debug, Default)]
pub struct BehaviorCache {
    trees: HashMap<String, Arc<Root>>,
}

impl BehaviorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `root` under its name. A name that is already cached keeps its
    /// existing tree and `false` is returned.
    pub fn add(&mut self, root: Arc<Root>) -> bool {
        if self.trees.contains_key(root.name()) {
            warn!(tree = root.name(), "behavior already cached");
            return false;
        }
        debug!(tree = root.name(), "behavior cached");
        self.trees.insert(root.name().to_string(), root);
        true
    }

    pub fn get(&self, name: &str) -> Option<Arc<Root>> {
        self.trees.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.trees.contains_key(name)
    }

    /// Remove `root` if it is the tree cached under its name.
    pub fn remove(&mut self, root: &Root) -> Option<Arc<Root>> {
        let cached = self.trees.get(root.name())?;
        if !std::ptr::eq(Arc::as_ptr(cached), root) {
            return None;
        }
        self.remove_by_name(root.name())
    }

    pub fn remove_by_name(&mut self, name: &str) -> Option<Arc<Root>> {
        let removed = self.trees.remove(name);
        if removed.is_some() {
            debug!(tree = name, "behavior evicted");
        }
        removed
    }

    /// Load a document and cache the result.
    pub fn load_file(&mut self, loader: &dyn Loader, path: &Path) -> Result<Arc<Root>, LoadError> {
        let root = Arc::new(loader.load_file(path)?);
        if !self.add(root.clone()) {
            return Err(LoadError::DuplicateTree(root.name().to_string()));
        }
        Ok(root)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Cached names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
