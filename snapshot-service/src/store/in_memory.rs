//! In-memory volume store for tests.
//!
//! This provides a [`VolumeStore`](super::VolumeStore) backed by a `Vec`,
//! removing the need for an actual btrfs volume in unit tests. The store is
//! [`Clone`] so tests can hold a handle for direct inspection while the
//! service owns a boxed copy.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::error::{Result, VolumeError};

#[derive(Debug, Default)]
struct Inner {
    subvolumes: Vec<String>,
    fail_deletes: HashSet<String>,
    fail_list: bool,
}

/// An in-memory [`VolumeStore`](super::VolumeStore).
///
/// Subvolumes are tracked as full paths; [`list`](super::VolumeStore::list)
/// returns them relative to the queried root, mimicking the output of
/// `btrfs subvolume list`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an existing subvolume path directly.
    pub fn insert(&self, path: &str) {
        self.inner.lock().unwrap().subvolumes.push(path.to_owned());
    }

    /// Makes future deletions of `path` fail.
    ///
    /// Useful for simulating partial failures of a delete-all sweep.
    pub fn fail_delete(&self, path: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail_deletes
            .insert(path.to_owned());
    }

    /// Makes future listings fail.
    pub fn fail_list(&self) {
        self.inner.lock().unwrap().fail_list = true;
    }

    /// Returns the currently stored subvolume paths.
    pub fn paths(&self) -> Vec<String> {
        self.inner.lock().unwrap().subvolumes.clone()
    }
}

#[async_trait::async_trait]
impl super::VolumeStore for InMemoryStore {
    async fn create(&self, path: &str) -> Result<()> {
        self.insert(path);
        Ok(())
    }

    async fn snapshot(&self, _source: &str, dest: &str) -> Result<()> {
        self.insert(dest);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_deletes.contains(path) {
            return Err(VolumeError::Failed {
                command: format!("delete {path}"),
                status: "exit status: 1".to_owned(),
                output: "ERROR: Could not destroy subvolume".to_owned(),
            }
            .into());
        }

        inner.subvolumes.retain(|p| p != path);
        Ok(())
    }

    async fn list(&self, root: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", root.trim_end_matches('/'));
        let inner = self.inner.lock().unwrap();

        if inner.fail_list {
            return Err(VolumeError::Failed {
                command: format!("list {root}"),
                status: "exit status: 1".to_owned(),
                output: "ERROR: not a btrfs filesystem".to_owned(),
            }
            .into());
        }

        Ok(inner
            .subvolumes
            .iter()
            .map(|path| path.strip_prefix(prefix.as_str()).unwrap_or(path).to_owned())
            .collect())
    }
}
