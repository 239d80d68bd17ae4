//! Playable resource handles.
//!
//! Every accepted file gets a `SourceHandle` from the `SourceRegistry`. The
//! handle is the only way the media element reaches the file. Handles are
//! not `Clone` and `release` takes them by value, so a handle can be
//! released once and only once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq, Eq)]
pub struct SourceHandle {
    key: u64,
    url: String,
    path: PathBuf,
}

impl SourceHandle {
    /// Registry key; unique for the lifetime of the registry.
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Opaque locator, e.g. `vizplay-source:3`.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Default)]
pub struct SourceRegistry {
    next_key: u64,
    live: HashSet<u64>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh handle for `path`.
    pub fn allocate(&mut self, path: &Path) -> SourceHandle {
        let key = self.next_key;
        self.next_key += 1;
        self.live.insert(key);
        tracing::trace!(key, path = %path.display(), "allocated source handle");
        SourceHandle {
            key,
            url: format!("vizplay-source:{key}"),
            path: path.to_path_buf(),
        }
    }

    /// Release `handle`. Returns `false` if the handle did not come from this
    /// registry.
    pub fn release(&mut self, handle: SourceHandle) -> bool {
        if self.live.remove(&handle.key) {
            tracing::trace!(key = handle.key, "released source handle");
            true
        } else {
            tracing::warn!(key = handle.key, "release of unknown source handle");
            false
        }
    }

    #[cfg(test)]
    pub fn is_live(&self, handle: &SourceHandle) -> bool {
        self.live.contains(&handle.key)
    }

    /// Handles allocated and not yet released.
    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total handles allocated so far.
    #[cfg(test)]
    pub fn allocated_count(&self) -> u64 {
        self.next_key
    }

    /// Total handles released so far.
    #[cfg(test)]
    pub fn released_count(&self) -> u64 {
        self.next_key - self.live.len() as u64
    }
}
