//! Store configuration options

use std::path::PathBuf;

/// Options for opening the relational store
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Database file path; `None` opens an in-memory database
    pub path: Option<PathBuf>,

    /// Use WAL journaling (file-backed databases only)
    pub enable_wal: bool,

    /// Enforce foreign keys on every connection
    pub enforce_foreign_keys: bool,
}

impl StoreOptions {
    /// Options for a file-backed store at the given path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Options for an in-memory store, the default for tests
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Builder: disable WAL journaling
    pub fn disable_wal(mut self) -> Self {
        self.enable_wal = false;
        self
    }

    /// Builder: skip foreign-key enforcement
    pub fn without_foreign_keys(mut self) -> Self {
        self.enforce_foreign_keys = false;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            path: None,
            enable_wal: true,
            enforce_foreign_keys: true,
        }
    }
}
