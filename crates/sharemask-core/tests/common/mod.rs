#![allow(dead_code)] // Not every test binary uses every helper

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use sharemask_core::fs::resolve::{PathResolver, ResolveError};

/// Resolver that derives the parent from the path text alone.
///
/// Mirrors what the filesystem resolver returns for an existing absolute
/// directory, without touching the disk.
#[derive(Debug, Default)]
pub struct LexicalResolver {
    calls: AtomicUsize,
}

impl LexicalResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PathResolver for LexicalResolver {
    fn parent_of(&self, local_path: &str) -> Result<String, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let trimmed = local_path.trim_end_matches(['/', '\\']);
        match trimmed.rfind(['/', '\\']) {
            Some(0) => Ok("/".to_string()),
            Some(idx) => Ok(trimmed[..idx].to_string()),
            None => Err(ResolveError::NoParent {
                path: local_path.to_string(),
            }),
        }
    }
}

/// Resolver with a fixed table of known directories.
#[derive(Debug, Default)]
pub struct TableResolver {
    parents: HashMap<String, String>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, local_path: &str, parent: &str) -> Self {
        self.parents.insert(local_path.to_string(), parent.to_string());
        self
    }
}

impl PathResolver for TableResolver {
    fn parent_of(&self, local_path: &str) -> Result<String, ResolveError> {
        self.parents
            .get(local_path)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                path: local_path.to_string(),
            })
    }
}

/// Install a test subscriber so `RUST_LOG=debug cargo test` shows share events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
