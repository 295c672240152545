//! Memoized compatibility verdicts.
//!
//! Keys are SHA-256 digests of the verbatim user-agent string, so the cache
//! holds a fixed 64 bytes of key per distinct agent no matter how long the
//! header was. Entries are only ever added.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::fmt::Write;
use std::sync::Arc;

/// Storage for compatibility verdicts.
///
/// `put` must keep the first verdict stored under a key; a verdict for a
/// given user agent never changes within a process.
pub trait VerdictCache: Send + Sync {
    fn get(&self, key: &str) -> Option<bool>;
    fn put(&self, key: &str, verdict: bool);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lowercase hex SHA-256 of `user_agent`.
pub fn verdict_key(user_agent: &str) -> String {
    let digest = Sha256::digest(user_agent.as_bytes());
    let mut key = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(key, "{:02x}", byte);
    }
    key
}

/// Thread-safe verdict cache.
#[derive(Clone, Default)]
pub struct DashMapVerdictCache {
    entries: Arc<DashMap<String, bool>>,
}

impl DashMapVerdictCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }
}

impl VerdictCache for DashMapVerdictCache {
    fn get(&self, key: &str) -> Option<bool> {
        self.entries.get(key).map(|entry| *entry)
    }

    fn put(&self, key: &str, verdict: bool) {
        self.entries.entry(key.to_string()).or_insert(verdict);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
