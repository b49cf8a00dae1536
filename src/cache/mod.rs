//! In-memory cache for normalized API responses
//!
//! GET responses are stored under a hashed request key with a fixed TTL.
//! Entries are never swept proactively: an expired entry is dropped the next
//! time it is read, and mutations remove every entry whose request path
//! contains the mutated path (see DESIGN.md for the matching rules).

pub mod key;

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use key::cache_key;

/// Default entry lifetime when the config does not override it.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Cache behavior settings, resolved from config plus the `--no-cache` flag.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Whether the caching runtime mode is active at all.
    pub enabled: bool,
    /// Entry lifetime.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: DEFAULT_TTL,
        }
    }
}

/// Normalized response payload as stored in the cache.
///
/// This is the envelope after normalization, minus the `success` flag
/// (only successful responses are stored).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPayload {
    pub data: Value,
    pub message: Option<String>,
    pub meta: Option<Value>,
}

struct CacheEntry {
    payload: CachedPayload,
    /// Request path the entry was stored for, kept for invalidation matching.
    path: String,
    stored_at: Instant,
}

/// Plain map cache behind a mutex.
///
/// All access happens synchronously between await points of a dispatch, so
/// the lock is never held across I/O. Two concurrent identical GETs may both
/// miss and both fetch; the last writer wins.
pub struct RequestCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl RequestCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a live entry, dropping it if it has expired.
    pub fn get(&self, key: &str) -> Option<CachedPayload> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a payload under `key`, recording the request path for later
    /// invalidation. Replaces any previous entry for the key.
    pub fn put(&self, key: &str, path: &str, payload: CachedPayload) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    payload,
                    path: path.to_string(),
                    stored_at: Instant::now(),
                },
            );
        }
    }

    /// Remove every entry whose recorded request path contains `path`.
    ///
    /// Substring matching over-invalidates: `/agents` also removes
    /// `/agents/123/sources`.
    pub fn invalidate_path(&self, path: &str) -> usize {
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|_, entry| !entry.path.contains(path));
        let removed = before - entries.len();
        if removed > 0 {
            log::debug!("Invalidated {} cache entries for path {}", removed, path);
        }
        removed
    }
}
