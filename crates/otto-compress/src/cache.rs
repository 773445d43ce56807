//! In-memory cache of successful compressions

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const DEFAULT_MAX_ENTRIES: usize = 256;

struct CacheEntry {
    output: String,
    stored_at: Instant,
}

/// Compressed outputs keyed by SHA-256 of `input:aggressiveness`.
///
/// The lock is only held for lookup and insert, never across an await.
pub struct ResponseCache {
    ttl: Duration,
    max_entries: usize,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// A zero `ttl` disables caching
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(input: &str, aggressiveness: f64) -> String {
        let digest = Sha256::digest(format!("{}:{}", input, aggressiveness).as_bytes());
        format!("{:x}", digest)
    }

    pub fn get(&self, input: &str, aggressiveness: f64) -> Option<String> {
        if self.ttl.is_zero() {
            return None;
        }
        let key = Self::key(input, aggressiveness);
        let mut entries = self.entries.lock().ok()?;
        match entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.output.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, input: &str, aggressiveness: f64, output: &str) {
        if self.ttl.is_zero() {
            return;
        }
        let key = Self::key(input, aggressiveness);
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let ttl = self.ttl;
            entries.retain(|_, e| e.stored_at.elapsed() < ttl);
        }
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                output: output.to_string(),
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
