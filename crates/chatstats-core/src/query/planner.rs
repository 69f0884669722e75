//! Keyword export planner with a small in-memory LRU of rendered results.

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::query::guards::normalize_keywords;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    Hit,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Default)]
struct CacheState {
    entries: IndexMap<String, String>,
    hits: u64,
    misses: u64,
}

pub struct QueryCache {
    max_entries: usize,
    state: Mutex<CacheState>,
}

impl QueryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Keyword order and case do not change a filter's result, so the key
    /// uses the sorted lower-cased set.
    pub fn cache_key<S: AsRef<str>>(version_token: &str, keywords: &[S]) -> String {
        let mut normalized: Vec<String> = normalize_keywords(keywords)
            .into_iter()
            .map(|k| k.to_lowercase())
            .collect();
        normalized.sort();
        normalized.dedup();
        format!("{version_token}:{}", normalized.join("\u{1f}"))
    }

    pub fn get_or_compute<S, F>(
        &self,
        version_token: &str,
        keywords: &[S],
        compute: F,
    ) -> (String, CacheMode)
    where
        S: AsRef<str>,
        F: FnOnce() -> String,
    {
        let key = Self::cache_key(version_token, keywords);
        {
            let mut state = self.state.lock();
            if let Some(value) = state.entries.shift_remove(&key) {
                // Move to end for LRU
                state.entries.insert(key, value.clone());
                state.hits += 1;
                return (value, CacheMode::Hit);
            }
            state.misses += 1;
        }

        let value = compute();
        {
            let mut state = self.state.lock();
            state.entries.insert(key, value.clone());
            while state.entries.len() > self.max_entries {
                state.entries.shift_remove_index(0);
            }
        }
        (value, CacheMode::Miss)
    }

    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            entries: state.entries.len(),
            max_entries: self.max_entries,
            hits: state.hits,
            misses: state.misses,
        }
    }
}
