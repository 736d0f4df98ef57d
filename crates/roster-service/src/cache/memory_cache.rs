//! Process-local cache with the same contract as the Redis backend.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::{RosterError, RosterResult};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
enum Value {
    Text(String),
    Set(BTreeSet<String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory cache for single-instance deployments and tests.
///
/// Expiry is measured with the tokio clock, so paused-time tests can step
/// past a TTL without sleeping.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries, indexes included.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|e| e.is_live(now)).count()
    }

    /// Returns true if no live entry remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `key` holds a live entry.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries.read().get(key).is_some_and(|e| e.is_live(now))
    }
}

/// Redis-style glob match supporting `*` and `?`.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                star = Some((p, t));
                p += 1;
            }
            Some('?') => {
                p += 1;
                t += 1;
            }
            Some(c) if *c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((sp, st)) => {
                    p = sp + 1;
                    t = st + 1;
                    star = Some((sp, st + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        let now = Instant::now();
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => match &entry.value {
                Value::Text(text) => Ok(Some(text.clone())),
                Value::Set(_) => Err(RosterError::cache(format!("Key '{key}' holds a set"))),
            },
            _ => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()> {
        let entry = Entry {
            value: Value::Text(value.to_string()),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .write()
            .remove(key)
            .is_some_and(|e| e.is_live(now)))
    }

    async fn delete_many(&self, keys: &[String]) -> RosterResult<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let deleted = keys
            .iter()
            .filter_map(|key| entries.remove(key))
            .filter(|e| e.is_live(now))
            .count();
        Ok(deleted as u64)
    }

    async fn delete_pattern(&self, pattern: &str) -> RosterResult<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let mut live_removed = 0u64;
        entries.retain(|key, entry| {
            if glob_match(pattern, key) {
                if entry.is_live(now) {
                    live_removed += 1;
                }
                false
            } else {
                true
            }
        });
        Ok(live_removed)
    }

    async fn index_add(&self, index: &str, member: &str, ttl: Duration) -> RosterResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let entry = entries.entry(index.to_string()).or_insert_with(|| Entry {
            value: Value::Set(BTreeSet::new()),
            expires_at: now,
        });

        if !entry.is_live(now) {
            entry.value = Value::Set(BTreeSet::new());
        }
        match &mut entry.value {
            Value::Set(members) => {
                members.insert(member.to_string());
            }
            Value::Text(_) => {
                return Err(RosterError::cache(format!("Key '{index}' does not hold a set")));
            }
        }
        entry.expires_at = now + ttl;
        Ok(())
    }

    async fn index_members(&self, index: &str) -> RosterResult<Vec<String>> {
        let now = Instant::now();
        let entries = self.entries.read();
        match entries.get(index) {
            Some(entry) if entry.is_live(now) => match &entry.value {
                Value::Set(members) => Ok(members.iter().cloned().collect()),
                Value::Text(_) => Err(RosterError::cache(format!("Key '{index}' does not hold a set"))),
            },
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn test_glob_match() {
        assert!(glob_match("a:list:*", "a:list:all:page=1"));
        assert!(glob_match("a:list:*", "a:list:"));
        assert!(!glob_match("a:list:*", "a:item:1"));
        assert!(glob_match("a:?:b", "a:x:b"));
        assert!(glob_match("*page=1*", "x:page=1:size=10"));
        assert!(!glob_match("a", "ab"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache = InMemoryCache::new();
        cache.set_raw("k", "v", TTL).await.unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get_raw("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get_raw("k").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_delete_many() {
        let cache = InMemoryCache::new();
        cache.set_raw("a", "1", TTL).await.unwrap();
        cache.set_raw("b", "2", TTL).await.unwrap();
        cache.set_raw("c", "3", TTL).await.unwrap();

        assert!(cache.delete("a").await.unwrap());
        assert!(!cache.delete("a").await.unwrap());

        let keys = vec!["b".to_string(), "missing".to_string()];
        assert_eq!(cache.delete_many(&keys).await.unwrap(), 1);
        assert!(cache.contains("c"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_pattern() {
        let cache = InMemoryCache::new();
        cache.set_raw("p:list:1", "x", TTL).await.unwrap();
        cache.set_raw("p:list:2", "x", TTL).await.unwrap();
        cache.set_raw("p:item:1", "x", TTL).await.unwrap();

        assert_eq!(cache.delete_pattern("p:list:*").await.unwrap(), 2);
        assert!(cache.contains("p:item:1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_index_refreshes_ttl_on_add() {
        let cache = InMemoryCache::new();
        cache.index_add("idx", "k1", TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(50)).await;
        cache.index_add("idx", "k2", TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(50)).await;
        assert_eq!(cache.index_members("idx").await.unwrap(), vec!["k1", "k2"]);

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(cache.index_members("idx").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_type_mismatch_is_an_error() {
        let cache = InMemoryCache::new();
        cache.index_add("idx", "k", TTL).await.unwrap();
        cache.set_raw("text", "v", TTL).await.unwrap();

        assert!(matches!(cache.get_raw("idx").await, Err(RosterError::Cache(_))));
        assert!(matches!(cache.index_add("text", "k", TTL).await, Err(RosterError::Cache(_))));
    }
}
