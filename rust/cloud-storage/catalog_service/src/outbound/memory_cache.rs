//! Process-local result cache with fixed expiry

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::ports::ResultCache;

#[derive(Debug)]
struct Entry {
    value: String,
    /// None never expires
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}

/// Result cache held in process memory. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries that have not expired yet
    pub async fn live_entries(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }
}

impl ResultCache for InMemoryResultCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> anyhow::Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(
            key.to_string(),
            Entry {
                value,
                // a ttl past the end of the clock is as good as no expiry
                expires_at: now.checked_add(ttl),
            },
        );
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> anyhow::Result<()> {
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && entry.is_live(now))
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn increment(&self, key: &str) -> anyhow::Result<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let current = match entries.get(key).filter(|entry| entry.is_live(now)) {
            Some(entry) => entry
                .value
                .parse::<u64>()
                .with_context(|| format!("value under {} is not a counter", key))?,
            None => 0,
        };
        let next = current.saturating_add(1);

        entries.insert(
            key.to_string(),
            Entry {
                value: next.to_string(),
                expires_at: None,
            },
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = InMemoryResultCache::new();
        cache
            .set("catalog:a", "1".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .set("other:b", "2".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get("catalog:a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(cache.get("catalog:z").await.unwrap(), None);
        assert_eq!(
            cache.keys_with_prefix("catalog:").await.unwrap(),
            vec!["catalog:a".to_string()]
        );

        cache.delete(&["catalog:a".to_string()]).await.unwrap();
        assert_eq!(cache.get("catalog:a").await.unwrap(), None);
        assert_eq!(cache.live_entries().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entries_are_invisible() {
        let cache = InMemoryResultCache::new();
        cache
            .set("catalog:a", "1".to_string(), Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(cache.get("catalog:a").await.unwrap(), None);
        assert!(cache.keys_with_prefix("catalog:").await.unwrap().is_empty());
        assert_eq!(cache.live_entries().await, 0);
    }

    #[tokio::test]
    async fn test_unbounded_ttl_never_expires() {
        let cache = InMemoryResultCache::new();
        cache
            .set("catalog:a", "1".to_string(), Duration::MAX)
            .await
            .unwrap();
        cache
            .set("catalog:b", "2".to_string(), Duration::from_secs(u64::MAX))
            .await
            .unwrap();

        assert_eq!(cache.get("catalog:a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(cache.get("catalog:b").await.unwrap().as_deref(), Some("2"));
        assert_eq!(cache.live_entries().await, 2);
    }

    #[tokio::test]
    async fn test_increment_counts_from_zero() {
        let cache = InMemoryResultCache::new();

        assert_eq!(cache.increment("catalog.generation").await.unwrap(), 1);
        assert_eq!(cache.increment("catalog.generation").await.unwrap(), 2);
        assert_eq!(
            cache.get("catalog.generation").await.unwrap().as_deref(),
            Some("2")
        );

        cache
            .set("catalog:a", "page".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(cache.increment("catalog:a").await.is_err());
    }
}
