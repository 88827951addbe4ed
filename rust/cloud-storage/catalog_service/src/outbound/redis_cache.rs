//! Redis implementation of the result cache port

use std::time::Duration;

use anyhow::Context;
use redis::AsyncCommands;

use crate::domain::ports::ResultCache;

/// Keys fetched per SCAN round trip
const SCAN_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone)]
pub struct RedisResultCache {
    client: redis::Client,
}

impl RedisResultCache {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    /// Build the cache from a `redis://` url. Does not connect yet.
    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(url).context("unable to create redis client")?;
        Ok(Self::new(client))
    }

    async fn connection(&self) -> anyhow::Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("unable to connect to redis")
    }
}

impl ResultCache for RedisResultCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut redis_connection = self.connection().await?;

        let value = redis_connection
            .get::<&str, Option<String>>(key)
            .await
            .with_context(|| format!("unable to get value for key {}", key))?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> anyhow::Result<()> {
        let mut redis_connection = self.connection().await?;

        // SET EX rejects a zero expiry
        let expiry_seconds = ttl.as_secs().max(1);
        redis_connection
            .set_ex::<&str, String, ()>(key, value, expiry_seconds)
            .await
            .with_context(|| format!("unable to set key {} with expiry", key))?;

        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> anyhow::Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut redis_connection = self.connection().await?;

        redis_connection
            .del::<&[String], ()>(keys)
            .await
            .context("unable to delete keys")?;

        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        let mut redis_connection = self.connection().await?;
        let pattern = format!("{}*", escape_glob(prefix));

        let mut keys = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next_cursor, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut redis_connection)
                .await
                .with_context(|| format!("unable to scan keys matching {}", pattern))?;

            keys.extend(batch);
            if next_cursor == 0 {
                break;
            }
            cursor = next_cursor;
        }

        // SCAN may return a key more than once
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }

    async fn increment(&self, key: &str) -> anyhow::Result<u64> {
        let mut redis_connection = self.connection().await?;

        let value = redis_connection
            .incr::<&str, u64, u64>(key, 1)
            .await
            .with_context(|| format!("failed to increment key {}", key))?;

        Ok(value)
    }
}

/// Escape the characters SCAN MATCH treats as glob syntax
fn escape_glob(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_glob() {
        assert_eq!(escape_glob("catalog:"), "catalog:");
        assert_eq!(escape_glob("shop[1]*"), "shop\\[1\\]\\*");
    }

    #[test]
    fn test_from_url_rejects_garbage() {
        assert!(RedisResultCache::from_url("not a url").is_err());
        assert!(RedisResultCache::from_url("redis://127.0.0.1:6379").is_ok());
    }
}
