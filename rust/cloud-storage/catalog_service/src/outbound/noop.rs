use std::time::Duration;

use crate::domain::ports::ResultCache;

/// Result cache used when no cache is configured: stores nothing, every read misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResultCache;

impl ResultCache for NoopResultCache {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> anyhow::Result<()> {
        Ok(())
    }

    async fn delete(&self, _keys: &[String]) -> anyhow::Result<()> {
        Ok(())
    }

    async fn keys_with_prefix(&self, _prefix: &str) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn increment(&self, _key: &str) -> anyhow::Result<u64> {
        Ok(0)
    }
}
