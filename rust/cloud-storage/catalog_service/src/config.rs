use anyhow::Context;
use std::time::Duration;

/// Tunables handed to the catalog facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Fixed lifetime of every cached page and facet result
    pub cache_ttl: Duration,
    /// Namespace shared by every catalog cache key
    pub cache_prefix: String,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(3600),
            cache_prefix: "catalog".to_string(),
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// Configuration parameters for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The connection URL for the catalog Postgres database
    pub database_url: String,
    /// Redis holding the result cache. No url means no cache.
    pub redis_url: Option<String>,
    pub settings: CatalogSettings,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be provided")?;
        let redis_url = lookup("REDIS_URL").filter(|url| !url.trim().is_empty());

        let defaults = CatalogSettings::default();

        let cache_ttl = match lookup("CATALOG_CACHE_TTL_SECONDS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("CATALOG_CACHE_TTL_SECONDS must be a number of seconds")?,
            ),
            None => defaults.cache_ttl,
        };
        let cache_prefix = lookup("CATALOG_CACHE_PREFIX").unwrap_or(defaults.cache_prefix);
        let default_page_size = match lookup("CATALOG_DEFAULT_PAGE_SIZE") {
            Some(raw) => raw
                .parse::<u32>()
                .context("CATALOG_DEFAULT_PAGE_SIZE must be a positive integer")?,
            None => defaults.default_page_size,
        };
        let max_page_size = match lookup("CATALOG_MAX_PAGE_SIZE") {
            Some(raw) => raw
                .parse::<u32>()
                .context("CATALOG_MAX_PAGE_SIZE must be a positive integer")?,
            None => defaults.max_page_size,
        };

        if default_page_size == 0 || default_page_size > max_page_size {
            anyhow::bail!(
                "CATALOG_DEFAULT_PAGE_SIZE ({default_page_size}) must be between 1 and CATALOG_MAX_PAGE_SIZE ({max_page_size})"
            );
        }

        Ok(Config {
            database_url,
            redis_url,
            settings: CatalogSettings {
                cache_ttl,
                cache_prefix,
                default_page_size,
                max_page_size,
            },
        })
    }
}
