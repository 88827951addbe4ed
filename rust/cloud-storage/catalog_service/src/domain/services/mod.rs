//! Domain services - concrete implementation of the catalog service port

mod catalog;
mod items;
mod properties;


use crate::config::CatalogSettings;
use crate::domain::error::{CatalogError, Result};
use crate::domain::models::{
    CatalogPage, CreateItemRequest, CreatePropertyRequest, FilterStats, FilterStatsRequest,
    ItemResponse, ListCatalogRequest, PropertyResponse,
};
use crate::domain::page_cache::PageCache;
use crate::domain::ports::{CatalogService, CatalogStorage, ResultCache};

/// Concrete implementation of CatalogService
pub struct CatalogServiceImpl<S, C> {
    storage: S,
    cache: PageCache<C>,
    settings: CatalogSettings,
}

impl<S, C> CatalogServiceImpl<S, C>
where
    S: CatalogStorage,
    C: ResultCache,
{
    /// Create a new catalog service implementation
    pub fn new(storage: S, cache: C, settings: CatalogSettings) -> Self {
        let cache = PageCache::new(cache, settings.cache_prefix.clone(), settings.cache_ttl);
        Self {
            storage,
            cache,
            settings,
        }
    }
}

impl<S, C> CatalogService for CatalogServiceImpl<S, C>
where
    S: CatalogStorage,
    C: ResultCache,
    CatalogError: From<S::Error>,
{
    #[tracing::instrument(err, skip(self))]
    async fn list_catalog(&self, request: ListCatalogRequest) -> Result<CatalogPage> {
        catalog::list_catalog(self, request).await
    }

    #[tracing::instrument(err, skip(self))]
    async fn get_filter_stats(&self, request: FilterStatsRequest) -> Result<FilterStats> {
        catalog::get_filter_stats(self, request).await
    }

    #[tracing::instrument(err, skip(self))]
    async fn list_properties(&self) -> Result<Vec<PropertyResponse>> {
        properties::list_properties(self).await
    }

    #[tracing::instrument(err, skip(self))]
    async fn get_item(&self, uid: &str) -> Result<ItemResponse> {
        items::get_item(self, uid).await
    }

    #[tracing::instrument(err, skip(self))]
    async fn create_item(&self, request: CreateItemRequest) -> Result<ItemResponse> {
        items::create_item(self, request).await
    }

    #[tracing::instrument(err, skip(self))]
    async fn delete_item(&self, uid: &str) -> Result<()> {
        items::delete_item(self, uid).await
    }

    #[tracing::instrument(err, skip(self))]
    async fn create_property(&self, request: CreatePropertyRequest) -> Result<PropertyResponse> {
        properties::create_property(self, request).await
    }

    #[tracing::instrument(err, skip(self))]
    async fn delete_property(&self, uid: &str) -> Result<()> {
        properties::delete_property(self, uid).await
    }
}
