//! Catalog read operations: pages and facet statistics

use super::CatalogServiceImpl;
use crate::domain::{
    error::{CatalogError, Result},
    facets::aggregate_facets,
    models::{
        CatalogPage, FilterStats, FilterStatsRequest, ItemResponse, ListCatalogRequest, PageWindow,
        SortKey,
    },
    page_cache::{page_key, stats_key},
    ports::{CatalogStorage, ResultCache},
    query_composer::{compose_predicate, compose_selection},
};

pub(super) async fn list_catalog<S, C>(
    service: &CatalogServiceImpl<S, C>,
    request: ListCatalogRequest,
) -> Result<CatalogPage>
where
    S: CatalogStorage,
    C: ResultCache,
    CatalogError: From<S::Error>,
{
    let window = PageWindow::new(request.page, request.page_size, &service.settings)?;
    let sort = SortKey::parse(request.sort.as_deref());
    let name = request.name.as_deref().filter(|name| !name.is_empty());

    // resolved before the store is read so a concurrent write retires our entry
    let key = service
        .cache
        .namespace()
        .await
        .map(|namespace| page_key(&namespace, window, name, sort, &request.filters));
    if let Some(key) = &key
        && let Some(page) = service.cache.get::<CatalogPage>(key).await
    {
        return Ok(page);
    }

    let registry = service.storage.list_properties().await?;
    let selection = compose_selection(&request.filters, &registry, name, sort, window)?;

    // count is taken over the whole matching population, not the page
    let count = service.storage.count_items(&selection.predicate).await?;
    let items = service.storage.select_items(&selection).await?;

    let page = CatalogPage {
        items: items.into_iter().map(ItemResponse::from).collect(),
        count,
    };

    if let Some(key) = &key {
        service.cache.put(key, &page).await;
    }
    Ok(page)
}

pub(super) async fn get_filter_stats<S, C>(
    service: &CatalogServiceImpl<S, C>,
    request: FilterStatsRequest,
) -> Result<FilterStats>
where
    S: CatalogStorage,
    C: ResultCache,
    CatalogError: From<S::Error>,
{
    let name = request.name.as_deref().filter(|name| !name.is_empty());

    let key = service
        .cache
        .namespace()
        .await
        .map(|namespace| stats_key(&namespace, name, &request.filters));
    if let Some(key) = &key
        && let Some(stats) = service.cache.get::<FilterStats>(key).await
    {
        return Ok(stats);
    }

    let registry = service.storage.list_properties().await?;
    let predicate = compose_predicate(&request.filters, &registry, name)?;
    let stats = aggregate_facets(&service.storage, &registry, &predicate).await?;

    if let Some(key) = &key {
        service.cache.put(key, &stats).await;
    }
    Ok(stats)
}
