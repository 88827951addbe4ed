//! Item service operations

use std::collections::HashMap;

use super::CatalogServiceImpl;
use crate::domain::{
    error::{CatalogError, Result},
    models::{CreateItemRequest, ItemResponse, NewItem, Property, PropertyAssignment, PropertyValue},
    ports::{CatalogStorage, ResultCache},
};

pub(super) async fn get_item<S, C>(service: &CatalogServiceImpl<S, C>, uid: &str) -> Result<ItemResponse>
where
    S: CatalogStorage,
    C: ResultCache,
    CatalogError: From<S::Error>,
{
    service
        .storage
        .get_item(uid)
        .await?
        .map(ItemResponse::from)
        .ok_or_else(|| CatalogError::NotFound(format!("Item with uid '{uid}' not found")))
}

pub(super) async fn create_item<S, C>(
    service: &CatalogServiceImpl<S, C>,
    request: CreateItemRequest,
) -> Result<ItemResponse>
where
    S: CatalogStorage,
    C: ResultCache,
    CatalogError: From<S::Error>,
{
    request.validate()?;

    let registry = service.storage.list_properties().await?;
    let by_uid: HashMap<&str, &Property> = registry.iter().map(|p| (p.uid.as_str(), p)).collect();

    let mut assignments = Vec::with_capacity(request.properties.len());
    let mut foreign_values = Vec::new();

    for input in &request.properties {
        let property = by_uid.get(input.uid.as_str()).ok_or_else(|| {
            CatalogError::NotFound(format!("Property with uid '{}' not found", input.uid))
        })?;

        let value = input.to_property_value(property.property_type)?;
        if let PropertyValue::Categorical(value_uid) = &value
            && property.option(value_uid).is_none()
        {
            foreign_values.push(value_uid.clone());
        }

        assignments.push(PropertyAssignment {
            property_uid: property.uid.clone(),
            value,
        });
    }

    // values missing from their property either do not exist or belong elsewhere
    if !foreign_values.is_empty() {
        let known = service.storage.find_options(&foreign_values).await?;
        if let Some(option) = known.first() {
            return Err(CatalogError::ValidationError(format!(
                "Value '{}' belongs to property '{}'",
                option.uid, option.property_uid
            )));
        }
        return Err(CatalogError::NotFound(format!(
            "Property value with uid '{}' not found",
            foreign_values[0]
        )));
    }

    let item = service
        .storage
        .create_item(NewItem {
            uid: request.uid,
            name: request.name,
            assignments,
        })
        .await?;

    service.cache.invalidate_all_catalog_entries().await;
    Ok(ItemResponse::from(item))
}

pub(super) async fn delete_item<S, C>(service: &CatalogServiceImpl<S, C>, uid: &str) -> Result<()>
where
    S: CatalogStorage,
    C: ResultCache,
    CatalogError: From<S::Error>,
{
    if !service.storage.delete_item(uid).await? {
        return Err(CatalogError::NotFound(format!("Item with uid '{uid}' not found")));
    }

    service.cache.invalidate_all_catalog_entries().await;
    Ok(())
}
