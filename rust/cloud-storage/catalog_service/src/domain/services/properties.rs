//! Property registry service operations

use std::collections::HashSet;

use super::CatalogServiceImpl;
use crate::domain::{
    error::{CatalogError, Result},
    models::{CreatePropertyRequest, Property, PropertyOption, PropertyResponse},
    ports::{CatalogStorage, ResultCache},
};

pub(super) async fn list_properties<S, C>(
    service: &CatalogServiceImpl<S, C>,
) -> Result<Vec<PropertyResponse>>
where
    S: CatalogStorage,
    C: ResultCache,
    CatalogError: From<S::Error>,
{
    let properties = service.storage.list_properties().await?;
    Ok(properties.into_iter().map(PropertyResponse::from).collect())
}

pub(super) async fn create_property<S, C>(
    service: &CatalogServiceImpl<S, C>,
    request: CreatePropertyRequest,
) -> Result<PropertyResponse>
where
    S: CatalogStorage,
    C: ResultCache,
    CatalogError: From<S::Error>,
{
    let property_type = request.validate()?;

    let mut seen = HashSet::new();
    let options: Vec<PropertyOption> = request
        .values
        .unwrap_or_default()
        .into_iter()
        .map(|input| {
            if !seen.insert(input.value_uid.clone()) {
                return Err(CatalogError::Conflict(format!(
                    "Value uid '{}' is declared more than once",
                    input.value_uid
                )));
            }
            Ok(PropertyOption {
                uid: input.value_uid,
                property_uid: request.uid.clone(),
                text: input.value,
            })
        })
        .collect::<Result<_>>()?;

    let property = service
        .storage
        .create_property(Property {
            uid: request.uid,
            name: request.name,
            property_type,
            options,
        })
        .await?;

    service.cache.invalidate_all_catalog_entries().await;
    Ok(PropertyResponse::from(property))
}

pub(super) async fn delete_property<S, C>(service: &CatalogServiceImpl<S, C>, uid: &str) -> Result<()>
where
    S: CatalogStorage,
    C: ResultCache,
    CatalogError: From<S::Error>,
{
    if !service.storage.delete_property(uid).await? {
        return Err(CatalogError::NotFound(format!("Property with uid '{uid}' not found")));
    }

    service.cache.invalidate_all_catalog_entries().await;
    Ok(())
}
