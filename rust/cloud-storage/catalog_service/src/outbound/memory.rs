//! In-process implementation of the storage port.
//!
//! Evaluates [ItemPredicate]s directly against the stored items and enforces the
//! same uniqueness and referential rules as the relational schema.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::error::CatalogError;
use crate::domain::models::{
    Item, ItemPredicate, ItemProperty, ItemPropertyValue, ItemSelection, NewItem, Property,
    PropertyOption, PropertyValue, SortKey,
};
use crate::domain::ports::CatalogStorage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryStorageError {
    #[error("Property with uid '{0}' already exists")]
    DuplicateProperty(String),
    #[error("Property value with uid '{0}' already exists")]
    DuplicateValue(String),
    #[error("Item with uid '{0}' already exists")]
    DuplicateItem(String),
    #[error("Property with uid '{0}' not found")]
    UnknownProperty(String),
    #[error("Property value with uid '{0}' not found")]
    UnknownValue(String),
    #[error("Assignment does not match the type of property '{0}'")]
    KindMismatch(String),
    #[error("Property '{0}' is assigned more than once")]
    DuplicateAssignment(String),
}

impl From<InMemoryStorageError> for CatalogError {
    fn from(err: InMemoryStorageError) -> Self {
        match err {
            InMemoryStorageError::DuplicateProperty(_)
            | InMemoryStorageError::DuplicateValue(_)
            | InMemoryStorageError::DuplicateItem(_) => CatalogError::Conflict(err.to_string()),
            InMemoryStorageError::UnknownProperty(_) | InMemoryStorageError::UnknownValue(_) => {
                CatalogError::NotFound(err.to_string())
            }
            InMemoryStorageError::KindMismatch(_) | InMemoryStorageError::DuplicateAssignment(_) => {
                CatalogError::ValidationError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone)]
struct StoredItem {
    name: String,
    /// property uid -> payload
    assignments: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Default)]
struct CatalogState {
    properties: BTreeMap<String, Property>,
    /// value uid -> owning property uid
    value_owners: HashMap<String, String>,
    items: BTreeMap<String, StoredItem>,
}

impl CatalogState {
    fn hydrate(&self, uid: &str, stored: &StoredItem) -> Item {
        let properties = stored
            .assignments
            .iter()
            .filter_map(|(property_uid, value)| {
                let property = self.properties.get(property_uid)?;
                let value = match value {
                    PropertyValue::Categorical(value_uid) => ItemPropertyValue::Categorical {
                        value_uid: value_uid.clone(),
                        text: property.option(value_uid)?.text.clone(),
                    },
                    PropertyValue::Numeric(n) => ItemPropertyValue::Numeric(*n),
                };
                Some(ItemProperty {
                    property_uid: property_uid.clone(),
                    property_name: property.name.clone(),
                    value,
                })
            })
            .collect();

        Item {
            uid: uid.to_string(),
            name: stored.name.clone(),
            properties,
        }
    }

    fn matching<'a>(&'a self, predicate: &'a ItemPredicate) -> impl Iterator<Item = Item> + 'a {
        self.items
            .iter()
            .map(|(uid, stored)| self.hydrate(uid, stored))
            .filter(move |item| predicate.matches(item))
    }
}

/// Catalog storage held in process memory. Clones share the same catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStorage {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalogStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStorage for InMemoryCatalogStorage {
    type Error = InMemoryStorageError;

    async fn list_properties(&self) -> Result<Vec<Property>, Self::Error> {
        let state = self.state.read().await;
        Ok(state.properties.values().cloned().collect())
    }

    async fn find_options(&self, value_uids: &[String]) -> Result<Vec<PropertyOption>, Self::Error> {
        let state = self.state.read().await;
        Ok(value_uids
            .iter()
            .filter_map(|value_uid| {
                let owner = state.value_owners.get(value_uid)?;
                state.properties.get(owner)?.option(value_uid).cloned()
            })
            .collect())
    }

    async fn create_property(&self, property: Property) -> Result<Property, Self::Error> {
        let mut state = self.state.write().await;

        if state.properties.contains_key(&property.uid) {
            return Err(InMemoryStorageError::DuplicateProperty(property.uid));
        }
        for option in &property.options {
            if state.value_owners.contains_key(&option.uid) {
                return Err(InMemoryStorageError::DuplicateValue(option.uid.clone()));
            }
        }

        for option in &property.options {
            state
                .value_owners
                .insert(option.uid.clone(), property.uid.clone());
        }
        state
            .properties
            .insert(property.uid.clone(), property.clone());

        Ok(property)
    }

    async fn delete_property(&self, uid: &str) -> Result<bool, Self::Error> {
        let mut state = self.state.write().await;

        let Some(property) = state.properties.remove(uid) else {
            return Ok(false);
        };
        for option in &property.options {
            state.value_owners.remove(&option.uid);
        }
        for item in state.items.values_mut() {
            item.assignments.remove(uid);
        }

        Ok(true)
    }

    async fn get_item(&self, uid: &str) -> Result<Option<Item>, Self::Error> {
        let state = self.state.read().await;
        Ok(state
            .items
            .get(uid)
            .map(|stored| state.hydrate(uid, stored)))
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, Self::Error> {
        let mut state = self.state.write().await;

        if state.items.contains_key(&item.uid) {
            return Err(InMemoryStorageError::DuplicateItem(item.uid));
        }

        let mut assignments = BTreeMap::new();
        for assignment in item.assignments {
            let property = state
                .properties
                .get(&assignment.property_uid)
                .ok_or_else(|| InMemoryStorageError::UnknownProperty(assignment.property_uid.clone()))?;

            if assignment.value.property_type() != property.property_type {
                return Err(InMemoryStorageError::KindMismatch(assignment.property_uid));
            }
            if let PropertyValue::Categorical(value_uid) = &assignment.value
                && property.option(value_uid).is_none()
            {
                return Err(InMemoryStorageError::UnknownValue(value_uid.clone()));
            }
            if assignments.contains_key(&assignment.property_uid) {
                return Err(InMemoryStorageError::DuplicateAssignment(assignment.property_uid));
            }

            assignments.insert(assignment.property_uid, assignment.value);
        }

        let stored = StoredItem {
            name: item.name,
            assignments,
        };
        let created = state.hydrate(&item.uid, &stored);
        state.items.insert(item.uid, stored);

        Ok(created)
    }

    async fn delete_item(&self, uid: &str) -> Result<bool, Self::Error> {
        let mut state = self.state.write().await;
        Ok(state.items.remove(uid).is_some())
    }

    async fn select_items(&self, selection: &ItemSelection) -> Result<Vec<Item>, Self::Error> {
        let state = self.state.read().await;

        // items are already in uid order
        let mut items: Vec<Item> = state.matching(&selection.predicate).collect();
        if selection.sort == SortKey::Name {
            items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.uid.cmp(&b.uid)));
        }

        let offset = usize::try_from(selection.window.offset()).unwrap_or(usize::MAX);
        Ok(items
            .into_iter()
            .skip(offset)
            .take(selection.window.page_size() as usize)
            .collect())
    }

    async fn count_items(&self, predicate: &ItemPredicate) -> Result<u64, Self::Error> {
        let state = self.state.read().await;
        Ok(state.matching(predicate).count() as u64)
    }

    async fn count_values(
        &self,
        property_uid: &str,
        predicate: &ItemPredicate,
    ) -> Result<Vec<(String, u64)>, Self::Error> {
        let state = self.state.read().await;

        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for item in state.matching(predicate) {
            if let Some(ItemProperty {
                value: ItemPropertyValue::Categorical { value_uid, .. },
                ..
            }) = item.property(property_uid)
            {
                *counts.entry(value_uid.clone()).or_default() += 1;
            }
        }

        Ok(counts.into_iter().collect())
    }

    async fn numeric_range(
        &self,
        property_uid: &str,
        predicate: &ItemPredicate,
    ) -> Result<Option<(i64, i64)>, Self::Error> {
        let state = self.state.read().await;

        let range = state
            .matching(predicate)
            .filter_map(|item| match item.property(property_uid)?.value {
                ItemPropertyValue::Numeric(n) => Some(n),
                ItemPropertyValue::Categorical { .. } => None,
            })
            .fold(None, |range, n| match range {
                None => Some((n, n)),
                Some((min, max)) => Some((i64::min(min, n), i64::max(max, n))),
            });

        Ok(range)
    }
}
