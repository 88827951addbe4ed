//! Facet statistics over a filtered item population.
//!
//! Every facet is computed from the same predicate as the reported count,
//! including the filter on the property being aggregated.

use std::collections::BTreeMap;

use crate::domain::models::{FilterStats, ItemPredicate, NumericFacet, Property, PropertyFacet, PropertyType};
use crate::domain::ports::CatalogStorage;

/// Count the items matching `predicate` and aggregate every registered property over them.
/// Properties without a matching assignment are left out of `per_property`.
#[tracing::instrument(skip(storage, registry), fields(properties = registry.len()))]
pub async fn aggregate_facets<S>(
    storage: &S,
    registry: &[Property],
    predicate: &ItemPredicate,
) -> Result<FilterStats, S::Error>
where
    S: CatalogStorage,
{
    let count = storage.count_items(predicate).await?;
    let mut per_property = BTreeMap::new();

    for property in registry {
        let facet = match property.property_type {
            PropertyType::Categorical => {
                value_facet(storage.count_values(&property.uid, predicate).await?)
            }
            PropertyType::Numeric => range_facet(storage.numeric_range(&property.uid, predicate).await?),
        };
        if let Some(facet) = facet {
            per_property.insert(property.uid.clone(), facet);
        }
    }

    Ok(FilterStats { count, per_property })
}

fn value_facet(counts: Vec<(String, u64)>) -> Option<PropertyFacet> {
    let counts: BTreeMap<String, u64> = counts.into_iter().filter(|(_, n)| *n > 0).collect();
    (!counts.is_empty()).then_some(PropertyFacet::Values(counts))
}

fn range_facet(range: Option<(i64, i64)>) -> Option<PropertyFacet> {
    range.map(|(min_value, max_value)| {
        PropertyFacet::Range(NumericFacet {
            min_value,
            max_value,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::CatalogError;
    use crate::domain::ports::MockCatalogStorage;

    #[test]
    fn test_value_facet_drops_empty() {
        assert_eq!(value_facet(vec![]), None);
        assert_eq!(value_facet(vec![("red".to_string(), 0)]), None);
        assert_eq!(
            value_facet(vec![("red".to_string(), 2), ("blue".to_string(), 0)]),
            Some(PropertyFacet::Values(BTreeMap::from([("red".to_string(), 2)])))
        );
    }

    #[tokio::test]
    async fn test_aggregate_uses_one_predicate_for_everything() {
        let predicate = ItemPredicate::new(Some("shirt"));
        let registry = vec![
            Property::categorical("color", "Color", [("red", "Red"), ("blue", "Blue")]),
            Property::categorical("size", "Size", [("M", "Medium")]),
            Property::numeric("price", "Price"),
            Property::numeric("weight", "Weight"),
        ];

        let mut storage = MockCatalogStorage::new();
        let expected = predicate.clone();
        storage
            .expect_count_items()
            .withf(move |p| *p == expected)
            .times(1)
            .returning(|_| Box::pin(async move { Ok::<_, CatalogError>(3) }));
        let expected = predicate.clone();
        storage
            .expect_count_values()
            .withf(move |uid, p| uid == "color" && *p == expected)
            .times(1)
            .returning(|_, _| {
                Box::pin(async move {
                    Ok::<_, CatalogError>(vec![("blue".to_string(), 1), ("red".to_string(), 2)])
                })
            });
        storage
            .expect_count_values()
            .withf(|uid, _| uid == "size")
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok::<_, CatalogError>(vec![]) }));
        let expected = predicate.clone();
        storage
            .expect_numeric_range()
            .withf(move |uid, p| uid == "price" && *p == expected)
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok::<_, CatalogError>(Some((20, 30))) }));
        storage
            .expect_numeric_range()
            .withf(|uid, _| uid == "weight")
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok::<_, CatalogError>(None) }));

        let stats = aggregate_facets(&storage, &registry, &predicate).await.unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(
            stats.per_property,
            BTreeMap::from([
                (
                    "color".to_string(),
                    PropertyFacet::Values(BTreeMap::from([
                        ("blue".to_string(), 1),
                        ("red".to_string(), 2)
                    ]))
                ),
                (
                    "price".to_string(),
                    PropertyFacet::Range(NumericFacet {
                        min_value: 20,
                        max_value: 30
                    })
                ),
            ])
        );
    }

    #[tokio::test]
    async fn test_aggregate_propagates_storage_errors() {
        let mut storage = MockCatalogStorage::new();
        storage.expect_count_items().returning(|_| {
            Box::pin(async move { Err(CatalogError::Internal(anyhow::anyhow!("connection reset"))) })
        });

        let result = aggregate_facets(&storage, &[], &ItemPredicate::default()).await;
        assert!(matches!(result, Err(CatalogError::Internal(_))));
    }
}
