//! Composes a typed [FilterSet] into an [ItemPredicate] the storage port can evaluate.
//!
//! Each filtered property becomes one [PropertyConstraint]. Constraints are
//! conjunctive across properties while a categorical constraint accepts any of its
//! values. This is where filters are checked against the property registry.

use std::collections::HashMap;

use crate::domain::error::{CatalogError, Result};
use crate::domain::models::{
    ConstraintKind, FilterSet, ItemPredicate, ItemSelection, PageWindow, Property,
    PropertyConstraint, PropertyFilter, PropertyType, SortKey,
};

/// Build the predicate shared by the page query, the count query and the facets
pub fn compose_predicate(
    filters: &FilterSet,
    registry: &[Property],
    name_fragment: Option<&str>,
) -> Result<ItemPredicate> {
    let by_uid: HashMap<&str, &Property> = registry.iter().map(|p| (p.uid.as_str(), p)).collect();

    let mut predicate = ItemPredicate::new(name_fragment);
    for (property_uid, filter) in filters.iter() {
        let property = by_uid.get(property_uid.as_str()).ok_or_else(|| {
            CatalogError::NotFound(format!("Property with uid '{property_uid}' not found"))
        })?;

        let kind = match (filter, property.property_type) {
            (PropertyFilter::Values(values), PropertyType::Categorical) => {
                ConstraintKind::ValueIn(values.iter().cloned().collect())
            }
            (PropertyFilter::Range(range), PropertyType::Numeric) => ConstraintKind::Between(*range),
            (PropertyFilter::Values(_), PropertyType::Numeric) => {
                return Err(CatalogError::ValidationError(format!(
                    "Property '{property_uid}' is of type int and can only be filtered by a range"
                )));
            }
            (PropertyFilter::Range(_), PropertyType::Categorical) => {
                return Err(CatalogError::ValidationError(format!(
                    "Property '{property_uid}' is of type list and can only be filtered by values"
                )));
            }
        };

        predicate = predicate.with_constraint(PropertyConstraint {
            property_uid: property_uid.clone(),
            kind,
        });
    }

    Ok(predicate)
}

/// Build the ordered, windowed selection for one catalog page
pub fn compose_selection(
    filters: &FilterSet,
    registry: &[Property],
    name_fragment: Option<&str>,
    sort: SortKey,
    window: PageWindow,
) -> Result<ItemSelection> {
    Ok(ItemSelection {
        predicate: compose_predicate(filters, registry, name_fragment)?,
        sort,
        window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogSettings;
    use crate::domain::models::NumericRange;
    use cool_asserts::assert_matches;

    fn registry() -> Vec<Property> {
        vec![
            Property::categorical("color", "Color", [("red", "Red"), ("blue", "Blue")]),
            Property::categorical("size", "Size", [("M", "Medium")]),
            Property::numeric("price", "Price"),
        ]
    }

    #[test]
    fn test_constraints_follow_property_order() {
        let filters = FilterSet::new()
            .with_range("price", Some(15), None)
            .with_values("size", ["M"])
            .with_values("color", ["red", "blue"]);

        let predicate = compose_predicate(&filters, &registry(), Some("shirt")).unwrap();

        assert_eq!(predicate.name_fragment(), Some("shirt"));
        assert_eq!(
            predicate.constraints(),
            &[
                PropertyConstraint {
                    property_uid: "color".to_string(),
                    kind: ConstraintKind::ValueIn(vec!["blue".to_string(), "red".to_string()]),
                },
                PropertyConstraint {
                    property_uid: "price".to_string(),
                    kind: ConstraintKind::Between(NumericRange::new(Some(15), None)),
                },
                PropertyConstraint {
                    property_uid: "size".to_string(),
                    kind: ConstraintKind::ValueIn(vec!["M".to_string()]),
                },
            ]
        );
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let predicate = compose_predicate(&FilterSet::new(), &registry(), None).unwrap();
        assert_eq!(predicate, ItemPredicate::default());
    }

    #[test]
    fn test_unknown_property() {
        let filters = FilterSet::new().with_values("material", ["cotton"]);
        assert_matches!(
            compose_predicate(&filters, &registry(), None),
            Err(CatalogError::NotFound(_))
        );
    }

    #[test]
    fn test_filter_kind_must_match_property_type() {
        let filters = FilterSet::new().with_values("price", ["10"]);
        assert_matches!(
            compose_predicate(&filters, &registry(), None),
            Err(CatalogError::ValidationError(_))
        );

        let filters = FilterSet::new().with_range("color", Some(1), None);
        assert_matches!(
            compose_predicate(&filters, &registry(), None),
            Err(CatalogError::ValidationError(_))
        );
    }

    #[test]
    fn test_selection_carries_sort_and_window() {
        let window = PageWindow::new(Some(2), Some(5), &CatalogSettings::default()).unwrap();
        let selection =
            compose_selection(&FilterSet::new(), &registry(), None, SortKey::Name, window).unwrap();

        assert_eq!(selection.sort, SortKey::Name);
        assert_eq!(selection.window.offset(), 5);
    }
}
