use std::fmt;

use models_catalog::service::{Item, ItemPropertyValue};

use super::NumericRange;
use crate::config::CatalogSettings;
use crate::domain::error::{CatalogError, Result};

/// Supported orderings of a catalog page. Both end in uid order, uid being unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Uid,
    Name,
}

impl SortKey {
    /// Unrecognised or absent keys fall back to uid order
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("name") => SortKey::Name,
            _ => SortKey::Uid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Uid => "uid",
            SortKey::Name => "name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    page: u32,
    page_size: u32,
}

impl PageWindow {
    pub fn new(page: Option<u32>, page_size: Option<u32>, settings: &CatalogSettings) -> Result<Self> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(settings.default_page_size);

        if page == 0 {
            return Err(CatalogError::MalformedInput(
                "page must be 1 or greater".to_string(),
            ));
        }
        if page_size == 0 || page_size > settings.max_page_size {
            return Err(CatalogError::MalformedInput(format!(
                "page_size must be between 1 and {}",
                settings.max_page_size
            )));
        }

        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

/// What an item's assignment for one property has to satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Assigned value uid is one of these (sorted, non-empty)
    ValueIn(Vec<String>),
    /// Assigned integer lies in the range
    Between(NumericRange),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyConstraint {
    pub property_uid: String,
    pub kind: ConstraintKind,
}

impl PropertyConstraint {
    pub fn is_satisfied_by(&self, item: &Item) -> bool {
        let Some(prop) = item.property(&self.property_uid) else {
            return false;
        };
        match (&self.kind, &prop.value) {
            (ConstraintKind::ValueIn(values), ItemPropertyValue::Categorical { value_uid, .. }) => {
                values.binary_search(value_uid).is_ok()
            }
            (ConstraintKind::Between(range), ItemPropertyValue::Numeric(n)) => range.contains(*n),
            _ => false,
        }
    }
}

/// Conjunction of a name search and per-property constraints.
///
/// An item matches when its name contains the fragment (ignoring case) and
/// every constraint is satisfied. No constraints and no fragment match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPredicate {
    name_fragment: Option<String>,
    constraints: Vec<PropertyConstraint>,
}

impl ItemPredicate {
    /// An empty fragment is treated as no fragment
    pub fn new(name_fragment: Option<&str>) -> Self {
        Self {
            name_fragment: name_fragment
                .filter(|fragment| !fragment.is_empty())
                .map(str::to_string),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: PropertyConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn name_fragment(&self) -> Option<&str> {
        self.name_fragment.as_deref()
    }

    pub fn constraints(&self) -> &[PropertyConstraint] {
        &self.constraints
    }

    pub fn matches_name(&self, name: &str) -> bool {
        match &self.name_fragment {
            Some(fragment) => name.to_lowercase().contains(&fragment.to_lowercase()),
            None => true,
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.matches_name(&item.name) && self.constraints.iter().all(|c| c.is_satisfied_by(item))
    }
}

/// Everything needed to fetch one ordered page of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSelection {
    pub predicate: ItemPredicate,
    pub sort: SortKey,
    pub window: PageWindow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_asserts::assert_matches;
    use models_catalog::service::ItemProperty;

    fn item(uid: &str, name: &str, color: Option<&str>, price: Option<i64>) -> Item {
        let mut properties = Vec::new();
        if let Some(color) = color {
            properties.push(ItemProperty {
                property_uid: "color".to_string(),
                property_name: "Color".to_string(),
                value: ItemPropertyValue::Categorical {
                    value_uid: color.to_string(),
                    text: color.to_uppercase(),
                },
            });
        }
        if let Some(price) = price {
            properties.push(ItemProperty {
                property_uid: "price".to_string(),
                property_name: "Price".to_string(),
                value: ItemPropertyValue::Numeric(price),
            });
        }
        Item {
            uid: uid.to_string(),
            name: name.to_string(),
            properties,
        }
    }

    #[test]
    fn test_sort_key_fallback() {
        assert_eq!(SortKey::parse(Some("name")), SortKey::Name);
        assert_eq!(SortKey::parse(Some("uid")), SortKey::Uid);
        assert_eq!(SortKey::parse(Some("price")), SortKey::Uid);
        assert_eq!(SortKey::parse(None), SortKey::Uid);
    }

    #[test]
    fn test_page_window_bounds() {
        let settings = CatalogSettings::default();

        let window = PageWindow::new(None, None, &settings).unwrap();
        assert_eq!(window.page(), 1);
        assert_eq!(window.page_size(), 10);
        assert_eq!(window.offset(), 0);

        let window = PageWindow::new(Some(3), Some(20), &settings).unwrap();
        assert_eq!(window.offset(), 40);

        assert_matches!(
            PageWindow::new(Some(0), None, &settings),
            Err(CatalogError::MalformedInput(_))
        );
        assert_matches!(
            PageWindow::new(None, Some(0), &settings),
            Err(CatalogError::MalformedInput(_))
        );
        assert_matches!(
            PageWindow::new(None, Some(101), &settings),
            Err(CatalogError::MalformedInput(_))
        );
    }

    #[test]
    fn test_name_match_ignores_case() {
        let predicate = ItemPredicate::new(Some("SHIRT"));
        assert!(predicate.matches_name("Blue shirt"));
        assert!(!predicate.matches_name("Blue shoes"));

        let predicate = ItemPredicate::new(Some(""));
        assert_eq!(predicate.name_fragment(), None);
        assert!(predicate.matches_name("anything"));
    }

    #[test]
    fn test_constraints_are_conjunctive() {
        let predicate = ItemPredicate::new(None)
            .with_constraint(PropertyConstraint {
                property_uid: "color".to_string(),
                kind: ConstraintKind::ValueIn(vec!["blue".to_string(), "red".to_string()]),
            })
            .with_constraint(PropertyConstraint {
                property_uid: "price".to_string(),
                kind: ConstraintKind::Between(NumericRange::new(Some(15), None)),
            });

        assert!(predicate.matches(&item("A", "Alpha", Some("red"), Some(20))));
        assert!(predicate.matches(&item("B", "Beta", Some("blue"), Some(15))));
        assert!(!predicate.matches(&item("C", "Gamma", Some("green"), Some(20))));
        assert!(!predicate.matches(&item("D", "Delta", Some("red"), Some(10))));
        assert!(!predicate.matches(&item("E", "Epsilon", None, Some(20))));
        assert!(!predicate.matches(&item("F", "Phi", Some("red"), None)));
    }
}
