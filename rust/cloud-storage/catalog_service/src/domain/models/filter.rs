use std::collections::{BTreeMap, BTreeSet};

/// Integer bound of a numeric filter. Both ends are inclusive and optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NumericRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl NumericRange {
    pub fn new(from: Option<i64>, to: Option<i64>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.from.is_none_or(|from| value >= from) && self.to.is_none_or(|to| value <= to)
    }
}

/// Constraint on a single property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyFilter {
    /// Item must hold one of these value uids. Never empty.
    Values(BTreeSet<String>),
    /// Item's integer must fall inside the range
    Range(NumericRange),
}

/// Typed filter set of a single request, keyed by property uid.
///
/// Backed by ordered collections so iteration is always by property uid,
/// then by value uid, whatever order the filters were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: BTreeMap<String, PropertyFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a categorical filter. An empty value list adds nothing.
    pub fn with_values<I, V>(mut self, property_uid: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.filters
                .insert(property_uid.into(), PropertyFilter::Values(values));
        }
        self
    }

    /// Add a numeric filter
    pub fn with_range(
        mut self,
        property_uid: impl Into<String>,
        from: Option<i64>,
        to: Option<i64>,
    ) -> Self {
        self.filters.insert(
            property_uid.into(),
            PropertyFilter::Range(NumericRange::new(from, to)),
        );
        self
    }

    pub fn insert(&mut self, property_uid: String, filter: PropertyFilter) {
        self.filters.insert(property_uid, filter);
    }

    pub fn get(&self, property_uid: &str) -> Option<&PropertyFilter> {
        self.filters.get(property_uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropertyFilter)> {
        self.filters.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }
}
