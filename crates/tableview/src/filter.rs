//! Equality filters driven by dropdowns.
//!
//! Each filter pins one field to one accepted value. Filters combine with
//! AND; a filter set to the "all" choice keeps its field but constrains
//! nothing.

use std::collections::BTreeMap;

use crate::clause::{Clause, ClauseValue};
use crate::error::Result;
use crate::op::Op;
use crate::schema::Schema;

/// The choice made in one filter dropdown.
#[derive(Debug, Clone)]
pub enum Accept {
    /// No constraint on the field.
    All,
    /// The field must equal this value.
    Only(ClauseValue),
}

/// One filter dropdown: the field and its current choice.
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: String,
    pub accept: Accept,
}

impl Filter {
    pub fn new(field: impl Into<String>, accept: Accept) -> Self {
        Filter {
            field: field.into(),
            accept,
        }
    }

    /// Validates the field and turns the choice into an equality clause.
    ///
    /// Text equal to `all_sentinel` counts as [`Accept::All`]. Returns
    /// `None` when the filter constrains nothing.
    pub fn resolve(self, schema: &Schema, all_sentinel: &str) -> Result<Option<Clause>> {
        schema.require(&self.field)?;
        match self.accept {
            Accept::All => Ok(None),
            Accept::Only(ClauseValue::Text(choice)) if choice == all_sentinel => Ok(None),
            Accept::Only(value) => Clause::new(self.field, Op::Eq, value)
                .resolve(schema)
                .map(Some),
        }
    }
}

/// The full set of filter dropdowns of a view.
///
/// ```
/// use tableview::FilterSpec;
///
/// let filters = FilterSpec::new()
///     .with("status", "active")
///     .with("type", "all");
/// assert_eq!(filters.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    filters: Vec<Filter>,
}

impl FilterSpec {
    pub fn new() -> Self {
        FilterSpec::default()
    }

    /// Adds a filter accepting `value`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<ClauseValue>) -> Self {
        self.filters.push(Filter::new(field, Accept::Only(value.into())));
        self
    }

    /// Adds a filter explicitly set to "all".
    pub fn with_all(mut self, field: impl Into<String>) -> Self {
        self.filters.push(Filter::new(field, Accept::All));
        self
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// Resolves every filter into the equality clauses that constrain.
    pub fn resolve(self, schema: &Schema, all_sentinel: &str) -> Result<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(self.filters.len());
        for filter in self.filters {
            if let Some(clause) = filter.resolve(schema, all_sentinel)? {
                clauses.push(clause);
            }
        }
        Ok(clauses)
    }
}

impl IntoIterator for FilterSpec {
    type Item = Filter;
    type IntoIter = std::vec::IntoIter<Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for FilterSpec
where
    K: Into<String>,
    V: Into<ClauseValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FilterSpec::new(), |spec, (field, value)| spec.with(field, value))
    }
}

impl From<BTreeMap<String, String>> for FilterSpec {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use crate::schema::{FieldDef, FieldKind};

    static LEAVE: Schema = Schema::new(
        "LeaveBalance",
        &[
            FieldDef::new("department", FieldKind::Text),
            FieldDef::new("leave_type", FieldKind::Enum),
            FieldDef::new("days", FieldKind::Number),
        ],
    );

    #[test]
    fn all_choices_constrain_nothing() {
        let clauses = FilterSpec::new()
            .with("department", "all")
            .with_all("leave_type")
            .resolve(&LEAVE, "all")
            .unwrap();
        assert!(clauses.is_empty());
    }

    #[test]
    fn sentinel_is_configurable() {
        let clauses = FilterSpec::new()
            .with("department", "all")
            .resolve(&LEAVE, "*")
            .unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].op, Op::Eq);
    }

    #[test]
    fn all_still_requires_known_field() {
        let err = FilterSpec::new()
            .with_all("region")
            .resolve(&LEAVE, "all")
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownField { .. }));
    }

    #[test]
    fn values_are_coerced_to_field_kind() {
        let clauses: Vec<Clause> = [("days", "12")]
            .into_iter()
            .collect::<FilterSpec>()
            .resolve(&LEAVE, "all")
            .unwrap();
        assert!(matches!(clauses[0].value, ClauseValue::Number(_)));
    }

    #[test]
    fn from_string_map() {
        let mut map = BTreeMap::new();
        map.insert("department".to_owned(), "Finance".to_owned());
        map.insert("leave_type".to_owned(), "all".to_owned());

        let clauses = FilterSpec::from(map).resolve(&LEAVE, "all").unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].field, "department");
    }
}
