//! Sort keys and the value comparator.
//!
//! Comparison is total: every pair of values has an ordering, so sorting
//! never depends on the input order beyond the stable tie-break.
//!
//! - Text compares case-insensitively (Unicode lowercase).
//! - Numbers compare numerically across integer and float variants.
//! - Timestamps compare chronologically.
//! - Enums compare by ordinal, bools `false < true`.
//! - Missing values (`Value::None`, NaN, infinities) are placed by
//!   [`NullOrder`] independently of the sort direction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::traits::Record;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    #[default]
    Asc,
    Desc,
}

impl Dir {
    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where missing values go, regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullOrder {
    First,
    #[default]
    Last,
}

/// A sort key: field plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub dir: Dir,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortSpec {
            field: field.into(),
            dir,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Desc)
    }

    /// Next sort state after a click on the `field` column header.
    ///
    /// A new column starts ascending; the same column goes ascending,
    /// descending, then back to unsorted.
    ///
    /// ```
    /// use tableview::{Dir, SortSpec};
    ///
    /// let first = SortSpec::cycle(None, "amount");
    /// assert_eq!(first, Some(SortSpec::asc("amount")));
    ///
    /// let second = SortSpec::cycle(first.as_ref(), "amount");
    /// assert_eq!(second, Some(SortSpec::desc("amount")));
    ///
    /// assert_eq!(SortSpec::cycle(second.as_ref(), "amount"), None);
    /// ```
    pub fn cycle(current: Option<&SortSpec>, field: &str) -> Option<SortSpec> {
        match current {
            Some(spec) if spec.field == field => match spec.dir {
                Dir::Asc => Some(SortSpec::desc(field)),
                Dir::Desc => None,
            },
            _ => Some(SortSpec::asc(field)),
        }
    }

    /// Compares two field values under this key.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>, nulls: NullOrder) -> Ordering {
        match (a.is_missing(), b.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => missing_first(nulls),
            (false, true) => missing_first(nulls).reverse(),
            (false, false) => self.dir.apply(compare_values(a, b)),
        }
    }
}

fn missing_first(nulls: NullOrder) -> Ordering {
    match nulls {
        NullOrder::First => Ordering::Less,
        NullOrder::Last => Ordering::Greater,
    }
}

/// Ascending comparison of two present values.
///
/// Values of different kinds (which a validated schema never produces) fall
/// back to a fixed kind rank so the ordering stays total.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Text(a), Value::Text(b)) => compare_text(a, b),
        (Value::Number(a), Value::Number(b)) => a.compare(*b).unwrap_or(Ordering::Equal),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Enum(a), Value::Enum(b)) => a
            .ordinal
            .cmp(&b.ordinal)
            .then_with(|| compare_text(a.label, b.label)),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Case-insensitive lexicographic comparison.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::Timestamp(_) => 2,
        Value::Enum(_) => 3,
        Value::Text(_) => 4,
        Value::None => 5,
    }
}

/// Compares two records key by key; `Equal` if every key ties.
pub fn compare_records<T: Record>(a: &T, b: &T, keys: &[SortSpec], nulls: NullOrder) -> Ordering {
    for key in keys {
        let ordering = key.compare(&a.field_value(&key.field), &b.field_value(&key.field), nulls);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
