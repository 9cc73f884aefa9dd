//! Per-group counts and sums for summary cards.
//!
//! ```
//! use tableview::aggregate;
//!
//! struct Invoice { category: &'static str, amount: f64 }
//!
//! let invoices = [
//!     Invoice { category: "A", amount: 100.0 },
//!     Invoice { category: "A", amount: 50.0 },
//!     Invoice { category: "B", amount: 30.0 },
//! ];
//!
//! let groups = aggregate(&invoices, |i| i.category, |i| Some(i.amount));
//! assert_eq!(groups["A"].count, 2);
//! assert_eq!(groups["A"].sum, 150.0);
//! assert_eq!(groups["B"].sum, 30.0);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ConfigurationError, Result};
use crate::schema::FieldKind;
use crate::traits::Record;

/// Count and sum of one group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GroupStats {
    pub count: usize,
    pub sum: f64,
}

impl GroupStats {
    fn add(&mut self, amount: Option<f64>) {
        self.count += 1;
        self.sum += amount.filter(|n| n.is_finite()).unwrap_or(0.0);
    }

    /// Mean of the group, counting missing amounts as 0.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// This group's sum as a percentage of `total`; 0 when `total` is 0.
    pub fn share_of(&self, total: f64) -> f64 {
        if total == 0.0 || !total.is_finite() {
            0.0
        } else {
            self.sum / total * 100.0
        }
    }
}

/// Groups `collection` by `group_key` and sums `amount` per group.
///
/// Only groups with members appear. A `None` or non-finite amount adds 0 to
/// the sum but still counts the record.
pub fn aggregate<T, K, G, A>(collection: &[T], group_key: G, amount: A) -> BTreeMap<K, GroupStats>
where
    K: Ord,
    G: Fn(&T) -> K,
    A: Fn(&T) -> Option<f64>,
{
    let mut groups: BTreeMap<K, GroupStats> = BTreeMap::new();
    for record in collection {
        groups
            .entry(group_key(record))
            .or_default()
            .add(amount(record));
    }
    groups
}

/// Schema-checked [`aggregate`] over two named fields.
///
/// `group_field` must be text, enum or bool; records missing it fall into
/// the `""` group. `amount_field` must be a number.
pub fn aggregate_by_field<T: Record>(
    collection: &[T],
    group_field: &str,
    amount_field: &str,
) -> Result<BTreeMap<String, GroupStats>> {
    let schema = T::schema();

    let group = schema.require(group_field)?;
    if !group.kind.is_groupable() {
        return Err(ConfigurationError::InvalidAggregateField {
            field: group_field.to_owned(),
            kind: group.kind,
            reason: "cannot group a summary",
        });
    }
    let amount = schema.require(amount_field)?;
    if amount.kind != FieldKind::Number {
        return Err(ConfigurationError::InvalidAggregateField {
            field: amount_field.to_owned(),
            kind: amount.kind,
            reason: "cannot be summed",
        });
    }

    Ok(aggregate(
        collection,
        |record| record.field_value(group_field).group_label().unwrap_or_default(),
        |record| {
            record
                .field_value(amount_field)
                .as_number()
                .map(|n| n.to_f64())
        },
    ))
}

/// Sum of every group, for computing shares.
pub fn grand_total<K>(groups: &BTreeMap<K, GroupStats>) -> GroupStats {
    groups.values().fold(GroupStats::default(), |acc, stats| GroupStats {
        count: acc.count + stats.count,
        sum: acc.sum + stats.sum,
    })
}
