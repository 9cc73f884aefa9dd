//! Comparison operators for query clauses.
//!
//! Which operators apply to which field kinds is decided by
//! [`FieldKind::supports`](crate::FieldKind::supports); clauses are checked
//! against it when a query is built.

use std::cmp::Ordering;

/// Comparison operator for a query clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal. For enum fields compares the label.
    Eq,
    /// Not equal.
    Ne,

    /// Text starts with prefix.
    StartsWith,
    /// Text ends with suffix.
    EndsWith,
    /// Text contains substring.
    Contains,
    /// Text matches a regular expression.
    Regex,

    Gt,
    Gte,
    Lt,
    Lte,

    /// Earlier than (alias for `Lt`, reads better on dates).
    Before,
    /// Later than (alias for `Gt`).
    After,

    /// Value is one of a set.
    In,
}

impl Op {
    /// Resolves the date aliases to their canonical operator.
    pub fn normalize(self) -> Op {
        match self {
            Op::Before => Op::Lt,
            Op::After => Op::Gt,
            other => other,
        }
    }

    /// Evaluates an ordering-based operator against a comparison result.
    ///
    /// Operators that are not ordering-based always return `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self.normalize() {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::StartsWith => "startswith",
            Op::EndsWith => "endswith",
            Op::Contains => "contains",
            Op::Regex => "regex",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Before => "before",
            Op::After => "after",
            Op::In => "in",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
