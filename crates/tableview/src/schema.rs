//! Static record schemas.
//!
//! A [`Schema`] names every queryable field of a record type together with
//! its [`FieldKind`]. Query specs are checked against it once, when they are
//! built, so the per-record code never has to deal with unknown fields.

use std::fmt;

use crate::error::{ConfigurationError, Result};
use crate::op::Op;

/// The type of a queryable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text. Searchable; sorts case-insensitively.
    Text,
    /// Integer or floating point number.
    Number,
    /// Date or date-time, compared chronologically.
    Timestamp,
    /// Closed set of variants with an ordinal and a label.
    Enum,
    /// Boolean flag.
    Bool,
}

impl FieldKind {
    /// Returns `true` if `op` can be applied to fields of this kind.
    pub fn supports(self, op: Op) -> bool {
        match self {
            FieldKind::Text => matches!(
                op,
                Op::Eq | Op::Ne | Op::StartsWith | Op::EndsWith | Op::Contains | Op::Regex | Op::In
            ),
            FieldKind::Number => matches!(
                op,
                Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte | Op::In
            ),
            FieldKind::Timestamp => matches!(
                op,
                Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte | Op::Before | Op::After
            ),
            FieldKind::Enum => matches!(op, Op::Eq | Op::Ne | Op::In),
            FieldKind::Bool => matches!(op, Op::Eq | Op::Ne),
        }
    }

    /// Returns `true` if fields of this kind can label a group.
    pub fn is_groupable(self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Enum | FieldKind::Bool)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Enum => "enum",
            FieldKind::Bool => "bool",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named, typed field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        FieldDef { name, kind }
    }
}

/// The fixed set of queryable fields of a record type.
///
/// Usually generated by `#[derive(Record)]`, but cheap to write by hand:
///
/// ```
/// use tableview::{FieldDef, FieldKind, Schema};
///
/// static CONTRACT: Schema = Schema::new(
///     "Contract",
///     &[
///         FieldDef::new("name", FieldKind::Text),
///         FieldDef::new("value", FieldKind::Number),
///     ],
/// );
///
/// assert_eq!(CONTRACT.field("value").map(|f| f.kind), Some(FieldKind::Number));
/// assert!(CONTRACT.field("owner").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    record: &'static str,
    fields: &'static [FieldDef],
}

impl Schema {
    pub const fn new(record: &'static str, fields: &'static [FieldDef]) -> Self {
        Schema { record, fields }
    }

    /// Name of the record type, used in error messages.
    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|def| def.name == name)
    }

    /// Looks up a field, failing with [`ConfigurationError::UnknownField`].
    pub fn require(&self, name: &str) -> Result<&'static FieldDef> {
        self.field(name).ok_or_else(|| ConfigurationError::UnknownField {
            record: self.record,
            field: name.to_owned(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|def| def.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ALERT: Schema = Schema::new(
        "SecurityAlert",
        &[
            FieldDef::new("title", FieldKind::Text),
            FieldDef::new("severity", FieldKind::Enum),
            FieldDef::new("raised_at", FieldKind::Timestamp),
            FieldDef::new("resolved", FieldKind::Bool),
        ],
    );

    #[test]
    fn lookup_by_name() {
        assert_eq!(ALERT.len(), 4);
        assert_eq!(ALERT.field("severity").map(|f| f.kind), Some(FieldKind::Enum));
        assert!(ALERT.field("Severity").is_none());
        assert_eq!(
            ALERT.names().collect::<Vec<_>>(),
            vec!["title", "severity", "raised_at", "resolved"]
        );
    }

    #[test]
    fn require_reports_record_and_field() {
        let err = ALERT.require("owner").unwrap_err();
        assert_eq!(err.to_string(), "unknown field 'owner' on SecurityAlert");
    }

    #[test]
    fn operator_support_by_kind() {
        assert!(FieldKind::Text.supports(Op::Contains));
        assert!(FieldKind::Text.supports(Op::Regex));
        assert!(!FieldKind::Text.supports(Op::Gt));

        assert!(FieldKind::Number.supports(Op::Gte));
        assert!(!FieldKind::Number.supports(Op::Before));

        assert!(FieldKind::Timestamp.supports(Op::Before));
        assert!(!FieldKind::Timestamp.supports(Op::In));

        assert!(FieldKind::Enum.supports(Op::In));
        assert!(!FieldKind::Enum.supports(Op::Lt));

        assert!(FieldKind::Bool.supports(Op::Eq));
        assert!(!FieldKind::Bool.supports(Op::Contains));
    }

    #[test]
    fn groupable_kinds() {
        assert!(FieldKind::Text.is_groupable());
        assert!(FieldKind::Enum.is_groupable());
        assert!(FieldKind::Bool.is_groupable());
        assert!(!FieldKind::Number.is_groupable());
        assert!(!FieldKind::Timestamp.is_groupable());
    }
}
