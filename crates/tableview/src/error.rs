//! Error types for the tableview crate.
//!
//! Every error here is a wiring defect between a view and the engine: a
//! query that names a field the record type does not have, a search over a
//! non-text column, a malformed page window. A search term or filter choice
//! that matches nothing is not an error; it yields an empty page.

use thiserror::Error;

use crate::op::Op;
use crate::schema::FieldKind;

/// A query spec (or settings document) that does not fit the record schema.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The field does not exist on the record type.
    #[error("unknown field '{field}' on {record}")]
    UnknownField {
        record: &'static str,
        field: String,
    },

    /// Search was asked to look at a field that is not text.
    #[error("field '{field}' is {kind} and cannot be searched as text")]
    NotSearchable { field: String, kind: FieldKind },

    /// Search term given without any field to look in.
    #[error("search term given without any search fields")]
    EmptySearchFields,

    /// Page size or index out of range.
    #[error("invalid page: {reason}")]
    InvalidPage { reason: String },

    /// A filter value cannot be read as the field's kind.
    #[error("filter value '{value}' is not a valid {kind} for field '{field}'")]
    InvalidFilterValue {
        field: String,
        value: String,
        kind: FieldKind,
    },

    /// Operator does not apply to the field's kind, or the clause value
    /// has the wrong shape for it.
    #[error("operator '{op}' is not valid for {kind} field '{field}'")]
    InvalidOperatorForKind {
        field: String,
        op: Op,
        kind: FieldKind,
    },

    /// A summary was asked to group or sum by a field of the wrong kind.
    #[error("field '{field}' is {kind} and {reason}")]
    InvalidAggregateField {
        field: String,
        kind: FieldKind,
        reason: &'static str,
    },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Settings document could not be parsed.
    #[error("invalid view settings: {0}")]
    SettingsParse(#[from] serde_yaml::Error),

    /// Settings parsed but are inconsistent.
    #[error("invalid view settings: {reason}")]
    InvalidSettings { reason: String },

    /// Query request could not be decoded.
    #[error("invalid query request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

impl ConfigurationError {
    pub(crate) fn page(reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidPage {
            reason: reason.into(),
        }
    }
}

/// Result type for tableview operations.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
