//! Free-text search across text fields.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::schema::{FieldKind, Schema};
use crate::traits::Record;

/// Search box contents plus the fields it looks in.
///
/// A record matches when the lowercased term is a substring of the
/// lowercased value of any listed field. An empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpec {
    pub term: String,
    pub fields: Vec<String>,
}

impl SearchSpec {
    pub fn new<I, S>(term: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchSpec {
            term: term.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Validates the fields against `schema` and lowercases the term.
    ///
    /// Every field must exist and be text, even when the term is empty,
    /// so a miswired search box fails on the first render rather than on
    /// the first keystroke.
    pub fn compile(self, schema: &Schema) -> Result<CompiledSearch> {
        if self.fields.is_empty() {
            return Err(ConfigurationError::EmptySearchFields);
        }
        for field in &self.fields {
            let def = schema.require(field)?;
            if def.kind != FieldKind::Text {
                return Err(ConfigurationError::NotSearchable {
                    field: field.clone(),
                    kind: def.kind,
                });
            }
        }

        Ok(CompiledSearch {
            needle: self.term.to_lowercase(),
            fields: self.fields,
        })
    }
}

/// A validated search, ready to test records.
#[derive(Debug, Clone)]
pub struct CompiledSearch {
    needle: String,
    fields: Vec<String>,
}

impl CompiledSearch {
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches<T: Record>(&self, record: &T) -> bool {
        if self.is_blank() {
            return true;
        }
        self.fields.iter().any(|field| {
            record
                .field_value(field)
                .as_str()
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}
