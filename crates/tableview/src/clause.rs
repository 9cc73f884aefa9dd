//! Single-field predicates.
//!
//! A [`Clause`] is a field name, an operator and a comparison value. Clauses
//! are built loosely (a filter dropdown only knows strings) and then
//! [resolved](Clause::resolve) against the record schema, which coerces text
//! into the field's kind and rejects anything that cannot match.

use regex::Regex;

use crate::error::{ConfigurationError, Result};
use crate::op::Op;
use crate::schema::{FieldKind, Schema};
use crate::value::{Number, Timestamp, Value};

/// A single filter predicate.
///
/// ```
/// use tableview::{Clause, Op, Value};
///
/// let clause = Clause::new("status", Op::Eq, "active");
/// assert!(clause.matches(&Value::Text("active")));
/// assert!(!clause.matches(&Value::Text("Active")));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    pub field: String,
    pub op: Op,
    pub value: ClauseValue,
}

impl Clause {
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<ClauseValue>) -> Self {
        Clause {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Checks this clause against `schema` and coerces its value to the
    /// field's kind.
    ///
    /// Text values are parsed as numbers, dates or booleans when the field
    /// has that kind; a text value under `Op::Regex` is compiled.
    pub fn resolve(self, schema: &Schema) -> Result<Clause> {
        let Clause { field, op, value } = self;
        let kind = schema.require(&field)?.kind;
        let wrong_operator = |field: String| ConfigurationError::InvalidOperatorForKind {
            field,
            op,
            kind,
        };

        if !kind.supports(op) {
            return Err(wrong_operator(field));
        }

        let value = match (op, value) {
            (Op::In, ClauseValue::Set(items)) => ClauseValue::Set(
                items
                    .into_iter()
                    .map(|item| coerce_scalar(&field, kind, item))
                    .collect::<Result<_>>()?,
            ),
            (Op::In, _) | (_, ClauseValue::Set(_)) => return Err(wrong_operator(field)),
            (Op::Regex, ClauseValue::Text(pattern)) => ClauseValue::Regex(Regex::new(&pattern)?),
            (Op::Regex, value @ ClauseValue::Regex(_)) => value,
            (Op::Regex, _) | (_, ClauseValue::Regex(_)) => return Err(wrong_operator(field)),
            (_, value) => coerce_scalar(&field, kind, value)?,
        };

        Ok(Clause { field, op, value })
    }

    /// Evaluates this clause against a field value.
    ///
    /// A missing value never matches, not even under `Ne`. Mismatched kinds
    /// do not match either; [`Clause::resolve`] rules those out up front.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        if field_value.is_none() {
            return false;
        }

        match (&self.value, field_value) {
            (ClauseValue::Text(pattern), Value::Text(text)) => self.match_text(text, pattern),
            (ClauseValue::Text(label), Value::Enum(e)) => self.match_equality(e.label == label),
            (ClauseValue::Regex(regex), Value::Text(text)) => regex.is_match(text),
            (ClauseValue::Number(clause), Value::Number(field)) => field
                .compare(*clause)
                .is_some_and(|ordering| self.op.eval_ordering(ordering)),
            (ClauseValue::Timestamp(clause), Value::Timestamp(field)) => {
                self.op.eval_ordering(field.cmp(clause))
            }
            (ClauseValue::Bool(clause), Value::Bool(field)) => self.match_equality(field == clause),
            (ClauseValue::Set(items), value) if self.op == Op::In => {
                items.iter().any(|item| item.equals(value))
            }
            _ => false,
        }
    }

    fn match_text(&self, text: &str, pattern: &str) -> bool {
        match self.op {
            Op::Eq => text == pattern,
            Op::Ne => text != pattern,
            Op::StartsWith => text.starts_with(pattern),
            Op::EndsWith => text.ends_with(pattern),
            Op::Contains => text.contains(pattern),
            _ => false,
        }
    }

    fn match_equality(&self, equal: bool) -> bool {
        match self.op {
            Op::Eq => equal,
            Op::Ne => !equal,
            _ => false,
        }
    }
}

fn coerce_scalar(field: &str, kind: FieldKind, value: ClauseValue) -> Result<ClauseValue> {
    let invalid = |raw: String| ConfigurationError::InvalidFilterValue {
        field: field.to_owned(),
        value: raw,
        kind,
    };

    match (kind, value) {
        (FieldKind::Text | FieldKind::Enum, value @ ClauseValue::Text(_)) => Ok(value),
        (FieldKind::Number, value @ ClauseValue::Number(_)) => Ok(value),
        (FieldKind::Number, ClauseValue::Text(raw)) => Number::parse(&raw)
            .map(ClauseValue::Number)
            .ok_or_else(|| invalid(raw)),
        (FieldKind::Timestamp, value @ ClauseValue::Timestamp(_)) => Ok(value),
        (FieldKind::Timestamp, ClauseValue::Text(raw)) => Timestamp::parse(&raw)
            .map(ClauseValue::Timestamp)
            .ok_or_else(|| invalid(raw)),
        (FieldKind::Bool, value @ ClauseValue::Bool(_)) => Ok(value),
        (FieldKind::Bool, ClauseValue::Text(raw)) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Ok(ClauseValue::Bool(true)),
            "false" | "no" => Ok(ClauseValue::Bool(false)),
            _ => Err(invalid(raw)),
        },
        (_, other) => Err(invalid(other.describe())),
    }
}

/// Owned comparison value stored in a clause.
#[derive(Debug, Clone)]
pub enum ClauseValue {
    /// Text, or the label of an enum variant.
    Text(String),
    Number(Number),
    Timestamp(Timestamp),
    Bool(bool),
    /// Candidate values for `Op::In`.
    Set(Vec<ClauseValue>),
    /// Compiled pattern for `Op::Regex`.
    Regex(Regex),
}

impl ClauseValue {
    /// Builds a set for `Op::In`.
    pub fn set<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ClauseValue>,
    {
        ClauseValue::Set(values.into_iter().map(Into::into).collect())
    }

    /// Scalar equality against a field value.
    fn equals(&self, value: &Value<'_>) -> bool {
        match (self, value) {
            (ClauseValue::Text(a), Value::Text(b)) => a == b,
            (ClauseValue::Text(a), Value::Enum(e)) => a == e.label,
            (ClauseValue::Number(a), Value::Number(b)) => {
                a.compare(*b) == Some(std::cmp::Ordering::Equal)
            }
            (ClauseValue::Timestamp(a), Value::Timestamp(b)) => a == b,
            (ClauseValue::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            ClauseValue::Text(s) => s.clone(),
            ClauseValue::Number(n) => n.to_f64().to_string(),
            ClauseValue::Timestamp(t) => t.as_millis().to_string(),
            ClauseValue::Bool(b) => b.to_string(),
            ClauseValue::Set(items) => format!("set of {}", items.len()),
            ClauseValue::Regex(r) => r.as_str().to_owned(),
        }
    }
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::Text(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::Text(s.to_owned())
    }
}

impl From<Number> for ClauseValue {
    fn from(n: Number) -> Self {
        ClauseValue::Number(n)
    }
}

impl From<Timestamp> for ClauseValue {
    fn from(t: Timestamp) -> Self {
        ClauseValue::Timestamp(t)
    }
}

impl From<time::Date> for ClauseValue {
    fn from(d: time::Date) -> Self {
        ClauseValue::Timestamp(d.into())
    }
}

impl From<bool> for ClauseValue {
    fn from(b: bool) -> Self {
        ClauseValue::Bool(b)
    }
}

impl From<Regex> for ClauseValue {
    fn from(r: Regex) -> Self {
        ClauseValue::Regex(r)
    }
}

macro_rules! clause_number_from {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for ClauseValue {
                fn from(n: $ty) -> Self {
                    ClauseValue::Number(Number::from(n))
                }
            }
        )+
    };
}

clause_number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
