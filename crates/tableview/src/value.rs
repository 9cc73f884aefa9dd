//! Runtime field values.
//!
//! [`Value`] is what a record hands back for one of its fields. It borrows
//! text from the record, so extracting a value never allocates.

use std::cmp::Ordering;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::schema::FieldKind;
use crate::traits::RecordEnum;

/// Value of one field of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Text borrowed from the record.
    Text(&'a str),
    Number(Number),
    Timestamp(Timestamp),
    Enum(EnumValue),
    Bool(bool),
    /// Optional field with no value.
    None,
}

impl<'a> Value<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` for values that sort as missing: `None` and
    /// non-finite numbers.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::None => true,
            Value::Number(n) => !n.is_finite(),
            _ => false,
        }
    }

    /// The field kind this value belongs to, `None` for [`Value::None`].
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Value::Text(_) => Some(FieldKind::Text),
            Value::Number(_) => Some(FieldKind::Number),
            Value::Timestamp(_) => Some(FieldKind::Timestamp),
            Value::Enum(_) => Some(FieldKind::Enum),
            Value::Bool(_) => Some(FieldKind::Bool),
            Value::None => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            Value::Enum(e) => Some(*e),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Label used when this value names a group in a summary.
    ///
    /// Missing values, numbers and timestamps have no label.
    pub fn group_label(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some((*s).to_owned()),
            Value::Enum(e) => Some(e.label.to_owned()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Enum field value: the ordinal drives sorting, the label drives filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub ordinal: u32,
    pub label: &'static str,
}

impl EnumValue {
    pub fn of<E: RecordEnum + ?Sized>(value: &E) -> Self {
        EnumValue {
            ordinal: value.ordinal(),
            label: value.label(),
        }
    }
}

/// Numeric value. Integers keep full precision; mixed comparisons go
/// through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Number::F64(n) => n.is_finite(),
            _ => true,
        }
    }

    /// Compares two numbers. `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(if a < 0 {
                Ordering::Less
            } else {
                (a as u64).cmp(&b)
            }),
            (Number::U64(_), Number::I64(_)) => other.compare(self).map(Ordering::reverse),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Parses a number typed into a filter box.
    pub fn parse(input: &str) -> Option<Number> {
        let input = input.trim();
        if let Ok(n) = input.parse::<i64>() {
            return Some(Number::I64(n));
        }
        if let Ok(n) = input.parse::<u64>() {
            return Some(Number::U64(n));
        }
        input.parse::<f64>().ok().map(Number::F64)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Instant in milliseconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn as_secs(self) -> i64 {
        self.0.div_euclid(1000)
    }

    /// Parses `YYYY-MM-DD` (midnight UTC) or an RFC 3339 date-time.
    pub fn parse(input: &str) -> Option<Timestamp> {
        let input = input.trim();
        if let Ok(date) = Date::parse(input, format_description!("[year]-[month]-[day]")) {
            return Some(date.into());
        }
        OffsetDateTime::parse(input, &Rfc3339).ok().map(Into::into)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Timestamp((value.unix_timestamp_nanos() / 1_000_000) as i64)
    }
}

impl From<PrimitiveDateTime> for Timestamp {
    fn from(value: PrimitiveDateTime) -> Self {
        value.assume_utc().into()
    }
}

impl From<Date> for Timestamp {
    fn from(value: Date) -> Self {
        value.midnight().into()
    }
}
