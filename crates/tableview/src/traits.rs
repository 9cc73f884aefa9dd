//! Traits connecting record types to the engine.
//!
//! [`Record`] is normally generated by `#[derive(Record)]` from the
//! `tableview-macros` crate, but a manual implementation is a few lines:
//!
//! ```
//! use tableview::{FieldDef, FieldKind, Number, Record, Schema, Value};
//!
//! struct Renewal {
//!     customer: String,
//!     probability: u8,
//! }
//!
//! impl Record for Renewal {
//!     fn schema() -> &'static Schema {
//!         static SCHEMA: Schema = Schema::new(
//!             "Renewal",
//!             &[
//!                 FieldDef::new("customer", FieldKind::Text),
//!                 FieldDef::new("probability", FieldKind::Number),
//!             ],
//!         );
//!         &SCHEMA
//!     }
//!
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "customer" => Value::Text(&self.customer),
//!             "probability" => Value::Number(Number::from(self.probability)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//! ```

use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::schema::Schema;
use crate::value::{Timestamp, Value};

/// A record type with a statically known set of queryable fields.
pub trait Record {
    /// The record's queryable fields.
    fn schema() -> &'static Schema
    where
        Self: Sized;

    /// Value of a field for this record.
    ///
    /// Returns [`Value::None`] for an optional field without a value. Fields
    /// outside the schema also return `None`; queries never ask for them
    /// because they are validated against [`Record::schema`] first.
    fn field_value(&self, field: &str) -> Value<'_>;
}

/// An enum usable as a record field.
///
/// The ordinal defines sort order, so give variants explicit, stable values
/// (a priority enum should sort `Low < Medium < High`, not alphabetically).
/// The label is what filter choices compare against.
///
/// ```
/// use tableview::RecordEnum;
///
/// enum Priority { Low, Medium, High }
///
/// impl RecordEnum for Priority {
///     fn ordinal(&self) -> u32 {
///         match self {
///             Priority::Low => 0,
///             Priority::Medium => 1,
///             Priority::High => 2,
///         }
///     }
///
///     fn label(&self) -> &'static str {
///         match self {
///             Priority::Low => "low",
///             Priority::Medium => "medium",
///             Priority::High => "high",
///         }
///     }
/// }
/// ```
pub trait RecordEnum {
    fn ordinal(&self) -> u32;
    fn label(&self) -> &'static str;
}

/// A date-like type usable as a timestamp field.
pub trait RecordTimestamp {
    fn record_timestamp(&self) -> Timestamp;
}

/// Raw milliseconds since the Unix epoch.
impl RecordTimestamp for i64 {
    fn record_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl RecordTimestamp for Timestamp {
    fn record_timestamp(&self) -> Timestamp {
        *self
    }
}

impl RecordTimestamp for Date {
    fn record_timestamp(&self) -> Timestamp {
        (*self).into()
    }
}

impl RecordTimestamp for PrimitiveDateTime {
    fn record_timestamp(&self) -> Timestamp {
        (*self).into()
    }
}

impl RecordTimestamp for OffsetDateTime {
    fn record_timestamp(&self) -> Timestamp {
        (*self).into()
    }
}
