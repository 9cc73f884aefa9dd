//! Derive macro for tableview records.
//!
//! [`Record`] writes the `tableview::Record` impl of a struct: a static
//! schema listing the annotated fields with their kinds, and the accessor
//! the engine reads values through.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `tableview::Record`.
///
/// Only fields carrying a kind are exposed to search, filters, sorting
/// and aggregation.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `Text` | Searchable text (`String`, `&str`, anything `AsRef<str>`) |
/// | `Number` | Any primitive integer or float |
/// | `Timestamp` | A type implementing `RecordTimestamp` |
/// | `Enum` | A type implementing `RecordEnum` |
/// | `Bool` | `bool` |
/// | `skip` | Not exposed |
/// | `rename = "..."` | Field name used in queries |
/// | `ty = "..."` | Kind given as a string, e.g. `ty = "enum"` |
///
/// Fields typed `Option<T>` read as missing when `None`.
///
/// # Generated Code
///
/// 1. A name constant per exposed field (`Contract::END_DATE`)
/// 2. `Record::schema()` returning a static schema named after the struct
/// 3. `Record::field_value()`
///
/// # Example
///
/// ```ignore
/// use tableview::{Query, Record, RecordEnum};
///
/// #[derive(Clone, Copy)]
/// enum Status { Active, Expired }
///
/// impl RecordEnum for Status {
///     fn ordinal(&self) -> u32 { *self as u32 }
///     fn label(&self) -> &'static str {
///         match self {
///             Status::Active => "active",
///             Status::Expired => "expired",
///         }
///     }
/// }
///
/// #[derive(Record)]
/// struct Contract {
///     #[record(Text)]
///     customer: String,
///     #[record(Enum)]
///     status: Status,
///     #[record(Number, rename = "value")]
///     amount: Option<f64>,
///     #[record(skip)]
///     internal_id: u64,
/// }
///
/// let query = Query::new()
///     .filter(Contract::STATUS, "active")
///     .sort_desc(Contract::VALUE)
///     .build::<Contract>()?;
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
