//! TableView - search, filter, sort and paginate in-memory record lists.
//!
//! Every list page of a business application does the same four things to
//! its rows: match a search box, apply filter dropdowns, sort by the
//! clicked column, then show one page. TableView does them in that order
//! over any slice of records, plus the per-group totals shown in summary
//! cards above such lists.
//!
//! # Quick Start
//!
//! ```rust
//! use tableview::{FieldDef, FieldKind, Number, Query, Record, Schema, Value};
//!
//! struct Employee {
//!     name: String,
//!     department: String,
//!     salary: f64,
//! }
//!
//! impl Record for Employee {
//!     fn schema() -> &'static Schema {
//!         static SCHEMA: Schema = Schema::new(
//!             "Employee",
//!             &[
//!                 FieldDef::new("name", FieldKind::Text),
//!                 FieldDef::new("department", FieldKind::Text),
//!                 FieldDef::new("salary", FieldKind::Number),
//!             ],
//!         );
//!         &SCHEMA
//!     }
//!
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::Text(&self.name),
//!             "department" => Value::Text(&self.department),
//!             "salary" => Value::Number(Number::F64(self.salary)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let staff = vec![
//!     Employee { name: "Ana".into(), department: "Finance".into(), salary: 5200.0 },
//!     Employee { name: "Bo".into(), department: "Sales".into(), salary: 4100.0 },
//!     Employee { name: "Cai".into(), department: "Finance".into(), salary: 6100.0 },
//! ];
//!
//! let view = Query::new()
//!     .filter("department", "Finance")
//!     .sort_desc("salary")
//!     .page(10, 0)
//!     .build::<Employee>()
//!     .unwrap();
//!
//! let page = view.run(&staff);
//! assert_eq!(page.total_matched, 2);
//! assert_eq!(page.records[0].name, "Cai");
//! assert_eq!(page.summary(), "Showing 1 to 2 of 2");
//! ```
//!
//! With the `derive` feature, `#[derive(Record)]` writes the schema and
//! accessor from the struct definition.
//!
//! # Pipeline
//!
//! ```text
//! collection ─▶ search ─▶ filters + clauses ─▶ stable sort ─▶ page window
//!                                   │
//!                                   └─▶ total_matched
//! ```
//!
//! - **Search**: case-insensitive substring on any listed text field. An
//!   empty term matches everything.
//! - **Filters**: field equals the chosen value. The "all" choice
//!   constrains nothing.
//! - **Sort**: stable; ties keep collection order. Missing values go last
//!   in both directions unless [`NullOrder::First`] is configured.
//! - **Page**: zero-based; `total_matched` is counted before paging.
//!
//! Unknown fields, operators that do not fit a field kind, unparsable
//! filter values and invalid pages are reported by [`Query::build`] as a
//! [`ConfigurationError`]. A built [`ViewQuery`] never fails.
//!
//! # Field Kinds and Operators
//!
//! | Kind | Operators |
//! |------|-----------|
//! | Text | `Eq`, `Ne`, `StartsWith`, `EndsWith`, `Contains`, `Regex`, `In` |
//! | Number | `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte`, `In` |
//! | Timestamp | `Eq`, `Ne`, `Before`, `After`, `Gt`, `Gte`, `Lt`, `Lte` |
//! | Enum | `Eq`, `Ne`, `In` |
//! | Bool | `Eq`, `Ne` |

mod aggregate;
mod clause;
mod error;
mod filter;
mod op;
mod ordering;
mod page;
mod query;
mod request;
mod schema;
mod search;
mod settings;
mod traits;
mod value;
mod view;
mod window;

pub use aggregate::{aggregate, aggregate_by_field, grand_total, GroupStats};
pub use clause::{Clause, ClauseValue};
pub use error::{ConfigurationError, Result};
pub use filter::{Accept, Filter, FilterSpec};
pub use op::Op;
pub use ordering::{compare_records, compare_text, compare_values, Dir, NullOrder, SortSpec};
pub use page::{PageInfo, PageSpec};
pub use query::{query, Query, ViewQuery};
pub use request::{PageRequest, QueryRequest};
pub use schema::{FieldDef, FieldKind, Schema};
pub use search::{CompiledSearch, SearchSpec};
pub use settings::{Density, ViewSettings};
pub use traits::{Record, RecordEnum, RecordTimestamp};
pub use value::{EnumValue, Number, Timestamp, Value};
pub use view::ViewPage;
pub use window::{ScrollWindow, OVERSCAN_ROWS};

#[cfg(feature = "derive")]
pub use tableview_macros::Record;
