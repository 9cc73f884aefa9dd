//! `#[derive(Record)]`: record schema and field accessor from struct
//! annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
