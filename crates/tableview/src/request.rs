//! Decoding list-page state sent by a UI layer.
//!
//! A front end usually holds the view state as loose JSON: the search box,
//! a map of filter dropdowns to their selected strings, the clicked column
//! and a pager with signed numbers. [`QueryRequest`] is that shape;
//! [`QueryRequest::into_query`] checks it against a record schema.
//!
//! ```json
//! {
//!   "search": "acme",
//!   "search_fields": ["customer", "contract_no"],
//!   "filters": { "status": "active", "region": "all" },
//!   "sort": { "field": "end_date", "dir": "desc" },
//!   "page": { "size": 10, "index": 0 }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::FilterSpec;
use crate::ordering::SortSpec;
use crate::page::PageSpec;
use crate::query::{Query, ViewQuery};
use crate::search::SearchSpec;
use crate::settings::ViewSettings;
use crate::traits::Record;

/// Pager state. A missing size means the default page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageRequest {
    pub size: Option<i64>,
    pub index: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryRequest {
    pub search: String,
    pub search_fields: Vec<String>,
    /// Field name to selected choice. Choices are parsed by field kind.
    pub filters: BTreeMap<String, String>,
    pub sort: Option<SortSpec>,
    pub page: Option<PageRequest>,
}

impl QueryRequest {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Checks the request against `T` with default settings.
    pub fn into_query<T: Record>(self) -> Result<ViewQuery<T>> {
        self.into_query_with(ViewSettings::default())
    }

    pub fn into_query_with<T: Record>(self, settings: ViewSettings) -> Result<ViewQuery<T>> {
        self.into_builder(settings)?.build::<T>()
    }

    /// Turns the request into an unchecked [`Query`], rejecting negative
    /// page values.
    pub fn into_builder(self, settings: ViewSettings) -> Result<Query> {
        let QueryRequest {
            search,
            search_fields,
            filters,
            sort,
            page,
        } = self;

        let mut query = Query::new()
            .with_settings(settings)
            .filters(FilterSpec::from(filters))
            .sorted(sort);

        if !search.is_empty() || !search_fields.is_empty() {
            query = query.search_spec(SearchSpec::new(search, search_fields));
        }

        if let Some(page) = page {
            let default_size = i64::try_from(query.settings().default_page_size).unwrap_or(i64::MAX);
            let spec = PageSpec::from_signed(page.size.unwrap_or(default_size), page.index)?;
            query = query.page_spec(spec);
        }

        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use crate::ordering::Dir;

    #[test]
    fn empty_object_is_an_empty_request() {
        let request = QueryRequest::from_json("{}").unwrap();
        assert_eq!(request, QueryRequest::default());
    }

    #[test]
    fn decodes_every_part() {
        let request = QueryRequest::from_json(
            r#"{
                "search": "acme",
                "search_fields": ["customer"],
                "filters": {"status": "active"},
                "sort": {"field": "end_date", "dir": "desc"},
                "page": {"size": 25, "index": 3}
            }"#,
        )
        .unwrap();

        assert_eq!(request.search, "acme");
        assert_eq!(request.filters["status"], "active");
        assert_eq!(request.sort, Some(SortSpec::new("end_date", Dir::Desc)));
        assert_eq!(
            request.page,
            Some(PageRequest {
                size: Some(25),
                index: 3
            })
        );
    }

    #[test]
    fn sort_direction_defaults_to_ascending() {
        let request = QueryRequest::from_json(r#"{"sort": {"field": "name"}}"#).unwrap();
        assert_eq!(request.sort, Some(SortSpec::asc("name")));
    }

    #[test]
    fn malformed_json_is_a_request_error() {
        let err = QueryRequest::from_json(r#"{"serach": "x"}"#).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidRequest(_)));

        let err = QueryRequest::from_json(r#"{"page": {"index": "two"}}"#).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidRequest(_)));
    }

    #[test]
    fn negative_page_values_rejected() {
        let request = QueryRequest {
            page: Some(PageRequest {
                size: Some(10),
                index: -1,
            }),
            ..QueryRequest::default()
        };
        let err = request.into_builder(ViewSettings::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPage { .. }));

        let request = QueryRequest {
            page: Some(PageRequest {
                size: Some(-5),
                index: 0,
            }),
            ..QueryRequest::default()
        };
        assert!(request.into_builder(ViewSettings::default()).is_err());
    }
}
