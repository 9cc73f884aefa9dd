//! The result of running a query: the visible rows plus the counts a list
//! page needs for its header and pager.

use serde::Serialize;

use crate::page::PageInfo;

/// Visible slice of a collection.
#[derive(Debug, Clone, Serialize)]
pub struct ViewPage<'a, T> {
    /// Matching records, sorted, then windowed to the requested page.
    pub records: Vec<&'a T>,

    /// Matching records before paging (for "showing X of Y").
    pub total_matched: usize,

    /// Page details, when the query was paged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

impl<'a, T> ViewPage<'a, T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.records.iter().copied()
    }

    /// Header text for the pager, e.g. `Showing 21 to 25 of 25`.
    pub fn summary(&self) -> String {
        match &self.page {
            Some(info) => info.summary(self.total_matched),
            None => format!("Showing {} of {}", self.records.len(), self.total_matched),
        }
    }

    /// Clones the visible records into an owned vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.records.iter().map(|record| (*record).clone()).collect()
    }
}

impl<'a, T> IntoIterator for ViewPage<'a, T> {
    type Item = &'a T;
    type IntoIter = std::vec::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSpec;

    #[test]
    fn summary_without_paging() {
        let rows = ["a", "b"];
        let page = ViewPage {
            records: rows.iter().collect(),
            total_matched: 2,
            page: None,
        };
        assert_eq!(page.summary(), "Showing 2 of 2");
        assert_eq!(page.to_vec(), vec!["a", "b"]);
    }

    #[test]
    fn serializes_for_renderers() {
        let rows = [1u32, 2, 3];
        let page = ViewPage {
            records: rows[..2].iter().collect(),
            total_matched: 3,
            page: Some(PageSpec::new(2, 0).info(3)),
        };

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["records"], serde_json::json!([1, 2]));
        assert_eq!(json["total_matched"], 3);
        assert_eq!(json["page"]["page_count"], 2);
        assert_eq!(page.summary(), "Showing 1 to 2 of 3");
    }
}
