//! Page windows over a matched result set.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

/// Page size plus zero-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSpec {
    pub size: usize,
    pub index: usize,
}

impl PageSpec {
    pub fn new(size: usize, index: usize) -> Self {
        PageSpec { size, index }
    }

    /// Builds a page from signed values as a UI layer may hold them.
    pub fn from_signed(size: i64, index: i64) -> Result<Self> {
        let size = usize::try_from(size)
            .map_err(|_| ConfigurationError::page(format!("page size {size} is negative")))?;
        let index = usize::try_from(index)
            .map_err(|_| ConfigurationError::page(format!("page index {index} is negative")))?;
        Ok(PageSpec { size, index })
    }

    /// Checks the size is at least 1 and, when a cap is given, at most
    /// `max_size`.
    pub fn validate(self, max_size: Option<usize>) -> Result<Self> {
        if self.size == 0 {
            return Err(ConfigurationError::page("page size must be at least 1"));
        }
        if let Some(max_size) = max_size.filter(|max| self.size > *max) {
            return Err(ConfigurationError::page(format!(
                "page size {} exceeds the maximum of {max_size}",
                self.size
            )));
        }
        Ok(self)
    }

    /// Index of the first row on this page.
    pub fn offset(self) -> usize {
        self.size.saturating_mul(self.index)
    }

    /// Row range of this page within `total` rows; empty past the end.
    pub fn window(self, total: usize) -> Range<usize> {
        let start = self.offset().min(total);
        let end = start.saturating_add(self.size).min(total);
        start..end
    }

    /// Describes this page of `total` rows.
    pub fn info(self, total: usize) -> PageInfo {
        let window = self.window(total);
        let (first_row, last_row) = if window.is_empty() {
            (0, 0)
        } else {
            (window.start + 1, window.end)
        };
        PageInfo {
            index: self.index,
            size: self.size,
            page_count: total.div_ceil(self.size.max(1)),
            first_row,
            last_row,
        }
    }
}

/// What a pager needs to render "Showing X to Y of Z" and prev/next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub index: usize,
    pub size: usize,
    pub page_count: usize,
    /// 1-based number of the first visible row, 0 on an empty page.
    pub first_row: usize,
    /// 1-based number of the last visible row, 0 on an empty page.
    pub last_row: usize,
}

impl PageInfo {
    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index.saturating_add(1) < self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.first_row == 0
    }

    pub fn summary(&self, total: usize) -> String {
        format!(
            "Showing {} to {} of {}",
            self.first_row, self.last_row, total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_partial_page() {
        let page = PageSpec::new(10, 2);
        assert_eq!(page.window(25), 20..25);

        let info = page.info(25);
        assert_eq!(info.page_count, 3);
        assert_eq!((info.first_row, info.last_row), (21, 25));
        assert!(info.has_prev());
        assert!(!info.has_next());
        assert_eq!(info.summary(25), "Showing 21 to 25 of 25");
    }

    #[test]
    fn index_past_the_end() {
        let page = PageSpec::new(10, 7);
        assert_eq!(page.window(25), 25..25);

        let info = page.info(25);
        assert!(info.is_empty());
        assert_eq!((info.first_row, info.last_row), (0, 0));
    }

    #[test]
    fn empty_result() {
        let info = PageSpec::new(10, 0).info(0);
        assert_eq!(info.page_count, 0);
        assert!(!info.has_prev());
        assert!(!info.has_next());
    }

    #[test]
    fn huge_index_does_not_overflow() {
        let page = PageSpec::new(usize::MAX, usize::MAX);
        assert_eq!(page.window(3), 3..3);

        let info = PageSpec::new(10, usize::MAX).info(25);
        assert!(info.is_empty());
        assert!(info.has_prev());
        assert!(!info.has_next());
    }

    #[test]
    fn validation() {
        assert!(PageSpec::new(10, 0).validate(Some(100)).is_ok());
        assert!(PageSpec::new(500, 0).validate(None).is_ok());

        let zero = PageSpec::new(0, 0).validate(None).unwrap_err();
        assert_eq!(zero.to_string(), "invalid page: page size must be at least 1");

        let big = PageSpec::new(500, 0).validate(Some(100)).unwrap_err();
        assert!(big.to_string().contains("exceeds the maximum of 100"));
    }

    #[test]
    fn negative_values_rejected() {
        assert_eq!(PageSpec::from_signed(10, 2).unwrap(), PageSpec::new(10, 2));
        assert!(PageSpec::from_signed(-1, 0).is_err());

        let err = PageSpec::from_signed(10, -3).unwrap_err();
        assert_eq!(err.to_string(), "invalid page: page index -3 is negative");
    }
}
