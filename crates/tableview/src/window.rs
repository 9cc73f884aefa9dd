//! Virtual scrolling: which rows of a long, unpaged list to materialize.

use serde::Serialize;

/// Rows rendered above and below the viewport.
pub const OVERSCAN_ROWS: usize = 2;

/// The slice of rows to render for the current scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollWindow {
    /// First row to render.
    pub start: usize,
    /// One past the last row to render.
    pub end: usize,
    /// Vertical offset of the first rendered row, in pixels.
    pub offset_y: u64,
    /// Height of the whole list, in pixels.
    pub total_height: u64,
}

impl ScrollWindow {
    /// Computes the window for `total_rows` rows of `row_height` pixels in a
    /// viewport `viewport_height` pixels tall, scrolled to `scroll_top`.
    ///
    /// A zero row height renders nothing.
    pub fn compute(total_rows: usize, row_height: u32, viewport_height: u32, scroll_top: u64) -> Self {
        let row_height = u64::from(row_height);
        let total_height = (total_rows as u64).saturating_mul(row_height);
        if row_height == 0 {
            return ScrollWindow {
                start: 0,
                end: 0,
                offset_y: 0,
                total_height,
            };
        }

        let start = usize::try_from(scroll_top / row_height)
            .unwrap_or(usize::MAX)
            .min(total_rows);
        let visible = usize::try_from(u64::from(viewport_height).div_ceil(row_height))
            .unwrap_or(usize::MAX)
            .saturating_add(OVERSCAN_ROWS);
        let end = start.saturating_add(visible).min(total_rows);

        ScrollWindow {
            start,
            end,
            offset_y: start as u64 * row_height,
            total_height,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The rows of `rows` inside this window.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let end = self.end.min(rows.len());
        &rows[self.start.min(end)..end]
    }
}
