// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page arithmetic in integer device pixels.
//!
//! A page covers a fixed fraction of the viewport ([`PageRatio`]); the rest
//! is split evenly between the peek of the previous page and the peek of the
//! next one. With the default ratio of 3/4 on an 800px viewport:
//!
//! - each page is 600px wide,
//! - each edge spacer is 100px wide (1/8 of the viewport),
//! - page `i` is centered when the scroll offset is `i * 600`.
//!
//! All divisions truncate toward zero and are evaluated left to right, so
//! `count * w * 3 / 4` is not always equal to `count * (w * 3 / 4)`.
//!
//! ```
//! use understory_pager::{PageGeometry, PageRatio};
//!
//! let geometry = PageGeometry::new(800, PageRatio::THREE_QUARTERS);
//! assert_eq!(geometry.page_width(), 600);
//! assert_eq!(geometry.margin_width(), 100);
//! assert_eq!(geometry.content_width(4), 2600);
//! assert_eq!(geometry.page_offset(2), 1200);
//! ```

/// Fraction of the viewport width taken by one page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageRatio {
    numerator: u32,
    denominator: u32,
}

impl PageRatio {
    /// Pages three-quarters of the viewport wide, peeking 1/8 on each side.
    pub const THREE_QUARTERS: Self = Self {
        numerator: 3,
        denominator: 4,
    };

    /// Creates a ratio `numerator / denominator`.
    ///
    /// Returns `None` unless `0 < numerator <= denominator`.
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Option<Self> {
        if numerator == 0 || numerator > denominator {
            return None;
        }
        Some(Self {
            numerator,
            denominator,
        })
    }

    /// Numerator of the ratio.
    #[must_use]
    pub const fn numerator(self) -> u32 {
        self.numerator
    }

    /// Denominator of the ratio.
    #[must_use]
    pub const fn denominator(self) -> u32 {
        self.denominator
    }
}

impl Default for PageRatio {
    fn default() -> Self {
        Self::THREE_QUARTERS
    }
}

/// Page sizes and snap positions for one measured viewport width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageGeometry {
    viewport_width: i32,
    ratio: PageRatio,
}

impl PageGeometry {
    /// Creates the geometry for `viewport_width` pixels. Negative widths are
    /// treated as zero.
    #[must_use]
    pub fn new(viewport_width: i32, ratio: PageRatio) -> Self {
        Self {
            viewport_width: viewport_width.max(0),
            ratio,
        }
    }

    /// Measured viewport width in pixels.
    #[must_use]
    pub fn viewport_width(&self) -> i32 {
        self.viewport_width
    }

    /// Ratio used to derive page widths.
    #[must_use]
    pub fn ratio(&self) -> PageRatio {
        self.ratio
    }

    /// Width of one page: `w * n / d`.
    #[must_use]
    pub fn page_width(&self) -> i32 {
        let w = i64::from(self.viewport_width);
        saturate(w * i64::from(self.ratio.numerator) / i64::from(self.ratio.denominator))
    }

    /// Width of each edge spacer: `w * (d - n) / (2 * d)`.
    ///
    /// For the default ratio this is `w / 8`.
    #[must_use]
    pub fn margin_width(&self) -> i32 {
        let w = i64::from(self.viewport_width);
        let uncovered = i64::from(self.ratio.denominator - self.ratio.numerator);
        saturate(w * uncovered / (2 * i64::from(self.ratio.denominator)))
    }

    /// Total width reserved for both spacers: `w * (d - n) / d`.
    ///
    /// For the default ratio this is `w / 4`.
    #[must_use]
    pub fn spacer_allowance(&self) -> i32 {
        let w = i64::from(self.viewport_width);
        let uncovered = i64::from(self.ratio.denominator - self.ratio.numerator);
        saturate(w * uncovered / i64::from(self.ratio.denominator))
    }

    /// Total strip width for `count` pages: `w * (d - n) / d + count * w * n / d`.
    ///
    /// An empty strip is zero wide.
    #[must_use]
    pub fn content_width(&self, count: usize) -> i32 {
        if count == 0 {
            return 0;
        }
        let w = i64::from(self.viewport_width);
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        let pages = count.saturating_mul(w).saturating_mul(i64::from(self.ratio.numerator))
            / i64::from(self.ratio.denominator);
        saturate(i64::from(self.spacer_allowance()).saturating_add(pages))
    }

    /// Largest scroll offset for `count` pages: content width minus the
    /// viewport, never negative.
    #[must_use]
    pub fn max_scroll(&self, count: usize) -> i32 {
        (self.content_width(count) - self.viewport_width).max(0)
    }

    /// Scroll offset that centers page `index`: `index * page_width`.
    #[must_use]
    pub fn page_offset(&self, index: usize) -> i32 {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        saturate(index.saturating_mul(i64::from(self.page_width())))
    }

    /// Page index nearest to `scroll_x`:
    /// `(scroll_x - margin + page_width / 2) / page_width`.
    ///
    /// The division truncates toward zero, so a small negative numerator
    /// yields 0 rather than -1. Returns `None` when the page width is zero.
    #[must_use]
    pub fn snap_index(&self, scroll_x: i32) -> Option<i32> {
        let page = self.page_width();
        if page == 0 {
            return None;
        }
        let numerator = i64::from(scroll_x) - i64::from(self.margin_width()) + i64::from(page / 2);
        Some(saturate(numerator / i64::from(page)))
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::{PageGeometry, PageRatio};

    #[test]
    fn ratio_rejects_empty_and_oversized_fractions() {
        assert_eq!(PageRatio::new(0, 4), None);
        assert_eq!(PageRatio::new(5, 4), None);
        assert_eq!(PageRatio::new(3, 0), None);
        assert_eq!(PageRatio::new(3, 4), Some(PageRatio::THREE_QUARTERS));
        assert_eq!(PageRatio::default(), PageRatio::THREE_QUARTERS);
    }

    #[test]
    fn default_ratio_reproduces_eighth_quarter_eighth_rhythm() {
        let g = PageGeometry::new(800, PageRatio::THREE_QUARTERS);
        assert_eq!(g.page_width(), 600);
        assert_eq!(g.margin_width(), 100);
        assert_eq!(g.spacer_allowance(), 200);
        assert_eq!(g.content_width(4), 2600, "800/4 + 4*800*3/4");
        assert_eq!(g.max_scroll(4), 1800);
        assert_eq!(g.max_scroll(4), g.page_offset(3), "last page is the end of the scroll range");
    }

    #[test]
    fn content_width_truncates_after_multiplying_by_count() {
        // 801 * 3 / 4 = 600, but 4 * 801 * 3 / 4 = 2403.
        let g = PageGeometry::new(801, PageRatio::THREE_QUARTERS);
        assert_eq!(g.page_width(), 600);
        assert_eq!(g.content_width(4), 200 + 2403);
    }

    #[test]
    fn empty_strip_has_no_width() {
        let g = PageGeometry::new(800, PageRatio::THREE_QUARTERS);
        assert_eq!(g.content_width(0), 0);
        assert_eq!(g.max_scroll(0), 0);
    }

    #[test]
    fn page_offsets_are_multiples_of_page_width() {
        let g = PageGeometry::new(1080, PageRatio::THREE_QUARTERS);
        for index in 0_usize..6 {
            let expected = i32::try_from(index).unwrap() * 810;
            assert_eq!(g.page_offset(index), expected, "offset of page {index}");
        }
    }

    #[test]
    fn snap_index_rounds_to_nearest_page() {
        let g = PageGeometry::new(800, PageRatio::THREE_QUARTERS);
        // (0 - 100 + 300) / 600 = 0
        assert_eq!(g.snap_index(0), Some(0));
        // (399 - 100 + 300) / 600 = 0
        assert_eq!(g.snap_index(399), Some(0));
        // (400 - 100 + 300) / 600 = 1
        assert_eq!(g.snap_index(400), Some(1));
        assert_eq!(g.snap_index(1200), Some(2));
        assert_eq!(g.snap_index(1800), Some(3));
    }

    #[test]
    fn snap_index_truncates_negative_numerators_toward_zero() {
        // Quarter-width pages: page 200, margin 800 * 3 / 8 = 300.
        let g = PageGeometry::new(800, PageRatio::new(1, 4).unwrap());
        assert_eq!(g.page_width(), 200);
        assert_eq!(g.margin_width(), 300);
        // (50 - 300 + 100) / 200 = -150 / 200, truncated to 0 rather than floored to -1.
        assert_eq!(g.snap_index(50), Some(0));
        // (-150 - 300 + 100) / 200 = -350 / 200 = -1.
        assert_eq!(g.snap_index(-150), Some(-1));
    }

    #[test]
    fn snap_index_is_undefined_without_a_page_width() {
        let g = PageGeometry::new(0, PageRatio::THREE_QUARTERS);
        assert_eq!(g.snap_index(0), None);
        assert_eq!(PageGeometry::new(-20, PageRatio::THREE_QUARTERS).viewport_width(), 0);
    }
}
