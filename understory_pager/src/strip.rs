// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page strip: a leading spacer, one child per page, and a trailing spacer.
//!
//! The strip owns the views produced by a [`PageAdapter`] and measures them
//! into frames in content coordinates. Spacers are fixed at the margin width;
//! pages share whatever remains with equal weight. Hosts translate the frames
//! by the negative scroll offset before drawing.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::adapter::PageAdapter;
use crate::geometry::PageGeometry;

/// One child of a [`PageStrip`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StripChild<V> {
    /// Transparent margin at either end of the strip.
    Spacer,
    /// A page view together with its adapter index.
    Page {
        /// Index the view was built for.
        index: usize,
        /// The view returned by the adapter.
        view: V,
    },
}

impl<V> StripChild<V> {
    /// Returns `true` for margin spacers.
    #[must_use]
    pub fn is_spacer(&self) -> bool {
        matches!(self, Self::Spacer)
    }

    /// Adapter index of a page, or `None` for spacers.
    #[must_use]
    pub fn page_index(&self) -> Option<usize> {
        match self {
            Self::Spacer => None,
            Self::Page { index, .. } => Some(*index),
        }
    }

    /// The page view, or `None` for spacers.
    #[must_use]
    pub fn view(&self) -> Option<&V> {
        match self {
            Self::Spacer => None,
            Self::Page { view, .. } => Some(view),
        }
    }
}

/// Ordered children of a pager: spacer, pages, spacer.
#[derive(Clone, Debug)]
pub struct PageStrip<V> {
    children: Vec<StripChild<V>>,
}

impl<V> Default for PageStrip<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PageStrip<V> {
    /// Creates an empty strip.
    #[must_use]
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Replaces the children with views built from `adapter`.
    ///
    /// An adapter with no pages leaves the strip empty, without spacers.
    pub fn populate<A>(&mut self, adapter: &A)
    where
        A: PageAdapter<View = V> + ?Sized,
    {
        self.children.clear();
        let count = adapter.count();
        if count == 0 {
            return;
        }
        self.children.reserve(count + 2);
        self.children.push(StripChild::Spacer);
        self.children
            .extend((0..count).map(|index| StripChild::Page {
                index,
                view: adapter.view_at(index),
            }));
        self.children.push(StripChild::Spacer);
    }

    /// Drops every child.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Number of children, spacers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the strip has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of page children.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.children.len().saturating_sub(2)
    }

    /// All children in layout order.
    #[must_use]
    pub fn children(&self) -> &[StripChild<V>] {
        &self.children
    }

    /// The view for page `index`, if present.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&V> {
        if index >= self.page_count() {
            return None;
        }
        self.children.get(index + 1).and_then(StripChild::view)
    }

    /// Mutable access to the view for page `index`, if present.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut V> {
        if index >= self.page_count() {
            return None;
        }
        match self.children.get_mut(index + 1) {
            Some(StripChild::Page { view, .. }) => Some(view),
            _ => None,
        }
    }

    /// Measures every child for the given geometry and viewport height.
    ///
    /// The strip width is forced to [`PageGeometry::content_width`]; spacers
    /// take [`PageGeometry::margin_width`] and pages split the rest evenly.
    #[must_use]
    pub fn measure(&self, geometry: &PageGeometry, height: f64) -> StripLayout {
        let pages = self.page_count();
        if self.children.is_empty() {
            return StripLayout::default();
        }
        let content_width = geometry.content_width(pages);
        let margin = f64::from(geometry.margin_width());
        let shared = f64::from(content_width) - 2.0 * margin;
        let page_width = if pages == 0 {
            0.0
        } else {
            shared / pages as f64
        };

        let mut frames = Vec::with_capacity(self.children.len());
        let mut x = 0.0;
        for child in &self.children {
            let width = if child.is_spacer() { margin } else { page_width };
            frames.push(Rect::new(x, 0.0, x + width, height));
            x += width;
        }
        StripLayout {
            content_width,
            frames,
        }
    }
}

/// Result of measuring a [`PageStrip`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StripLayout {
    content_width: i32,
    frames: Vec<Rect>,
}

impl StripLayout {
    /// Forced total width of the strip in pixels.
    #[must_use]
    pub fn content_width(&self) -> i32 {
        self.content_width
    }

    /// Frame of each child in content coordinates, in child order.
    #[must_use]
    pub fn frames(&self) -> &[Rect] {
        &self.frames
    }
}
