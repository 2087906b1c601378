// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page adapters: the source of page views for a [`SnappingPager`](crate::SnappingPager).
//!
//! An adapter reports how many pages exist and builds a fresh view for each
//! index. The pager reads both only when the adapter is assigned; there is no
//! change notification, so the page set is expected to be small and static.
//!
//! ## Minimal example
//!
//! ```
//! use understory_pager::{FnAdapter, PageAdapter};
//!
//! let adapter = FnAdapter::new(3, |index: usize| format!("page {index}"));
//! assert_eq!(adapter.count(), 3);
//! assert_eq!(adapter.view_at(1), "page 1");
//! ```

use alloc::boxed::Box;
use core::fmt;

/// Supplies the pages shown by a pager.
///
/// `View` is whatever the host renders: a widget handle, a display-list
/// node key, or a plain value in tests.
pub trait PageAdapter {
    /// The view type produced for each page.
    type View;

    /// Number of pages. Must stay fixed for the adapter's lifetime.
    fn count(&self) -> usize;

    /// Builds the view for `index`.
    ///
    /// Only called for `index < self.count()`. Each call should return a newly
    /// constructed, independently owned view.
    fn view_at(&self, index: usize) -> Self::View;
}

impl<A: PageAdapter + ?Sized> PageAdapter for &A {
    type View = A::View;

    fn count(&self) -> usize {
        (**self).count()
    }

    fn view_at(&self, index: usize) -> Self::View {
        (**self).view_at(index)
    }
}

impl<A: PageAdapter + ?Sized> PageAdapter for Box<A> {
    type View = A::View;

    fn count(&self) -> usize {
        (**self).count()
    }

    fn view_at(&self, index: usize) -> Self::View {
        (**self).view_at(index)
    }
}

/// An adapter backed by a page count and a view-building closure.
#[derive(Clone)]
pub struct FnAdapter<F> {
    count: usize,
    build: F,
}

impl<F> FnAdapter<F> {
    /// Creates an adapter with `count` pages built by `build`.
    #[must_use]
    pub fn new(count: usize, build: F) -> Self {
        Self { count, build }
    }
}

impl<F, V> PageAdapter for FnAdapter<F>
where
    F: Fn(usize) -> V,
{
    type View = V;

    fn count(&self) -> usize {
        self.count
    }

    fn view_at(&self, index: usize) -> V {
        (self.build)(index)
    }
}

impl<F> fmt::Debug for FnAdapter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAdapter")
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use super::{FnAdapter, PageAdapter};

    #[test]
    fn fn_adapter_builds_a_fresh_view_per_call() {
        let calls = Cell::new(0_usize);
        let adapter = FnAdapter::new(2, |index: usize| {
            calls.set(calls.get() + 1);
            index * 10
        });

        assert_eq!(adapter.view_at(1), 10);
        assert_eq!(adapter.view_at(1), 10);
        assert_eq!(calls.get(), 2, "each view_at call should run the builder");
    }

    #[test]
    fn references_and_boxes_forward_to_the_inner_adapter() {
        let adapter = FnAdapter::new(4, |index: usize| index + 1);

        let by_ref = &adapter;
        assert_eq!(by_ref.count(), 4);
        assert_eq!(by_ref.view_at(3), 4);

        let boxed: Box<dyn PageAdapter<View = usize>> = Box::new(adapter);
        let views: Vec<usize> = (0..boxed.count()).map(|i| boxed.view_at(i)).collect();
        assert_eq!(views, [1, 2, 3, 4]);
    }
}
