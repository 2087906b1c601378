// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pager --heading-base-level=0

//! Understory Pager: a headless horizontal pager that snaps to pages.
//!
//! Each page is a fixed fraction of the viewport wide (three-quarters by
//! default) and the remainder is split evenly, so a sliver of the previous and
//! next page stays visible on either side. The pager is meant for a small,
//! fixed set of pages: all page views are created up front and none are
//! recycled.
//!
//! The crate does **not** render anything or talk to a windowing system.
//! Hosts are expected to:
//!
//! - Supply pages through a [`PageAdapter`].
//! - Call [`SnappingPager::layout`] when the viewport size changes, and draw
//!   the children from [`SnappingPager::frames`] shifted by
//!   [`SnappingPager::scroll_x`].
//! - Forward touch input as [`TouchEvent`]s to [`SnappingPager::handle_touch`].
//! - Call [`SnappingPager::tick`] each frame while a snap animation runs.
//!
//! The building blocks are public on their own as well:
//!
//! - [`PageGeometry`]: integer page arithmetic (page and margin widths, total
//!   content width, snap targets).
//! - [`PageStrip`]: the spacer, pages, spacer child list and its measurement.
//! - [`FlingDetector`]: fling recognition with touch velocity tracking.
//! - [`HorizontalScroll`]: a clamped scroll offset with superseding smooth
//!   scrolls.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_pager::{FnAdapter, SnappingPager, TouchEvent, TouchOutcome};
//!
//! let mut pager = SnappingPager::default();
//! pager.set_adapter(FnAdapter::new(4, |index: usize| format!("page {index}")));
//! pager.layout(Size::new(800.0, 480.0));
//!
//! // Two spacers around four pages; 800/4 + 4*800*3/4 pixels wide.
//! assert_eq!(pager.strip().len(), 6);
//! assert_eq!(pager.content_width(), 2600);
//!
//! // A quick swipe from right to left moves to the next page.
//! pager.handle_touch(&TouchEvent::down(Point::new(700.0, 200.0), 0));
//! pager.handle_touch(&TouchEvent::moved(Point::new(550.0, 200.0), 30));
//! let outcome = pager.handle_touch(&TouchEvent::up(Point::new(400.0, 200.0), 60));
//! assert_eq!(outcome, TouchOutcome::Flung);
//! assert_eq!(pager.current_page(), 1);
//!
//! // Let the snap animation run to completion.
//! while pager.tick(1_000) {}
//! assert_eq!(pager.scroll_x(), 600);
//! ```
//!
//! ## Logging
//!
//! Events are emitted through `tracing`: adapter assignment and layout at
//! `debug`, page changes and scroll requests at `trace`, and flings that could
//! not be applied at `error` under the `fling` target.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
mod fling;
mod geometry;
mod pager;
mod scroll;
mod strip;

pub use adapter::{FnAdapter, PageAdapter};
pub use fling::{Fling, FlingDetector, TouchEvent, TouchPhase};
pub use geometry::{PageGeometry, PageRatio};
pub use pager::{FlingError, PagerConfig, SnappingPager, TouchOutcome};
pub use scroll::{HorizontalScroll, SmoothScroll};
pub use strip::{PageStrip, StripChild, StripLayout};
