// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The snapping pager controller.
//!
//! [`SnappingPager`] combines a [`PageStrip`], a [`FlingDetector`] and a
//! [`HorizontalScroll`]. Touch events are resolved in this order:
//!
//! 1. The fling detector sees every event. A completed fling moves one page
//!    forward or back (when it is far and fast enough) and snaps there.
//! 2. A release or cancel that was not a fling snaps to the page nearest to
//!    the current scroll offset.
//! 3. Anything else falls through to plain drag scrolling.
//!
//! Snapping is always expressed as a smooth scroll to `page * page_width`;
//! the host calls [`SnappingPager::tick`] every frame to advance it.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Rect, Size};

use crate::adapter::PageAdapter;
use crate::fling::{Fling, FlingDetector, TouchEvent, TouchPhase};
use crate::geometry::{PageGeometry, PageRatio};
use crate::scroll::HorizontalScroll;
use crate::strip::{PageStrip, StripChild, StripLayout};

/// Thresholds and ratios for a [`SnappingPager`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PagerConfig {
    /// Horizontal distance (px) a fling must cover before it changes page.
    /// Also the distance a drag must cover before it starts scrolling.
    pub touch_slop: f64,
    /// Horizontal release speed (px/s) a fling must exceed to change page.
    pub min_fling_velocity: f64,
    /// Fraction of the viewport covered by one page.
    pub page_ratio: PageRatio,
    /// Duration of snap animations.
    pub snap_duration_ms: u64,
}

impl PagerConfig {
    /// Default touch slop in pixels.
    pub const DEFAULT_TOUCH_SLOP: f64 = 8.0;
    /// Default minimum fling velocity in pixels per second.
    pub const DEFAULT_MIN_FLING_VELOCITY: f64 = 50.0;
    /// Default snap animation duration in milliseconds.
    pub const DEFAULT_SNAP_DURATION_MS: u64 = 250;

    /// Sets [`PagerConfig::touch_slop`].
    #[must_use]
    pub fn with_touch_slop(mut self, touch_slop: f64) -> Self {
        self.touch_slop = touch_slop.abs();
        self
    }

    /// Sets [`PagerConfig::min_fling_velocity`].
    #[must_use]
    pub fn with_min_fling_velocity(mut self, velocity: f64) -> Self {
        self.min_fling_velocity = velocity.abs();
        self
    }

    /// Sets [`PagerConfig::page_ratio`].
    #[must_use]
    pub fn with_page_ratio(mut self, ratio: PageRatio) -> Self {
        self.page_ratio = ratio;
        self
    }

    /// Sets [`PagerConfig::snap_duration_ms`].
    #[must_use]
    pub fn with_snap_duration_ms(mut self, duration_ms: u64) -> Self {
        self.snap_duration_ms = duration_ms;
        self
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            touch_slop: Self::DEFAULT_TOUCH_SLOP,
            min_fling_velocity: Self::DEFAULT_MIN_FLING_VELOCITY,
            page_ratio: PageRatio::THREE_QUARTERS,
            snap_duration_ms: Self::DEFAULT_SNAP_DURATION_MS,
        }
    }
}

/// Why a fling could not be applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FlingError {
    /// No adapter has been set.
    NoAdapter,
    /// The adapter has no pages to move between.
    ///
    /// There is no last page to saturate at, so the fling is refused rather
    /// than clamped. [`SnappingPager::handle_touch`] still treats the release
    /// as a plain snap, which on an empty strip changes nothing.
    EmptyAdapter,
    /// No layout pass with a positive viewport width has happened yet.
    NotMeasured,
}

impl fmt::Display for FlingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAdapter => f.write_str("no page adapter has been set"),
            Self::EmptyAdapter => f.write_str("the page adapter has no pages"),
            Self::NotMeasured => f.write_str("the pager has not been measured"),
        }
    }
}

impl core::error::Error for FlingError {}

/// How [`SnappingPager::handle_touch`] resolved an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchOutcome {
    /// A fling moved (or re-snapped) the current page. Consumed.
    Flung,
    /// A release snapped to the nearest page. Consumed.
    Snapped,
    /// Not consumed; passed on to default drag scrolling.
    Passed,
}

impl TouchOutcome {
    /// Returns `true` if the pager's own gesture handling consumed the event.
    #[must_use]
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Flung | Self::Snapped)
    }
}

#[derive(Copy, Clone, Debug)]
struct DragScroll {
    start_x: f64,
    last_x: f64,
    dragging: bool,
}

/// A horizontal pager that snaps to partial-width pages.
pub struct SnappingPager<A: PageAdapter> {
    config: PagerConfig,
    adapter: Option<A>,
    strip: PageStrip<A::View>,
    layout: StripLayout,
    viewport: Size,
    geometry: Option<PageGeometry>,
    current_page: usize,
    fling: FlingDetector,
    drag: Option<DragScroll>,
    scroll: HorizontalScroll,
    scroll_request: Option<i32>,
}

impl<A: PageAdapter> SnappingPager<A> {
    /// Creates an empty pager.
    #[must_use]
    pub fn new(config: PagerConfig) -> Self {
        Self {
            config,
            adapter: None,
            strip: PageStrip::new(),
            layout: StripLayout::default(),
            viewport: Size::ZERO,
            geometry: None,
            current_page: 0,
            fling: FlingDetector::new(config.min_fling_velocity, config.touch_slop),
            drag: None,
            scroll: HorizontalScroll::new(config.snap_duration_ms),
            scroll_request: None,
        }
    }

    /// The configuration the pager was created with.
    #[must_use]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Installs `adapter` and rebuilds the strip from it.
    ///
    /// Any previous adapter and its page views are dropped and the current
    /// page resets to 0. An adapter with no pages leaves the strip empty.
    pub fn set_adapter(&mut self, adapter: A) {
        self.strip.populate(&adapter);
        self.adapter = Some(adapter);
        self.current_page = 0;
        self.scroll_request = None;
        self.fling.reset();
        self.drag = None;
        self.scroll.scroll_to(0);
        tracing::debug!(pages = self.strip.page_count(), "page adapter set");
        self.relayout();
    }

    /// The installed adapter, if any.
    #[must_use]
    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// Number of pages in the strip.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.strip.page_count()
    }

    /// The page strip.
    #[must_use]
    pub fn strip(&self) -> &PageStrip<A::View> {
        &self.strip
    }

    /// Mutable access to the page views. The page set itself cannot change.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut A::View> {
        self.strip.page_mut(index)
    }

    /// Index of the current page. Meaningless (0) when there are no pages.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Lays the strip out for a new viewport.
    ///
    /// The pager always fills the viewport; fractional widths are rounded to
    /// whole pixels.
    pub fn layout(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.relayout();
    }

    /// The last viewport passed to [`SnappingPager::layout`].
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Page arithmetic for the current viewport, once it has a positive width.
    #[must_use]
    pub fn geometry(&self) -> Option<&PageGeometry> {
        self.geometry.as_ref()
    }

    /// Forced width of the strip.
    #[must_use]
    pub fn content_width(&self) -> i32 {
        self.layout.content_width()
    }

    /// Each child with its frame in content coordinates.
    pub fn frames(&self) -> impl Iterator<Item = (&StripChild<A::View>, Rect)> + '_ {
        self.strip
            .children()
            .iter()
            .zip(self.layout.frames().iter().copied())
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_x(&self) -> i32 {
        self.scroll.offset()
    }

    /// Scroll state, including any running snap animation.
    #[must_use]
    pub fn scroll(&self) -> &HorizontalScroll {
        &self.scroll
    }

    /// Target of the most recent smooth-scroll request, before clamping.
    #[must_use]
    pub fn scroll_request(&self) -> Option<i32> {
        self.scroll_request
    }

    /// Advances a running snap animation. Returns `true` while it runs.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.scroll.advance(now_ms)
    }

    /// Handles one touch event.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> TouchOutcome {
        if let Some(fling) = self.fling.on_touch(event) {
            match self.handle_fling(&fling, event.time_ms) {
                Ok(()) => {
                    self.drag = None;
                    return TouchOutcome::Flung;
                }
                Err(err) => {
                    tracing::error!(
                        target: "fling",
                        "There was an error processing the fling event: {err}"
                    );
                }
            }
        }

        if event.is_release() {
            self.drag = None;
            self.snap_to_nearest(event.time_ms);
            return TouchOutcome::Snapped;
        }

        self.drag_scroll(event);
        TouchOutcome::Passed
    }

    /// Applies a recognized fling.
    ///
    /// A leftward fling (finger moving right to left) past the touch slop and
    /// faster than the minimum velocity advances one page, stopping at the
    /// last; the mirrored rightward fling goes back one page, stopping at the
    /// first. Any other fling keeps the current page. In every case the pager
    /// re-snaps to the current page.
    ///
    /// On error nothing is changed.
    pub fn handle_fling(&mut self, fling: &Fling, now_ms: u64) -> Result<(), FlingError> {
        let count = self.adapter.as_ref().ok_or(FlingError::NoAdapter)?.count();
        let last = count.checked_sub(1).ok_or(FlingError::EmptyAdapter)?;
        let geometry = self.geometry.ok_or(FlingError::NotMeasured)?;

        let slop = self.config.touch_slop;
        let fast = fling.velocity.x.abs() > self.config.min_fling_velocity;
        let previous = self.current_page;
        if fling.start.x - fling.end.x > slop && fast {
            self.current_page = (self.current_page + 1).min(last);
        } else if fling.end.x - fling.start.x > slop && fast {
            self.current_page = self.current_page.saturating_sub(1);
        }
        if previous != self.current_page {
            tracing::trace!(from = previous, to = self.current_page, "fling changed page");
        }

        self.smooth_scroll_to(geometry.page_offset(self.current_page), now_ms);
        Ok(())
    }

    /// Snaps to the page nearest to the current scroll offset.
    ///
    /// Does nothing before the pager has been measured.
    pub fn snap_to_nearest(&mut self, now_ms: u64) {
        let Some(geometry) = self.geometry else {
            tracing::trace!("release before layout; not snapping");
            return;
        };
        let Some(index) = geometry.snap_index(self.scroll.offset()) else {
            return;
        };
        let last = self.page_count().saturating_sub(1);
        self.current_page = usize::try_from(index).unwrap_or(0).min(last);
        self.smooth_scroll_to(geometry.page_offset(self.current_page), now_ms);
    }

    /// Smoothly scrolls to page `index`, clamped to the last page.
    pub fn scroll_to_page(&mut self, index: usize, now_ms: u64) {
        let Some(geometry) = self.geometry else {
            return;
        };
        self.current_page = index.min(self.page_count().saturating_sub(1));
        self.smooth_scroll_to(geometry.page_offset(self.current_page), now_ms);
    }

    fn smooth_scroll_to(&mut self, target: i32, now_ms: u64) {
        self.scroll_request = Some(target);
        let clamped = self.scroll.smooth_scroll_to(target, now_ms);
        tracing::trace!(target_x = target, clamped, page = self.current_page, "smooth scroll");
    }

    fn drag_scroll(&mut self, event: &TouchEvent) {
        let x = event.position.x;
        match event.phase {
            TouchPhase::Down => {
                self.drag = Some(DragScroll {
                    start_x: x,
                    last_x: x,
                    dragging: false,
                });
            }
            TouchPhase::Move => {
                let slop = self.config.touch_slop;
                let Some(drag) = &mut self.drag else {
                    return;
                };
                if !drag.dragging {
                    if (x - drag.start_x).abs() <= slop {
                        return;
                    }
                    drag.dragging = true;
                }
                let delta = round_delta(drag.last_x - x);
                drag.last_x = x;
                self.scroll.scroll_by(delta);
            }
            TouchPhase::Up | TouchPhase::Cancel => self.drag = None,
        }
    }

    fn relayout(&mut self) {
        let width = round_width(self.viewport.width);
        if width <= 0 {
            // The offset collapses to 0, so the page follows it.
            self.geometry = None;
            self.layout = StripLayout::default();
            self.scroll.set_max_offset(0);
            self.current_page = 0;
            self.scroll_request = None;
            self.drag = None;
            return;
        }
        let geometry = PageGeometry::new(width, self.config.page_ratio);
        self.layout = self.strip.measure(&geometry, self.viewport.height);
        self.scroll.set_max_offset(geometry.max_scroll(self.page_count()));
        self.geometry = Some(geometry);
        tracing::debug!(
            viewport_width = width,
            content_width = self.layout.content_width(),
            "pager laid out"
        );
    }
}

impl<A: PageAdapter> Default for SnappingPager<A> {
    fn default() -> Self {
        Self::new(PagerConfig::default())
    }
}

impl<A> fmt::Debug for SnappingPager<A>
where
    A: PageAdapter + fmt::Debug,
    A::View: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnappingPager")
            .field("config", &self.config)
            .field("adapter", &self.adapter)
            .field("strip", &self.strip)
            .field("layout", &self.layout)
            .field("viewport", &self.viewport)
            .field("geometry", &self.geometry)
            .field("current_page", &self.current_page)
            .field("fling", &self.fling)
            .field("drag", &self.drag)
            .field("scroll", &self.scroll)
            .field("scroll_request", &self.scroll_request)
            .finish()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "viewport widths are far inside the i32 range"
)]
fn round_width(width: f64) -> i32 {
    if width.is_finite() && width > 0.0 {
        width.round() as i32
    } else {
        0
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "per-event drag deltas are far inside the i32 range"
)]
fn round_delta(delta: f64) -> i32 {
    delta.round() as i32
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{FlingError, PagerConfig, SnappingPager, TouchOutcome};
    use crate::adapter::FnAdapter;
    use crate::fling::{Fling, TouchEvent};

    type Pager = SnappingPager<FnAdapter<fn(usize) -> usize>>;

    fn identity(index: usize) -> usize {
        index
    }

    fn pager(count: usize) -> Pager {
        let mut pager = Pager::default();
        pager.set_adapter(FnAdapter::new(count, identity as fn(usize) -> usize));
        pager.layout(Size::new(800.0, 480.0));
        pager
    }

    fn fling(dx: f64, vx: f64) -> Fling {
        Fling {
            start: Point::new(400.0, 100.0),
            end: Point::new(400.0 + dx, 100.0),
            velocity: Vec2::new(vx, 0.0),
        }
    }

    #[test]
    fn left_fling_advances_and_saturates() {
        let mut p = pager(3);
        for expected in [1_usize, 2, 2, 2] {
            p.handle_fling(&fling(-200.0, -3000.0), 0).unwrap();
            assert_eq!(p.current_page(), expected);
            assert_eq!(p.scroll_request(), Some(i32::try_from(expected).unwrap() * 600));
        }
    }

    #[test]
    fn right_fling_goes_back_and_saturates() {
        let mut p = pager(3);
        p.scroll_to_page(2, 0);
        for expected in [1_usize, 0, 0] {
            p.handle_fling(&fling(200.0, 3000.0), 0).unwrap();
            assert_eq!(p.current_page(), expected);
        }
    }

    #[test]
    fn weak_fling_resnaps_to_same_page() {
        let mut p = pager(4);
        p.scroll_to_page(1, 0);

        // Inside the slop.
        p.handle_fling(&fling(-5.0, -3000.0), 10).unwrap();
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.scroll_request(), Some(600));

        // Too slow.
        p.handle_fling(&fling(-300.0, -20.0), 20).unwrap();
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.scroll_request(), Some(600));
    }

    #[test]
    fn fling_velocity_sign_is_ignored() {
        let mut p = pager(4);
        // Leftward displacement with a positive velocity still advances.
        p.handle_fling(&fling(-200.0, 3000.0), 0).unwrap();
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn fling_faults_leave_state_untouched() {
        let mut unset = Pager::default();
        unset.layout(Size::new(800.0, 480.0));
        assert_eq!(unset.handle_fling(&fling(-200.0, -3000.0), 0), Err(FlingError::NoAdapter));
        assert_eq!(unset.current_page(), 0);
        assert_eq!(unset.scroll_request(), None);

        let mut empty = pager(0);
        assert_eq!(empty.handle_fling(&fling(-200.0, -3000.0), 0), Err(FlingError::EmptyAdapter));
        assert_eq!(empty.current_page(), 0);
        assert_eq!(empty.scroll_request(), None);

        let mut unmeasured = Pager::default();
        unmeasured.set_adapter(FnAdapter::new(3, identity as fn(usize) -> usize));
        assert_eq!(
            unmeasured.handle_fling(&fling(-200.0, -3000.0), 0),
            Err(FlingError::NotMeasured)
        );
        assert_eq!(unmeasured.current_page(), 0);
    }

    #[test]
    fn failed_fling_falls_back_to_release_snap() {
        let mut empty = pager(0);
        empty.handle_touch(&TouchEvent::down(Point::new(600.0, 0.0), 0));
        let outcome = empty.handle_touch(&TouchEvent::up(Point::new(100.0, 0.0), 40));
        assert_eq!(outcome, TouchOutcome::Snapped);
        assert_eq!(empty.current_page(), 0);
    }

    #[test]
    fn collapsed_viewport_resets_the_page() {
        let mut p = pager(4);
        p.handle_fling(&fling(-200.0, -3000.0), 0).unwrap();
        p.handle_fling(&fling(-200.0, -3000.0), 0).unwrap();
        assert_eq!(p.current_page(), 2);

        p.layout(Size::ZERO);
        assert!(p.geometry().is_none());
        assert_eq!(p.scroll_x(), 0);
        assert_eq!(p.current_page(), 0);

        p.layout(Size::new(800.0, 480.0));
        p.handle_fling(&fling(-200.0, -3000.0), 0).unwrap();
        assert_eq!(p.current_page(), 1, "moves from the restored offset, not the old page");
        assert_eq!(p.scroll_request(), Some(600));
    }

    #[test]
    fn config_builders_normalize_sign() {
        let config = PagerConfig::default()
            .with_touch_slop(-12.0)
            .with_min_fling_velocity(-80.0)
            .with_snap_duration_ms(100);
        assert_eq!(config.touch_slop, 12.0);
        assert_eq!(config.min_fling_velocity, 80.0);
        assert_eq!(config.snap_duration_ms, 100);
    }

    #[test]
    fn error_messages() {
        use alloc::string::ToString;
        assert_eq!(FlingError::NoAdapter.to_string(), "no page adapter has been set");
        assert_eq!(FlingError::EmptyAdapter.to_string(), "the page adapter has no pages");
    }
}
