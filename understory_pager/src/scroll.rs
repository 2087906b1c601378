// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal scroll offset with range clamping and smooth scrolling.
//!
//! [`HorizontalScroll`] stores an integer offset in `[0, max_offset]`.
//! Smooth scrolls are fire-and-forget: [`HorizontalScroll::smooth_scroll_to`]
//! starts an animation from wherever the offset currently is, replacing any
//! animation already running, and the host drives it forward with
//! [`HorizontalScroll::advance`] once per frame.
//!
//! ```
//! use understory_pager::HorizontalScroll;
//!
//! let mut scroll = HorizontalScroll::new(250);
//! scroll.set_max_offset(1800);
//! scroll.smooth_scroll_to(600, 0);
//!
//! assert!(scroll.advance(100));
//! assert!(scroll.offset() > 0 && scroll.offset() < 600);
//! assert!(!scroll.advance(250));
//! assert_eq!(scroll.offset(), 600);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`

/// An eased animation between two offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SmoothScroll {
    from: i32,
    to: i32,
    start_ms: u64,
    duration_ms: u64,
}

impl SmoothScroll {
    /// Offset the animation started from.
    #[must_use]
    pub fn start_offset(&self) -> i32 {
        self.from
    }

    /// Offset the animation ends at.
    #[must_use]
    pub fn target(&self) -> i32 {
        self.to
    }

    /// Returns `true` once `now_ms` reaches the end of the animation.
    #[must_use]
    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Offset at `now_ms`, eased out with a cubic curve.
    #[must_use]
    pub fn offset_at(&self, now_ms: u64) -> i32 {
        if self.is_finished(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = elapsed as f64 / self.duration_ms as f64;
        let inv = 1.0 - t;
        let eased = 1.0 - inv * inv * inv;
        let span = f64::from(self.to) - f64::from(self.from);
        round_px(f64::from(self.from) + span * eased)
    }
}

/// Scroll position along the strip.
#[derive(Clone, Debug)]
pub struct HorizontalScroll {
    offset: i32,
    max_offset: i32,
    duration_ms: u64,
    animation: Option<SmoothScroll>,
}

impl HorizontalScroll {
    /// Creates a scroll at offset 0 whose smooth scrolls last `duration_ms`.
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            duration_ms,
            animation: None,
        }
    }

    /// Current offset.
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Largest reachable offset.
    #[must_use]
    pub fn max_offset(&self) -> i32 {
        self.max_offset
    }

    /// Sets the scroll range to `[0, max_offset]` and clamps the offset and
    /// any running animation into it.
    pub fn set_max_offset(&mut self, max_offset: i32) {
        self.max_offset = max_offset.max(0);
        self.offset = self.clamp(self.offset);
        let max_offset = self.max_offset;
        if let Some(animation) = &mut self.animation {
            animation.from = animation.from.clamp(0, max_offset);
            animation.to = animation.to.clamp(0, max_offset);
        }
    }

    /// The running animation, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&SmoothScroll> {
        self.animation.as_ref()
    }

    /// Returns `true` while a smooth scroll is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Jumps to `offset` (clamped), stopping any animation.
    pub fn scroll_to(&mut self, offset: i32) {
        self.animation = None;
        self.offset = self.clamp(offset);
    }

    /// Moves by `delta` (clamped), stopping any animation. Used for drags.
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll_to(self.offset.saturating_add(delta));
    }

    /// Starts a smooth scroll towards `target` (clamped) and returns the
    /// clamped target. Replaces any running animation.
    pub fn smooth_scroll_to(&mut self, target: i32, now_ms: u64) -> i32 {
        let to = self.clamp(target);
        self.animation = if to == self.offset || self.duration_ms == 0 {
            self.offset = to;
            None
        } else {
            Some(SmoothScroll {
                from: self.offset,
                to,
                start_ms: now_ms,
                duration_ms: self.duration_ms,
            })
        };
        to
    }

    /// Steps the running animation to `now_ms`. Returns `true` while it is
    /// still running.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        self.offset = self.clamp(animation.offset_at(now_ms));
        if animation.is_finished(now_ms) {
            self.animation = None;
            return false;
        }
        true
    }

    fn clamp(&self, offset: i32) -> i32 {
        offset.clamp(0, self.max_offset)
    }
}

impl Default for HorizontalScroll {
    fn default() -> Self {
        Self::new(crate::PagerConfig::DEFAULT_SNAP_DURATION_MS)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "offsets are interpolated between two i32 values"
)]
fn round_px(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::HorizontalScroll;

    fn scroll(max: i32) -> HorizontalScroll {
        let mut scroll = HorizontalScroll::new(250);
        scroll.set_max_offset(max);
        scroll
    }

    #[test]
    fn offsets_are_clamped_to_range() {
        let mut s = scroll(1800);
        s.scroll_to(5000);
        assert_eq!(s.offset(), 1800);
        s.scroll_by(-4000);
        assert_eq!(s.offset(), 0);
        s.set_max_offset(-10);
        assert_eq!(s.max_offset(), 0);
    }

    #[test]
    fn shrinking_range_pulls_offset_back() {
        let mut s = scroll(1800);
        s.scroll_to(1500);
        s.set_max_offset(600);
        assert_eq!(s.offset(), 600);
    }

    #[test]
    fn smooth_scroll_eases_towards_target() {
        let mut s = scroll(1800);
        assert_eq!(s.smooth_scroll_to(1200, 1000), 1200);
        assert!(s.is_animating());

        let mut last = s.offset();
        for now in (1016..1250).step_by(16) {
            assert!(s.advance(now), "still running at {now}");
            assert!(s.offset() >= last, "monotonic towards the target");
            last = s.offset();
        }
        assert!(!s.advance(1250));
        assert_eq!(s.offset(), 1200);
        assert!(!s.is_animating());
    }

    #[test]
    fn new_smooth_scroll_supersedes_running_one() {
        let mut s = scroll(1800);
        s.smooth_scroll_to(1200, 0);
        s.advance(100);
        let midway = s.offset();
        assert!(midway > 0);

        s.smooth_scroll_to(0, 100);
        let animation = *s.animation().unwrap();
        assert_eq!(animation.start_offset(), midway, "restarts from the current offset");
        assert_eq!(animation.target(), 0);
        s.advance(400);
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn smooth_scroll_target_is_clamped() {
        let mut s = scroll(1800);
        assert_eq!(s.smooth_scroll_to(2400, 0), 1800);
        assert_eq!(s.smooth_scroll_to(-50, 0), 0);
        assert!(!s.is_animating(), "already at the clamped target");
    }

    #[test]
    fn drag_stops_animation() {
        let mut s = scroll(1800);
        s.smooth_scroll_to(600, 0);
        s.scroll_by(10);
        assert!(!s.is_animating());
        assert_eq!(s.offset(), 10);
    }

    #[test]
    fn zero_duration_jumps() {
        let mut s = HorizontalScroll::new(0);
        s.set_max_offset(1000);
        s.smooth_scroll_to(600, 0);
        assert_eq!(s.offset(), 600);
        assert!(!s.advance(1));
    }
}
