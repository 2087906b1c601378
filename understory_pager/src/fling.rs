// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input and fling recognition.
//!
//! [`FlingDetector`] follows a single pointer from down to up. It remembers
//! where the gesture started, keeps a short history of recent samples, and on
//! release estimates the release velocity from the samples inside a trailing
//! window. A [`Fling`] is reported when the pointer has left the tap region
//! (moved farther than the touch slop from where it went down) and either
//! velocity component is faster than the configured minimum. A release that
//! never left the tap region is a tap, however fast its jitter.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_pager::{FlingDetector, TouchEvent};
//!
//! let mut detector = FlingDetector::new(50.0, 8.0);
//! assert!(detector.on_touch(&TouchEvent::down(Point::new(600.0, 10.0), 0)).is_none());
//! assert!(detector.on_touch(&TouchEvent::moved(Point::new(450.0, 10.0), 40)).is_none());
//!
//! let fling = detector
//!     .on_touch(&TouchEvent::up(Point::new(300.0, 10.0), 80))
//!     .expect("fast swipe");
//! assert_eq!(fling.start, Point::new(600.0, 10.0));
//! assert!(fling.velocity.x < 0.0);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Samples older than this (relative to the newest) are ignored for velocity.
const VELOCITY_WINDOW_MS: u64 = 100;

/// Upper bound on the retained sample history.
const MAX_SAMPLES: usize = 16;

/// Phase of a touch event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger went down.
    Down,
    /// Finger moved while down.
    Move,
    /// Finger lifted.
    Up,
    /// The host took the gesture away (for example, a parent intercepted it).
    Cancel,
}

/// A single-pointer touch event in viewport coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Phase of the event.
    pub phase: TouchPhase,
    /// Pointer position.
    pub position: Point,
    /// Event timestamp in milliseconds, from any monotonic origin.
    pub time_ms: u64,
}

impl TouchEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(phase: TouchPhase, position: Point, time_ms: u64) -> Self {
        Self {
            phase,
            position,
            time_ms,
        }
    }

    /// A [`TouchPhase::Down`] event.
    #[must_use]
    pub fn down(position: Point, time_ms: u64) -> Self {
        Self::new(TouchPhase::Down, position, time_ms)
    }

    /// A [`TouchPhase::Move`] event.
    #[must_use]
    pub fn moved(position: Point, time_ms: u64) -> Self {
        Self::new(TouchPhase::Move, position, time_ms)
    }

    /// A [`TouchPhase::Up`] event.
    #[must_use]
    pub fn up(position: Point, time_ms: u64) -> Self {
        Self::new(TouchPhase::Up, position, time_ms)
    }

    /// A [`TouchPhase::Cancel`] event.
    #[must_use]
    pub fn cancel(position: Point, time_ms: u64) -> Self {
        Self::new(TouchPhase::Cancel, position, time_ms)
    }

    /// Returns `true` for [`TouchPhase::Up`] and [`TouchPhase::Cancel`].
    #[must_use]
    pub fn is_release(&self) -> bool {
        matches!(self.phase, TouchPhase::Up | TouchPhase::Cancel)
    }
}

/// A recognized fling: where it started, where it ended, and how fast it was
/// moving on release (pixels per second).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fling {
    /// Position of the down event that began the gesture.
    pub start: Point,
    /// Position of the up event that ended it.
    pub end: Point,
    /// Release velocity in pixels per second.
    pub velocity: Vec2,
}

impl Fling {
    /// Horizontal displacement from start to end.
    #[must_use]
    pub fn delta_x(&self) -> f64 {
        self.end.x - self.start.x
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Sample {
    position: Point,
    time_ms: u64,
}

/// Recognizes flings from a stream of [`TouchEvent`]s.
#[derive(Clone, Debug)]
pub struct FlingDetector {
    min_velocity: f64,
    touch_slop: f64,
    start: Option<Point>,
    left_tap_region: bool,
    samples: SmallVec<[Sample; MAX_SAMPLES]>,
}

impl FlingDetector {
    /// Creates a detector that reports flings faster than `min_velocity`
    /// pixels per second on either axis, once the pointer has moved more than
    /// `touch_slop` pixels from where it went down.
    #[must_use]
    pub fn new(min_velocity: f64, touch_slop: f64) -> Self {
        Self {
            min_velocity: min_velocity.abs(),
            touch_slop: touch_slop.abs(),
            start: None,
            left_tap_region: false,
            samples: SmallVec::new(),
        }
    }

    /// Minimum velocity a release must exceed to count as a fling.
    #[must_use]
    pub fn min_velocity(&self) -> f64 {
        self.min_velocity
    }

    /// Distance the pointer must travel before a release can be a fling.
    #[must_use]
    pub fn touch_slop(&self) -> f64 {
        self.touch_slop
    }

    /// Returns `true` between a down event and the matching up or cancel.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Feeds one event; returns the fling it completes, if any.
    ///
    /// Moves and releases without a preceding down are ignored.
    pub fn on_touch(&mut self, event: &TouchEvent) -> Option<Fling> {
        match event.phase {
            TouchPhase::Down => {
                self.reset();
                self.start = Some(event.position);
                self.record(event);
                None
            }
            TouchPhase::Move => {
                if self.start.is_some() {
                    self.record(event);
                }
                None
            }
            TouchPhase::Up => {
                let start = self.start?;
                self.record(event);
                let velocity = self.velocity();
                let left_tap_region = self.left_tap_region;
                self.reset();
                if !left_tap_region {
                    return None;
                }
                let fast =
                    velocity.x.abs() > self.min_velocity || velocity.y.abs() > self.min_velocity;
                fast.then_some(Fling {
                    start,
                    end: event.position,
                    velocity,
                })
            }
            TouchPhase::Cancel => {
                self.reset();
                None
            }
        }
    }

    /// Forgets the current gesture.
    pub fn reset(&mut self) {
        self.start = None;
        self.left_tap_region = false;
        self.samples.clear();
    }

    fn record(&mut self, event: &TouchEvent) {
        let slop = self.touch_slop;
        if self
            .start
            .is_some_and(|start| (event.position - start).hypot() > slop)
        {
            self.left_tap_region = true;
        }
        if self.samples.len() == MAX_SAMPLES {
            self.samples.remove(0);
        }
        self.samples.push(Sample {
            position: event.position,
            time_ms: event.time_ms,
        });
    }

    /// Velocity between the oldest sample inside the window and the newest.
    fn velocity(&self) -> Vec2 {
        let Some(newest) = self.samples.last() else {
            return Vec2::ZERO;
        };
        let horizon = newest.time_ms.saturating_sub(VELOCITY_WINDOW_MS);
        let Some(oldest) = self.samples.iter().find(|s| s.time_ms >= horizon) else {
            return Vec2::ZERO;
        };
        let elapsed_ms = newest.time_ms.saturating_sub(oldest.time_ms);
        if elapsed_ms == 0 {
            return Vec2::ZERO;
        }
        let seconds = elapsed_ms as f64 / 1000.0;
        (newest.position - oldest.position) / seconds
    }
}

impl Default for FlingDetector {
    fn default() -> Self {
        Self::new(
            crate::PagerConfig::DEFAULT_MIN_FLING_VELOCITY,
            crate::PagerConfig::DEFAULT_TOUCH_SLOP,
        )
    }
}
