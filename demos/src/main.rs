// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapping pager demo.
//!
//! Installs a pager of alternating text pages as a screen's content and replays
//! a short, scripted touch session against it, logging where each gesture
//! lands and which pages end up on screen.
//!
//! Run:
//! - `cargo run -p understory_pager_demo`
//! - `RUST_LOG=understory_pager=trace cargo run -p understory_pager_demo -- --pages 6`

mod screen;

use clap::Parser;
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;
use understory_pager::{PagerConfig, TouchEvent};

use crate::screen::PagerScreen;

/// Frame interval used to drive snap animations.
const FRAME_MS: u64 = 16;

#[derive(Parser, Debug)]
#[command(about = "Replay a swipe session against a snapping pager")]
struct Args {
    /// Number of pages supplied by the adapter.
    #[arg(long, default_value_t = 4)]
    pages: usize,
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    /// Viewport height in pixels.
    #[arg(long, default_value_t = 480.0)]
    height: f64,
}

/// One scripted gesture.
#[derive(Copy, Clone, Debug)]
enum Gesture {
    /// A quick swipe between two x positions.
    Swipe { from: f64, to: f64 },
    /// A slow drag that is released without a fling.
    Drag { from: f64, to: f64 },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut screen = PagerScreen::create(
        args.pages,
        Size::new(args.width, args.height),
        PagerConfig::default(),
    );
    tracing::info!(
        pages = screen.content.page_count(),
        content_width = screen.content.content_width(),
        background = ?screen.background.to_rgba8(),
        "screen created"
    );

    let w = args.width;
    let script = [
        Gesture::Swipe { from: w * 0.8, to: w * 0.3 },
        Gesture::Swipe { from: w * 0.8, to: w * 0.3 },
        Gesture::Drag { from: w * 0.2, to: w * 0.6 },
        Gesture::Swipe { from: w * 0.3, to: w * 0.9 },
        Gesture::Swipe { from: w * 0.5, to: w * 0.49 },
    ];

    let mut now = 0;
    for gesture in script {
        now = replay(&mut screen, gesture, now);
        now = settle(&mut screen, now);
        report(&screen, gesture);
        now += 500;
    }
}

/// Feeds one gesture to the pager and returns the time of its last event.
fn replay(screen: &mut PagerScreen, gesture: Gesture, start_ms: u64) -> u64 {
    let y = screen.content.viewport().height / 2.0;
    let (from, to, steps, step_ms) = match gesture {
        Gesture::Swipe { from, to } => (from, to, 4_u32, 12),
        Gesture::Drag { from, to } => (from, to, 20_u32, 150),
    };

    let mut now = start_ms;
    screen
        .content
        .handle_touch(&TouchEvent::down(Point::new(from, y), now));
    for step in 1..=steps {
        now += step_ms;
        let x = from + (to - from) * f64::from(step) / f64::from(steps);
        screen
            .content
            .handle_touch(&TouchEvent::moved(Point::new(x, y), now));
    }
    // Hold still before lifting a drag so it does not read as a fling.
    if matches!(gesture, Gesture::Drag { .. }) {
        now += 200;
    }
    let outcome = screen
        .content
        .handle_touch(&TouchEvent::up(Point::new(to, y), now));
    tracing::debug!(?gesture, ?outcome, "gesture replayed");
    now
}

/// Ticks frames until the snap animation finishes.
fn settle(screen: &mut PagerScreen, start_ms: u64) -> u64 {
    let mut now = start_ms;
    while screen.content.tick(now) {
        now += FRAME_MS;
    }
    now
}

fn report(screen: &PagerScreen, gesture: Gesture) {
    let visible: Vec<String> = screen
        .visible_pages()
        .iter()
        .map(|v| {
            let bg = v.page.background.to_rgba8();
            let fg = v.page.text_color.to_rgba8();
            format!(
                "#{} [{:.0}..{:.0}] \"{}\" (#{:02x}{:02x}{:02x} on #{:02x}{:02x}{:02x})",
                v.index, v.frame.x0, v.frame.x1, v.page.text, fg.r, fg.g, fg.b, bg.r, bg.g, bg.b
            )
        })
        .collect();
    tracing::info!(
        ?gesture,
        page = screen.content.current_page(),
        scroll_x = screen.content.scroll_x(),
        "settled"
    );
    for line in visible {
        tracing::info!("  visible page {line}");
    }
}
