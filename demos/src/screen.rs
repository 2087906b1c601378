// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A screen whose whole content is a snapping pager of text pages.

use kurbo::{Rect, Size};
use peniko::Color;
use understory_pager::{PageAdapter, PagerConfig, SnappingPager, StripChild};

const LIGHT_GRAY: Color = Color::from_rgb8(0xcc, 0xcc, 0xcc);
const DARK_GRAY: Color = Color::from_rgb8(0x44, 0x44, 0x44);
const WHITE: Color = Color::from_rgb8(0xff, 0xff, 0xff);
const BLACK: Color = Color::from_rgb8(0x00, 0x00, 0x00);

/// A centered line of text on a solid background.
#[derive(Clone, Debug)]
pub(crate) struct TextPage {
    pub(crate) text: String,
    pub(crate) background: Color,
    pub(crate) text_color: Color,
}

/// Pages alternate between dark text on white and light text on dark gray.
#[derive(Debug)]
pub(crate) struct TextPages {
    count: usize,
}

impl TextPages {
    pub(crate) fn new(count: usize) -> Self {
        Self { count }
    }
}

impl PageAdapter for TextPages {
    type View = TextPage;

    fn count(&self) -> usize {
        self.count
    }

    fn view_at(&self, index: usize) -> TextPage {
        let even = index % 2 == 0;
        TextPage {
            text: String::from("This is a very long text"),
            background: if even { WHITE } else { DARK_GRAY },
            text_color: if even { BLACK } else { WHITE },
        }
    }
}

/// A page's frame on screen, after scrolling.
#[derive(Clone, Debug)]
pub(crate) struct VisiblePage<'a> {
    pub(crate) index: usize,
    pub(crate) page: &'a TextPage,
    pub(crate) frame: Rect,
}

/// The screen: a light gray backdrop with the pager installed as content.
#[derive(Debug)]
pub(crate) struct PagerScreen {
    pub(crate) background: Color,
    pub(crate) content: SnappingPager<TextPages>,
}

impl PagerScreen {
    /// Builds the pager, hands it the adapter, and lays it out for `size`.
    pub(crate) fn create(pages: usize, size: Size, config: PagerConfig) -> Self {
        let mut content = SnappingPager::new(config);
        content.set_adapter(TextPages::new(pages));
        content.layout(size);
        Self {
            background: LIGHT_GRAY,
            content,
        }
    }

    /// Pages that intersect the viewport, in screen coordinates.
    pub(crate) fn visible_pages(&self) -> Vec<VisiblePage<'_>> {
        let viewport = self.content.viewport().to_rect();
        let scroll_x = f64::from(self.content.scroll_x());
        self.content
            .frames()
            .filter_map(|(child, frame)| match child {
                StripChild::Page { index, view } => Some(VisiblePage {
                    index: *index,
                    page: view,
                    frame: frame - kurbo::Vec2::new(scroll_x, 0.0),
                }),
                StripChild::Spacer => None,
            })
            .filter(|visible| visible.frame.intersect(viewport).area() > 0.0)
            .collect()
    }
}
