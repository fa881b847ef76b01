extern crate alloc;

use alloc::string::String;

use embedded_graphics::{
    Drawable,
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::{Point, Size},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::config::DYNAMIC_PAGE_REDRAW_MS;
use crate::framebuffer::Bitmap;

use super::{Hotspot, Source, font_for_size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Middle,
}

pub struct TextHotspot {
    size: Size,
    text: Source<String>,
    font: &'static MonoFont<'static>,
    anchor: Anchor,
    vertical: VerticalAnchor,
    xy: Option<Point>,
    interval_ms: u32,
    invert: bool,
}

impl TextHotspot {
    pub fn new(size: Size, text: impl Into<Source<String>>) -> Self {
        Self {
            size,
            text: text.into(),
            font: font_for_size(10),
            anchor: Anchor::Center,
            vertical: VerticalAnchor::Middle,
            xy: None,
            interval_ms: DYNAMIC_PAGE_REDRAW_MS,
            invert: false,
        }
    }

    pub fn font_size(mut self, px: u32) -> Self {
        self.font = font_for_size(px);
        self
    }

    pub fn font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    pub fn anchor(mut self, anchor: Anchor, vertical: VerticalAnchor) -> Self {
        self.anchor = anchor;
        self.vertical = vertical;
        self
    }

    /// Places the anchor point explicitly instead of deriving it from the size.
    pub fn at(mut self, xy: Point) -> Self {
        self.xy = Some(xy);
        self
    }

    pub fn interval(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn text(&self) -> String {
        self.text.get()
    }

    fn anchor_point(&self) -> Point {
        if let Some(xy) = self.xy {
            return xy;
        }
        let x = match self.anchor {
            Anchor::Left => 0,
            Anchor::Center => self.size.width as i32 / 2,
            Anchor::Right => self.size.width as i32 - 1,
        };
        let y = match self.vertical {
            VerticalAnchor::Top => 0,
            VerticalAnchor::Middle => self.size.height as i32 / 2,
        };
        Point::new(x, y)
    }
}

impl Hotspot for TextHotspot {
    fn size(&self) -> Size {
        self.size
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn invert(&self) -> bool {
        self.invert
    }

    fn render(&mut self, image: &mut Bitmap) {
        let text = self.text.get();
        if text.is_empty() {
            return;
        }
        let alignment = match self.anchor {
            Anchor::Left => Alignment::Left,
            Anchor::Center => Alignment::Center,
            Anchor::Right => Alignment::Right,
        };
        let baseline = match self.vertical {
            VerticalAnchor::Top => Baseline::Top,
            VerticalAnchor::Middle => Baseline::Middle,
        };
        let character_style = MonoTextStyle::new(self.font, BinaryColor::On);
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();
        Text::with_text_style(&text, self.anchor_point(), character_style, text_style)
            .draw(image)
            .ok();
    }
}
