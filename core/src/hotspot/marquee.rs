extern crate alloc;

use alloc::string::String;

use embedded_graphics::{
    Drawable,
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::{Point, Size},
    primitives::Rectangle,
    text::{Baseline, Text},
};

use crate::config::{
    DYNAMIC_PAGE_REDRAW_MS, MARQUEE_DELTA_PX, MARQUEE_FRAME_MS, MARQUEE_PAUSE_FRAMES,
};
use crate::framebuffer::{Bitmap, PasteMask};
use crate::scroll::{Marquee, PauseAtEnds};

use super::{Hotspot, Source, font_for_size, text_width};

/// Single line of text that slides back and forth when it is wider than the
/// hotspot.
pub struct MarqueeTextHotspot {
    size: Size,
    text: Source<String>,
    font: &'static MonoFont<'static>,
    interval_ms: u32,
    rendered_text: String,
    text_image: Bitmap,
    offsets: PauseAtEnds,
}

impl MarqueeTextHotspot {
    pub fn new(size: Size, text: impl Into<Source<String>>) -> Self {
        let mut hotspot = Self {
            size,
            text: text.into(),
            font: font_for_size(20),
            interval_ms: MARQUEE_FRAME_MS,
            rendered_text: String::new(),
            text_image: Bitmap::new(size),
            offsets: PauseAtEnds::new(Marquee::new(0, 0, MARQUEE_DELTA_PX), 0),
        };
        hotspot.update_text_image();
        hotspot
    }

    pub fn font_size(mut self, px: u32) -> Self {
        self.font = font_for_size(px);
        self.update_text_image();
        self
    }

    pub fn interval(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn needs_scrolling(&self) -> bool {
        self.text_image.width() > self.size.width
    }

    /// Re-renders the text into a strip as wide as the text and restarts
    /// the sweep over it.
    fn update_text_image(&mut self) {
        let text = self.text.get();
        let width = text_width(self.font, &text).max(self.size.width);
        let height = self.font.character_size.height.max(self.size.height);
        let mut image = Bitmap::new(Size::new(width, height));

        let y = (height as i32 - self.font.character_size.height as i32) / 2;
        Text::with_baseline(
            &text,
            Point::new(0, y),
            MonoTextStyle::new(self.font, BinaryColor::On),
            Baseline::Top,
        )
        .draw(&mut image)
        .ok();

        let max = width as i32 - self.size.width as i32;
        self.offsets = PauseAtEnds::new(
            Marquee::new(0, max, MARQUEE_DELTA_PX),
            MARQUEE_PAUSE_FRAMES,
        );
        self.text_image = image;
        self.rendered_text = text;
    }
}

impl Hotspot for MarqueeTextHotspot {
    fn size(&self) -> Size {
        self.size
    }

    fn interval_ms(&self) -> u32 {
        if self.needs_scrolling() {
            self.interval_ms
        } else {
            DYNAMIC_PAGE_REDRAW_MS
        }
    }

    fn render(&mut self, image: &mut Bitmap) {
        if self.text.is_dynamic() && self.text.get() != self.rendered_text {
            self.update_text_image();
        }
        if self.rendered_text.is_empty() {
            return;
        }
        let x = self.offsets.next().unwrap_or(0);
        let window = self
            .text_image
            .crop(Rectangle::new(Point::new(x, 0), self.size));
        image.paste(&window, Point::zero(), PasteMask::Opaque);
    }
}
