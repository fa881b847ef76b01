//! Hotspots are the drawable pieces a page is made of. Each one renders into
//! an image of its own size and says how often it wants to be re-rendered.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use embedded_graphics::{
    mono_font::{MonoFont, ascii},
    prelude::Size,
};

use crate::framebuffer::{Bitmap, PasteMask};

pub mod image;
pub mod marquee;
pub mod rectangle;
pub mod status_icon;
pub mod text;

pub use image::{ImageFrame, ImageHotspot};
pub use marquee::MarqueeTextHotspot;
pub use rectangle::RectangleHotspot;
pub use status_icon::{ActionState, StatusIconHotspot};
pub use text::{Anchor, TextHotspot, VerticalAnchor};

pub trait Hotspot {
    fn size(&self) -> Size;

    /// Milliseconds between re-renders.
    fn interval_ms(&self) -> u32;

    /// Draws into `image`, which is `size()` large and starts unlit.
    fn render(&mut self, image: &mut Bitmap);

    fn draw_white(&self) -> bool {
        true
    }

    fn draw_black(&self) -> bool {
        true
    }

    /// Whether the cached image is inverted before being composed.
    fn invert(&self) -> bool {
        false
    }

    fn paste_mask(&self) -> PasteMask {
        PasteMask::from_flags(self.draw_white(), self.draw_black())
    }

    fn image(&mut self) -> Bitmap {
        let mut image = Bitmap::new(self.size());
        self.render(&mut image);
        image
    }
}

/// A value fixed at construction or read on every render.
pub enum Source<T> {
    Fixed(T),
    Dynamic(Box<dyn Fn() -> T>),
}

impl<T: Clone> Source<T> {
    pub fn dynamic(f: impl Fn() -> T + 'static) -> Self {
        Source::Dynamic(Box::new(f))
    }

    pub fn get(&self) -> T {
        match self {
            Source::Fixed(value) => value.clone(),
            Source::Dynamic(f) => f(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Source::Dynamic(_))
    }
}

impl From<&str> for Source<String> {
    fn from(value: &str) -> Self {
        Source::Fixed(String::from(value))
    }
}

impl From<String> for Source<String> {
    fn from(value: String) -> Self {
        Source::Fixed(value)
    }
}

/// Picks the built-in mono font closest to a requested pixel size.
pub fn font_for_size(px: u32) -> &'static MonoFont<'static> {
    match px {
        0..=9 => &ascii::FONT_5X8,
        10..=11 => &ascii::FONT_6X10,
        12..=13 => &ascii::FONT_6X13,
        14..=15 => &ascii::FONT_7X14,
        16..=18 => &ascii::FONT_9X15,
        _ => &ascii::FONT_10X20,
    }
}

/// Width in pixels of `text` set in `font`.
pub fn text_width(font: &MonoFont<'_>, text: &str) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0;
    }
    count * font.character_size.width + (count - 1) * font.character_spacing
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use alloc::rc::Rc;

    #[test]
    fn fonts_grow_with_size() {
        assert_eq!(font_for_size(8).character_size, Size::new(5, 8));
        assert_eq!(font_for_size(10).character_size, Size::new(6, 10));
        assert_eq!(font_for_size(20).character_size, Size::new(10, 20));
    }

    #[test]
    fn text_width_counts_characters() {
        let font = font_for_size(10);
        assert_eq!(text_width(font, ""), 0);
        assert_eq!(text_width(font, "SSH"), 18);
    }

    #[test]
    fn dynamic_source_is_read_each_time() {
        let counter = Rc::new(Cell::new(0));
        let reader = counter.clone();
        let source: Source<u32> = Source::dynamic(move || reader.get());
        assert_eq!(source.get(), 0);
        counter.set(5);
        assert_eq!(source.get(), 5);
        assert!(source.is_dynamic());
    }
}
