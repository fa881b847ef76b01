use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::{Point, Primitive, Size},
    primitives::{PrimitiveStyle, Rectangle},
};

use crate::config::DYNAMIC_PAGE_REDRAW_MS;
use crate::framebuffer::Bitmap;

use super::{Hotspot, Source};

/// Filled box inside the hotspot area, e.g. the level of a gauge.
pub struct RectangleHotspot {
    size: Size,
    bounds: Source<Rectangle>,
    interval_ms: u32,
}

impl RectangleHotspot {
    pub fn new(size: Size, bounds: Source<Rectangle>) -> Self {
        Self {
            size,
            bounds,
            interval_ms: DYNAMIC_PAGE_REDRAW_MS,
        }
    }

    /// Box covering `percent` of the width, full height.
    pub fn level(size: Size, percent: u8) -> Rectangle {
        let width = size.width * u32::from(percent.min(100)) / 100;
        Rectangle::new(Point::zero(), Size::new(width, size.height))
    }
}

impl Hotspot for RectangleHotspot {
    fn size(&self) -> Size {
        self.size
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn render(&mut self, image: &mut Bitmap) {
        self.bounds
            .get()
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(image)
            .ok();
    }
}
