extern crate alloc;

use alloc::boxed::Box;

use embedded_graphics::prelude::{Point, Size};

use crate::framebuffer::Bitmap;
use crate::hotspot::Hotspot;
use crate::tile::Tile;

/// A window sliding over a virtual canvas larger than the screen. Hotspots
/// are placed in canvas coordinates; only those under the window are drawn
/// and refreshed.
pub struct Viewport {
    tile: Tile,
    display_size: Size,
}

impl Viewport {
    pub fn new(window_size: Size, display_size: Size) -> Self {
        Self {
            tile: Tile::new(window_size),
            display_size,
        }
    }

    pub fn window_size(&self) -> Size {
        self.tile.size()
    }

    pub fn window_height(&self) -> u32 {
        self.tile.size().height
    }

    pub fn display_size(&self) -> Size {
        self.display_size
    }

    pub fn position(&self) -> Point {
        self.tile.window_position()
    }

    /// Moves the window, clamped so it never leaves the canvas.
    pub fn set_position(&mut self, position: Point) {
        let window = self.tile.size();
        let max_x = (self.display_size.width as i32 - window.width as i32).max(0);
        let max_y = (self.display_size.height as i32 - window.height as i32).max(0);
        self.tile.set_window_position(Point::new(
            position.x.clamp(0, max_x),
            position.y.clamp(0, max_y),
        ));
    }

    pub fn add_hotspot(&mut self, hotspot: Box<dyn Hotspot>, xy: Point) {
        self.tile.add_hotspot(hotspot, xy);
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    pub fn tile_mut(&mut self) -> &mut Tile {
        &mut self.tile
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.tile.tick(elapsed_ms)
    }

    pub fn image(&self) -> Option<Bitmap> {
        self.tile.image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::tests::Block;
    use embedded_graphics::pixelcolor::BinaryColor;

    #[test]
    fn position_is_clamped_to_canvas() {
        let mut viewport = Viewport::new(Size::new(10, 10), Size::new(10, 30));
        viewport.set_position(Point::new(5, 25));
        assert_eq!(viewport.position(), Point::new(0, 20));
        viewport.set_position(Point::new(0, -4));
        assert_eq!(viewport.position(), Point::zero());
    }

    #[test]
    fn window_shows_canvas_region() {
        let mut viewport = Viewport::new(Size::new(4, 4), Size::new(4, 12));
        let (block, _) = Block::new(Size::new(4, 2), 100);
        viewport.add_hotspot(Box::new(block), Point::new(0, 5));
        viewport.tile_mut().start();

        assert_eq!(viewport.image().unwrap().count_lit(), 0);

        viewport.set_position(Point::new(0, 4));
        let image = viewport.image().unwrap();
        assert_eq!(image.pixel(0, 0), BinaryColor::Off);
        assert_eq!(image.pixel(0, 1), BinaryColor::On);
        assert_eq!(image.pixel(3, 2), BinaryColor::On);
        assert_eq!(image.count_lit(), 8);
    }
}
