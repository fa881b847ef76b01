extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
    primitives::Rectangle,
};

use crate::error::Error;

/// How the pixels of a pasted image are merged into the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteMask {
    /// Every source pixel replaces the destination pixel.
    Opaque,
    /// Only lit source pixels are copied.
    White,
    /// Only unlit source pixels are copied.
    Black,
    /// Nothing is copied.
    None,
}

impl PasteMask {
    pub fn from_flags(draw_white: bool, draw_black: bool) -> Self {
        match (draw_white, draw_black) {
            (true, true) => PasteMask::Opaque,
            (true, false) => PasteMask::White,
            (false, true) => PasteMask::Black,
            (false, false) => PasteMask::None,
        }
    }

    fn copies(self, color: BinaryColor) -> bool {
        match self {
            PasteMask::Opaque => true,
            PasteMask::White => color == BinaryColor::On,
            PasteMask::Black => color == BinaryColor::Off,
            PasteMask::None => false,
        }
    }
}

/// 1-bit image, packed MSB-first in row-major order. `On` is a lit pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    bits: Vec<u8>,
}

fn byte_len(size: Size) -> usize {
    (size.width as usize * size.height as usize).div_ceil(8)
}

impl Bitmap {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            bits: vec![0; byte_len(size)],
        }
    }

    pub fn filled(size: Size, color: BinaryColor) -> Self {
        let mut bitmap = Self::new(size);
        bitmap.fill(color);
        bitmap
    }

    pub fn from_bits(size: Size, bits: &[u8]) -> Result<Self, Error> {
        let expected = byte_len(size);
        if bits.len() < expected {
            return Err(Error::InvalidBitmap {
                expected,
                actual: bits.len(),
            });
        }
        let mut bitmap = Self {
            size,
            bits: bits[..expected].to_vec(),
        };
        bitmap.clear_padding();
        Ok(bitmap)
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as u32 >= self.size.width || y as u32 >= self.size.height {
            return None;
        }
        let index = y as usize * self.size.width as usize + x as usize;
        Some((index / 8, 7 - (index % 8) as u8))
    }

    pub fn pixel(&self, x: i32, y: i32) -> BinaryColor {
        match self.index(x, y) {
            Some((byte, bit)) if self.bits[byte] & (1 << bit) != 0 => BinaryColor::On,
            _ => BinaryColor::Off,
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if let Some((byte, bit)) = self.index(x, y) {
            match color {
                BinaryColor::On => self.bits[byte] |= 1 << bit,
                BinaryColor::Off => self.bits[byte] &= !(1 << bit),
            }
        }
    }

    pub fn fill(&mut self, color: BinaryColor) {
        let value = if color == BinaryColor::On { 0xFF } else { 0x00 };
        self.bits.fill(value);
        self.clear_padding();
    }

    pub fn invert(&mut self) {
        for byte in self.bits.iter_mut() {
            *byte = !*byte;
        }
        self.clear_padding();
    }

    pub fn inverted(&self) -> Self {
        let mut copy = self.clone();
        copy.invert();
        copy
    }

    /// Number of lit pixels.
    pub fn count_lit(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Copies `area` out of this bitmap. Parts outside the source stay unlit.
    pub fn crop(&self, area: Rectangle) -> Self {
        let mut out = Self::new(area.size);
        out.paste(self, -area.top_left, PasteMask::Opaque);
        out
    }

    /// Draws `src` with its top-left corner at `at`, clipped to this bitmap.
    pub fn paste(&mut self, src: &Bitmap, at: Point, mask: PasteMask) {
        if mask == PasteMask::None {
            return;
        }
        let x0 = at.x.max(0);
        let y0 = at.y.max(0);
        let x1 = (at.x + src.size.width as i32).min(self.size.width as i32);
        let y1 = (at.y + src.size.height as i32).min(self.size.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                let color = src.pixel(x - at.x, y - at.y);
                if mask.copies(color) {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    fn clear_padding(&mut self) {
        let used = self.size.width as usize * self.size.height as usize;
        let rem = used % 8;
        if rem != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= 0xFFu8 << (8 - rem);
            }
        }
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}

/// Back buffer for composing the next frame, front buffer holding the frame
/// last pushed to the panel.
pub struct FrameBuffers {
    framebuffer: [Bitmap; 2],
    active: bool,
}

impl FrameBuffers {
    pub fn new(size: Size) -> Self {
        Self {
            framebuffer: [Bitmap::new(size), Bitmap::new(size)],
            active: false,
        }
    }

    pub fn back_mut(&mut self) -> &mut Bitmap {
        if self.active {
            &mut self.framebuffer[1]
        } else {
            &mut self.framebuffer[0]
        }
    }

    pub fn back(&self) -> &Bitmap {
        if self.active {
            &self.framebuffer[1]
        } else {
            &self.framebuffer[0]
        }
    }

    pub fn front(&self) -> &Bitmap {
        if self.active {
            &self.framebuffer[0]
        } else {
            &self.framebuffer[1]
        }
    }

    pub fn differs(&self) -> bool {
        self.back() != self.front()
    }

    pub fn swap(&mut self) {
        self.active = !self.active;
    }
}
