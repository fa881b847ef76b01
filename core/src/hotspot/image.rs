extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::prelude::{OriginDimensions, Point, Size};

use crate::config::DYNAMIC_PAGE_REDRAW_MS;
use crate::framebuffer::{Bitmap, PasteMask};

use super::Hotspot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFrame {
    pub bitmap: Bitmap,
    /// How long the frame stays up, zero for stills.
    pub delay_ms: u32,
}

impl ImageFrame {
    pub fn still(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            delay_ms: 0,
        }
    }
}

/// Still or animated bitmap. Only lit pixels are drawn.
pub struct ImageHotspot {
    size: Size,
    frames: Vec<ImageFrame>,
    frame_no: usize,
    xy: Option<Point>,
    interval_ms: u32,
    pub looping: bool,
    pub playback_speed: f32,
}

impl ImageHotspot {
    pub fn new(size: Size, frames: Vec<ImageFrame>) -> Self {
        Self {
            size,
            frames,
            frame_no: 0,
            xy: None,
            interval_ms: DYNAMIC_PAGE_REDRAW_MS,
            looping: true,
            playback_speed: 1.0,
        }
    }

    pub fn still(size: Size, bitmap: Bitmap) -> Self {
        Self::new(size, vec![ImageFrame::still(bitmap)])
    }

    pub fn at(mut self, xy: Point) -> Self {
        self.xy = Some(xy);
        self
    }

    pub fn set_frames(&mut self, frames: Vec<ImageFrame>) {
        self.frames = frames;
        self.frame_no = 0;
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    pub fn frame_no(&self) -> usize {
        self.frame_no
    }

    fn position(&self, frame: &Bitmap) -> Point {
        self.xy.unwrap_or_else(|| {
            let frame_size = frame.size();
            Point::new(
                (self.size.width as i32 - frame_size.width as i32) / 2,
                (self.size.height as i32 - frame_size.height as i32) / 2,
            )
        })
    }
}

impl Hotspot for ImageHotspot {
    fn size(&self) -> Size {
        self.size
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn render(&mut self, image: &mut Bitmap) {
        let Some(frame) = self.frames.get(self.frame_no) else {
            return;
        };
        image.paste(&frame.bitmap, self.position(&frame.bitmap), PasteMask::White);
        let delay_ms = frame.delay_ms;

        if !self.is_animated() {
            return;
        }
        if delay_ms > 0 {
            let speed = if self.playback_speed > 0.0 {
                self.playback_speed
            } else {
                1.0
            };
            self.interval_ms = ((delay_ms as f32 / speed) as u32).max(1);
        }
        if self.frame_no + 1 < self.frames.len() {
            self.frame_no += 1;
        } else if self.looping {
            self.frame_no = 0;
        } else {
            // Held on the last frame, nothing left to animate.
            self.interval_ms = DYNAMIC_PAGE_REDRAW_MS;
        }
    }
}
