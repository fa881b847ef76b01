//! Tiles compose the cached images of their hotspots into one bitmap.
//!
//! Every hotspot instance keeps the last image it rendered. Refreshing
//! renders into a fresh bitmap and swaps it in whole, so composing a frame
//! never sees a half-drawn hotspot.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::framebuffer::Bitmap;
use crate::hotspot::Hotspot;

pub struct HotspotInstance {
    hotspot: Box<dyn Hotspot>,
    xy: Point,
    cached: Option<Bitmap>,
    until_due_ms: u32,
}

impl HotspotInstance {
    pub fn new(hotspot: Box<dyn Hotspot>, xy: Point) -> Self {
        Self {
            hotspot,
            xy,
            cached: None,
            until_due_ms: 0,
        }
    }

    pub fn xy(&self) -> Point {
        self.xy
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.xy, self.hotspot.size())
    }

    pub fn cached(&self) -> Option<&Bitmap> {
        self.cached.as_ref()
    }

    fn cache_new_image(&mut self) -> bool {
        let image = self.hotspot.image();
        self.until_due_ms = self.hotspot.interval_ms().max(1);
        if self.cached.as_ref() == Some(&image) {
            return false;
        }
        self.cached = Some(image);
        true
    }
}

/// Neither range lies entirely past the other. Ranges are half-open.
fn range_overlap(a_min: i32, a_max: i32, b_min: i32, b_max: i32) -> bool {
    a_min < b_max && b_min < a_max
}

pub fn rectangles_overlap(a: &Rectangle, b: &Rectangle) -> bool {
    let a_right = a.top_left.x + a.size.width as i32;
    let a_bottom = a.top_left.y + a.size.height as i32;
    let b_right = b.top_left.x + b.size.width as i32;
    let b_bottom = b.top_left.y + b.size.height as i32;
    range_overlap(a.top_left.x, a_right, b.top_left.x, b_right)
        && range_overlap(a.top_left.y, a_bottom, b.top_left.y, b_bottom)
}

pub struct Tile {
    size: Size,
    window_position: Point,
    instances: Vec<HotspotInstance>,
    active: bool,
    caching: bool,
}

impl Tile {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            window_position: Point::zero(),
            instances: Vec::new(),
            active: false,
            caching: false,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn window_position(&self) -> Point {
        self.window_position
    }

    pub(crate) fn set_window_position(&mut self, position: Point) {
        self.window_position = position;
    }

    pub fn window(&self) -> Rectangle {
        Rectangle::new(self.window_position, self.size)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_caching(&self) -> bool {
        self.caching
    }

    pub fn start(&mut self) {
        self.caching = true;
    }

    pub fn stop(&mut self) {
        self.caching = false;
        log::debug!("Tile stopped caching {} hotspots", self.instances.len());
    }

    pub fn clear(&mut self) {
        self.stop();
        self.instances.clear();
    }

    pub fn instances(&self) -> &[HotspotInstance] {
        &self.instances
    }

    /// Registers a hotspot at `xy` and renders its first image straight away.
    pub fn add_hotspot(&mut self, hotspot: Box<dyn Hotspot>, xy: Point) {
        let mut instance = HotspotInstance::new(hotspot, xy);
        instance.cache_new_image();
        log::debug!(
            "Tile.add_hotspot at {:?} size {:?}",
            xy,
            instance.hotspot.size()
        );
        self.instances.push(instance);
    }

    pub fn is_overlapping(&self, instance: &HotspotInstance) -> bool {
        rectangles_overlap(&instance.bounds(), &self.window())
    }

    /// Counts down every hotspot's interval and re-renders the ones that
    /// are due and visible. Returns whether any cached image changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.caching {
            return false;
        }
        let window = self.window();
        let active = self.active;
        let mut changed = false;
        for instance in self.instances.iter_mut() {
            instance.until_due_ms = instance.until_due_ms.saturating_sub(elapsed_ms);
            if instance.until_due_ms > 0 {
                continue;
            }
            if !active || !rectangles_overlap(&instance.bounds(), &window) {
                instance.until_due_ms = instance.hotspot.interval_ms().max(1);
                continue;
            }
            changed |= instance.cache_new_image();
        }
        changed
    }

    /// Shortest refresh interval among the visible hotspots.
    pub fn min_interval_ms(&self) -> Option<u32> {
        self.instances
            .iter()
            .filter(|instance| self.is_overlapping(instance))
            .map(|instance| instance.hotspot.interval_ms())
            .min()
    }

    /// Composes the visible part of the tile, or `None` once caching stopped.
    pub fn image(&self) -> Option<Bitmap> {
        if !self.caching {
            log::debug!("Not caching images anymore - returning");
            return None;
        }
        let mut image = Bitmap::new(self.size);
        for instance in self.instances.iter() {
            if !self.is_overlapping(instance) {
                continue;
            }
            let Some(cached) = instance.cached.as_ref() else {
                continue;
            };
            let pos = instance.xy - self.window_position;
            if instance.hotspot.invert() {
                image.paste(&cached.inverted(), pos, instance.hotspot.paste_mask());
            } else {
                image.paste(cached, pos, instance.hotspot.paste_mask());
            }
        }
        Some(image)
    }
}
