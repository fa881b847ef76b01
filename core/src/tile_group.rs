use embedded_graphics::prelude::{Point, Size};

use crate::config::{DEFAULT_FRAME_MS, SCROLL_FRAME_MS};
use crate::error::Error;
use crate::framebuffer::{Bitmap, PasteMask};
use crate::menu::{MenuConfig, MenuTile};
use crate::tile::Tile;

/// Everything on screen for one menu: the optional title bar above the
/// scrolling menu tile.
pub struct TileGroup {
    size: Size,
    title_bar: Option<Tile>,
    menu: MenuTile,
}

impl TileGroup {
    pub fn new(mut config: MenuConfig, size: Size) -> Result<Self, Error> {
        let window_size = config.page_size(size);
        let title_bar = config
            .title_bar
            .take()
            .and_then(|title_bar| title_bar.into_tile(size.width));
        let menu = MenuTile::new(config, window_size)?;
        Ok(Self {
            size,
            title_bar,
            menu,
        })
    }

    pub fn name(&self) -> &str {
        self.menu.name()
    }

    pub fn menu(&self) -> &MenuTile {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuTile {
        &mut self.menu
    }

    pub fn title_bar_height(&self) -> u32 {
        self.title_bar
            .as_ref()
            .map(|tile| tile.size().height)
            .unwrap_or(0)
    }

    pub fn start(&mut self) {
        if let Some(title_bar) = self.title_bar.as_mut() {
            title_bar.start();
        }
        self.menu.start();
    }

    pub fn stop(&mut self) {
        if let Some(title_bar) = self.title_bar.as_mut() {
            title_bar.stop();
        }
        self.menu.stop();
    }

    pub fn set_active(&mut self, active: bool) {
        if let Some(title_bar) = self.title_bar.as_mut() {
            title_bar.set_active(active);
        }
        self.menu.set_active(active);
    }

    /// Refreshes due hotspots. True when the screen needs redrawing.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = self.menu.needs_to_scroll();
        if let Some(title_bar) = self.title_bar.as_mut() {
            changed |= title_bar.tick(elapsed_ms);
        }
        changed |= self.menu.tick(elapsed_ms);
        changed
    }

    pub fn frame_interval_ms(&self) -> u32 {
        if self.menu.needs_to_scroll() {
            return SCROLL_FRAME_MS;
        }
        let title = self.title_bar.as_ref().and_then(Tile::min_interval_ms);
        [Some(DEFAULT_FRAME_MS), self.menu.min_interval_ms(), title]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(DEFAULT_FRAME_MS)
    }

    /// Advances the scroll animation one step and composes the screen.
    pub fn image(&mut self) -> Bitmap {
        self.menu.update_scroll_position();

        let mut image = Bitmap::new(self.size);
        let mut title_bar_height = 0;
        if let Some(title_bar) = self.title_bar.as_ref() {
            title_bar_height = title_bar.size().height as i32;
            if let Some(title_image) = title_bar.image() {
                image.paste(&title_image, Point::zero(), PasteMask::Opaque);
            }
        }
        // Offset menu tile image by height of title bar
        if let Some(menu_image) = self.menu.image() {
            image.paste(&menu_image, Point::new(0, title_bar_height), PasteMask::Opaque);
        }
        image
    }
}
