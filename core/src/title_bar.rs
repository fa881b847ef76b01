extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use embedded_graphics::prelude::{Point, Size};

use crate::config::TITLE_BAR_HEIGHT;
use crate::hotspot::{Source, TextHotspot};
use crate::tile::Tile;

/// Lit strip across the top of the screen with the menu title in dark
/// text. The bottom row is left unlit as a separator.
pub struct TitleBar {
    height: u32,
    text: Source<String>,
}

impl TitleBar {
    pub fn new(text: impl Into<Source<String>>) -> Self {
        Self {
            height: TITLE_BAR_HEIGHT,
            text: text.into(),
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Builds the tile, or `None` for a zero-height bar.
    pub fn into_tile(self, width: u32) -> Option<Tile> {
        if self.height == 0 {
            return None;
        }
        let mut tile = Tile::new(Size::new(width, self.height));
        let text = TextHotspot::new(Size::new(width, self.height - 1), self.text)
            .font_size(10)
            .inverted(true);
        tile.add_hotspot(Box::new(text), Point::zero());
        Some(tile)
    }
}
