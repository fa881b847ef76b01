extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::prelude::{Point, Size};

use crate::config::SCROLL_PX_RESOLUTION;
use crate::error::Error;
use crate::framebuffer::Bitmap;
use crate::page::Page;
use crate::title_bar::TitleBar;
use crate::viewport::Viewport;

/// What happens when moving past the first or last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeBehaviour {
    /// Stay on the edge page.
    None,
    /// Turn around and go the other way.
    Bounce,
    /// Wrap to the page at the opposite end.
    Loop,
}

pub struct MenuConfig {
    pub name: String,
    pub pages: Vec<Page>,
    pub top_edge: EdgeBehaviour,
    pub bottom_edge: EdgeBehaviour,
    pub title_bar: Option<TitleBar>,
    /// Cancel on a menu without a parent scrolls back to its first page.
    pub parent_goes_to_first_page: bool,
}

impl MenuConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
            top_edge: EdgeBehaviour::Loop,
            bottom_edge: EdgeBehaviour::Loop,
            title_bar: None,
            parent_goes_to_first_page: false,
        }
    }

    pub fn with_title_bar(mut self, title_bar: TitleBar) -> Self {
        self.title_bar = Some(title_bar);
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_edges(mut self, top_edge: EdgeBehaviour, bottom_edge: EdgeBehaviour) -> Self {
        self.top_edge = top_edge;
        self.bottom_edge = bottom_edge;
        self
    }

    pub fn with_parent_goes_to_first_page(mut self, enabled: bool) -> Self {
        self.parent_goes_to_first_page = enabled;
        self
    }

    pub fn title_bar_height(&self) -> u32 {
        self.title_bar.as_ref().map(TitleBar::height).unwrap_or(0)
    }

    /// Size each page gets on a screen of `screen` size.
    pub fn page_size(&self, screen: Size) -> Size {
        Size::new(
            screen.width,
            screen.height.saturating_sub(self.title_bar_height()),
        )
    }
}

/// Pages stacked on top of each other in a viewport one window tall.
/// Changing page scrolls the window to the page's slot.
pub struct MenuTile {
    name: String,
    viewport: Viewport,
    pages: Vec<Page>,
    page_index: usize,
    top_edge: EdgeBehaviour,
    bottom_edge: EdgeBehaviour,
    parent_goes_to_first_page: bool,
}

impl MenuTile {
    pub fn new(config: MenuConfig, window_size: Size) -> Result<Self, Error> {
        let MenuConfig {
            name,
            mut pages,
            top_edge,
            bottom_edge,
            parent_goes_to_first_page,
            ..
        } = config;
        if pages.is_empty() {
            return Err(Error::EmptyMenu);
        }

        let window_height = window_size.height;
        let display_size = Size::new(window_size.width, window_height * pages.len() as u32);
        let mut viewport = Viewport::new(window_size, display_size);

        for (i, page) in pages.iter_mut().enumerate() {
            for placement in page.take_placements() {
                // Page coordinates to canvas coordinates.
                let pos = Point::new(
                    placement.xy.x,
                    placement.xy.y + (i as u32 * window_height) as i32,
                );
                viewport.add_hotspot(placement.hotspot, pos);
            }
        }

        log::debug!("Menu {} built with {} pages", name, pages.len());

        Ok(Self {
            name,
            viewport,
            pages,
            page_index: 0,
            top_edge,
            bottom_edge,
            parent_goes_to_first_page,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.page_index]
    }

    pub fn parent_goes_to_first_page(&self) -> bool {
        self.parent_goes_to_first_page
    }

    pub fn y_pos(&self) -> i32 {
        self.viewport.position().y
    }

    fn set_y_pos(&mut self, y: i32) {
        self.viewport.set_position(Point::new(0, y));
    }

    fn target_y_pos(&self) -> i32 {
        (self.page_index as u32 * self.viewport.window_height()) as i32
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn previous_page_index(&self) -> usize {
        if self.page_index > 0 {
            return self.page_index - 1;
        }
        let last = self.pages.len() - 1;
        match self.top_edge {
            EdgeBehaviour::None => self.page_index,
            EdgeBehaviour::Bounce => last.min(1),
            EdgeBehaviour::Loop => last,
        }
    }

    pub fn next_page_index(&self) -> usize {
        let last = self.pages.len() - 1;
        if self.page_index < last {
            return self.page_index + 1;
        }
        match self.bottom_edge {
            EdgeBehaviour::None => self.page_index,
            EdgeBehaviour::Bounce => self.page_index.saturating_sub(1),
            EdgeBehaviour::Loop => 0,
        }
    }

    pub fn set_page_to_previous(&mut self) {
        if self.needs_to_scroll() {
            return;
        }
        let previous_index = self.page_index;
        self.page_index = self.previous_page_index();
        log::debug!("Page index: {} -> {}", previous_index, self.page_index);
    }

    pub fn set_page_to_next(&mut self) {
        if self.needs_to_scroll() {
            return;
        }
        let previous_index = self.page_index;
        self.page_index = self.next_page_index();
        log::debug!("Page index: {} -> {}", previous_index, self.page_index);
    }

    /// Jumps straight to a page without animating.
    pub fn move_to_page(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.pages.len() {
            return Err(Error::PageOutOfRange {
                index,
                len: self.pages.len(),
            });
        }
        self.page_index = index;
        self.set_y_pos(self.target_y_pos());
        Ok(())
    }

    /// Scrolls back to the first page.
    pub fn go_to_first_page(&mut self) {
        self.page_index = 0;
    }

    pub fn needs_to_scroll(&self) -> bool {
        self.y_pos() != self.target_y_pos()
    }

    /// Moves one scroll step toward the current page, never past it.
    pub fn update_scroll_position(&mut self) {
        if !self.needs_to_scroll() {
            return;
        }
        let target = self.target_y_pos();
        let y = self.y_pos();
        let next = if target > y {
            (y + SCROLL_PX_RESOLUTION).min(target)
        } else {
            (y - SCROLL_PX_RESOLUTION).max(target)
        };
        self.set_y_pos(next);
    }

    pub fn set_active(&mut self, active: bool) {
        self.viewport.tile_mut().set_active(active);
    }

    pub fn start(&mut self) {
        self.viewport.tile_mut().start();
    }

    pub fn stop(&mut self) {
        self.viewport.tile_mut().stop();
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.viewport.tick(elapsed_ms)
    }

    pub fn min_interval_ms(&self) -> Option<u32> {
        self.viewport.tile().min_interval_ms()
    }

    pub fn image(&self) -> Option<Bitmap> {
        self.viewport.image()
    }
}
