extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use embedded_graphics::prelude::{Point, Size};

use crate::hotspot::{ActionState, Hotspot};
use crate::menu::MenuConfig;

/// A setting a page can switch on and off.
pub trait ActionHandler {
    fn state(&self) -> ActionState;

    /// Asks for the setting to change. The state may report
    /// `ActionState::Processing` until the change lands.
    fn request(&mut self, enable: bool);
}

pub type SharedActionHandler = Rc<RefCell<dyn ActionHandler>>;

/// Builds a child menu for a screen of the given size.
pub type MenuFactory = Rc<dyn Fn(Size) -> MenuConfig>;

#[derive(Clone, Default)]
pub enum PageAction {
    #[default]
    None,
    /// Select opens the menu the factory builds.
    EnterMenu(MenuFactory),
    /// Select flips the handler's setting.
    Toggle(SharedActionHandler),
}

impl core::fmt::Debug for PageAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PageAction::None => write!(f, "None"),
            PageAction::EnterMenu(_) => write!(f, "EnterMenu"),
            PageAction::Toggle(_) => write!(f, "Toggle"),
        }
    }
}

pub struct Placement {
    pub xy: Point,
    pub hotspot: Box<dyn Hotspot>,
}

/// One screenful of a menu: hotspots positioned relative to the page's top
/// left corner, and what Select does on it.
pub struct Page {
    name: String,
    size: Size,
    placements: Vec<Placement>,
    action: PageAction,
}

impl Page {
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
            placements: Vec::new(),
            action: PageAction::None,
        }
    }

    pub fn with_hotspot(mut self, xy: Point, hotspot: impl Hotspot + 'static) -> Self {
        self.placements.push(Placement {
            xy,
            hotspot: Box::new(hotspot),
        });
        self
    }

    pub fn with_action(mut self, action: PageAction) -> Self {
        self.action = action;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn action(&self) -> &PageAction {
        &self.action
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Hands the hotspots over to whoever composes them, keeping the rest.
    pub(crate) fn take_placements(&mut self) -> Vec<Placement> {
        core::mem::take(&mut self.placements)
    }
}

/// Vertical offset that centres something `height` tall on a page.
pub fn vertical_middle(page_height: u32, height: u32) -> i32 {
    (page_height as i32 - height as i32) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotspot::TextHotspot;

    #[test]
    fn builder_collects_hotspots() {
        let page = Page::new("SSH", Size::new(128, 45))
            .with_hotspot(Point::new(4, 4), TextHotspot::new(Size::new(40, 10), "SSH"))
            .with_hotspot(Point::new(4, 20), TextHotspot::new(Size::new(40, 10), "on"));
        assert_eq!(page.name(), "SSH");
        assert_eq!(page.placements().len(), 2);
        assert!(matches!(page.action(), PageAction::None));
    }

    #[test]
    fn middle_offset() {
        assert_eq!(vertical_middle(45, 24), 10);
        assert_eq!(vertical_middle(10, 20), -5);
    }
}
