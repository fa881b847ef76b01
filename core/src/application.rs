//! Button-driven navigation over a stack of menus.
//!
//! The root menu stays at the bottom of the stack. Selecting a page with a
//! child menu pushes it, Cancel pops back to the parent. Presses are queued
//! and handled one per frame so a scroll started by one press is not
//! interrupted by the next.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use embedded_graphics::prelude::Size;

use crate::config::{DEFAULT_FRAME_MS, SLEEP_TIMEOUT_MS};
use crate::display::{CONTRAST_ASLEEP, CONTRAST_AWAKE, Display, HEIGHT, WIDTH};
use crate::error::Error;
use crate::framebuffer::FrameBuffers;
use crate::hotspot::ActionState;
use crate::input::{ButtonPress, ButtonState, Buttons};
use crate::menu::MenuConfig;
use crate::page::PageAction;
use crate::tile_group::TileGroup;

pub struct Application {
    size: Size,
    root: TileGroup,
    children: Vec<TileGroup>,
    queue: VecDeque<ButtonPress>,
    buffers: FrameBuffers,
    sleeping: bool,
    idle_ms: u32,
    display_claimed: bool,
    buttons_locked: bool,
    force_redraw: bool,
    dirty: bool,
    pending_contrast: Option<u8>,
}

impl Application {
    pub fn new(root: MenuConfig) -> Result<Self, Error> {
        Self::with_size(root, Size::new(WIDTH, HEIGHT))
    }

    pub fn with_size(root: MenuConfig, size: Size) -> Result<Self, Error> {
        let mut root = TileGroup::new(root, size)?;
        root.start();
        root.set_active(true);
        log::info!("Starting in menu {}", root.name());
        Ok(Self {
            size,
            root,
            children: Vec::new(),
            queue: VecDeque::new(),
            buffers: FrameBuffers::new(size),
            sleeping: false,
            idle_ms: 0,
            display_claimed: false,
            buttons_locked: false,
            force_redraw: true,
            dirty: true,
            pending_contrast: Some(CONTRAST_AWAKE),
        })
    }

    pub fn top(&self) -> &TileGroup {
        self.children.last().unwrap_or(&self.root)
    }

    fn top_mut(&mut self) -> &mut TileGroup {
        self.children.last_mut().unwrap_or(&mut self.root)
    }

    pub fn current_menu_name(&self) -> &str {
        self.top().name()
    }

    pub fn page_index(&self) -> usize {
        self.top().menu().page_index()
    }

    /// Number of menus open above the root.
    pub fn depth(&self) -> usize {
        self.children.len()
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn is_display_claimed(&self) -> bool {
        self.display_claimed
    }

    pub fn queued_presses(&self) -> usize {
        self.queue.len()
    }

    pub fn queue_press(&mut self, button: Buttons) {
        if self.display_claimed {
            log::debug!("Display claimed elsewhere, dropping {:?}", button);
            return;
        }
        if self.buttons_locked {
            log::debug!("Buttons locked, dropping {:?}", button);
            return;
        }
        self.queue.push_back(ButtonPress::new(button));
    }

    /// Another process owns the buttons while a lock is held.
    pub fn set_buttons_locked(&mut self, locked: bool) {
        if locked == self.buttons_locked {
            return;
        }
        self.buttons_locked = locked;
        if locked {
            self.queue.clear();
        }
        log::info!("Buttons {}", if locked { "locked" } else { "released" });
    }

    /// Another process draws on the panel while it is claimed. The menu
    /// repaints in full once the panel comes back.
    pub fn set_display_claimed(&mut self, claimed: bool) {
        if claimed == self.display_claimed {
            return;
        }
        self.display_claimed = claimed;
        if claimed {
            self.queue.clear();
            self.top_mut().set_active(false);
            log::info!("Display claimed by another process");
        } else {
            self.top_mut().set_active(true);
            self.force_redraw = true;
            self.pending_contrast = Some(if self.sleeping {
                CONTRAST_ASLEEP
            } else {
                CONTRAST_AWAKE
            });
            log::info!("Display returned to menu {}", self.current_menu_name());
        }
    }

    /// Queues new presses, handles at most one of them and refreshes the
    /// visible hotspots.
    pub fn update(&mut self, buttons: &ButtonState, elapsed_ms: u32) {
        for button in Buttons::ALL {
            if buttons.is_pressed(button) {
                self.queue_press(button);
            }
        }
        if self.display_claimed {
            return;
        }

        if let Some(press) = self.queue.pop_front() {
            self.handle_press(press);
        } else if !self.sleeping {
            self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
            if self.idle_ms >= SLEEP_TIMEOUT_MS {
                self.sleep();
            }
        }

        if !self.sleeping {
            self.dirty |= self.top_mut().tick(elapsed_ms);
        }
    }

    fn handle_press(&mut self, press: ButtonPress) {
        self.idle_ms = 0;
        if self.sleeping {
            self.wake();
            return;
        }
        log::debug!("Handling {:?} in {}", press.button, self.current_menu_name());
        match press.button {
            Buttons::Up => self.top_mut().menu_mut().set_page_to_previous(),
            Buttons::Down => self.top_mut().menu_mut().set_page_to_next(),
            Buttons::Select => self.select(),
            Buttons::Cancel => self.cancel(),
        }
    }

    fn select(&mut self) {
        if self.top().menu().needs_to_scroll() {
            return;
        }
        let action = self.top().menu().current_page().action().clone();
        match action {
            PageAction::None => {}
            PageAction::EnterMenu(factory) => {
                let config = factory(self.size);
                if let Err(err) = self.push_menu(config) {
                    log::error!("Cannot open menu: {}", err);
                }
            }
            PageAction::Toggle(handler) => {
                let state = handler.borrow().state();
                match state {
                    ActionState::Processing => {
                        log::debug!("Action still processing, ignoring select");
                    }
                    ActionState::Enabled => handler.borrow_mut().request(false),
                    ActionState::Disabled | ActionState::Unknown => {
                        handler.borrow_mut().request(true)
                    }
                }
            }
        }
    }

    fn cancel(&mut self) {
        match self.pop_menu() {
            Ok(()) => {}
            Err(Error::NoParentMenu) => {
                if self.root.menu().parent_goes_to_first_page() {
                    self.root.menu_mut().go_to_first_page();
                }
            }
            Err(err) => log::error!("Cannot leave menu: {}", err),
        }
    }

    pub fn push_menu(&mut self, config: MenuConfig) -> Result<(), Error> {
        let mut group = TileGroup::new(config, self.size)?;
        self.top_mut().set_active(false);
        group.start();
        group.set_active(true);
        log::info!("Entering menu {}", group.name());
        self.children.push(group);
        self.dirty = true;
        Ok(())
    }

    pub fn pop_menu(&mut self) -> Result<(), Error> {
        let mut child = self.children.pop().ok_or(Error::NoParentMenu)?;
        child.stop();
        self.top_mut().set_active(true);
        self.dirty = true;
        log::info!(
            "Leaving menu {} for {}",
            child.name(),
            self.current_menu_name()
        );
        Ok(())
    }

    fn sleep(&mut self) {
        self.sleeping = true;
        self.top_mut().set_active(false);
        self.pending_contrast = Some(CONTRAST_ASLEEP);
        log::info!("Idle for {} ms, sleeping", self.idle_ms);
    }

    fn wake(&mut self) {
        self.sleeping = false;
        self.top_mut().set_active(true);
        self.pending_contrast = Some(CONTRAST_AWAKE);
        self.force_redraw = true;
        log::info!("Waking up");
    }

    /// Composes the current menu when something on it changed and pushes
    /// it if it differs from the last frame. Returns whether a frame was
    /// sent.
    pub fn draw(&mut self, display: &mut impl Display) -> bool {
        if self.display_claimed {
            return false;
        }
        if let Some(level) = self.pending_contrast.take() {
            display.set_contrast(level);
        }
        if self.sleeping {
            return false;
        }

        if !self.force_redraw && !self.dirty {
            return false;
        }
        self.dirty = false;

        let image = self.top_mut().image();
        *self.buffers.back_mut() = image;
        if !self.force_redraw && !self.buffers.differs() {
            return false;
        }
        display.show(self.buffers.back());
        self.buffers.swap();
        self.force_redraw = false;
        true
    }

    /// How long to wait before the next frame.
    pub fn frame_interval_ms(&self) -> u32 {
        if self.sleeping || self.display_claimed {
            return DEFAULT_FRAME_MS;
        }
        self.top().frame_interval_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Bitmap;
    use crate::page::Page;
    use crate::tile::tests::Block;
    use alloc::rc::Rc;
    use embedded_graphics::prelude::Point;

    const SCREEN: Size = Size::new(16, 8);

    #[derive(Default)]
    struct Panel {
        frames: usize,
        contrast: Vec<u8>,
    }

    impl Display for Panel {
        fn show(&mut self, _frame: &Bitmap) {
            self.frames += 1;
        }

        fn set_contrast(&mut self, level: u8) {
            self.contrast.push(level);
        }
    }

    fn pages(name: &str, count: usize) -> MenuConfig {
        let mut config = MenuConfig::new(name);
        for _ in 0..count {
            let (block, _) = Block::new(Size::new(2, 2), 1_000);
            config = config.with_page(Page::new("p", SCREEN).with_hotspot(Point::zero(), block));
        }
        config
    }

    fn app() -> Application {
        let child: crate::page::MenuFactory = Rc::new(|_: Size| pages("child", 2));
        let mut root = pages("root", 2).with_parent_goes_to_first_page(true);
        root.pages[0] = Page::new("enter", SCREEN).with_action(PageAction::EnterMenu(child));
        Application::with_size(root, SCREEN).unwrap()
    }

    fn press(app: &mut Application, button: Buttons) {
        app.queue_press(button);
        app.update(&ButtonState::new(), 0);
    }

    #[test]
    fn select_and_cancel_walk_the_stack() {
        let mut app = app();
        press(&mut app, Buttons::Select);
        assert_eq!(app.current_menu_name(), "child");
        assert_eq!(app.depth(), 1);
        press(&mut app, Buttons::Cancel);
        assert_eq!(app.current_menu_name(), "root");
        assert_eq!(app.depth(), 0);
    }

    #[test]
    fn cancel_at_root_returns_to_first_page() {
        let mut app = app();
        press(&mut app, Buttons::Down);
        assert_eq!(app.page_index(), 1);
        press(&mut app, Buttons::Cancel);
        assert_eq!(app.page_index(), 0);
        assert_eq!(app.pop_menu(), Err(Error::NoParentMenu));
    }

    #[test]
    fn one_press_per_frame() {
        let mut app = app();
        app.queue_press(Buttons::Down);
        app.queue_press(Buttons::Down);
        app.update(&ButtonState::new(), 0);
        assert_eq!(app.queued_presses(), 1);
        assert_eq!(app.page_index(), 1);
    }

    #[test]
    fn sleeps_after_timeout_and_first_press_only_wakes() {
        let mut app = app();
        let mut panel = Panel::default();
        assert!(app.draw(&mut panel));
        app.update(&ButtonState::new(), SLEEP_TIMEOUT_MS);
        assert!(app.is_sleeping());
        assert!(!app.draw(&mut panel));
        assert_eq!(panel.contrast, [CONTRAST_AWAKE, CONTRAST_ASLEEP]);

        press(&mut app, Buttons::Down);
        assert!(!app.is_sleeping());
        assert_eq!(app.page_index(), 0);
        assert!(app.draw(&mut panel));
        assert_eq!(panel.contrast.last(), Some(&CONTRAST_AWAKE));
    }

    #[test]
    fn select_during_scroll_is_consumed() {
        let mut app = app();
        let mut panel = Panel::default();
        press(&mut app, Buttons::Down);
        while app.top().menu().needs_to_scroll() {
            app.draw(&mut panel);
            app.update(&ButtonState::new(), 0);
        }

        press(&mut app, Buttons::Down);
        assert_eq!(app.page_index(), 0);
        assert!(app.top().menu().needs_to_scroll());
        press(&mut app, Buttons::Select);
        assert_eq!(app.depth(), 0);
        assert_eq!(app.queued_presses(), 0);
    }

    #[test]
    fn every_scroll_step_is_drawn_then_drawing_stops() {
        let mut app = app();
        let mut panel = Panel::default();
        assert!(app.draw(&mut panel));
        press(&mut app, Buttons::Down);
        let mut steps = 0;
        while app.top().menu().needs_to_scroll() {
            assert!(app.draw(&mut panel));
            app.update(&ButtonState::new(), 0);
            steps += 1;
        }
        // Window height 8 in 2px steps.
        assert_eq!(steps, 4);
        assert_eq!(panel.frames, 5);
        assert!(!app.draw(&mut panel));
    }

    #[test]
    fn entering_and_leaving_menus_redraw() {
        let mut app = app();
        let mut panel = Panel::default();
        app.draw(&mut panel);
        press(&mut app, Buttons::Select);
        assert!(app.draw(&mut panel));
        press(&mut app, Buttons::Cancel);
        assert!(app.draw(&mut panel));
        assert_eq!(panel.frames, 3);
    }

    #[test]
    fn unchanged_frames_are_not_resent() {
        let mut app = app();
        let mut panel = Panel::default();
        assert!(app.draw(&mut panel));
        assert!(!app.draw(&mut panel));
        assert_eq!(panel.frames, 1);
    }

    #[test]
    fn claimed_display_drops_presses_and_redraws_on_release() {
        let mut app = app();
        let mut panel = Panel::default();
        app.draw(&mut panel);
        app.set_display_claimed(true);
        press(&mut app, Buttons::Down);
        assert_eq!(app.queued_presses(), 0);
        assert!(!app.draw(&mut panel));

        app.set_display_claimed(false);
        assert!(app.draw(&mut panel));
        assert_eq!(app.page_index(), 0);
        assert_eq!(panel.frames, 2);
    }

    #[test]
    fn locked_buttons_drop_presses() {
        let mut app = app();
        app.set_buttons_locked(true);
        app.queue_press(Buttons::Down);
        assert_eq!(app.queued_presses(), 0);
        app.set_buttons_locked(false);
        app.queue_press(Buttons::Down);
        assert_eq!(app.queued_presses(), 1);
    }
}
