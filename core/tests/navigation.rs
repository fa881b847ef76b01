use std::cell::RefCell;
use std::rc::Rc;

use embedded_graphics::prelude::Size;
use miniscreen_core::application::Application;
use miniscreen_core::config::SLEEP_TIMEOUT_MS;
use miniscreen_core::display::{CONTRAST_ASLEEP, CONTRAST_AWAKE, Display, HEIGHT, WIDTH};
use miniscreen_core::framebuffer::Bitmap;
use miniscreen_core::hotspot::ActionState;
use miniscreen_core::icons::Icon;
use miniscreen_core::input::{ButtonState, Buttons};
use miniscreen_core::menu::{EdgeBehaviour, MenuConfig};
use miniscreen_core::page::{ActionHandler, PageAction, SharedActionHandler};
use miniscreen_core::pages;
use miniscreen_core::title_bar::TitleBar;

#[derive(Default)]
struct RecordingDisplay {
    frames: Vec<Bitmap>,
    contrast: Vec<u8>,
}

impl Display for RecordingDisplay {
    fn show(&mut self, frame: &Bitmap) {
        self.frames.push(frame.clone());
    }

    fn set_contrast(&mut self, level: u8) {
        self.contrast.push(level);
    }
}

struct Service {
    state: ActionState,
    requests: Vec<bool>,
}

impl ActionHandler for Service {
    fn state(&self) -> ActionState {
        self.state
    }

    fn request(&mut self, enable: bool) {
        self.requests.push(enable);
        self.state = ActionState::Processing;
    }
}

fn settings_menu(handler: SharedActionHandler) -> impl Fn(Size) -> MenuConfig {
    move |screen| {
        let config = MenuConfig::new("settings")
            .with_title_bar(TitleBar::new("Settings"))
            .with_edges(EdgeBehaviour::None, EdgeBehaviour::None);
        let page_size = config.page_size(screen);
        config
            .with_page(pages::action::page(
                "ssh",
                "SSH",
                Some(Icon::Terminal),
                handler.clone(),
                page_size,
            ))
            .with_page(pages::info::page(
                "about",
                vec!["Version".into(), "Build".into()],
                page_size,
            ))
    }
}

fn root_menu(handler: SharedActionHandler) -> MenuConfig {
    let config = MenuConfig::new("main")
        .with_title_bar(TitleBar::new("M E N U"))
        .with_parent_goes_to_first_page(true);
    let page_size = config.page_size(Size::new(WIDTH, HEIGHT));
    config
        .with_page(
            pages::title::page("settings", "Settings", Some(Icon::Gear), page_size)
                .with_action(PageAction::EnterMenu(Rc::new(settings_menu(handler)))),
        )
        .with_page(pages::title::page("network", "Network", Some(Icon::Network), page_size))
        .with_page(pages::title::page("power", "Power", Some(Icon::Battery), page_size))
}

struct Harness {
    app: Application,
    display: RecordingDisplay,
    buttons: ButtonState,
    service: Rc<RefCell<Service>>,
}

impl Harness {
    fn new() -> Self {
        let service = Rc::new(RefCell::new(Service {
            state: ActionState::Disabled,
            requests: Vec::new(),
        }));
        let handler: SharedActionHandler = service.clone();
        let app = Application::new(root_menu(handler)).unwrap();
        Self {
            app,
            display: RecordingDisplay::default(),
            buttons: ButtonState::new(),
            service,
        }
    }

    fn frame(&mut self, elapsed_ms: u32) {
        self.app.update(&self.buttons, elapsed_ms);
        self.app.draw(&mut self.display);
    }

    fn press(&mut self, button: Buttons) {
        self.buttons.update(button.mask());
        self.frame(10);
        self.buttons.update(0);
        self.frame(10);
    }

    /// Runs frames until the menu stops scrolling.
    fn settle(&mut self) {
        for _ in 0..200 {
            if !self.app.top().menu().needs_to_scroll() {
                return;
            }
            self.frame(10);
        }
        panic!("menu never settled");
    }
}

#[test]
fn first_frame_is_drawn_at_full_contrast() {
    let mut harness = Harness::new();
    harness.frame(0);
    assert_eq!(harness.display.frames.len(), 1);
    assert_eq!(harness.display.contrast, [CONTRAST_AWAKE]);
    assert_eq!(harness.display.frames[0].width(), WIDTH);
    assert!(harness.display.frames[0].count_lit() > 0);
}

#[test]
fn down_scrolls_to_next_page_and_up_loops_round() {
    let mut harness = Harness::new();
    harness.frame(0);
    harness.press(Buttons::Down);
    assert_eq!(harness.app.page_index(), 1);
    assert!(harness.app.top().menu().needs_to_scroll());
    harness.settle();
    assert_eq!(harness.app.top().menu().y_pos(), 45);

    harness.press(Buttons::Up);
    harness.settle();
    harness.press(Buttons::Up);
    assert_eq!(harness.app.page_index(), 2);
    harness.settle();
    assert_eq!(harness.app.top().menu().y_pos(), 90);
}

#[test]
fn select_enters_child_menu_and_cancel_leaves_it() {
    let mut harness = Harness::new();
    harness.frame(0);
    harness.press(Buttons::Select);
    assert_eq!(harness.app.current_menu_name(), "settings");
    assert_eq!(harness.app.depth(), 1);

    harness.press(Buttons::Cancel);
    assert_eq!(harness.app.current_menu_name(), "main");
    assert_eq!(harness.app.depth(), 0);
}

#[test]
fn select_on_action_page_toggles_the_service() {
    let mut harness = Harness::new();
    harness.frame(0);
    harness.press(Buttons::Select);
    harness.press(Buttons::Select);
    assert_eq!(harness.service.borrow().requests, [true]);

    // A second select while processing is ignored.
    harness.press(Buttons::Select);
    assert_eq!(harness.service.borrow().requests, [true]);

    harness.service.borrow_mut().state = ActionState::Enabled;
    harness.press(Buttons::Select);
    assert_eq!(harness.service.borrow().requests, [true, false]);
}

#[test]
fn cancel_on_root_returns_to_first_page() {
    let mut harness = Harness::new();
    harness.frame(0);
    harness.press(Buttons::Down);
    harness.settle();
    harness.press(Buttons::Cancel);
    assert_eq!(harness.app.page_index(), 0);
    harness.settle();
    assert_eq!(harness.app.top().menu().y_pos(), 0);
}

#[test]
fn sleep_blanks_and_first_press_wakes() {
    let mut harness = Harness::new();
    harness.frame(0);
    harness.frame(SLEEP_TIMEOUT_MS);
    assert!(harness.app.is_sleeping());
    assert_eq!(harness.display.contrast.last(), Some(&CONTRAST_ASLEEP));

    harness.press(Buttons::Down);
    assert!(!harness.app.is_sleeping());
    assert_eq!(harness.app.page_index(), 0);
    assert_eq!(harness.display.contrast.last(), Some(&CONTRAST_AWAKE));
}

#[test]
fn claimed_display_is_left_alone() {
    let mut harness = Harness::new();
    harness.frame(0);
    harness.app.set_display_claimed(true);
    harness.press(Buttons::Down);
    assert_eq!(harness.app.page_index(), 0);
    let frames = harness.display.frames.len();
    harness.frame(100);
    assert_eq!(harness.display.frames.len(), frames);

    harness.app.set_display_claimed(false);
    harness.frame(0);
    assert_eq!(harness.display.frames.len(), frames + 1);
}
