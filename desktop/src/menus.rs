//! The menu tree the desktop build shows.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use embedded_graphics::prelude::{Point, Size};
use miniscreen_core::{
    hotspot::{ImageFrame, ImageHotspot, RectangleHotspot, Source, TextHotspot},
    icons::{BUILD_TIME, Icon, VERSION},
    menu::{EdgeBehaviour, MenuConfig},
    page::{Page, PageAction, SharedActionHandler, vertical_middle},
    pages,
    title_bar::TitleBar,
};

use crate::assets;
use crate::status::StatusMonitor;
use crate::toggle::SimulatedService;

const SERVICE_DELAY: Duration = Duration::from_millis(1500);
const GAUGE_SIZE: Size = Size::new(100, 8);

fn settings_menu(
    ssh: SharedActionHandler,
    vnc: SharedActionHandler,
) -> impl Fn(Size) -> MenuConfig {
    move |screen| {
        let config = MenuConfig::new("settings")
            .with_title_bar(TitleBar::new("Settings"))
            .with_edges(EdgeBehaviour::Bounce, EdgeBehaviour::Bounce);
        let page_size = config.page_size(screen);
        config
            .with_page(pages::action::page(
                "ssh",
                "SSH",
                Some(Icon::Terminal),
                ssh.clone(),
                page_size,
            ))
            .with_page(pages::action::page(
                "vnc",
                "VNC",
                Some(Icon::Network),
                vnc.clone(),
                page_size,
            ))
    }
}

fn system_menu(status: StatusMonitor) -> impl Fn(Size) -> MenuConfig {
    move |screen| {
        let config = MenuConfig::new("system")
            .with_title_bar(TitleBar::new("System"))
            .with_edges(EdgeBehaviour::None, EdgeBehaviour::None);
        let page_size = config.page_size(screen);
        let uptime = status.clone();
        let load = status.clone();
        let rows = vec![
            Source::dynamic(move || uptime.snapshot().uptime_text()),
            Source::dynamic(move || load.snapshot().load_text()),
            Source::from(format!("Version {}", VERSION)),
            Source::from(format!("Built {}", BUILD_TIME)),
        ];
        config
            .with_page(pages::info::page("status", rows, page_size))
            .with_page(pages::title::page("about", "miniscreen", Some(Icon::Info), page_size))
    }
}

fn battery_page(status: StatusMonitor, size: Size) -> Page {
    let text = status.clone();
    let gauge_x = (size.width as i32 - GAUGE_SIZE.width as i32) / 2;
    Page::new("battery", size)
        .with_hotspot(
            Point::new(0, 4),
            TextHotspot::new(
                Size::new(size.width, 14),
                Source::dynamic(move || text.snapshot().battery_text()),
            ),
        )
        .with_hotspot(
            Point::new(gauge_x, vertical_middle(size.height, GAUGE_SIZE.height) + 8),
            RectangleHotspot::new(
                GAUGE_SIZE,
                Source::dynamic(move || {
                    let percent = status.snapshot().battery_percent.unwrap_or(100);
                    RectangleHotspot::level(GAUGE_SIZE, percent)
                }),
            ),
        )
}

fn animation_page(frames: Vec<ImageFrame>, size: Size) -> Page {
    Page::new("animation", size).with_hotspot(Point::zero(), ImageHotspot::new(size, frames))
}

/// Reads the optional animation from the assets directory.
pub fn load_animation(dir: &Path) -> Option<Vec<ImageFrame>> {
    let path = dir.join("animation.gif");
    match assets::load_frames(&path) {
        Ok(frames) => Some(frames),
        Err(err) => {
            log::warn!("No animation from {}: {}", path.display(), err);
            None
        }
    }
}

pub fn root_menu(
    screen: Size,
    status: StatusMonitor,
    animation: Option<Vec<ImageFrame>>,
) -> MenuConfig {
    let ssh: SharedActionHandler = Rc::new(RefCell::new(SimulatedService::new(
        "ssh",
        true,
        SERVICE_DELAY,
    )));
    let vnc: SharedActionHandler = Rc::new(RefCell::new(SimulatedService::new(
        "vnc",
        false,
        SERVICE_DELAY,
    )));

    let config = MenuConfig::new("main")
        .with_title_bar(TitleBar::new("M E N U"))
        .with_parent_goes_to_first_page(true);
    let page_size = config.page_size(screen);

    let mut config = config
        .with_page(
            pages::title::page("settings", "Settings", Some(Icon::Gear), page_size)
                .with_action(PageAction::EnterMenu(Rc::new(settings_menu(ssh, vnc)))),
        )
        .with_page(
            pages::title::page("system", "System", Some(Icon::Info), page_size)
                .with_action(PageAction::EnterMenu(Rc::new(system_menu(status.clone())))),
        )
        .with_page(battery_page(status, page_size));
    if let Some(frames) = animation {
        config = config.with_page(animation_page(frames, page_size));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniscreen_core::display::{HEIGHT, WIDTH};

    #[test]
    fn root_menu_layout() {
        let screen = Size::new(WIDTH, HEIGHT);
        let config = root_menu(screen, StatusMonitor::spawn(), None);
        let names: Vec<&str> = config.pages.iter().map(|page| page.name()).collect();
        assert_eq!(names, ["settings", "system", "battery"]);
        assert!(config.parent_goes_to_first_page);

        let PageAction::EnterMenu(factory) = config.pages[0].action().clone() else {
            panic!("settings page should open a menu");
        };
        let settings = factory(screen);
        assert_eq!(settings.pages.len(), 2);
        assert_eq!(settings.title_bar_height(), 19);
    }

    #[test]
    fn animation_adds_a_page() {
        let screen = Size::new(WIDTH, HEIGHT);
        let bitmap = miniscreen_core::framebuffer::Bitmap::new(Size::new(8, 8));
        let frames = vec![ImageFrame::still(bitmap)];
        let config = root_menu(screen, StatusMonitor::spawn(), Some(frames));
        assert_eq!(config.pages.len(), 4);
    }
}
