extern crate alloc;

use embedded_graphics::prelude::{Point, Size};

use crate::hotspot::{
    Anchor, ImageHotspot, Source, StatusIconHotspot, TextHotspot, VerticalAnchor,
};
use crate::icons::Icon;
use crate::page::{Page, PageAction, SharedActionHandler, vertical_middle};

const MARGIN: i32 = 4;
const STATUS_SIZE: u32 = 20;
const TEXT_HEIGHT: u32 = 14;

/// A setting with an on/off status icon. Select asks the handler for the
/// opposite of its current state.
pub fn page(
    name: &str,
    text: &str,
    icon: Option<Icon>,
    handler: SharedActionHandler,
    size: Size,
) -> Page {
    let mut page = Page::new(name, size);
    let mut text_x = MARGIN;
    if let Some(icon) = icon {
        let icon_size = icon.size();
        page = page.with_hotspot(
            Point::new(MARGIN, vertical_middle(size.height, icon_size.height)),
            ImageHotspot::still(icon_size, icon.bitmap()),
        );
        text_x += icon_size.width as i32 + MARGIN;
    }

    let status_x = size.width as i32 - STATUS_SIZE as i32 - MARGIN;
    let text_width = (status_x - MARGIN - text_x).max(0) as u32;
    let label = TextHotspot::new(Size::new(text_width, TEXT_HEIGHT), text)
        .font_size(10)
        .anchor(Anchor::Left, VerticalAnchor::Middle);

    let state_handler = handler.clone();
    let status = StatusIconHotspot::new(
        Size::new(STATUS_SIZE, STATUS_SIZE),
        Source::dynamic(move || state_handler.borrow().state()),
    );

    page.with_hotspot(
        Point::new(text_x, vertical_middle(size.height, TEXT_HEIGHT)),
        label,
    )
    .with_hotspot(
        Point::new(status_x, vertical_middle(size.height, STATUS_SIZE)),
        status,
    )
    .with_action(PageAction::Toggle(handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotspot::ActionState;
    use crate::page::ActionHandler;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    struct Switch(ActionState);

    impl ActionHandler for Switch {
        fn state(&self) -> ActionState {
            self.0
        }

        fn request(&mut self, enable: bool) {
            self.0 = if enable {
                ActionState::Enabled
            } else {
                ActionState::Disabled
            };
        }
    }

    #[test]
    fn layout_and_action() {
        let handler: SharedActionHandler = Rc::new(RefCell::new(Switch(ActionState::Disabled)));
        let page = page("ssh", "SSH", Some(Icon::Terminal), handler, Size::new(128, 45));
        let xs: alloc::vec::Vec<i32> = page.placements().iter().map(|p| p.xy.x).collect();
        assert_eq!(xs, [4, 32, 104]);
        assert!(matches!(page.action(), PageAction::Toggle(_)));
    }
}
