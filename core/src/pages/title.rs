use embedded_graphics::prelude::{Point, Size};

use crate::hotspot::{ImageHotspot, TextHotspot};
use crate::icons::Icon;
use crate::page::{Page, vertical_middle};

const TEXT_HEIGHT: u32 = 14;
const ICON_TOP: i32 = 2;

/// Main menu card: an icon above a centred title, or just the title.
pub fn page(name: &str, title: &str, icon: Option<Icon>, size: Size) -> Page {
    let text = TextHotspot::new(Size::new(size.width, TEXT_HEIGHT), title).font_size(10);
    let Some(icon) = icon else {
        return Page::new(name, size).with_hotspot(
            Point::new(0, vertical_middle(size.height, TEXT_HEIGHT)),
            text,
        );
    };

    let icon_size = icon.size();
    let icon_x = (size.width as i32 - icon_size.width as i32) / 2;
    let text_y = ICON_TOP + icon_size.height as i32 + 2;
    Page::new(name, size)
        .with_hotspot(
            Point::new(icon_x, ICON_TOP),
            ImageHotspot::still(icon_size, icon.bitmap()),
        )
        .with_hotspot(Point::new(0, text_y), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_sits_above_title() {
        let page = page("settings", "Settings", Some(Icon::Gear), Size::new(128, 45));
        let placements = page.placements();
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].xy, Point::new(52, 2));
        assert_eq!(placements[1].xy, Point::new(0, 28));
    }

    #[test]
    fn title_alone_is_centred() {
        let page = page("about", "About", None, Size::new(128, 45));
        assert_eq!(page.placements().len(), 1);
        assert_eq!(page.placements()[0].xy, Point::new(0, 15));
    }
}
