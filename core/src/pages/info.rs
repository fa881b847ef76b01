extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::prelude::{Point, Size};

use crate::hotspot::{MarqueeTextHotspot, Source};
use crate::page::Page;

pub const MAX_ROWS: usize = 4;
const FONT_SIZE: u32 = 10;

/// Rows of text, each scrolling sideways when too long to fit.
pub fn page(name: &str, rows: Vec<Source<String>>, size: Size) -> Page {
    if rows.len() > MAX_ROWS {
        log::warn!(
            "Info page {} has {} rows, showing the first {}",
            name,
            rows.len(),
            MAX_ROWS
        );
    }
    let row_height = size.height / MAX_ROWS as u32;
    let mut page = Page::new(name, size);
    for (i, row) in rows.into_iter().take(MAX_ROWS).enumerate() {
        page = page.with_hotspot(
            Point::new(0, (i as u32 * row_height) as i32),
            MarqueeTextHotspot::new(Size::new(size.width, row_height), row).font_size(FONT_SIZE),
        );
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn rows_are_stacked_and_capped() {
        let rows = vec![
            Source::from("Uptime 3d"),
            Source::from("Load 0.1"),
            Source::from("Mem 40%"),
            Source::from("Disk 10%"),
            Source::from("dropped"),
        ];
        let page = page("info", rows, Size::new(128, 45));
        let ys: Vec<i32> = page.placements().iter().map(|p| p.xy.y).collect();
        assert_eq!(ys, [0, 11, 22, 33]);
    }
}
