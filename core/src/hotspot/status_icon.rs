extern crate alloc;

use alloc::vec::Vec;

use embedded_graphics::{
    Drawable,
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::{Point, Primitive, Size},
    primitives::{Circle, Ellipse, Line, PrimitiveStyle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::config::STATUS_ICON_FRAME_MS;
use crate::framebuffer::{Bitmap, PasteMask};

use super::{Hotspot, Source, font_for_size};

const PROCESSING_STEPS: usize = 3;
const SCALE_NUM: i32 = 1;
const SCALE_DEN: i32 = 2;
const LINE_WIDTH: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Unknown,
    Enabled,
    Disabled,
    Processing,
}

fn disc(size: Size) -> Bitmap {
    let mut image = Bitmap::new(size);
    Ellipse::new(Point::zero(), size)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(&mut image)
        .ok();
    image
}

/// Side and top-left corner of the square the glyph is drawn in.
fn inner_square(size: Size) -> (Point, Size) {
    let w = size.width as i32 * SCALE_NUM / SCALE_DEN;
    let h = size.height as i32 * SCALE_NUM / SCALE_DEN;
    let top_left = Point::new(
        (size.width as i32 - w) / 2 - 1,
        (size.height as i32 - h) / 2 - 1,
    );
    (top_left, Size::new(w as u32, h as u32))
}

fn stroke(image: &mut Bitmap, from: Point, to: Point) {
    Line::new(from, to)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::Off, LINE_WIDTH))
        .draw(image)
        .ok();
}

fn unknown_image(size: Size) -> Bitmap {
    let mut image = disc(size);
    let font = font_for_size(size.height.saturating_sub(4));
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(
        "?",
        Point::new(size.width as i32 / 2, size.height as i32 / 2),
        MonoTextStyle::new(font, BinaryColor::Off),
        text_style,
    )
    .draw(&mut image)
    .ok();
    image
}

fn tick_image(size: Size) -> Bitmap {
    let mut image = disc(size);
    let (top_left, square) = inner_square(size);
    let center = Point::new(size.width as i32 / 2, size.height as i32 / 2);
    let right_x = top_left.x + square.width as i32 + 1;
    let left_y = top_left.y + square.height as i32 * 5 / 8;
    let joint = Point::new(
        center.x - square.width as i32 / 4,
        center.y + square.height as i32 / 2,
    );
    stroke(&mut image, joint, Point::new(right_x, top_left.y));
    stroke(&mut image, joint, Point::new(top_left.x, left_y));
    Circle::with_center(joint, LINE_WIDTH)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(&mut image)
        .ok();
    image
}

fn cross_image(size: Size) -> Bitmap {
    let mut image = disc(size);
    let (top_left, square) = inner_square(size);
    let bottom_right = Point::new(
        top_left.x + square.width as i32 + 1,
        top_left.y + square.height as i32 + 1,
    );
    stroke(&mut image, top_left, bottom_right);
    stroke(
        &mut image,
        Point::new(top_left.x, bottom_right.y),
        Point::new(bottom_right.x, top_left.y),
    );
    image
}

fn processing_image(size: Size, frame_number: usize) -> Bitmap {
    let mut image = disc(size);
    let dot = (size.width / 8).max(2);
    let center = Point::new(size.width as i32 / 2, size.height as i32 / 2);
    let dots = [
        Point::new(center.x / 2, center.y),
        center,
        Point::new(center.x * 3 / 2, center.y),
    ];
    for (index, xy) in dots.iter().enumerate() {
        if index > frame_number {
            break;
        }
        Circle::with_center(*xy, dot)
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut image)
            .ok();
    }
    image
}

/// Round icon showing whether a setting is on, off, unknown or changing.
pub struct StatusIconHotspot {
    size: Size,
    state: Source<ActionState>,
    last_state: ActionState,
    processing_frame_no: usize,
    unknown: Bitmap,
    enabled: Bitmap,
    disabled: Bitmap,
    processing: Vec<Bitmap>,
}

impl StatusIconHotspot {
    pub fn new(size: Size, state: Source<ActionState>) -> Self {
        Self {
            size,
            state,
            last_state: ActionState::Unknown,
            processing_frame_no: 0,
            unknown: unknown_image(size),
            enabled: tick_image(size),
            disabled: cross_image(size),
            processing: (0..PROCESSING_STEPS)
                .map(|frame| processing_image(size, frame))
                .collect(),
        }
    }

    pub fn processing_frame_no(&self) -> usize {
        self.processing_frame_no
    }
}

impl Hotspot for StatusIconHotspot {
    fn size(&self) -> Size {
        self.size
    }

    fn interval_ms(&self) -> u32 {
        STATUS_ICON_FRAME_MS
    }

    fn render(&mut self, image: &mut Bitmap) {
        let state = self.state.get();
        let icon = match state {
            ActionState::Unknown => &self.unknown,
            ActionState::Enabled => &self.enabled,
            ActionState::Disabled => &self.disabled,
            ActionState::Processing => {
                if self.last_state == ActionState::Processing {
                    self.processing_frame_no = (self.processing_frame_no + 1) % PROCESSING_STEPS;
                } else {
                    self.processing_frame_no = 0;
                }
                &self.processing[self.processing_frame_no]
            }
        };
        image.paste(icon, Point::zero(), PasteMask::Opaque);
        self.last_state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn hotspot(state: &Rc<Cell<ActionState>>) -> StatusIconHotspot {
        let reader = state.clone();
        StatusIconHotspot::new(Size::new(20, 20), Source::dynamic(move || reader.get()))
    }

    #[test]
    fn each_state_has_a_distinct_icon() {
        let state = Rc::new(Cell::new(ActionState::Unknown));
        let mut icon = hotspot(&state);
        let unknown = icon.image();
        state.set(ActionState::Enabled);
        let enabled = icon.image();
        state.set(ActionState::Disabled);
        let disabled = icon.image();
        assert_ne!(unknown, enabled);
        assert_ne!(enabled, disabled);
        assert_ne!(unknown, disabled);
    }

    #[test]
    fn processing_cycles_and_restarts() {
        let state = Rc::new(Cell::new(ActionState::Processing));
        let mut icon = hotspot(&state);
        let first = icon.image();
        assert_eq!(icon.processing_frame_no(), 0);
        icon.image();
        icon.image();
        assert_eq!(icon.processing_frame_no(), 2);
        assert_eq!(icon.image(), first);

        icon.image();
        state.set(ActionState::Enabled);
        icon.image();
        state.set(ActionState::Processing);
        icon.image();
        assert_eq!(icon.processing_frame_no(), 0);
    }
}
