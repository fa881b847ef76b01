use miniscreen_core::{
    display::{CONTRAST_AWAKE, Display, HEIGHT, WIDTH},
    framebuffer::Bitmap,
    input::{ButtonState, Buttons},
};

use embedded_graphics::pixelcolor::BinaryColor;

const PIXELS: usize = (WIDTH * HEIGHT) as usize;
const BACKGROUND: u32 = 0xFF000000;
/// Lit pixels stay faintly visible at zero contrast, like the panel.
const DIMMEST: u32 = 0x18;

pub struct MinifbDisplay {
    window: minifb::Window,
    display_buffer: Vec<u32>,
    last_frame: Option<Bitmap>,
    contrast: u8,
    buttons: ButtonState,
}

/// Grey level of a lit pixel at the given contrast.
fn lit_color(contrast: u8) -> u32 {
    let level = DIMMEST + (0xFF - DIMMEST) * u32::from(contrast) / 0xFF;
    BACKGROUND | (level << 16) | (level << 8) | level
}

/// Expands a frame into window pixels.
pub fn blit(frame: &Bitmap, contrast: u8, buffer: &mut [u32]) {
    let lit = lit_color(contrast);
    let width = frame.width() as usize;
    for (i, pixel) in buffer.iter_mut().enumerate() {
        let x = (i % width) as i32;
        let y = (i / width) as i32;
        *pixel = if frame.pixel(x, y) == BinaryColor::On {
            lit
        } else {
            BACKGROUND
        };
    }
}

impl MinifbDisplay {
    pub fn new(window: minifb::Window) -> Self {
        Self {
            window,
            display_buffer: vec![BACKGROUND; PIXELS],
            last_frame: None,
            contrast: CONTRAST_AWAKE,
            buttons: ButtonState::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(minifb::Key::Escape)
    }

    fn update_display(&mut self) {
        if let Some(frame) = self.last_frame.as_ref() {
            blit(frame, self.contrast, &mut self.display_buffer);
        }
        if let Err(err) = self.window.update_with_buffer(
            &self.display_buffer,
            WIDTH as usize,
            HEIGHT as usize,
        ) {
            log::warn!("Window update failed: {}", err);
        }
    }

    /// Pumps window events and samples the keys standing in for buttons.
    pub fn update(&mut self) {
        self.window.update();
        let mut current: u8 = 0;
        if self.window.is_key_down(minifb::Key::Up) {
            current |= Buttons::Up.mask();
        }
        if self.window.is_key_down(minifb::Key::Down) {
            current |= Buttons::Down.mask();
        }
        if self.window.is_key_down(minifb::Key::Enter) {
            current |= Buttons::Select.mask();
        }
        if self.window.is_key_down(minifb::Key::Backspace) {
            current |= Buttons::Cancel.mask();
        }
        self.buttons.update(current);
    }

    pub fn get_buttons(&self) -> ButtonState {
        self.buttons
    }
}

impl Display for MinifbDisplay {
    fn show(&mut self, frame: &Bitmap) {
        self.last_frame = Some(frame.clone());
        self.update_display();
    }

    fn set_contrast(&mut self, level: u8) {
        log::debug!("Contrast {} -> {}", self.contrast, level);
        self.contrast = level;
        self.update_display();
    }
}
