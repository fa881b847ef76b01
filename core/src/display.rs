use crate::framebuffer::Bitmap;

pub const WIDTH: u32 = 128;
pub const HEIGHT: u32 = 64;

/// Contrast used while the screen is in use.
pub const CONTRAST_AWAKE: u8 = 255;
/// Contrast used to blank the panel after inactivity.
pub const CONTRAST_ASLEEP: u8 = 0;

pub trait Display {
    /// Pushes a full frame to the panel.
    fn show(&mut self, frame: &Bitmap);
    fn set_contrast(&mut self, level: u8);
}
