//! Icons rendered from SVG at build time, plus build metadata.

use embedded_graphics::prelude::Size;

use crate::framebuffer::Bitmap;

mod generated_icons {
    include!(concat!(env!("OUT_DIR"), "/icons.rs"));
}

pub use generated_icons::ICON_SIZE;

pub const VERSION: &str = env!("MINISCREEN_VERSION");
pub const BUILD_TIME: &str = env!("MINISCREEN_BUILD_TIME");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Gear,
    Network,
    Terminal,
    Info,
    Battery,
}

impl Icon {
    pub fn mask(self) -> &'static [u8] {
        match self {
            Icon::Gear => generated_icons::ICON_GEAR_MASK,
            Icon::Network => generated_icons::ICON_NETWORK_MASK,
            Icon::Terminal => generated_icons::ICON_TERMINAL_MASK,
            Icon::Info => generated_icons::ICON_INFO_MASK,
            Icon::Battery => generated_icons::ICON_BATTERY_MASK,
        }
    }

    pub fn size(self) -> Size {
        Size::new(ICON_SIZE, ICON_SIZE)
    }

    pub fn bitmap(self) -> Bitmap {
        match Bitmap::from_bits(self.size(), self.mask()) {
            Ok(bitmap) => bitmap,
            Err(err) => {
                log::warn!("Icon {:?} unusable: {}", self, err);
                Bitmap::new(self.size())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_has_pixels() {
        for icon in [Icon::Gear, Icon::Network, Icon::Terminal, Icon::Info, Icon::Battery] {
            let bitmap = icon.bitmap();
            assert_eq!(bitmap.width(), ICON_SIZE);
            assert!(bitmap.count_lit() > 0, "{:?} is blank", icon);
            assert!(bitmap.count_lit() < (ICON_SIZE * ICON_SIZE) as usize);
        }
    }

    #[test]
    fn build_metadata_is_set() {
        assert!(!VERSION.is_empty());
        assert!(!BUILD_TIME.is_empty());
    }
}
