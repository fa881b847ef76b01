//! Timing and layout constants shared by the renderer.

/// Frame interval when nothing on screen asks to be redrawn faster.
pub const DEFAULT_FRAME_MS: u32 = 100;

/// Frame interval while a page scroll animation runs; one step per frame.
pub const SCROLL_FRAME_MS: u32 = 10;

/// Pixels a menu moves per scroll step.
pub const SCROLL_PX_RESOLUTION: i32 = 2;

/// Refresh interval for hotspots whose content rarely changes.
pub const DYNAMIC_PAGE_REDRAW_MS: u32 = 1_000;

/// Refresh interval for marquee text that has to scroll.
pub const MARQUEE_FRAME_MS: u32 = 50;

/// Pixels a marquee moves per frame.
pub const MARQUEE_DELTA_PX: i32 = 2;

/// Frames a marquee rests at either end before reversing.
pub const MARQUEE_PAUSE_FRAMES: usize = 7;

/// Idle time before the screen is blanked.
pub const SLEEP_TIMEOUT_MS: u32 = 300_000;

pub const TITLE_BAR_HEIGHT: u32 = 19;

/// Interval of the processing animation on status icons.
pub const STATUS_ICON_FRAME_MS: u32 = 250;
