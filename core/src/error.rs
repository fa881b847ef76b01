use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Bit data is shorter than the bitmap size requires.
    InvalidBitmap { expected: usize, actual: usize },
    /// A page index past the end of a menu.
    PageOutOfRange { index: usize, len: usize },
    /// A menu was configured without pages.
    EmptyMenu,
    /// Cancel was handled on a menu that has no parent.
    NoParentMenu,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBitmap { expected, actual } => {
                write!(f, "bitmap needs {} bytes, got {}", expected, actual)
            }
            Error::PageOutOfRange { index, len } => {
                write!(f, "page {} out of range for menu of {} pages", index, len)
            }
            Error::EmptyMenu => write!(f, "menu has no pages"),
            Error::NoParentMenu => write!(f, "menu has no parent"),
        }
    }
}

impl core::error::Error for Error {}
