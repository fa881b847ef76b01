//! Ready-made page layouts. Data comes in through `Source`s and
//! `ActionHandler`s supplied by the caller.

pub mod action;
pub mod info;
pub mod title;
