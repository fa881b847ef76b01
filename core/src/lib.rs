#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod hotspot;
pub mod icons;
pub mod input;
pub mod menu;
pub mod page;
pub mod pages;
pub mod scroll;
pub mod tile;
pub mod tile_group;
pub mod title_bar;
pub mod viewport;
