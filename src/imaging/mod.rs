//! Image processing routines for uploaded logos

pub mod background;

pub use background::{RemovalOptions, apply_removal, remove_background};
