//! Utility functions and helpers.

pub mod http;
pub mod slug;

pub use slug::{PLACEHOLDER_IMAGE, image_path, slugify};
