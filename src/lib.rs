//! Grouped, filterable media gallery.
//!
//! A JSON document describes images and videos, optionally arranged in
//! layout groups.  [`render`] turns it into markup for a host page and
//! [`editor`] backs the `editor` command that adds, removes, and lists items.

pub mod config;
pub mod core;
pub mod editor;
pub mod error;
pub mod render;

pub use crate::config::GalleryConfig;
pub use crate::core::model::{Document, Group, Item, ItemLayout, MediaType};
pub use crate::error::{GalleryError, Result};
pub use crate::render::gallery::Gallery;
