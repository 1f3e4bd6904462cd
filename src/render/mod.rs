//! Rendering: markup generation, category filtering, and mount targets.
//!
//! [`gallery::Gallery`] ties them together; the submodules are pure and can
//! be used on a [`GalleryLayout`](crate::core::normalize::GalleryLayout)
//! directly.

pub mod filter;
pub mod gallery;
pub mod markup;
pub mod target;
