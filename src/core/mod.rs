//! Core data model: documents, normalization, and video references.
//!
//! Nothing in this module does I/O or depends on a rendering target.

pub mod model;
pub mod normalize;
pub mod video;
