//! Gallery file editor: prompts, operations, and persistence.

pub mod ops;
pub mod prompt;
pub mod store;
