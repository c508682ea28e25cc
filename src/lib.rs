//! arcode - in-memory workspace state for a browser-style code editor.
//!
//! Modules:
//! - models: the project file tree and its persisted form
//! - kernel: documents, terminal sessions, layout, and the store tying them together

pub mod kernel;
pub mod models;
