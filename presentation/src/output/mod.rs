//! Rendering of dashboard views

pub mod console;
pub mod formatter;
pub mod json;
