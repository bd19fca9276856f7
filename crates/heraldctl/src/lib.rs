//! Herald Control library - daemon client and terminal rendering.

pub mod client;
pub mod display;
pub mod errors;
