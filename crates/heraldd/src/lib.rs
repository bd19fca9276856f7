//! Herald daemon library - exposes modules for testing.

pub mod app;
pub mod checks;
pub mod fanout;
pub mod help;
pub mod server;
pub mod status;
