//! Engine module: CLI surface and settings resolution

pub mod arg_parser;
pub mod cli;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cli::{Settings, handle_run, resolve_settings};
