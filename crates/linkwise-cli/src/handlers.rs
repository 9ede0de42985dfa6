//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod get;
mod normalize;

pub use completions::handle_completions;
pub use config::handle_config;
pub use get::handle_get;
pub use normalize::handle_normalize;
