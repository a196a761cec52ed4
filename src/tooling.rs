//! Tooling & Integration Layer
//!
//! CLI commands, output formatting and the HTTP service mode built on top of
//! the occurrence finder.

pub mod cli;
pub mod format;
pub mod serve;

pub use cli::{Cli, CliContext, Commands};
