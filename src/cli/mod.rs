//! Interactive calendar shell over the ledger engine.

pub mod commands;
pub mod core;
pub mod help;
pub mod output;
pub mod registry;
pub mod render;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_ENV};
