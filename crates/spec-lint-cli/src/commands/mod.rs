//! Subcommand implementations.

pub mod check;
pub mod contrast;
pub mod init;
pub mod list_rules;
pub mod output;
