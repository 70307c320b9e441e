//! Subcommand implementations.

pub mod build;
pub mod configure;
