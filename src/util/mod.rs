//! Shared utilities

pub mod process;
pub mod words;

pub use process::{find_executable, CommandRunner, ProcessBuilder, SystemRunner};
pub use words::QuotingStyle;
