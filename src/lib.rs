//! Slipway - a build-environment utility for CMake-based projects
//!
//! This crate resolves where the native build tools live (from explicit
//! arguments, environment variables, and the executable search path), then
//! drives `cmake` to generate a build system and `make` to build it, with
//! the project directory as the working directory throughout.
//!
//! ```no_run
//! use slipway::linux::{LinuxConfig, LinuxEnvironment};
//!
//! # fn main() -> Result<(), slipway::BuildError> {
//! let env = LinuxEnvironment::new(LinuxConfig::load_defaults());
//! env.run_cmake()?;
//! env.common.run_make()?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod error;
pub mod linux;
pub mod util;

/// Test doubles for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording subprocess runner and stub
/// tool fixtures.
#[cfg(test)]
pub mod test_support;

pub use common::{BuildEnvironment, CommonArgs, CommonConfig};
pub use error::BuildError;
pub use linux::{LinuxArgs, LinuxConfig, LinuxEnvironment};
pub use util::words::QuotingStyle;
