//! `slipway configure` - generate the project's build system.

use anyhow::Result;

use slipway::{LinuxArgs, LinuxConfig, LinuxEnvironment};

use crate::cli::ConfigureArgs;

pub fn execute(env_args: &LinuxArgs, args: &ConfigureArgs) -> Result<()> {
    let env = LinuxEnvironment::new(LinuxConfig::from(env_args));
    env.run_cmake_with(&args.generator)?;
    Ok(())
}
