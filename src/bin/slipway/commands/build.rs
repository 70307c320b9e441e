//! `slipway build` - configure, then drive the generated makefiles.

use anyhow::Result;

use slipway::{LinuxArgs, LinuxConfig, LinuxEnvironment};

use crate::cli::BuildArgs;

pub fn execute(env_args: &LinuxArgs, args: &BuildArgs) -> Result<()> {
    let env = LinuxEnvironment::new(LinuxConfig::from(env_args));
    env.run_cmake_with(&args.configure.generator)?;
    env.common.run_make()?;
    Ok(())
}
