//! External command - the Xcode build phase entry point.

use anyhow::{bail, Result};

use crate::build::{self, BuildContext};
use crate::cli::ExternalStep;
use crate::config::{BuildEnv, DERIVED_FILES_DIR};
use crate::install;
use crate::process::Runner;
use crate::registry::Profile;
use crate::shell::Shell;

/// Run `build` or `copy` inside `DERIVED_FILES_DIR`.
///
/// Subprocesses see only `PATH` and `HOME` from `env`.
pub fn cmd_external(
    step: ExternalStep,
    env: BuildEnv,
    profile: Profile,
    runner: &mut dyn Runner,
) -> Result<()> {
    if !env.derived_files_dir.is_dir() {
        bail!(
            "{} does not exist: {}",
            DERIVED_FILES_DIR,
            env.derived_files_dir.display()
        );
    }

    let ctx = BuildContext::new(env, profile);
    let mut sh = Shell::new(
        runner,
        ctx.derived_files_dir(),
        ctx.env.subprocess_env().clone(),
    );

    match step {
        ExternalStep::Build => {
            tracing::info!("Building external components ({:?})", ctx.registry().variant);
            build::build_all(&mut sh, &ctx)
        }
        ExternalStep::Copy => install::copy_all(&mut sh, &ctx),
    }
}
