//! Release command - archives and packages the application.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::process::Runner;
use crate::release::{self, ReleaseOptions};
use crate::shell::Shell;

/// Package the app from `project_dir` (default: current directory).
///
/// Unlike the external build, the release flow passes the caller's whole
/// environment on to `xcodebuild`, as an explicit snapshot.
pub fn cmd_release(
    project_dir: Option<PathBuf>,
    opts: &ReleaseOptions,
    env: BTreeMap<String, String>,
    runner: &mut dyn Runner,
) -> Result<()> {
    let project_dir = match project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    tracing::info!(
        "Packaging {} from {} (zip: {})",
        opts.app_name,
        project_dir.display(),
        opts.zip_app
    );
    let mut sh = Shell::new(runner, project_dir, env);
    release::package(&mut sh, opts)
}
