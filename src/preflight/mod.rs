//! Preflight checks for the external build.
//!
//! Validates host tools and the platform before starting a build.
//! Run with `mounter-build preflight` to check everything is ready.

mod host_tools;
mod types;

use std::path::Path;

use anyhow::{bail, Result};

pub use types::{CheckResult, CheckStatus, PreflightReport};

use crate::build::rar::FUSE_INCLUDE_DIR;

/// Run all preflight checks.
pub fn run_preflight() -> PreflightReport {
    let mut checks = Vec::new();

    tracing::info!("Checking host tools...");
    checks.extend(host_tools::check_host_tools());

    tracing::info!("Checking platform...");
    checks.extend(host_tools::check_platform(Path::new(FUSE_INCLUDE_DIR)));

    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail() -> Result<()> {
    let report = run_preflight();
    report.print();

    if !report.all_passed() {
        bail!("Host is not ready: {} check(s) failed", report.fail_count());
    }
    Ok(())
}
