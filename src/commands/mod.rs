//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `external` - Xcode build phase (`build` / `copy`)
//! - `release` - Archive and package the application
//! - `preflight` - Run preflight checks
//! - `show` - Display information

pub mod external;
mod preflight;
pub mod release;
pub mod show;

pub use external::cmd_external;
pub use preflight::cmd_preflight;
pub use release::cmd_release;
pub use show::cmd_show;

use crate::process::{DryRunner, Runner, SystemRunner};

/// The runner for this invocation.
pub fn runner(dry_run: bool) -> Box<dyn Runner> {
    if dry_run {
        Box::new(DryRunner::new())
    } else {
        Box::new(SystemRunner)
    }
}
