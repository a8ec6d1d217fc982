//! Component builds.
//!
//! Dependency order, leaves first:
//!
//! - `unrar` -> `rar2fs` (configure points at `../unrar`)
//! - `libzip` -> `fuse-zip` (make variables point at the libzip build tree)
//!
//! The two chains are independent but run one after the other. The first
//! failure stops the whole build; nothing is cleaned up.

pub mod context;
pub mod rar;
pub mod zip;

use anyhow::Result;

pub use context::BuildContext;

use crate::shell::Shell;
use crate::timing::Timer;

/// Fetch and build every component inside the derived files directory.
pub fn build_all(sh: &mut Shell<'_>, ctx: &BuildContext) -> Result<()> {
    let t = Timer::start("rar2fs");
    rar::build_rar2fs(sh, ctx)?;
    t.finish();

    let t = Timer::start("fuse-zip");
    zip::build_fusezip(sh, ctx)?;
    t.finish();

    Ok(())
}
