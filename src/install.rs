//! Copy the built helpers into the application bundle.

use anyhow::Result;

use crate::build::BuildContext;
use crate::registry::{FUSE_ZIP, RAR2FS};
use crate::shell::Shell;

/// Executables copied into the bundle, relative to the derived files dir.
pub const EXECUTABLES: [(&str, &str); 2] = [(RAR2FS, RAR2FS), (FUSE_ZIP, FUSE_ZIP)];

/// Create `Contents/Executables` in the bundle and copy both drivers in.
pub fn copy_all(sh: &mut Shell<'_>, ctx: &BuildContext) -> Result<()> {
    let target = ctx.env.executables_dir();
    tracing::info!("Copying executables to {}", target.display());
    sh.mkdir_p(&target)?;

    for (dir, binary) in EXECUTABLES {
        sh.copy_into(format!("{}/{}", dir, binary), &target)?;
    }
    Ok(())
}
