//! unrar library and the rar2fs filesystem.

use anyhow::Result;

use super::BuildContext;
use crate::fetch;
use crate::registry::{RAR2FS, UNRAR};
use crate::shell::Shell;

/// Headers of the FUSE for macOS installation rar2fs compiles against.
pub const FUSE_INCLUDE_DIR: &str = "/usr/local/include/osxfuse";

/// Download unrar and build its static library (`make lib`).
pub fn build_libunrar(sh: &mut Shell<'_>, ctx: &BuildContext) -> Result<()> {
    fetch::tarball(sh, ctx.registry().get(UNRAR)?)?;

    let mut unrar = sh.pushd(UNRAR);
    let mut args = vec!["lib".to_string()];
    if let Some(cxx) = ctx.toolchain().cxx() {
        args.push(format!("CXX={}", cxx));
    }
    unrar.make(args)
}

/// Build rar2fs against the freshly built unrar.
pub fn build_rar2fs(sh: &mut Shell<'_>, ctx: &BuildContext) -> Result<()> {
    build_libunrar(sh, ctx)?;

    let mut rar2fs = fetch::cloned(sh, ctx.registry().get(RAR2FS)?)?;

    let autoreconf = rar2fs.cmd("autoreconf").args(["-f", "-i"]).quiet_stderr();
    rar2fs.run(autoreconf)?;

    let mut configure = rar2fs.cmd("./configure").args([
        format!("--with-fuse={}", FUSE_INCLUDE_DIR),
        format!("--with-unrar=../{}", UNRAR),
    ]);
    if let (Some(cc), Some(cxx)) = (ctx.toolchain().cc(), ctx.toolchain().cxx()) {
        // utimensat is missing before 10.13 even though the SDK declares it
        configure = configure
            .env("ac_cv_func_utimensat", "no")
            .env("CC", cc)
            .env("CXX", cxx);
    }
    rar2fs.run(configure)?;

    rar2fs.make([RAR2FS])
}
