//! libzip and the fuse-zip filesystem.

use anyhow::Result;

use super::BuildContext;
use crate::fetch;
use crate::registry::{FUSE_ZIP, LIBZIP};
use crate::shell::Shell;

/// Clone libzip and build it as a static library with CMake.
pub fn build_libzip(sh: &mut Shell<'_>, ctx: &BuildContext) -> Result<()> {
    let mut libzip = fetch::cloned(sh, ctx.registry().get(LIBZIP)?)?;
    libzip.mkdir_p("build")?;

    let mut build = libzip.pushd("build");
    let mut cmake = build.cmd("cmake").args(["-DBUILD_SHARED_LIBS=OFF", ".."]);
    if let (Some(cc), Some(cxx)) = (ctx.toolchain().cc(), ctx.toolchain().cxx()) {
        cmake = cmake.env("CC", cc).env("CXX", cxx);
    }
    build.run(cmake)?;
    build.make([] as [&str; 0])
}

/// Build fuse-zip, linking the static libzip from the derived files dir.
pub fn build_fusezip(sh: &mut Shell<'_>, ctx: &BuildContext) -> Result<()> {
    build_libzip(sh, ctx)?;

    let mut fusezip = fetch::cloned(sh, ctx.registry().get(FUSE_ZIP)?)?;
    fusezip.make(make_vars(ctx))
}

/// `ZIPFLAGS`, `LIBS` and optionally `CXX` for the fuse-zip Makefile.
///
/// `$(shell ...)` is passed through untouched for make to expand.
pub fn make_vars(ctx: &BuildContext) -> Vec<String> {
    let derived = ctx.escaped_derived_files_dir();
    let zipflags = format!(
        "-I{d}/{lib}/lib -I{d}/{lib}/build",
        d = derived,
        lib = LIBZIP
    );
    let libs = format!(
        "-Llib -lfusezip $(shell pkg-config fuse --libs) -L{d}/{lib}/build/lib -lzip -lz -lbz2",
        d = derived,
        lib = LIBZIP
    );

    let mut vars = vec![format!("ZIPFLAGS={}", zipflags), format!("LIBS={}", libs)];
    if let Some(cxx) = ctx.toolchain().cxx() {
        vars.push(format!("CXX={} -std=c++11", cxx));
    }
    vars
}
