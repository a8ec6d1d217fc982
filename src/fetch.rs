//! Source fetching.
//!
//! Both fetch flavours start by deleting whatever a previous run left behind
//! under the component's name. There is no incremental update and no retry;
//! any failing command aborts the caller.

use anyhow::{bail, Result};

use crate::registry::{Origin, Source};
use crate::shell::{Pushd, Shell};

/// Download a tarball and extract it into the current directory.
///
/// The archive must unpack into a directory named after the component.
pub fn tarball(sh: &mut Shell<'_>, source: &Source) -> Result<()> {
    let Origin::Tarball { url } = &source.origin else {
        bail!("{} is not a tarball source", source.name);
    };

    tracing::info!("Downloading {} from {}", source.name, url);
    sh.rmrf(source.name)?;

    let archive = format!("{}.tar.gz", source.name);
    let curl = sh.cmd("curl").args(["-fL", "-o", archive.as_str(), *url]);
    sh.run(curl)?;
    let tar = sh.cmd("tar").args(["xvzf", archive.as_str()]);
    sh.run(tar)?;
    sh.remove_file(&archive)
}

/// Clone a repository at its pinned version, apply the listed commits, and
/// enter the checkout.
///
/// The returned guard leaves the checkout again when dropped.
pub fn cloned<'s, 'r>(sh: &'s mut Shell<'r>, source: &Source) -> Result<Pushd<'s, 'r>> {
    let Origin::Repository {
        vcs,
        url,
        version,
        cherry_picks,
    } = &source.origin
    else {
        bail!("{} is not a repository source", source.name);
    };

    tracing::info!("Cloning {} {} from {}", source.name, version, url);
    sh.rmrf(source.name)?;

    let clone = sh
        .cmd(vcs.program())
        .args(["clone", *url, source.name]);
    sh.run(clone)?;

    let mut checkout = sh.pushd(source.name);
    let cmd = checkout.cmd(vcs.program()).args(["checkout", *version]);
    checkout.run(cmd)?;

    for commit in cherry_picks {
        tracing::info!("Applying {} to {}", commit, source.name);
        let cmd = checkout
            .cmd(vcs.program())
            .args([vcs.pick_subcommand(), *commit]);
        checkout.run(cmd)?;
    }

    Ok(checkout)
}
