//! Release packaging: archive the app with Xcode, optionally zip it, and
//! wrap it in a disk image.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::shell::Shell;
use crate::timing::Timer;

/// What to archive and how to package it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    pub project: String,
    pub scheme: String,
    pub configuration: String,
    pub archive_path: PathBuf,
    /// Bundle name inside the archive, e.g. `Archive Mounter.app`.
    pub app_name: String,
    /// Also produce `<app stem>.zip` for distribution.
    pub zip_app: bool,
    /// Disk image tool, invoked as `<tool> --overwrite <app>`.
    pub create_dmg: PathBuf,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            project: "ArchiveMounter.xcodeproj".to_string(),
            scheme: "ArchiveMounter".to_string(),
            configuration: "Release".to_string(),
            archive_path: PathBuf::from("ArchiveMounter.xcarchive"),
            app_name: "Archive Mounter.app".to_string(),
            zip_app: true,
            create_dmg: PathBuf::from("./node_modules/.bin/create-dmg"),
        }
    }
}

impl ReleaseOptions {
    /// The application inside the archive bundle.
    pub fn archived_app(&self) -> PathBuf {
        self.archive_path
            .join("Products")
            .join("Applications")
            .join(&self.app_name)
    }

    /// `Archive Mounter.app` -> `Archive Mounter.zip`
    pub fn zip_name(&self) -> PathBuf {
        Path::new(&self.app_name).with_extension("zip")
    }
}

/// Archive, optionally zip, then build the disk image. Prior outputs are
/// always replaced.
pub fn package(sh: &mut Shell<'_>, opts: &ReleaseOptions) -> Result<()> {
    let t = Timer::start("xcodebuild archive");
    sh.rmrf(&opts.archive_path)?;
    let xcodebuild = sh
        .cmd("xcodebuild")
        .args(["-project", opts.project.as_str()])
        .args(["-scheme", opts.scheme.as_str()])
        .args(["-configuration", opts.configuration.as_str()])
        .arg("-archivePath")
        .arg_path(&opts.archive_path)
        .arg("archive");
    sh.run(xcodebuild)?;
    t.finish();

    let app = opts.archived_app();

    if opts.zip_app {
        let zip = opts.zip_name();
        tracing::info!("Zipping {}", zip.display());
        sh.remove_file(&zip)?;
        let ditto = sh
            .cmd("ditto")
            .args(["-c", "-k", "--sequesterRsrc", "--keepParent"])
            .arg_path(&app)
            .arg_path(&zip);
        sh.run(ditto)?;
    }

    tracing::info!("Creating disk image");
    let dmg = sh
        .cmd(opts.create_dmg.to_string_lossy())
        .arg("--overwrite")
        .arg_path(&app);
    sh.run(dmg)
}
