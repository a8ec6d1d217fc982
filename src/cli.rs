//! Command-line definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::registry::{Profile, Variant};
use crate::release::ReleaseOptions;

#[derive(Debug, Parser)]
#[command(name = "mounter-build")]
#[command(about = "Builds the FUSE helpers bundled with Archive Mounter")]
#[command(
    after_help = "QUICK START:\n  mounter-build preflight        Check host tools\n  mounter-build external build   Fetch and build rar2fs and fuse-zip\n  mounter-build external copy    Copy them into the app bundle\n  mounter-build release          Archive, zip and create the disk image"
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print every step instead of executing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// KEY=value file supplying variables missing from the environment
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Xcode build phase entry point: fetch and build, or copy into the bundle
    External {
        /// Which half of the build phase to run
        #[arg(value_enum)]
        step: ExternalStep,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Archive the app, zip it and create the disk image
    Release(ReleaseArgs),

    /// Run preflight checks (verify host tools before building)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExternalStep {
    /// Fetch and build every component
    Build,
    /// Copy the built executables into the application bundle
    Copy,
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Pinned source set to build
    #[arg(long, value_enum, default_value_t = Variant::Current)]
    pub registry: Variant,

    /// Override the minimum macOS version passed to the compilers
    #[arg(long, value_name = "VERSION")]
    pub min_macos: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ReleaseArgs {
    /// Directory containing the Xcode project
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Skip zipping the application before creating the disk image
    #[arg(long)]
    pub no_zip: bool,

    #[arg(long, default_value = "ArchiveMounter.xcodeproj")]
    pub project: String,

    #[arg(long, default_value = "ArchiveMounter")]
    pub scheme: String,

    #[arg(long, default_value = "Release")]
    pub configuration: String,

    #[arg(long, default_value = "Archive Mounter.app")]
    pub app_name: String,

    /// Disk image tool
    #[arg(long, value_name = "PATH", default_value = "./node_modules/.bin/create-dmg")]
    pub create_dmg: PathBuf,
}

impl ProfileArgs {
    pub fn profile(&self) -> Profile {
        Profile::new(self.registry, self.min_macos.clone())
    }
}

impl ReleaseArgs {
    pub fn options(&self) -> ReleaseOptions {
        ReleaseOptions {
            project: self.project.clone(),
            scheme: self.scheme.clone(),
            configuration: self.configuration.clone(),
            archive_path: PathBuf::from(format!("{}.xcarchive", self.scheme)),
            app_name: self.app_name.clone(),
            zip_app: !self.no_zip,
            create_dmg: self.create_dmg.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ShowTarget {
    /// Show captured environment and toolchain settings
    Config {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Show pinned component sources
    Registry {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
