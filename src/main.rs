//! mounter-build - builds the FUSE helpers bundled with Archive Mounter.
//!
//! Fetches pinned versions of unrar, rar2fs, libzip and fuse-zip, builds
//! them for macOS, copies the drivers into the application bundle, and
//! packages releases as a zip and disk image.

use anyhow::Result;
use clap::Parser;

use mounter_build::cli::{Cli, Commands, ShowTarget};
use mounter_build::commands;
use mounter_build::config::{self, BuildEnv};
use mounter_build::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::configure_logging(cli.verbose)?;

    let mut runner = commands::runner(cli.dry_run);

    match cli.command {
        Commands::External { step, profile } => {
            let env = BuildEnv::capture(cli.env_file.as_deref())?;
            commands::cmd_external(step, env, profile.profile(), runner.as_mut())?;
        }

        Commands::Release(args) => {
            let env = config::process_vars();
            commands::cmd_release(
                args.project_dir.clone(),
                &args.options(),
                env,
                runner.as_mut(),
            )?;
        }

        Commands::Preflight { strict, json } => {
            commands::cmd_preflight(strict, json)?;
        }

        Commands::Show { what } => {
            let (target, profile) = match what {
                ShowTarget::Config { profile } => (commands::show::ShowTarget::Config, profile),
                ShowTarget::Registry { profile, json } => {
                    (commands::show::ShowTarget::Registry { json }, profile)
                }
            };
            commands::cmd_show(target, &profile.profile(), cli.env_file.as_deref())?;
        }
    }

    Ok(())
}
