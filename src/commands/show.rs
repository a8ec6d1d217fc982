//! Show command - displays information.

use anyhow::Result;
use std::path::Path;

use crate::config::BuildEnv;
use crate::registry::Profile;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show captured environment and toolchain
    Config,
    /// Show pinned sources
    Registry { json: bool },
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, profile: &Profile, env_file: Option<&Path>) -> Result<()> {
    match target {
        ShowTarget::Config => {
            match BuildEnv::capture(env_file) {
                Ok(env) => env.print(),
                Err(e) => println!("Configuration incomplete: {:#}", e),
            }
            println!();
            println!("Toolchain:");
            match profile.toolchain.cflags() {
                Some(flags) => {
                    println!("  CFLAGS: {}", flags);
                    println!("  CC: {}", profile.toolchain.cc().unwrap_or_default());
                    println!("  CXX: {}", profile.toolchain.cxx().unwrap_or_default());
                }
                None => println!("  (compiler defaults)"),
            }
        }
        ShowTarget::Registry { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&profile.registry)?);
            } else {
                profile.registry.print();
            }
        }
    }
    Ok(())
}
