//! mounter-build library exports.
//!
//! The binary is a thin clap front end; everything it runs lives here so
//! the integration tests under `tests/` can drive it with a scripted runner.

pub mod build;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod install;
pub mod logging;
pub mod preflight;
pub mod process;
pub mod registry;
pub mod release;
pub mod shell;
pub mod timing;
