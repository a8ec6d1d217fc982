//! Configuration management for mounter-build.
//!
//! Reads configuration from the environment, with an optional env file
//! (`--env-file`) supplying defaults. Environment variables take precedence
//! over the file. Nothing is searched for implicitly. The result is an
//! immutable snapshot; the process environment is never modified.

use anyhow::Result;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Directory the component checkouts live in.
pub const DERIVED_FILES_DIR: &str = "DERIVED_FILES_DIR";
/// Directory the application bundle is built into.
pub const BUILT_PRODUCTS_DIR: &str = "BUILT_PRODUCTS_DIR";
/// Bundle name, e.g. `Archive Mounter.app`.
pub const FULL_PRODUCT_NAME: &str = "FULL_PRODUCT_NAME";

/// The only variables handed to subprocesses of the external build.
pub const PASSTHROUGH_VARS: [&str; 2] = ["PATH", "HOME"];

/// Snapshot of the variables the build reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnv {
    pub derived_files_dir: PathBuf,
    pub built_products_dir: PathBuf,
    pub full_product_name: String,
    subprocess_env: BTreeMap<String, String>,
}

impl BuildEnv {
    /// Capture from `env_file` (if given) and the process environment.
    pub fn capture(env_file: Option<&Path>) -> Result<Self> {
        Self::from_vars(load_vars(env_file, std::env::vars_os()))
    }

    /// Capture from an explicit list of variables.
    ///
    /// Every required variable must be present; the first missing one is
    /// reported as [`BuildError::MissingVariable`].
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: BTreeMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let derived_files_dir = PathBuf::from(require(&vars, DERIVED_FILES_DIR)?);
        let built_products_dir = PathBuf::from(require(&vars, BUILT_PRODUCTS_DIR)?);
        let full_product_name = require(&vars, FULL_PRODUCT_NAME)?.to_string();

        let mut subprocess_env = BTreeMap::new();
        for key in PASSTHROUGH_VARS {
            subprocess_env.insert(key.to_string(), require(&vars, key)?.to_string());
        }

        Ok(Self {
            derived_files_dir,
            built_products_dir,
            full_product_name,
            subprocess_env,
        })
    }

    /// Environment for every subprocess: `PATH` and `HOME`, nothing else.
    pub fn subprocess_env(&self) -> &BTreeMap<String, String> {
        &self.subprocess_env
    }

    /// `<BUILT_PRODUCTS_DIR>/<FULL_PRODUCT_NAME>/Contents/Executables`
    pub fn executables_dir(&self) -> PathBuf {
        self.built_products_dir
            .join(&self.full_product_name)
            .join("Contents")
            .join("Executables")
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  {}: {}", DERIVED_FILES_DIR, self.derived_files_dir.display());
        println!("  {}: {}", BUILT_PRODUCTS_DIR, self.built_products_dir.display());
        println!("  {}: {}", FULL_PRODUCT_NAME, self.full_product_name);
        println!("  Executables: {}", self.executables_dir().display());
        let keys: Vec<&str> = self.subprocess_env.keys().map(String::as_str).collect();
        println!("  Subprocess environment: {}", keys.join(", "));
    }
}

fn require<'a>(vars: &'a BTreeMap<String, String>, key: &str) -> Result<&'a str> {
    vars.get(key)
        .map(String::as_str)
        .ok_or_else(|| BuildError::MissingVariable(key.to_string()).into())
}

/// Read `env_file` (if any) and overlay `process` on top of it.
///
/// An unreadable file or a malformed line is skipped with a warning, so a
/// complete environment never fails because of the file.
pub fn load_vars<I>(env_file: Option<&Path>, process: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut vars = BTreeMap::new();

    if let Some(path) = env_file {
        match dotenvy::from_path_iter(path) {
            Ok(iter) => {
                for item in iter {
                    match item {
                        Ok((key, value)) => {
                            vars.insert(key, value);
                        }
                        Err(e) => {
                            tracing::warn!("Skipping entry in {}: {}", path.display(), e)
                        }
                    }
                }
            }
            Err(e) => tracing::warn!("Ignoring {}: {}", path.display(), e),
        }
    }

    // Environment variables override the env file
    vars.extend(unicode_vars(process));
    vars
}

/// Keep the entries whose key and value are both valid UTF-8.
///
/// Anything else cannot be a variable the build reads, so it is dropped
/// instead of aborting the capture.
pub fn unicode_vars<I>(vars: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                let key = key.unwrap_or_else(|k| k.to_string_lossy().into_owned());
                tracing::debug!("Dropping non-UTF-8 environment entry {}", key);
                None
            }
        })
        .collect()
}

/// The process environment as an explicit map, without non-UTF-8 entries.
pub fn process_vars() -> BTreeMap<String, String> {
    unicode_vars(std::env::vars_os())
}

/// Compiler settings threaded into the native build systems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toolchain {
    /// Minimum macOS version the helpers must run on. `None` leaves the
    /// compilers and configure probes at their defaults.
    pub macos_version_min: Option<String>,
}

impl Toolchain {
    pub fn with_min_version(version: impl Into<String>) -> Self {
        Self {
            macos_version_min: Some(version.into()),
        }
    }

    /// `-mmacosx-version-min=<v>`
    pub fn cflags(&self) -> Option<String> {
        self.macos_version_min
            .as_ref()
            .map(|v| format!("-mmacosx-version-min={}", v))
    }

    /// C compiler with flags, e.g. `cc -mmacosx-version-min=10.10`.
    pub fn cc(&self) -> Option<String> {
        self.cflags().map(|flags| format!("cc {}", flags))
    }

    /// C++ compiler with flags.
    pub fn cxx(&self) -> Option<String> {
        self.cflags().map(|flags| format!("c++ {}", flags))
    }
}
