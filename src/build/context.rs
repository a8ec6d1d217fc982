//! Build context shared across all component builds.

use std::path::Path;

use crate::config::{BuildEnv, Toolchain};
use crate::registry::{Profile, Registry};

/// Everything a component build reads; never modified during a run.
pub struct BuildContext {
    /// Captured environment (paths, product name, subprocess env).
    pub env: BuildEnv,
    /// Pinned sources and compiler settings.
    pub profile: Profile,
}

impl BuildContext {
    pub fn new(env: BuildEnv, profile: Profile) -> Self {
        Self { env, profile }
    }

    pub fn registry(&self) -> &Registry {
        &self.profile.registry
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.profile.toolchain
    }

    /// Directory all checkouts live in.
    pub fn derived_files_dir(&self) -> &Path {
        &self.env.derived_files_dir
    }

    /// `DERIVED_FILES_DIR` with spaces escaped for use inside make variables,
    /// which make hands to `sh` word-split.
    pub fn escaped_derived_files_dir(&self) -> String {
        escape_spaces(&self.derived_files_dir().to_string_lossy())
    }
}

pub(crate) fn escape_spaces(s: &str) -> String {
    s.replace(' ', r"\ ")
}
