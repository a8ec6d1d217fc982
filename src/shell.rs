//! Working-directory and environment scope for a pipeline.
//!
//! A [`Shell`] carries the logical current directory and the explicit
//! environment every command is started with. It never calls
//! `std::env::set_current_dir` or `std::env::set_var`; commands receive the
//! directory and environment through their [`Cmd`] descriptor instead.

use anyhow::Result;
use std::collections::BTreeMap;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use crate::process::{Cmd, Runner};

pub struct Shell<'r> {
    runner: &'r mut dyn Runner,
    cwd: PathBuf,
    env: BTreeMap<String, String>,
}

impl<'r> Shell<'r> {
    pub fn new(
        runner: &'r mut dyn Runner,
        cwd: impl Into<PathBuf>,
        env: BTreeMap<String, String>,
    ) -> Self {
        Self {
            runner,
            cwd: cwd.into(),
            env,
        }
    }

    /// Current logical working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Resolve a path against the current directory.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.cwd.join(rel)
    }

    /// Enter `dir` (relative to the current directory) until the returned
    /// guard is dropped.
    pub fn pushd(&mut self, dir: impl AsRef<Path>) -> Pushd<'_, 'r> {
        let target = self.cwd.join(dir);
        tracing::trace!("pushd {}", target.display());
        let saved = mem::replace(&mut self.cwd, target);
        Pushd { shell: self, saved }
    }

    /// A command bound to the current directory and environment.
    pub fn cmd(&self, program: impl AsRef<str>) -> Cmd {
        Cmd::new(program).dir(&self.cwd).base_env(&self.env)
    }

    pub fn run(&mut self, cmd: Cmd) -> Result<()> {
        self.runner.run(&cmd)
    }

    /// `make [args...]`
    pub fn make<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cmd = self.cmd("make").args(args);
        self.run(cmd)
    }

    /// `rm -rf <rel>`
    pub fn rmrf(&mut self, rel: impl AsRef<Path>) -> Result<()> {
        let path = self.path(rel);
        self.runner.remove_dir_all(&path)
    }

    /// `mkdir -p <rel>`
    pub fn mkdir_p(&mut self, rel: impl AsRef<Path>) -> Result<()> {
        let path = self.path(rel);
        self.runner.create_dir_all(&path)
    }

    /// Copy a file into a directory, keeping its file name.
    pub fn copy_into(&mut self, file: impl AsRef<Path>, dir: impl AsRef<Path>) -> Result<()> {
        let from = self.path(file);
        let name = from
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Cannot copy {}: no file name", from.display()))?
            .to_owned();
        let to = self.path(dir).join(name);
        self.runner.copy_file(&from, &to)
    }

    /// `rm -f <rel>`
    pub fn remove_file(&mut self, rel: impl AsRef<Path>) -> Result<()> {
        let path = self.path(rel);
        self.runner.remove_file(&path)
    }
}

/// Scoped directory change: restores the previous directory when dropped,
/// whether the scope ends normally, through `?`, or by unwinding.
pub struct Pushd<'s, 'r> {
    shell: &'s mut Shell<'r>,
    saved: PathBuf,
}

impl<'r> Deref for Pushd<'_, 'r> {
    type Target = Shell<'r>;

    fn deref(&self) -> &Self::Target {
        &*self.shell
    }
}

impl DerefMut for Pushd<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.shell
    }
}

impl Drop for Pushd<'_, '_> {
    fn drop(&mut self) {
        let saved = mem::take(&mut self.saved);
        tracing::trace!("popd {}", saved.display());
        self.shell.cwd = saved;
    }
}
