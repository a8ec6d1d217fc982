//! Centralized command execution with consistent error handling.
//!
//! Every external invocation is described by a [`Cmd`]: program, argument
//! vector, working directory and the complete environment the child sees.
//! Nothing is interpolated through a shell. A [`Runner`] turns descriptors
//! into processes; [`SystemRunner`] spawns them for real, [`DryRunner`] only
//! records and logs them.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::BuildError;

/// Typed description of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    /// Environment inherited from the caller's explicit map.
    base_env: BTreeMap<String, String>,
    /// Per-command variables layered over `base_env`.
    overrides: BTreeMap<String, String>,
    /// Discard stderr (the `2> /dev/null` of a shell line).
    quiet_stderr: bool,
}

impl Cmd {
    /// Create a new command builder with an empty environment.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            current_dir: None,
            base_env: BTreeMap::new(),
            overrides: BTreeMap::new(),
            quiet_stderr: false,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Add a path as an argument.
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    /// Set the working directory.
    pub fn dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Replace the base environment. The child sees nothing else.
    pub fn base_env(mut self, env: &BTreeMap<String, String>) -> Self {
        self.base_env = env.clone();
        self
    }

    /// Set a variable for this command only (`KEY=value program ...`).
    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.overrides
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Discard the command's stderr.
    pub fn quiet_stderr(mut self) -> Self {
        self.quiet_stderr = true;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn overrides(&self) -> &BTreeMap<String, String> {
        &self.overrides
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet_stderr
    }

    /// The complete environment the child process is started with.
    pub fn environment(&self) -> BTreeMap<String, String> {
        let mut env = self.base_env.clone();
        env.extend(self.overrides.clone());
        env
    }

    /// Build the `std::process::Command` for this descriptor.
    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.env_clear();
        cmd.envs(self.environment());
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::inherit());
        if self.quiet_stderr {
            cmd.stderr(Stdio::null());
        } else {
            cmd.stderr(Stdio::inherit());
        }
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for Cmd {
    /// Shell-style rendering for logs and errors. Base environment entries
    /// are left out; overrides are shown as `KEY=value` prefixes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::new();
        for (key, value) in &self.overrides {
            words.push(format!("{}={}", key, quote(value)));
        }
        words.push(quote(&self.program));
        words.extend(self.args.iter().map(|a| quote(a)));
        write!(f, "{}", words.join(" "))?;
        if self.quiet_stderr {
            write!(f, " 2> /dev/null")?;
        }
        Ok(())
    }
}

/// Quote a word for display if a shell would split or expand it.
fn quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '+' | '@')
        });
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Executes build steps.
///
/// Filesystem operations go through the runner as well so that a dry run
/// leaves the disk untouched.
pub trait Runner {
    /// Run a command to completion. A non-zero exit is an error.
    fn run(&mut self, cmd: &Cmd) -> Result<()>;

    /// Remove a directory tree. A missing directory is not an error.
    fn remove_dir_all(&mut self, path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_dir_all(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }

    /// Create a directory and its parents. Existing directories are fine.
    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create {}", path.display()))
    }

    /// Copy a file, keeping its permission bits.
    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to).with_context(|| {
            format!("Failed to copy {} to {}", from.display(), to.display())
        })?;
        Ok(())
    }

    /// Remove a file. A missing file is not an error.
    fn remove_file(&mut self, path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// Spawns real processes with inherited stdout/stderr.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<()> {
        tracing::debug!("$ {}", cmd);
        let status = cmd.to_command().status().with_context(|| {
            format!("Failed to execute '{}'. Is it installed?", cmd.program())
        })?;

        if !status.success() {
            return Err(BuildError::CommandFailed {
                command: cmd.to_string(),
                status: status.code(),
            }
            .into());
        }
        Ok(())
    }
}

/// One step seen by a [`DryRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Run(Cmd),
    RemoveDir(PathBuf),
    CreateDir(PathBuf),
    Copy { from: PathBuf, to: PathBuf },
    RemoveFile(PathBuf),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Run(cmd) => match cmd.get_dir() {
                Some(dir) => write!(f, "(cd {}) {}", dir.display(), cmd),
                None => write!(f, "{}", cmd),
            },
            Step::RemoveDir(path) => write!(f, "rm -rf {}", path.display()),
            Step::CreateDir(path) => write!(f, "mkdir -p {}", path.display()),
            Step::Copy { from, to } => write!(f, "cp {} {}", from.display(), to.display()),
            Step::RemoveFile(path) => write!(f, "rm -f {}", path.display()),
        }
    }
}

/// Records and prints every step without executing anything.
#[derive(Debug, Default)]
pub struct DryRunner {
    steps: Vec<Step>,
}

impl DryRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything that would have been executed, in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn record(&mut self, step: Step) {
        println!("[dry-run] {}", step);
        self.steps.push(step);
    }
}

impl Runner for DryRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<()> {
        self.record(Step::Run(cmd.clone()));
        Ok(())
    }

    fn remove_dir_all(&mut self, path: &Path) -> Result<()> {
        self.record(Step::RemoveDir(path.to_path_buf()));
        Ok(())
    }

    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        self.record(Step::CreateDir(path.to_path_buf()));
        Ok(())
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()> {
        self.record(Step::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        Ok(())
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        self.record(Step::RemoveFile(path.to_path_buf()));
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
