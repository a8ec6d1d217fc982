//! Shared test utilities for mounter-build tests.

#![allow(dead_code)]

use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use mounter_build::config::BuildEnv;
use mounter_build::error::BuildError;
use mounter_build::process::{Cmd, Runner};

/// Marker file every simulated checkout contains.
pub const FRESH: &str = "FRESH";

/// Scripted runner.
///
/// Records every command, fails on request, and fakes the filesystem side
/// effects of `clone`, `curl -o` and `tar x` so the pipeline sees what it
/// would on a real machine. Filesystem operations use the real defaults.
#[derive(Default)]
pub struct FakeRunner {
    pub commands: Vec<Cmd>,
    fail_at: Option<usize>,
    fail_program: Option<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the command with this zero-based index.
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    /// Fail the first command running `program`.
    pub fn failing_program(program: &str) -> Self {
        Self {
            fail_program: Some(program.to_string()),
            ..Self::default()
        }
    }

    /// `program arg arg ...` for every recorded command.
    pub fn lines(&self) -> Vec<String> {
        self.commands.iter().map(line).collect()
    }

    pub fn programs(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.program()).collect()
    }

    fn should_fail(&self, index: usize, cmd: &Cmd) -> bool {
        self.fail_at == Some(index) || self.fail_program.as_deref() == Some(cmd.program())
    }

    fn simulate(&self, cmd: &Cmd) -> Result<()> {
        let cwd = cmd.get_dir().map(Path::to_path_buf).unwrap_or_default();
        let args = cmd.get_args();
        match (cmd.program(), args.first().map(String::as_str)) {
            ("git" | "hg", Some("clone")) => {
                let target = cwd.join(&args[2]);
                if target.exists() {
                    bail!("destination path '{}' already exists", target.display());
                }
                populate(&target);
            }
            ("curl", _) => {
                let pos = args.iter().position(|a| a == "-o").unwrap();
                fs::write(cwd.join(&args[pos + 1]), b"tarball").unwrap();
            }
            ("tar", Some("xvzf")) => {
                let name = args[1].trim_end_matches(".tar.gz");
                let target = cwd.join(name);
                if target.exists() {
                    bail!("{} already exists", target.display());
                }
                populate(&target);
            }
            _ => {}
        }
        Ok(())
    }
}

impl Runner for FakeRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<()> {
        let index = self.commands.len();
        self.commands.push(cmd.clone());
        if self.should_fail(index, cmd) {
            return Err(BuildError::CommandFailed {
                command: cmd.to_string(),
                status: Some(2),
            }
            .into());
        }
        self.simulate(cmd)
    }
}

fn populate(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(FRESH), b"fresh").unwrap();
}

/// `program arg arg ...` without quoting or environment.
pub fn line(cmd: &Cmd) -> String {
    let mut words = vec![cmd.program().to_string()];
    words.extend(cmd.get_args().iter().cloned());
    words.join(" ")
}

/// Temporary Xcode-like layout: a derived files dir and a products dir.
pub struct TestEnv {
    /// Kept alive for the lifetime of the TestEnv.
    pub _temp_dir: TempDir,
    pub derived: PathBuf,
    pub products: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let derived = temp_dir.path().join("Derived Files");
        let products = temp_dir.path().join("Products");
        fs::create_dir_all(&derived).expect("Failed to create derived dir");
        fs::create_dir_all(&products).expect("Failed to create products dir");
        Self {
            _temp_dir: temp_dir,
            derived,
            products,
        }
    }

    /// Variables as Xcode would export them, plus some noise.
    pub fn vars(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert(
            "DERIVED_FILES_DIR".to_string(),
            self.derived.display().to_string(),
        );
        vars.insert(
            "BUILT_PRODUCTS_DIR".to_string(),
            self.products.display().to_string(),
        );
        vars.insert(
            "FULL_PRODUCT_NAME".to_string(),
            "Archive Mounter.app".to_string(),
        );
        vars.insert("PATH".to_string(), "/usr/local/bin:/usr/bin:/bin".to_string());
        vars.insert("HOME".to_string(), "/Users/builder".to_string());
        for i in 0..25 {
            vars.insert(format!("XCODE_NOISE_{}", i), format!("value {}", i));
        }
        vars.insert("CC".to_string(), "/opt/bogus/cc".to_string());
        vars
    }

    pub fn build_env(&self) -> BuildEnv {
        BuildEnv::from_vars(self.vars()).expect("all variables present")
    }

    /// Pretend a previous build left stale files in every checkout.
    pub fn leave_stale_checkouts(&self, names: &[&str]) {
        for name in names {
            let dir = self.derived.join(name);
            fs::create_dir_all(dir.join("nested")).unwrap();
            fs::write(dir.join("STALE"), b"old").unwrap();
            fs::write(dir.join("nested/STALE"), b"old").unwrap();
        }
    }

    /// Pretend both drivers were built.
    pub fn place_built_drivers(&self) {
        for name in ["rar2fs", "fuse-zip"] {
            let dir = self.derived.join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(name), format!("#!/bin/sh\necho {}\n", name)).unwrap();
        }
    }

    pub fn executables_dir(&self) -> PathBuf {
        self.products
            .join("Archive Mounter.app")
            .join("Contents")
            .join("Executables")
    }
}

/// Assert that a path exists.
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "Expected {} to exist", path.display());
}

/// Assert that a path does not exist.
pub fn assert_not_exists(path: &Path) {
    assert!(!path.exists(), "Expected {} to be gone", path.display());
}
