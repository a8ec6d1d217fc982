//! Host tool availability checks.

use std::path::Path;

use super::types::CheckResult;

/// Tools the external build cannot run without: (tool, where to get it, purpose).
pub const BUILD_TOOLS: [(&str, &str, &str); 10] = [
    ("git", "Xcode command line tools", "Clones rar2fs and libzip"),
    ("hg", "brew install mercurial", "Clones fuse-zip"),
    ("curl", "system", "Downloads the unrar tarball"),
    ("tar", "system", "Extracts the unrar tarball"),
    ("make", "Xcode command line tools", "Builds every component"),
    ("autoreconf", "brew install autoconf automake", "Regenerates rar2fs build files"),
    ("cmake", "brew install cmake", "Configures libzip"),
    ("pkg-config", "brew install pkg-config", "Locates FUSE libraries for fuse-zip"),
    ("cc", "Xcode command line tools", "C compiler"),
    ("c++", "Xcode command line tools", "C++ compiler"),
];

/// Tools only the release flow needs.
pub const RELEASE_TOOLS: [(&str, &str, &str); 2] = [
    ("xcodebuild", "Xcode", "Required for `mounter-build release`"),
    ("ditto", "system", "Zips the application for distribution"),
];

/// Check host tools are installed.
pub fn check_host_tools() -> Vec<CheckResult> {
    let mut results = Vec::new();

    for (tool, package, purpose) in BUILD_TOOLS {
        results.push(check_tool_exists(tool, package, purpose, true));
    }

    for (tool, package, purpose) in RELEASE_TOOLS {
        results.push(check_tool_exists(tool, package, purpose, false));
    }

    results
}

/// Check the platform and FUSE installation.
pub fn check_platform(fuse_include_dir: &Path) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if cfg!(target_os = "macos") {
        results.push(CheckResult::pass("macOS host"));
    } else {
        results.push(CheckResult::warn(
            "macOS host",
            "Not running on macOS - the helpers only build against FUSE for macOS",
        ));
    }

    if fuse_include_dir.is_dir() {
        results.push(CheckResult::pass_with(
            "FUSE headers",
            &fuse_include_dir.display().to_string(),
        ));
    } else {
        results.push(CheckResult::warn(
            "FUSE headers",
            &format!(
                "{} not found - install FUSE for macOS before building rar2fs",
                fuse_include_dir.display()
            ),
        ));
    }

    results
}

/// Check if a tool exists in PATH.
fn check_tool_exists(tool: &str, package: &str, purpose: &str, required: bool) -> CheckResult {
    match which::which(tool) {
        Ok(path) => CheckResult::pass_with(tool, &path.display().to_string()),
        Err(_) => {
            let msg = format!("Not found. Install via {}. {}", package, purpose);
            if required {
                CheckResult::fail(tool, &msg)
            } else {
                CheckResult::warn(tool, &msg)
            }
        }
    }
}
