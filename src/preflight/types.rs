//! Preflight check types and report.

use serde::Serialize;

/// Result of a single preflight check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    /// A required tool or header is missing.
    Fail,
    /// Reported, but does not block `external build`.
    Warn,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, details: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            status,
            details: details.map(str::to_string),
        }
    }

    pub fn pass(name: &str) -> Self {
        Self::new(name, CheckStatus::Pass, None)
    }

    /// Passing check that records where the tool was found.
    pub fn pass_with(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Pass, Some(details))
    }

    pub fn fail(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Fail, Some(details))
    }

    pub fn warn(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Warn, Some(details))
    }
}

impl CheckStatus {
    fn label(self) -> &'static str {
        match self {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "MISSING",
            CheckStatus::Warn => "warn",
        }
    }
}

/// Everything `mounter-build preflight` found on this host.
#[derive(Debug, Default, Serialize)]
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// True unless a check the external build depends on failed.
    pub fn all_passed(&self) -> bool {
        self.fail_count() == 0
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    pub fn fail_count(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    pub fn warn_count(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    /// One line per check, then a verdict for the external build.
    pub fn print(&self) {
        println!("Host readiness for rar2fs / fuse-zip builds:\n");

        let width = self.checks.iter().map(|c| c.name.len()).max().unwrap_or(0);
        for check in &self.checks {
            match &check.details {
                Some(details) => println!(
                    "  {:<7} {:<width$}  {}",
                    check.status.label(),
                    check.name,
                    details
                ),
                None => println!("  {:<7} {}", check.status.label(), check.name),
            }
        }

        println!();
        match (self.fail_count(), self.warn_count()) {
            (0, 0) => println!("Ready: {} checks passed.", self.checks.len()),
            (0, warns) => println!("Ready, with {} warning(s).", warns),
            (fails, _) => println!(
                "Not ready: {} of {} checks failed; `external build` will stop early.",
                fails,
                self.checks.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_do_not_fail() {
        let report = PreflightReport {
            checks: vec![CheckResult::pass("git"), CheckResult::warn("hg", "old")],
        };
        assert!(report.all_passed());
        assert_eq!(report.warn_count(), 1);
    }

    #[test]
    fn test_details_kept_only_when_given() {
        assert_eq!(CheckResult::pass("git").details, None);
        let found = CheckResult::pass_with("hg", "/usr/local/bin/hg");
        assert_eq!(found.status, CheckStatus::Pass);
        assert_eq!(found.details.as_deref(), Some("/usr/local/bin/hg"));
    }

    #[test]
    fn test_failures_counted() {
        let report = PreflightReport {
            checks: vec![
                CheckResult::fail("cmake", "missing"),
                CheckResult::fail("make", "missing"),
                CheckResult::pass_with("curl", "/usr/bin/curl"),
            ],
        };
        assert!(!report.all_passed());
        assert_eq!(report.fail_count(), 2);
    }
}
