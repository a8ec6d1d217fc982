//! Preflight command - checks the host before a build.

use anyhow::Result;

use crate::preflight;

/// Execute the preflight command.
///
/// With `strict`, any failed check is an error. With `json`, the report is
/// printed as JSON for CI to consume instead of the table.
pub fn cmd_preflight(strict: bool, json: bool) -> Result<()> {
    if strict && !json {
        return preflight::run_preflight_or_fail();
    }

    let report = preflight::run_preflight();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    if !report.all_passed() {
        if strict {
            anyhow::bail!("Preflight failed: {} check(s) failed", report.fail_count());
        }
        if !json {
            println!("Some checks failed. Use --strict to fail the build.");
        }
    }
    Ok(())
}
