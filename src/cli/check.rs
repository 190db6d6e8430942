//! Check command implementation

use anyhow::Result;
use std::path::Path;

use claude_coder::check::{format_check_results, run_all_checks};

/// Run the environment checks. Returns `false` if any check failed.
pub async fn check_command(config_path: Option<&Path>) -> Result<bool> {
    let (_, runner) = super::load(config_path)?;

    let report = run_all_checks(&runner).await;
    println!("{}", format_check_results(&report));

    Ok(report.all_passed)
}
