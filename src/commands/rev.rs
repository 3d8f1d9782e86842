/// `capdiff-rev`: compare capabilities between two git revisions.
use std::time::Duration;

use crate::analyzer::AnalyzerOptions;
use crate::cli::RevCli;
use crate::diff::{reconcile, render_report};
use crate::snapshot::{AcquireError, AcquireOptions, acquire_at_revision};

/// Acquire both snapshots (strictly one after the other), reconcile them,
/// and print the report. Returns whether any differences were found.
///
/// # Errors
///
/// Returns `AcquireError` if either acquisition fails; reconciliation itself
/// is total and cannot fail.
pub fn run(args: &RevCli) -> Result<bool, AcquireError> {
    let options = AcquireOptions {
        analyzer: AnalyzerOptions {
            granularity: args.granularity.clone(),
            capabilities: args.capabilities.clone(),
        },
        timeout: args.timeout.map(Duration::from_secs),
        retain_workspaces: args.keep_workspaces,
    };

    let baseline = acquire_at_revision(&args.baseline, &args.package, &options)?;
    let current = acquire_at_revision(&args.current, &args.package, &options)?;

    let entries = reconcile(&baseline, &current);
    print!("{}", render_report(&entries));
    Ok(!entries.is_empty())
}
