/// `capdiff-pkg`: compare capabilities between two published module
/// versions using the analyzer's built-in comparison mode.
use std::time::Duration;

use crate::analyzer;
use crate::cli::PkgCli;
use crate::snapshot::{AcquireError, AcquireOptions, fetch_into_workspace};

/// Materialize both versions into fresh module workspaces, capture the
/// baseline version's capability report as a file, and run the analyzer's
/// comparison mode against it in the current version's workspace.
///
/// Returns the comparison's exit code: the analyzer signals "differences
/// found" through a non-zero code, which the caller propagates verbatim.
///
/// # Errors
///
/// Returns `AcquireError` if either workspace cannot be prepared, the
/// baseline report cannot be captured, or the comparison subprocess cannot
/// be run at all.
pub fn run(args: &PkgCli) -> Result<i32, AcquireError> {
    let options = AcquireOptions {
        analyzer: analyzer::AnalyzerOptions::default(),
        timeout: args.timeout.map(Duration::from_secs),
        retain_workspaces: args.keep_workspaces,
    };

    // Both workspaces are bound for the whole comparison: the baseline one
    // holds the report file the comparison reads, and dropping either would
    // delete it.
    let baseline_ws =
        fetch_into_workspace(&format!("{}@{}", args.package, args.version1), &options)?;
    let report_file =
        analyzer::capture_report(baseline_ws.path(), &args.package, options.timeout)
            .map_err(AcquireError::Analysis)?;

    let current_ws =
        fetch_into_workspace(&format!("{}@{}", args.package, args.version2), &options)?;
    let code = analyzer::compare(
        current_ws.path(),
        &args.package,
        &report_file,
        options.timeout,
    )
    .map_err(AcquireError::Analysis)?;

    Ok(code)
}
