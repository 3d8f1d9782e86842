/// Invocation of the `capslock` analyzer as a subprocess.
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use super::report::CapabilityReport;
use crate::exec::{ToolCommand, ToolError};

/// The analyzer binary looked up on `PATH`.
pub const ANALYZER_BIN: &str = "capslock";

/// Name of the intermediate report file written into a workspace for the
/// analyzer's comparison mode.
pub const REPORT_FILENAME: &str = "capslock.json";

/// How much captured analyzer output to echo at debug level.
const PREVIEW_LEN: usize = 100;

/// Errors from invoking the analyzer or handling its output.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The analyzer subprocess failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The analyzer's output was not a parseable capability report.
    #[error("could not parse analyzer output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The intermediate report file could not be written.
    #[error("writing capability report to '{}': {source}", .path.display())]
    ReportFile {
        /// Destination path of the report file.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
}

/// Flags forwarded verbatim to the analyzer.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    /// Analysis granularity (`-granularity=`), when requested.
    pub granularity: Option<String>,
    /// Comma-separated capability filter (`-capabilities=`), when requested.
    pub capabilities: Option<String>,
}

impl AnalyzerOptions {
    fn command(&self, dir: &Path, selector: &str, timeout: Option<Duration>) -> ToolCommand {
        let mut cmd = ToolCommand::new(ANALYZER_BIN)
            .arg(format!("-packages={selector}"))
            .arg("-output=json")
            .current_dir(dir)
            .timeout(timeout);
        if let Some(granularity) = &self.granularity {
            cmd = cmd.arg(format!("-granularity={granularity}"));
        }
        if let Some(capabilities) = &self.capabilities {
            cmd = cmd.arg(format!("-capabilities={capabilities}"));
        }
        cmd
    }
}

/// Run the analyzer against the packages selected by `selector` in `dir` and
/// parse its JSON report.
///
/// # Errors
///
/// Returns `AnalysisError` if the subprocess exits non-zero or its output is
/// not a parseable capability report.
pub fn analyze(
    dir: &Path,
    selector: &str,
    options: &AnalyzerOptions,
    timeout: Option<Duration>,
) -> Result<CapabilityReport, AnalysisError> {
    let stdout = options.command(dir, selector, timeout).output()?;
    debug!(preview = %preview(&stdout), "analyzer returned");
    let report: CapabilityReport = serde_json::from_slice(&stdout)?;
    debug!(records = report.records.len(), "parsed capability report");
    Ok(report)
}

/// Run the analyzer in `dir` and persist its JSON report to
/// [`REPORT_FILENAME`] inside `dir`, returning the file's path. The file is
/// later consumed by [`compare`] as its baseline input.
///
/// # Errors
///
/// Returns `AnalysisError` if the subprocess fails or the file cannot be
/// written.
pub fn capture_report(
    dir: &Path,
    selector: &str,
    timeout: Option<Duration>,
) -> Result<PathBuf, AnalysisError> {
    let stdout = ToolCommand::new(ANALYZER_BIN)
        .arg(format!("-packages={selector}"))
        .arg("-output=json")
        .current_dir(dir)
        .timeout(timeout)
        .output()?;
    let path = dir.join(REPORT_FILENAME);
    std::fs::write(&path, &stdout).map_err(|source| AnalysisError::ReportFile {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = stdout.len(), "captured baseline report");
    Ok(path)
}

/// Run the analyzer's built-in comparison mode in `dir` against a previously
/// captured baseline report, streaming its human-readable report to stdout.
///
/// The exit status code is returned as data: a non-zero code may simply mean
/// the analyzer found differences, so the caller propagates it verbatim.
///
/// # Errors
///
/// Returns `AnalysisError` only if the subprocess cannot be spawned or times
/// out.
pub fn compare(
    dir: &Path,
    selector: &str,
    baseline_file: &Path,
    timeout: Option<Duration>,
) -> Result<i32, AnalysisError> {
    let status = ToolCommand::new(ANALYZER_BIN)
        .arg(format!("-packages={selector}"))
        .arg("-output=compare")
        .arg(baseline_file.display().to_string())
        .current_dir(dir)
        .timeout(timeout)
        .passthrough()?;
    // A child killed by a signal has no exit code; treat it as tool failure.
    Ok(status.code().unwrap_or(2))
}

fn preview(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_output() {
        let long = "x".repeat(300);
        let p = preview(long.as_bytes());
        assert_eq!(p.len(), PREVIEW_LEN + 3);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_preview_keeps_short_output() {
        assert_eq!(preview(b"{}"), "{}");
    }

    #[test]
    fn test_analyzer_flags_are_forwarded() {
        let options = AnalyzerOptions {
            granularity: Some("intermediate".to_owned()),
            capabilities: Some("CAPABILITY_NETWORK,CAPABILITY_FILES".to_owned()),
        };
        let cmd = options.command(Path::new("."), "./...", None);
        assert_eq!(
            cmd.command_line(),
            "capslock -packages=./... -output=json -granularity=intermediate \
             -capabilities=CAPABILITY_NETWORK,CAPABILITY_FILES"
        );
    }

    #[test]
    fn test_default_options_omit_optional_flags() {
        let cmd = AnalyzerOptions::default().command(Path::new("."), "./...", None);
        assert_eq!(cmd.command_line(), "capslock -packages=./... -output=json");
    }
}
