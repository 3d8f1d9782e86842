/// CLI argument definitions via clap derive, one `Parser` per binary.
use clap::Parser;

/// capdiff-rev — diff package capabilities between two git revisions.
#[derive(Debug, Parser)]
#[command(
    name = "capdiff-rev",
    about = "Diff the capabilities of Go packages between two git revisions",
    version,
    arg_required_else_help = true
)]
pub struct RevCli {
    /// Baseline revision (any git revision; "." means the current working
    /// tree).
    pub baseline: String,

    /// Current revision to compare against the baseline ("." for the
    /// current working tree).
    pub current: String,

    /// Package selector passed to the analyzer.
    /// Defaults to all packages under the current directory.
    #[arg(default_value = "./...")]
    pub package: String,

    /// Enable verbose (debug) logging to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Analysis granularity, forwarded verbatim to the analyzer.
    #[arg(long, value_name = "GRANULARITY")]
    pub granularity: Option<String>,

    /// Comma-separated capability list, forwarded verbatim to the analyzer.
    #[arg(long, value_name = "LIST")]
    pub capabilities: Option<String>,

    /// Kill any external tool that runs longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Keep temporary workspaces on disk for inspection instead of deleting
    /// them.
    #[arg(long)]
    pub keep_workspaces: bool,
}

/// capdiff-pkg — diff package capabilities between two published versions.
#[derive(Debug, Parser)]
#[command(
    name = "capdiff-pkg",
    about = "Diff the capabilities of a Go module between two published versions",
    version,
    arg_required_else_help = true
)]
pub struct PkgCli {
    /// Module path to compare (e.g. "example.com/some/module/...").
    pub package: String,

    /// Baseline version (e.g. "v1.1.0").
    pub version1: String,

    /// Current version to compare against the baseline.
    pub version2: String,

    /// Enable verbose (debug) logging to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Kill any external tool that runs longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Keep temporary workspaces on disk for inspection instead of deleting
    /// them.
    #[arg(long)]
    pub keep_workspaces: bool,
}
