/// Analyzer layer: the Capslock capability enumeration, the JSON report
/// schema, and subprocess invocation of `capslock` itself.
pub mod capability;
pub mod invoke;
pub mod report;

pub use capability::Capability;
pub use invoke::{
    AnalysisError, AnalyzerOptions, REPORT_FILENAME, analyze, capture_report, compare,
};
pub use report::{CapabilityRecord, CapabilityReport, Frame, Site};
