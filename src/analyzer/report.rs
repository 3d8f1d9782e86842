/// Wire schema for the analyzer's JSON report.
///
/// Capslock emits protojson: field names in `camelCase` (`snake_case`
/// accepted here as an alias) and 64-bit integers as either JSON strings or
/// numbers.
/// Only the fields this tool consumes are modeled; everything else in the
/// report is ignored.
use serde::{Deserialize, Deserializer};

use super::capability::Capability;

/// One analyzer run's full output: the list of capability findings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapabilityReport {
    /// All findings, in the analyzer's own (unspecified) order.
    #[serde(rename = "capabilityInfo", alias = "capability_info", default)]
    pub records: Vec<CapabilityRecord>,
}

/// One finding: a package exhibits a capability, justified by a call path.
/// Immutable once parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct CapabilityRecord {
    /// The capability tag.
    #[serde(default)]
    pub capability: Capability,

    /// The package directory exhibiting the capability; the identifying key.
    #[serde(rename = "packageDir", alias = "package_dir", default)]
    pub package_dir: String,

    /// The call path justifying the finding, outermost frame first.
    #[serde(default)]
    pub path: Vec<Frame>,
}

/// One call-path frame.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frame {
    /// Display name (usually a fully qualified function name).
    #[serde(default)]
    pub name: String,

    /// Source location of the call site, when the analyzer knows it.
    #[serde(default)]
    pub site: Option<Site>,
}

/// A source location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Site {
    /// Source file name.
    #[serde(default)]
    pub filename: String,

    /// 1-based line number.
    #[serde(default, deserialize_with = "u64_lenient")]
    pub line: u64,

    /// 1-based column number.
    #[serde(default, deserialize_with = "u64_lenient")]
    pub column: u64,
}

/// Accept an integer encoded either natively or as a protojson string.
fn u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "capabilityInfo": [
            {
                "packageName": "example.com/pkg/a",
                "capability": "CAPABILITY_NETWORK",
                "packageDir": "example.com/pkg/a",
                "path": [
                    {
                        "name": "example.com/pkg/a.Dial",
                        "site": {"filename": "a/dial.go", "line": "42", "column": "7"}
                    },
                    {"name": "net.Dial"}
                ]
            }
        ],
        "moduleInfo": [{"path": "example.com/pkg", "version": "v1.0.0"}]
    }"#;

    #[test]
    fn test_parse_protojson_report() {
        let report: CapabilityReport = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(report.records.len(), 1);
        let record = &report.records[0];
        assert_eq!(record.capability, Capability::Network);
        assert_eq!(record.package_dir, "example.com/pkg/a");
        assert_eq!(record.path.len(), 2);

        let site = record.path[0].site.as_ref().unwrap();
        assert_eq!(site.filename, "a/dial.go");
        assert_eq!(site.line, 42);
        assert_eq!(site.column, 7);
        assert!(record.path[1].site.is_none());
    }

    #[test]
    fn test_numeric_line_numbers_also_accepted() {
        let json = r#"{"filename": "f.go", "line": 3, "column": 9}"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!((site.line, site.column), (3, 9));
    }

    #[test]
    fn test_snake_case_aliases() {
        let json = r#"{"capability_info": [{"capability": "CAPABILITY_FILES", "package_dir": "p"}]}"#;
        let report: CapabilityReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.records[0].package_dir, "p");
        assert_eq!(report.records[0].capability, Capability::Files);
    }

    #[test]
    fn test_empty_report() {
        let report: CapabilityReport = serde_json::from_str("{}").unwrap();
        assert!(report.records.is_empty());
    }
}
