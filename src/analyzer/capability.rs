/// The analyzer's capability enumeration.
use std::fmt;

use serde::Deserialize;

/// A capability tag attributed to a package by the analyzer.
///
/// Declaration order matches the analyzer's own enumeration order, and the
/// derived `Ord` is what puts reconciliation reports in a stable order.
/// Tags this build does not know about deserialize to [`Capability::Unknown`]
/// instead of failing the whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
pub enum Capability {
    /// No capability recorded.
    #[default]
    #[serde(rename = "CAPABILITY_UNSPECIFIED")]
    Unspecified,
    /// Explicitly analyzed and found safe.
    #[serde(rename = "CAPABILITY_SAFE")]
    Safe,
    /// Filesystem access.
    #[serde(rename = "CAPABILITY_FILES")]
    Files,
    /// Network access.
    #[serde(rename = "CAPABILITY_NETWORK")]
    Network,
    /// Runtime introspection or manipulation.
    #[serde(rename = "CAPABILITY_RUNTIME")]
    Runtime,
    /// Reads system state (environment, clocks, ...).
    #[serde(rename = "CAPABILITY_READ_SYSTEM_STATE")]
    ReadSystemState,
    /// Modifies system state.
    #[serde(rename = "CAPABILITY_MODIFY_SYSTEM_STATE")]
    ModifySystemState,
    /// Operating-system interfaces.
    #[serde(rename = "CAPABILITY_OPERATING_SYSTEM")]
    OperatingSystem,
    /// Direct system calls.
    #[serde(rename = "CAPABILITY_SYSTEM_CALLS")]
    SystemCalls,
    /// Can execute arbitrary code.
    #[serde(rename = "CAPABILITY_ARBITRARY_EXECUTION")]
    ArbitraryExecution,
    /// Calls into C via cgo.
    #[serde(rename = "CAPABILITY_CGO")]
    Cgo,
    /// Could not be analyzed.
    #[serde(rename = "CAPABILITY_UNANALYZED")]
    Unanalyzed,
    /// Uses unsafe pointers.
    #[serde(rename = "CAPABILITY_UNSAFE_POINTER")]
    UnsafePointer,
    /// Uses reflection.
    #[serde(rename = "CAPABILITY_REFLECT")]
    Reflect,
    /// Spawns subprocesses.
    #[serde(rename = "CAPABILITY_EXEC")]
    Exec,
    /// A tag newer than this build; sorts after every known tag.
    #[serde(other)]
    Unknown,
}

impl Capability {
    /// The tag's wire name, as the analyzer prints it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "CAPABILITY_UNSPECIFIED",
            Self::Safe => "CAPABILITY_SAFE",
            Self::Files => "CAPABILITY_FILES",
            Self::Network => "CAPABILITY_NETWORK",
            Self::Runtime => "CAPABILITY_RUNTIME",
            Self::ReadSystemState => "CAPABILITY_READ_SYSTEM_STATE",
            Self::ModifySystemState => "CAPABILITY_MODIFY_SYSTEM_STATE",
            Self::OperatingSystem => "CAPABILITY_OPERATING_SYSTEM",
            Self::SystemCalls => "CAPABILITY_SYSTEM_CALLS",
            Self::ArbitraryExecution => "CAPABILITY_ARBITRARY_EXECUTION",
            Self::Cgo => "CAPABILITY_CGO",
            Self::Unanalyzed => "CAPABILITY_UNANALYZED",
            Self::UnsafePointer => "CAPABILITY_UNSAFE_POINTER",
            Self::Reflect => "CAPABILITY_REFLECT",
            Self::Exec => "CAPABILITY_EXEC",
            Self::Unknown => "CAPABILITY_UNKNOWN",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
