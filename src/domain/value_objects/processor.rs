//! Processor architecture value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Processor architecture recorded in the generated descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorArchitecture {
    /// Architecture-neutral managed code
    #[default]
    Msil,
    X86,
    Amd64,
    Ia64,
}

impl ProcessorArchitecture {
    pub const ALL: [ProcessorArchitecture; 4] = [
        ProcessorArchitecture::Msil,
        ProcessorArchitecture::X86,
        ProcessorArchitecture::Amd64,
        ProcessorArchitecture::Ia64,
    ];

    /// Value passed to the descriptor generator
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessorArchitecture::Msil => "msil",
            ProcessorArchitecture::X86 => "x86",
            ProcessorArchitecture::Amd64 => "amd64",
            ProcessorArchitecture::Ia64 => "ia64",
        }
    }
}

impl FromStr for ProcessorArchitecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|arch| arch.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for ProcessorArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
