//! Target framework value object - the catalog of runtimes a package can advertise

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A runtime/profile combination the deployed application is compatible with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFramework {
    V35,
    V40Client,
    V40Full,
    V45Full,
    V451Full,
    V452Full,
    V46Full,
    V461Full,
}

/// Attribute values written into a `compatibleFrameworks/framework` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkRuntime {
    pub target_version: &'static str,
    pub profile: Option<&'static str>,
    pub supported_runtime: &'static str,
}

/// Identifier that is not part of the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown framework: {0}")]
pub struct UnknownFramework(pub String);

impl TargetFramework {
    /// Every supported framework, in catalog order
    pub const ALL: [TargetFramework; 8] = [
        TargetFramework::V35,
        TargetFramework::V40Client,
        TargetFramework::V40Full,
        TargetFramework::V45Full,
        TargetFramework::V451Full,
        TargetFramework::V452Full,
        TargetFramework::V46Full,
        TargetFramework::V461Full,
    ];

    /// Used when no framework is requested
    pub const DEFAULT: TargetFramework = TargetFramework::V35;

    /// Command-line identifier
    pub fn identifier(&self) -> &'static str {
        match self {
            TargetFramework::V35 => "3.5",
            TargetFramework::V40Client => "4.0-client",
            TargetFramework::V40Full => "4.0-full",
            TargetFramework::V45Full => "4.5-full",
            TargetFramework::V451Full => "4.5.1-full",
            TargetFramework::V452Full => "4.5.2-full",
            TargetFramework::V46Full => "4.6-full",
            TargetFramework::V461Full => "4.6.1-full",
        }
    }

    /// Version, profile and supported runtime for this framework
    pub fn runtime(&self) -> FrameworkRuntime {
        let (target_version, profile, supported_runtime) = match self {
            TargetFramework::V35 => ("3.5", None, "2.0.50727"),
            TargetFramework::V40Client => ("4.0", Some("Client"), "4.0.30319"),
            TargetFramework::V40Full => ("4.0", Some("Full"), "4.0.30319"),
            TargetFramework::V45Full => ("4.5", Some("Full"), "4.0.30319"),
            TargetFramework::V451Full => ("4.5.1", Some("Full"), "4.0.30319"),
            TargetFramework::V452Full => ("4.5.2", Some("Full"), "4.0.30319"),
            TargetFramework::V46Full => ("4.6", Some("Full"), "4.0.30319"),
            TargetFramework::V461Full => ("4.6.1", Some("Full"), "4.0.30319"),
        };
        FrameworkRuntime {
            target_version,
            profile,
            supported_runtime,
        }
    }

    /// Comma-separated list of valid identifiers, for help and error hints
    pub fn valid_identifiers() -> String {
        Self::ALL
            .iter()
            .map(|f| f.identifier())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for TargetFramework {
    type Err = UnknownFramework;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.identifier() == s)
            .ok_or_else(|| UnknownFramework(s.to_string()))
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Look up the runtime triple for a raw identifier
pub fn resolve(identifier: &str) -> Result<FrameworkRuntime, UnknownFramework> {
    identifier.parse::<TargetFramework>().map(|f| f.runtime())
}

/// Resolve the full list of requested frameworks into the list to advertise.
///
/// - an empty request means the default framework
/// - every unknown identifier is reported; any unknown fails the batch
/// - order is kept, repeats collapse to their first occurrence
/// - `4.0-client` without `4.0-full` also advertises `4.0-full` (appended)
pub fn resolve_compatible<S: AsRef<str>>(
    requested: &[S],
) -> Result<Vec<TargetFramework>, Vec<UnknownFramework>> {
    if requested.is_empty() {
        return Ok(vec![TargetFramework::DEFAULT]);
    }

    let mut resolved: Vec<TargetFramework> = Vec::with_capacity(requested.len() + 1);
    let mut unknown = Vec::new();

    for identifier in requested {
        match identifier.as_ref().parse::<TargetFramework>() {
            Ok(framework) => {
                if !resolved.contains(&framework) {
                    resolved.push(framework);
                }
            }
            Err(err) => unknown.push(err),
        }
    }

    if !unknown.is_empty() {
        return Err(unknown);
    }

    if resolved.contains(&TargetFramework::V40Client)
        && !resolved.contains(&TargetFramework::V40Full)
    {
        resolved.push(TargetFramework::V40Full);
    }

    Ok(resolved)
}
