//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PackageResult;

use super::loader::{self, ConfigWarning};

/// Signing defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Certificate common name looked up in the store
    #[serde(default)]
    pub certificate: Option<String>,

    #[serde(default)]
    pub timestamp_url: Option<String>,

    /// TOML certificate inventory used instead of the Windows store
    #[serde(default)]
    pub inventory: Option<PathBuf>,
}

/// Descriptor tool location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub mage_path: Option<PathBuf>,
}

/// Package defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    #[serde(default)]
    pub publisher: Option<String>,

    #[serde(default)]
    pub processor_architecture: Option<String>,

    #[serde(default)]
    pub frameworks: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub signing: SigningConfig,

    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub package: PackageConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PackageResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PackageResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (CLICKONCE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |name| std::env::var(name).ok())
    }

    /// Layer `over` on top of `self`; values set in `over` win
    pub fn merge(self, over: Config) -> Self {
        Config {
            signing: SigningConfig {
                certificate: over.signing.certificate.or(self.signing.certificate),
                timestamp_url: over.signing.timestamp_url.or(self.signing.timestamp_url),
                inventory: over.signing.inventory.or(self.signing.inventory),
            },
            tool: ToolConfig {
                mage_path: over.tool.mage_path.or(self.tool.mage_path),
            },
            package: PackageConfig {
                publisher: over.package.publisher.or(self.package.publisher),
                processor_architecture: over
                    .package
                    .processor_architecture
                    .or(self.package.processor_architecture),
                frameworks: if over.package.frameworks.is_empty() {
                    self.package.frameworks
                } else {
                    over.package.frameworks
                },
            },
        }
    }

    /// Resolve relative paths against the directory of the file they came from
    pub(crate) fn anchored_at(mut self, base: &Path) -> Self {
        let anchor = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        self.signing.inventory = self.signing.inventory.map(anchor);
        self.tool.mage_path = self.tool.mage_path.map(anchor);
        self
    }
}
