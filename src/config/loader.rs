//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PackageError, PackageResult};

use super::types::Config;

/// Project configuration file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "clickonce.toml";

pub const ENV_CERTIFICATE: &str = "CLICKONCE_CERTIFICATE";
pub const ENV_TIMESTAMP_URL: &str = "CLICKONCE_TIMESTAMP_URL";
pub const ENV_MAGE_PATH: &str = "CLICKONCE_MAGE_PATH";
pub const ENV_CERT_INVENTORY: &str = "CLICKONCE_CERT_INVENTORY";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// A configuration assembled from every layer, with the warnings met on the way
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// Files that contributed, lowest priority first
    pub sources: Vec<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PackageResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| PackageError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let (config, warnings) = parse_with_warnings(path, &content)?;
    let config = match path.parent() {
        Some(dir) => config.anchored_at(dir),
        None => config,
    };
    Ok((config, warnings))
}

/// Parse configuration text that came from `path`
pub fn parse_with_warnings(
    path: &Path,
    content: &str,
) -> PackageResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PackageError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load user config, then the explicit or project config, then env overrides.
///
/// An explicit `--config` file must exist; the implicit files are optional.
pub fn load_layered(explicit: Option<&Path>, working_dir: &Path) -> PackageResult<LoadedConfig> {
    let mut loaded = LoadedConfig::default();

    if let Some(user_config) = user_config_path() {
        if user_config.is_file() {
            loaded.add(&user_config)?;
        }
    }

    match explicit {
        Some(path) => loaded.add(path)?,
        None => {
            let project_config = working_dir.join(PROJECT_CONFIG_FILE);
            if project_config.is_file() {
                loaded.add(&project_config)?;
            }
        }
    }

    loaded.config = with_env_overrides(loaded.config, |name| std::env::var(name).ok());
    Ok(loaded)
}

impl LoadedConfig {
    fn add(&mut self, path: &Path) -> PackageResult<()> {
        let (config, warnings) = load_with_warnings(path)?;
        tracing::debug!(file = %path.display(), "loaded configuration");
        self.config = std::mem::take(&mut self.config).merge(config);
        self.sources.push(path.to_path_buf());
        self.warnings.extend(warnings);
        Ok(())
    }
}

/// Apply environment variable overrides (CLICKONCE_* prefix).
///
/// Empty values are ignored.
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(certificate) = var(ENV_CERTIFICATE) {
        config.signing.certificate = Some(certificate);
    }
    if let Some(url) = var(ENV_TIMESTAMP_URL) {
        config.signing.timestamp_url = Some(url);
    }
    if let Some(path) = var(ENV_CERT_INVENTORY) {
        config.signing.inventory = Some(PathBuf::from(path));
    }
    if let Some(path) = var(ENV_MAGE_PATH) {
        config.tool.mage_path = Some(PathBuf::from(path));
    }

    config
}

/// `<config dir>/clickonce/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clickonce").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "signing",
        "certificate",
        "timestamp_url",
        "inventory",
        "tool",
        "mage_path",
        "package",
        "publisher",
        "processor_architecture",
        "frameworks",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

