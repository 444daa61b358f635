//! Configuration module for clickonce
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CLICKONCE_*)
//! 3. `--config <file>`, or `./clickonce.toml` when no file is given
//! 4. User config (`<config dir>/clickonce/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_layered, parse_with_warnings, user_config_path, with_env_overrides, ConfigWarning,
    LoadedConfig, ENV_CERTIFICATE, ENV_CERT_INVENTORY, ENV_MAGE_PATH, ENV_TIMESTAMP_URL,
    PROJECT_CONFIG_FILE,
};
pub use types::{Config, PackageConfig, SigningConfig, ToolConfig};
