//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - `-v` is the application version, so clap's own version flag is off
//! - Help is `-?`/`--help`; `-h` is the certificate hash
//! - Nothing is `required` here: missing values are reported together by
//!   parameter validation, alongside every other problem

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Config;
use crate::domain::entities::RawParameters;

/// Name used in messages and help
pub const PROGRAM_NAME: &str = "clickonce";

/// Generate a click-once deployment package.
#[derive(Parser, Debug, Default)]
#[command(name = "clickonce")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(after_help = "(Items marked * are mandatory)\nhttps://github.com/jjeffery/clickonce")]
pub struct Cli {
    /// * Application name
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub application_name: Option<String>,

    /// * Name of the executable file
    #[arg(short = 'x', long = "exe", value_name = "FILE")]
    pub exe_name: Option<String>,

    /// * Application version (eg 1.2.3.4)
    #[arg(short = 'v', long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Certificate hash (thumbprint) used for signing
    #[arg(short = 'h', long = "hash", value_name = "HASH")]
    pub certificate_hash: Option<String>,

    /// Certificate name, looked up in the certificate store
    #[arg(short = 'c', long = "certificate", value_name = "NAME")]
    pub certificate_name: Option<String>,

    /// * Directory containing the application files
    #[arg(short = 'f', long = "from", value_name = "DIR")]
    pub from_directory: Option<PathBuf>,

    /// * Directory to write the deployment to
    #[arg(short = 't', long = "to", value_name = "DIR")]
    pub to_directory: Option<PathBuf>,

    /// Publisher
    #[arg(short = 'p', long = "publisher", value_name = "NAME")]
    pub publisher: Option<String>,

    /// Compatible framework (3.5, 4.0-client, 4.0-full, 4.5-full, 4.5.1-full,
    /// 4.5.2-full, 4.6-full, 4.6.1-full), repeatable; default 3.5
    #[arg(long = "framework", value_name = "FRAMEWORK")]
    pub frameworks: Vec<String>,

    /// Product
    #[arg(long = "product", value_name = "NAME")]
    pub product: Option<String>,

    /// Install application
    #[arg(short = 'i', long = "install")]
    pub install: bool,

    /// Application should be given the activation URL
    #[arg(long = "trust-url-parameters")]
    pub trust_url_parameters: bool,

    /// Files should end with .deploy file extension
    #[arg(long = "map-file-extensions")]
    pub map_file_extensions: bool,

    /// The application should not automatically check for updates
    #[arg(long = "disable-auto-update")]
    pub disable_auto_update: bool,

    /// Create a desktop shortcut icon
    #[arg(long = "create-desktop-shortcut")]
    pub create_desktop_shortcut: bool,

    /// Desktop shortcut icon file (must exist in the 'from' directory)
    #[arg(long = "desktop-icon-file", value_name = "FILE")]
    pub desktop_icon_file: Option<String>,

    /// Processor architecture (msil, x86, amd64, ia64)
    #[arg(long = "processor-architecture", value_name = "ARCH")]
    pub processor_architecture: Option<String>,

    /// Assign a file to a group (format group:file), repeatable
    #[arg(long = "group", value_name = "GROUP:FILE")]
    pub groups: Vec<String>,

    /// Timestamp URL
    #[arg(short = 'u', long = "timestamp-url", value_name = "URL")]
    pub timestamp_url: Option<String>,

    /// Increase verbosity (--verbose, --verbose --verbose)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (default: ./clickonce.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show this help message
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,

    #[arg(value_name = "ARGS", hide = true)]
    pub extra_arguments: Vec<String>,
}

impl Cli {
    /// Merge command-line values over configuration defaults
    pub fn to_raw_parameters(&self, config: &Config) -> RawParameters {
        RawParameters {
            application_name: self.application_name.clone(),
            exe_name: self.exe_name.clone(),
            version: self.version.clone(),
            publisher: self
                .publisher
                .clone()
                .or_else(|| config.package.publisher.clone()),
            product: self.product.clone(),
            processor_architecture: self
                .processor_architecture
                .clone()
                .or_else(|| config.package.processor_architecture.clone()),
            from_directory: self.from_directory.clone(),
            to_directory: self.to_directory.clone(),
            certificate_hash: self.certificate_hash.clone(),
            certificate_name: self
                .certificate_name
                .clone()
                .or_else(|| config.signing.certificate.clone()),
            timestamp_url: self
                .timestamp_url
                .clone()
                .or_else(|| config.signing.timestamp_url.clone()),
            install: self.install,
            create_desktop_shortcut: self.create_desktop_shortcut,
            map_file_extensions: self.map_file_extensions,
            trust_url_parameters: self.trust_url_parameters,
            disable_auto_update: self.disable_auto_update,
            desktop_icon_file: self.desktop_icon_file.clone(),
            frameworks: if self.frameworks.is_empty() {
                config.package.frameworks.clone()
            } else {
                self.frameworks.clone()
            },
            groups: self.groups.clone(),
            extra_arguments: self.extra_arguments.clone(),
        }
    }
}
