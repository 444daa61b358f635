//! Output rendering
//!
//! Everything the binary prints, as strings, so the format is testable.

use std::fmt::Write;

use crate::application::PackageReport;
use crate::config::ConfigWarning;
use crate::domain::entities::{DeploymentParameters, SigningIdentity, ValidationErrors};

use super::cli::PROGRAM_NAME;

/// Validation problems: the first on the program line, the rest indented
pub fn render_validation_errors(errors: &ValidationErrors) -> String {
    let mut out = String::new();
    for (index, error) in errors.iter().enumerate() {
        if index == 0 {
            let _ = writeln!(out, "{}: {}", PROGRAM_NAME, error);
        } else {
            let _ = writeln!(out, "    {}", error);
        }
    }
    let _ = writeln!(out, "For usage information type {} --help", PROGRAM_NAME);
    out
}

/// A fatal error, prefixed with the program name
pub fn render_fatal(message: &str) -> String {
    format!("{}: {}\n", PROGRAM_NAME, message)
}

/// Command-line syntax errors, in the same shape as validation errors
pub fn render_usage_error(message: &str) -> String {
    format!(
        "{}: {}\nFor usage information type {} --help\n",
        PROGRAM_NAME, message, PROGRAM_NAME
    )
}

pub fn render_config_warnings(warnings: &[ConfigWarning]) -> String {
    let mut out = String::new();
    for w in warnings {
        match w.line {
            Some(line) => {
                let _ = writeln!(
                    out,
                    "⚠ Unknown config key '{}' in {}:{}",
                    w.key,
                    w.file.display(),
                    line
                );
            }
            None => {
                let _ = writeln!(out, "⚠ Unknown config key '{}' in {}", w.key, w.file.display());
            }
        }
        if let Some(suggestion) = &w.suggestion {
            let _ = writeln!(out, "   Did you mean '{}'?", suggestion);
        }
    }
    out
}

/// Parameter summary shown with `--verbose`
pub fn render_parameter_summary(params: &DeploymentParameters) -> String {
    let (hash, name) = match params.signing() {
        SigningIdentity::Hash(hash) => (hash.to_string(), String::new()),
        SigningIdentity::CommonName(name) => (String::new(), name.clone()),
    };

    let rows = [
        ("Application name:", params.application_name().to_string()),
        ("EXE name:", params.exe_name().to_string()),
        ("Application version:", params.version().to_string()),
        ("From directory:", params.from_directory().display().to_string()),
        ("To directory:", params.to_directory().display().to_string()),
        ("Certificate hash:", hash),
        ("Certificate name:", name),
        ("Timestamp URL:", params.timestamp_url().to_string()),
        (
            "Create desktop icon:",
            params.create_desktop_shortcut().to_string(),
        ),
        (
            "Desktop icon file:",
            params.desktop_icon_file().unwrap_or_default().to_string(),
        ),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let line = format!("{:<21}{}", label, value);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn render_report(report: &PackageReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Manifest:   {}", report.manifest_path.display());
    let _ = writeln!(out, "Deployment: {}", report.deployment_path.display());
    let _ = writeln!(out, "Signed with {}", report.certificate_hash);
    let _ = writeln!(out, "Staged {} file(s)", report.staged.len());
    out
}
