//! Windows certificate store via PowerShell
//!
//! Lists `Cert:\CurrentUser\My` as JSON. PowerShell prints a bare object
//! for a single certificate and nothing at all for an empty store.

use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::CertificateCandidate;
use crate::domain::ports::CertificateStore;
use crate::error::{PackageError, PackageResult};

const POWERSHELL: &str = "powershell.exe";

const LIST_SCRIPT: &str = "Get-ChildItem -Path Cert:\\CurrentUser\\My | \
     Select-Object Subject, Thumbprint, \
     @{Name='NotBefore';Expression={$_.NotBefore.ToUniversalTime().ToString('o')}}, \
     @{Name='NotAfter';Expression={$_.NotAfter.ToUniversalTime().ToString('o')}} | \
     ConvertTo-Json -Compress";

#[derive(Debug, Clone, Default)]
pub struct PowerShellCertificateStore;

impl PowerShellCertificateStore {
    pub fn new() -> Self {
        Self
    }
}

impl CertificateStore for PowerShellCertificateStore {
    fn candidates(&self) -> PackageResult<Vec<CertificateCandidate>> {
        debug!("listing certificates in Cert:\\CurrentUser\\My");
        let output = Command::new(POWERSHELL)
            .args(["-NoProfile", "-NonInteractive", "-Command", LIST_SCRIPT])
            .output()
            .map_err(|e| PackageError::ToolNotFound {
                program: POWERSHELL.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PackageError::ToolFailed {
                program: POWERSHELL.to_string(),
                code: output.status.code(),
            });
        }
        parse_certificate_json(&String::from_utf8_lossy(&output.stdout))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StoreEntry {
    subject: String,
    thumbprint: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing {
    Many(Vec<StoreEntry>),
    One(StoreEntry),
}

/// Parse the store listing printed by `ConvertTo-Json`
pub fn parse_certificate_json(text: &str) -> PackageResult<Vec<CertificateCandidate>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let listing: Listing =
        serde_json::from_str(text).map_err(|e| PackageError::CertificateStore {
            message: e.to_string(),
        })?;
    let entries = match listing {
        Listing::Many(entries) => entries,
        Listing::One(entry) => vec![entry],
    };

    Ok(entries
        .into_iter()
        .map(|entry| {
            CertificateCandidate::from_subject(
                &entry.subject,
                entry.not_before,
                entry.not_after,
                entry.thumbprint.as_str(),
            )
        })
        .collect())
}
