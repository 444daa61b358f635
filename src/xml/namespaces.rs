//! Namespace URIs used by ClickOnce descriptors

/// Application/deployment manifest, schema v1
pub const ASM_V1: &str = "urn:schemas-microsoft-com:asm.v1";
/// Application/deployment manifest, schema v2
pub const ASM_V2: &str = "urn:schemas-microsoft-com:asm.v2";
/// ClickOnce extensions, v1 (`createDesktopShortcut`)
pub const CLICKONCE_V1: &str = "urn:schemas-microsoft-com:clickonce.v1";
/// ClickOnce extensions, v2 (`compatibleFrameworks`)
pub const CLICKONCE_V2: &str = "urn:schemas-microsoft-com:clickonce.v2";
/// Bound to `xml` in every document
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// The prefix the descriptor generator uses for `uri`
pub fn preferred_prefix(uri: &str) -> Option<&'static str> {
    match uri {
        ASM_V1 => Some("asmv1"),
        ASM_V2 => Some("asmv2"),
        CLICKONCE_V1 => Some("co.v1"),
        CLICKONCE_V2 => Some("co.v2"),
        XML => Some("xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_namespaces_have_prefixes() {
        assert_eq!(preferred_prefix(ASM_V1), Some("asmv1"));
        assert_eq!(preferred_prefix(CLICKONCE_V1), Some("co.v1"));
        assert_eq!(preferred_prefix("urn:other"), None);
    }
}
