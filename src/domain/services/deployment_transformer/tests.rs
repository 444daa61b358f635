use super::*;
use crate::domain::entities::RawParameters;
use crate::infrastructure::fs::MemoryFs;
use std::path::PathBuf;

const DEPLOYMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<asmv1:assembly xsi:schemaLocation="urn:schemas-microsoft-com:asm.v1 assembly.adaptive.xsd" manifestVersion="1.0" xmlns:asmv1="urn:schemas-microsoft-com:asm.v1" xmlns="urn:schemas-microsoft-com:asm.v2" xmlns:asmv2="urn:schemas-microsoft-com:asm.v2" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <assemblyIdentity name="App.application" version="1.0.0.0" publicKeyToken="0000000000000000" language="neutral" processorArchitecture="msil" xmlns="urn:schemas-microsoft-com:asm.v1" />
  <description asmv2:publisher="Example Pty Ltd" xmlns="urn:schemas-microsoft-com:asm.v1" />
  <deployment install="true">
    <subscription>
      <update>
        <beforeApplicationStartup />
      </update>
    </subscription>
  </deployment>
  <compatibleFrameworks xmlns="urn:schemas-microsoft-com:clickonce.v2">
    <framework targetVersion="3.5" supportedRuntime="2.0.50727" />
  </compatibleFrameworks>
  <dependency>
    <dependentAssembly dependencyType="install" codebase="1.0.0.0\App.exe.manifest" size="4242">
      <assemblyIdentity name="App.exe" version="1.0.0.0" language="neutral" processorArchitecture="msil" type="win32" />
    </dependentAssembly>
  </dependency>
</asmv1:assembly>"#;

fn params(configure: impl FnOnce(&mut RawParameters)) -> DeploymentParameters {
    let fs = MemoryFs::new().with_dir("/build");
    let mut raw = RawParameters {
        application_name: Some("App".to_string()),
        exe_name: Some("App.exe".to_string()),
        version: Some("1.0.0.0".to_string()),
        from_directory: Some(PathBuf::from("/build")),
        to_directory: Some(PathBuf::from("/publish")),
        certificate_hash: Some("ABCD".to_string()),
        ..RawParameters::default()
    };
    configure(&mut raw);
    raw.validate(&fs).unwrap()
}

fn deployment() -> Document {
    Document::parse(DEPLOYMENT).unwrap()
}

fn child<'d>(doc: &'d Document, name: &str) -> &'d Element {
    let root = doc.root().unwrap();
    root.elements().find(|e| e.name() == name).unwrap()
}

#[test]
fn product_is_set_in_v2_namespace() {
    let mut doc = deployment();
    apply_deployment(&mut doc, &params(|raw| raw.product = Some("Suite".to_string()))).unwrap();

    let description = child(&doc, "description");
    assert_eq!(description.attribute_ns(ASM_V2, "product"), Some("Suite"));
    assert!(doc
        .to_xml_string()
        .contains(r#"<description asmv2:publisher="Example Pty Ltd" asmv2:product="Suite" xmlns="urn:schemas-microsoft-com:asm.v1" />"#));
}

#[test]
fn no_product_leaves_description_alone() {
    let mut doc = deployment();
    apply_deployment(&mut doc, &params(|_| {})).unwrap();
    assert_eq!(child(&doc, "description").attributes().len(), 1);
}

#[test]
fn flags_are_written_only_when_set() {
    let mut doc = deployment();
    apply_deployment(&mut doc, &params(|_| {})).unwrap();
    let deployment = child(&doc, "deployment");
    assert_eq!(deployment.attribute("mapFileExtensions"), None);
    assert_eq!(deployment.attribute("trustURLParameters"), None);
    assert_eq!(deployment.attribute_ns(CLICKONCE_V1, "createDesktopShortcut"), None);

    let mut doc = self::deployment();
    apply_deployment(
        &mut doc,
        &params(|raw| {
            raw.map_file_extensions = true;
            raw.trust_url_parameters = true;
            raw.create_desktop_shortcut = true;
        }),
    )
    .unwrap();
    let deployment = child(&doc, "deployment");
    assert_eq!(deployment.attribute("mapFileExtensions"), Some("true"));
    assert_eq!(deployment.attribute("trustURLParameters"), Some("true"));
    assert_eq!(
        deployment.attribute_ns(CLICKONCE_V1, "createDesktopShortcut"),
        Some("true")
    );
}

#[test]
fn desktop_shortcut_declares_clickonce_namespace() {
    let mut doc = deployment();
    apply_deployment(&mut doc, &params(|raw| raw.create_desktop_shortcut = true)).unwrap();
    assert!(doc.to_xml_string().contains(
        r#"<deployment install="true" co.v1:createDesktopShortcut="true" xmlns:co.v1="urn:schemas-microsoft-com:clickonce.v1">"#
    ));
}

#[test]
fn disable_auto_update_removes_subscription() {
    let mut doc = deployment();
    apply_deployment(&mut doc, &params(|raw| raw.disable_auto_update = true)).unwrap();
    assert!(child(&doc, "deployment").children().is_empty());
    assert!(doc.to_xml_string().contains(r#"<deployment install="true" />"#));
}

#[test]
fn subscription_kept_when_updates_enabled() {
    let mut doc = deployment();
    apply_deployment(&mut doc, &params(|_| {})).unwrap();
    assert_eq!(child(&doc, "deployment").child_position_local("subscription"), Some(0));
}

#[test]
fn disable_auto_update_without_subscription_is_noop() {
    let mut doc = Document::parse(
        r#"<assembly xmlns="urn:schemas-microsoft-com:asm.v1"><deployment install="false" /></assembly>"#,
    )
    .unwrap();
    let before = doc.clone();
    apply_deployment(&mut doc, &params(|raw| raw.disable_auto_update = true)).unwrap();
    assert_eq!(doc, before);
}

#[test]
fn compatible_frameworks_follow_resolved_order() {
    let mut doc = deployment();
    apply_deployment(
        &mut doc,
        &params(|raw| raw.frameworks = vec!["4.6.1-full".to_string(), "4.0-client".to_string()]),
    )
    .unwrap();

    let frameworks: Vec<(&str, Option<&str>)> = child(&doc, "compatibleFrameworks")
        .elements()
        .map(|e| (e.attribute("targetVersion").unwrap(), e.attribute("profile")))
        .collect();
    assert_eq!(
        frameworks,
        [
            ("4.6.1", Some("Full")),
            ("4.0", Some("Client")),
            ("4.0", Some("Full")),
        ]
    );
    assert!(child(&doc, "compatibleFrameworks")
        .elements()
        .all(|e| e.is(CLICKONCE_V2, "framework")));
}

#[test]
fn compatible_frameworks_snapshot() {
    let mut doc = deployment();
    apply_deployment(
        &mut doc,
        &params(|raw| raw.frameworks = vec!["3.5".to_string(), "4.0-client".to_string()]),
    )
    .unwrap();

    let section = Document::new(child(&doc, "compatibleFrameworks").clone());
    insta::assert_snapshot!(section.to_xml_string(), @r#"
    <?xml version="1.0" encoding="utf-8"?>
    <compatibleFrameworks xmlns="urn:schemas-microsoft-com:clickonce.v2">
      <framework targetVersion="3.5" supportedRuntime="2.0.50727" />
      <framework targetVersion="4.0" profile="Client" supportedRuntime="4.0.30319" />
      <framework targetVersion="4.0" profile="Full" supportedRuntime="4.0.30319" />
    </compatibleFrameworks>
    "#);
}

#[test]
fn other_children_are_untouched() {
    let mut doc = deployment();
    let before = doc.clone();
    apply_deployment(&mut doc, &params(|_| {})).unwrap();

    let dependency = |d: &Document| child(d, "dependency").clone();
    assert_eq!(dependency(&doc), dependency(&before));
}

#[test]
fn missing_root_is_malformed() {
    let mut doc = Document::empty();
    let err = apply_deployment(&mut doc, &params(|_| {})).unwrap_err();
    assert!(matches!(err, PackageError::MalformedDeployment { .. }));
}
