use super::*;
use crate::infrastructure::fs::MemoryFs;

fn fs() -> MemoryFs {
    MemoryFs::new()
        .with_file("/build/App.exe", "MZ")
        .with_file("/build/app.ico", "icon")
        .with_file("/build/readme.txt", "text")
        .with_dir("/publish")
}

fn complete() -> RawParameters {
    RawParameters {
        application_name: Some("Example App".to_string()),
        exe_name: Some("App.exe".to_string()),
        version: Some("1.2.3.4".to_string()),
        from_directory: Some(PathBuf::from("/build")),
        to_directory: Some(PathBuf::from("/publish")),
        certificate_name: Some("Example Pty Ltd".to_string()),
        ..RawParameters::default()
    }
}

fn errors_of(raw: &RawParameters) -> Vec<ValidationError> {
    raw.validate(&fs()).unwrap_err().into_vec()
}

#[test]
fn complete_parameters_validate() {
    let params = complete().validate(&fs()).unwrap();

    assert_eq!(params.application_name(), "Example App");
    assert_eq!(params.exe_name(), "App.exe");
    assert_eq!(params.version(), "1.2.3.4");
    assert_eq!(
        params.signing(),
        &SigningIdentity::CommonName("Example Pty Ltd".to_string())
    );
    assert_eq!(params.timestamp_url(), DEFAULT_TIMESTAMP_URL);
    assert_eq!(params.processor_architecture(), ProcessorArchitecture::Msil);
    assert_eq!(params.frameworks(), [TargetFramework::V35]);
    assert!(params.groups().is_empty());
}

#[test]
fn derived_paths_follow_to_version_and_exe() {
    let params = complete().validate(&fs()).unwrap();
    let paths = params.paths();

    assert_eq!(paths.manifest_dir, PathBuf::from("/publish/1.2.3.4"));
    assert_eq!(paths.manifest_file_name, "App.exe.manifest");
    assert_eq!(
        paths.manifest_path,
        PathBuf::from("/publish/1.2.3.4/App.exe.manifest")
    );
    assert_eq!(paths.deployment_file_name, "App.application");
    assert_eq!(paths.deployment_path, PathBuf::from("/publish/App.application"));
}

#[test]
fn derive_without_extension_keeps_name() {
    let paths = DerivedPaths::derive(Path::new("/out"), "1.0", "tool");
    assert_eq!(paths.deployment_file_name, "tool.application");
    assert_eq!(paths.manifest_file_name, "tool.manifest");
}

#[test]
fn every_missing_field_is_reported() {
    let errors = errors_of(&RawParameters {
        certificate_name: Some("X".to_string()),
        ..RawParameters::default()
    });

    assert_eq!(
        errors,
        vec![
            ValidationError::Missing(RequiredField::ApplicationName),
            ValidationError::Missing(RequiredField::ExeName),
            ValidationError::Missing(RequiredField::Version),
            ValidationError::Missing(RequiredField::FromDirectory),
            ValidationError::Missing(RequiredField::ToDirectory),
        ]
    );
}

#[test]
fn blank_values_count_as_missing() {
    let mut raw = complete();
    raw.application_name = Some("   ".to_string());
    assert_eq!(
        errors_of(&raw),
        vec![ValidationError::Missing(RequiredField::ApplicationName)]
    );
}

#[test]
fn missing_from_directory_still_collects_other_errors() {
    let mut raw = complete();
    raw.from_directory = None;
    raw.certificate_name = None;
    raw.desktop_icon_file = Some("app.png".to_string());
    raw.extra_arguments = vec!["stray".to_string()];

    assert_eq!(
        errors_of(&raw),
        vec![
            ValidationError::Missing(RequiredField::FromDirectory),
            ValidationError::MissingSigningIdentity,
            ValidationError::IconNotIco,
            ValidationError::UnknownArgument("stray".to_string()),
        ]
    );
}

#[test]
fn from_directory_must_exist() {
    let mut raw = complete();
    raw.from_directory = Some(PathBuf::from("/nowhere"));
    assert_eq!(
        errors_of(&raw),
        vec![ValidationError::FromDirectoryNotFound(PathBuf::from("/nowhere"))]
    );
}

#[test]
fn hash_wins_over_certificate_name() {
    let mut raw = complete();
    raw.certificate_hash = Some("ab cd".to_string());
    let params = raw.validate(&fs()).unwrap();
    assert_eq!(params.signing(), &SigningIdentity::Hash(CertHash::verbatim("ab cd")));
}

#[test]
fn signing_identity_required() {
    let mut raw = complete();
    raw.certificate_name = Some(String::new());
    assert_eq!(errors_of(&raw), vec![ValidationError::MissingSigningIdentity]);
}

#[test]
fn icon_in_from_directory_is_accepted() {
    let mut raw = complete();
    raw.desktop_icon_file = Some("app.ico".to_string());
    let params = raw.validate(&fs()).unwrap();
    assert_eq!(params.desktop_icon_file(), Some("app.ico"));
}

#[test]
fn icon_extension_is_case_insensitive() {
    let fs = fs().with_file("/build/APP.ICO", "icon");
    let mut raw = complete();
    raw.desktop_icon_file = Some("APP.ICO".to_string());
    assert!(raw.validate(&fs).is_ok());
}

#[test]
fn icon_with_directory_is_rejected() {
    let mut raw = complete();
    raw.desktop_icon_file = Some("icons/app.ico".to_string());
    assert_eq!(errors_of(&raw), vec![ValidationError::IconHasDirectory]);
}

#[test]
fn icon_missing_and_wrong_extension_are_separate_errors() {
    let mut raw = complete();
    raw.desktop_icon_file = Some("logo.png".to_string());
    assert_eq!(
        errors_of(&raw),
        vec![
            ValidationError::IconNotFound(PathBuf::from("/build/logo.png")),
            ValidationError::IconNotIco,
        ]
    );
}

#[test]
fn unknown_frameworks_reported_with_hint() {
    let mut raw = complete();
    raw.frameworks = vec!["2.0".to_string(), "4.0-full".to_string(), "9".to_string()];
    assert_eq!(
        errors_of(&raw),
        vec![
            ValidationError::UnknownFramework("2.0".to_string()),
            ValidationError::UnknownFramework("9".to_string()),
            ValidationError::ValidFrameworks(TargetFramework::valid_identifiers()),
        ]
    );
}

#[test]
fn client_framework_implies_full() {
    let mut raw = complete();
    raw.frameworks = vec!["4.0-client".to_string()];
    let params = raw.validate(&fs()).unwrap();
    assert_eq!(
        params.frameworks(),
        [TargetFramework::V40Client, TargetFramework::V40Full]
    );
}

#[test]
fn group_arguments_are_parsed() {
    let mut raw = complete();
    raw.groups = vec!["Help:help.chm".to_string(), "Help,manual.pdf".to_string()];
    let params = raw.validate(&fs()).unwrap();

    let group = params.groups().iter().next().unwrap();
    assert_eq!(group.name(), "Help");
    assert_eq!(group.files(), ["help.chm", "manual.pdf"]);
}

#[test]
fn malformed_group_argument_is_an_error() {
    let mut raw = complete();
    raw.groups = vec!["help.chm".to_string()];
    assert_eq!(
        errors_of(&raw),
        vec![ValidationError::InvalidGroup("help.chm".to_string())]
    );
}

#[test]
fn processor_architecture_is_checked() {
    let mut raw = complete();
    raw.processor_architecture = Some("X86".to_string());
    assert_eq!(
        raw.validate(&fs()).unwrap().processor_architecture(),
        ProcessorArchitecture::X86
    );

    raw.processor_architecture = Some("sparc".to_string());
    assert_eq!(
        errors_of(&raw),
        vec![ValidationError::UnknownProcessor("sparc".to_string())]
    );
}

#[test]
fn every_extra_argument_is_reported() {
    let mut raw = complete();
    raw.extra_arguments = vec!["one".to_string(), "two".to_string()];
    assert_eq!(
        errors_of(&raw),
        vec![
            ValidationError::UnknownArgument("one".to_string()),
            ValidationError::UnknownArgument("two".to_string()),
        ]
    );
}

#[test]
fn report_refuses_paths_while_errors_pending() {
    let mut raw = complete();
    raw.version = None;
    let report = raw.check(&fs());

    assert!(report.has_errors());
    assert!(matches!(report.derive_paths(), Err(PackageError::InvalidState)));
}

#[test]
fn report_paths_match_validated_paths() {
    let report = complete().check(&fs());
    let from_report = report.derive_paths().unwrap();
    let params = report.into_result().unwrap();
    assert_eq!(&from_report, params.paths());
}

#[test]
fn optional_strings_are_normalised() {
    let mut raw = complete();
    raw.publisher = Some(" ".to_string());
    raw.product = Some("Suite".to_string());
    raw.timestamp_url = Some("http://ts.example.com".to_string());
    let params = raw.validate(&fs()).unwrap();

    assert_eq!(params.publisher(), None);
    assert_eq!(params.product(), Some("Suite"));
    assert_eq!(params.timestamp_url(), "http://ts.example.com");
}
