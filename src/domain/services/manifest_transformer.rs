//! Manifest Transformer
//!
//! Edits the application manifest written by the descriptor generator:
//! icon association, runtime version and optional download groups.

use tracing::debug;

use crate::domain::entities::{same_file_name, DeploymentParameters, GroupAssignments};
use crate::domain::value_objects::TargetFramework;
use crate::error::{PackageError, PackageResult};
use crate::xml::namespaces::{ASM_V1, ASM_V2};
use crate::xml::{Document, Element};

const RUNTIME_ASSEMBLY: &str = "Microsoft.Windows.CommonLanguageRuntime";
const RUNTIME_V2: &str = "2.0.50727.0";
const RUNTIME_V4: &str = "4.0.30319.0";

/// Apply icon, runtime and group edits, in that order
pub fn apply_manifest(doc: &mut Document, params: &DeploymentParameters) -> PackageResult<()> {
    let root = doc.root_mut().ok_or_else(|| malformed("document has no root element"))?;

    if let Some(icon) = params.desktop_icon_file() {
        associate_icon(root, icon)?;
    }
    set_runtime_version(root, params.frameworks());
    assign_groups(root, params.groups())
}

fn associate_icon(root: &mut Element, icon: &str) -> PackageResult<()> {
    let is_assembly = root.is(ASM_V1, "assembly");
    if is_assembly && root.child(ASM_V1, "description").is_some() {
        debug!("manifest already has a description, icon left alone");
        return Ok(());
    }

    let identity = is_assembly
        .then(|| root.child_position(ASM_V1, "assemblyIdentity"))
        .flatten()
        .ok_or_else(|| malformed("assemblyIdentity element not found"))?;

    let description = Element::new_ns(ASM_V1, "description")
        .with_prefix(Some("asmv1"))
        .with_attribute_ns(ASM_V2, "iconFile", icon);
    root.insert_child(identity + 1, description);
    debug!(icon, "added icon description");
    Ok(())
}

fn set_runtime_version(root: &mut Element, frameworks: &[TargetFramework]) {
    let version = if frameworks.contains(&TargetFramework::V35) {
        RUNTIME_V2
    } else {
        RUNTIME_V4
    };

    let runtime = root.find_descendant_mut(|e| {
        e.is(ASM_V2, "assemblyIdentity") && e.attribute("name") == Some(RUNTIME_ASSEMBLY)
    });
    match runtime {
        Some(runtime) => {
            runtime.set_attribute("version", version);
            debug!(version, "set runtime version");
        }
        None => debug!("manifest has no runtime reference"),
    }
}

fn assign_groups(root: &mut Element, groups: &GroupAssignments) -> PackageResult<()> {
    if groups.is_empty() {
        return Ok(());
    }

    let mut outstanding = groups.all_files();
    root.visit_mut(&mut |element| {
        let mut has_optional_dependency = false;
        for child in element.elements_mut() {
            if !child.is(ASM_V2, "dependentAssembly") {
                continue;
            }
            let Some(codebase) = non_empty_attribute(child, "codebase") else {
                continue;
            };
            if tag_group(child, &codebase, groups, &mut outstanding) {
                has_optional_dependency = true;
            }
        }
        if has_optional_dependency {
            element.set_attribute("optional", "true");
        }

        if element.is(ASM_V2, "file") {
            if let Some(name) = non_empty_attribute(element, "name") {
                if tag_group(element, &name, groups, &mut outstanding) {
                    element.set_attribute("optional", "true");
                }
            }
        }
    });

    if outstanding.is_empty() {
        Ok(())
    } else {
        Err(PackageError::UnassignedGroupFile {
            files: outstanding.into_iter().map(str::to_string).collect(),
        })
    }
}

/// Tag `element` with every group listing `file_name`; the last one wins.
fn tag_group<'g>(
    element: &mut Element,
    file_name: &str,
    groups: &'g GroupAssignments,
    outstanding: &mut Vec<&'g str>,
) -> bool {
    let mut matched = false;
    for group in groups.iter() {
        if let Some(assigned) = group.matching_file(file_name) {
            element.set_attribute("group", group.name());
            outstanding.retain(|f| !same_file_name(f, assigned));
            debug!(file = file_name, group = group.name(), "assigned to group");
            matched = true;
        }
    }
    matched
}

fn non_empty_attribute(element: &Element, name: &str) -> Option<String> {
    element
        .attribute(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn malformed(reason: &str) -> PackageError {
    PackageError::MalformedManifest {
        reason: reason.to_string(),
    }
}
