//! Deployment Transformer
//!
//! Edits the deployment descriptor: product name, install flags, the update
//! subscription and the advertised compatible frameworks.

use tracing::debug;

use crate::domain::entities::DeploymentParameters;
use crate::domain::value_objects::TargetFramework;
use crate::error::{PackageError, PackageResult};
use crate::xml::namespaces::{ASM_V2, CLICKONCE_V1, CLICKONCE_V2};
use crate::xml::{Document, Element};

/// Single pass over the root's child elements, dispatching on local name
pub fn apply_deployment(doc: &mut Document, params: &DeploymentParameters) -> PackageResult<()> {
    let root = doc
        .root_mut()
        .ok_or_else(|| PackageError::MalformedDeployment {
            reason: "document has no root element".to_string(),
        })?;

    for child in root.elements_mut() {
        let name = child.name().to_string();
        match name.as_str() {
            "description" => set_product(child, params.product()),
            "deployment" => set_deployment_options(child, params),
            "compatibleFrameworks" => write_frameworks(child, params.frameworks()),
            _ => {}
        }
    }
    Ok(())
}

fn set_product(description: &mut Element, product: Option<&str>) {
    if let Some(product) = product {
        description.set_attribute_ns(ASM_V2, "product", product);
        debug!(product, "set product name");
    }
}

fn set_deployment_options(deployment: &mut Element, params: &DeploymentParameters) {
    if params.map_file_extensions() {
        deployment.set_attribute("mapFileExtensions", "true");
    }
    if params.trust_url_parameters() {
        deployment.set_attribute("trustURLParameters", "true");
    }
    if params.create_desktop_shortcut() {
        deployment.set_attribute_ns(CLICKONCE_V1, "createDesktopShortcut", "true");
    }
    if params.disable_auto_update() {
        if let Some(index) = deployment.child_position_local("subscription") {
            deployment.remove_child(index);
            debug!("removed update subscription");
        }
    }
}

fn write_frameworks(compatible: &mut Element, frameworks: &[TargetFramework]) {
    compatible.clear_children();
    for framework in frameworks {
        let runtime = framework.runtime();
        let mut element = Element::new_ns(CLICKONCE_V2, "framework")
            .with_attribute("targetVersion", runtime.target_version);
        if let Some(profile) = runtime.profile {
            element.set_attribute("profile", profile);
        }
        element.set_attribute("supportedRuntime", runtime.supported_runtime);
        compatible.append_child(element);
    }
    debug!(count = frameworks.len(), "wrote compatible frameworks");
}

#[cfg(test)]
mod tests;
