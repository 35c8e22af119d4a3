//! Template merge engine.
//!
//! Overlays user-supplied field values onto a catalog item's request
//! template. Resource-scoped overrides are keyed `"<container>.<field>"` and
//! land inside the matching nested component; deployment-scoped overrides
//! may only touch the template's `description` and `reasons`.
//!
//! Pure functions only. No I/O, no async.

use indexmap::IndexMap;
use vra_common::{FieldMap, FieldValue, RequestTemplate};

/// Deployment override that sets the request description.
pub const DEPLOYMENT_DESCRIPTION: &str = "description";
/// Deployment override that sets the request reasons.
pub const DEPLOYMENT_REASONS: &str = "reasons";

/// Replace every non-container field named `field` anywhere below `document`.
///
/// Container fields are descended into rather than replaced, so an override
/// can land at several depths when the same leaf name repeats. Returns the
/// number of leaves replaced.
pub fn merge_field(document: &mut FieldMap, field: &str, value: &FieldValue) -> usize {
    let mut replaced = 0;
    for (name, current) in document.iter_mut() {
        if let FieldValue::Container(inner) = current {
            replaced += merge_field(inner, field, value);
        } else if name == field {
            *current = value.clone();
            replaced += 1;
        }
    }
    replaced
}

/// Names of the top-level fields that are nested containers, longest first.
///
/// Equal lengths keep document order.
#[must_use]
pub fn container_keys(document: &FieldMap) -> Vec<String> {
    let mut keys: Vec<String> = document
        .iter()
        .filter(|(_, value)| value.is_container())
        .map(|(name, _)| name.clone())
        .collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()));
    keys
}

/// Write raw catalog-level fields straight into the top of the template data.
pub fn inject_catalog_configuration(
    template: &mut RequestTemplate,
    fields: &IndexMap<String, FieldValue>,
) {
    for (key, value) in fields {
        template.data.insert(key.clone(), value.clone());
    }
}

/// Apply resource- and deployment-scoped overrides to `template`.
///
/// Each resource override is matched against the first container whose name
/// occurs in the override key (longest names are tried first); the part of
/// the key after `"<container>."` names the field to replace. Keys that match
/// no container are dropped. Unknown deployment keys are logged and ignored.
#[must_use]
pub fn apply_overrides(
    mut template: RequestTemplate,
    resource_overrides: IndexMap<String, FieldValue>,
    deployment_overrides: &IndexMap<String, FieldValue>,
) -> RequestTemplate {
    let containers = container_keys(&template.data);
    tracing::debug!(?containers, "blueprint containers");

    for (key, value) in resource_overrides {
        apply_resource_override(&mut template.data, &containers, &key, &value);
    }

    for (key, value) in deployment_overrides {
        match key.as_str() {
            DEPLOYMENT_DESCRIPTION => template.description = Some(value.to_text()),
            DEPLOYMENT_REASONS => template.reasons = Some(value.to_text()),
            _ => tracing::warn!(
                key = %key,
                value = %value.to_text(),
                "unknown deployment option, ignoring"
            ),
        }
    }

    template
}

fn apply_resource_override(
    data: &mut FieldMap,
    containers: &[String],
    key: &str,
    value: &FieldValue,
) {
    let Some(container) = containers.iter().find(|c| key.contains(c.as_str())) else {
        tracing::debug!(key, "override matches no blueprint container, dropping");
        return;
    };
    let separator = format!("{container}.");
    let Some(field) = key.split(separator.as_str()).nth(1) else {
        tracing::debug!(key, container = %container, "override names no field, dropping");
        return;
    };
    if let Some(document) = data.get_mut(container).and_then(FieldValue::as_container_mut) {
        let replaced = merge_field(document, field, value);
        tracing::debug!(key, container = %container, field, replaced, "override applied");
    }
}
