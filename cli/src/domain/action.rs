//! Resource action resolution.
//!
//! A provisioned request exposes its resources through resource views; each
//! resource lists the actions it supports as `rel`/`href` links. Resolving an
//! action means finding the link whose `rel` matches a known identifier.

use vra_common::ResourceViews;

/// `rel` of the deployment destroy action.
pub const DESTROY_ACTION: &str =
    "POST: {com.vmware.csp.component.cafe.composition@resource.action.deployment.destroy.name}";

/// `rel` of the machine power-off action.
pub const POWER_OFF_ACTION: &str =
    "POST: {com.vmware.csp.component.iaas.proxy.provider@resource.action.name.machine.PowerOff}";

/// Actions this tool knows how to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineAction {
    Destroy,
    PowerOff,
}

impl MachineAction {
    #[must_use]
    pub fn rel(self) -> &'static str {
        match self {
            Self::Destroy => DESTROY_ACTION,
            Self::PowerOff => POWER_OFF_ACTION,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Destroy => "destroy",
            Self::PowerOff => "power-off",
        }
    }
}

/// An action located in a resource view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAction {
    /// Resource that offers the action.
    pub resource_id: String,
    /// Action identifier, taken from the `actions/<id>` segment of the URL.
    pub action_id: String,
    /// URL to POST the action template to.
    pub url: String,
}

/// Find the action whose `rel` equals `rel` across every resource in `view`.
///
/// When more than one link matches, the last one scanned wins. Links whose
/// URL carries no `actions/<id>` segment cannot be invoked and are skipped.
#[must_use]
pub fn resolve_action(view: &ResourceViews, rel: &str) -> Option<ResolvedAction> {
    view.content
        .iter()
        .flat_map(|resource| {
            resource
                .links
                .iter()
                .filter(|link| link.rel == rel)
                .map(move |link| (resource, link))
        })
        .filter_map(|(resource, link)| {
            let action_id = action_id_from_url(&link.href)?;
            Some(ResolvedAction {
                resource_id: resource.resource_id.clone(),
                action_id,
                url: link.href.clone(),
            })
        })
        .last()
}

/// Extract `<id>` from `.../resources/<rid>/actions/<id>/requests`.
fn action_id_from_url(url: &str) -> Option<String> {
    let mut segments = url.split('/');
    segments.find(|s| *s == "actions")?;
    segments
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
