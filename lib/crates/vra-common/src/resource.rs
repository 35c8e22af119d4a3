//! Resource views and action templates used to act on provisioned machines.

use serde::{Deserialize, Serialize};

/// Body of `GET catalog-service/api/consumer/requests/{id}/resourceViews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceViews {
    #[serde(default)]
    pub content: Vec<ResourceView>,
}

/// One resource provisioned by a request, with the actions it offers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceView {
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub links: Vec<ResourceLink>,
}

/// An available action: `rel` identifies it, `href` is where to POST.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceLink {
    pub rel: String,
    pub href: String,
}

/// Request body needed to invoke a resource action, fetched from
/// `.../resources/{rid}/actions/{aid}/requests/template`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTemplate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub resource_id: String,
    pub action_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
