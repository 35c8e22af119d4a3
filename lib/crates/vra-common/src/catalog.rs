//! Catalog service payloads: catalog item lookups, request templates and
//! request status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blueprint::FieldMap;

// ── Catalog lookups ──────────────────────────────────────────────────────────

/// One page of `GET catalog-service/api/consumer/entitledCatalogItemViews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogItemViewPage {
    #[serde(default)]
    pub content: Vec<CatalogItemView>,
    #[serde(default)]
    pub metadata: PageMetadata,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemView {
    pub catalog_item_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
}

/// Body of `GET catalog-service/api/consumer/entitledCatalogItems/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemEnvelope {
    pub catalog_item: CatalogItem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

// ── Request template ─────────────────────────────────────────────────────────

/// The default request payload of a catalog item, as returned by
/// `.../entitledCatalogItems/{id}/requests/template` and posted back to
/// `.../entitledCatalogItems/{id}/requests`.
///
/// Fields this crate does not interpret are carried through `extra`
/// untouched so the submitted body matches what the backend handed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTemplate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub catalog_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_group_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reasons: Option<String>,
    #[serde(default)]
    pub data: FieldMap,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response of a successful request submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedRequest {
    pub id: String,
}

// ── Request status ───────────────────────────────────────────────────────────

/// Backend-reported lifecycle phase of a catalog request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestPhase {
    Submitted,
    InProgress,
    Successful,
    Failed,
    /// Any phase this crate does not act on (`PENDING_PRE_APPROVAL`,
    /// `UNSUBMITTED`, ...), kept verbatim.
    Other(String),
}

impl RequestPhase {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for RequestPhase {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SUBMITTED" => Self::Submitted,
            "IN_PROGRESS" => Self::InProgress,
            "SUCCESSFUL" => Self::Successful,
            "FAILED" => Self::Failed,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for RequestPhase {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<RequestPhase> for String {
    fn from(phase: RequestPhase) -> Self {
        phase.as_str().to_string()
    }
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET catalog-service/api/consumer/requests/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusView {
    pub id: String,
    pub phase: RequestPhase,
    #[serde(default)]
    pub request_completion: Option<RequestCompletion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCompletion {
    #[serde(default)]
    pub completion_details: Option<String>,
}
