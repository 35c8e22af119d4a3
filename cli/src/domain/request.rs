//! Provisioning request and its observed status.

use anyhow::Result;
use vra_common::{RequestPhase, RequestStatusView, RequestTemplate};

use crate::domain::error::ProvisionError;

/// A merged request template bound to its catalog item, ready to submit.
///
/// Built once per create and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionRequest {
    catalog_item_id: String,
    template: RequestTemplate,
}

impl ProvisionRequest {
    /// Bind `template` to `catalog_item_id`.
    ///
    /// The template's own `catalogItemId` is overwritten so the submitted
    /// body always names the item the request is posted to.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::MissingCatalog`] if the id is empty.
    pub fn new(catalog_item_id: impl Into<String>, mut template: RequestTemplate) -> Result<Self> {
        let catalog_item_id = catalog_item_id.into();
        if catalog_item_id.trim().is_empty() {
            return Err(ProvisionError::MissingCatalog.into());
        }
        template.catalog_item_id.clone_from(&catalog_item_id);
        Ok(Self {
            catalog_item_id,
            template,
        })
    }

    #[must_use]
    pub fn catalog_item_id(&self) -> &str {
        &self.catalog_item_id
    }

    #[must_use]
    pub fn template(&self) -> &RequestTemplate {
        &self.template
    }
}

/// Status of a submitted request as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStatus {
    pub id: String,
    pub phase: RequestPhase,
    /// Present when the backend reports why a request failed.
    pub completion_details: Option<String>,
}

impl From<RequestStatusView> for RequestStatus {
    fn from(view: RequestStatusView) -> Self {
        Self {
            id: view.id,
            phase: view.phase,
            completion_details: view.request_completion.and_then(|c| c.completion_details),
        }
    }
}
