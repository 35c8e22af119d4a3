//! Wire types shared between the vra7 core and its REST gateway.

pub mod auth;
pub mod blueprint;
pub mod catalog;
pub mod error;
pub mod resource;

pub use auth::{TokenRequest, TokenResponse};
pub use blueprint::{FieldMap, FieldValue};
pub use catalog::{
    CatalogItem, CatalogItemEnvelope, CatalogItemView, CatalogItemViewPage, PageMetadata,
    RequestCompletion, RequestPhase, RequestStatusView, RequestTemplate, SubmittedRequest,
};
pub use error::{ApiError, ApiErrorEntry};
pub use resource::{ActionTemplate, ResourceLink, ResourceView, ResourceViews};
