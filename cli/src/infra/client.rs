//! Infrastructure implementation of the gateway ports over the vRA REST API.
//!
//! `VraClient` talks to the identity and catalog services with a blocking
//! `ureq` agent. Each port call runs on tokio's blocking pool, the same way
//! `StateManager` does its file I/O.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use vra_common::{
    ActionTemplate, ApiError, CatalogItemEnvelope, CatalogItemViewPage, RequestStatusView,
    RequestTemplate, ResourceViews, SubmittedRequest, TokenRequest, TokenResponse,
};

use crate::application::ports::{CatalogReader, RequestTracker, ResourceActions};
use crate::domain::{ConnectionConfig, ProvisionRequest, RequestStatus};

/// Per-request timeout for every API call.
pub const API_TIMEOUT: Duration = Duration::from_secs(60);

/// Page size used when scanning entitled catalog items.
const CATALOG_PAGE_LIMIT: u32 = 100;

const CONSUMER_API: &str = "catalog-service/api/consumer";

// ── Session ──────────────────────────────────────────────────────────────────

/// An authenticated session with one vRA appliance.
pub struct Session {
    base_url: String,
    tenant: String,
    bearer_token: String,
}

impl Session {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.bearer_token)
    }

    /// Absolute URLs (action links) pass through; paths join the base URL.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path.trim_start_matches('/'))
        }
    }
}

/// Ensure the base URL is absolute and ends with exactly one `/`.
///
/// # Errors
///
/// Returns an error if the host is not an `http(s)` URL.
pub fn normalize_base_url(host: &str) -> Result<String> {
    let host = host.trim();
    anyhow::ensure!(
        host.starts_with("http://") || host.starts_with("https://"),
        "VRA7_HOST must be an http(s) URL, got '{host}'"
    );
    Ok(format!("{}/", host.trim_end_matches('/')))
}

// ── Client ───────────────────────────────────────────────────────────────────

/// Production gateway: implements every gateway port against a live vRA.
#[derive(Clone)]
pub struct VraClient {
    agent: ureq::Agent,
    session: Arc<Session>,
}

impl VraClient {
    /// Authenticate against `identity/api/tokens` and return a ready client.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is invalid or authentication fails.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let config = config.clone();
        tokio::task::spawn_blocking(move || Self::connect_blocking(&config))
            .await
            .context("authentication task panicked")?
    }

    fn connect_blocking(config: &ConnectionConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.host)?;
        let agent = ureq::AgentBuilder::new().timeout(API_TIMEOUT).build();

        let body = TokenRequest {
            username: config.username.clone(),
            password: config.password.clone(),
            tenant: config.tenant.clone(),
        };
        let url = format!("{base_url}identity/api/tokens");
        let token: TokenResponse = agent
            .post(&url)
            .set("Accept", "application/json")
            .send_json(&body)
            .map_err(|e| api_failure(e, "authentication failed"))?
            .into_json()
            .context("decoding token response")?;
        anyhow::ensure!(!token.id.is_empty(), "authentication returned an empty token");
        tracing::debug!(
            tenant = %config.tenant,
            expires = token.expires.as_deref().unwrap_or("unknown"),
            "authenticated"
        );

        Ok(Self {
            agent,
            session: Arc::new(Session {
                base_url,
                tenant: config.tenant.clone(),
                bearer_token: token.id,
            }),
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.session.url(path);
        tracing::debug!(%url, "GET");
        self.agent
            .get(&url)
            .set("Authorization", &self.session.authorization())
            .set("Accept", "application/json")
            .call()
            .map_err(|e| api_failure(e, &format!("GET {url}")))?
            .into_json()
            .with_context(|| format!("decoding response of GET {url}"))
    }

    /// GET that reports a 404 as `None` instead of an error.
    fn get_if_found<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.session.url(path);
        tracing::debug!(%url, "GET");
        let result = self
            .agent
            .get(&url)
            .set("Authorization", &self.session.authorization())
            .set("Accept", "application/json")
            .call();
        match result {
            Ok(response) => response
                .into_json()
                .map(Some)
                .with_context(|| format!("decoding response of GET {url}")),
            Err(ureq::Error::Status(404, _)) => {
                tracing::debug!(%url, "not found");
                Ok(None)
            }
            Err(other) => Err(api_failure(other, &format!("GET {url}"))),
        }
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.session.url(path);
        tracing::debug!(%url, "POST");
        self.agent
            .post(&url)
            .set("Authorization", &self.session.authorization())
            .set("Accept", "application/json")
            .send_json(body)
            .map_err(|e| api_failure(e, &format!("POST {url}")))?
            .into_json()
            .with_context(|| format!("decoding response of POST {url}"))
    }

    /// POST and report the HTTP status instead of decoding a body.
    ///
    /// Error statuses without a structured payload are returned as `Ok` so
    /// the caller decides what they mean.
    fn post_for_status<B: Serialize>(&self, url: &str, body: &B) -> Result<u16> {
        let url = self.session.url(url);
        tracing::debug!(%url, "POST");
        let result = self
            .agent
            .post(&url)
            .set("Authorization", &self.session.authorization())
            .set("Accept", "application/json")
            .send_json(body);
        match result {
            Ok(response) => Ok(response.status()),
            Err(ureq::Error::Status(code, response)) => match response.into_string() {
                Ok(body) => match ApiError::from_body(&body) {
                    Some(api) => Err(anyhow::Error::new(api)),
                    None => Ok(code),
                },
                Err(e) => Err(unreadable_body(&format!("POST {url}"), code, &e)),
            },
            Err(other) => Err(api_failure(other, &format!("POST {url}"))),
        }
    }

    fn find_catalog_id(&self, name: &str) -> Result<Option<String>> {
        let mut page = 1;
        loop {
            let path = format!(
                "{CONSUMER_API}/entitledCatalogItemViews?page={page}&limit={CATALOG_PAGE_LIMIT}"
            );
            let views: CatalogItemViewPage = self.get(&path)?;
            if let Some(item) = views.content.iter().find(|item| item.name == name) {
                return Ok(Some(item.catalog_item_id.clone()));
            }
            if page >= views.metadata.total_pages {
                return Ok(None);
            }
            page += 1;
        }
    }

    fn find_catalog_name(&self, id: &str) -> Result<Option<String>> {
        let envelope: Option<CatalogItemEnvelope> =
            self.get_if_found(&format!("{CONSUMER_API}/entitledCatalogItems/{id}"))?;
        Ok(envelope
            .map(|envelope| envelope.catalog_item.name)
            .filter(|name| !name.is_empty()))
    }

    /// Run a blocking API call on tokio's blocking pool.
    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(VraClient) -> Result<T> + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || op(client))
            .await
            .context("API task panicked")?
    }
}

/// Turn a `ureq` failure into an error, preferring the backend's structured
/// payload when it sent one.
fn api_failure(err: ureq::Error, what: &str) -> anyhow::Error {
    match err {
        ureq::Error::Status(code, response) => status_failure(what, code, response.into_string()),
        ureq::Error::Transport(transport) => anyhow::anyhow!("{what}: {transport}"),
    }
}

fn status_failure(what: &str, code: u16, body: std::io::Result<String>) -> anyhow::Error {
    match body {
        Ok(body) => match ApiError::from_body(&body) {
            Some(api) => anyhow::Error::new(api).context(what.to_string()),
            None => anyhow::anyhow!("{what}: HTTP {code}"),
        },
        Err(e) => unreadable_body(what, code, &e),
    }
}

fn unreadable_body(what: &str, code: u16, err: &std::io::Error) -> anyhow::Error {
    anyhow::anyhow!("{what}: HTTP {code} (body unreadable: {err})")
}

// ── Port implementations ─────────────────────────────────────────────────────

impl CatalogReader for VraClient {
    async fn lookup_catalog_id(&self, name: &str) -> Result<Option<String>> {
        let name = name.to_string();
        self.blocking(move |c| c.find_catalog_id(&name)).await
    }

    async fn lookup_catalog_name(&self, id: &str) -> Result<Option<String>> {
        let id = id.to_string();
        self.blocking(move |c| c.find_catalog_name(&id)).await
    }

    async fn fetch_blueprint(&self, catalog_item_id: &str) -> Result<RequestTemplate> {
        let path = format!("{CONSUMER_API}/entitledCatalogItems/{catalog_item_id}/requests/template");
        self.blocking(move |c| c.get(&path)).await
    }
}

impl RequestTracker for VraClient {
    async fn submit_request(&self, request: &ProvisionRequest) -> Result<String> {
        let path = format!(
            "{CONSUMER_API}/entitledCatalogItems/{}/requests",
            request.catalog_item_id()
        );
        let body = request.template().clone();
        let submitted: SubmittedRequest = self.blocking(move |c| c.post(&path, &body)).await?;
        anyhow::ensure!(!submitted.id.is_empty(), "backend returned an empty request id");
        Ok(submitted.id)
    }

    async fn fetch_request_status(&self, request_id: &str) -> Result<RequestStatus> {
        let path = format!("{CONSUMER_API}/requests/{request_id}");
        let view: RequestStatusView = self.blocking(move |c| c.get(&path)).await?;
        Ok(RequestStatus::from(view))
    }
}

impl ResourceActions for VraClient {
    async fn fetch_resource_view(&self, request_id: &str) -> Result<ResourceViews> {
        let path = format!("{CONSUMER_API}/requests/{request_id}/resourceViews");
        self.blocking(move |c| c.get(&path)).await
    }

    async fn fetch_action_template(
        &self,
        resource_id: &str,
        action_id: &str,
    ) -> Result<ActionTemplate> {
        let path =
            format!("{CONSUMER_API}/resources/{resource_id}/actions/{action_id}/requests/template");
        self.blocking(move |c| c.get(&path)).await
    }

    async fn invoke_action(&self, url: &str, template: &ActionTemplate) -> Result<u16> {
        let url = url.to_string();
        let body = template.clone();
        self.blocking(move |c| c.post_for_status(&url, &body)).await
    }
}
