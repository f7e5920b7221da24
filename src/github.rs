use crate::error::{HubError, HubResult};
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Query parameters for `/users/{username}/repos`.
///
/// Values are forwarded verbatim. GitHub accepts `type` in
/// {all, public, private, forks, sources, member, internal}, `sort` in
/// {full_name, created, updated, pushed} and `direction` in {asc, desc};
/// anything else is left for the API to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoQuery {
    pub kind: String,
    pub sort: String,
    pub direction: String,
    pub per_page: u32,
    pub page: u32,
}

impl Default for RepoQuery {
    fn default() -> Self {
        Self {
            kind: "public".to_string(),
            sort: "updated".to_string(),
            direction: "desc".to_string(),
            per_page: 10,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Emojis,
    User { username: String },
    Repos { username: String, query: RepoQuery },
}

impl Endpoint {
    /// Absolute URL under `api_url`. Plain substitution, nothing is encoded.
    pub fn url(&self, api_url: &str) -> String {
        match self {
            Endpoint::Emojis => format!("{api_url}/emojis"),
            Endpoint::User { username } => format!("{api_url}/users/{username}"),
            Endpoint::Repos { username, query } => format!(
                "{api_url}/users/{username}/repos?type={}&sort={}&direction={}&per_page={}&page={}",
                query.kind, query.sort, query.direction, query.per_page, query.page
            ),
        }
    }
}

/// A successful response body, not yet decoded.
#[derive(Debug, Clone)]
pub struct Payload {
    pub url: String,
    pub body: String,
}

impl Payload {
    pub fn decode<T: DeserializeOwned>(&self) -> HubResult<T> {
        serde_json::from_str(&self.body).map_err(|source| HubError::Decode {
            url: self.url.clone(),
            source,
        })
    }
}

#[derive(Clone)]
pub struct GithubClient {
    api_url: Arc<String>,
    transport: Arc<dyn Transport>,
}

impl GithubClient {
    pub fn new(api_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            api_url: Arc::new(api_url.trim_end_matches('/').to_string()),
            transport,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issue the GET for `endpoint`. Only a complete 2xx response counts as
    /// success; anything else becomes `HubError::Upstream`.
    pub async fn fetch(&self, endpoint: &Endpoint) -> HubResult<Payload> {
        let url = endpoint.url(&self.api_url);
        let resp = self.transport.get(&url).await?;

        if !resp.is_success() {
            debug!(%url, status = resp.status, "non-success response");
            return Err(HubError::Upstream {
                url,
                status: resp.status,
                body: resp.body,
            });
        }

        Ok(Payload {
            url,
            body: resp.body,
        })
    }
}
