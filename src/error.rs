use thiserror::Error;

pub type HubResult<T> = Result<T, HubError>;

#[derive(Error, Debug)]
pub enum HubError {
    /// No HTTP client could be constructed in this environment.
    #[error("No usable HTTP transport: {0}")]
    TransportUnavailable(String),

    /// The request never produced a response.
    #[error("Network error requesting {url}: {message}")]
    Network { url: String, message: String },

    /// The API answered, but not with a 2xx status.
    #[error("GitHub API returned HTTP {status} for {url}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Selector error: {0}")]
    Selector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HubError {
    /// Failures that should leave a visible notice on the page.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, HubError::Network { .. } | HubError::Upstream { .. })
    }
}
