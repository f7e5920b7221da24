//! HTTP transport used by the endpoint callers.

use crate::config::Config;
use crate::error::{HubError, HubResult};
use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::debug;

/// A completed request: status plus the raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one asynchronous GET and resolves once the response is complete.
///
/// `Err` means no response arrived at all. Any status, including 4xx/5xx,
/// comes back as `Ok` so the caller decides what counts as success.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> HubResult<HttpResponse>;
}

pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> HubResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
                HubError::Config(format!("invalid user agent {:?}: {e}", config.user_agent))
            })?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| HubError::TransportUnavailable(e.to_string()))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> HubResult<HttpResponse> {
        debug!(%url, "GET");

        let network = |e: reqwest::Error| HubError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let resp = self.http.get(url).send().await.map_err(network)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(network)?;

        debug!(%url, status, bytes = body.len(), "response complete");
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(304, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
        assert!(!HttpResponse::new(503, "").is_success());
    }

    #[test]
    fn test_invalid_user_agent_is_config_error() {
        let config = Config {
            user_agent: "bad\nagent".to_string(),
            ..Config::default()
        };
        let err = ReqwestTransport::new(&config).err().unwrap();
        assert!(matches!(err, HubError::Config(_)));
    }

    #[test]
    fn test_default_config_builds_transport() {
        assert!(ReqwestTransport::new(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/emojis"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"+1":"u"}"#))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(&Config::default()).unwrap();
        let resp = transport
            .get(&format!("{}/emojis", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(resp, HttpResponse::new(200, r#"{"+1":"u"}"#));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(&Config::default()).unwrap();
        let resp = transport
            .get(&format!("{}/users/ghost", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let transport = ReqwestTransport::new(&Config::default()).unwrap();
        let err = transport.get("http://127.0.0.1:1/emojis").await.unwrap_err();
        assert!(matches!(err, HubError::Network { .. }));
    }
}
