//! Transport seam between a `Fetcher` and the network.
//!
//! `Transport` abstracts request execution so the activation lifecycle can be
//! driven by `ReqwestTransport` in production and by `MockTransport` in tests,
//! where responses can be delayed until a trigger fires.

mod mock;

pub use mock::{MockTransport, ResponseTrigger};

use async_trait::async_trait;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpResponse, RequestDescriptor};

/// Executes a single HTTP request.
///
/// Implementations must not interpret the status code: a 404 or 500 is a
/// successful round-trip and comes back as `Ok(HttpResponse)`. Only failures
/// that prevent a response from arriving map to `FetchError::Network`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<HttpResponse, FetchError>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    async fn send(&self, request: &RequestDescriptor) -> Result<HttpResponse, FetchError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method()), request.url());

        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.encoded_body() {
            tracing::trace!(body_len = body.len(), "Attached request body");
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = FetchError::from(e);
            tracing::error!(error = %err, "HTTP request failed");
            err
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, response_len = body.len(), "HTTP request completed");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_map_one_to_one() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest_method(HttpMethod::Put), reqwest::Method::PUT);
        assert_eq!(to_reqwest_method(HttpMethod::Patch), reqwest::Method::PATCH);
        assert_eq!(to_reqwest_method(HttpMethod::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn builds_from_config() {
        assert!(ReqwestTransport::new(&FetchConfig::default()).is_ok());
    }
}
