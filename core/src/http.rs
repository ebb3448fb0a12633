//! HTTP request and response types described as plain data.
//!
//! # Design
//! A `RequestDescriptor` says what to send; a `Transport` decides how. The
//! descriptor holds no client handles and no I/O state, so callers and tests
//! can build and inspect it freely, and `MockTransport` can key canned
//! responses on its method and URL.
//!
//! Descriptors are immutable once built: fields are private and the builder
//! methods consume `self`.

use std::fmt;

use reqwest::header::{HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use crate::error::FetchError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request to perform, described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// A POST carrying `payload` as a JSON body with the matching
    /// `content-type` header.
    pub fn post_json<T: Serialize>(url: impl Into<String>, payload: &T) -> Result<Self, FetchError> {
        let body = serde_json::to_value(payload).map_err(|e| FetchError::Serialization(e.to_string()))?;
        Ok(Self::new(HttpMethod::Post, url).with_json_body(body))
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body. Adds `content-type: application/json` unless the
    /// caller already set a content type.
    pub fn with_json_body(mut self, body: Value) -> Self {
        let has_content_type = self
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
        if !has_content_type {
            self.headers
                .push(("content-type".to_string(), "application/json".to_string()));
        }
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The body as it goes over the wire.
    pub fn encoded_body(&self) -> Option<String> {
        self.body.as_ref().map(Value::to_string)
    }

    /// Check the descriptor before any I/O happens.
    ///
    /// Rejects an empty URL, anything that is not an absolute `http`/`https`
    /// URL, and header names or values that cannot go on the wire.
    pub fn validate(&self) -> Result<(), FetchError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(FetchError::Configuration("request URL is empty".to_string()));
        }
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| FetchError::Configuration(format!("invalid request URL '{url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::Configuration(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }
        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::Configuration(format!("invalid header name '{name}'")))?;
            HeaderValue::from_str(value).map_err(|_| {
                FetchError::Configuration(format!("invalid value for header '{name}'"))
            })?;
        }
        Ok(())
    }
}

/// An HTTP response described as plain data, as returned by a `Transport`.
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_has_no_body_or_headers() {
        let req = RequestDescriptor::get("https://example.com/users");
        assert_eq!(req.method(), HttpMethod::Get);
        assert_eq!(req.url(), "https://example.com/users");
        assert!(req.headers().is_empty());
        assert!(req.body().is_none());
        assert!(req.encoded_body().is_none());
    }

    #[test]
    fn post_json_sets_content_type_and_body() {
        let req = RequestDescriptor::post_json("https://example.com/posts", &json!({"title": "t"})).unwrap();
        assert_eq!(req.method(), HttpMethod::Post);
        assert_eq!(
            req.headers(),
            &[("content-type".to_string(), "application/json".to_string())]
        );
        let wire: Value = serde_json::from_str(&req.encoded_body().unwrap()).unwrap();
        assert_eq!(wire, json!({"title": "t"}));
    }

    #[test]
    fn explicit_content_type_is_not_duplicated() {
        let req = RequestDescriptor::new(HttpMethod::Put, "https://example.com/posts/1")
            .with_header("Content-Type", "application/merge-patch+json")
            .with_json_body(json!({}));
        assert_eq!(req.headers().len(), 1);
        assert_eq!(req.headers()[0].1, "application/merge-patch+json");
    }

    #[test]
    fn validate_accepts_absolute_http_url() {
        let req = RequestDescriptor::get("http://localhost:3000/todos").with_header("accept", "application/json");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_url() {
        for url in ["", "   "] {
            let err = RequestDescriptor::get(url).validate().unwrap_err();
            assert_eq!(err, FetchError::Configuration("request URL is empty".to_string()));
        }
    }

    #[test]
    fn validate_rejects_relative_url() {
        let err = RequestDescriptor::get("/users").validate().unwrap_err();
        assert!(matches!(err, FetchError::Configuration(_)));
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let err = RequestDescriptor::get("ftp://example.com/users").validate().unwrap_err();
        assert_eq!(err, FetchError::Configuration("unsupported URL scheme 'ftp'".to_string()));
    }

    #[test]
    fn validate_rejects_bad_headers() {
        let err = RequestDescriptor::get("https://example.com")
            .with_header("", "x")
            .validate()
            .unwrap_err();
        assert!(matches!(err, FetchError::Configuration(_)));

        let err = RequestDescriptor::get("https://example.com")
            .with_header("x-note", "line\nbreak")
            .validate()
            .unwrap_err();
        assert!(matches!(err, FetchError::Configuration(_)));
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(201, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
