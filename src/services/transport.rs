use crate::config::Config;
use crate::constants::network::TIMEOUT_API_REQUEST_MS;
use crate::errors::ToolError;
use crate::services::logger::Logger;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use url::Url;

const BODY_PREVIEW_BYTES: usize = 2_048;

/// One backend request, fully described before it is sent. The hub builds
/// these from typed parameters; the transport only executes them.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn query_string(&self) -> String {
        serde_urlencoded::to_string(&self.query).unwrap_or_default()
    }
}

/// Authenticated HTTP access to the configured backend. The client carries
/// the bearer token and JSON content type as default headers; the base URL
/// and token are fixed for the lifetime of the process.
#[derive(Clone)]
pub struct Transport {
    logger: Logger,
    client: Client,
    base_url: Url,
}

impl Transport {
    pub fn new(logger: Logger, config: &Config) -> Result<Self, ToolError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ToolError::invalid_params("token contains invalid header characters"))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("apihub/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|err| ToolError::internal(format!("HTTP client init failed: {}", err)))?;

        Ok(Self {
            logger: logger.child("transport"),
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Performs one round trip and decodes the body as JSON. Network
    /// failures, timeouts, non-2xx statuses, and undecodable bodies all
    /// surface as `ToolError` with the request URL and response details
    /// attached; the caller folds them into its result envelope.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<Value, ToolError> {
        let url = self
            .base_url
            .join(spec.path.trim_start_matches('/'))
            .map_err(|err| ToolError::internal(format!("Invalid request path: {}", err)))?;
        let display_url = display_url(&url, spec);

        let mut request = self.client.request(spec.method.clone(), url);
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = tokio::time::timeout(
            Duration::from_millis(TIMEOUT_API_REQUEST_MS),
            request.send(),
        )
        .await
        .map_err(|_| {
            self.logger.error(
                "Backend request timed out",
                Some(&serde_json::json!({ "url": display_url, "timeout_ms": TIMEOUT_API_REQUEST_MS })),
            );
            ToolError::timeout(format!(
                "Request timed out after {}ms",
                TIMEOUT_API_REQUEST_MS
            ))
            .with_details(serde_json::json!({ "url": display_url }))
        })?
        .map_err(|err| {
            self.logger.error(
                "Backend request failed",
                Some(&serde_json::json!({ "url": display_url, "error": err.to_string() })),
            );
            ToolError::retryable(format!("Request failed: {}", err))
                .with_details(serde_json::json!({ "url": display_url }))
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let status_text = format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            );
            let details = serde_json::json!({
                "status": status.as_u16(),
                "status_text": status_text,
                "body": preview(&text),
                "url": display_url,
            });
            self.logger.error("Backend returned error status", Some(&details));
            let message = format!("Backend request failed ({})", status_text);
            let err = if status.as_u16() == 401 || status.as_u16() == 403 {
                ToolError::denied(message)
            } else if status.as_u16() == 404 {
                ToolError::not_found(message)
            } else if status.as_u16() == 429 || status.is_server_error() {
                ToolError::retryable(message)
            } else {
                ToolError::invalid_params(message)
            };
            return Err(err.with_details(details));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| {
            let details = serde_json::json!({
                "status": status.as_u16(),
                "body": preview(&text),
                "url": display_url,
            });
            self.logger
                .error("Backend response is not valid JSON", Some(&details));
            ToolError::internal(format!("Response body is not valid JSON: {}", err))
                .with_details(details)
        })
    }
}

fn display_url(url: &Url, spec: &RequestSpec) -> String {
    let query = spec.query_string();
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{}?{}", url, query)
    }
}

fn preview(text: &str) -> String {
    if text.len() <= BODY_PREVIEW_BYTES {
        return text.to_string();
    }
    let mut end = BODY_PREVIEW_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_spec_builds_query_pairs_in_order() {
        let spec = RequestSpec::post("/api/v1/orgs/o1/projects/search", serde_json::json!({}))
            .with_query("page", 0)
            .with_query("size", 12)
            .with_query("sort", "name,asc");
        assert_eq!(spec.query_string(), "page=0&size=12&sort=name%2Casc");
    }

    #[test]
    fn get_spec_has_no_body() {
        let spec = RequestSpec::get("/api/v1/users/current");
        assert_eq!(spec.method, Method::GET);
        assert!(spec.body.is_none());
        assert_eq!(spec.query_string(), "");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let text = "é".repeat(BODY_PREVIEW_BYTES);
        let cut = preview(&text);
        assert!(cut.len() <= BODY_PREVIEW_BYTES);
        assert!(text.starts_with(&cut));
    }
}
