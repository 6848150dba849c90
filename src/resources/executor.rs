use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::{Client, Method};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::Error;
use crate::token::TokenManager;

/// Untyped JSON object returned by every resource call.
pub type JsonObject = Map<String, Value>;

/// Query-string builder. Absent values are skipped and keys come out sorted.
#[derive(Clone, Debug, Default)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn opt_param<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn page(self, page: &PageRequest) -> Self {
        self.opt_param("pageSize", page.page_size)
            .opt_param("pageToken", page.page_token.as_deref())
    }

    /// Renders `""` when empty, otherwise `?k=v&...` percent-encoded.
    pub fn encode(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<String>>();
        format!("?{}", pairs.join("&"))
    }
}

/// Pagination parameters shared by list calls.
#[derive(Clone, Debug, Default)]
pub struct PageRequest {
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
}

impl PageRequest {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: Some(page_size),
            page_token: None,
        }
    }

    pub fn with_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = Some(page_token.into());
        self
    }
}

/// Executes authenticated JSON requests against one API base URI.
#[derive(Clone)]
pub struct ApiExecutor {
    http_client: Client,
    auth: Arc<TokenManager>,
    base_uri: String,
}

impl ApiExecutor {
    pub fn new(http_client: Client, auth: Arc<TokenManager>, base_uri: impl Into<String>) -> Self {
        Self {
            http_client,
            auth,
            base_uri: base_uri.into(),
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Sends `body` as JSON to `uri` (relative to the base URI) with a bearer token
    /// and decodes the response as a JSON object.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<JsonObject, Error> {
        let token = self.auth.get_valid_token().await?;
        let url = format!(
            "{}/{}",
            self.base_uri.trim_end_matches('/'),
            uri.trim_start_matches('/')
        );
        debug!(method = %method, uri, "api.request");

        let mut req = self
            .http_client
            .request(method, &url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .bearer_auth(token);
        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|e| Error::api_with("Failed to marshal request body", None, e))?;
            req = req.body(payload);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::api_with("HTTP request failed", None, e))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::api_with("Failed to read response body", Some(status), e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), uri, "api.error");
            return Err(Error::api(
                format!(
                    "API request failed with status {}: {}",
                    status.as_u16(),
                    text
                ),
                Some(status),
            ));
        }

        if text.trim().is_empty() {
            return Ok(JsonObject::new());
        }
        serde_json::from_str::<JsonObject>(&text)
            .map_err(|e| Error::api_with("Failed to parse JSON response", Some(status), e))
    }

    pub async fn get(&self, uri: &str) -> Result<JsonObject, Error> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> Result<JsonObject, Error> {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: &Value) -> Result<JsonObject, Error> {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Result<JsonObject, Error> {
        self.request(Method::DELETE, uri, None).await
    }
}

/// Rejects an empty identifier with `Error::Validation("<what> cannot be empty")`.
pub(crate) fn require(value: &str, what: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::validation(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// Rejects an empty update payload.
pub(crate) fn require_update(data: &JsonObject) -> Result<(), Error> {
    if data.is_empty() {
        return Err(Error::validation("Update data cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_renders_nothing() {
        let query = Query::new().opt_param::<u32>("pageSize", None);
        assert_eq!(query.encode(), "");
    }

    #[test]
    fn query_is_sorted_and_encoded() {
        let query = Query::new()
            .param("pageToken", "a b&c")
            .param("cloudId", "b1g")
            .opt_param("pageSize", Some(50));
        assert_eq!(query.encode(), "?cloudId=b1g&pageSize=50&pageToken=a%20b%26c");
    }

    #[test]
    fn page_request_expands_to_params() {
        let page = PageRequest::new(10).with_token("next");
        assert_eq!(
            Query::new().page(&page).encode(),
            "?pageSize=10&pageToken=next"
        );
        assert_eq!(Query::new().page(&PageRequest::default()).encode(), "");
    }

    #[test]
    fn require_rejects_empty_identifier() {
        match require("", "Cloud ID") {
            Err(Error::Validation(msg)) => assert_eq!(msg, "Cloud ID cannot be empty"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(require_update(&JsonObject::new()).is_err());
    }
}
