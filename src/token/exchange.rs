use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DEFAULT_IAM_TOKEN_URL, DEFAULT_TIMEOUT_SECS};
use crate::errors::Error;

/// Trades a long-lived credential for a short-lived bearer token.
///
/// Implementations perform exactly one exchange per call: no caching, no retries.
pub trait CredentialExchanger: Send + Sync + 'static {
    fn exchange(&self) -> impl Future<Output = Result<String, Error>> + Send;
}

#[derive(Serialize)]
struct ExchangeRequest<'a> {
    #[serde(rename = "yandexPassportOauthToken")]
    yandex_passport_oauth_token: &'a str,
}

#[derive(Deserialize)]
struct ExchangeResponse {
    #[serde(rename = "iamToken", default)]
    iam_token: Option<String>,
}

#[derive(Deserialize)]
struct ExchangeErrorBody {
    message: Option<String>,
}

/// Exchanges a Yandex Passport OAuth token for an IAM token over HTTP.
#[derive(Clone)]
pub struct IamTokenExchanger {
    oauth_token: String,
    endpoint: String,
    http_client: Client,
}

impl IamTokenExchanger {
    /// Fails with `Error::Authentication` when `oauth_token` is empty.
    pub fn new(
        oauth_token: impl Into<String>,
        endpoint: impl Into<String>,
        http_client: Client,
    ) -> Result<Self, Error> {
        let oauth_token = oauth_token.into();
        if oauth_token.is_empty() {
            return Err(Error::authentication("OAuth token cannot be empty"));
        }
        Ok(Self {
            oauth_token,
            endpoint: endpoint.into(),
            http_client,
        })
    }

    /// Builds an exchanger against the production endpoint with a 30 second timeout.
    pub fn with_defaults(oauth_token: impl Into<String>) -> Result<Self, Error> {
        Self::new(oauth_token, DEFAULT_IAM_TOKEN_URL, default_http_client()?)
    }

    pub fn oauth_token(&self) -> &str {
        &self.oauth_token
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CredentialExchanger for IamTokenExchanger {
    async fn exchange(&self) -> Result<String, Error> {
        let request = ExchangeRequest {
            yandex_passport_oauth_token: &self.oauth_token,
        };
        let body = serde_json::to_vec(&request)
            .map_err(|e| Error::authentication_with("Failed to marshal request", e))?;

        let resp = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::authentication_with("Failed to get IAM token", e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::authentication_with("Failed to read response", e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ExchangeErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            debug!(status = status.as_u16(), "iam token exchange rejected");
            return Err(Error::authentication(format!(
                "Failed to get IAM token (HTTP {}): {}",
                status.as_u16(),
                message
            )));
        }

        let parsed: ExchangeResponse = serde_json::from_str(&text)
            .map_err(|e| Error::authentication_with("Failed to parse response", e))?;
        match parsed.iam_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(Error::authentication("IAM token not found in response")),
        }
    }
}

pub(crate) fn default_http_client() -> Result<Client, Error> {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))
}
