use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::errors::Error;
use crate::resources::{
    ApiExecutor, ApiKeys, Clouds, Folders, Organizations, RefreshTokens, ServiceAccounts,
    UserAccounts, YandexPassportUserAccounts,
};
use crate::token::TokenManager;

/// Entry point to the Yandex Cloud API.
///
/// One HTTP client and one token manager are shared by every resource wrapper
/// handed out, so all calls draw from the same cached IAM token.
#[derive(Clone)]
pub struct YandexCloudClient {
    http_client: Client,
    auth: Arc<TokenManager>,
    config: Config,
}

impl YandexCloudClient {
    /// Create a new client
    /// # Arguments
    /// * `config` - endpoints, timeout, token lifetime and the OAuth token,
    ///   typically from `Config::from_env` or `Config::from_file`.
    ///
    /// No network call is made here; the first IAM token is exchanged lazily.
    pub fn new(config: Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;
        Self::with_http_client(config, http_client)
    }

    /// Like `new`, but reuses a caller-built HTTP client.
    /// An empty OAuth token fails with `Error::Authentication`.
    pub fn with_http_client(config: Config, http_client: Client) -> Result<Self, Error> {
        config.validate()?;
        let auth = Arc::new(TokenManager::from_config(&config, http_client.clone())?);
        info!(
            iam_token_url = %config.iam_token_url,
            timeout_secs = config.timeout_secs,
            "client initialized"
        );
        Ok(Self {
            http_client,
            auth,
            config,
        })
    }

    /// Client against production endpoints with default settings.
    pub fn from_oauth_token(oauth_token: impl Into<String>) -> Result<Self, Error> {
        Self::new(Config::new(oauth_token))
    }

    fn executor(&self, base_uri: &str) -> ApiExecutor {
        ApiExecutor::new(self.http_client.clone(), Arc::clone(&self.auth), base_uri)
    }

    pub fn organizations(&self) -> Organizations {
        Organizations::new(self.executor(&self.config.organization_base_uri))
    }

    pub fn clouds(&self) -> Clouds {
        Clouds::new(self.executor(&self.config.resource_manager_base_uri))
    }

    pub fn folders(&self) -> Folders {
        Folders::new(self.executor(&self.config.resource_manager_base_uri))
    }

    pub fn service_accounts(&self) -> ServiceAccounts {
        ServiceAccounts::new(self.executor(&self.config.iam_base_uri))
    }

    pub fn api_keys(&self) -> ApiKeys {
        ApiKeys::new(self.executor(&self.config.iam_base_uri))
    }

    pub fn refresh_tokens(&self) -> RefreshTokens {
        RefreshTokens::new(self.executor(&self.config.iam_base_uri))
    }

    pub fn user_accounts(&self) -> UserAccounts {
        UserAccounts::new(self.executor(&self.config.iam_base_uri))
    }

    pub fn yandex_passport_user_accounts(&self) -> YandexPassportUserAccounts {
        YandexPassportUserAccounts::new(self.executor(&self.config.iam_base_uri))
    }

    pub fn token_manager(&self) -> Arc<TokenManager> {
        Arc::clone(&self.auth)
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn oauth_token(&self) -> &str {
        self.auth.oauth_token()
    }
}
