//! read client configuration from values, a file, or the environment

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::errors::Error;
use crate::token::TokenLifetimePolicy;

pub const DEFAULT_IAM_TOKEN_URL: &str = "https://iam.api.cloud.yandex.net/iam/v1/tokens";
pub const DEFAULT_IAM_BASE_URI: &str = "https://iam.api.cloud.yandex.net/";
pub const DEFAULT_ORGANIZATION_BASE_URI: &str =
    "https://organization-manager.api.cloud.yandex.net/";
pub const DEFAULT_RESOURCE_MANAGER_BASE_URI: &str =
    "https://resource-manager.api.cloud.yandex.net/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 12 * 60 * 60;
pub const DEFAULT_REFRESH_MARGIN_SECS: u64 = 5 * 60;

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub oauth_token: String,
    #[serde(default = "default_iam_token_url")]
    pub iam_token_url: String,
    #[serde(default = "default_iam_base_uri")]
    pub iam_base_uri: String,
    #[serde(default = "default_organization_base_uri")]
    pub organization_base_uri: String,
    #[serde(default = "default_resource_manager_base_uri")]
    pub resource_manager_base_uri: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_token_lifetime_secs")]
    pub token_lifetime_secs: u64,
    #[serde(default = "default_refresh_margin_secs")]
    pub refresh_margin_secs: u64,
}

fn default_iam_token_url() -> String {
    DEFAULT_IAM_TOKEN_URL.to_string()
}

fn default_iam_base_uri() -> String {
    DEFAULT_IAM_BASE_URI.to_string()
}

fn default_organization_base_uri() -> String {
    DEFAULT_ORGANIZATION_BASE_URI.to_string()
}

fn default_resource_manager_base_uri() -> String {
    DEFAULT_RESOURCE_MANAGER_BASE_URI.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_token_lifetime_secs() -> u64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}

fn default_refresh_margin_secs() -> u64 {
    DEFAULT_REFRESH_MARGIN_SECS
}

impl Config {
    /// Configuration with production endpoints and default token lifetime.
    pub fn new(oauth_token: impl Into<String>) -> Self {
        Self {
            oauth_token: oauth_token.into(),
            iam_token_url: default_iam_token_url(),
            iam_base_uri: default_iam_base_uri(),
            organization_base_uri: default_organization_base_uri(),
            resource_manager_base_uri: default_resource_manager_base_uri(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            refresh_margin_secs: DEFAULT_REFRESH_MARGIN_SECS,
        }
    }

    /// Points every endpoint at a single base URL. Used against mock servers.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.iam_token_url = format!("{base}/iam/v1/tokens");
        self.iam_base_uri = format!("{base}/");
        self.organization_base_uri = format!("{base}/");
        self.resource_manager_base_uri = format!("{base}/");
        self
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// # ENV Vars
    /// * `YANDEX_CLOUD_OAUTH_TOKEN` - required OAuth token
    /// * `YANDEX_CLOUD_IAM_TOKEN_URL` - token exchange endpoint override
    /// * `YANDEX_CLOUD_IAM_BASE_URI`, `YANDEX_CLOUD_ORGANIZATION_BASE_URI`,
    ///   `YANDEX_CLOUD_RESOURCE_MANAGER_BASE_URI` - API base overrides
    /// * `YANDEX_CLOUD_TIMEOUT_SECS` - HTTP timeout override
    pub fn from_env() -> Result<Self, Error> {
        let oauth_token = std::env::var("YANDEX_CLOUD_OAUTH_TOKEN")
            .map_err(|_| Error::Config("Missing YANDEX_CLOUD_OAUTH_TOKEN env var".to_string()))?;
        let mut config = Config::new(oauth_token);
        if let Ok(url) = std::env::var("YANDEX_CLOUD_IAM_TOKEN_URL") {
            config.iam_token_url = url;
        }
        if let Ok(uri) = std::env::var("YANDEX_CLOUD_IAM_BASE_URI") {
            config.iam_base_uri = uri;
        }
        if let Ok(uri) = std::env::var("YANDEX_CLOUD_ORGANIZATION_BASE_URI") {
            config.organization_base_uri = uri;
        }
        if let Ok(uri) = std::env::var("YANDEX_CLOUD_RESOURCE_MANAGER_BASE_URI") {
            config.resource_manager_base_uri = uri;
        }
        if let Ok(secs) = std::env::var("YANDEX_CLOUD_TIMEOUT_SECS") {
            config.timeout_secs = secs.parse().map_err(|e| {
                Error::Config(format!("Invalid YANDEX_CLOUD_TIMEOUT_SECS '{secs}': {e}"))
            })?;
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn token_policy(&self) -> Result<TokenLifetimePolicy, Error> {
        TokenLifetimePolicy::new(
            Duration::from_secs(self.token_lifetime_secs),
            Duration::from_secs(self.refresh_margin_secs),
        )
    }

    /// Checks URLs and the lifetime policy before any network call is made.
    pub fn validate(&self) -> Result<(), Error> {
        validate_url("IAM token", &self.iam_token_url)?;
        validate_url("IAM base", &self.iam_base_uri)?;
        validate_url("organization base", &self.organization_base_uri)?;
        validate_url("resource manager base", &self.resource_manager_base_uri)?;
        if self.timeout_secs == 0 {
            return Err(Error::Config("HTTP timeout must be > 0".into()));
        }
        self.token_policy()?;
        Ok(())
    }
}

fn validate_url(name: &str, url: &str) -> Result<(), Error> {
    reqwest::Url::parse(url)
        .map(|_| ())
        .map_err(|e| Error::Config(format!("Invalid {name} URL '{url}': {e}")))
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("oauth_token", &"<redacted>")
            .field("iam_token_url", &self.iam_token_url)
            .field("iam_base_uri", &self.iam_base_uri)
            .field("organization_base_uri", &self.organization_base_uri)
            .field("resource_manager_base_uri", &self.resource_manager_base_uri)
            .field("timeout_secs", &self.timeout_secs)
            .field("token_lifetime_secs", &self.token_lifetime_secs)
            .field("refresh_margin_secs", &self.refresh_margin_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"oauth_token": "y0_abc"}"#).unwrap();
        assert_eq!(config.iam_token_url, DEFAULT_IAM_TOKEN_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        let policy = config.token_policy().unwrap();
        assert_eq!(policy.cache_ttl(), Duration::from_secs(12 * 3600 - 300));
    }

    #[test]
    fn debug_hides_oauth_token() {
        let rendered = format!("{:?}", Config::new("y0_secret"));
        assert!(!rendered.contains("y0_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn validate_rejects_bad_url() {
        let mut config = Config::new("tok");
        config.iam_token_url = "://nope".into();
        match config.validate() {
            Err(Error::Config(msg)) => assert!(msg.contains("Invalid IAM token URL")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_margin_longer_than_lifetime() {
        let mut config = Config::new("tok");
        config.token_lifetime_secs = 60;
        config.refresh_margin_secs = 120;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn with_base_url_rewrites_all_endpoints() {
        let config = Config::new("tok").with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.iam_token_url, "http://127.0.0.1:9000/iam/v1/tokens");
        assert_eq!(config.resource_manager_base_uri, "http://127.0.0.1:9000/");
        config.validate().unwrap();
    }
}
