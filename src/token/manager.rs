use std::sync::Arc;
use std::time::SystemTime;

use reqwest::Client;
use tokio::sync::{Mutex, RwLock};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::errors::Error;
use crate::telemetry::refresh::{RefreshTelemetry, RefreshTrigger};

use super::{CachedToken, CredentialExchanger, IamTokenExchanger, TokenLifetimePolicy};

/// How concurrent callers that all find the cache stale are coordinated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefreshMode {
    /// Every caller that observes a stale cache runs its own exchange.
    /// Readers never wait on an in-flight exchange, but exchanges may be duplicated.
    #[default]
    Concurrent,
    /// Callers queue behind one in-flight exchange and reuse its token.
    SingleFlight,
}

/// Hands out a currently valid IAM token, refreshing it through the exchanger when
/// the cached one is missing or past its expiry.
///
/// The cache lock is only held for in-memory reads and writes, never across the
/// exchange itself.
pub struct TokenManager<E = IamTokenExchanger> {
    exchanger: E,
    policy: TokenLifetimePolicy,
    mode: RefreshMode,
    clock: Arc<dyn Clock>,
    cached: RwLock<CachedToken>,
    refresh_lock: Mutex<()>,
}

impl TokenManager<IamTokenExchanger> {
    /// Manager for `oauth_token` against the production endpoint.
    /// When `http_client` is `None` a client with a 30 second timeout is built.
    pub fn new(oauth_token: impl Into<String>, http_client: Option<Client>) -> Result<Self, Error> {
        let oauth_token = oauth_token.into();
        let exchanger = match http_client {
            Some(client) => {
                IamTokenExchanger::new(oauth_token, crate::config::DEFAULT_IAM_TOKEN_URL, client)?
            }
            None => IamTokenExchanger::with_defaults(oauth_token)?,
        };
        Ok(Self::with_exchanger(exchanger, TokenLifetimePolicy::default()))
    }

    pub fn from_config(config: &Config, http_client: Client) -> Result<Self, Error> {
        let policy = config.token_policy()?;
        let exchanger =
            IamTokenExchanger::new(config.oauth_token.clone(), &config.iam_token_url, http_client)?;
        Ok(Self::with_exchanger(exchanger, policy))
    }

    /// Credential the manager exchanges; kept for debugging.
    pub fn oauth_token(&self) -> &str {
        self.exchanger.oauth_token()
    }
}

impl<E: CredentialExchanger> TokenManager<E> {
    pub fn with_exchanger(exchanger: E, policy: TokenLifetimePolicy) -> Self {
        Self {
            exchanger,
            policy,
            mode: RefreshMode::default(),
            clock: Arc::new(SystemClock),
            cached: RwLock::new(CachedToken::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_refresh_mode(mut self, mode: RefreshMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn policy(&self) -> TokenLifetimePolicy {
        self.policy
    }

    pub fn refresh_mode(&self) -> RefreshMode {
        self.mode
    }

    pub fn exchanger(&self) -> &E {
        &self.exchanger
    }

    /// Returns the cached token, exchanging the credential first if the cache is
    /// empty or expired. A failed exchange is returned as-is; an expired token is
    /// never served in its place.
    pub async fn get_valid_token(&self) -> Result<String, Error> {
        if self.needs_refresh().await {
            match self.mode {
                RefreshMode::Concurrent => {
                    self.refresh_with(RefreshTrigger::Expired).await?;
                }
                RefreshMode::SingleFlight => {
                    let _lock = self.refresh_lock.lock().await;
                    // Another caller may have refreshed while we queued.
                    if self.needs_refresh().await {
                        self.refresh_with(RefreshTrigger::Expired).await?;
                    } else {
                        RefreshTelemetry::new("iam.token.get").emit_coalesced();
                    }
                }
            }
        }
        Ok(self.cached.read().await.value().to_string())
    }

    /// Exchanges the credential unconditionally and stores the result.
    /// On failure the cache is left exactly as it was.
    pub async fn refresh(&self) -> Result<(), Error> {
        self.refresh_with(RefreshTrigger::Forced).await
    }

    /// Clears the cached token so the next `get_valid_token` exchanges again.
    pub async fn invalidate(&self) {
        self.cached.write().await.clear();
    }

    pub async fn has_valid_cached_token(&self) -> bool {
        self.cached.read().await.is_valid_at(self.clock.now())
    }

    pub async fn cached_expiry(&self) -> Option<SystemTime> {
        self.cached.read().await.expires_at()
    }

    /// Copy of the cache contents at this instant.
    pub async fn snapshot(&self) -> CachedToken {
        self.cached.read().await.clone()
    }

    async fn needs_refresh(&self) -> bool {
        !self.cached.read().await.is_valid_at(self.clock.now())
    }

    async fn refresh_with(&self, trigger: RefreshTrigger) -> Result<(), Error> {
        let telemetry = RefreshTelemetry::new("iam.token.refresh");
        telemetry.emit_start(trigger, self.clock.now());

        let token = match self.exchanger.exchange().await {
            Ok(token) => token,
            Err(err) => {
                telemetry.emit_failure(&err, self.clock.now());
                return Err(err);
            }
        };

        let Some(expires_at) = self.clock.now().checked_add(self.policy.cache_ttl()) else {
            let err = Error::Config(format!(
                "Token lifetime of {}s overflows the system clock",
                self.policy.lifetime.as_secs()
            ));
            telemetry.emit_failure(&err, self.clock.now());
            return Err(err);
        };
        *self.cached.write().await = CachedToken::new(token, expires_at);
        telemetry.emit_success(expires_at);
        Ok(())
    }
}
