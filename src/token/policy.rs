use std::time::Duration;

use crate::errors::Error;

/// Nominal IAM token lifetime and the margin subtracted from it when caching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenLifetimePolicy {
    /// Validity the remote service grants to a freshly issued token.
    pub lifetime: Duration,
    /// Subtracted from `lifetime` so the cache expires strictly before the service does.
    pub safety_margin: Duration,
}

impl TokenLifetimePolicy {
    pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(12 * 60 * 60);
    pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_secs(5 * 60);

    pub fn new(lifetime: Duration, safety_margin: Duration) -> Result<Self, Error> {
        if lifetime.is_zero() {
            return Err(Error::Config("Token lifetime must be > 0".into()));
        }
        if safety_margin >= lifetime {
            return Err(Error::Config(
                "Refresh margin must be lower than the token lifetime".into(),
            ));
        }
        Ok(Self {
            lifetime,
            safety_margin,
        })
    }

    /// How long a freshly exchanged token stays in the cache.
    pub fn cache_ttl(&self) -> Duration {
        self.lifetime - self.safety_margin
    }
}

impl Default for TokenLifetimePolicy {
    fn default() -> Self {
        Self {
            lifetime: Self::DEFAULT_LIFETIME,
            safety_margin: Self::DEFAULT_SAFETY_MARGIN,
        }
    }
}
