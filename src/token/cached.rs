use std::fmt;
use std::time::SystemTime;

/// The cached IAM token and the moment after which it must be refreshed.
///
/// An empty value means nothing is cached; `expires_at` is then `None`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CachedToken {
    value: String,
    expires_at: Option<SystemTime>,
}

impl CachedToken {
    pub fn new(value: String, expires_at: SystemTime) -> Self {
        Self {
            value,
            expires_at: Some(expires_at),
        }
    }

    /// Returns the raw token value suitable for Authorization headers.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> Option<SystemTime> {
        self.expires_at
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// True when a token is present and `now` is strictly before its expiry.
    pub fn is_valid_at(&self, now: SystemTime) -> bool {
        match self.expires_at {
            Some(expires_at) => !self.value.is_empty() && now < expires_at,
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.expires_at = None;
    }
}

impl fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedToken")
            .field("value_len", &self.value.len())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
