use std::time::SystemTime;

use tracing::{Level, event};
use uuid::Uuid;

use crate::errors::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Cache was empty or past its expiry when a token was requested.
    Expired,
    /// Caller asked for a refresh explicitly.
    Forced,
}

/// Structured events for a single IAM token refresh attempt.
///
/// Token and credential values never appear in these events.
#[derive(Clone, Debug)]
pub struct RefreshTelemetry {
    attempt_id: Uuid,
    context: String,
}

impl RefreshTelemetry {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            context: context.into(),
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn emit_start(&self, trigger: RefreshTrigger, at: SystemTime) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            trigger = ?trigger,
            timestamp = ?at,
            "refresh.start"
        );
    }

    pub fn emit_success(&self, expires_at: SystemTime) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            expires_at = ?expires_at,
            "refresh.success"
        );
    }

    pub fn emit_coalesced(&self) {
        event!(
            Level::DEBUG,
            attempt_id = %self.attempt_id,
            context = %self.context,
            "refresh.coalesced"
        );
    }

    /// The error itself is returned to the caller; this only records the outcome.
    pub fn emit_failure(&self, error: &Error, at: SystemTime) {
        event!(
            Level::DEBUG,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = ?at,
            error = %error,
            "refresh.failure"
        );
    }
}
