#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::json;
use tokio::sync::Barrier;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yandex_cloud_client::{CredentialExchanger, Error};

pub const TOKEN_PATH: &str = "/iam/v1/tokens";

/// Replays scripted exchange results in order and counts calls.
pub struct ScriptedExchanger {
    results: Mutex<VecDeque<Result<String, Error>>>,
    calls: AtomicUsize,
}

impl ScriptedExchanger {
    pub fn new(results: Vec<Result<String, Error>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CredentialExchanger for ScriptedExchanger {
    async fn exchange(&self) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::authentication("script exhausted")))
    }
}

/// Issues `token-<n>` after an optional delay, optionally waiting on a barrier
/// so several exchanges are provably in flight at once.
pub struct CountingExchanger {
    calls: AtomicUsize,
    delay: Duration,
    barrier: Option<Barrier>,
}

impl CountingExchanger {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay,
            barrier: None,
        }
    }

    pub fn with_barrier(parties: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            barrier: Some(Barrier::new(parties)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CredentialExchanger for CountingExchanger {
    async fn exchange(&self) -> Result<String, Error> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(format!("token-{n}"))
    }
}

/// Mounts a token endpoint that always issues `iam_token`.
pub async fn mount_token(server: &MockServer, iam_token: &str) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "iamToken": iam_token,
            "expiresAt": "2030-01-01T00:00:00Z"
        })))
        .mount(server)
        .await;
}

pub fn token_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), TOKEN_PATH)
}
