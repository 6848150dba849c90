use crate::errors::Error;
use crate::tests::test_support::{ScriptedExchanger, capture_logs};
use crate::token::{TokenLifetimePolicy, TokenManager};

#[tokio::test(flavor = "current_thread")]
async fn refresh_logs_start_and_success_without_token_value() {
    let manager = TokenManager::with_exchanger(
        ScriptedExchanger::new(vec![Ok("t1.super-secret-iam".into())]),
        TokenLifetimePolicy::default(),
    );

    let (buffer, guard) = capture_logs();
    let token = manager.get_valid_token().await.expect("token");
    drop(guard);

    assert_eq!(token, "t1.super-secret-iam");
    let logs = buffer.events();
    assert!(
        logs.iter().any(|line| line.contains("refresh.start")),
        "missing refresh.start: {:?}",
        logs
    );
    assert!(
        logs.iter()
            .any(|line| line.contains("INFO") && line.contains("refresh.success")),
        "missing refresh.success: {:?}",
        logs
    );
    assert!(
        logs.iter().all(|line| !line.contains("super-secret")),
        "token leaked into logs: {:?}",
        logs
    );
}

#[tokio::test(flavor = "current_thread")]
async fn cached_hit_emits_no_refresh_events() {
    let manager = TokenManager::with_exchanger(
        ScriptedExchanger::new(vec![Ok("t1.abc".into())]),
        TokenLifetimePolicy::default(),
    );
    manager.get_valid_token().await.expect("prime cache");

    let (buffer, guard) = capture_logs();
    manager.get_valid_token().await.expect("cached token");
    drop(guard);

    let logs = buffer.events();
    assert!(
        logs.iter().all(|line| !line.contains("refresh.start")),
        "unexpected refresh: {:?}",
        logs
    );
    assert_eq!(manager.exchanger().calls(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_refresh_is_returned_not_logged_as_error() {
    let manager = TokenManager::with_exchanger(
        ScriptedExchanger::new(vec![Err(Error::authentication("denied"))]),
        TokenLifetimePolicy::default(),
    );

    let (buffer, guard) = capture_logs();
    let err = manager.get_valid_token().await.expect_err("refresh fails");
    drop(guard);

    assert!(err.is_authentication());
    let logs = buffer.events();
    assert!(
        logs.iter().all(|line| !line.contains("ERROR")),
        "errors must be returned, not logged: {:?}",
        logs
    );
}
