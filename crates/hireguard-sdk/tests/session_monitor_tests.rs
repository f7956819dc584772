//! Tests for `RiskEngine::monitor_user_session`

mod common;

use common::*;
use hireguard_core::{BlacklistEntry, DeviceFingerprint, FlagStatus, FlagType};
use hireguard_runtime::observability::metrics::{FLAGS_RAISED, PERSIST_FAILURES, SESSIONS_MONITORED};

fn bot_fingerprint() -> DeviceFingerprint {
    DeviceFingerprint {
        browser_info: "Mozilla/5.0 (X11; Linux x86_64) HeadlessChrome/120.0".to_string(),
        screen_resolution: "800x600".to_string(),
        webdriver: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_human_session_passes() {
    let (engine, store) = TestEngine::new().build().await;

    assert!(engine.monitor_user_session("u1", &human_session()).await);
    assert!(store.security_flags().await.is_empty());
}

#[tokio::test]
async fn test_two_indicators_do_not_flag() {
    let (engine, store) = TestEngine::new().build().await;

    let mut snapshot = human_session();
    snapshot.actions_per_minute = 250.0;
    snapshot.mouse_movements = None;

    assert!(engine.monitor_user_session("u1", &snapshot).await);
    assert!(store.security_flags().await.is_empty());
    assert_eq!(engine.metrics().counter(SESSIONS_MONITORED).get(), 1);
    assert_eq!(engine.metrics().counter(FLAGS_RAISED).get(), 0);
}

#[tokio::test]
async fn test_three_indicators_flag_session() {
    let (engine, store) = TestEngine::new().build().await;

    let mut snapshot = human_session();
    snapshot.actions_per_minute = 250.0;
    snapshot.mouse_movements = Some(vec![]);
    snapshot.device_fingerprint = Some(bot_fingerprint());

    assert!(!engine.monitor_user_session("u1", &snapshot).await);

    let flags = store.security_flags().await;
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].user_id, "u1");
    assert_eq!(flags[0].flag_type, FlagType::SuspiciousSession);
    assert_eq!(flags[0].status, FlagStatus::Active);
    assert_eq!(
        flags[0].evidence,
        serde_json::json!([
            "High action rate",
            "No mouse movement detected",
            "Suspicious device fingerprint"
        ])
    );
    assert_eq!(engine.metrics().counter(FLAGS_RAISED).get(), 1);
}

#[tokio::test]
async fn test_repeated_suspicious_sessions_write_duplicate_flags() {
    let (engine, store) = TestEngine::new()
        .with_blacklist_entry(BlacklistEntry::ip("203.0.113.66"))
        .build()
        .await;

    let mut snapshot = human_session();
    snapshot.actions_per_minute = 500.0;
    snapshot.mouse_movements = None;
    snapshot.ip_address = Some("203.0.113.66".to_string());

    assert!(!engine.monitor_user_session("u1", &snapshot).await);
    assert!(!engine.monitor_user_session("u1", &snapshot).await);
    assert_eq!(store.security_flags().await.len(), 2);
}

#[tokio::test]
async fn test_flag_write_failure_still_denies_session() {
    let (engine, store) = TestEngine::new().build().await;
    store.set_fail_writes(true);

    let mut snapshot = human_session();
    snapshot.actions_per_minute = 250.0;
    snapshot.mouse_movements = None;
    snapshot.device_fingerprint = Some(bot_fingerprint());

    assert!(!engine.monitor_user_session("u1", &snapshot).await);
    assert!(store.security_flags().await.is_empty());
    assert_eq!(engine.metrics().counter(PERSIST_FAILURES).get(), 1);
}

#[tokio::test]
async fn test_custom_threshold() {
    let (engine, store) = TestEngine::new()
        .configure(|b| b.session_flag_threshold(0))
        .build()
        .await;

    let mut snapshot = human_session();
    snapshot.mouse_movements = None;

    assert!(!engine.monitor_user_session("u1", &snapshot).await);
    assert_eq!(store.security_flags().await.len(), 1);
}

#[tokio::test]
async fn test_reloaded_ip_blacklist_reaches_monitor() {
    let (engine, store) = TestEngine::new().build().await;

    let mut snapshot = human_session();
    snapshot.actions_per_minute = 250.0;
    snapshot.mouse_movements = None;
    snapshot.ip_address = Some("192.0.2.44".to_string());

    assert!(engine.monitor_user_session("u1", &snapshot).await);

    store.insert_blacklist_entry(BlacklistEntry::ip("192.0.2.44")).await;
    engine.reload_blacklist().await;

    assert!(!engine.monitor_user_session("u1", &snapshot).await);
    assert_eq!(store.security_flags().await.len(), 1);
}
