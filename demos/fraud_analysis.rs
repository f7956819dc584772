//! Fraud analysis example
//!
//! Seeds an in-memory store with a regular candidate and a bot-farm account,
//! runs a full analysis on each and checks two live sessions.

use anyhow::{Context, Result};
use chrono::{Duration, TimeZone, Utc};
use hireguard_core::{
    ActivityRecord, AnalysisContext, Application, BlacklistEntry, DeviceFingerprint,
    LocationData, MouseMovement, Profile, SessionRecord, SessionSnapshot,
};
use hireguard_runtime::InMemoryStore;
use hireguard_sdk::{EngineConfig, FraudAnalysisResult, RiskEngineBuilder};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hireguard_sdk=info,hireguard_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

fn seed_store() -> Result<InMemoryStore> {
    let now = Utc
        .with_ymd_and_hms(2024, 5, 20, 8, 0, 0)
        .single()
        .context("invalid seed timestamp")?;
    let mut store = InMemoryStore::new();

    // A regular candidate
    let mut alice = Profile::new("alice", now - Duration::days(90));
    alice.first_name = Some("Alice".to_string());
    alice.last_name = Some("Moreau".to_string());
    alice.email = Some("alice@moreau.dev".to_string());
    alice.bio = Some("Data engineer, previously at a logistics startup.".to_string());
    alice.email_verified = true;
    alice.linkedin_url = Some("https://www.linkedin.com/in/alice-moreau".to_string());
    store.add_profile(alice);

    store.add_applications(
        (0..4)
            .map(|i| Application {
                id: format!("alice-app-{}", i),
                candidate_id: "alice".to_string(),
                cover_letter: Some(
                    "I have been following your team's work on routing for a while and would love to help."
                        .to_string(),
                ),
                applied_at: now - Duration::days(10 - i),
            })
            .collect(),
    );
    store.add_activities(
        ["page_view", "click", "page_view", "page_view"]
            .iter()
            .enumerate()
            .map(|(i, action)| ActivityRecord {
                id: format!("alice-act-{}", i),
                user_id: "alice".to_string(),
                action: action.to_string(),
                created_at: now - Duration::minutes(30 - 6 * i as i64),
            })
            .collect(),
    );

    // A bot farm: one account among many registered the same hour on one domain
    let mut bot = Profile::new("bot-0", now);
    bot.first_name = Some("John".to_string());
    bot.last_name = Some("John".to_string());
    bot.email = Some("bot-0@mailinator.com".to_string());
    store.add_profile(bot);

    for i in 1..=24 {
        let mut sibling = Profile::new(format!("bot-{}", i), now + Duration::minutes(i));
        sibling.email = Some(format!("bot-{}@mailinator.com", i));
        store.add_profile(sibling);
    }
    for i in 0..=6 {
        store.add_session(SessionRecord {
            id: format!("bot-session-{}", i),
            user_id: format!("bot-{}", i),
            device_id: Some("device-shared".to_string()),
            ip_address: Some("203.0.113.77".to_string()),
            user_agent: Some("HeadlessChrome/120.0".to_string()),
            created_at: now,
        });
    }
    store.add_applications(
        (0..60)
            .map(|i| Application {
                id: format!("bot-app-{}", i),
                candidate_id: "bot-0".to_string(),
                cover_letter: None,
                applied_at: now + Duration::seconds(20 * i),
            })
            .collect(),
    );

    store.add_blacklist_entry(BlacklistEntry::ip("203.0.113.77"));

    Ok(store)
}

fn print_result(user_id: &str, result: &FraudAnalysisResult) -> Result<()> {
    println!("--- {} ---", user_id);
    println!("Score:          {}", result.risk_score);
    println!("Level:          {}", result.risk_level.as_str());
    println!("Recommendation: {}", result.recommendation.as_str());
    println!("Confidence:     {:.2}", result.confidence);
    for indicator in &result.fraud_indicators {
        println!("  - {:?}: {}", indicator.severity, indicator.description);
    }
    println!("{}\n", serde_json::to_string_pretty(&result.analysis.network)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    println!("=== Fraud Analysis Example ===\n");

    let config = EngineConfig::load()?;
    let store = Arc::new(seed_store()?);
    let engine = RiskEngineBuilder::new()
        .with_config(config)
        .with_store(store.clone())
        .build()
        .await?;

    let alice_context = AnalysisContext::new()
        .with_ip_address("198.51.100.14")
        .with_user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) Firefox/125.0")
        .with_device_fingerprint(DeviceFingerprint {
            browser_info: "Firefox 125".to_string(),
            screen_resolution: "1440x900".to_string(),
            timezone: "Europe/Paris".to_string(),
            language: "fr-FR".to_string(),
            webdriver: false,
        })
        .with_location(LocationData {
            country: Some("FR".to_string()),
            ..Default::default()
        });
    let result = engine.analyze_user("alice", Some(alice_context)).await?;
    print_result("alice", &result)?;

    let bot_context = AnalysisContext::new()
        .with_ip_address("203.0.113.77")
        .with_location(LocationData {
            vpn_detected: true,
            ..Default::default()
        });
    let result = engine.analyze_user("bot-0", Some(bot_context)).await?;
    print_result("bot-0", &result)?;

    println!("--- Live sessions ---");
    let human = SessionSnapshot {
        actions_per_minute: 14.0,
        mouse_movements: Some(vec![MouseMovement {
            x: 320,
            y: 211,
            timestamp_ms: 1_716_192_000_000,
        }]),
        ip_address: Some("198.51.100.14".to_string()),
        device_fingerprint: None,
    };
    let scripted = SessionSnapshot {
        actions_per_minute: 340.0,
        mouse_movements: None,
        ip_address: Some("203.0.113.77".to_string()),
        device_fingerprint: None,
    };
    println!("alice allowed: {}", engine.monitor_user_session("alice", &human).await);
    println!("bot-0 allowed: {}", engine.monitor_user_session("bot-0", &scripted).await);

    println!("\nStored analyses: {}", store.analyses().await.len());
    println!("Security flags:  {}", store.security_flags().await.len());

    let metrics = engine.metrics();
    for name in metrics.counter_names() {
        println!("{:<28} {}", name, metrics.counter(&name).get());
    }

    Ok(())
}
