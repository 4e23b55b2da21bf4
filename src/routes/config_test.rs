use super::*;
use crate::state::test_helpers::{configured, test_app_state};

#[tokio::test]
async fn public_config_returns_url_and_anon_key() {
    let Json(config) = public_config(State(test_app_state(configured()))).await;
    assert_eq!(config.url.as_deref(), Some("https://abcd.supabase.co"));
    assert_eq!(config.anon_key.as_deref(), Some("anon-key"));
    assert_eq!(config.service_role_key, None);
}

#[tokio::test]
async fn public_config_never_serializes_service_key() {
    let Json(config) = public_config(State(test_app_state(configured()))).await;
    let body = serde_json::to_string(&config).unwrap();
    assert!(!body.contains("service"), "leaked: {body}");
}

#[tokio::test]
async fn unconfigured_project_yields_nulls() {
    let Json(config) = public_config(State(test_app_state(SupabaseConfig::default()))).await;
    let body = serde_json::to_value(&config).unwrap();
    assert_eq!(body, serde_json::json!({ "url": null, "anon_key": null }));
}
