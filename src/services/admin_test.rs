use super::*;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;

fn credentials(url: &str) -> Credentials {
    Credentials::new(url, "service-key")
}

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

// =============================================================================
// parse_health
// =============================================================================

#[test]
fn parse_health_reads_gotrue_answer() {
    let health = parse_health(r#"{"version":"v2.150.0","name":"GoTrue","description":"GoTrue is a user registration and authentication API"}"#).unwrap();
    assert_eq!(health.name.as_deref(), Some("GoTrue"));
    assert_eq!(health.version.as_deref(), Some("v2.150.0"));
}

#[test]
fn parse_health_tolerates_missing_fields() {
    assert_eq!(parse_health("{}").unwrap(), AuthHealth::default());
}

#[test]
fn parse_health_rejects_garbage() {
    assert!(matches!(parse_health("not json"), Err(AdminError::Parse(_))));
}

// =============================================================================
// endpoints
// =============================================================================

#[test]
fn endpoint_joins_without_double_slash() {
    let client = AdminClient::new(credentials("https://abcd.supabase.co/")).unwrap();
    assert_eq!(client.base_url(), "https://abcd.supabase.co");
    assert_eq!(client.endpoint(HEALTH_PATH), "https://abcd.supabase.co/auth/v1/health");
}

#[test]
fn error_display_omits_body() {
    let err = AdminError::Status { status: 503, body: "secret detail".into() };
    assert_eq!(err.to_string(), "auth api returned status 503");
}

// =============================================================================
// health (against a local stand-in backend)
// =============================================================================

#[tokio::test]
async fn health_sends_service_key_and_decodes() {
    let router = Router::new().route(
        HEALTH_PATH,
        get(|headers: HeaderMap| async move {
            let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
            let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
            if apikey == Some("service-key") && bearer == Some("Bearer service-key") {
                (StatusCode::OK, r#"{"name":"GoTrue","version":"v2"}"#)
            } else {
                (StatusCode::UNAUTHORIZED, r#"{"msg":"no key"}"#)
            }
        }),
    );
    let base = spawn_backend(router).await;

    let health = AdminClient::new(credentials(&base)).unwrap().health().await.unwrap();
    assert_eq!(health.name.as_deref(), Some("GoTrue"));
}

#[tokio::test]
async fn health_maps_non_200_to_status_error() {
    let router = Router::new().route(
        HEALTH_PATH,
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let base = spawn_backend(router).await;

    let err = AdminClient::new(credentials(&base)).unwrap().health().await.unwrap_err();
    match err {
        AdminError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn health_reports_unreachable_backend() {
    // Bind then drop to get a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = AdminClient::new(credentials(&format!("http://{addr}")))
        .unwrap()
        .health()
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Request(_)));
}
