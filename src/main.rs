mod routes;
mod services;
mod state;

use std::sync::Arc;

use client::net::config::{SERVICE_ROLE_KEY_VAR, SupabaseConfig};
use client::net::factory::{ClientFactory, ExecutionContext};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let config = SupabaseConfig::from_env();
    match config.public_credentials() {
        Ok(credentials) => tracing::info!(url = %credentials.url, "supabase configured"),
        Err(issue) => tracing::warn!(%issue, "supabase not configured, pages run in demo mode"),
    }

    // Privileged client is optional: health reporting degrades without it.
    let admin = match ClientFactory::new(config.clone(), ExecutionContext::Server)
        .privileged_client(services::admin::AdminClient::new)
    {
        Some(Ok(client)) => {
            tracing::info!(url = client.base_url(), "privileged supabase client initialized");
            Some(Arc::new(client))
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "privileged supabase client failed to build");
            None
        }
        None => {
            tracing::info!(var = SERVICE_ROLE_KEY_VAR, "privileged supabase client disabled");
            None
        }
    };

    let state = state::AppState::new(config, admin);
    let app = routes::leptos_app(state).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "starter listening");
    axum::serve(listener, app).await.expect("server failed");
}
