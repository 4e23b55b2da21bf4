//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON endpoints and stitches them with Leptos SSR
//! rendering under a single Axum router. Every response, page or API, gets
//! the same header and tracing layers.

pub mod config;
pub mod health;


use std::path::PathBuf;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

const DNS_PREFETCH_CONTROL: HeaderName = HeaderName::from_static("x-dns-prefetch-control");

/// JSON endpoints consumed by the page and by deploy probes.
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/config", get(config::public_config))
        .route("/api/health", get(health::backend_health))
        .route("/healthz", get(health::healthz))
        .with_state(state)
}

/// Layers applied to the fully merged router.
fn with_common_layers(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::overriding(DNS_PREFETCH_CONTROL, HeaderValue::from_static("on")))
        .layer(TraceLayer::new_for_http())
}

/// API routes + Leptos SSR + `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // WASM, JS and CSS emitted by cargo-leptos.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(with_common_layers(
        api_routes(state)
            .merge(leptos_router)
            .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))),
    ))
}
