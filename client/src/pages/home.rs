//! Home page: session-aware auth card plus the stack overview.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders only the loading screen. Real content appears after
//! the first client-side render (mount) and the initial session check, so
//! the hydrated DOM always matches the server markup.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::session::SessionController;

/// What the page shows for a given auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HomeView {
    Loading,
    /// No backend configured.
    Demo,
    SignedOut,
    SignedIn { identity: String },
}

/// Derive the page mode. Nothing but `Loading` before mount.
pub fn home_view(state: &AuthState) -> HomeView {
    if !state.mounted || state.loading {
        return HomeView::Loading;
    }
    if state.is_demo() {
        return HomeView::Demo;
    }
    match &state.user {
        Some(user) => HomeView::SignedIn { identity: user.display_identity().to_owned() },
        None => HomeView::SignedOut,
    }
}

pub fn email_line(identity: &str) -> String {
    format!("Email: {identity}")
}

/// (title, blurb) for the stack overview cards.
pub const FEATURES: [(&str, &str); 3] = [
    ("Leptos", "Rust-native reactive UI with server rendering and hydration"),
    ("Supabase", "PostgreSQL database, authentication, and real-time subscriptions"),
    ("Axum", "Tokio-based HTTP server with tracing and static asset serving"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = RwSignal::new(AuthState::default());
    let controller = SessionController::new(auth);

    // Effects never run on the server; this fires once after hydration.
    let bootstrap = controller.clone();
    Effect::new(move |_| {
        bootstrap.mount();
        #[cfg(feature = "hydrate")]
        {
            let bootstrap = bootstrap.clone();
            leptos::task::spawn_local(async move {
                bootstrap.start(crate::net::supabase::acquire_browser_client).await;
            });
        }
    });
    on_cleanup(move || controller.teardown());

    move || {
        let mode = home_view(&auth.get());
        if mode == HomeView::Loading {
            return view! {
                <div class="loading-screen">
                    <div class="loading-screen__text">"Loading..."</div>
                </div>
            }
            .into_any();
        }

        view! {
            <div class="home-page">
                <div class="home-page__container">
                    <header class="home-page__hero">
                        <h1>"Leptos + Supabase + Axum"</h1>
                        <p>"Your Rust web stack is ready!"</p>
                    </header>
                    <div class="auth-card">{auth_card(mode)}</div>
                    <div class="home-page__features">
                        {FEATURES
                            .iter()
                            .map(|(title, blurb)| {
                                view! {
                                    <div class="feature-card">
                                        <h3>{*title}</h3>
                                        <p>{*blurb}</p>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                </div>
            </div>
        }
        .into_any()
    }
}

fn auth_card(mode: HomeView) -> AnyView {
    match mode {
        HomeView::SignedIn { identity } => view! {
            <div class="auth-card__body">
                <h2>"Welcome back!"</h2>
                <p class="auth-card__email">{email_line(&identity)}</p>
                <button class="btn btn--danger" on:click=on_sign_out>
                    "Sign Out"
                </button>
            </div>
        }
        .into_any(),
        HomeView::SignedOut => view! {
            <div class="auth-card__body">
                <h2>"Get Started"</h2>
                <button class="btn btn--primary" on:click=on_sign_in>
                    "Sign in with GitHub"
                </button>
                <p class="auth-card__hint">"Sign in to test Supabase authentication"</p>
            </div>
        }
        .into_any(),
        HomeView::Demo => view! {
            <div class="auth-card__body">
                <h2>"Demo Mode"</h2>
                <p class="auth-card__hint">
                    "Supabase is not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY to enable sign-in."
                </p>
            </div>
        }
        .into_any(),
        // The page shows the loading screen instead of a card.
        HomeView::Loading => ().into_any(),
    }
}

fn on_sign_in(_: leptos::ev::MouseEvent) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(crate::state::session::sign_in(crate::net::supabase::acquire_browser_client));
}

fn on_sign_out(_: leptos::ev::MouseEvent) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(crate::state::session::sign_out(crate::net::supabase::acquire_browser_client));
}
