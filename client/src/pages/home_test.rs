use super::*;
use crate::net::types::User;
use crate::state::auth::SessionPhase;

fn user(email: Option<&str>) -> User {
    User {
        id: "u-1".to_owned(),
        email: email.map(str::to_owned),
        user_metadata: serde_json::Value::Null,
        app_metadata: serde_json::Value::Null,
        created_at: None,
    }
}

fn ready(user: Option<User>) -> AuthState {
    AuthState { user, loading: false, mounted: true, phase: SessionPhase::Ready }
}

#[test]
fn pre_mount_render_is_loading_only() {
    assert_eq!(home_view(&AuthState::default()), HomeView::Loading);

    // Even a state that somehow carries a user stays hidden until mounted.
    let state = AuthState { mounted: false, ..ready(Some(user(Some("a@b.com")))) };
    assert_eq!(home_view(&state), HomeView::Loading);
}

#[test]
fn mounted_but_still_checking_is_loading() {
    let state = AuthState { loading: true, ..ready(None) };
    assert_eq!(home_view(&state), HomeView::Loading);
}

#[test]
fn unconfigured_backend_shows_demo() {
    let state = AuthState { user: None, loading: false, mounted: true, phase: SessionPhase::Unconfigured };
    assert_eq!(home_view(&state), HomeView::Demo);
}

#[test]
fn signed_in_view_carries_email() {
    let view = home_view(&ready(Some(user(Some("a@b.com")))));
    assert_eq!(view, HomeView::SignedIn { identity: "a@b.com".to_owned() });
    assert_eq!(email_line("a@b.com"), "Email: a@b.com");
}

#[test]
fn signed_in_without_email_falls_back_to_id() {
    let view = home_view(&ready(Some(user(None))));
    assert_eq!(view, HomeView::SignedIn { identity: "u-1".to_owned() });
}

#[test]
fn no_user_shows_sign_in() {
    assert_eq!(home_view(&ready(None)), HomeView::SignedOut);
}

#[test]
fn feature_cards_cover_the_stack() {
    let titles: Vec<&str> = FEATURES.iter().map(|(title, _)| *title).collect();
    assert_eq!(titles, vec!["Leptos", "Supabase", "Axum"]);
}

// =============================================================================
// Rendered auth card (server build only)
// =============================================================================

#[cfg(feature = "ssr")]
fn render_card(mode: HomeView) -> String {
    Owner::new().with(|| auth_card(mode).to_html())
}

#[cfg(feature = "ssr")]
#[test]
fn signed_in_card_welcomes_user_with_sign_out_control() {
    let html = render_card(HomeView::SignedIn { identity: "a@b.com".to_owned() });
    assert!(html.contains("Welcome back!"), "{html}");
    assert!(html.contains("Email: a@b.com"), "{html}");
    assert!(html.contains("<button"), "{html}");
    assert!(html.contains("Sign Out"), "{html}");
    assert!(!html.contains("Sign in with GitHub"), "{html}");
}

#[cfg(feature = "ssr")]
#[test]
fn signed_out_card_offers_github_sign_in() {
    let html = render_card(HomeView::SignedOut);
    assert!(html.contains("Get Started"), "{html}");
    assert!(html.contains("<button"), "{html}");
    assert!(html.contains("Sign in with GitHub"), "{html}");
    assert!(!html.contains("Sign Out"), "{html}");
}

#[cfg(feature = "ssr")]
#[test]
fn demo_card_has_no_auth_controls() {
    let html = render_card(HomeView::Demo);
    assert!(html.contains("Demo Mode"), "{html}");
    assert!(html.contains("SUPABASE_URL"), "{html}");
    assert!(!html.contains("<button"), "{html}");
    assert!(!html.contains("Sign in"), "{html}");
    assert!(!html.contains("Sign Out"), "{html}");
}

#[cfg(feature = "ssr")]
#[test]
fn loading_renders_no_card() {
    let html = render_card(HomeView::Loading);
    assert!(!html.contains("<div"), "{html}");
    assert!(!html.contains("<button"), "{html}");
    assert!(!html.contains("Demo Mode"), "{html}");
}
