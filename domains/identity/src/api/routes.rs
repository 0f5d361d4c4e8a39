//! Route definitions for the identity domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, organisations, users};
use super::middleware::IdentityState;

/// Registration and login (no bearer token required)
fn auth_routes() -> Router<IdentityState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn user_routes() -> Router<IdentityState> {
    Router::new().route("/api/users/{id}", get(users::get_user))
}

fn organisation_routes() -> Router<IdentityState> {
    Router::new()
        .route(
            "/api/organisations",
            get(organisations::list_organisations).post(organisations::create_organisation),
        )
        .route(
            "/api/organisations/{org_id}",
            get(organisations::get_organisation),
        )
        .route(
            "/api/organisations/{org_id}/users",
            post(organisations::add_member),
        )
}

/// Create all identity domain API routes
pub fn routes() -> Router<IdentityState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(organisation_routes())
}
