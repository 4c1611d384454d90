// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{HealthResponse, LoginRequest, LoginResponse, ProfileResponse},
    state::AppState,
};

pub mod health;
pub mod login;
pub mod profile;

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/auth/login", post(login::login))
        .route("/me", get(profile::profile))
        .with_state(state);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer from the configured origin list.
///
/// `*` anywhere in the list means any origin; otherwise only the listed
/// origins are allowed, with the methods and headers the frontend uses.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
        ])
}

#[derive(OpenApi)]
#[openapi(
    paths(login::login, profile::profile, health::health),
    components(schemas(LoginRequest, LoginResponse, ProfileResponse, HealthResponse)),
    tags(
        (name = "Auth", description = "Launch-payload login and session identity"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;
