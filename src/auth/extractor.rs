// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the authenticated subject.
//!
//! Use the `CurrentUser` extractor in handlers that require a session:
//!
//! ```rust,ignore
//! async fn my_handler(CurrentUser(identity): CurrentUser) -> impl IntoResponse {
//!     // identity.subject_id is the only trusted identity source
//! }
//! ```
//!
//! Handlers must never accept a subject id from any other source (query,
//! body, headers); the extractor is the single door.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, VerifiedIdentity};
use crate::state::AppState;

/// Extractor for the authenticated subject of the current request.
///
/// Validates the bearer token from the `Authorization` header against the
/// application signing secret and yields the embedded identity. Rejection
/// is the generic 401 from [`AuthError`].
pub struct CurrentUser(pub VerifiedIdentity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Middleware may have validated the token already.
        if let Some(identity) = parts.extensions.get::<VerifiedIdentity>().cloned() {
            return Ok(CurrentUser(identity));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let identity = state.session_tokens.validate(token.trim())?;

        Ok(CurrentUser(identity))
    }
}
