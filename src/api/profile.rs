// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticated-subject endpoint.

use axum::Json;

use crate::auth::CurrentUser;
use crate::models::ProfileResponse;

/// Return the identity asserted by the presented session token.
///
/// The extractor is the only identity source; nothing in the request
/// body or query is consulted.
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Authenticated subject", body = ProfileResponse),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
pub async fn profile(CurrentUser(identity): CurrentUser) -> Json<ProfileResponse> {
    Json(identity.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::VerifiedIdentity;

    #[tokio::test]
    async fn profile_echoes_the_token_identity() {
        let Json(response) = profile(CurrentUser(VerifiedIdentity {
            subject_id: 42,
            display_name: Some("alice".to_string()),
        }))
        .await;

        assert_eq!(response.user_id, "42");
        assert_eq!(response.display_name.as_deref(), Some("alice"));
    }
}
