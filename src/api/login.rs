// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoint: launch payload in, session token out.

use axum::{extract::State, Json};

use crate::{
    auth::{AuthError, LaunchPayload, VerifiedIdentity},
    models::{LoginRequest, LoginResponse},
    state::AppState,
};

/// Verify a launch payload and mint a session token.
///
/// Parse, verify, and extract failures all surface as the same generic
/// 401; only a signing failure produces a 500.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 401, description = "Launch payload rejected"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let payload = LaunchPayload::parse(&request.init_data)?;
    let launch = state.verifier.verify(payload)?;
    let identity = VerifiedIdentity::from_launch(&launch)?;
    let token = state.session_tokens.issue(&identity)?;

    tracing::info!(subject_id = identity.subject_id, "login verified");

    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{LaunchVerifier, SessionTokenCodec};
    use hmac::{Hmac, Mac};
    use sha2::Sha256;
    use std::sync::Arc;

    const BOT_TOKEN: &str = "123456:test-bot-token";
    const SECRET: &[u8] = b"test-session-secret";

    fn test_state() -> AppState {
        AppState {
            verifier: Arc::new(LaunchVerifier::new(BOT_TOKEN)),
            session_tokens: Arc::new(SessionTokenCodec::new(SECRET)),
        }
    }

    fn sign(check_string: &str) -> String {
        let mut secret = Hmac::<Sha256>::new_from_slice(b"WebAppData").unwrap();
        secret.update(BOT_TOKEN.as_bytes());
        let secret_key = secret.finalize().into_bytes();
        let mut mac = Hmac::<Sha256>::new_from_slice(&secret_key).unwrap();
        mac.update(check_string.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    const USER_ENCODED: &str = "%7B%22id%22%3A42%2C%22username%22%3A%22alice%22%7D";
    const USER_CHECK_STRING: &str =
        "auth_date=1700000000\nuser={\"id\":42,\"username\":\"alice\"}";

    fn signed_init_data() -> String {
        format!(
            "auth_date=1700000000&user={USER_ENCODED}&hash={}",
            sign(USER_CHECK_STRING)
        )
    }

    #[tokio::test]
    async fn login_issues_a_validatable_token() {
        let state = test_state();
        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                init_data: signed_init_data(),
            }),
        )
        .await
        .expect("login succeeds");

        let identity = state.session_tokens.validate(&response.token).unwrap();
        assert_eq!(identity.subject_id, 42);
        assert_eq!(identity.display_name.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn tampered_payload_is_rejected() {
        let state = test_state();
        let init_data = signed_init_data().replace("1700000000", "1700000001");

        let result = login(State(state), Json(LoginRequest { init_data })).await;
        assert!(matches!(result, Err(AuthError::SignatureMismatch)));
    }

    #[tokio::test]
    async fn verified_payload_without_user_is_rejected() {
        let state = test_state();
        let init_data = format!("auth_date=1700000000&hash={}", sign("auth_date=1700000000"));

        let result = login(State(state), Json(LoginRequest { init_data })).await;
        assert!(matches!(result, Err(AuthError::MissingIdentity)));
    }

    #[tokio::test]
    async fn unparseable_payload_is_rejected() {
        let state = test_state();
        let result = login(
            State(state),
            Json(LoginRequest {
                init_data: "%zz".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(AuthError::MalformedPayload(_))));
    }
}
