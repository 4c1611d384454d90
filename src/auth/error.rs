// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! Every per-request failure on the login and token paths collapses to the
//! same generic `401 {"error": "unauthorized"}` response. The concrete
//! variant is recorded in logs and metrics via [`AuthError::error_code`],
//! never echoed to the client, so the signature check cannot be used as an
//! oracle.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Covers the whole login pipeline (payload parsing, signature
/// verification, identity extraction) and the session-token path
/// (bearer header parsing, token validation).
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Launch payload could not be parsed into fields
    #[error("launch payload is malformed: {0}")]
    MalformedPayload(String),
    /// Launch payload carries no `hash` field
    #[error("launch payload is missing its signature")]
    MissingSignature,
    /// Computed signature does not match the supplied hash
    #[error("launch payload signature mismatch")]
    SignatureMismatch,
    /// Verified payload carries no `user` field
    #[error("verified payload carries no identity")]
    MissingIdentity,
    /// `user` field is not a JSON object with a numeric `id`
    #[error("identity field is malformed")]
    MalformedIdentity,
    /// No authorization header present
    #[error("authorization header is required")]
    MissingAuthHeader,
    /// Authorization header is not `Bearer <token>`
    #[error("invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Session token cannot be parsed
    #[error("session token is malformed")]
    TokenMalformed,
    /// Session token signature check failed
    #[error("session token signature is invalid")]
    TokenBadSignature,
    /// Session token expiry has passed
    #[error("session token has expired")]
    TokenExpired,
    /// Session token lacks the subject claim
    #[error("session token is missing required claims")]
    TokenMissingClaims,
    /// Internal failure (e.g. token signing)
    #[error("internal authentication error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
}

impl AuthError {
    /// Stable code for logs and metrics.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MalformedPayload(_) => "malformed_payload",
            AuthError::MissingSignature => "missing_signature",
            AuthError::SignatureMismatch => "signature_mismatch",
            AuthError::MissingIdentity => "missing_identity",
            AuthError::MalformedIdentity => "malformed_identity",
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::TokenMalformed => "malformed_token",
            AuthError::TokenBadSignature => "invalid_token_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenMissingClaims => "token_missing_claims",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // The concrete failure is for operators only; clients always see
        // the same body for a given status.
        tracing::debug!(error_code = self.error_code(), detail = %self, "authentication rejected");
        let body = Json(AuthErrorBody {
            error: if status == StatusCode::UNAUTHORIZED {
                "unauthorized"
            } else {
                "internal error"
            },
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn per_request_failures_are_indistinguishable() {
        let variants = [
            AuthError::MalformedPayload("x".into()),
            AuthError::MissingSignature,
            AuthError::SignatureMismatch,
            AuthError::MissingIdentity,
            AuthError::MalformedIdentity,
            AuthError::MissingAuthHeader,
            AuthError::InvalidAuthHeader,
            AuthError::TokenMalformed,
            AuthError::TokenBadSignature,
            AuthError::TokenExpired,
            AuthError::TokenMissingClaims,
        ];

        for error in variants {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(body_bytes.as_ref(), br#"{"error":"unauthorized"}"#);
        }
    }

    #[tokio::test]
    async fn internal_failure_returns_500_without_detail() {
        let response = AuthError::Internal("signing key rejected".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(!body.contains("signing key"));
    }

    #[test]
    fn error_codes_are_distinct() {
        let codes = [
            AuthError::MalformedPayload("x".into()).error_code(),
            AuthError::MissingSignature.error_code(),
            AuthError::SignatureMismatch.error_code(),
            AuthError::MissingIdentity.error_code(),
            AuthError::MalformedIdentity.error_code(),
            AuthError::TokenMalformed.error_code(),
            AuthError::TokenBadSignature.error_code(),
            AuthError::TokenExpired.error_code(),
            AuthError::TokenMissingClaims.error_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
