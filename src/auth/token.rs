// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and validation.
//!
//! Session tokens are self-contained JWTs signed with the application
//! secret (distinct from the bot-derived verification secret). They carry
//! the subject id, the optional display name, and an absolute expiry;
//! nothing is stored server-side and there is no revocation list.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::identity::VerifiedIdentity;
use super::AuthError;

/// The only accepted signing algorithm. Validation pins it so a token
/// declaring anything else is rejected outright.
const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Default session lifetime: 24 hours.
const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims embedded in a session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject id. Optional on the wire so its absence surfaces as
    /// `TokenMissingClaims` rather than a generic parse failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    /// Issued-at (Unix seconds)
    iat: i64,
    /// Expiry (Unix seconds)
    exp: i64,
}

/// Issues and validates session tokens.
///
/// Keys are derived from the application secret once at construction and
/// immutable afterwards; the codec is safe to share across handlers.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionTokenCodec {
    /// Create a codec signing with `secret`, with the default 24 h TTL.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }

    /// Override the session lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Mint a signed session token for a verified identity.
    ///
    /// # Errors
    /// [`AuthError::Internal`] when signing itself fails; callers map
    /// this to a 500, never a 401.
    pub fn issue(&self, identity: &VerifiedIdentity) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = SessionClaims {
            user_id: Some(identity.subject_id),
            username: identity.display_name.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|err| AuthError::Internal(format!("token signing failed: {err}")))
    }

    /// Validate a presented token and recover the identity it asserts.
    ///
    /// Expiry uses zero leeway: a token is rejected the second its `exp`
    /// passes.
    pub fn validate(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::TokenBadSignature,
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => AuthError::TokenBadSignature,
                jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::TokenMissingClaims
                }
                _ => AuthError::TokenMalformed,
            })?;

        let subject_id = data.claims.user_id.ok_or(AuthError::TokenMissingClaims)?;

        Ok(VerifiedIdentity {
            subject_id,
            display_name: data.claims.username,
        })
    }
}

impl std::fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
