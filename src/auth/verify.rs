// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Launch-payload signature verification.
//!
//! This is the security boundary of the service: everything downstream
//! trusts the subject id that comes out of a verified payload.
//!
//! ## Algorithm
//!
//! 1. `secret_key = HMAC-SHA256(key = "WebAppData", message = bot_token)`
//! 2. check string = `\n`-joined `key=value` pairs, keys sorted ascending
//!    bytewise, excluding the signature fields (`hash`, `signature`)
//! 3. `expected = HMAC-SHA256(key = secret_key, message = check_string)`
//! 4. compare against the supplied `hash` (hex, either case) in constant
//!    time
//!
//! Only `hash` carries the signature. The separate `signature` field the
//! platform also sends is excluded from the check string but its value is
//! never used here.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::payload::{LaunchPayload, HASH_FIELD};
use super::AuthError;

/// Domain separator scoping the bot credential to WebApp verification.
/// Fixed by the issuing platform; not secret, but must match exactly.
const SECRET_DOMAIN_SEPARATOR: &[u8] = b"WebAppData";

/// Fields excluded from the check string.
const SIGNATURE_FIELDS: [&str; 2] = [HASH_FIELD, "signature"];

type HmacSha256 = Hmac<Sha256>;

/// Verifies launch payloads against a bot credential.
///
/// The derived secret is computed once at construction; the verifier is
/// immutable afterwards and safe to share across request handlers.
#[derive(Clone)]
pub struct LaunchVerifier {
    secret_key: [u8; 32],
    diagnostics: bool,
}

impl LaunchVerifier {
    /// Create a verifier for the given bot credential.
    pub fn new(bot_token: &str) -> Self {
        let mut mac = HmacSha256::new_from_slice(SECRET_DOMAIN_SEPARATOR)
            .expect("HMAC accepts keys of any length");
        mac.update(bot_token.as_bytes());
        Self {
            secret_key: mac.finalize().into_bytes().into(),
            diagnostics: false,
        }
    }

    /// Enable mismatch diagnostics.
    ///
    /// When set, a signature mismatch logs the check string and both hash
    /// values. Must stay off in production: the flag is read from
    /// configuration once at startup and never flipped at runtime.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Verify a parsed payload, consuming it.
    ///
    /// # Errors
    /// [`AuthError::MissingSignature`] when no non-empty `hash` field is
    /// present; [`AuthError::SignatureMismatch`] when the supplied hash is
    /// not valid hex or does not match the computed signature.
    pub fn verify(&self, payload: LaunchPayload) -> Result<VerifiedLaunch, AuthError> {
        let supplied = payload.supplied_hash().ok_or(AuthError::MissingSignature)?;
        let check_string = check_string(payload.fields());

        // hex::decode accepts either case, which is the normalization the
        // comparison needs; anything non-hex can never match.
        let supplied_digest = match hex::decode(supplied) {
            Ok(digest) => digest,
            Err(_) => return Err(self.reject(&check_string, supplied)),
        };

        let mut mac = self.mac();
        mac.update(check_string.as_bytes());
        if mac.verify_slice(&supplied_digest).is_err() {
            return Err(self.reject(&check_string, supplied));
        }

        Ok(VerifiedLaunch {
            fields: payload.into_fields(),
        })
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret_key).expect("HMAC accepts keys of any length")
    }

    fn reject(&self, check_string: &str, supplied: &str) -> AuthError {
        if self.diagnostics {
            let mut mac = self.mac();
            mac.update(check_string.as_bytes());
            let expected = hex::encode(mac.finalize().into_bytes());
            tracing::warn!(
                %expected,
                received = %supplied.to_ascii_lowercase(),
                %check_string,
                "launch payload signature mismatch"
            );
        }
        AuthError::SignatureMismatch
    }
}

impl std::fmt::Debug for LaunchVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchVerifier")
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

/// A launch payload whose signature has been checked.
///
/// Constructible only through [`LaunchVerifier::verify`], so holding one
/// is proof of verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedLaunch {
    fields: BTreeMap<String, String>,
}

impl VerifiedLaunch {
    /// Decoded value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Build the canonical check string for a field set.
fn check_string(fields: &BTreeMap<String, String>) -> String {
    let pairs: Vec<String> = fields
        .iter()
        .filter(|(key, _)| !SIGNATURE_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    pairs.join("\n")
}
