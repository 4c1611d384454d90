// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity extraction from verified launch payloads.

use serde::Deserialize;

use super::verify::VerifiedLaunch;
use super::AuthError;

/// The identity asserted by a verified launch payload.
///
/// Produced only from a [`VerifiedLaunch`]; consumed immediately to mint
/// a session token or to populate request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Stable numeric id of the authenticated principal.
    pub subject_id: i64,
    /// Human-readable name, when the payload carries one.
    pub display_name: Option<String>,
}

/// The JSON object inside the payload's `user` field.
#[derive(Debug, Deserialize)]
struct LaunchUser {
    id: i64,
    #[serde(default)]
    username: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

impl LaunchUser {
    /// Prefer `username`; fall back to "first last", trimmed.
    fn display_name(&self) -> Option<String> {
        if !self.username.is_empty() {
            return Some(self.username.clone());
        }
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            None
        } else {
            Some(full.to_string())
        }
    }
}

impl VerifiedIdentity {
    /// Extract the identity from a verified payload.
    ///
    /// # Errors
    /// [`AuthError::MissingIdentity`] when the `user` field is absent or
    /// empty; [`AuthError::MalformedIdentity`] when it is not a JSON
    /// object with a numeric `id`. Callers on the login path must treat
    /// both as authentication failures.
    pub fn from_launch(launch: &VerifiedLaunch) -> Result<Self, AuthError> {
        let raw = launch
            .get("user")
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingIdentity)?;

        let user: LaunchUser =
            serde_json::from_str(raw).map_err(|_| AuthError::MalformedIdentity)?;

        Ok(Self {
            subject_id: user.id,
            display_name: user.display_name(),
        })
    }
}
