// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::VerifiedIdentity;

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Raw launch payload exactly as handed to the Mini App frontend.
    #[serde(rename = "initData")]
    pub init_data: String,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed session token; present it as `Authorization: Bearer <token>`.
    pub token: String,
}

/// Response body for `GET /api/me`.
///
/// The subject id is stringified so callers treat it as opaque.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    /// Authenticated subject id.
    pub user_id: String,
    /// Display name, when the launch payload carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<VerifiedIdentity> for ProfileResponse {
    fn from(identity: VerifiedIdentity) -> Self {
        Self {
            user_id: identity.subject_id.to_string(),
            display_name: identity.display_name,
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Current Unix timestamp (seconds).
    pub timestamp: i64,
}
