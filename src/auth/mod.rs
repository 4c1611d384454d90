// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Verifies Telegram WebApp launch payloads and manages session tokens.
//!
//! ## Login Flow
//!
//! 1. Mini App frontend sends the raw `initData` launch payload
//! 2. [`LaunchPayload::parse`] decodes it into a field set
//! 3. [`LaunchVerifier::verify`] rebuilds the check string, derives the
//!    `WebAppData`-scoped secret from the bot credential, and compares
//!    HMAC-SHA256 signatures in constant time
//! 4. [`VerifiedIdentity::from_launch`] extracts the subject id and
//!    display name from the verified `user` field
//! 5. [`SessionTokenCodec::issue`] mints a signed, expiring session JWT
//!
//! ## Request Flow
//!
//! Subsequent requests present `Authorization: Bearer <token>`;
//! [`CurrentUser`] validates it and exposes the subject identity to
//! handlers as the only trusted identity source.
//!
//! ## Security
//!
//! - Signature comparison is constant-time and case-insensitive
//! - The token algorithm is pinned; substitution attempts are rejected
//! - All failures collapse to one generic 401 for the client
//! - Mismatch diagnostics are gated behind an explicit startup flag

pub mod error;
pub mod extractor;
pub mod identity;
pub mod payload;
pub mod token;
pub mod verify;

pub use error::AuthError;
pub use extractor::CurrentUser;
pub use identity::VerifiedIdentity;
pub use payload::LaunchPayload;
pub use token::SessionTokenCodec;
pub use verify::{LaunchVerifier, VerifiedLaunch};
