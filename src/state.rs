// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{LaunchVerifier, SessionTokenCodec};
use crate::config::Config;

/// Shared application state: the launch verifier and the session token
/// codec, both built once from configuration and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<LaunchVerifier>,
    pub session_tokens: Arc<SessionTokenCodec>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            verifier: Arc::new(
                LaunchVerifier::new(&config.bot_token).with_diagnostics(config.auth_diagnostics),
            ),
            session_tokens: Arc::new(
                SessionTokenCodec::new(config.session_secret.as_bytes())
                    .with_ttl(config.session_ttl),
            ),
        }
    }
}
