// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mini App Gateway - Telegram Launch-Payload Authentication Service
//!
//! This crate verifies signed Telegram WebApp launch payloads and issues
//! short-lived session JWTs. Token validation is the only trust boundary:
//! every authenticated route receives its subject id exclusively from a
//! validated token.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Launch-payload verification and session tokens
//! - `config` - Environment configuration
//! - `models` - Wire models

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod state;
