// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and is
//! immutable afterwards. Missing secrets are fatal: the service refuses
//! to serve traffic rather than fall back to a default signing secret.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `TELEGRAM_BOT_TOKEN` | Bot credential used to verify launch payloads | Required |
//! | `JWT_SECRET` | Session token signing secret | Required |
//! | `SESSION_TTL_HOURS` | Session token lifetime in hours | `24` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `CORS_ORIGINS` | Comma-separated allowed origins, `*` for any | `*` |
//! | `AUTH_DIAGNOSTICS` | Log signature-mismatch details (never in production) | `false` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use chrono::Duration;

/// Configuration error. Fatal at startup; never surfaced per-request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("{0} is invalid: {1}")]
    InvalidVar(&'static str, String),
}

/// Immutable application configuration.
#[derive(Clone)]
pub struct Config {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Bot credential for launch-payload verification
    pub bot_token: String,
    /// Session token signing secret
    pub session_secret: String,
    /// Session token lifetime
    pub session_ttl: Duration,
    /// Allowed CORS origins (`*` means any)
    pub cors_origins: Vec<String>,
    /// Gate for signature-mismatch diagnostics
    pub auth_diagnostics: bool,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary lookup (testable core).
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = required(&lookup, "TELEGRAM_BOT_TOKEN")?;
        let session_secret = required(&lookup, "JWT_SECRET")?;

        let host = optional(&lookup, "HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match optional(&lookup, "PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|err| ConfigError::InvalidVar("PORT", err.to_string()))?,
            None => 8080,
        };

        let session_ttl = match optional(&lookup, "SESSION_TTL_HOURS") {
            Some(raw) => {
                let hours = raw
                    .parse::<i64>()
                    .map_err(|err| ConfigError::InvalidVar("SESSION_TTL_HOURS", err.to_string()))?;
                if hours <= 0 {
                    return Err(ConfigError::InvalidVar(
                        "SESSION_TTL_HOURS",
                        "must be positive".to_string(),
                    ));
                }
                Duration::hours(hours)
            }
            None => Duration::hours(24),
        };

        let cors_origins = match optional(&lookup, "CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => vec!["*".to_string()],
        };

        let auth_diagnostics = match optional(&lookup, "AUTH_DIAGNOSTICS") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                other => {
                    return Err(ConfigError::InvalidVar(
                        "AUTH_DIAGNOSTICS",
                        format!("expected true or false, got {other}"),
                    ))
                }
            },
            None => false,
        };

        Ok(Self {
            host,
            port,
            bot_token,
            session_secret,
            session_ttl,
            cors_origins,
            auth_diagnostics,
        })
    }
}

// Secrets stay out of Debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("session_ttl", &self.session_ttl)
            .field("cors_origins", &self.cors_origins)
            .field("auth_diagnostics", &self.auth_diagnostics)
            .finish_non_exhaustive()
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    optional(lookup, name).ok_or(ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|value| value.to_string())
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("TELEGRAM_BOT_TOKEN", "123456:bot-token"),
        ("JWT_SECRET", "session-secret"),
    ];

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_lookup(lookup_from(MINIMAL)).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_ttl, Duration::hours(24));
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert!(!config.auth_diagnostics);
    }

    #[test]
    fn missing_signing_secret_is_fatal() {
        let result =
            Config::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "123456:bot-token")]));
        assert!(matches!(result, Err(ConfigError::MissingVar("JWT_SECRET"))));
    }

    #[test]
    fn missing_bot_token_is_fatal() {
        let result = Config::from_lookup(lookup_from(&[("JWT_SECRET", "session-secret")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingVar("TELEGRAM_BOT_TOKEN"))
        ));
    }

    #[test]
    fn whitespace_only_secret_counts_as_unset() {
        let result = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "123456:bot-token"),
            ("JWT_SECRET", "   "),
        ]));
        assert!(matches!(result, Err(ConfigError::MissingVar("JWT_SECRET"))));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let mut vars = MINIMAL.to_vec();
        vars.push(("CORS_ORIGINS", "https://a.example, https://b.example"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut vars = MINIMAL.to_vec();
        vars.push(("PORT", "not-a-port"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&vars)),
            Err(ConfigError::InvalidVar("PORT", _))
        ));
    }

    #[test]
    fn non_positive_ttl_is_rejected() {
        let mut vars = MINIMAL.to_vec();
        vars.push(("SESSION_TTL_HOURS", "0"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&vars)),
            Err(ConfigError::InvalidVar("SESSION_TTL_HOURS", _))
        ));
    }

    #[test]
    fn diagnostics_flag_parses_strictly() {
        let mut vars = MINIMAL.to_vec();
        vars.push(("AUTH_DIAGNOSTICS", "true"));
        assert!(Config::from_lookup(lookup_from(&vars))
            .unwrap()
            .auth_diagnostics);

        let mut vars = MINIMAL.to_vec();
        vars.push(("AUTH_DIAGNOSTICS", "yes"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&vars)),
            Err(ConfigError::InvalidVar("AUTH_DIAGNOSTICS", _))
        ));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = Config::from_lookup(lookup_from(MINIMAL)).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("123456:bot-token"));
        assert!(!rendered.contains("session-secret"));
    }
}
