// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Launch-payload parsing.
//!
//! A Telegram WebApp launch payload arrives as a percent-encoded
//! `key=value&key=value` string. Parsing is strict: a truncated or
//! non-hex escape rejects the whole payload instead of passing mangled
//! bytes into the signature check.

use std::collections::BTreeMap;

use super::AuthError;

/// Field name carrying the payload signature.
pub(crate) const HASH_FIELD: &str = "hash";

/// Parsed launch payload.
///
/// Keys are unique (the first occurrence of a duplicate wins) and kept in
/// a `BTreeMap`, which is already the ascending bytewise order the
/// check-string needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPayload {
    fields: BTreeMap<String, String>,
}

impl LaunchPayload {
    /// Parse a raw launch payload string.
    ///
    /// # Errors
    /// Returns [`AuthError::MalformedPayload`] for an empty payload, an
    /// invalid percent escape, non-UTF-8 decoded bytes, or a payload that
    /// yields no fields at all.
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        if raw.is_empty() {
            return Err(AuthError::MalformedPayload("empty payload".into()));
        }

        let mut fields = BTreeMap::new();
        for segment in raw.split('&') {
            if segment.is_empty() {
                continue;
            }
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (decode_component(key)?, decode_component(value)?),
                None => (decode_component(segment)?, String::new()),
            };
            // First occurrence wins, matching Go's url.Values.Get.
            fields.entry(key).or_insert(value);
        }

        if fields.is_empty() {
            return Err(AuthError::MalformedPayload("payload has no fields".into()));
        }

        Ok(Self { fields })
    }

    /// Decoded value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The supplied signature, if present and non-empty.
    pub fn supplied_hash(&self) -> Option<&str> {
        self.get(HASH_FIELD).filter(|hash| !hash.is_empty())
    }

    pub(crate) fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub(crate) fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

/// Strictly percent-decode one key or value.
///
/// `+` decodes to a space and `%XX` must be a complete two-digit hex
/// escape. The lossy decoding offered by `form_urlencoded` would let a
/// mangled payload through to the signature check; rejecting it here
/// matches the original wire semantics.
fn decode_component(encoded: &str) -> Result<String, AuthError> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_digit);
                let lo = bytes.get(i + 2).copied().and_then(hex_digit);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        decoded.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        return Err(AuthError::MalformedPayload(format!(
                            "invalid percent escape at byte {i}"
                        )))
                    }
                }
            }
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded)
        .map_err(|_| AuthError::MalformedPayload("decoded bytes are not UTF-8".into()))
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}
