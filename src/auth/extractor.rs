// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor guarding admin routes.
//!
//! ```rust,ignore
//! async fn toggle(_admin: AdminOnly, State(state): State<AppState>) -> StatusCode {
//!     // only reached with a valid admin token
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::AuthError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Compare a presented token against the configured one without leaking
/// where they differ. Both sides are MACed under the expected token and the
/// tags checked with `verify_slice`, which is constant time.
fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    let tag = |value: &[u8]| {
        // HMAC accepts keys of any length
        let mut mac = HmacSha256::new_from_slice(expected).ok()?;
        mac.update(value);
        Some(mac)
    };

    let Some(presented_tag) = tag(presented).map(|mac| mac.finalize().into_bytes()) else {
        return false;
    };
    tag(expected).is_some_and(|mac| mac.verify_slice(&presented_tag).is_ok())
}

/// Proof that the request carried `Authorization: Bearer <ADMIN_API_TOKEN>`.
pub struct AdminOnly;

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let expected = state.admin_token.as_deref().ok_or(AuthError::AdminDisabled)?;

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        if !tokens_match(token.as_bytes(), expected.as_bytes()) {
            return Err(AuthError::InvalidToken);
        }

        Ok(AdminOnly)
    }
}
