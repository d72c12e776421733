// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Admin Authentication
//!
//! Admin routes (`/v1/admin/*`) mutate the shared provider registry and are
//! guarded by a single static bearer token read from `ADMIN_API_TOKEN`.
//!
//! - Token unset: admin routes answer `503`
//! - Header missing, malformed, or token mismatch: `401`
//!
//! Tokens are compared in constant time.

pub mod error;
pub mod extractor;

pub use error::AuthError;
pub use extractor::AdminOnly;
