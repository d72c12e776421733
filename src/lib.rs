// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Offramp Server - Settlement Provider Selection Service
//!
//! Chooses which settlement provider converts a user's stablecoins to local
//! fiat for a (country, chain, token) triple, validates the requested amount
//! against that provider's limits, and describes the recipient form.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Admin bearer token guard
//! - `offramp` - Provider contract, registry and selection
//! - `providers` - Built-in providers (Payramp, IDRX)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod offramp;
pub mod providers;
pub mod state;
pub mod telemetry;
