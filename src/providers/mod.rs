// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Concrete settlement providers.

pub mod idrx;
pub mod payramp;

pub use idrx::{IdrxProvider, IDRX_PROVIDER_ID};
pub use payramp::{PayrampProvider, PAYRAMP_PROVIDER_ID};
