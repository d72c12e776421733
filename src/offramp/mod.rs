// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Offramp Provider Selection
//!
//! Decides which settlement provider converts a user's stablecoins to local
//! fiat, and checks the request against that provider's limits.
//!
//! ## Flow
//!
//! 1. The user picks a country, chain, token and amount
//! 2. [`OfframpProviderRegistry::select_provider`] ranks the enabled providers
//!    that support the triple
//! 3. The chosen provider's [`OfframpProvider::validate`] checks the amount
//! 4. The provider's [`OfframpProvider::form_fields`] describe the recipient
//!    details to collect before the payout is submitted
//!
//! The registry never performs I/O. Submitting the payout to the provider's
//! API happens outside this module.

pub mod countries;
pub mod initializer;
pub mod provider;
pub mod registry;
pub mod types;

pub use countries::{countries_for_provider, find_country, Country, COUNTRIES};
pub use initializer::{
    initialize_offramp_providers, initialize_with_config, BUILTIN_PROVIDER_PRIORITY,
};
pub use provider::{validate_context, OfframpProvider};
pub use registry::{OfframpProviderRegistry, RegistryEntry, RegistryError, SelectionResult};
pub use types::{
    parse_amount, ChainId, Currency, FeeStructure, FieldKind, FormField, OfframpContext,
    ProviderCapabilities, ProviderStatsSummary, RegistryStats, ValidationResult, CHAIN_ARBITRUM,
    CHAIN_BASE, CHAIN_POLYGON,
};
