// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Offramp Data Types
//!
//! Value types shared by providers, the registry and the HTTP layer.
//!
//! - [`ProviderCapabilities`]: what a settlement provider can process
//! - [`OfframpContext`]: one user's offramp request, built per flow
//! - [`ValidationResult`]: outcome of validating a context against a provider
//! - [`FormField`]: recipient detail a provider's form collects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Numeric EVM chain identifier (e.g. `8453` for Base).
pub type ChainId = u64;

/// Base mainnet.
pub const CHAIN_BASE: ChainId = 8453;
/// Polygon PoS mainnet.
pub const CHAIN_POLYGON: ChainId = 137;
/// Arbitrum One.
pub const CHAIN_ARBITRUM: ChainId = 42161;

// =============================================================================
// Currency
// =============================================================================

/// A fiat currency a provider settles into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    /// ISO 4217 code (e.g. `TZS`).
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display symbol.
    pub symbol: &'static str,
}

// =============================================================================
// Capabilities
// =============================================================================

/// Fees charged by a provider on top of the payout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeeStructure {
    /// Flat fee in token units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed: Option<f64>,
    /// Percentage of the amount (`0.5` means 0.5%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl FeeStructure {
    /// Total fee for `amount`: fixed part plus percentage part.
    pub fn fee_for(&self, amount: f64) -> f64 {
        let fixed = self.fixed.unwrap_or(0.0);
        let variable = self
            .percentage
            .map(|pct| amount * pct / 100.0)
            .unwrap_or(0.0);
        fixed + variable
    }
}

/// Static description of what one settlement provider supports.
///
/// Immutable for the lifetime of the provider instance that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProviderCapabilities {
    /// Country ids (e.g. `tanzania`).
    pub supported_countries: Vec<String>,
    /// EVM chain ids.
    #[schema(value_type = Vec<u64>)]
    pub supported_chains: Vec<ChainId>,
    /// Token symbols (e.g. `USDC`), matched exactly.
    pub supported_tokens: Vec<String>,
    /// Smallest accepted amount, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    /// Largest accepted amount, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<FeeStructure>,
    /// Human readable settlement estimate (e.g. `1-5 minutes`).
    pub estimated_time: String,
}

impl ProviderCapabilities {
    /// True iff the country, chain and token are all listed.
    pub fn supports(&self, country: &str, chain_id: ChainId, token: &str) -> bool {
        self.supports_country(country) && self.supports_chain(chain_id) && self.supports_token(token)
    }

    pub fn supports_country(&self, country: &str) -> bool {
        self.supported_countries.iter().any(|c| c == country)
    }

    pub fn supports_chain(&self, chain_id: ChainId) -> bool {
        self.supported_chains.contains(&chain_id)
    }

    pub fn supports_token(&self, token: &str) -> bool {
        self.supported_tokens.iter().any(|t| t == token)
    }
}

// =============================================================================
// Request-scoped context
// =============================================================================

/// A single user's offramp selection.
///
/// Built fresh for every flow and dropped once the request is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OfframpContext {
    /// Destination country id.
    pub country: String,
    /// Chain the tokens are sent from.
    #[schema(value_type = u64)]
    pub chain_id: ChainId,
    /// Token symbol being sold.
    pub token: String,
    /// Amount as entered by the user (decimal string).
    pub amount: String,
    /// Sending wallet, if already connected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

impl OfframpContext {
    pub fn new(
        country: impl Into<String>,
        chain_id: ChainId,
        token: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            chain_id,
            token: token.into(),
            amount: amount.into(),
            wallet_address: None,
        }
    }

    pub fn with_wallet(mut self, wallet_address: impl Into<String>) -> Self {
        self.wallet_address = Some(wallet_address.into());
        self
    }
}

/// Parse a user-entered amount.
///
/// Returns `None` unless the trimmed input is a finite number greater than
/// zero.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Result of [`OfframpProvider::validate`](super::OfframpProvider::validate).
///
/// Carries only the first failing check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

// =============================================================================
// Form descriptors
// =============================================================================

/// Input kind of a [`FormField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Select,
}

/// One recipient detail collected by a provider's payout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormField {
    /// Key the client submits the value under.
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Choices for [`FieldKind::Select`]; empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FormField {
    pub fn text(name: &str, label: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
            required,
            placeholder: None,
            options: Vec::new(),
        }
    }

    /// Digits-only input. The value is still submitted as a string so
    /// leading zeros survive.
    pub fn number(name: &str, label: &str, required: bool) -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::text(name, label, required)
        }
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Select,
            required: true,
            placeholder: None,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }
}

// =============================================================================
// Registry statistics
// =============================================================================

/// Per-provider line of [`RegistryStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProviderStatsSummary {
    pub id: String,
    pub name: String,
    pub priority: i32,
    pub countries: usize,
    pub chains: usize,
    pub tokens: usize,
}

/// Snapshot counts of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegistryStats {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    /// Enabled providers only, highest priority first.
    pub providers: Vec<ProviderStatsSummary>,
}
