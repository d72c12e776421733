// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Settlement provider trait.

use super::types::{
    parse_amount, ChainId, Currency, FormField, OfframpContext, ProviderCapabilities,
    ValidationResult,
};

/// A third-party service that executes the fiat leg of an offramp.
///
/// Implementations are stateless: everything a provider knows lives in its
/// [`ProviderCapabilities`] and its compiled-in currency table.
pub trait OfframpProvider: Send + Sync {
    /// Stable identifier, unique within a registry.
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn capabilities(&self) -> &ProviderCapabilities;

    /// ISO currency code this provider pays out in for `country`.
    fn currency_code(&self, country: &str) -> Option<&'static str>;

    /// Currencies available in `country` (zero or one today).
    fn currencies(&self, country: &str) -> Vec<Currency>;

    /// Recipient fields the payout form must collect.
    fn form_fields(&self) -> Vec<FormField>;

    fn supports(&self, country: &str, chain_id: ChainId, token: &str) -> bool {
        self.capabilities().supports(country, chain_id, token)
    }

    /// Check a context against this provider.
    ///
    /// Checks run in order (triple, amount format, minimum, maximum) and the
    /// first failure is returned.
    fn validate(&self, context: &OfframpContext) -> ValidationResult {
        validate_context(self.name(), self.capabilities(), context)
    }

    /// Fee for `amount`, or `None` when the provider publishes no fees.
    fn estimate_fee(&self, amount: f64) -> Option<f64> {
        self.capabilities().fees.map(|fees| fees.fee_for(amount))
    }
}

/// Shared validation used by the default [`OfframpProvider::validate`].
pub fn validate_context(
    provider_name: &str,
    capabilities: &ProviderCapabilities,
    context: &OfframpContext,
) -> ValidationResult {
    if !capabilities.supports(&context.country, context.chain_id, &context.token) {
        return ValidationResult::invalid(format!(
            "{provider_name} does not support this country/chain/token combination"
        ));
    }

    let Some(amount) = parse_amount(&context.amount) else {
        return ValidationResult::invalid("Please enter a valid amount");
    };

    if let Some(min) = capabilities.min_amount {
        if amount < min {
            return ValidationResult::invalid(format!("Minimum amount is {min}"));
        }
    }

    if let Some(max) = capabilities.max_amount {
        if amount > max {
            return ValidationResult::invalid(format!("Maximum amount is {max}"));
        }
    }

    ValidationResult::ok()
}
