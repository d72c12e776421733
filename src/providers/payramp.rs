// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payramp (Paycrest) offramp to East and West African bank and mobile
//! money accounts.

use crate::offramp::{
    Currency, FeeStructure, FormField, OfframpProvider, ProviderCapabilities, CHAIN_BASE,
};

pub const PAYRAMP_PROVIDER_ID: &str = "payramp";

const PAYRAMP_NAME: &str = "Payramp";
const PAYRAMP_DESCRIPTION: &str =
    "Stablecoin payouts to bank and mobile money accounts via the Paycrest network";

const PAYRAMP_CURRENCIES: [(&str, Currency); 5] = [
    (
        "nigeria",
        Currency {
            code: "NGN",
            name: "Nigerian Naira",
            symbol: "₦",
        },
    ),
    (
        "kenya",
        Currency {
            code: "KES",
            name: "Kenyan Shilling",
            symbol: "KSh",
        },
    ),
    (
        "uganda",
        Currency {
            code: "UGX",
            name: "Ugandan Shilling",
            symbol: "USh",
        },
    ),
    (
        "tanzania",
        Currency {
            code: "TZS",
            name: "Tanzanian Shilling",
            symbol: "TSh",
        },
    ),
    (
        "malawi",
        Currency {
            code: "MWK",
            name: "Malawian Kwacha",
            symbol: "MK",
        },
    ),
];

#[derive(Debug, Clone)]
pub struct PayrampProvider {
    capabilities: ProviderCapabilities,
}

impl PayrampProvider {
    pub fn new() -> Self {
        Self {
            capabilities: ProviderCapabilities {
                supported_countries: PAYRAMP_CURRENCIES
                    .iter()
                    .map(|(country, _)| country.to_string())
                    .collect(),
                supported_chains: vec![CHAIN_BASE],
                supported_tokens: vec!["USDC".to_string()],
                min_amount: Some(1.0),
                max_amount: Some(100_000.0),
                fees: Some(FeeStructure {
                    fixed: None,
                    percentage: Some(0.5),
                }),
                estimated_time: "1-5 minutes".to_string(),
            },
        }
    }

    fn lookup(country: &str) -> Option<Currency> {
        PAYRAMP_CURRENCIES
            .iter()
            .find(|(id, _)| *id == country)
            .map(|(_, currency)| *currency)
    }
}

impl Default for PayrampProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OfframpProvider for PayrampProvider {
    fn id(&self) -> &str {
        PAYRAMP_PROVIDER_ID
    }

    fn name(&self) -> &str {
        PAYRAMP_NAME
    }

    fn description(&self) -> &str {
        PAYRAMP_DESCRIPTION
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    fn currency_code(&self, country: &str) -> Option<&'static str> {
        Self::lookup(country).map(|currency| currency.code)
    }

    fn currencies(&self, country: &str) -> Vec<Currency> {
        Self::lookup(country).into_iter().collect()
    }

    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::select("account_type", "Account type", &["bank", "mobile_money"]),
            FormField::text("institution", "Bank or mobile money operator", true),
            FormField::text("account_identifier", "Account or phone number", true)
                .with_placeholder("0123456789"),
            FormField::text("account_name", "Account holder name", true),
            FormField::text("memo", "Reference", false),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offramp::{OfframpContext, CHAIN_ARBITRUM};

    #[test]
    fn supports_tanzania_usdc_on_base() {
        let provider = PayrampProvider::new();
        assert!(provider.supports("tanzania", CHAIN_BASE, "USDC"));
        assert!(!provider.supports("kenya", CHAIN_ARBITRUM, "USDT"));
        assert!(!provider.supports("indonesia", CHAIN_BASE, "USDC"));
    }

    #[test]
    fn currency_lookup() {
        let provider = PayrampProvider::new();
        assert_eq!(provider.currency_code("kenya"), Some("KES"));
        assert_eq!(provider.currency_code("indonesia"), None);

        let currencies = provider.currencies("nigeria");
        assert_eq!(currencies.len(), 1);
        assert_eq!(currencies[0].symbol, "₦");
        assert!(provider.currencies("atlantis").is_empty());
    }

    #[test]
    fn every_supported_country_has_a_currency() {
        let provider = PayrampProvider::new();
        for country in &provider.capabilities().supported_countries {
            assert!(provider.currency_code(country).is_some(), "{country}");
        }
    }

    #[test]
    fn validates_limits() {
        let provider = PayrampProvider::new();
        let ctx = |amount: &str| OfframpContext::new("tanzania", CHAIN_BASE, "USDC", amount);
        assert!(!provider.validate(&ctx("0")).valid);
        assert!(!provider.validate(&ctx("100001")).valid);
        assert!(provider.validate(&ctx("50")).valid);
    }

    #[test]
    fn fee_is_half_a_percent() {
        let fee = PayrampProvider::new().estimate_fee(1000.0).unwrap();
        assert!((fee - 5.0).abs() < 1e-9);
    }

    #[test]
    fn form_requires_account_details() {
        let fields = PayrampProvider::new().form_fields();
        let required: Vec<_> = fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            required,
            ["account_type", "institution", "account_identifier", "account_name"]
        );
    }
}
