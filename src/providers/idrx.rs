// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! IDRX offramp to Indonesian bank accounts (IDR).

use crate::offramp::{
    Currency, FeeStructure, FormField, OfframpProvider, ProviderCapabilities, CHAIN_BASE,
    CHAIN_POLYGON,
};

pub const IDRX_PROVIDER_ID: &str = "idrx";

const IDRX_COUNTRY: &str = "indonesia";
const IDRX_CURRENCY: Currency = Currency {
    code: "IDR",
    name: "Indonesian Rupiah",
    symbol: "Rp",
};

#[derive(Debug, Clone)]
pub struct IdrxProvider {
    capabilities: ProviderCapabilities,
}

impl IdrxProvider {
    pub fn new() -> Self {
        Self {
            capabilities: ProviderCapabilities {
                supported_countries: vec![IDRX_COUNTRY.to_string()],
                supported_chains: vec![CHAIN_BASE, CHAIN_POLYGON],
                supported_tokens: ["USDC", "USDT", "IDRX"]
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
                min_amount: Some(10.0),
                max_amount: Some(50_000.0),
                fees: Some(FeeStructure {
                    fixed: Some(0.5),
                    percentage: None,
                }),
                estimated_time: "1-3 minutes".to_string(),
            },
        }
    }
}

impl Default for IdrxProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OfframpProvider for IdrxProvider {
    fn id(&self) -> &str {
        IDRX_PROVIDER_ID
    }

    fn name(&self) -> &str {
        "IDRX"
    }

    fn description(&self) -> &str {
        "Redeem stablecoins to Indonesian bank accounts in Rupiah"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    fn currency_code(&self, country: &str) -> Option<&'static str> {
        (country == IDRX_COUNTRY).then_some(IDRX_CURRENCY.code)
    }

    fn currencies(&self, country: &str) -> Vec<Currency> {
        if country == IDRX_COUNTRY {
            vec![IDRX_CURRENCY]
        } else {
            Vec::new()
        }
    }

    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("bank_code", "Bank", true).with_placeholder("014"),
            FormField::number("bank_account_number", "Account number", true),
            FormField::text("bank_account_name", "Account holder name", true),
        ]
    }
}
