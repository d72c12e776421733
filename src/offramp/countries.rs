// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Reference table of offramp destination countries.

use serde::Serialize;

/// A destination country and the providers that pay out there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    pub id: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub currency_code: &'static str,
    pub currency_symbol: &'static str,
    pub providers: &'static [&'static str],
}

pub const COUNTRIES: &[Country] = &[
    Country {
        id: "nigeria",
        name: "Nigeria",
        flag: "🇳🇬",
        currency_code: "NGN",
        currency_symbol: "₦",
        providers: &["payramp"],
    },
    Country {
        id: "kenya",
        name: "Kenya",
        flag: "🇰🇪",
        currency_code: "KES",
        currency_symbol: "KSh",
        providers: &["payramp"],
    },
    Country {
        id: "uganda",
        name: "Uganda",
        flag: "🇺🇬",
        currency_code: "UGX",
        currency_symbol: "USh",
        providers: &["payramp"],
    },
    Country {
        id: "tanzania",
        name: "Tanzania",
        flag: "🇹🇿",
        currency_code: "TZS",
        currency_symbol: "TSh",
        providers: &["payramp"],
    },
    Country {
        id: "malawi",
        name: "Malawi",
        flag: "🇲🇼",
        currency_code: "MWK",
        currency_symbol: "MK",
        providers: &["payramp"],
    },
    Country {
        id: "indonesia",
        name: "Indonesia",
        flag: "🇮🇩",
        currency_code: "IDR",
        currency_symbol: "Rp",
        providers: &["idrx"],
    },
];

/// Look up a country by id.
pub fn find_country(id: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|country| country.id == id)
}

/// Countries that list `provider_id`.
pub fn countries_for_provider(provider_id: &str) -> Vec<&'static Country> {
    COUNTRIES
        .iter()
        .filter(|country| country.providers.contains(&provider_id))
        .collect()
}
