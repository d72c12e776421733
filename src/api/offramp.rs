// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Offramp provider discovery, selection and validation API.

use std::sync::Arc;

use alloy::primitives::Address;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::ApiError,
    offramp::{
        countries_for_provider, find_country, parse_amount, Country, FormField, OfframpContext,
        OfframpProvider, ProviderCapabilities, RegistryStats, ValidationResult, COUNTRIES,
    },
    state::AppState,
};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Destination country exposed to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CountryResponse {
    pub id: String,
    pub name: String,
    /// Flag emoji.
    pub flag: String,
    pub currency_code: String,
    pub currency_symbol: String,
    /// Provider ids that pay out in this country.
    pub providers: Vec<String>,
}

impl From<&Country> for CountryResponse {
    fn from(country: &Country) -> Self {
        Self {
            id: country.id.to_string(),
            name: country.name.to_string(),
            flag: country.flag.to_string(),
            currency_code: country.currency_code.to_string(),
            currency_symbol: country.currency_symbol.to_string(),
            providers: country.providers.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CountryQuery {
    /// Only countries this provider pays out in.
    pub provider: Option<String>,
}

/// Public view of a registered provider.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub capabilities: ProviderCapabilities,
}

impl ProviderSummary {
    pub fn from_provider(provider: &dyn OfframpProvider) -> Self {
        Self {
            id: provider.id().to_string(),
            name: provider.name().to_string(),
            description: provider.description().to_string(),
            capabilities: provider.capabilities().clone(),
        }
    }
}

/// Payout currency of a provider in one country.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CountryCurrency {
    pub country: String,
    /// Display name, when the country is in the reference list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    pub code: String,
    pub name: String,
    pub symbol: String,
}

/// Full provider description, including the recipient form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderDetailResponse {
    pub provider: ProviderSummary,
    pub currencies: Vec<CountryCurrency>,
    pub form_fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderListResponse {
    /// Highest priority first.
    pub providers: Vec<ProviderSummary>,
    pub total: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProviderListQuery {
    /// Include only enabled providers (default `true`).
    pub enabled_only: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SelectQuery {
    /// Destination country id (e.g. `tanzania`).
    pub country: String,
    /// EVM chain id (e.g. `8453`).
    pub chain_id: u64,
    /// Token symbol (e.g. `USDC`).
    pub token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SelectionResponse {
    /// Whether any enabled provider supports the combination.
    pub supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderSummary>,
    pub alternatives: Vec<ProviderSummary>,
    pub reason: String,
}

/// Offramp request to validate before collecting recipient details.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ValidateOfframpRequest {
    #[serde(flatten)]
    pub context: OfframpContext,
    /// Validate against this provider instead of the selected one.
    #[serde(default)]
    pub provider_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidateOfframpResponse {
    /// Identifier for this offramp flow, echoed in logs.
    pub flow_id: Uuid,
    pub provider_id: String,
    pub validation: ValidationResult,
    /// Fiat currency the payout settles in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// Provider fee in token units, present for valid requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_fee: Option<f64>,
    pub estimated_time: String,
    pub validated_at: DateTime<Utc>,
}

fn summaries(providers: &[Arc<dyn OfframpProvider>]) -> Vec<ProviderSummary> {
    providers
        .iter()
        .map(|provider| ProviderSummary::from_provider(provider.as_ref()))
        .collect()
}

fn resolve_provider(
    state: &AppState,
    request: &ValidateOfframpRequest,
) -> Result<Arc<dyn OfframpProvider>, ApiError> {
    let context = &request.context;

    if let Some(id) = request
        .provider_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        return state
            .registry
            .get_provider(id)
            .ok_or_else(|| ApiError::not_found(format!("Offramp provider `{id}` not found")));
    }

    let selection =
        state
            .registry
            .select_provider(&context.country, context.chain_id, &context.token);
    selection
        .provider
        .ok_or_else(|| ApiError::unprocessable(selection.reason))
}

// ============================================================================
// Handlers
// ============================================================================

#[utoipa::path(
    get,
    path = "/v1/offramp/countries",
    params(CountryQuery),
    tag = "Offramp",
    responses((status = 200, body = [CountryResponse]))
)]
pub async fn list_countries(Query(params): Query<CountryQuery>) -> Json<Vec<CountryResponse>> {
    let countries: Vec<CountryResponse> = match params.provider.as_deref() {
        Some(provider_id) => countries_for_provider(provider_id)
            .into_iter()
            .map(CountryResponse::from)
            .collect(),
        None => COUNTRIES.iter().map(CountryResponse::from).collect(),
    };
    Json(countries)
}

#[utoipa::path(
    get,
    path = "/v1/offramp/providers",
    params(ProviderListQuery),
    tag = "Offramp",
    responses((status = 200, body = ProviderListResponse))
)]
pub async fn list_providers(
    State(state): State<AppState>,
    Query(params): Query<ProviderListQuery>,
) -> Json<ProviderListResponse> {
    let providers = summaries(
        &state
            .registry
            .get_all_providers(params.enabled_only.unwrap_or(true)),
    );
    Json(ProviderListResponse {
        total: providers.len(),
        providers,
    })
}

#[utoipa::path(
    get,
    path = "/v1/offramp/providers/{provider_id}",
    params(
        ("provider_id" = String, Path, description = "Provider identifier (e.g. `payramp`)")
    ),
    tag = "Offramp",
    responses(
        (status = 200, body = ProviderDetailResponse),
        (status = 404, description = "Provider not registered or disabled")
    )
)]
pub async fn get_provider(
    Path(provider_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ProviderDetailResponse>, ApiError> {
    let provider = state
        .registry
        .get_provider(&provider_id)
        .ok_or_else(|| ApiError::not_found(format!("Offramp provider `{provider_id}` not found")))?;

    let currencies = provider
        .capabilities()
        .supported_countries
        .iter()
        .flat_map(|country| {
            provider
                .currencies(country)
                .into_iter()
                .map(move |currency| CountryCurrency {
                    country: country.clone(),
                    country_name: find_country(country).map(|c| c.name.to_string()),
                    code: currency.code.to_string(),
                    name: currency.name.to_string(),
                    symbol: currency.symbol.to_string(),
                })
        })
        .collect();

    Ok(Json(ProviderDetailResponse {
        provider: ProviderSummary::from_provider(provider.as_ref()),
        currencies,
        form_fields: provider.form_fields(),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/offramp/select",
    params(SelectQuery),
    tag = "Offramp",
    responses((status = 200, body = SelectionResponse))
)]
pub async fn select_provider(
    State(state): State<AppState>,
    Query(params): Query<SelectQuery>,
) -> Json<SelectionResponse> {
    let selection = state
        .registry
        .select_provider(&params.country, params.chain_id, &params.token);

    Json(SelectionResponse {
        supported: selection.provider.is_some(),
        provider: selection
            .provider
            .as_deref()
            .map(|provider| ProviderSummary::from_provider(provider)),
        alternatives: summaries(&selection.alternatives),
        reason: selection.reason,
    })
}

#[utoipa::path(
    post,
    path = "/v1/offramp/validate",
    request_body = ValidateOfframpRequest,
    tag = "Offramp",
    responses(
        (status = 200, body = ValidateOfframpResponse),
        (status = 400, description = "Malformed wallet address"),
        (status = 404, description = "Requested provider not found"),
        (status = 422, description = "No provider supports the combination")
    )
)]
pub async fn validate_offramp(
    State(state): State<AppState>,
    Json(request): Json<ValidateOfframpRequest>,
) -> Result<Json<ValidateOfframpResponse>, ApiError> {
    if let Some(wallet) = request.context.wallet_address.as_deref() {
        wallet
            .trim()
            .parse::<Address>()
            .map_err(|_| ApiError::bad_request("wallet_address is not a valid EVM address"))?;
    }

    let provider = resolve_provider(&state, &request)?;
    let context = &request.context;
    let validation = provider.validate(context);

    let estimated_fee = if validation.valid {
        parse_amount(&context.amount).and_then(|amount| provider.estimate_fee(amount))
    } else {
        None
    };

    let flow_id = Uuid::new_v4();
    info!(
        flow_id = %flow_id,
        provider_id = %provider.id(),
        country = %context.country,
        chain_id = context.chain_id,
        token = %context.token,
        valid = validation.valid,
        "Validated offramp request"
    );

    Ok(Json(ValidateOfframpResponse {
        flow_id,
        provider_id: provider.id().to_string(),
        currency_code: provider.currency_code(&context.country).map(str::to_string),
        estimated_fee,
        estimated_time: provider.capabilities().estimated_time.clone(),
        validation,
        validated_at: Utc::now(),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/offramp/stats",
    tag = "Offramp",
    responses((status = 200, body = RegistryStats))
)]
pub async fn registry_stats(State(state): State<AppState>) -> Json<RegistryStats> {
    Json(state.registry.get_stats())
}
