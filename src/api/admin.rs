// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only API endpoints for managing the offramp provider registry.
//!
//! These endpoints require the admin bearer token and provide:
//! - Listing every registered provider, including disabled ones
//! - Enabling/disabling a provider (feature flag)
//! - Changing a provider's priority
//! - Removing a provider until the next restart

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::{auth::AdminOnly, error::ApiError, offramp::RegistryEntry, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Registry entry as seen by admins.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminProviderEntry {
    pub id: String,
    pub name: String,
    /// Higher wins; ties go to the earlier registration.
    pub priority: i32,
    pub enabled: bool,
}

impl From<&RegistryEntry> for AdminProviderEntry {
    fn from(entry: &RegistryEntry) -> Self {
        Self {
            id: entry.provider.id().to_string(),
            name: entry.provider.name().to_string(),
            priority: entry.priority,
            enabled: entry.enabled,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminProviderListResponse {
    /// Every registered provider, highest priority first.
    pub providers: Vec<AdminProviderEntry>,
    pub total: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPriorityRequest {
    pub priority: i32,
}

fn entry_response(state: &AppState, provider_id: &str) -> Result<AdminProviderEntry, ApiError> {
    state
        .registry
        .entries(false)
        .iter()
        .find(|entry| entry.provider.id() == provider_id)
        .map(AdminProviderEntry::from)
        .ok_or_else(|| not_registered(provider_id))
}

fn not_registered(provider_id: &str) -> ApiError {
    ApiError::not_found(format!("Offramp provider `{provider_id}` is not registered"))
}

// ============================================================================
// Handlers
// ============================================================================

#[utoipa::path(
    get,
    path = "/v1/admin/offramp/providers",
    tag = "Admin",
    responses(
        (status = 200, body = AdminProviderListResponse),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 503, description = "Admin API disabled")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_registry_entries(
    _admin: AdminOnly,
    State(state): State<AppState>,
) -> Json<AdminProviderListResponse> {
    let providers: Vec<AdminProviderEntry> = state
        .registry
        .entries(false)
        .iter()
        .map(AdminProviderEntry::from)
        .collect();
    Json(AdminProviderListResponse {
        total: providers.len(),
        providers,
    })
}

#[utoipa::path(
    put,
    path = "/v1/admin/offramp/providers/{provider_id}/enabled",
    params(
        ("provider_id" = String, Path, description = "Provider identifier")
    ),
    request_body = SetEnabledRequest,
    tag = "Admin",
    responses(
        (status = 200, body = AdminProviderEntry),
        (status = 404, description = "Provider not registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_provider_enabled(
    _admin: AdminOnly,
    Path(provider_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetEnabledRequest>,
) -> Result<Json<AdminProviderEntry>, ApiError> {
    if !state.registry.set_enabled(&provider_id, request.enabled) {
        return Err(not_registered(&provider_id));
    }
    info!(provider_id = %provider_id, enabled = request.enabled, "Admin toggled offramp provider");
    Ok(Json(entry_response(&state, &provider_id)?))
}

#[utoipa::path(
    put,
    path = "/v1/admin/offramp/providers/{provider_id}/priority",
    params(
        ("provider_id" = String, Path, description = "Provider identifier")
    ),
    request_body = SetPriorityRequest,
    tag = "Admin",
    responses(
        (status = 200, body = AdminProviderEntry),
        (status = 404, description = "Provider not registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_provider_priority(
    _admin: AdminOnly,
    Path(provider_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetPriorityRequest>,
) -> Result<Json<AdminProviderEntry>, ApiError> {
    if !state.registry.set_priority(&provider_id, request.priority) {
        return Err(not_registered(&provider_id));
    }
    Ok(Json(entry_response(&state, &provider_id)?))
}

#[utoipa::path(
    delete,
    path = "/v1/admin/offramp/providers/{provider_id}",
    params(
        ("provider_id" = String, Path, description = "Provider identifier")
    ),
    tag = "Admin",
    responses(
        (status = 204),
        (status = 404, description = "Provider not registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn unregister_provider(
    _admin: AdminOnly,
    Path(provider_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    if state.registry.unregister(&provider_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_registered(&provider_id))
    }
}
