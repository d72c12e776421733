// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::ErrorBody,
    offramp::{
        FeeStructure, FieldKind, FormField, OfframpContext, ProviderCapabilities,
        ProviderStatsSummary, RegistryStats, ValidationResult,
    },
    state::AppState,
};

pub mod admin;
pub mod health;
pub mod offramp;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/offramp/countries", get(offramp::list_countries))
        .route("/offramp/providers", get(offramp::list_providers))
        .route("/offramp/providers/{provider_id}", get(offramp::get_provider))
        .route("/offramp/select", get(offramp::select_provider))
        .route("/offramp/validate", post(offramp::validate_offramp))
        .route("/offramp/stats", get(offramp::registry_stats))
        .route(
            "/admin/offramp/providers",
            get(admin::list_registry_entries),
        )
        .route(
            "/admin/offramp/providers/{provider_id}",
            delete(admin::unregister_provider),
        )
        .route(
            "/admin/offramp/providers/{provider_id}/enabled",
            put(admin::set_provider_enabled),
        )
        .route(
            "/admin/offramp/providers/{provider_id}/priority",
            put(admin::set_provider_priority),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/v1", v1_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(CorsLayer::permissive())
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        offramp::list_countries,
        offramp::list_providers,
        offramp::get_provider,
        offramp::select_provider,
        offramp::validate_offramp,
        offramp::registry_stats,
        admin::list_registry_entries,
        admin::set_provider_enabled,
        admin::set_provider_priority,
        admin::unregister_provider
    ),
    components(
        schemas(
            ErrorBody,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks,
            offramp::CountryResponse,
            offramp::ProviderSummary,
            offramp::CountryCurrency,
            offramp::ProviderDetailResponse,
            offramp::ProviderListResponse,
            offramp::SelectionResponse,
            offramp::ValidateOfframpRequest,
            offramp::ValidateOfframpResponse,
            admin::AdminProviderEntry,
            admin::AdminProviderListResponse,
            admin::SetEnabledRequest,
            admin::SetPriorityRequest,
            OfframpContext,
            ProviderCapabilities,
            FeeStructure,
            FormField,
            FieldKind,
            ValidationResult,
            RegistryStats,
            ProviderStatsSummary
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Offramp", description = "Settlement provider discovery, selection and validation"),
        (name = "Admin", description = "Provider registry management")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn admin_state(token: Option<&str>) -> AppState {
        let mut state = AppState::default();
        state.admin_token = token.map(Into::into);
        state
    }

    async fn send(app: Router, request: Request<Body>) -> Response {
        app.oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn health_is_ok_and_carries_request_id() {
        let response = send(router(AppState::default()), get_request("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn select_route_returns_payramp() {
        let response = send(
            router(AppState::default()),
            get_request("/v1/offramp/select?country=tanzania&chain_id=8453&token=USDC"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["supported"], true);
        assert_eq!(body["provider"]["id"], "payramp");
    }

    #[tokio::test]
    async fn select_route_rejects_bad_chain_id() {
        let response = send(
            router(AppState::default()),
            get_request("/v1/offramp/select?country=tanzania&chain_id=base&token=USDC"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validate_route_accepts_json_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/offramp/validate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"country":"indonesia","chain_id":137,"token":"IDRX","amount":"100"}"#,
            ))
            .unwrap();
        let response = send(router(AppState::default()), request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["provider_id"], "idrx");
        assert_eq!(body["validation"]["valid"], true);
        assert_eq!(body["currency_code"], "IDR");
    }

    #[tokio::test]
    async fn validate_route_maps_unsupported_to_422() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/offramp/validate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"country":"kenya","chain_id":42161,"token":"USDT","amount":"50"}"#,
            ))
            .unwrap();
        let response = send(router(AppState::default()), request).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(
            body["error"],
            "No provider supports USDT on chain 42161 in kenya"
        );
    }

    #[tokio::test]
    async fn admin_routes_disabled_without_token() {
        let response = send(router(admin_state(None)), get_request("/v1/admin/offramp/providers")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn admin_routes_reject_wrong_token() {
        let request = Request::builder()
            .uri("/v1/admin/offramp/providers")
            .header(header::AUTHORIZATION, "Bearer nope")
            .body(Body::empty())
            .unwrap();
        let response = send(router(admin_state(Some("s3cret"))), request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_toggle_is_visible_to_public_routes() {
        let state = admin_state(Some("s3cret"));

        let request = Request::builder()
            .method("PUT")
            .uri("/v1/admin/offramp/providers/payramp/enabled")
            .header(header::AUTHORIZATION, "Bearer s3cret")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"enabled":false}"#))
            .unwrap();
        let response = send(router(state.clone()), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            router(state),
            get_request("/v1/offramp/select?country=kenya&chain_id=8453&token=USDC"),
        )
        .await;
        let body = json_body(response).await;
        assert_eq!(body["supported"], false);
    }

    #[tokio::test]
    async fn openapi_lists_offramp_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/offramp/select"));
        assert!(doc
            .paths
            .paths
            .contains_key("/v1/admin/offramp/providers/{provider_id}/enabled"));
    }
}
