//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use formular_core::Config;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/openapi.json", get(openapi_spec))
        .route("/api/pdf/fill", post(handlers::pdf_fill::fill_form))
        .route(
            "/api/subsidiaries/{id}/documents",
            post(handlers::documents::upload_document).delete(handlers::documents::delete_document),
        )
        .route(
            "/api/subsidiaries/{id}/documents/url",
            get(handlers::documents::get_document_url),
        )
        .route(
            "/api/subsidiaries/{id}/document-requirements",
            get(handlers::requirements::get_document_requirements),
        )
        .route(
            "/api/subsidiaries/{id}/onboarding",
            get(handlers::onboarding::get_onboarding).put(handlers::onboarding::update_onboarding),
        )
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: String,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    match tokio::time::timeout(TIMEOUT, sqlx::query("SELECT 1").execute(&state.pool)).await {
        Ok(Ok(_)) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: "healthy".to_string(),
            }),
        ),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    database: format!("unhealthy: {}", e),
                }),
            )
        }
        Err(_) => {
            tracing::error!("Database health check timed out");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    database: "timeout".to_string(),
                }),
            )
        }
    }
}

async fn openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins().iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    };
    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_wire_format() {
        let healthy = serde_json::to_value(HealthResponse {
            status: "healthy",
            database: "healthy".to_string(),
        })
        .unwrap();
        assert_eq!(healthy["status"], "healthy");
        assert_eq!(healthy["database"], "healthy");
    }
}
