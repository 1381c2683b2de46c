use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{FindMatchesRequest, FindMatchesResponse, HealthResponse, PartnerId};
use crate::routes::ApiError;
use crate::services::PartnerCatalog;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn PartnerCatalog>,
    pub matcher: Matcher,
}

impl AppState {
    /// Build state whose matcher reads from the same catalog used for lookups
    pub fn new(catalog: Arc<dyn PartnerCatalog>, result_limit: usize) -> Self {
        let matcher = Matcher::new(catalog.clone()).with_result_limit(result_limit);
        Self { catalog, matcher }
    }
}

/// Configure all partner-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/partners/match", web::post().to(find_matches))
        .route("/partners/{id}", web::get().to(get_partner));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let healthy = match state.catalog.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Catalog health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/partners/match
///
/// Request body:
/// ```json
/// {
///   "materials": [1, 2],
///   "address": { "lat": 1.1, "long": 1.2 },
///   "square_meters": 5,
///   "phone_number": "+351912345678"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {}", errors);
        return Err(ApiError::BadRequest(errors.to_string()));
    }

    let query = req
        .to_query()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    tracing::debug!(
        "Match request: materials={:?}, square_meters={:?}, phone_provided={}",
        query.required_materials(),
        req.square_meters,
        req.phone_number.is_some()
    );

    let result = state.matcher.find_matches(&query).await?;

    tracing::info!(
        "Returning {} of {} qualifying partners",
        result.matches.len(),
        result.total_matches
    );

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        total_matches: result.total_matches,
    }))
}

/// Get partner endpoint
///
/// GET /api/v1/partners/{id}
async fn get_partner(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let raw_id = path.into_inner();
    let id: PartnerId = raw_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid partner id: {}", raw_id)))?;

    let partner = state.catalog.get_by_id(id).await?;

    Ok(HttpResponse::Ok().json(partner))
}
