use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use biblioteca_core::environment::FeatureFlags;
use chrono::Utc;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload of `GET /api/environment`.
#[derive(Debug, Serialize)]
pub struct EnvironmentInfo {
    pub environment: &'static str,
    pub name: &'static str,
    pub badge_color: &'static str,
    pub badge_text: &'static str,
    pub features: FeatureFlags,
    /// Where the catalog is stored (table name, or `memory`).
    pub table: String,
    pub version: &'static str,
    /// RFC 3339 time of the request.
    pub timestamp: String,
}

/// GET /api/environment
///
/// Describes the environment profile the process started with.
pub async fn get_environment(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = &state.profile;

    Ok(Json(DataResponse::new(EnvironmentInfo {
        environment: profile.environment,
        name: profile.name,
        badge_color: profile.badge_color,
        badge_text: profile.badge_text,
        features: profile.features,
        table: state.store.location().to_string(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
    })))
}
