//! Health and listing status endpoints

use axum::Json;
use axum::extract::State;

use crate::listing::RefreshReport;
use crate::server::AppState;

/// Liveness check.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Last listing refresh report, `null` until the first refresh finished.
pub async fn listing_status(State(state): State<AppState>) -> Json<Option<RefreshReport>> {
    Json(state.refresher.last_report().await)
}
