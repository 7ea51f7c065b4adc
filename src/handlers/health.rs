use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "aps-hub-middleware",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn status_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let oauth_configured =
        !state.oauth.client_id.is_empty() && !state.oauth.client_secret.is_empty();

    Json(json!({
        "service": "aps-hub-middleware",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
        "aps": {
            "oauth_configured": oauth_configured,
            "base_url": state.settings.aps.base_url,
            "graphql_url": state.settings.aps.graphql_url,
            "redirect_uri": state.oauth.redirect_uri,
            "scopes": state.oauth.scopes
        }
    }))
}
