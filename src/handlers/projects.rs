//! Consultas guiadas pelo token de sessão
//!
//! Estas rotas leem o access token gravado pelo callback OAuth2 e
//! refazem as consultas à APS: descoberta GraphQL, listagem REST do
//! Data Management e a árvore de elementGroups de um projeto.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::auth::session_id_from_headers;
use crate::models::ElementGroupNode;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

/// Resolver o access token da sessão do chamador
async fn session_token(state: &AppState, headers: &HeaderMap) -> AppResult<String> {
    let session_id = session_id_from_headers(headers).ok_or_else(|| {
        AppError::Unauthorized("Sessão não estabelecida. Inicie a autorização em /".to_string())
    })?;

    state.sessions.token(&session_id).await.ok_or_else(|| {
        AppError::Unauthorized("Sessão sem access token. Inicie a autorização em /".to_string())
    })
}

/// GET /api/projects
///
/// Reexecuta a descoberta hubs → primeiro hub → projetos com o token
/// da sessão. Mesmos desfechos do callback: payload verbatim, desfecho
/// vazio estruturado, ou `{ error, details }` para falha de query.
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/projects", "GET");

    let token = session_token(&state, &headers).await?;

    match state.discovery.discover(&token).await {
        Ok(value) => Ok(Json(value)),
        Err(e) => {
            log_error(&format!("❌ Falha na descoberta de hubs/projetos: {}", e));
            Ok(Json(json!({
                "error": "Failed to retrieve hubs and projects",
                "details": e.to_string()
            })))
        }
    }
}

/// GET /api/dm/hubs — listagem REST de hubs
pub async fn list_dm_hubs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/dm/hubs", "GET");

    let token = session_token(&state, &headers).await?;
    let hubs = state.data_management.get_hubs(&token).await?;

    Ok(Json(hubs))
}

/// GET /api/dm/hubs/:hub_id/projects — listagem REST de projetos
pub async fn list_dm_projects(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(hub_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/dm/hubs/:hub_id/projects", "GET");

    let token = session_token(&state, &headers).await?;
    let projects = state.data_management.get_projects(&token, &hub_id).await?;

    Ok(Json(projects))
}

/// GET /api/projects/:project_id/element-groups — árvore de elementGroups
pub async fn element_group_tree(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(project_id): Path<String>,
) -> Result<Json<ElementGroupNode>, AppError> {
    log_request_received("/api/projects/:project_id/element-groups", "GET");

    let token = session_token(&state, &headers).await?;
    let tree = state.element_groups.traverse(&token, &project_id).await?;

    Ok(Json(tree))
}
