//! OAuth2 HTTP Handlers
//!
//! Endpoints HTTP para iniciar e completar o fluxo OAuth2

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::session::{session_cookie, session_id_from_headers};
use super::OAuth2Client;
use crate::utils::logging::*;
use crate::utils::{truncate_safe, AppError};
use crate::AppState;

/// Parâmetros do callback OAuth2
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackParams {
    /// Authorization code retornado pela APS
    code: Option<String>,
}

/// GET /
///
/// Inicia o fluxo OAuth2 redirecionando o usuário para a página de
/// autorização da APS. Não tem caminho de falha local: configuração
/// malformada já derrubou o processo no startup.
///
/// Se a requisição ainda não carrega cookie de sessão, um session id
/// opaco é emitido junto com o redirect.
pub async fn start_oauth_flow(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    log_info("🚀 [OAuth2] Iniciando fluxo de autorização...");

    let auth_url = state.oauth.authorization_url();

    log_info(&format!("↗️  [OAuth2] Redirecionando para: {}", auth_url));

    let mut response = (StatusCode::FOUND, [(header::LOCATION, auth_url)], "").into_response();

    if session_id_from_headers(&headers).is_none() {
        let session_id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&session_cookie(&session_id)) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    response
}

/// GET /api/auth/callback?code=XXX
///
/// Recebe o callback OAuth2, troca o code por access token, grava o
/// token na sessão e roda a descoberta hubs → projetos imediatamente.
///
/// # Respostas
/// - 400 `{ error }` se o `code` não veio
/// - 500 `{ error, details }` se a troca de token falhou
/// - 200 com o resultado da descoberta (payload de projetos, ou um dos
///   desfechos vazios estruturados, ou `{ error, details }` quando uma
///   query lançou falha)
pub async fn handle_oauth_callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<OAuthCallbackParams>,
) -> Result<Response, AppError> {
    log_info("📥 [OAuth2] Callback recebido");

    let code = params.code.filter(|c| !c.is_empty()).ok_or_else(|| {
        log_error("❌ [OAuth2] Code não recebido no callback");
        AppError::MissingAuthCode
    })?;

    log_info(&format!(
        "🔑 [OAuth2] Code recebido: {}...",
        truncate_safe(&code, 10)
    ));

    // Uma única chamada ao endpoint de token, sem retry
    let oauth_client = OAuth2Client::new(state.oauth.clone());
    let token_response = oauth_client.exchange_code_for_token(&code).await?;
    let access_token = token_response.access_token;

    // Sessão existente ou recém-criada; a escrita do token acontece
    // exatamente uma vez, aqui
    let (session_id, is_new_session) = match session_id_from_headers(&headers) {
        Some(id) => (id, false),
        None => (Uuid::new_v4().to_string(), true),
    };
    state.sessions.put_token(&session_id, &access_token).await;

    // Falha lançada pelas queries é capturada aqui e vira 200 com
    // { error, details }; desfechos vazios já chegam serializados
    let body = match state.discovery.discover(&access_token).await {
        Ok(value) => value,
        Err(e) => {
            log_error(&format!("❌ Falha na descoberta de hubs/projetos: {}", e));
            json!({
                "error": "Failed to retrieve hubs and projects",
                "details": e.to_string()
            })
        }
    };

    let mut response = Json(body).into_response();

    if is_new_session {
        if let Ok(value) = HeaderValue::from_str(&session_cookie(&session_id)) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    Ok(response)
}
