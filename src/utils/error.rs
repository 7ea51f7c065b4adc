use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Callback OAuth2 chamado sem o parâmetro `code`
    MissingAuthCode,
    /// Falha na troca do authorization code por access token
    TokenExchange(String),
    /// Erro retornado pela API REST da Autodesk
    ApsApi(String),
    /// Erro de transporte ou erro GraphQL retornado pelo AEC Data Model
    GraphQl(String),
    /// Resposta do upstream sem os campos esperados
    MalformedResponse(String),
    /// Sessão sem token de acesso
    Unauthorized(String),
    ConfigError(String),
    JsonError(serde_json::Error),
    HttpError(reqwest::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingAuthCode => write!(f, "Authorization code not found"),
            AppError::TokenExchange(msg) => write!(f, "Token exchange error: {}", msg),
            AppError::ApsApi(msg) => write!(f, "APS API error: {}", msg),
            AppError::GraphQl(msg) => write!(f, "GraphQL query error: {}", msg),
            AppError::MalformedResponse(msg) => write!(f, "Malformed upstream response: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::JsonError(err) => write!(f, "JSON error: {}", err),
            AppError::HttpError(err) => write!(f, "HTTP error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Os dois primeiros casos têm corpo fixo, contrato do fluxo OAuth2
        match self {
            AppError::MissingAuthCode => {
                let body = json!({ "error": "Authorization code not found" });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            AppError::TokenExchange(details) => {
                let body = json!({
                    "error": "Failed to obtain access token",
                    "details": details
                });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
            other => {
                let (status, error_message) = match other {
                    AppError::ApsApi(msg) => (StatusCode::BAD_GATEWAY, msg),
                    AppError::GraphQl(msg) => (StatusCode::BAD_GATEWAY, msg),
                    AppError::MalformedResponse(msg) => (StatusCode::BAD_GATEWAY, msg),
                    AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
                    AppError::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
                    AppError::JsonError(err) => (StatusCode::BAD_REQUEST, err.to_string()),
                    AppError::HttpError(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
                    // Já tratados acima
                    AppError::MissingAuthCode | AppError::TokenExchange(_) => unreachable!(),
                };

                let body = json!({
                    "error": error_message,
                    "status": status.as_u16()
                });

                (status, axum::Json(body)).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
