//! OAuth2 HTTP Client
//!
//! Cliente HTTP isolado para a troca de authorization code por access
//! token junto ao serviço de autenticação da APS.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::OAuth2Config;
use crate::utils::logging::*;
use crate::utils::{truncate_safe, AppError, AppResult};

/// Resposta da API de troca de token
#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

/// Cliente OAuth2 para APS
pub struct OAuth2Client {
    config: OAuth2Config,
    http_client: Client,
}

impl OAuth2Client {
    /// Criar novo cliente OAuth2
    pub fn new(config: OAuth2Config) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// Trocar authorization code por access token.
    ///
    /// Exatamente uma chamada ao endpoint de token por invocação, sem
    /// retry: o POST é form-encoded com `client_id`, `client_secret`,
    /// `grant_type=authorization_code`, `code` e `redirect_uri`.
    ///
    /// # Retorno
    /// - `Ok(TokenResponse)`: Token obtido com sucesso
    /// - `Err(AppError::TokenExchange)`: Qualquer falha (rede, status
    ///   não-2xx, corpo malformado), com a mensagem do upstream anexada
    pub async fn exchange_code_for_token(&self, code: &str) -> AppResult<TokenResponse> {
        log_info("🔐 [OAuth2] Trocando authorization code por access token...");

        let url = self.config.token_url();

        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        log_info(&format!(
            "📤 [OAuth2] POST {} - client_id: {}, code: {}...",
            url,
            &self.config.client_id,
            truncate_safe(code, 10)
        ));

        let response = self
            .http_client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                AppError::TokenExchange(format!("Falha ao conectar com o endpoint de token: {}", e))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log_error(&format!(
                "❌ [OAuth2] Token exchange failed: {} - {}",
                status, error_text
            ));
            return Err(AppError::TokenExchange(format!(
                "Token exchange failed [{}]: {}",
                status, error_text
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            AppError::TokenExchange(format!("Falha ao parsear resposta do token: {}", e))
        })?;

        // Invariante do slot de sessão: token inteiro e não-vazio, nunca parcial
        if token_response.access_token.is_empty() {
            return Err(AppError::TokenExchange(
                "Resposta do provedor sem access_token".to_string(),
            ));
        }

        log_info(&format!(
            "✅ [OAuth2] Access token obtido: {}...",
            truncate_safe(&token_response.access_token, 20)
        ));

        Ok(token_response)
    }
}
