//! Listagem REST via Data Management API
//!
//! Caminho alternativo ao GraphQL: lista hubs e projetos pelos
//! endpoints REST `project/v1`. O corpo JSON do upstream é repassado
//! como chegou.

use reqwest::Client;
use serde_json::Value;

use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct DataManagementService {
    client: Client,
    base_url: String,
}

impl DataManagementService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn get_json(&self, access_token: &str, url: &str) -> AppResult<Value> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| AppError::ApsApi(format!("Falha ao conectar com {}: {}", url, e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log_aps_api_error(url, Some(status.as_u16()), &error_text);
            return Err(AppError::ApsApi(format!(
                "APS retornou [{}]: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ApsApi(format!("Falha ao parsear resposta de {}: {}", url, e)))
    }

    /// Listar hubs da conta (REST)
    pub async fn get_hubs(&self, access_token: &str) -> AppResult<Value> {
        let url = format!("{}/project/v1/hubs", self.base_url);
        self.get_json(access_token, &url).await
    }

    /// Listar projetos de um hub (REST)
    pub async fn get_projects(&self, access_token: &str, hub_id: &str) -> AppResult<Value> {
        let url = format!("{}/project/v1/hubs/{}/projects", self.base_url, hub_id);
        self.get_json(access_token, &url).await
    }
}
