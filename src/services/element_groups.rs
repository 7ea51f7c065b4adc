//! Navegação de elementGroups de um projeto
//!
//! Busca o grupo raiz e percorre os filhos recursivamente pelos
//! endpoints REST `element/v1`, montando a hierarquia como árvore de
//! id/nome. Grupo sem filhos vira subárvore vazia.

use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

use crate::models::ElementGroupNode;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct ElementGroupService {
    client: Client,
    base_url: String,
}

impl ElementGroupService {
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

    /// Grupo raiz do projeto
    async fn get_root(&self, access_token: &str, project_id: &str) -> AppResult<Value> {
        let url = format!(
            "{}/element/v1/projects/{}/elementGroups/root",
            self.base_url, project_id
        );
        self.get_json(access_token, &url).await
    }

    /// Filhos diretos de um grupo
    async fn get_children(
        &self,
        access_token: &str,
        project_id: &str,
        group_id: &str,
    ) -> AppResult<Value> {
        let url = format!(
            "{}/element/v1/projects/{}/elementGroups/{}/children",
            self.base_url, project_id, group_id
        );
        self.get_json(access_token, &url).await
    }

    /// Montar a árvore completa de elementGroups do projeto
    pub async fn traverse(&self, access_token: &str, project_id: &str) -> AppResult<ElementGroupNode> {
        let root_body = self.get_root(access_token, project_id).await?;

        let root = root_body.get("data").ok_or_else(|| {
            AppError::MalformedResponse("grupo raiz sem campo data".to_string())
        })?;

        let root_id = root
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::MalformedResponse("grupo raiz sem id".to_string()))?
            .to_string();

        let root_name = root
            .pointer("/attributes/name")
            .and_then(|v| v.as_str())
            .unwrap_or("Root Group")
            .to_string();

        let children = self
            .collect_children(access_token, project_id, &root_id)
            .await?;

        Ok(ElementGroupNode {
            id: root_id,
            name: root_name,
            children,
        })
    }

    // Recursão async precisa do future boxado
    fn collect_children<'a>(
        &'a self,
        access_token: &'a str,
        project_id: &'a str,
        group_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = AppResult<Vec<ElementGroupNode>>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.get_children(access_token, project_id, group_id).await?;

            let entries = body
                .get("data")
                .and_then(|d| d.as_array())
                .cloned()
                .unwrap_or_default();

            let mut nodes = Vec::with_capacity(entries.len());

            for entry in entries {
                let child_id = entry
                    .get("id")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        AppError::MalformedResponse("elementGroup filho sem id".to_string())
                    })?
                    .to_string();

                let name = entry
                    .pointer("/attributes/name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unnamed Group")
                    .to_string();

                let children = self
                    .collect_children(access_token, project_id, &child_id)
                    .await?;

                nodes.push(ElementGroupNode {
                    id: child_id,
                    name,
                    children,
                });
            }

            Ok(nodes)
        })
    }
}
