//! Gateway GraphQL do AEC Data Model
//!
//! Transporte fino sobre o endpoint GraphQL da APS: toda requisição
//! leva `Authorization: Bearer <token>` e `Content-Type: application/json`.
//! Expõe exatamente duas operações nomeadas, GetHubs e GetProjects.
//! Falhas de transporte ou erros GraphQL sobem intactos para o chamador;
//! não há retry nem recuperação parcial.

use reqwest::Client;
use serde_json::{json, Value};

use crate::models::{Hub, HubsPage, Project, ProjectsQueryData};
use crate::utils::{AppError, AppResult};

const GET_HUBS_QUERY: &str =
    "query GetHubs { hubs { pagination { cursor } results { id name } } }";

const GET_PROJECTS_QUERY: &str = "query GetProjects($hubId: ID!) { \
     hub(hubId: $hubId) { projects { pagination { cursor } results { id name } } } }";

/// Cliente das queries GetHubs/GetProjects
#[derive(Clone)]
pub struct AecGraphQlService {
    client: Client,
    graphql_url: String,
}

impl AecGraphQlService {
    pub fn new(graphql_url: String) -> Self {
        Self {
            client: Client::new(),
            graphql_url,
        }
    }

    /// Executar uma query nomeada e devolver o campo `data` do corpo.
    ///
    /// Um array `errors` na resposta vira `AppError::GraphQl` com as
    /// mensagens do upstream concatenadas.
    async fn execute(&self, access_token: &str, query: &str, variables: Value) -> AppResult<Value> {
        let response = self
            .client
            .post(&self.graphql_url)
            .header("Authorization", format!("Bearer {}", access_token))
            .header("Content-Type", "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| AppError::GraphQl(format!("Falha ao conectar com AEC Data Model: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::GraphQl(format!(
                "AEC Data Model retornou [{}]: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::GraphQl(format!("Falha ao parsear resposta GraphQL: {}", e)))?;

        if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
            let messages: Vec<String> = errors
                .iter()
                .map(|err| {
                    err.get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or("unknown GraphQL error")
                        .to_string()
                })
                .collect();
            return Err(AppError::GraphQl(messages.join("; ")));
        }

        body.get("data")
            .cloned()
            .ok_or_else(|| AppError::MalformedResponse("resposta GraphQL sem campo data".to_string()))
    }

    /// Listar hubs da conta autorizada (primeira página)
    pub async fn get_hubs(&self, access_token: &str) -> AppResult<HubsPage> {
        let data = self.execute(access_token, GET_HUBS_QUERY, json!({})).await?;

        let results = data
            .pointer("/hubs/results")
            .ok_or_else(|| {
                AppError::MalformedResponse("hubs.results ausente na resposta".to_string())
            })?
            .clone();

        let hubs: Vec<Hub> = serde_json::from_value(results).map_err(|e| {
            AppError::MalformedResponse(format!("hubs.results com formato inesperado: {}", e))
        })?;

        let cursor = data
            .pointer("/hubs/pagination/cursor")
            .and_then(|c| c.as_str())
            .map(|c| c.to_string());

        Ok(HubsPage {
            results: hubs,
            cursor,
        })
    }

    /// Listar projetos do hub indicado.
    ///
    /// O payload `data` é preservado verbatim para repasse; a visão
    /// tipada serve só para validação e contagem.
    pub async fn get_projects(
        &self,
        access_token: &str,
        hub_id: &str,
    ) -> AppResult<ProjectsQueryData> {
        let data = self
            .execute(access_token, GET_PROJECTS_QUERY, json!({ "hubId": hub_id }))
            .await?;

        let results = data
            .pointer("/hub/projects/results")
            .ok_or_else(|| {
                AppError::MalformedResponse("hub.projects.results ausente na resposta".to_string())
            })?
            .clone();

        let projects: Vec<Project> = serde_json::from_value(results).map_err(|e| {
            AppError::MalformedResponse(format!(
                "hub.projects.results com formato inesperado: {}",
                e
            ))
        })?;

        Ok(ProjectsQueryData {
            projects,
            raw: data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_get_hubs_parses_results_and_cursor() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .header("authorization", "Bearer tok-1")
                    .body_contains("GetHubs");
                then.status(200).json_body(json!({
                    "data": {
                        "hubs": {
                            "pagination": { "cursor": "next-page" },
                            "results": [
                                { "id": "h1", "name": "Hub One" },
                                { "id": "h2", "name": "Hub Two" }
                            ]
                        }
                    }
                }));
            })
            .await;

        let service = AecGraphQlService::new(server.url("/graphql"));
        let page = service.get_hubs("tok-1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].id, "h1");
        assert_eq!(page.cursor.as_deref(), Some("next-page"));
    }

    #[tokio::test]
    async fn test_get_hubs_missing_results_is_malformed() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({ "data": { "hubs": {} } }));
            })
            .await;

        let service = AecGraphQlService::new(server.url("/graphql"));
        let err = service.get_hubs("tok-1").await.unwrap_err();

        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_graphql_errors_array_propagates_messages() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({
                    "errors": [
                        { "message": "Not authorized to access hubs" }
                    ]
                }));
            })
            .await;

        let service = AecGraphQlService::new(server.url("/graphql"));
        let err = service.get_hubs("tok-1").await.unwrap_err();

        match err {
            AppError::GraphQl(msg) => assert!(msg.contains("Not authorized to access hubs")),
            other => panic!("esperado GraphQl, veio {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_projects_sends_hub_id_variable() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .body_contains("GetProjects")
                    .body_contains("\"hubId\":\"h1\"");
                then.status(200).json_body(json!({
                    "data": {
                        "hub": {
                            "projects": {
                                "pagination": { "cursor": null },
                                "results": [ { "id": "p1", "name": "Alpha" } ]
                            }
                        }
                    }
                }));
            })
            .await;

        let service = AecGraphQlService::new(server.url("/graphql"));
        let result = service.get_projects("tok-1", "h1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.projects.len(), 1);
        assert_eq!(result.projects[0].name, "Alpha");
        // Payload bruto preservado para repasse
        assert!(result.raw.pointer("/hub/projects/results/0/id").is_some());
    }
}
