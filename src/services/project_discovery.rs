//! Descoberta de projetos: hubs → primeiro hub → projetos
//!
//! Sequência estrita de duas queries dependentes, sem concorrência e
//! sem retry. Duas categorias de desfecho que nunca se misturam:
//! - resultado vazio (sem hubs / sem projetos) é desfecho normal,
//!   serializado como `{ "error": ... }` com status 200;
//! - falha lançada pelas queries sobe como `Err` e é capturada no
//!   handler, não aqui.

use serde_json::{json, Value};

use super::AecGraphQlService;
use crate::utils::logging::*;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ProjectDiscoveryService {
    gateway: AecGraphQlService,
}

impl ProjectDiscoveryService {
    pub fn new(gateway: AecGraphQlService) -> Self {
        Self { gateway }
    }

    /// Rodar a descoberta completa para o token informado.
    ///
    /// Contas com múltiplos hubs só enxergam o primeiro por este
    /// caminho; "first hub wins" é simplificação deliberada, não bug.
    pub async fn discover(&self, access_token: &str) -> AppResult<Value> {
        let hubs_page = self.gateway.get_hubs(access_token).await?;

        let first_hub = match hubs_page.results.first() {
            Some(hub) => hub,
            None => {
                log_warning("⚠️ Nenhum hub retornado para esta conta");
                return Ok(json!({ "error": "No hubs found or access denied." }));
            }
        };

        log_info(&format!(
            "🏢 Hub selecionado: {} (ID: {})",
            first_hub.name, first_hub.id
        ));

        let projects = self.gateway.get_projects(access_token, &first_hub.id).await?;

        if projects.projects.is_empty() {
            return Ok(json!({
                "error": format!("No projects found in hub {}.", first_hub.id)
            }));
        }

        // Payload da query repassado verbatim, sem reshape
        Ok(projects.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Mock;

    async fn mock_hubs<'a>(server: &'a MockServer, hubs: Value) -> Mock<'a> {
        server
            .mock_async(move |when, then| {
                when.method(POST).path("/graphql").body_contains("GetHubs");
                then.status(200)
                    .json_body(json!({ "data": { "hubs": { "results": hubs } } }));
            })
            .await
    }

    fn service_for(server: &MockServer) -> ProjectDiscoveryService {
        ProjectDiscoveryService::new(AecGraphQlService::new(server.url("/graphql")))
    }

    #[tokio::test]
    async fn test_zero_hubs_short_circuits_before_projects_query() {
        let server = MockServer::start_async().await;
        mock_hubs(&server, json!([])).await;

        let projects_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql").body_contains("GetProjects");
                then.status(200).json_body(json!({ "data": {} }));
            })
            .await;

        let result = service_for(&server).discover("tok").await.unwrap();

        assert_eq!(result, json!({ "error": "No hubs found or access denied." }));
        assert_eq!(projects_mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_first_hub_wins_with_two_hubs() {
        let server = MockServer::start_async().await;
        mock_hubs(
            &server,
            json!([
                { "id": "h1", "name": "Hub One" },
                { "id": "h2", "name": "Hub Two" }
            ]),
        )
        .await;

        let h1_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .body_contains("GetProjects")
                    .body_contains("\"hubId\":\"h1\"");
                then.status(200).json_body(json!({
                    "data": {
                        "hub": { "projects": { "results": [ { "id": "p1", "name": "Alpha" } ] } }
                    }
                }));
            })
            .await;

        let h2_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .body_contains("\"hubId\":\"h2\"");
                then.status(200).json_body(json!({ "data": {} }));
            })
            .await;

        let result = service_for(&server).discover("tok").await.unwrap();

        assert_eq!(h1_mock.hits_async().await, 1);
        assert_eq!(h2_mock.hits_async().await, 0);
        assert_eq!(
            result.pointer("/hub/projects/results/0/id"),
            Some(&json!("p1"))
        );
    }

    #[tokio::test]
    async fn test_empty_projects_names_the_hub() {
        let server = MockServer::start_async().await;
        mock_hubs(&server, json!([ { "id": "h1", "name": "Hub One" } ])).await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql").body_contains("GetProjects");
                then.status(200).json_body(json!({
                    "data": { "hub": { "projects": { "results": [] } } }
                }));
            })
            .await;

        let result = service_for(&server).discover("tok").await.unwrap();

        assert_eq!(result, json!({ "error": "No projects found in hub h1." }));
    }

    #[tokio::test]
    async fn test_projects_payload_passes_through_verbatim() {
        let server = MockServer::start_async().await;
        mock_hubs(&server, json!([ { "id": "h1", "name": "Hub One" } ])).await;

        let payload = json!({
            "hub": {
                "projects": {
                    "pagination": { "cursor": "abc" },
                    "results": [ { "id": "p1", "name": "Alpha" } ],
                    "extra": "untouched"
                }
            }
        });

        let payload_for_mock = payload.clone();
        server
            .mock_async(move |when, then| {
                when.method(POST).path("/graphql").body_contains("GetProjects");
                then.status(200).json_body(json!({ "data": payload_for_mock }));
            })
            .await;

        let result = service_for(&server).discover("tok").await.unwrap();

        // Nenhum campo removido ou remodelado
        assert_eq!(result, payload);
    }

    #[tokio::test]
    async fn test_discover_is_idempotent_against_unchanged_backend() {
        let server = MockServer::start_async().await;
        mock_hubs(&server, json!([ { "id": "h1", "name": "Hub One" } ])).await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql").body_contains("GetProjects");
                then.status(200).json_body(json!({
                    "data": { "hub": { "projects": { "results": [ { "id": "p1", "name": "Alpha" } ] } } }
                }));
            })
            .await;

        let service = service_for(&server);
        let first = service.discover("tok").await.unwrap();
        let second = service.discover("tok").await.unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_thrown_query_failure_is_not_an_empty_result() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql").body_contains("GetHubs");
                then.status(500).body("upstream exploded");
            })
            .await;

        let err = service_for(&server).discover("tok").await.unwrap_err();

        // Categoria distinta dos desfechos vazios: sobe como Err
        assert!(err.to_string().contains("upstream exploded"));
    }
}
