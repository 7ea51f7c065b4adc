/// Main Application: middleware OAuth2 + AEC Data Model
///
/// Fluxo:
/// - GET / redireciona o navegador para a página de autorização da APS
/// - GET /api/auth/callback troca o authorization code por access token,
///   guarda o token na sessão e lista hubs/projetos via GraphQL
/// - Rotas /api/* seguintes reusam o token da sessão (descoberta,
///   listagem REST, elementGroups)
///
/// Sem retry em nenhuma chamada de saída; falha é terminal por requisição.

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Importar módulos da biblioteca
use aps_hub_middleware::{auth, config, handlers, services, utils, AppState};

use auth::{handle_oauth_callback, start_oauth_flow, OAuth2Config, SessionStore};
use config::Settings;
use handlers::{
    element_group_tree, health_check, list_dm_hubs, list_dm_projects, list_projects, status_check,
};
use services::{
    AecGraphQlService, DataManagementService, ElementGroupService, ProjectDiscoveryService,
};
use utils::{logging::*, AppError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Carregar variáveis de ambiente do arquivo .env (se existir)
    if dotenvy::dotenv().is_err() {
        // Em produção não existe .env - variáveis vêm do ambiente
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Inicializar tracing
    tracing_subscriber::fmt::init();

    // Carregar configurações
    let settings = Settings::new()
        .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    // Credenciais OAuth2 são obrigatórias: sem elas o processo cai aqui,
    // antes de qualquer bind
    let oauth_config = OAuth2Config::from_env().map_err(|e| {
        log_error(&format!("❌ {}", e));
        AppError::ConfigError(e)
    })?;

    // Inicializar serviços
    let sessions = SessionStore::new();
    let gateway = AecGraphQlService::new(settings.aps.graphql_url.clone());
    let discovery = ProjectDiscoveryService::new(gateway);
    let data_management = DataManagementService::new(settings.aps.base_url.clone());
    let element_groups = ElementGroupService::new(settings.aps.base_url.clone());

    // Inicializar estado da aplicação
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        oauth: oauth_config,
        sessions,
        discovery,
        data_management,
        element_groups,
    });

    log_info("✅ OAuth2 endpoints enabled: /, /api/auth/callback");

    // Configurar rotas
    let app = Router::new()
        // Fluxo OAuth2
        .route("/", get(start_oauth_flow))
        .route("/api/auth/callback", get(handle_oauth_callback))
        // Consultas guiadas pelo token de sessão
        .route("/api/projects", get(list_projects))
        .route(
            "/api/projects/:project_id/element-groups",
            get(element_group_tree),
        )
        .route("/api/dm/hubs", get(list_dm_hubs))
        .route("/api/dm/hubs/:hub_id/projects", get(list_dm_projects))
        // Health checks (públicos)
        .route("/health", get(health_check))
        .route("/status", get(status_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Iniciar servidor; em Cloud Run a porta vem da variável PORT
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(port);

    // Graceful shutdown com signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
