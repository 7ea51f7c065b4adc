// Biblioteca do middleware APS Hub
// Expõe módulos para uso em testes e binários

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub oauth: auth::OAuth2Config,
    pub sessions: auth::SessionStore,
    pub discovery: services::ProjectDiscoveryService,
    pub data_management: services::DataManagementService,
    pub element_groups: services::ElementGroupService,
}
