//! # APS OAuth2 Authentication Module
//!
//! Módulo isolado para o fluxo OAuth2 Authorization-Code com a
//! Autodesk Platform Services.
//!
//! ## Responsabilidades:
//! - Iniciar fluxo OAuth2 (authorization URL + redirect)
//! - Trocar authorization code por access token
//! - Guardar o token por sessão de navegador (SessionStore)
//! - Handlers HTTP (start_oauth_flow, handle_oauth_callback)
//!
//! ## Estrutura:
//! - `config.rs`: Configurações OAuth2
//! - `client.rs`: Cliente HTTP OAuth2
//! - `session.rs`: Armazenamento de token por sessão
//! - `handlers.rs`: Handlers HTTP

pub mod client;
pub mod config;
pub mod handlers;
pub mod session;

pub use client::{OAuth2Client, TokenResponse};
pub use config::OAuth2Config;
pub use handlers::{handle_oauth_callback, start_oauth_flow};
pub use session::{session_id_from_headers, SessionStore, SESSION_COOKIE};
