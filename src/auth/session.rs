//! Armazenamento de token por sessão de navegador
//!
//! Um slot de leitura/escrita por sessão, chaveado por um session id
//! opaco carregado em cookie. A escrita acontece uma vez, no callback
//! OAuth2; as leituras, em cada requisição seguinte da mesma sessão.
//! Sem expiração ou revogação: o token vale até o upstream rejeitá-lo.

use axum::http::{header, HeaderMap};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Nome do cookie de sessão
pub const SESSION_COOKIE: &str = "aps_session";

/// Store injetável de tokens por sessão
#[derive(Clone, Default)]
pub struct SessionStore {
    tokens: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gravar o access token da sessão. Tokens vazios são recusados
    /// pelo chamador antes de chegar aqui; o slot guarda o valor inteiro.
    pub async fn put_token(&self, session_id: &str, access_token: &str) {
        let mut tokens = self.tokens.write().await;
        tokens.insert(session_id.to_string(), access_token.to_string());
    }

    /// Ler o access token da sessão, se já autorizada
    pub async fn token(&self, session_id: &str) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens.get(session_id).cloned()
    }
}

/// Extrair o session id do header Cookie, se presente
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Montar o valor do Set-Cookie de sessão
pub fn session_cookie(session_id: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, session_id
    )
}
