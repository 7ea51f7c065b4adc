//! OAuth2 Configuration
//!
//! Centraliza todas as configurações necessárias para OAuth2 da APS.
//! A configuração é um valor explícito passado aos componentes na
//! construção; falta de credencial é erro de startup, não de runtime.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    /// Client ID do app registrado na APS
    pub client_id: String,

    /// Client Secret do app registrado na APS
    pub client_secret: String,

    /// URL de callback registrada no app APS
    pub redirect_uri: String,

    /// Base do serviço de autenticação (sobrescrevível em testes)
    pub auth_base_url: String,

    /// Escopos solicitados, enviados separados por espaço
    pub scopes: Vec<String>,
}

impl OAuth2Config {
    /// Criar configuração a partir de variáveis de ambiente.
    ///
    /// `APS_CLIENT_ID` e `APS_CLIENT_SECRET` são obrigatórios; a ausência
    /// de qualquer um derruba o processo antes do servidor subir.
    pub fn from_env() -> Result<Self, String> {
        let client_id = std::env::var("APS_CLIENT_ID")
            .map_err(|_| "APS_CLIENT_ID não configurado".to_string())?;

        let client_secret = std::env::var("APS_CLIENT_SECRET")
            .map_err(|_| "APS_CLIENT_SECRET não configurado".to_string())?;

        let redirect_uri = std::env::var("APS_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/api/auth/callback".to_string());

        let auth_base_url = std::env::var("APS_AUTH_BASE_URL").unwrap_or_else(|_| {
            "https://developer.api.autodesk.com/authentication/v2".to_string()
        });

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            auth_base_url,
            scopes: Self::default_scopes(),
        })
    }

    /// Escopos fixos do fluxo de dados
    pub fn default_scopes() -> Vec<String> {
        vec![
            "data:read".to_string(),
            "data:write".to_string(),
            "data:create".to_string(),
        ]
    }

    /// Gerar URL de autorização da APS
    // TODO: incluir parâmetro `state` anti-CSRF e validá-lo no callback
    pub fn authorization_url(&self) -> String {
        format!(
            "{}/authorize?response_type=code&client_id={}&redirect_uri={}&scope={}",
            self.auth_base_url,
            self.client_id,
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scopes.join(" "))
        )
    }

    /// Endpoint de troca de token
    pub fn token_url(&self) -> String {
        format!("{}/token", self.auth_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OAuth2Config {
        OAuth2Config {
            client_id: "test_client_id".to_string(),
            client_secret: "test_secret".to_string(),
            redirect_uri: "http://localhost:8080/api/auth/callback".to_string(),
            auth_base_url: "https://developer.api.autodesk.com/authentication/v2".to_string(),
            scopes: OAuth2Config::default_scopes(),
        }
    }

    #[test]
    fn test_authorization_url() {
        let url = test_config().authorization_url();
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=test_client_id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fauth%2Fcallback"));
        // Três escopos, separados por espaço e URL-encoded
        assert!(url.contains("scope=data%3Aread%20data%3Awrite%20data%3Acreate"));
    }

    #[test]
    fn test_token_url() {
        let url = test_config().token_url();
        assert_eq!(
            url,
            "https://developer.api.autodesk.com/authentication/v2/token"
        );
    }
}
