use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub aps: ApsSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApsSettings {
    /// Base das APIs REST (Data Management e elementGroups)
    pub base_url: String,
    /// Endpoint GraphQL do AEC Data Model
    pub graphql_url: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Valores padrão (APS de produção)
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("aps.base_url", "https://developer.api.autodesk.com")?
            .set_default(
                "aps.graphql_url",
                "https://developer.api.autodesk.com/aec/graphql",
            )?
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Overrides de variáveis de ambiente específicas
        if let Ok(base_url) = std::env::var("APS_BASE_URL") {
            builder = builder.set_override("aps.base_url", base_url)?;
        }
        if let Ok(graphql_url) = std::env::var("APS_GRAPHQL_URL") {
            builder = builder.set_override("aps.graphql_url", graphql_url)?;
        }

        // Também suportar prefixo genérico (APS_HUB__SERVER__PORT etc.)
        builder = builder.add_source(Environment::with_prefix("APS_HUB").separator("__"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_to_production_aps() {
        let settings = Settings::new().expect("defaults devem ser suficientes");
        assert!(settings.aps.base_url.contains("developer.api.autodesk.com"));
        assert!(settings.aps.graphql_url.ends_with("/aec/graphql"));
    }
}
