//! Tipos de dados da Autodesk Platform Services
//!
//! Respostas GraphQL são validadas nestes tipos antes de qualquer uso:
//! campo ausente vira `AppError::MalformedResponse`, nunca navegação
//! opcional silenciosa.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hub (agrupamento de conta/workspace) retornado pela query GetHubs
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Hub {
    pub id: String,
    pub name: String,
}

/// Projeto dentro de um hub
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// Primeira página da query de hubs.
///
/// O cursor de paginação é carregado mas não consumido: o fluxo atual
/// só olha a primeira página.
#[derive(Debug, Clone)]
pub struct HubsPage {
    pub results: Vec<Hub>,
    pub cursor: Option<String>,
}

/// Resultado da query de projetos de um hub.
///
/// `raw` guarda o payload `data` verbatim para repasse ao cliente;
/// `projects` é a visão tipada usada para validação e contagem.
#[derive(Debug, Clone)]
pub struct ProjectsQueryData {
    pub projects: Vec<Project>,
    pub raw: Value,
}

/// Nó da hierarquia de elementGroups de um projeto
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementGroupNode {
    pub id: String,
    pub name: String,
    pub children: Vec<ElementGroupNode>,
}
