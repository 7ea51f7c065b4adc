pub mod aec_graphql;
pub mod data_management;
pub mod element_groups;
pub mod project_discovery;

pub use aec_graphql::AecGraphQlService;
pub use data_management::DataManagementService;
pub use element_groups::ElementGroupService;
pub use project_discovery::ProjectDiscoveryService;
