// Handlers HTTP fora do fluxo OAuth2 (que vive em src/auth/handlers.rs)
pub mod health;
pub mod projects;

pub use health::*;
pub use projects::*;
