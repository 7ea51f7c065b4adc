pub mod settings;

pub use settings::{ApsSettings, ServerSettings, Settings};
