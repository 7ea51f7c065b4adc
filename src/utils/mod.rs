pub mod error;
pub mod logging;
pub mod string_utils;

pub use error::*;
pub use string_utils::truncate_safe;
