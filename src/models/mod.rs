pub mod aps;

pub use aps::*;
