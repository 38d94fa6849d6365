pub mod config;
pub mod error;
pub mod sample;
pub mod types;

pub use config::ChronicleConfig;
pub use error::{ChronicleError, Result};
pub use types::*;
