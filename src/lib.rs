pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod models;

pub use config::ImportConfig;
pub use error::ImportError;
