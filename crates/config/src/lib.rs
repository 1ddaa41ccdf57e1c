//! Configuration for parlo: schema types and `parlo.toml` discovery/loading.

pub mod loader;
pub mod schema;

pub use {
    loader::{discover_and_load, load_config},
    schema::{ParloConfig, ServerConfig, StorageConfig},
};
