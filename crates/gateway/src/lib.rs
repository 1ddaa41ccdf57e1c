//! HTTP surface for parlo: router, handlers, templates, and flash notices.

pub mod error;
pub mod flash;
pub mod routes;
pub mod server;
pub mod state;
pub mod upload_routes;

pub use {
    server::{build_app, start_server},
    state::AppState,
};
