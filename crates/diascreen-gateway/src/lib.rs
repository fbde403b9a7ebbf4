//! DiaScreen Gateway
//!
//! The serving binary's library: configuration, CLI, HTTP routes, and
//! the shared application state. `main.rs` wires these together; the
//! integration tests drive the router directly.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;
pub mod static_page;

pub use cli::Cli;
pub use config::{ArtifactSourceSpec, GatewayConfig, ModelSettings};
pub use routes::create_router;
pub use state::AppState;
