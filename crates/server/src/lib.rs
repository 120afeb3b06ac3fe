//! refind server - HTTP REST API for the lost-and-found service
//!
//! This crate wraps the `refind` core (JSON-file store + matching
//! heuristic) in an Axum HTTP server. It supports:
//!
//! - **Accounts**: registration and login against the users collection
//! - **Item Reports**: submitting and listing lost/found reports
//! - **Matching**: ranked lost/found candidate pairings with explanations
//! - **Reunite**: marking a matched pair resolved and cross-linking it
//! - **Health & Metrics**: liveness probe and Prometheus-compatible metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/health` - Liveness probe
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/auth/register` - Register an account
//! - `POST /api/auth/login` - Log in
//! - `GET /api/users` - List users (passwords stripped)
//! - `POST /api/items/lost` - Report a lost item
//! - `GET /api/items/lost` - List lost reports (`?status=active` to filter)
//! - `POST /api/items/found` - Report a found item
//! - `GET /api/items/found` - List found reports (`?status=active` to filter)
//!
//! ## Admin Endpoints (admin token required)
//!
//! - `GET /api/items/matches` - Ranked lost/found candidate pairings
//! - `PUT /api/items/reunite` - Resolve and cross-link a pair

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
