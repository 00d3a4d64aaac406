//! # Server Crate
//!
//! HTTP shell for the recommendation engine: a thin axum app over the
//! `recommender` core plus the metadata passthrough and FAQ pages.
//!
//! ## Endpoints
//!
//! - `POST /api/recommendations`: three seed titles + strategy in, ranked
//!   titles out
//! - `GET /api/titles`: catalog titles for the seed select boxes
//! - `GET /api/movies/search`: third-party metadata lookup by title
//! - `GET /api/faq`: static question/answer list
//! - `GET /health`: liveness
//!
//! The ratings store and prediction model load once in `main`; a failure
//! there is fatal and the server never starts. Per-request failures (an
//! unknown seed title, an upstream metadata miss) map to error responses
//! and the process keeps serving.

pub mod config;
pub mod error;
pub mod faq;
pub mod handlers;
pub mod omdb;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{AppError, AppResult};
pub use routes::router;
pub use state::AppState;
