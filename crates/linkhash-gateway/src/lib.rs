//! HTTP adapter for the linkhash shortener.
//!
//! Exposes shortening as `POST /`, redirects as `GET /{key}`, a small HTML
//! form at `GET /page` and a liveness probe at `GET /health`.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
