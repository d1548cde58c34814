//! # Axum Helpers
//!
//! Pieces shared by the inventory HTTP services:
//!
//! - **[`errors`]**: `ErrorKind` and the `{"error": "..."}` response body
//! - **[`extractors`]**: `IdPath` and `ValidatedJson`
//! - **[`health`]**: `/health` router that runs dependency probes
//! - **[`server`]**: listener setup with request tracing
//! - **[`shutdown`]**: SIGINT/SIGTERM to a `watch` channel

pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;
pub mod shutdown;

pub use errors::{ErrorKind, ErrorResponse, error_response};
pub use extractors::{IdPath, ValidatedJson};
pub use health::{HealthCheck, health_router};
pub use server::serve;
pub use shutdown::{shutdown_channel, shutdown_signal, wait_for_shutdown};
