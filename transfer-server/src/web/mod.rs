//! Web layer for the transfer server.
//!
//! Provides HTTP endpoints for computing transfers and reading stored
//! systems.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
