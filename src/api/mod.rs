//! HTTP API module for the diária engine.
//!
//! This module provides the REST endpoint for calculating a per-diem
//! from a JSON travel request.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
