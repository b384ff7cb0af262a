//! HTTP API module for the Net Salary Engine.
//!
//! This module provides the REST API endpoints for net salary
//! calculations, pay runs and the active tax table.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, EmployeeRequest, PayRunRequest};
pub use response::{ApiError, CalculationResponse, PayRunResponse};
pub use state::AppState;
