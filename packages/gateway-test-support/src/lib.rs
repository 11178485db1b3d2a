//! Gateway test support utilities
//!
//! Shared helpers for the gateway's unit and integration tests: logging
//! initialization, Problem Details assertions and `Set-Cookie` inspection.

pub mod cookies;
pub mod logging;
pub mod problem_details;
