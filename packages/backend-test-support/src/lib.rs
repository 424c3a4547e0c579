//! Shared helpers for the backend integration suites: one-shot logging setup,
//! unique fixture names, and Problem Details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
