//! Network layer: REST gateway, wire DTOs, and the error taxonomy.

pub mod api;
pub mod error;
pub mod types;
