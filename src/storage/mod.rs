//! Local persistence: the two stores this client keeps between reloads.
//!
//! DESIGN
//! ======
//! Per-token guest continuity (`submissions`) and the teacher's active
//! session (`active_session`) are the only mutable shared state in the
//! client. Both run on the injected `backend` trait so logic stays testable
//! against an in-memory map.

pub mod active_session;
pub mod backend;
pub mod submissions;
