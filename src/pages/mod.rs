//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (loading, gating, navigation)
//! and delegates rendering details to `components`. The join flow spans
//! `join_entry` -> `session_run` -> `session_result`, with
//! `already_submitted` as the duplicate-check-in off-ramp; `session_start`
//! is the teacher-side launch screen.

pub mod already_submitted;
pub mod join_entry;
pub mod session_result;
pub mod session_run;
pub mod session_start;
