//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `identity`, `join`, `wizard`) so
//! individual pages can depend on small focused models. Everything here is
//! plain data plus transition methods; the reactive wiring lives in the
//! pages that own the signals.

pub mod auth;
pub mod identity;
pub mod join;
pub mod wizard;
