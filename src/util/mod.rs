//! Shared pure helpers.
//!
//! Utilities here are deliberately browser-free so they can be exercised by
//! plain unit tests; anything touching `web-sys` lives in `storage` or the
//! pages instead.

pub mod join_token;
