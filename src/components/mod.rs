//! Reusable view components shared across pages.

pub mod choice_list;
pub mod step_progress;
