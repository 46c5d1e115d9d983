//! Submissions, per-category results and the aggregated report.

pub mod entities;
pub mod value_objects;
