//! Core types for adverse weather probability analysis.
//!
//! Everything a caller needs to describe a query (location, conditions,
//! time range, thresholds) and everything the engine hands back (the
//! analysis result), plus the error taxonomy shared by every crate in the
//! workspace.

pub mod condition;
pub mod error;
pub mod location;
pub mod query;
pub mod result;
pub mod samples;
pub mod thresholds;
pub mod time_range;
