//! Adverse weather probability engine.
//!
//! Two operations face the outside world:
//!
//! - [`analyze`]: turn a validated [`Query`] into an [`AnalysisResult`]
//! - [`available_parameters`]: the static parameter catalog
//!
//! ```
//! use awp_core::{condition::Condition, location::Location, query::Query, time_range::TimeRange};
//! use awp_engine::analyzer::Analyzer;
//!
//! let query = Query::new(
//!     Location::new("Quito", -0.22, -78.51, "search").unwrap(),
//!     vec![Condition::VeryHot],
//!     TimeRange::DayOfYear(180),
//!     None,
//! )
//! .unwrap();
//! let result = Analyzer::seeded(7).analyze(&query).unwrap();
//! assert_eq!(result.probabilities().len(), 1);
//! ```

pub mod analyzer;
pub mod parameters;
pub mod probability;

pub use parameters::available_parameters;

use analyzer::Analyzer;
use awp_core::{error::AnalysisError, query::Query, result::AnalysisResult};

/// Analyze `query` with an entropy-seeded surrogate.
pub fn analyze(query: &Query) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::from_entropy().analyze(query)
}
