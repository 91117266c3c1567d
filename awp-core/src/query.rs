use crate::{
    condition::Condition, error::ValidationError, location::Location, thresholds::ThresholdSet,
    time_range::TimeRange,
};
use serde::{Deserialize, Serialize};

/// A validated analysis request.
///
/// Every component is validated when it is built or deserialized, so a
/// `Query` that exists is safe to hand to the engine. Conditions keep the
/// caller's order and are not deduplicated.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Query {
    pub location: Location,
    pub conditions: Vec<Condition>,
    pub time_range: TimeRange,
    #[serde(default)]
    pub thresholds: ThresholdSet,
}

impl Query {
    pub fn new(
        location: Location,
        conditions: Vec<Condition>,
        time_range: TimeRange,
        thresholds: Option<ThresholdSet>,
    ) -> Result<Self, ValidationError> {
        let thresholds = thresholds.unwrap_or_default();
        thresholds.validate()?;
        Ok(Query {
            location,
            conditions,
            time_range,
            thresholds,
        })
    }
}
