use crate::{condition::Condition, error::AnalysisError, location::Location};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use indexmap::IndexMap;

/// Data source tag stamped on every result.
pub const DATA_SOURCE: &str = "NASA Earth Observation Data";

/// Version of the result format.
pub const API_VERSION: &str = "v1.0";

/// Units glossary: measured quantity and the unit its thresholds use.
pub const UNITS: [(&str, &str); 4] = [
    ("temperature", "Fahrenheit"),
    ("wind_speed", "miles per hour"),
    ("precipitation", "inches per day"),
    ("air_quality", "Air Quality Index"),
];

/// Units glossary as a JSON object.
pub fn units_glossary() -> Map<String, Value> {
    UNITS
        .iter()
        .map(|(quantity, unit)| (quantity.to_string(), Value::from(*unit)))
        .collect()
}

/// Threshold value and unit recorded for one analyzed condition.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ThresholdInfo {
    pub threshold: f64,
    pub unit: String,
}

/// Thresholds keyed by condition, in the order conditions were first
/// queried. A repeated condition keeps its first position.
pub type ThresholdMap = IndexMap<Condition, ThresholdInfo>;

/// The outcome of one analysis.
///
/// `probabilities[i]` is the probability, in whole percentage points, of
/// `conditions[i]`. The constructor refuses lists of different lengths, and
/// nothing can modify a result once built.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct AnalysisResult {
    location: Location,
    conditions: Vec<Condition>,
    probabilities: Vec<u8>,
    thresholds: ThresholdMap,
    metadata: Map<String, Value>,
    timestamp: DateTime<Local>,
}

impl AnalysisResult {
    pub fn new(
        location: Location,
        conditions: Vec<Condition>,
        probabilities: Vec<u8>,
        thresholds: ThresholdMap,
        metadata: Map<String, Value>,
        timestamp: DateTime<Local>,
    ) -> Result<Self, AnalysisError> {
        if conditions.len() != probabilities.len() {
            return Err(AnalysisError::new(format!(
                "{} conditions but {} probabilities",
                conditions.len(),
                probabilities.len()
            )));
        }
        Ok(AnalysisResult {
            location,
            conditions,
            probabilities,
            thresholds,
            metadata,
            timestamp,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn probabilities(&self) -> &[u8] {
        &self.probabilities
    }

    pub fn thresholds(&self) -> &ThresholdMap {
        &self.thresholds
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Conditions paired with their probabilities, in query order.
    pub fn entries(&self) -> impl Iterator<Item = (Condition, u8)> + '_ {
        self.conditions
            .iter()
            .copied()
            .zip(self.probabilities.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalysisResult, ThresholdInfo, ThresholdMap};
    use crate::{condition::Condition, location::Location};
    use chrono::Local;
    use serde_json::Map;

    fn location() -> Location {
        Location::new("Denver", 39.74, -104.99, "map").unwrap()
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let result = AnalysisResult::new(
            location(),
            vec![Condition::VeryHot, Condition::VeryCold],
            vec![50],
            ThresholdMap::new(),
            Map::new(),
            Local::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_entries_pair_by_index() {
        let result = AnalysisResult::new(
            location(),
            vec![Condition::VeryWet, Condition::VeryHot],
            vec![12, 80],
            ThresholdMap::new(),
            Map::new(),
            Local::now(),
        )
        .unwrap();
        let entries: Vec<_> = result.entries().collect();
        assert_eq!(entries, vec![(Condition::VeryWet, 12), (Condition::VeryHot, 80)]);
    }

    #[test]
    fn test_thresholds_serialize_by_identifier() {
        let mut thresholds = ThresholdMap::new();
        thresholds.insert(
            Condition::VeryWindy,
            ThresholdInfo {
                threshold: 25.0,
                unit: "mph".to_string(),
            },
        );
        let result = AnalysisResult::new(
            location(),
            vec![Condition::VeryWindy],
            vec![33],
            thresholds,
            Map::new(),
            Local::now(),
        )
        .unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["thresholds"]["very-windy"]["unit"], "mph");
        assert_eq!(value["probabilities"][0], 33);
        assert_eq!(value["conditions"][0], "very-windy");
    }

    #[test]
    fn test_thresholds_serialize_in_query_order() {
        let info = |threshold: f64, unit: &str| ThresholdInfo {
            threshold,
            unit: unit.to_string(),
        };
        let mut thresholds = ThresholdMap::new();
        thresholds.insert(Condition::PoorAirQuality, info(100.0, "AQI"));
        thresholds.insert(Condition::VeryHot, info(90.0, "°F"));
        thresholds.insert(Condition::PoorAirQuality, info(100.0, "AQI"));
        let result = AnalysisResult::new(
            location(),
            vec![Condition::PoorAirQuality, Condition::VeryHot],
            vec![20, 60],
            thresholds,
            Map::new(),
            Local::now(),
        )
        .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let aqi = json.find("\"poor-air-quality\":{").unwrap();
        let hot = json.find("\"very-hot\":{").unwrap();
        assert!(aqi < hot, "{json}");
        assert_eq!(result.thresholds().len(), 2);
    }
}
