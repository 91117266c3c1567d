use crate::{condition::Condition, error::ValidationError};
use serde::{Deserialize, Serialize};

/// Default hot temperature threshold in Fahrenheit.
pub const DEFAULT_TEMPERATURE_HOT: f64 = 90.0;

/// Default cold temperature threshold in Fahrenheit.
pub const DEFAULT_TEMPERATURE_COLD: f64 = 32.0;

/// Default wind speed threshold in mph.
pub const DEFAULT_WIND_SPEED: f64 = 25.0;

/// Default precipitation threshold in inches per day.
pub const DEFAULT_PRECIPITATION: f64 = 0.5;

/// Default air quality threshold (AQI).
pub const DEFAULT_AIR_QUALITY: f64 = 100.0;

/// One numeric cutoff per condition type.
///
/// Fields missing from the wire form take their default value.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSet {
    /// Hot temperature threshold in Fahrenheit
    pub temperature_hot: f64,
    /// Cold temperature threshold in Fahrenheit
    pub temperature_cold: f64,
    /// Wind speed threshold in mph
    pub wind_speed: f64,
    /// Precipitation threshold in inches per day
    pub precipitation: f64,
    /// Air quality threshold (AQI)
    pub air_quality: f64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        ThresholdSet {
            temperature_hot: DEFAULT_TEMPERATURE_HOT,
            temperature_cold: DEFAULT_TEMPERATURE_COLD,
            wind_speed: DEFAULT_WIND_SPEED,
            precipitation: DEFAULT_PRECIPITATION,
            air_quality: DEFAULT_AIR_QUALITY,
        }
    }
}

impl ThresholdSet {
    /// Reject NaN and infinite thresholds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match THRESHOLD_TABLE
            .iter()
            .find(|binding| !(binding.extract)(self).is_finite())
        {
            Some(binding) => Err(ValidationError::Threshold(binding.field)),
            None => Ok(()),
        }
    }

    /// Threshold value that applies to `condition`.
    pub fn for_condition(&self, condition: Condition) -> f64 {
        (ThresholdBinding::of(condition).extract)(self)
    }
}

/// Where a condition's threshold lives in a [`ThresholdSet`] and which unit
/// it is expressed in.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdBinding {
    pub condition: Condition,
    /// Field name in [`ThresholdSet`]
    pub field: &'static str,
    pub unit: &'static str,
    pub extract: fn(&ThresholdSet) -> f64,
}

/// Threshold bindings indexed by [`Condition::index`].
pub static THRESHOLD_TABLE: [ThresholdBinding; 5] = [
    ThresholdBinding {
        condition: Condition::VeryHot,
        field: "temperature_hot",
        unit: "°F",
        extract: |t| t.temperature_hot,
    },
    ThresholdBinding {
        condition: Condition::VeryCold,
        field: "temperature_cold",
        unit: "°F",
        extract: |t| t.temperature_cold,
    },
    ThresholdBinding {
        condition: Condition::VeryWindy,
        field: "wind_speed",
        unit: "mph",
        extract: |t| t.wind_speed,
    },
    ThresholdBinding {
        condition: Condition::VeryWet,
        field: "precipitation",
        unit: "in/day",
        extract: |t| t.precipitation,
    },
    ThresholdBinding {
        condition: Condition::PoorAirQuality,
        field: "air_quality",
        unit: "AQI",
        extract: |t| t.air_quality,
    },
];

impl ThresholdBinding {
    /// Binding for `condition`.
    pub fn of(condition: Condition) -> &'static ThresholdBinding {
        &THRESHOLD_TABLE[condition.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::{ThresholdBinding, ThresholdSet, THRESHOLD_TABLE};
    use crate::{condition::Condition, error::ValidationError};

    #[test]
    fn test_table_follows_condition_order() {
        for condition in Condition::ALL {
            assert_eq!(ThresholdBinding::of(condition).condition, condition);
        }
        assert_eq!(THRESHOLD_TABLE.len(), Condition::ALL.len());
    }

    #[test]
    fn test_for_condition_uses_fixed_mapping() {
        let thresholds = ThresholdSet {
            temperature_hot: 100.0,
            temperature_cold: 10.0,
            wind_speed: 40.0,
            precipitation: 1.5,
            air_quality: 150.0,
        };
        assert_eq!(thresholds.for_condition(Condition::VeryHot), 100.0);
        assert_eq!(thresholds.for_condition(Condition::VeryCold), 10.0);
        assert_eq!(thresholds.for_condition(Condition::VeryWindy), 40.0);
        assert_eq!(thresholds.for_condition(Condition::VeryWet), 1.5);
        assert_eq!(thresholds.for_condition(Condition::PoorAirQuality), 150.0);
    }

    #[test]
    fn test_units() {
        assert_eq!(ThresholdBinding::of(Condition::VeryHot).unit, "°F");
        assert_eq!(ThresholdBinding::of(Condition::VeryCold).unit, "°F");
        assert_eq!(ThresholdBinding::of(Condition::VeryWindy).unit, "mph");
        assert_eq!(ThresholdBinding::of(Condition::VeryWet).unit, "in/day");
        assert_eq!(ThresholdBinding::of(Condition::PoorAirQuality).unit, "AQI");
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let thresholds: ThresholdSet = serde_json::from_str(r#"{"wind_speed": 30}"#).unwrap();
        assert_eq!(thresholds.wind_speed, 30.0);
        assert_eq!(thresholds.temperature_hot, 90.0);
        assert_eq!(thresholds.temperature_cold, 32.0);
        assert_eq!(thresholds.precipitation, 0.5);
        assert_eq!(thresholds.air_quality, 100.0);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(ThresholdSet::default().validate().is_ok());
        let thresholds = ThresholdSet {
            precipitation: f64::NAN,
            ..ThresholdSet::default()
        };
        assert_eq!(
            thresholds.validate().unwrap_err(),
            ValidationError::Threshold("precipitation")
        );
    }
}
