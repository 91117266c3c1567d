use crate::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for time range fields: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The window a query is about.
///
/// Exactly one addressing mode is allowed: an inclusive date pair or a
/// day of year. On the wire both modes share one object,
/// `{start_date, end_date, day_of_year}`, with the unused fields null.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "TimeRangeInput", into = "TimeRangeInput")]
pub enum TimeRange {
    Dates { start: NaiveDate, end: NaiveDate },
    DayOfYear(u16),
}

/// Wire form of a [`TimeRange`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRangeInput {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub day_of_year: Option<i64>,
}

impl TimeRange {
    /// Validate the raw parts of a time range.
    pub fn from_parts(
        start_date: Option<&str>,
        end_date: Option<&str>,
        day_of_year: Option<i64>,
    ) -> Result<Self, ValidationError> {
        match (start_date, end_date, day_of_year) {
            (None, None, None) => Err(ValidationError::MissingTimeRange),
            (None, None, Some(day)) => TimeRange::day_of_year(day),
            (Some(_), _, Some(_)) | (_, Some(_), Some(_)) => {
                Err(ValidationError::AmbiguousTimeRange)
            }
            (Some(start), Some(end), None) => {
                TimeRange::dates(parse_date(start)?, parse_date(end)?)
            }
            (Some(_), None, None) | (None, Some(_), None) => {
                Err(ValidationError::IncompleteDateRange)
            }
        }
    }

    /// Inclusive date range; `start` must not be after `end`.
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::DateOrder { start, end });
        }
        Ok(TimeRange::Dates { start, end })
    }

    /// Day of year in [1, 365].
    pub fn day_of_year(day: i64) -> Result<Self, ValidationError> {
        match u16::try_from(day) {
            Ok(d @ 1..=365) => Ok(TimeRange::DayOfYear(d)),
            _ => Err(ValidationError::DayOfYear(day)),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::Date(s.to_string()))
}

impl TryFrom<TimeRangeInput> for TimeRange {
    type Error = ValidationError;

    fn try_from(value: TimeRangeInput) -> Result<Self, Self::Error> {
        TimeRange::from_parts(
            value.start_date.as_deref(),
            value.end_date.as_deref(),
            value.day_of_year,
        )
    }
}

impl From<TimeRange> for TimeRangeInput {
    fn from(value: TimeRange) -> Self {
        match value {
            TimeRange::Dates { start, end } => TimeRangeInput {
                start_date: Some(start.format(DATE_FORMAT).to_string()),
                end_date: Some(end.format(DATE_FORMAT).to_string()),
                day_of_year: None,
            },
            TimeRange::DayOfYear(day) => TimeRangeInput {
                start_date: None,
                end_date: None,
                day_of_year: Some(i64::from(day)),
            },
        }
    }
}
