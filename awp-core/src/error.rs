/// Error types for adverse weather probability analysis
use chrono::NaiveDate;
use thiserror::Error;

/// A query field that is malformed or out of range.
///
/// Raised while turning caller input into a [`crate::query::Query`], so the
/// engine never sees an invalid query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Latitude outside [-90, 90]
    #[error("Latitude must be between -90 and 90, got {0}")]
    Latitude(f64),

    /// Longitude outside [-180, 180]
    #[error("Longitude must be between -180 and 180, got {0}")]
    Longitude(f64),

    /// Condition identifier outside the supported set
    #[error("Unknown weather condition: {0}")]
    UnknownCondition(String),

    /// Date string that is not `YYYY-MM-DD`
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),

    /// Day of year outside [1, 365]
    #[error("Day of year must be between 1 and 365, got {0}")]
    DayOfYear(i64),

    /// Neither a date pair nor a day of year was given
    #[error("Time range needs either start_date and end_date, or day_of_year")]
    MissingTimeRange,

    /// Both a date pair and a day of year were given
    #[error("Time range cannot combine start_date/end_date with day_of_year")]
    AmbiguousTimeRange,

    /// Only one end of the date pair was given
    #[error("Time range needs both start_date and end_date")]
    IncompleteDateRange,

    /// Start date later than end date
    #[error("start_date {start} is after end_date {end}")]
    DateOrder { start: NaiveDate, end: NaiveDate },

    /// Threshold that is NaN or infinite
    #[error("Threshold {0} must be a finite number")]
    Threshold(&'static str),
}

/// Failure inside probability computation or result assembly.
///
/// Carries the message of the fault that caused it. The engine either
/// returns a complete result or this error, never a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to analyze weather conditions: {message}")]
pub struct AnalysisError {
    message: String,
}

impl AnalysisError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message of the originating fault.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure while serializing a result for export.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to write a CSV record
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to flush the CSV writer
    #[error("Failed to flush CSV output: {0}")]
    Flush(String),

    /// Failed to encode JSON
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendered bytes were not UTF-8
    #[error("Rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Failure while loading caller-supplied historical samples.
#[derive(Error, Debug)]
pub enum SampleError {
    /// Failed to read the CSV
    #[error("Failed to parse sample CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Row with the wrong number of columns
    #[error("Sample row {row} must have 2 columns (condition,value), found {found}")]
    Columns { row: usize, found: usize },

    /// Row naming an unsupported condition
    #[error("Sample row {row}: {source}")]
    Condition {
        row: usize,
        #[source]
        source: ValidationError,
    },

    /// Row whose value is not a finite number
    #[error("Sample row {row}: invalid value '{value}'")]
    Value { row: usize, value: String },
}
