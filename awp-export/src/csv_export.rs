use crate::risk::RiskLevel;
use awp_core::{error::RenderError, result::AnalysisResult};
use csv::WriterBuilder;
use serde::Serialize;

/// Date format of the "Analysis Date" column.
pub const ANALYSIS_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSV header row.
pub const CSV_HEADERS: [&str; 9] = [
    "Condition",
    "Probability (%)",
    "Threshold",
    "Unit",
    "Risk Level",
    "Location",
    "Latitude",
    "Longitude",
    "Analysis Date",
];

/// Placeholder for a threshold or unit missing from the result.
const NOT_AVAILABLE: &str = "N/A";

#[derive(Serialize)]
#[serde(untagged)]
enum ThresholdCell {
    Value(f64),
    Missing(&'static str),
}

#[derive(Serialize)]
struct CsvRow<'a> {
    condition: String,
    probability: u8,
    threshold: ThresholdCell,
    unit: &'a str,
    risk_level: RiskLevel,
    location: &'a str,
    latitude: f64,
    longitude: f64,
    analysis_date: &'a str,
}

/// Render a result as CSV, one row per condition in result order.
///
/// The header row is always written, even for an empty result.
pub fn render_csv(result: &AnalysisResult) -> Result<String, RenderError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADERS)?;

    let analysis_date = result.timestamp().format(ANALYSIS_DATE_FORMAT).to_string();
    let location = result.location();
    for (condition, probability) in result.entries() {
        let info = result.thresholds().get(&condition);
        wtr.serialize(CsvRow {
            condition: condition.display_name(),
            probability,
            threshold: info.map_or(ThresholdCell::Missing(NOT_AVAILABLE), |i| {
                ThresholdCell::Value(i.threshold)
            }),
            unit: info.map_or(NOT_AVAILABLE, |i| i.unit.as_str()),
            risk_level: RiskLevel::from_probability(probability),
            location: location.name(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            analysis_date: &analysis_date,
        })?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| RenderError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
