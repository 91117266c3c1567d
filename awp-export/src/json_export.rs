use crate::risk::{RiskLevel, RiskSummary};
use awp_core::{
    condition::Condition,
    error::RenderError,
    result::{units_glossary, AnalysisResult, ThresholdMap, API_VERSION, DATA_SOURCE},
    time_range::TimeRange,
};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
struct JsonExport<'a> {
    metadata: ExportMetadata<'a>,
    analysis: ExportAnalysis,
    query_parameters: QueryParameters<'a>,
}

#[derive(Serialize)]
struct ExportMetadata<'a> {
    timestamp: String,
    data_source: &'static str,
    api_version: &'static str,
    location: ExportLocation<'a>,
    units: Map<String, Value>,
}

#[derive(Serialize)]
struct ExportLocation<'a> {
    name: &'a str,
    coordinates: Coordinates,
}

#[derive(Serialize)]
struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct ExportAnalysis {
    conditions: Vec<ConditionEntry>,
    summary: RiskSummary,
}

#[derive(Serialize)]
struct ConditionEntry {
    condition: String,
    probability: u8,
    threshold: Option<f64>,
    unit: Option<String>,
    risk_level: RiskLevel,
}

#[derive(Serialize)]
struct QueryParameters<'a> {
    conditions: &'a [Condition],
    thresholds: &'a ThresholdMap,
    time_range: &'a TimeRange,
}

/// Render a result as a pretty-printed JSON document with a metadata
/// block, per-condition entries, a risk summary and the echoed query
/// parameters.
pub fn render_json(result: &AnalysisResult, time_range: &TimeRange) -> Result<String, RenderError> {
    let location = result.location();
    let conditions = result
        .entries()
        .map(|(condition, probability)| {
            let info = result.thresholds().get(&condition);
            ConditionEntry {
                condition: condition.display_name(),
                probability,
                threshold: info.map(|i| i.threshold),
                unit: info.map(|i| i.unit.clone()),
                risk_level: RiskLevel::from_probability(probability),
            }
        })
        .collect();

    let export = JsonExport {
        metadata: ExportMetadata {
            timestamp: result.timestamp().to_rfc3339(),
            data_source: DATA_SOURCE,
            api_version: API_VERSION,
            location: ExportLocation {
                name: location.name(),
                coordinates: Coordinates {
                    latitude: location.latitude(),
                    longitude: location.longitude(),
                },
            },
            units: units_glossary(),
        },
        analysis: ExportAnalysis {
            conditions,
            summary: RiskSummary::from_probabilities(result.probabilities()),
        },
        query_parameters: QueryParameters {
            conditions: result.conditions(),
            thresholds: result.thresholds(),
            time_range,
        },
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

#[cfg(test)]
mod tests {
    use super::render_json;
    use crate::tests::{fixture, fixture_without_thresholds};
    use awp_core::time_range::TimeRange;
    use serde_json::Value;

    fn render(probabilities: &[u8]) -> Value {
        let output = render_json(&fixture(probabilities), &TimeRange::DayOfYear(197)).unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn test_render_json_conditions() {
        let value = render(&[82, 55, 10]);
        let conditions = value["analysis"]["conditions"].as_array().unwrap();
        assert_eq!(conditions.len(), 3);
        assert_eq!(conditions[0]["condition"], "Very Hot");
        assert_eq!(conditions[0]["probability"], 82);
        assert_eq!(conditions[0]["threshold"], 90.0);
        assert_eq!(conditions[0]["unit"], "°F");
        assert_eq!(conditions[0]["risk_level"], "High");
        assert_eq!(conditions[1]["risk_level"], "Medium");
        assert_eq!(conditions[2]["risk_level"], "Low");
    }

    #[test]
    fn test_render_json_summary() {
        let value = render(&[82, 55, 10]);
        let summary = &value["analysis"]["summary"];
        assert_eq!(summary["total_conditions"], 3);
        assert_eq!(summary["high_risk_conditions"], 1);
        assert_eq!(summary["medium_risk_conditions"], 1);
        assert_eq!(summary["low_risk_conditions"], 1);
        assert_eq!(summary["overall_risk_level"], "High");
    }

    #[test]
    fn test_render_json_metadata_and_query() {
        let value = render(&[20]);
        assert_eq!(value["metadata"]["data_source"], "NASA Earth Observation Data");
        assert_eq!(value["metadata"]["api_version"], "v1.0");
        assert_eq!(value["metadata"]["location"]["name"], "Boulder Creek");
        assert_eq!(value["metadata"]["location"]["coordinates"]["longitude"], -105.27);
        assert_eq!(value["metadata"]["units"]["precipitation"], "inches per day");
        assert_eq!(value["query_parameters"]["conditions"][0], "very-hot");
        assert_eq!(value["query_parameters"]["thresholds"]["very-hot"]["threshold"], 90.0);
        assert_eq!(value["query_parameters"]["time_range"]["day_of_year"], 197);
        assert!(value["query_parameters"]["time_range"]["start_date"].is_null());
    }

    #[test]
    fn test_render_json_missing_threshold_is_null() {
        let output =
            render_json(&fixture_without_thresholds(&[50]), &TimeRange::DayOfYear(1)).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert!(value["analysis"]["conditions"][0]["threshold"].is_null());
        assert!(value["analysis"]["conditions"][0]["unit"].is_null());
    }

    #[test]
    fn test_render_json_is_indented() {
        let output = render_json(&fixture(&[50]), &TimeRange::DayOfYear(1)).unwrap();
        assert!(output.starts_with("{\n  \"metadata\""));
    }
}
