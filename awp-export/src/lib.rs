//! Export of analysis results as CSV and JSON download artifacts.
//!
//! Risk tiers are derived here, at render time, from each probability.

pub mod csv_export;
pub mod json_export;
pub mod risk;

use awp_core::{error::RenderError, result::AnalysisResult, time_range::TimeRange};

pub use csv_export::render_csv;
pub use json_export::render_json;
pub use risk::{RiskLevel, RiskSummary};

/// Download format of an exported result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    /// Render `result` in this format.
    pub fn render(
        &self,
        result: &AnalysisResult,
        time_range: &TimeRange,
    ) -> Result<String, RenderError> {
        match self {
            ExportFormat::Csv => render_csv(result),
            ExportFormat::Json => render_json(result, time_range),
        }
    }

    /// Download filename: `weather_analysis_<location>_<YYYYMMDD>.<ext>`,
    /// with spaces in the location name replaced by underscores.
    pub fn filename(&self, result: &AnalysisResult) -> String {
        format!(
            "weather_analysis_{}_{}.{}",
            result.location().name().replace(' ', "_"),
            result.timestamp().format("%Y%m%d"),
            self.extension()
        )
    }
}
