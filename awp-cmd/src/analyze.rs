//! One-shot analysis from the command line.

use anyhow::Context;
use awp_core::{
    condition::Condition,
    error::ValidationError,
    location::Location,
    query::Query,
    result::AnalysisResult,
    samples::SampleSet,
    thresholds::{
        ThresholdSet, DEFAULT_AIR_QUALITY, DEFAULT_PRECIPITATION, DEFAULT_TEMPERATURE_COLD,
        DEFAULT_TEMPERATURE_HOT, DEFAULT_WIND_SPEED,
    },
    time_range::TimeRange,
};
use awp_engine::analyzer::Analyzer;
use awp_export::{ExportFormat, RiskLevel};
use clap::{Args, ValueEnum};
use log::info;
use std::{fmt::Write as _, path::PathBuf};

/// How `analyze` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    Csv,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Display name of the location
    #[arg(long)]
    pub name: String,

    /// Latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// How the location was selected
    #[arg(long, default_value = "coordinates")]
    pub method: String,

    /// Conditions to analyze: very-hot, very-cold, very-windy, very-wet, poor-air-quality
    #[arg(short = 'c', long = "condition", required = true, value_delimiter = ',')]
    pub conditions: Vec<Condition>,

    /// Start of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// End of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Day of year (1-365), instead of a date range
    #[arg(long)]
    pub day_of_year: Option<i64>,

    /// Hot temperature threshold in Fahrenheit
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE_HOT, allow_negative_numbers = true)]
    pub hot: f64,

    /// Cold temperature threshold in Fahrenheit
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE_COLD, allow_negative_numbers = true)]
    pub cold: f64,

    /// Wind speed threshold in mph
    #[arg(long, default_value_t = DEFAULT_WIND_SPEED)]
    pub wind: f64,

    /// Precipitation threshold in inches per day
    #[arg(long, default_value_t = DEFAULT_PRECIPITATION)]
    pub precipitation: f64,

    /// Air quality threshold (AQI)
    #[arg(long, default_value_t = DEFAULT_AIR_QUALITY)]
    pub air_quality: f64,

    /// CSV of `condition,value` historical samples to use instead of the surrogate
    #[arg(long)]
    pub samples: Option<PathBuf>,

    /// Seed for reproducible surrogate draws
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// Validate the arguments into a query.
    pub fn to_query(&self) -> Result<Query, ValidationError> {
        let location = Location::new(&self.name, self.lat, self.lon, &self.method)?;
        let time_range = TimeRange::from_parts(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.day_of_year,
        )?;
        let thresholds = ThresholdSet {
            temperature_hot: self.hot,
            temperature_cold: self.cold,
            wind_speed: self.wind,
            precipitation: self.precipitation,
            air_quality: self.air_quality,
        };
        Query::new(location, self.conditions.clone(), time_range, Some(thresholds))
    }
}

pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<()> {
    let query = args.to_query()?;

    let samples = match &args.samples {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read samples from {}", path.display()))?;
            SampleSet::parse_sample_csv(&data)?
        }
        None => SampleSet::new(),
    };

    let mut analyzer = match args.seed {
        Some(seed) => Analyzer::seeded(seed),
        None => Analyzer::from_entropy(),
    };
    let result = analyzer.analyze_with_samples(&query, &samples)?;

    let rendered = match args.format {
        OutputFormat::Table => render_table(&result),
        OutputFormat::Csv => ExportFormat::Csv.render(&result, &query.time_range)?,
        OutputFormat::Json => ExportFormat::Json.render(&result, &query.time_range)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            info!("Analysis written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Plain text table of a result, one line per condition.
pub fn render_table(result: &AnalysisResult) -> String {
    let location = result.location();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Weather analysis for {} ({}, {})",
        location.name(),
        location.latitude(),
        location.longitude()
    );
    let _ = writeln!(
        out,
        "{:<18} {:>11}  {:<14} {}",
        "Condition", "Probability", "Threshold", "Risk"
    );
    for (condition, probability) in result.entries() {
        let threshold = result
            .thresholds()
            .get(&condition)
            .map_or_else(|| "N/A".to_string(), |i| format!("{} {}", i.threshold, i.unit));
        let _ = writeln!(
            out,
            "{:<18} {:>10}%  {:<14} {}",
            condition.display_name(),
            probability,
            threshold,
            RiskLevel::from_probability(probability)
        );
    }
    out
}
