//! Turns a validated query into a complete analysis result.

use crate::probability::{EstimateSource, ProbabilityModel};
use anyhow::{anyhow, bail};
use awp_core::{
    error::AnalysisError,
    query::Query,
    result::{
        units_glossary, AnalysisResult, ThresholdInfo, ThresholdMap, API_VERSION, DATA_SOURCE,
    },
    samples::SampleSet,
    thresholds::ThresholdBinding,
};
use chrono::{DateTime, Local};
use log::{debug, error, info};
use rand::{rngs::StdRng, Rng};
use serde_json::{json, Map, Value};

/// How much of a result is backed by observations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DataQuality {
    Simulated,
    Observed,
    Mixed,
}

impl DataQuality {
    fn from_counts(observed: usize, total: usize) -> Self {
        match observed {
            0 => DataQuality::Simulated,
            n if n == total => DataQuality::Observed,
            _ => DataQuality::Mixed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataQuality::Simulated => "simulated",
            DataQuality::Observed => "observed",
            DataQuality::Mixed => "mixed",
        }
    }
}

/// Runs the probability model over every condition of a query.
#[derive(Debug, Clone)]
pub struct Analyzer<R> {
    model: ProbabilityModel<R>,
}

impl Analyzer<StdRng> {
    /// Analyzer drawing from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(ProbabilityModel::from_entropy())
    }

    /// Analyzer whose surrogate draws repeat for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ProbabilityModel::seeded(seed))
    }
}

impl<R: Rng> Analyzer<R> {
    pub fn new(model: ProbabilityModel<R>) -> Self {
        Analyzer { model }
    }

    /// Analyze `query` with the surrogate model only.
    pub fn analyze(&mut self, query: &Query) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_samples(query, &SampleSet::new())
    }

    /// Analyze `query`, using `samples` for every condition that has some.
    pub fn analyze_with_samples(
        &mut self,
        query: &Query,
        samples: &SampleSet,
    ) -> Result<AnalysisResult, AnalysisError> {
        info!(
            "Analyzing {} conditions for {} ({}, {})",
            query.conditions.len(),
            query.location.name(),
            query.location.latitude(),
            query.location.longitude()
        );
        if !samples.is_empty() {
            debug!("Historical samples supplied; surrogate only for conditions without any");
        }
        self.try_analyze(query, samples).map_err(|e| {
            error!("Analysis failed for {}: {e}", query.location.name());
            AnalysisError::new(e.to_string())
        })
    }

    fn try_analyze(&mut self, query: &Query, samples: &SampleSet) -> anyhow::Result<AnalysisResult> {
        let mut probabilities = Vec::with_capacity(query.conditions.len());
        let mut thresholds = ThresholdMap::new();
        let mut observed = Map::new();

        for &condition in &query.conditions {
            let binding = ThresholdBinding::of(condition);
            let threshold = query.thresholds.for_condition(condition);
            let estimate = self.model.estimate(
                &query.location,
                condition,
                threshold,
                samples.get(condition),
            );
            if let EstimateSource::Observed(statistics) = estimate.source {
                observed.insert(condition.to_string(), serde_json::to_value(statistics)?);
            }
            probabilities.push(estimate.probability);
            thresholds.insert(
                condition,
                ThresholdInfo {
                    threshold,
                    unit: binding.unit.to_string(),
                },
            );
        }

        let observed_count = query
            .conditions
            .iter()
            .filter(|condition| observed.contains_key(condition.as_str()))
            .count();
        let quality = DataQuality::from_counts(observed_count, query.conditions.len());
        let timestamp = Local::now();
        let metadata = build_metadata(query, quality, observed, timestamp)?;

        AnalysisResult::new(
            query.location.clone(),
            query.conditions.clone(),
            probabilities,
            thresholds,
            metadata,
            timestamp,
        )
        .map_err(|e| anyhow!(e.message().to_string()))
    }
}

fn build_metadata(
    query: &Query,
    quality: DataQuality,
    observed: Map<String, Value>,
    timestamp: DateTime<Local>,
) -> anyhow::Result<Map<String, Value>> {
    let analysis_parameters = json!({
        "conditions": serde_json::to_value(&query.conditions)?,
        "thresholds": serde_json::to_value(query.thresholds)?,
        "time_range": serde_json::to_value(query.time_range)?,
    });
    let mut metadata = json!({
        "data_source": DATA_SOURCE,
        "api_version": API_VERSION,
        "analysis_timestamp": timestamp.to_rfc3339(),
        "location": {
            "name": query.location.name(),
            "method": query.location.method(),
            "coordinates": {
                "latitude": query.location.latitude(),
                "longitude": query.location.longitude(),
            },
        },
        "analysis_parameters": analysis_parameters,
        "data_quality": quality.as_str(),
        "units": units_glossary(),
    });
    if !observed.is_empty() {
        metadata["observed_statistics"] = Value::Object(observed);
    }
    match metadata {
        Value::Object(map) => Ok(map),
        other => bail!("metadata is not an object: {other}"),
    }
}
