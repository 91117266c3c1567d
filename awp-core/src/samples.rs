use crate::{condition::Condition, error::SampleError};
use csv::{ReaderBuilder, Trim};
use log::debug;
use std::collections::BTreeMap;

/// Historical observations supplied by the caller, grouped by condition.
///
/// Values are in the units of the matching threshold (°F, mph, in/day,
/// AQI). A condition with no samples falls back to the surrogate estimate.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SampleSet {
    samples: BTreeMap<Condition, Vec<f64>>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append observations for `condition`.
    pub fn extend(&mut self, condition: Condition, values: impl IntoIterator<Item = f64>) {
        self.samples.entry(condition).or_default().extend(values);
    }

    /// Observations for `condition`, or `None` if there are none.
    pub fn get(&self, condition: Condition) -> Option<&[f64]> {
        self.samples
            .get(&condition)
            .map(Vec::as_slice)
            .filter(|values| !values.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.samples.values().all(Vec::is_empty)
    }

    /// Parse a CSV of `condition,value` rows.
    ///
    /// A leading header row whose first column is `condition` is skipped,
    /// as are blank lines and lines starting with `#`.
    pub fn parse_sample_csv(csv_object: &str) -> Result<SampleSet, SampleError> {
        let mut sample_set = SampleSet::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(csv_object.as_bytes());
        for (i, row) in rdr.records().enumerate() {
            let record = row?;
            let row_number = i + 1;
            if i == 0 && record.get(0) == Some("condition") {
                continue;
            }
            if record.len() != 2 {
                return Err(SampleError::Columns {
                    row: row_number,
                    found: record.len(),
                });
            }
            let condition = record
                .get(0)
                .unwrap_or_default()
                .parse::<Condition>()
                .map_err(|source| SampleError::Condition {
                    row: row_number,
                    source,
                })?;
            let raw_value = record.get(1).unwrap_or_default();
            let value = raw_value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SampleError::Value {
                    row: row_number,
                    value: raw_value.to_string(),
                })?;
            sample_set.extend(condition, [value]);
        }
        for (condition, values) in &sample_set.samples {
            debug!("Loaded {} samples for {}", values.len(), condition);
        }
        Ok(sample_set)
    }
}
