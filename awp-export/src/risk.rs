use serde::Serialize;
use std::fmt;

/// Probability at or above which a condition is high risk.
pub const HIGH_RISK_MIN: u8 = 70;

/// Probability at or above which a condition is medium risk.
pub const MEDIUM_RISK_MIN: u8 = 40;

/// Risk tier derived from a probability at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: u8) -> Self {
        if probability >= HIGH_RISK_MIN {
            RiskLevel::High
        } else if probability >= MEDIUM_RISK_MIN {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of conditions per risk tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    pub total_conditions: usize,
    pub high_risk_conditions: usize,
    pub medium_risk_conditions: usize,
    pub low_risk_conditions: usize,
    /// The highest tier present; `Low` when there are no conditions.
    pub overall_risk_level: RiskLevel,
}

impl RiskSummary {
    pub fn from_probabilities(probabilities: &[u8]) -> Self {
        let levels: Vec<RiskLevel> = probabilities
            .iter()
            .map(|&p| RiskLevel::from_probability(p))
            .collect();
        let count = |level| levels.iter().filter(|&&l| l == level).count();
        RiskSummary {
            total_conditions: levels.len(),
            high_risk_conditions: count(RiskLevel::High),
            medium_risk_conditions: count(RiskLevel::Medium),
            low_risk_conditions: count(RiskLevel::Low),
            overall_risk_level: levels.iter().copied().max().unwrap_or(RiskLevel::Low),
        }
    }
}
