use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// An adverse weather category that can be analyzed.
///
/// The set is closed: parsing any other identifier fails with
/// [`ValidationError::UnknownCondition`]. Identifiers on the wire are
/// kebab-case (`very-hot`, `poor-air-quality`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    VeryHot,
    VeryCold,
    VeryWindy,
    VeryWet,
    PoorAirQuality,
}

impl Condition {
    /// Every supported condition, in declaration order.
    pub const ALL: [Condition; 5] = [
        Condition::VeryHot,
        Condition::VeryCold,
        Condition::VeryWindy,
        Condition::VeryWet,
        Condition::PoorAirQuality,
    ];

    /// Wire identifier, e.g. `"very-hot"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::VeryHot => "very-hot",
            Condition::VeryCold => "very-cold",
            Condition::VeryWindy => "very-windy",
            Condition::VeryWet => "very-wet",
            Condition::PoorAirQuality => "poor-air-quality",
        }
    }

    /// Position in [`Condition::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Human-readable name: the identifier with `-` replaced by spaces and
    /// each word capitalized ("Poor Air Quality").
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Condition::ALL
            .into_iter()
            .find(|condition| condition.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownCondition(trimmed.to_string()))
    }
}
