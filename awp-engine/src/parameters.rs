//! Static catalog of the Earth observation parameters behind each category.

use serde::{ser::SerializeMap, Serialize, Serializer};

/// One category of observation parameters.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ParameterCategory {
    #[serde(skip)]
    pub category: &'static str,
    pub parameters: Vec<&'static str>,
    pub description: &'static str,
    pub units: &'static str,
}

/// Parameter categories, serialized as an object keyed by category in
/// catalog order.
#[derive(Debug, PartialEq, Clone)]
pub struct ParameterCatalog(pub Vec<ParameterCategory>);

impl ParameterCatalog {
    pub fn get(&self, category: &str) -> Option<&ParameterCategory> {
        self.0.iter().find(|c| c.category == category)
    }
}

impl Serialize for ParameterCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(category.category, category)?;
        }
        map.end()
    }
}

/// The parameters available for analysis. Never fails.
pub fn available_parameters() -> ParameterCatalog {
    ParameterCatalog(vec![
        ParameterCategory {
            category: "temperature",
            parameters: vec!["T2M", "T2M_MAX", "T2M_MIN"],
            description: "Air temperature at 2 meters above ground",
            units: "Celsius",
        },
        ParameterCategory {
            category: "precipitation",
            parameters: vec!["PRECTOT", "PRECTOTCORR"],
            description: "Total precipitation",
            units: "mm/day",
        },
        ParameterCategory {
            category: "wind",
            parameters: vec!["WS2M", "WS10M", "WS50M"],
            description: "Wind speed at various heights",
            units: "m/s",
        },
        ParameterCategory {
            category: "air_quality",
            parameters: vec!["AOD", "DUST"],
            description: "Aerosol optical depth and dust concentration",
            units: "dimensionless",
        },
    ])
}
