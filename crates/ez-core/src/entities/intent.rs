use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A buyer's saved search, used to rank candidate listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BuyerIntent {
    #[serde(default)]
    pub budget_min: Option<f64>,
    #[serde(default)]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub beds_min: Option<u32>,
    #[serde(default)]
    pub baths_min: Option<f64>,
    #[serde(default)]
    pub property_types: Vec<String>,
    #[serde(default)]
    pub must_haves: Vec<String>,
    #[serde(default)]
    pub dealbreakers: Vec<String>,
    #[serde(default)]
    pub commute_anchor: Option<CommuteAnchor>,
}

/// A place the buyer commutes to, with an optional tolerance.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CommuteAnchor {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub max_minutes: Option<u32>,
}
