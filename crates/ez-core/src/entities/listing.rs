use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ListingStatus;

/// A listing as seen by the lead scorer.
///
/// Owned by external storage; only the fields the scorer reads are modelled.
/// Display fields sent alongside (title, photos, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Listing {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub list_price: Option<f64>,
    /// Fractional counts are allowed.
    #[serde(default)]
    pub beds: Option<f64>,
    #[serde(default)]
    pub property_type: Option<String>,
}

/// A listing candidate for matchmake ranking.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CandidateListing {
    pub id: String,
    pub price: f64,
    #[serde(default)]
    pub beds: Option<u32>,
    #[serde(default)]
    pub baths: Option<f64>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Listing fields read by the deterministic listing summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ListingFacts {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub beds: Option<f64>,
    #[serde(default)]
    pub baths: Option<f64>,
    #[serde(default)]
    pub sqft: Option<f64>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Verification state of a listing post.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ListingPost {
    pub id: String,
    pub verified: bool,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub listing_status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
