use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::PropertyType;

/// Structured search criteria derived from a buyer's free-text description.
///
/// Every field is optional; absent fields are omitted from JSON. A need with
/// no fields set is valid and means "no criteria".
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BuyerNeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "whole_number"
    )]
    pub price_max: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "whole_number"
    )]
    pub beds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub features: BTreeSet<String>,
}

impl BuyerNeed {
    /// True when no criterion or feature is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.price_max.is_none()
            && self.beds.is_none()
            && self.property_type.is_none()
            && self.features.is_empty()
    }
}

/// Accept any JSON number: fractions round to the nearest whole number,
/// negative values count as unset.
fn whole_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let Some(value) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if !value.is_finite() || value < 0.0 {
        return Ok(None);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = value.round() as u64;
    T::try_from(whole)
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("number {value} is out of range")))
}
