//! Intent parsing: free-text buyer descriptions into structured criteria.
//!
//! Parsing never fails. Each field is extracted independently by its own
//! pattern, so a sentence can yield any subset of the fields, including none.
//!
//! ```
//! use ez_core::enums::PropertyType;
//! use ez_match::intent::parse;
//!
//! let need = parse("3 bed condo in Austin under $500k");
//! assert_eq!(need.city.as_deref(), Some("Austin"));
//! assert_eq!(need.price_max, Some(500_000));
//! assert_eq!(need.beds, Some(3));
//! assert_eq!(need.property_type, Some(PropertyType::Condo));
//! ```

use std::collections::BTreeSet;
use std::sync::LazyLock;

use ez_core::entities::BuyerNeed;
use ez_core::enums::PropertyType;
use regex::Regex;

/// Location keyword followed by a capitalized phrase. The keyword is matched
/// case-insensitively; the phrase must keep its capitals.
static CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:in|at|near)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\b").expect("city regex")
});

/// Money-like amount: optional `$`, comma-grouped or plain digits, optional
/// decimal fraction, optional `k`.
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\$)?\b(\d{1,3}(?:,\d{3})+|\d+)(?:\.(\d+))?([kK])?\b").expect("amount regex")
});

static BEDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)[\s-]*(?:bedrooms?|beds?|bdr|br)\b").expect("beds regex")
});

/// A room-count unit right after an amount means the amount is not a price.
static ROOM_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s-]*(?i:bedrooms?|beds?|bdr|br|bathrooms?|baths?|ba)\b")
        .expect("room unit regex")
});

/// Keyword groups mapped to the feature tag they add.
const FEATURE_KEYWORDS: &[(&[&str], &str)] = &[
    (&["backyard", "yard"], "backyard"),
    (&["garage", "parking"], "garage"),
];

/// Parse free text into a [`BuyerNeed`].
#[must_use]
pub fn parse(text: &str) -> BuyerNeed {
    let lower = text.to_lowercase();
    BuyerNeed {
        city: parse_city(text),
        price_max: parse_price(text),
        beds: parse_beds(text),
        property_type: parse_property_type(&lower),
        features: parse_features(&lower),
    }
}

fn parse_city(text: &str) -> Option<String> {
    CITY_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

struct Amount<'t> {
    digits: &'t str,
    fraction: Option<&'t str>,
    dollar: bool,
    thousands: bool,
}

impl Amount<'_> {
    /// `$500`, `450k`, and `1,200` read as prices; a bare `3` does not.
    fn looks_like_price(&self) -> bool {
        self.dollar || self.thousands || self.digits.chars().filter(char::is_ascii_digit).count() >= 4
    }

    /// Numeric value in whole dollars, or `None` when it does not fit in a
    /// `u64`. A fraction only counts under `k` (`1.5k` is 1500); cents drop.
    fn value(&self) -> Option<u64> {
        let plain: String = self.digits.chars().filter(char::is_ascii_digit).collect();
        let base = plain.parse::<u64>().ok()?;
        if !self.thousands {
            return Some(base);
        }
        let fraction = self.fraction.map_or(Ok(0), |f| {
            format!("{:0<3}", &f[..f.len().min(3)]).parse::<u64>()
        });
        base.checked_mul(1000)?.checked_add(fraction.ok()?)
    }
}

/// Pick the price ceiling.
///
/// Room counts ("3 bed", "2.5 baths") are never prices. Among the remaining
/// amounts the first price-looking one wins; failing that, the first amount.
fn parse_price(text: &str) -> Option<u64> {
    let amounts: Vec<Amount<'_>> = AMOUNT_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if ROOM_UNIT_RE.is_match(&text[whole.end()..]) {
                return None;
            }
            Some(Amount {
                digits: caps.get(2)?.as_str(),
                fraction: caps.get(3).map(|m| m.as_str()),
                dollar: caps.get(1).is_some(),
                thousands: caps.get(4).is_some(),
            })
        })
        .collect();

    amounts
        .iter()
        .find(|a| a.looks_like_price())
        .or_else(|| amounts.first())
        .and_then(Amount::value)
}

fn parse_beds(text: &str) -> Option<u32> {
    BEDS_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// First type in [`PropertyType::ALL`] order that appears anywhere in the
/// text. Scan order, not position in the text, breaks ties: "townhouse"
/// contains "house", and `House` is declared first.
fn parse_property_type(lower: &str) -> Option<PropertyType> {
    PropertyType::ALL
        .into_iter()
        .find(|ty| lower.contains(ty.as_str()))
}

fn parse_features(lower: &str) -> BTreeSet<String> {
    FEATURE_KEYWORDS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, tag)| (*tag).to_string())
        .collect()
}
