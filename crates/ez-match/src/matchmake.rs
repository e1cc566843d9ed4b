//! Weighted ranking of candidate listings against a saved buyer intent.
//!
//! | Criterion    | Hit | Miss |
//! |--------------|-----|------|
//! | price        | +40 within, +20 below, +15 up to 10% over | -10 |
//! | beds         | +15 | -5 |
//! | baths        | +10 | -3 |
//! | type         | +15 | -5 |
//! | must-haves   | +10 each | 0 |
//! | dealbreaker  | | -50 |
//! | commute      | +10 | -5 |
//!
//! Criteria the intent or listing leaves unset are skipped. The raw sum is
//! divided by 100 and clamped to `[0, 1]`.

use ez_core::entities::{BuyerIntent, CandidateListing, CommuteAnchor, RankedMatch};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line commute estimate.
const MINUTES_PER_KM: f64 = 1.5;

/// Rank `listings` for `intent`, best first. Ties keep input order.
#[must_use]
pub fn rank(intent: &BuyerIntent, listings: &[CandidateListing]) -> Vec<RankedMatch> {
    let mut matches: Vec<RankedMatch> = listings.iter().map(|l| score_one(intent, l)).collect();
    matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    matches
}

fn score_one(intent: &BuyerIntent, listing: &CandidateListing) -> RankedMatch {
    let mut score: i32 = 0;
    let mut reasons = Vec::new();
    let mut hit = |points: i32, reason: String| {
        score += points;
        reasons.push(reason);
    };

    let price = listing.price;
    if let (Some(min), Some(max)) = (positive(intent.budget_min), positive(intent.budget_max)) {
        if price >= min && price <= max {
            hit(40, "Price within budget".into());
        } else if price < min {
            hit(20, "Price below budget".into());
        } else if price <= max * 1.1 {
            hit(15, "Price slightly above budget".into());
        } else {
            hit(-10, "Price significantly above budget".into());
        }
    }

    if let (Some(min), Some(beds)) = (
        intent.beds_min.filter(|&b| b > 0),
        listing.beds.filter(|&b| b > 0),
    ) {
        if beds >= min {
            hit(15, format!("Meets {min}+ beds requirement"));
        } else {
            hit(-5, "Fewer beds than required".into());
        }
    }

    if let (Some(min), Some(baths)) = (positive(intent.baths_min), positive(listing.baths)) {
        if baths >= min {
            hit(10, format!("Meets {min}+ baths requirement"));
        } else {
            hit(-3, "Fewer baths than required".into());
        }
    }

    let listing_type = listing.property_type.as_deref().filter(|t| !t.is_empty());
    if let (Some(ty), false) = (listing_type, intent.property_types.is_empty()) {
        if intent.property_types.iter().any(|p| p == ty) {
            hit(15, format!("Matches property type: {ty}"));
        } else {
            hit(-5, "Property type mismatch".into());
        }
    }

    let must_have_hits = intent
        .must_haves
        .iter()
        .filter(|mh| has_feature(listing, mh))
        .count();
    if must_have_hits > 0 {
        let points = i32::try_from(must_have_hits).unwrap_or(i32::MAX / 10) * 10;
        hit(points, format!("Has {must_have_hits} must-have feature(s)"));
    }

    if intent.dealbreakers.iter().any(|db| has_feature(listing, db)) {
        hit(-50, "Contains dealbreaker".into());
    }

    let mut commute = None;
    let anchor = intent
        .commute_anchor
        .as_ref()
        .filter(|a| a.lat != 0.0 && a.lng != 0.0);
    if let (Some(anchor), Some(lat), Some(lng)) =
        (anchor, nonzero(listing.lat), nonzero(listing.lng))
    {
        let minutes = commute_minutes(anchor, lat, lng);
        commute = Some(minutes);
        if let Some(max) = anchor.max_minutes.filter(|&m| m > 0) {
            if minutes <= max {
                hit(10, format!("Commute within {max} minutes"));
            } else {
                hit(-5, format!("Commute exceeds {max} minutes"));
            }
        }
    }

    RankedMatch {
        listing_id: listing.id.clone(),
        match_score: (f64::from(score) / 100.0).clamp(0.0, 1.0),
        commute_estimate_minutes: commute,
        reasons,
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Case-insensitive substring match against any listing feature.
fn has_feature(listing: &CandidateListing, wanted: &str) -> bool {
    let wanted = wanted.to_lowercase();
    listing
        .features
        .iter()
        .any(|f| f.to_lowercase().contains(&wanted))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn commute_minutes(anchor: &CommuteAnchor, lat: f64, lng: f64) -> u32 {
    (haversine_km(anchor.lat, anchor.lng, lat, lng) * MINUTES_PER_KM).round() as u32
}

/// Great-circle distance between two points in kilometres.
fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}
