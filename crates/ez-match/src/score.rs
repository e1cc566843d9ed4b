//! Lead scoring: how well one listing fits a parsed buyer need.

use ez_core::entities::{BuyerNeed, Listing, MatchResult};

/// Score reported when the need specifies no criteria at all.
pub const DEFAULT_SCORE: u8 = 50;

/// Verification level at which a buyer earns [`VERIFIED_BONUS`].
pub const VERIFIED_LEVEL: i64 = 2;

/// Added to every score for verified buyers, regardless of fit.
pub const VERIFIED_BONUS: u8 = 5;

/// A price more than this share under the ceiling reads "well below".
const WELL_BELOW_RATIO: f64 = 0.20;

/// Running tally of specified versus satisfied criteria.
#[derive(Default)]
struct Tally {
    total: u16,
    matched: u16,
    reasons: Vec<String>,
}

impl Tally {
    fn check(&mut self, satisfied: Option<String>) {
        self.total += 1;
        if let Some(reason) = satisfied {
            self.matched += 1;
            self.reasons.push(reason);
        }
    }

    /// `round(matched / total * 100)`, or [`DEFAULT_SCORE`] with no criteria.
    fn percent(&self) -> u8 {
        if self.total == 0 {
            return DEFAULT_SCORE;
        }
        let rounded = (self.matched * 200 + self.total) / (2 * self.total);
        u8::try_from(rounded).unwrap_or(100)
    }
}

/// Score `listing` against `need` for a buyer at `verification` level.
///
/// Only criteria the need actually specifies count toward the total; zero
/// and empty values are treated as unspecified.
#[must_use]
pub fn score(need: &BuyerNeed, listing: &Listing, verification: i64) -> MatchResult {
    let mut tally = Tally::default();

    if let Some(city) = need.city.as_deref().filter(|c| !c.is_empty()) {
        tally.check(
            listing
                .city
                .as_deref()
                .filter(|lc| lc.to_lowercase() == city.to_lowercase())
                .map(|lc| format!("located in {lc}")),
        );
    }

    if let Some(max) = need.price_max.filter(|&m| m > 0) {
        #[allow(clippy::cast_precision_loss)]
        let max = max as f64;
        tally.check(listing.list_price.filter(|&p| p <= max).map(|price| {
            if (max - price) / max > WELL_BELOW_RATIO {
                "well below your budget".to_string()
            } else {
                "within your budget".to_string()
            }
        }));
    }

    if let Some(beds) = need.beds.filter(|&b| b > 0) {
        tally.check(
            listing
                .beds
                .filter(|&lb| lb >= f64::from(beds))
                .map(|lb| format!("has {lb} bedrooms")),
        );
    }

    if let Some(wanted) = need.property_type {
        tally.check(
            listing
                .property_type
                .as_deref()
                .filter(|ty| ty.eq_ignore_ascii_case(wanted.as_str()))
                .map(|_| "matches your preferred property type".to_string()),
        );
    }

    let mut score = tally.percent();
    if verification >= VERIFIED_LEVEL {
        score = score.saturating_add(VERIFIED_BONUS).min(100);
    }

    MatchResult {
        explanation: explain(score, &tally.reasons),
        score,
    }
}

fn explain(score: u8, reasons: &[String]) -> String {
    if !reasons.is_empty() {
        return format!("High match: {}.", reasons.join(", "));
    }
    match score {
        80.. => "This property closely matches your criteria.",
        60..=79 => "This property partially matches your criteria.",
        _ => "This property has some matching features.",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ez_core::enums::PropertyType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn listing() -> Listing {
        Listing {
            city: Some("Austin".into()),
            list_price: Some(450_000.0),
            beds: Some(3.0),
            property_type: Some("Condo".into()),
        }
    }

    #[test]
    fn no_criteria_scores_default() {
        let result = score(&BuyerNeed::default(), &listing(), 0);
        assert_eq!(result.score, 50);
        assert_eq!(result.explanation, "This property has some matching features.");
    }

    #[test]
    fn verified_buyer_gets_bonus_without_criteria() {
        assert_eq!(score(&BuyerNeed::default(), &listing(), 2).score, 55);
    }

    #[test]
    fn price_at_ceiling_with_bonus_caps_at_100() {
        let need = BuyerNeed {
            price_max: Some(500_000),
            ..Default::default()
        };
        let at_ceiling = Listing {
            list_price: Some(500_000.0),
            ..Default::default()
        };
        let result = score(&need, &at_ceiling, 3);
        assert_eq!(result.score, 100);
        assert_eq!(result.explanation, "High match: within your budget.");
    }

    #[test]
    fn all_criteria_match() {
        let need = BuyerNeed {
            city: Some("austin".into()),
            price_max: Some(600_000),
            beds: Some(2),
            property_type: Some(PropertyType::Condo),
            ..Default::default()
        };
        let result = score(&need, &listing(), 0);
        assert_eq!(result.score, 100);
        assert_eq!(
            result.explanation,
            "High match: located in Austin, well below your budget, has 3 bedrooms, \
             matches your preferred property type."
        );
    }

    #[rstest]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 2, 50)]
    #[case(0, 4, 0)]
    fn partial_matches_round(#[case] matched: u16, #[case] total: u16, #[case] expected: u8) {
        let tally = Tally {
            total,
            matched,
            reasons: Vec::new(),
        };
        assert_eq!(tally.percent(), expected);
    }

    #[test]
    fn missing_listing_fields_do_not_match() {
        let need = BuyerNeed {
            city: Some("Austin".into()),
            price_max: Some(500_000),
            beds: Some(2),
            ..Default::default()
        };
        let result = score(&need, &Listing::default(), 0);
        assert_eq!(result.score, 0);
        assert_eq!(result.explanation, "This property has some matching features.");
    }

    #[test]
    fn fractional_listing_beds_compare_as_numbers() {
        let need = BuyerNeed {
            beds: Some(2),
            ..Default::default()
        };
        let roomy = Listing {
            beds: Some(2.5),
            ..Default::default()
        };
        let result = score(&need, &roomy, 0);
        assert_eq!(result.score, 100);
        assert_eq!(result.explanation, "High match: has 2.5 bedrooms.");

        let short = Listing {
            beds: Some(1.5),
            ..Default::default()
        };
        assert_eq!(score(&need, &short, 0).score, 0);
    }

    #[test]
    fn zero_values_are_unspecified() {
        let need = BuyerNeed {
            city: Some(String::new()),
            price_max: Some(0),
            beds: Some(0),
            ..Default::default()
        };
        assert_eq!(score(&need, &listing(), 0).score, DEFAULT_SCORE);
    }

    #[test]
    fn over_budget_and_too_small() {
        let need = BuyerNeed {
            price_max: Some(400_000),
            beds: Some(4),
            ..Default::default()
        };
        let result = score(&need, &listing(), 0);
        assert_eq!(result.score, 0);
    }

    #[rstest]
    #[case(100, "This property closely matches your criteria.")]
    #[case(80, "This property closely matches your criteria.")]
    #[case(79, "This property partially matches your criteria.")]
    #[case(60, "This property partially matches your criteria.")]
    #[case(59, "This property has some matching features.")]
    fn explanation_bands_without_reasons(#[case] value: u8, #[case] expected: &str) {
        assert_eq!(explain(value, &[]), expected);
    }
}
