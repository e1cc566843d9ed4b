//! Deterministic listing summaries: a few short display lines built from the
//! listing's facts.

use ez_core::entities::ListingFacts;

/// Feature names quoted in the summary.
const MAX_FEATURES: usize = 3;

/// Summary lines in fixed order: price and type, beds, baths, square footage,
/// features. Absent or zero facts are left out.
#[must_use]
pub fn summarize(listing: &ListingFacts) -> Vec<String> {
    let kind = listing
        .property_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or("Property");
    let headline = match positive(listing.price) {
        Some(price) => format!("${} {kind}", group_thousands(price)),
        None => kind.to_string(),
    };

    let mut lines = vec![headline];
    lines.extend(positive(listing.beds).map(|beds| count(beds, "bed")));
    lines.extend(positive(listing.baths).map(|baths| count(baths, "bath")));
    lines.extend(positive(listing.sqft).map(|sqft| format!("{} sqft", group_thousands(sqft))));

    let features: Vec<&str> = listing
        .features
        .iter()
        .map(String::as_str)
        .filter(|f| !f.is_empty())
        .take(MAX_FEATURES)
        .collect();
    if !features.is_empty() {
        lines.push(format!("Features: {}", features.join(", ")));
    }
    lines
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// `3 beds`, `1 bath`, `2.5 baths`.
fn count(n: f64, unit: &str) -> String {
    let plural = if n > 1.0 { "s" } else { "" };
    format!("{n} {unit}{plural}")
}

/// Whole number with comma thousands separators: `1250000.4` -> `1,250,000`.
fn group_thousands(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let digits = (value.round() as u64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
