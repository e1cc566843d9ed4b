//! Message triage by keyword.
//!
//! Checks run in a fixed order and the first group with a hit wins, so
//! "Can we schedule a tour?" is SCHEDULING even though it ends in `?`.
//! Matching is plain lowercase substring search: "see" also fires inside
//! "seems", and negations ("not interested in making an offer") are not
//! understood.

use ez_core::enums::MessageLabel;

const SCHEDULING: &[&str] = &[
    "tour",
    "viewing",
    "schedule",
    "visit",
    "see",
    "available",
    "when can",
];

const OFFER: &[&str] = &[
    "offer",
    "bid",
    "interested in making",
    "want to buy",
    "purchase",
];

/// Keyword groups in priority order. Anything unmatched is a question.
const RULES: &[(MessageLabel, &[&str])] = &[
    (MessageLabel::Scheduling, SCHEDULING),
    (MessageLabel::Offer, OFFER),
];

/// Label a conversation message.
#[must_use]
pub fn classify(text: &str) -> MessageLabel {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map_or(MessageLabel::Question, |(label, _)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Can we schedule a tour tomorrow?", MessageLabel::Scheduling)]
    #[case("Is the place AVAILABLE this weekend", MessageLabel::Scheduling)]
    #[case("When can I come by", MessageLabel::Scheduling)]
    #[case("I'd like to make an offer", MessageLabel::Offer)]
    #[case("We want to buy it", MessageLabel::Offer)]
    #[case("Ready to purchase.", MessageLabel::Offer)]
    #[case("How much are the HOA fees?", MessageLabel::Question)]
    #[case("Thanks!", MessageLabel::Question)]
    #[case("", MessageLabel::Question)]
    fn labels(#[case] text: &str, #[case] expected: MessageLabel) {
        assert_eq!(classify(text), expected);
    }

    #[test]
    fn scheduling_outranks_offer() {
        assert_eq!(
            classify("Before I make an offer, can I visit?"),
            MessageLabel::Scheduling
        );
    }

    #[test]
    fn negation_is_not_understood() {
        assert_eq!(
            classify("We are not interested in making an offer"),
            MessageLabel::Offer
        );
    }
}
