//! Hard-coded next-step task suggestions per transaction stage.

use ez_core::entities::TaskTemplate;
use ez_core::enums::SuggestionKind;

/// `(role, title, due_in_days)`
type Entry = (&'static str, &'static str, u32);

const LISTING_TASKS: &[Entry] = &[
    ("agent", "Order professional photography", 3),
    ("agent", "Complete property disclosure form", 5),
    ("seller", "Stage the home for viewing", 7),
];

const CONTRACT_TASKS: &[Entry] = &[
    ("buyer", "Deliver earnest money deposit", 3),
    ("buyer", "Schedule home inspection", 7),
    ("seller", "Provide property disclosures", 5),
    ("agent", "Open escrow account", 2),
    ("agent", "Coordinate home inspection", 7),
];

/// Appended to [`CONTRACT_TASKS`] only when the role takes part in the deal.
const CONTRACT_ROLE_TASKS: &[Entry] = &[
    ("lawyer", "Review purchase contract", 5),
    ("inspector", "Conduct home inspection", 10),
];

const CLOSING_TASKS: &[Entry] = &[
    ("buyer", "Arrange final walkthrough", 2),
    ("buyer", "Secure final financing approval", 5),
    ("seller", "Complete all repairs", 3),
    ("agent", "Schedule closing meeting", 1),
];

/// Suggested tasks for `(kind, stage)`.
///
/// Listing suggestions ignore the stage. Deal stages other than
/// `offer_accepted`, `under_contract` and `closing` yield nothing.
#[must_use]
pub fn suggest(kind: SuggestionKind, stage: &str, roles: &[String]) -> Vec<TaskTemplate> {
    let has_role = |role: &str| roles.iter().any(|r| r == role);

    let entries: Vec<&Entry> = match (kind, stage) {
        (SuggestionKind::Listing, _) => LISTING_TASKS.iter().collect(),
        (SuggestionKind::Deal, "offer_accepted" | "under_contract") => CONTRACT_TASKS
            .iter()
            .chain(CONTRACT_ROLE_TASKS.iter().filter(|(role, ..)| has_role(role)))
            .collect(),
        (SuggestionKind::Deal, "closing") => CLOSING_TASKS.iter().collect(),
        (SuggestionKind::Deal, _) => Vec::new(),
    };

    entries
        .into_iter()
        .map(|&(role, title, days)| TaskTemplate {
            stage: stage.to_string(),
            assigned_role: role.to_string(),
            title: title.to_string(),
            description: None,
            due_in_days: Some(days),
            dependency_titles: Vec::new(),
        })
        .collect()
}
