//! Status enums, labels, and kinds for Ezriya.
//!
//! Enums stored in SQL use `snake_case` serialization and expose `as_str()`.
//! `TaskStatus` carries a state machine via `allowed_next_states()` so that
//! transitions are enforced at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// PropertyType
// ---------------------------------------------------------------------------

/// Kind of property a buyer is looking for.
///
/// Declaration order is the scan order used by the intent parser: when a
/// sentence mentions several types, the earliest-declared one wins.
///
/// Serializes kebab-case; deserializes case-insensitively via [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Condo,
    House,
    Apartment,
    Townhouse,
    SingleFamily,
    MultiFamily,
}

impl PropertyType {
    /// All variants in scan order.
    pub const ALL: [Self; 6] = [
        Self::Condo,
        Self::House,
        Self::Apartment,
        Self::Townhouse,
        Self::SingleFamily,
        Self::MultiFamily,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Condo => "condo",
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Townhouse => "townhouse",
            Self::SingleFamily => "single-family",
            Self::MultiFamily => "multi-family",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown property type '{s}'"))
    }
}

impl<'de> Deserialize<'de> for PropertyType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// MessageLabel
// ---------------------------------------------------------------------------

/// Intent label assigned to a conversation message by triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageLabel {
    Scheduling,
    Offer,
    Question,
}

impl MessageLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduling => "SCHEDULING",
            Self::Offer => "OFFER",
            Self::Question => "QUESTION",
        }
    }
}

impl fmt::Display for MessageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ContextType
// ---------------------------------------------------------------------------

/// Scope a task belongs to: a post-match deal or a pre-sale listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    Deal,
    Listing,
}

impl ContextType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deal => "deal",
            Self::Listing => "listing",
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a task.
///
/// ```text
/// pending → in_progress → completed
///                       → blocked → in_progress (unblocked)
/// pending → completed
///         → blocked
///         → skipped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
    Skipped,
}

impl TaskStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[
                Self::InProgress,
                Self::Completed,
                Self::Blocked,
                Self::Skipped,
            ],
            Self::InProgress => &[Self::Completed, Self::Blocked],
            Self::Blocked => &[Self::InProgress],
            Self::Completed | Self::Skipped => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SuggestionKind
// ---------------------------------------------------------------------------

/// Which catalog of suggested tasks to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Listing,
    Deal,
}

impl SuggestionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Deal => "deal",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActorRole / SwipeTarget / SwipeDirection
// ---------------------------------------------------------------------------

/// Role of the profile performing a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Buyer,
    Seller,
    Agent,
    Vendor,
}

impl ActorRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::Agent => "agent",
            Self::Vendor => "vendor",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a swipe is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SwipeTarget {
    Listing,
    BuyerIntent,
}

impl SwipeTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::BuyerIntent => "buyer_intent",
        }
    }
}

impl fmt::Display for SwipeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Yes,
    No,
}

impl SwipeDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a listing post as tracked by verification maintenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    /// Verification lapsed; the listing must be re-verified.
    Stale,
}

impl ListingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Stale => "stale",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Serde tests ---

    #[test]
    fn property_type_serializes_kebab_case() {
        let json = serde_json::to_string(&PropertyType::SingleFamily).unwrap();
        assert_eq!(json, "\"single-family\"");
        let back: PropertyType = serde_json::from_str("\"multi-family\"").unwrap();
        assert_eq!(back, PropertyType::MultiFamily);
    }

    #[test]
    fn message_label_serializes_screaming() {
        let json = serde_json::to_string(&MessageLabel::Scheduling).unwrap();
        assert_eq!(json, "\"SCHEDULING\"");
    }

    #[test]
    fn swipe_target_serializes_snake_case() {
        let json = serde_json::to_string(&SwipeTarget::BuyerIntent).unwrap();
        assert_eq!(json, "\"buyer_intent\"");
    }

    #[test]
    fn listing_status_wire_names() {
        let json = serde_json::to_string(&ListingStatus::Stale).unwrap();
        assert_eq!(json, "\"stale\"");
        assert_eq!(ListingStatus::Active.to_string(), "active");
    }

    #[test]
    fn property_type_from_str_ignores_case() {
        assert_eq!("Condo".parse::<PropertyType>(), Ok(PropertyType::Condo));
        assert_eq!(
            " SINGLE-FAMILY ".parse::<PropertyType>(),
            Ok(PropertyType::SingleFamily)
        );
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn property_type_deserializes_any_case() {
        let back: PropertyType = serde_json::from_str("\"Condo\"").unwrap();
        assert_eq!(back, PropertyType::Condo);
        let back: PropertyType = serde_json::from_str("\"Single-Family\"").unwrap();
        assert_eq!(back, PropertyType::SingleFamily);
        assert!(serde_json::from_str::<PropertyType>("\"castle\"").is_err());
    }

    #[test]
    fn property_type_scan_order() {
        let order: Vec<&str> = PropertyType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            order,
            [
                "condo",
                "house",
                "apartment",
                "townhouse",
                "single-family",
                "multi-family"
            ]
        );
    }

    // --- State machine tests ---

    #[test]
    fn task_valid_transitions() {
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::InProgress));
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::Completed));
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::Skipped));
        assert!(TaskStatus::InProgress.can_transition_to(TaskStatus::Completed));
        assert!(TaskStatus::InProgress.can_transition_to(TaskStatus::Blocked));
        assert!(TaskStatus::Blocked.can_transition_to(TaskStatus::InProgress));
    }

    #[test]
    fn task_invalid_transitions() {
        assert!(!TaskStatus::Completed.can_transition_to(TaskStatus::Pending));
        assert!(!TaskStatus::Skipped.can_transition_to(TaskStatus::InProgress));
        assert!(!TaskStatus::Blocked.can_transition_to(TaskStatus::Completed));
        assert!(!TaskStatus::InProgress.can_transition_to(TaskStatus::Pending));
    }

    #[test]
    fn task_terminal_states() {
        assert!(TaskStatus::Completed.allowed_next_states().is_empty());
        assert!(TaskStatus::Skipped.allowed_next_states().is_empty());
    }

    // --- Display / as_str tests ---

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", PropertyType::Townhouse), "townhouse");
        assert_eq!(format!("{}", MessageLabel::Offer), "OFFER");
        assert_eq!(format!("{}", ContextType::Listing), "listing");
        assert_eq!(format!("{}", TaskStatus::InProgress), "in_progress");
        assert_eq!(format!("{}", SuggestionKind::Deal), "deal");
        assert_eq!(format!("{}", ActorRole::Vendor), "vendor");
        assert_eq!(format!("{}", SwipeTarget::BuyerIntent), "buyer_intent");
        assert_eq!(format!("{}", SwipeDirection::Yes), "yes");
    }
}
