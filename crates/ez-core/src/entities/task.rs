use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ContextType, TaskStatus};

/// A concrete work item in a deal or listing context.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub context_type: ContextType,
    pub deal_id: Option<String>,
    pub listing_post_id: Option<String>,
    pub assigned_role: String,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    /// IDs of tasks (same context) that must complete first.
    pub dependencies: Vec<String>,
    pub status: TaskStatus,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The scope tasks are generated against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskContext {
    Deal(String),
    Listing(String),
}

impl TaskContext {
    /// Build a context from the optional request ids. `deal_id` wins when both
    /// are given; empty strings count as absent.
    #[must_use]
    pub fn from_ids(deal_id: Option<&str>, listing_post_id: Option<&str>) -> Option<Self> {
        match (
            deal_id.filter(|id| !id.is_empty()),
            listing_post_id.filter(|id| !id.is_empty()),
        ) {
            (Some(deal), _) => Some(Self::Deal(deal.to_string())),
            (None, Some(listing)) => Some(Self::Listing(listing.to_string())),
            (None, None) => None,
        }
    }

    #[must_use]
    pub const fn context_type(&self) -> ContextType {
        match self {
            Self::Deal(_) => ContextType::Deal,
            Self::Listing(_) => ContextType::Listing,
        }
    }

    /// The deal or listing id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Deal(id) | Self::Listing(id) => id,
        }
    }

    #[must_use]
    pub fn deal_id(&self) -> Option<&str> {
        match self {
            Self::Deal(id) => Some(id),
            Self::Listing(_) => None,
        }
    }

    #[must_use]
    pub fn listing_post_id(&self) -> Option<&str> {
        match self {
            Self::Listing(id) => Some(id),
            Self::Deal(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_id_wins_over_listing() {
        let ctx = TaskContext::from_ids(Some("deal-1"), Some("lst-1")).unwrap();
        assert_eq!(ctx, TaskContext::Deal("deal-1".into()));
        assert_eq!(ctx.context_type(), ContextType::Deal);
        assert_eq!(ctx.listing_post_id(), None);
    }

    #[test]
    fn empty_ids_are_absent() {
        assert_eq!(TaskContext::from_ids(Some(""), None), None);
        assert_eq!(
            TaskContext::from_ids(Some(""), Some("lst-9")),
            Some(TaskContext::Listing("lst-9".into()))
        );
    }
}
