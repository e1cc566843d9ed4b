//! JSON bodies returned by the function endpoints.
//!
//! `parse-intent` and `score-lead` return `BuyerNeed` and `MatchResult`
//! directly; the remaining endpoints wrap their payloads in the structs below.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{MutualMatch, RankedMatch, Swipe, SwipeDecision, Task, TaskTemplate};
use crate::enums::MessageLabel;

/// Response from `triage-message`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TriageResponse {
    pub label: MessageLabel,
}

/// Response from `suggest-tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SuggestTasksResponse {
    pub tasks: Vec<TaskTemplate>,
}

/// Response from `ai-generate-tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerationReport {
    pub tasks: Vec<Task>,
    pub count: usize,
    pub message: String,
}

impl GenerationReport {
    /// Report for a stage with no templates at all.
    #[must_use]
    pub fn no_templates() -> Self {
        Self {
            tasks: Vec::new(),
            count: 0,
            message: "No templates found for this stage".to_string(),
        }
    }

    #[must_use]
    pub fn generated(tasks: Vec<Task>) -> Self {
        let count = tasks.len();
        Self {
            tasks,
            count,
            message: format!("Generated {count} tasks from templates"),
        }
    }
}

/// Response from `matchmake`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MatchmakeResponse {
    pub matches: Vec<RankedMatch>,
}

/// Response from `swipe-eligibility`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SwipeEligibilityResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_verification: Option<i64>,
}

impl From<SwipeDecision> for SwipeEligibilityResponse {
    fn from(decision: SwipeDecision) -> Self {
        match decision {
            SwipeDecision::Allowed => Self {
                allowed: true,
                reason: None,
                required_verification: None,
            },
            SwipeDecision::Denied {
                reason,
                required_verification,
            } => Self {
                allowed: false,
                reason: Some(reason),
                required_verification: Some(required_verification),
            },
        }
    }
}

/// Per-role tally in the overdue task report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoleTaskCount {
    pub role: String,
    pub task_count: usize,
}

/// Response from `maintenance-overdue-tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OverdueReport {
    pub message: String,
    pub task_count: usize,
    pub roles: Vec<RoleTaskCount>,
}

/// Response from `listing-summary`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ListingSummaryResponse {
    pub summary: Vec<String>,
    /// Always `"deterministic"`: summaries are rule-based.
    pub source: String,
}

impl ListingSummaryResponse {
    #[must_use]
    pub fn deterministic(summary: Vec<String>) -> Self {
        Self {
            summary,
            source: "deterministic".to_string(),
        }
    }
}

/// Response from `create-swipe`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SwipeOutcome {
    pub swipe: Swipe,
    pub match_created: bool,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub mutual_match: Option<MutualMatch>,
    /// Tasks generated for the new match's deal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
}

/// Response from `maintenance-unverify-stale`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StaleListingReport {
    pub message: String,
    pub count: usize,
    pub listing_ids: Vec<String>,
}

impl StaleListingReport {
    #[must_use]
    pub fn unverified(listing_ids: Vec<String>) -> Self {
        let count = listing_ids.len();
        let message = if count == 0 {
            "No stale listings found".to_string()
        } else {
            format!("Unverified {count} stale listings")
        };
        Self {
            message,
            count,
            listing_ids,
        }
    }
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_report_counts_tasks() {
        let report = GenerationReport::generated(Vec::new());
        assert_eq!(report.count, 0);
        assert_eq!(report.message, "Generated 0 tasks from templates");
    }

    #[test]
    fn stale_report_messages() {
        assert_eq!(
            StaleListingReport::unverified(Vec::new()).message,
            "No stale listings found"
        );
        let report = StaleListingReport::unverified(vec!["lst-1".into(), "lst-2".into()]);
        assert_eq!(report.message, "Unverified 2 stale listings");
        assert_eq!(report.count, 2);
    }

    #[test]
    fn denied_decision_maps_to_response() {
        let resp = SwipeEligibilityResponse::from(SwipeDecision::Denied {
            reason: "nope".into(),
            required_verification: 3,
        });
        assert!(!resp.allowed);
        assert_eq!(resp.required_verification, Some(3));

        let json = serde_json::to_value(SwipeEligibilityResponse::from(SwipeDecision::Allowed))
            .unwrap();
        assert_eq!(json, serde_json::json!({"allowed": true}));
    }
}
