//! Wire shape and JsonSchema validation tests for the entity types.

use std::collections::BTreeSet;

use chrono::Utc;
use pretty_assertions::assert_eq;
use schemars::schema_for;
use serde_json::json;
use ez_core::entities::*;
use ez_core::enums::*;
use ez_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! assert_schema_valid {
    ($ty:ty, $instance:expr) => {{
        let schema = serde_json::to_value(schema_for!($ty)).unwrap();
        let instance = serde_json::to_value(&$instance).unwrap();
        let errors = validate_against_schema(&schema, &instance);
        assert!(
            errors.is_empty(),
            "Schema validation failed for {}: {:?}",
            stringify!($ty),
            errors
        );
    }};
}

fn sample_task() -> Task {
    let now = Utc::now();
    Task {
        id: "tsk-a3f8b2c1".into(),
        context_type: ContextType::Deal,
        deal_id: Some("deal-42".into()),
        listing_post_id: None,
        assigned_role: "buyer".into(),
        title: "Schedule home inspection".into(),
        description: Some("Book a licensed inspector".into()),
        due_at: Some(now),
        dependencies: vec!["tsk-00000001".into()],
        status: TaskStatus::Pending,
        ai_generated: true,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn buyer_need_omits_absent_fields() {
    let need = BuyerNeed {
        city: Some("Austin".into()),
        beds: Some(3),
        ..Default::default()
    };
    let json = serde_json::to_value(&need).unwrap();
    assert_eq!(json, json!({"city": "Austin", "beds": 3}));
    assert_schema_valid!(BuyerNeed, need);
}

#[test]
fn buyer_need_features_serialize_sorted() {
    let need = BuyerNeed {
        property_type: Some(PropertyType::SingleFamily),
        features: BTreeSet::from(["garage".to_string(), "backyard".to_string()]),
        ..Default::default()
    };
    let json = serde_json::to_value(&need).unwrap();
    assert_eq!(
        json,
        json!({"property_type": "single-family", "features": ["backyard", "garage"]})
    );
}

#[test]
fn listing_ignores_display_fields() {
    let listing: Listing = serde_json::from_value(json!({
        "title": "Sunny loft",
        "photos": ["a.jpg"],
        "city": "Denver",
        "list_price": 425000.0,
        "beds": 2
    }))
    .unwrap();
    assert_eq!(listing.city.as_deref(), Some("Denver"));
    assert_eq!(listing.property_type, None);
}

#[test]
fn workflow_template_flattens_template_fields() {
    let tpl = WorkflowTemplate {
        id: "wft-0000beef".into(),
        template_key: Some("deal.under_contract.inspection".into()),
        template: TaskTemplate {
            stage: "under_contract".into(),
            assigned_role: "buyer".into(),
            title: "Schedule home inspection".into(),
            description: None,
            due_in_days: Some(7),
            dependency_titles: vec!["Deliver earnest money deposit".into()],
        },
        created_at: Utc::now(),
    };
    let json = serde_json::to_value(&tpl).unwrap();
    assert_eq!(json["stage"], "under_contract");
    assert_eq!(json["dependency_titles"][0], "Deliver earnest money deposit");
    assert!(json.get("template").is_none());

    let back: WorkflowTemplate = serde_json::from_value(json).unwrap();
    assert_eq!(back, tpl);
}

#[test]
fn task_matches_schema() {
    assert_schema_valid!(Task, sample_task());
}

#[test]
fn generation_report_matches_schema() {
    let report = GenerationReport::generated(vec![sample_task()]);
    assert_eq!(report.count, 1);
    assert_eq!(report.message, "Generated 1 tasks from templates");
    assert_schema_valid!(GenerationReport, report);
}

#[test]
fn swipe_decision_is_tagged() {
    let denied = SwipeDecision::Denied {
        reason: "Buyers need verification level 3 to like listings".into(),
        required_verification: 3,
    };
    let json = serde_json::to_value(&denied).unwrap();
    assert_eq!(json["decision"], "denied");
    assert_eq!(json["required_verification"], 3);
    assert_schema_valid!(SwipeDecision, denied);
}

#[test]
fn triage_response_shape() {
    let resp = TriageResponse {
        label: MessageLabel::Question,
    };
    assert_eq!(serde_json::to_value(&resp).unwrap(), json!({"label": "QUESTION"}));
}
