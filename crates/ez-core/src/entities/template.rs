use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference record describing a task to instantiate at a transaction stage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskTemplate {
    pub stage: String,
    pub assigned_role: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_in_days: Option<u32>,
    /// Titles of tasks in the same context this one depends on.
    #[serde(default)]
    pub dependency_titles: Vec<String>,
}

/// A `TaskTemplate` persisted in the `workflow_templates` table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkflowTemplate {
    pub id: String,
    pub template_key: Option<String>,
    #[serde(flatten)]
    pub template: TaskTemplate,
    pub created_at: DateTime<Utc>,
}
