//! Workflow template repository: create, list by stage, and seed from TOML.
//!
//! A seed file is a list of `[[templates]]` tables:
//!
//! ```toml
//! [[templates]]
//! key = "deal.under_contract.earnest_money"
//! stage = "under_contract"
//! assigned_role = "buyer"
//! title = "Deliver earnest money deposit"
//! due_in_days = 3
//!
//! [[templates]]
//! stage = "under_contract"
//! assigned_role = "buyer"
//! title = "Schedule home inspection"
//! due_in_days = 7
//! dependency_titles = ["Deliver earnest money deposit"]
//! ```

use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use ez_core::entities::{TaskTemplate, WorkflowTemplate};
use ez_core::ids::PREFIX_TEMPLATE;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_string_list, string_list_json};
use crate::service::EzService;

const SELECT_COLS: &str = "id, template_key, stage, assigned_role, title, description, \
                           due_in_days, dependency_titles, created_at";

fn row_to_template(row: &libsql::Row) -> Result<WorkflowTemplate, DatabaseError> {
    let due_in_days = row
        .get::<Option<i64>>(6)?
        .map(u32::try_from)
        .transpose()
        .map_err(|e| DatabaseError::Query(format!("due_in_days out of range: {e}")))?;

    Ok(WorkflowTemplate {
        id: row.get(0)?,
        template_key: get_opt_string(row, 1)?,
        template: TaskTemplate {
            stage: row.get(2)?,
            assigned_role: row.get(3)?,
            title: row.get(4)?,
            description: get_opt_string(row, 5)?,
            due_in_days,
            dependency_titles: parse_string_list(get_opt_string(row, 7)?.as_deref())?,
        },
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// One `[[templates]]` entry in a seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTemplate {
    /// Stable identifier; re-seeding skips keys already present.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(flatten)]
    pub template: TaskTemplate,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    templates: Vec<SeedTemplate>,
}

/// Parse a TOML seed document.
///
/// # Errors
///
/// Returns `DatabaseError::Seed` if the document is not valid seed TOML.
pub fn parse_seed(source: &str) -> Result<Vec<SeedTemplate>, DatabaseError> {
    toml::from_str::<SeedFile>(source)
        .map(|file| file.templates)
        .map_err(|e| DatabaseError::Seed(e.to_string()))
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    pub skipped: usize,
}

impl EzService {
    pub async fn create_template(
        &self,
        template: &TaskTemplate,
        template_key: Option<&str>,
    ) -> Result<WorkflowTemplate, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TEMPLATE).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO workflow_templates ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    template_key,
                    template.stage.as_str(),
                    template.assigned_role.as_str(),
                    template.title.as_str(),
                    template.description.as_deref(),
                    template.due_in_days.map(i64::from),
                    string_list_json(&template.dependency_titles)?,
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(WorkflowTemplate {
            id,
            template_key: template_key.map(String::from),
            template: template.clone(),
            created_at: now,
        })
    }

    pub async fn get_template(&self, id: &str) -> Result<WorkflowTemplate, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM workflow_templates WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_template(&row)
    }

    /// Templates for `stage` in creation order, insertion order breaking ties.
    pub async fn list_templates_for_stage(
        &self,
        stage: &str,
    ) -> Result<Vec<WorkflowTemplate>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM workflow_templates
                     WHERE stage = ?1 ORDER BY created_at ASC, rowid ASC"
                ),
                [stage],
            )
            .await?;

        let mut templates = Vec::new();
        while let Some(row) = rows.next().await? {
            templates.push(row_to_template(&row)?);
        }
        Ok(templates)
    }

    async fn template_key_exists(&self, key: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM workflow_templates WHERE template_key = ?1",
                [key],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    async fn template_title_exists(&self, stage: &str, title: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM workflow_templates WHERE stage = ?1 AND title = ?2",
                [stage, title],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Insert seed templates in file order.
    ///
    /// A template is skipped when its key, or (without a key) its stage and
    /// title, is already stored, so re-seeding the same file is a no-op.
    pub async fn seed_templates(
        &self,
        seeds: &[SeedTemplate],
    ) -> Result<SeedSummary, DatabaseError> {
        let mut summary = SeedSummary::default();
        for seed in seeds {
            let exists = match seed.key.as_deref() {
                Some(key) => self.template_key_exists(key).await?,
                None => {
                    self.template_title_exists(&seed.template.stage, &seed.template.title)
                        .await?
                }
            };
            if exists {
                debug!(title = %seed.template.title, "template already seeded");
                summary.skipped += 1;
                continue;
            }
            self.create_template(&seed.template, seed.key.as_deref())
                .await?;
            summary.inserted += 1;
        }
        info!(
            inserted = summary.inserted,
            skipped = summary.skipped,
            "seeded workflow templates"
        );
        Ok(summary)
    }

    /// Read a TOML seed file and insert its templates.
    pub async fn seed_templates_from_file(
        &self,
        path: &Path,
    ) -> Result<SeedSummary, DatabaseError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DatabaseError::Seed(format!("{}: {e}", path.display())))?;
        let seeds = parse_seed(&source)?;
        self.seed_templates(&seeds).await
    }
}
