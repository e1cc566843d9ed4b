//! Task generation: expand a stage's workflow templates into tasks for one
//! deal or listing.
//!
//! Generation is idempotent per context. A template whose title already
//! names a task in the context is skipped, so running the same stage twice
//! creates nothing the second time.
//!
//! Dependencies are declared by title and resolved to task ids:
//! 1. tasks created earlier in the same run
//! 2. tasks already persisted in the same context
//!
//! Titles that resolve to nothing are dropped. A failed insert is logged and
//! skipped; the rest of the batch still runs.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, Utc};
use tracing::{debug, warn};

use ez_core::entities::{Task, TaskContext, WorkflowTemplate};
use ez_core::responses::GenerationReport;

use crate::error::DatabaseError;
use crate::repos::task::NewTask;
use crate::service::EzService;

/// Per-run state. Lives only for one `generate_tasks` call.
struct Run<'a> {
    context: &'a TaskContext,
    existing_titles: HashSet<String>,
    created_by_title: HashMap<String, String>,
    created: Vec<Task>,
}

impl EzService {
    /// Generate tasks for `context` from the templates of `stage`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` when loading templates, existing titles, or
    /// dependency lookups fail. Individual insert failures do not abort.
    pub async fn generate_tasks(
        &self,
        context: &TaskContext,
        stage: &str,
    ) -> Result<GenerationReport, DatabaseError> {
        let templates = self.list_templates_for_stage(stage).await?;
        if templates.is_empty() {
            debug!(stage, "no templates for stage");
            return Ok(GenerationReport::no_templates());
        }

        let mut run = Run {
            context,
            existing_titles: self.list_task_titles_for_context(context).await?,
            created_by_title: HashMap::new(),
            created: Vec::new(),
        };

        for template in &templates {
            self.expand_template(&mut run, template).await?;
        }

        debug!(
            stage,
            context = context.id(),
            created = run.created.len(),
            "generated tasks"
        );
        Ok(GenerationReport::generated(run.created))
    }

    async fn expand_template(
        &self,
        run: &mut Run<'_>,
        template: &WorkflowTemplate,
    ) -> Result<(), DatabaseError> {
        let tpl = &template.template;
        if run.existing_titles.contains(&tpl.title) {
            debug!(title = %tpl.title, "task already exists in context");
            return Ok(());
        }

        let dependencies = self.resolve_dependencies(run, &tpl.dependency_titles).await?;
        let due_at = tpl
            .due_in_days
            .filter(|&days| days > 0)
            .map(|days| Utc::now() + Duration::days(i64::from(days)));

        let new = NewTask {
            context: run.context.clone(),
            assigned_role: tpl.assigned_role.clone(),
            title: tpl.title.clone(),
            description: tpl.description.clone(),
            due_at,
            dependencies,
            ai_generated: true,
        };

        match self.create_task(&new).await {
            Ok(task) => {
                run.existing_titles.insert(task.title.clone());
                run.created_by_title.insert(task.title.clone(), task.id.clone());
                run.created.push(task);
            }
            Err(e) => {
                warn!(template = %template.id, title = %tpl.title, error = %e, "task insert failed, skipping");
            }
        }
        Ok(())
    }

    async fn resolve_dependencies(
        &self,
        run: &Run<'_>,
        titles: &[String],
    ) -> Result<Vec<String>, DatabaseError> {
        let unresolved: Vec<String> = titles
            .iter()
            .filter(|t| !run.created_by_title.contains_key(*t))
            .cloned()
            .collect();
        let persisted = self
            .find_task_ids_by_titles(run.context, &unresolved)
            .await?;

        Ok(titles
            .iter()
            .filter_map(|title| {
                let id = run
                    .created_by_title
                    .get(title)
                    .or_else(|| persisted.get(title));
                if id.is_none() {
                    debug!(%title, "dependency not found, dropping");
                }
                id.cloned()
            })
            .collect())
    }
}
