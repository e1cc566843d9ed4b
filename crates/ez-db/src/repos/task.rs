//! Task repository: create, lookups within a context, status transitions,
//! and the overdue scan.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};

use ez_core::entities::{Task, TaskContext};
use ez_core::enums::TaskStatus;
use ez_core::ids::PREFIX_TASK;
use ez_core::responses::{OverdueReport, RoleTaskCount};

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_string, parse_datetime, parse_enum, parse_optional_datetime, parse_string_list,
    string_list_json,
};
use crate::service::EzService;

const SELECT_COLS: &str = "id, context_type, deal_id, listing_post_id, assigned_role, title, \
                           description, due_at, dependencies, status, ai_generated, \
                           created_at, updated_at";

/// Rows of one context. `?1` is the context id, `?2` its `context_type`.
const CONTEXT_FILTER: &str = "((?2 = 'deal' AND deal_id = ?1) OR (?2 = 'listing' AND listing_post_id = ?1))";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        context_type: parse_enum(&row.get::<String>(1)?)?,
        deal_id: get_opt_string(row, 2)?,
        listing_post_id: get_opt_string(row, 3)?,
        assigned_role: row.get(4)?,
        title: row.get(5)?,
        description: get_opt_string(row, 6)?,
        due_at: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
        dependencies: parse_string_list(get_opt_string(row, 8)?.as_deref())?,
        status: parse_enum(&row.get::<String>(9)?)?,
        ai_generated: row.get::<i64>(10)? != 0,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

/// Fields supplied by the caller when creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub context: TaskContext,
    pub assigned_role: String,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub dependencies: Vec<String>,
    pub ai_generated: bool,
}

impl EzService {
    /// Insert a task in `pending` status.
    pub async fn create_task(&self, new: &NewTask) -> Result<Task, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TASK).await?;
        let status = TaskStatus::Pending;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO tasks ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
                ),
                libsql::params![
                    id.as_str(),
                    new.context.context_type().as_str(),
                    new.context.deal_id(),
                    new.context.listing_post_id(),
                    new.assigned_role.as_str(),
                    new.title.as_str(),
                    new.description.as_deref(),
                    new.due_at.map(|d| d.to_rfc3339()),
                    string_list_json(&new.dependencies)?,
                    status.as_str(),
                    i64::from(new.ai_generated),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Task {
            id,
            context_type: new.context.context_type(),
            deal_id: new.context.deal_id().map(String::from),
            listing_post_id: new.context.listing_post_id().map(String::from),
            assigned_role: new.assigned_role.clone(),
            title: new.title.clone(),
            description: new.description.clone(),
            due_at: new.due_at,
            dependencies: new.dependencies.clone(),
            status,
            ai_generated: new.ai_generated,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_task(&self, id: &str) -> Result<Task, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_task(&row)
    }

    /// Every task of a context, oldest first.
    pub async fn list_tasks_for_context(
        &self,
        context: &TaskContext,
    ) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tasks WHERE {CONTEXT_FILTER}
                     ORDER BY created_at ASC, rowid ASC"
                ),
                [context.id(), context.context_type().as_str()],
            )
            .await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }

    /// Titles already present in a context.
    pub async fn list_task_titles_for_context(
        &self,
        context: &TaskContext,
    ) -> Result<HashSet<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT title FROM tasks WHERE {CONTEXT_FILTER}"),
                [context.id(), context.context_type().as_str()],
            )
            .await?;

        let mut titles = HashSet::new();
        while let Some(row) = rows.next().await? {
            titles.insert(row.get::<String>(0)?);
        }
        Ok(titles)
    }

    /// Map each of `titles` present in the context to a task id.
    ///
    /// When a title occurs more than once the earliest task wins.
    pub async fn find_task_ids_by_titles(
        &self,
        context: &TaskContext,
        titles: &[String],
    ) -> Result<HashMap<String, String>, DatabaseError> {
        if titles.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders: Vec<String> = (3..3 + titles.len()).map(|i| format!("?{i}")).collect();
        let mut params: Vec<libsql::Value> = vec![
            context.id().into(),
            context.context_type().as_str().into(),
        ];
        params.extend(titles.iter().map(|t| libsql::Value::from(t.clone())));

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT title, id FROM tasks WHERE {CONTEXT_FILTER} AND title IN ({})
                     ORDER BY created_at ASC, rowid ASC",
                    placeholders.join(", ")
                ),
                libsql::params_from_iter(params),
            )
            .await?;

        let mut found = HashMap::new();
        while let Some(row) = rows.next().await? {
            found
                .entry(row.get::<String>(0)?)
                .or_insert(row.get::<String>(1)?);
        }
        Ok(found)
    }

    /// Move a task to `new_status`, enforcing the status state machine.
    pub async fn transition_task(
        &self,
        task_id: &str,
        new_status: TaskStatus,
    ) -> Result<Task, DatabaseError> {
        let current = self.get_task(task_id).await?;

        if !current.status.can_transition_to(new_status) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition task {} from {} to {}",
                task_id, current.status, new_status
            )));
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![new_status.as_str(), now.to_rfc3339(), task_id],
            )
            .await?;

        Ok(Task {
            status: new_status,
            updated_at: now,
            ..current
        })
    }

    /// Pending tasks whose due date is before `now`, soonest-due first.
    pub async fn overdue_tasks(&self, now: DateTime<Utc>) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tasks
                     WHERE status = ?1 AND due_at IS NOT NULL
                       AND julianday(due_at) < julianday(?2)
                     ORDER BY due_at ASC, rowid ASC"
                ),
                libsql::params![TaskStatus::Pending.as_str(), now.to_rfc3339()],
            )
            .await?;

        // julianday() bounds the scan; the parsed comparison and sort are exact
        // across mixed datetime formats.
        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            let task = row_to_task(&row)?;
            if task.due_at.is_some_and(|due| due < now) {
                tasks.push(task);
            }
        }
        tasks.sort_by_key(|t| t.due_at);
        Ok(tasks)
    }

    /// Overdue tasks tallied per assigned role (roles in alphabetical order).
    pub async fn overdue_report(&self, now: DateTime<Utc>) -> Result<OverdueReport, DatabaseError> {
        let tasks = self.overdue_tasks(now).await?;
        if tasks.is_empty() {
            return Ok(OverdueReport {
                message: "No overdue tasks found".to_string(),
                task_count: 0,
                roles: Vec::new(),
            });
        }

        let mut per_role: BTreeMap<&str, usize> = BTreeMap::new();
        for task in &tasks {
            *per_role.entry(task.assigned_role.as_str()).or_default() += 1;
        }

        Ok(OverdueReport {
            message: format!("Found {} overdue tasks", tasks.len()),
            task_count: tasks.len(),
            roles: per_role
                .into_iter()
                .map(|(role, task_count)| RoleTaskCount {
                    role: role.to_string(),
                    task_count,
                })
                .collect(),
        })
    }
}
