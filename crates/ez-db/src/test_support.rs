//! Shared test utilities for ez-db and its dependents.

pub mod helpers {
    use ez_core::entities::TaskTemplate;

    use crate::EzDb;
    use crate::service::EzService;

    /// Create an in-memory `EzService`.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory database cannot be opened.
    pub async fn test_service() -> EzService {
        let db = EzDb::open_local(":memory:")
            .await
            .expect("in-memory database opens");
        EzService::from_db(db)
    }

    /// Build a template with no description or dependencies.
    #[must_use]
    pub fn template(stage: &str, role: &str, title: &str, due_in_days: Option<u32>) -> TaskTemplate {
        TaskTemplate {
            stage: stage.to_string(),
            assigned_role: role.to_string(),
            title: title.to_string(),
            description: None,
            due_in_days,
            dependency_titles: Vec::new(),
        }
    }

    /// Build a template that depends on `deps` by title.
    #[must_use]
    pub fn template_with_deps(stage: &str, role: &str, title: &str, deps: &[&str]) -> TaskTemplate {
        TaskTemplate {
            dependency_titles: deps.iter().map(|d| (*d).to_string()).collect(),
            ..template(stage, role, title, None)
        }
    }
}
