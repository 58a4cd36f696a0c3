//! Top-level application state: projects, users, and the activity log.
//!
//! DESIGN
//! ======
//! `Workspace` is the single owner of everything that outlives a request. It
//! is built from a [`Store`] snapshot and exported back to one after every
//! mutation; it never performs I/O on its own. Project mutations go through
//! [`Workspace::update_project`], which hands the closure a `&mut Project` and
//! reports unknown ids as [`ProjectError::UnknownProject`].
//!
//! ACTIVITY
//! ========
//! Creating, opening, and deleting projects each append one activity attributed
//! to the [`Caller`]. Activity text matches what the project table shows:
//! `Project "{name}" created with component {type}`, `Opened project: {name}`,
//! `Deleted project: {name}`.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use serde_json::Value;
use tracing::{info, warn};

use crate::activity::{ActivityLog, ActivityPage, Origin, Page, UserActivity, action};
use crate::project::{Project, ProjectComponent, ProjectError};
use crate::settings::{ProjectSettings, UnitSystem};
use crate::store::{Snapshot, Store, StoreError};
use crate::user::{Account, User};

/// Who is acting, for activity attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<String>,
    pub origin: Origin,
}

impl Caller {
    #[must_use]
    pub fn new(user_id: Option<String>, origin: Origin) -> Self {
        Self { user_id, origin }
    }

    #[must_use]
    pub fn anonymous(origin: Origin) -> Self {
        Self { user_id: None, origin }
    }
}

/// Project table tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListView {
    /// Only projects flagged recent.
    #[default]
    Recents,
    All,
    /// Every project; the workspace has no per-user ownership.
    MyProjects,
}

impl ListView {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "recents" => Some(Self::Recents),
            "all" => Some(Self::All),
            "my_projects" => Some(Self::MyProjects),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recents => "recents",
            Self::All => "all",
            Self::MyProjects => "my_projects",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    current_user: Option<User>,
    projects: Vec<Project>,
    activities: ActivityLog,
    users: Vec<Account>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::seeded()
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

impl Workspace {
    /// Fresh workspace holding the demo projects.
    #[must_use]
    pub fn seeded() -> Self {
        Self { current_user: None, projects: demo_projects(), activities: ActivityLog::default(), users: Vec::new() }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current_user: snapshot.current_user,
            projects: snapshot.projects,
            activities: snapshot.activities,
            users: snapshot.users,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_user: self.current_user.clone(),
            projects: self.projects.clone(),
            activities: self.activities.clone(),
            users: self.users.clone(),
        }
    }

    /// Load from `store`. A missing or unreadable snapshot falls back to the
    /// demo projects; the failure is logged, never returned.
    #[must_use]
    pub fn load(store: &dyn Store) -> Self {
        let workspace = match store.load() {
            Ok(Some(snapshot)) => Self::from_snapshot(snapshot),
            Ok(None) => {
                info!("no saved workspace; seeding demo projects");
                Self::seeded()
            }
            Err(e) => {
                warn!(error = %e, "workspace load failed; seeding demo projects");
                Self::seeded()
            }
        };
        for project in &workspace.projects {
            if let Some((stored, actual)) = project.count_drift() {
                warn!(project_id = %project.id, stored, actual, "componentsCount disagrees with component list");
            }
        }
        workspace
    }

    /// # Errors
    ///
    /// Propagates the store's write failure.
    pub fn save(&self, store: &dyn Store) -> Result<(), StoreError> {
        store.save(&self.snapshot())
    }
}

// =============================================================================
// PROJECTS
// =============================================================================

impl Workspace {
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, ProjectError> {
        self.projects.iter().position(|p| p.id == id).ok_or_else(|| ProjectError::UnknownProject(id.to_owned()))
    }

    /// Projects shown under `view` whose name contains `search`, ignoring case.
    #[must_use]
    pub fn list(&self, view: ListView, search: &str) -> Vec<&Project> {
        let needle = search.to_lowercase();
        self.projects
            .iter()
            .filter(|p| match view {
                ListView::Recents => p.is_recent,
                ListView::All | ListView::MyProjects => true,
            })
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Create a project with one component of `initial_type` and put it first.
    /// A blank name becomes `"Project {n+1}"`.
    pub fn create_project(&mut self, name: &str, initial_type: &str, caller: &Caller) -> &Project {
        let name = match name.trim() {
            "" => format!("Project {}", self.projects.len() + 1),
            trimmed => trimmed.to_owned(),
        };
        let project = Project::new(name, initial_type);
        info!(project_id = %project.id, name = %project.name, initial_type, "project created");
        let detail = format!("Project \"{}\" created with component {initial_type}", project.name);
        self.record(caller, action::CREATE_PROJECT, Some(Value::String(detail)));
        self.projects.insert(0, project);
        &self.projects[0]
    }

    /// Look up a project for display and record the view.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownProject`] when `id` does not exist.
    pub fn open_project(&mut self, id: &str, caller: &Caller) -> Result<&Project, ProjectError> {
        let idx = self.position(id)?;
        let detail = format!("Opened project: {}", self.projects[idx].name);
        self.record(caller, action::VIEW_PROJECT, Some(Value::String(detail)));
        Ok(&self.projects[idx])
    }

    /// # Errors
    ///
    /// [`ProjectError::UnknownProject`] when `id` does not exist.
    pub fn delete_project(&mut self, id: &str, caller: &Caller) -> Result<Project, ProjectError> {
        let idx = self.position(id)?;
        let project = self.projects.remove(idx);
        info!(project_id = %project.id, name = %project.name, "project deleted");
        let detail = format!("Deleted project: {}", project.name);
        self.record(caller, action::DELETE_PROJECT, Some(Value::String(detail)));
        Ok(project)
    }

    /// Run `f` against one project in place.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownProject`] when `id` does not exist, or whatever
    /// `f` returns.
    pub fn update_project<R>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut Project) -> Result<R, ProjectError>,
    ) -> Result<R, ProjectError> {
        let idx = self.position(id)?;
        f(&mut self.projects[idx])
    }

    /// Replace a project wholesale, matched by id.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownProject`] when no project has the same id.
    pub fn replace_project(&mut self, project: Project) -> Result<(), ProjectError> {
        let idx = self.position(&project.id)?;
        self.projects[idx] = project;
        Ok(())
    }
}

// =============================================================================
// USERS & ACTIVITY
// =============================================================================

impl Workspace {
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn set_current_user(&mut self, user: Option<User>) {
        self.current_user = user;
    }

    #[must_use]
    pub fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.users.iter().find(|a| a.user.email == email)
    }

    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().map(Account::profile).find(|u| u.id == id)
    }

    /// Store a new account. Returns `false` if the email is already taken.
    pub fn add_account(&mut self, account: Account) -> bool {
        if self.account_by_email(&account.user.email).is_some() {
            return false;
        }
        info!(user_id = %account.user.id, email = %account.user.email, "account registered");
        self.users.push(account);
        true
    }

    #[must_use]
    pub fn activities(&self) -> &ActivityLog {
        &self.activities
    }

    /// Append an activity attributed to `caller`.
    pub fn record(&mut self, caller: &Caller, action_type: &str, action_detail: Option<Value>) -> &UserActivity {
        let activity = UserActivity::new(caller.user_id.clone(), action_type, action_detail, &caller.origin);
        self.activities.record(activity)
    }

    #[must_use]
    pub fn my_activities(&self, user_id: &str, page: Page) -> ActivityPage {
        self.activities.for_user(user_id, page)
    }

    /// Clear the current user and record the sign-out.
    pub fn sign_out(&mut self, caller: &Caller) {
        self.record(caller, action::LOGOUT, Some(Value::String("User signed out".into())));
        self.current_user = None;
    }
}

// =============================================================================
// DEMO DATA
// =============================================================================

fn demo_component(id: &str, type_name: &str, name: &str, quantity: u32) -> ProjectComponent {
    ProjectComponent { id: id.into(), type_name: type_name.into(), name: name.into(), quantity }
}

/// The three projects a new workspace starts with. Counts deliberately exceed
/// the component lists.
#[must_use]
pub fn demo_projects() -> Vec<Project> {
    let metric = ProjectSettings { unit_system: UnitSystem::Metric, ..ProjectSettings::default() };
    vec![
        Project {
            id: "1".into(),
            name: "Project 1".into(),
            components_count: 2,
            components: vec![demo_component("c1", "Beam", "Beam 1", 1), demo_component("c2", "Column", "Column 1", 1)],
            settings: ProjectSettings::default(),
            date_modified: "12/31/2025".into(),
            is_recent: true,
        },
        Project {
            id: "2".into(),
            name: "Structural Analysis Tower A".into(),
            components_count: 45,
            components: vec![demo_component("c3", "Retaining Wall", "Tower Base", 45)],
            settings: ProjectSettings::default(),
            date_modified: "11/15/2025".into(),
            is_recent: false,
        },
        Project {
            id: "3".into(),
            name: "Bridge Section B".into(),
            components_count: 12,
            components: vec![demo_component("c4", "Beam", "Section B Beam", 12)],
            settings: metric,
            date_modified: "10/01/2025".into(),
            is_recent: true,
        },
    ]
}
