//! Projects and their components.
//!
//! DESIGN
//! ======
//! A [`Project`] owns an ordered list of [`ProjectComponent`]s. Every mutation
//! stamps `dateModified`. Operations that the UI treats as silent no-ops
//! (deleting the last component, a blank rename) report `false` instead of
//! failing. Unknown ids are errors, since a caller asked for something that
//! does not exist.
//!
//! COMPONENT COUNT
//! ===============
//! `componentsCount` is stored alongside the list and is not derived from it:
//! seeded demo projects carry counts larger than their component list. Adds and
//! duplicates increment it; deletes reset it to the list length.
//! [`Project::count_drift`] reports a mismatch and [`Project::reconcile_count`]
//! repairs it.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::kind::ComponentKind;
use crate::settings::ProjectSettings;

/// Filter value that passes every component through.
pub const FILTER_ALL: &str = "ALL";

// =============================================================================
// IDS & DATES
// =============================================================================

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Time-derived id: current epoch milliseconds, bumped past the previous id so
/// two calls in the same millisecond never collide.
#[must_use]
pub fn next_id() -> u64 {
    let now = u64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(seen) => last = seen,
        }
    }
}

/// `MM/DD/YYYY`, the format shown in the project table.
#[must_use]
pub fn date_stamp(at: OffsetDateTime) -> String {
    format!("{:02}/{:02}/{}", u8::from(at.month()), at.day(), at.year())
}

fn today() -> String {
    date_stamp(OffsetDateTime::now_utc())
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectComponent {
    pub id: String,
    /// Registry key. Free-form: unknown values resolve to the pending entry.
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    /// Advisory only.
    pub quantity: u32,
}

impl ProjectComponent {
    /// The kind named by `type`, if it names one.
    #[must_use]
    pub fn kind(&self) -> Option<ComponentKind> {
        ComponentKind::parse(&self.type_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub components_count: usize,
    pub components: Vec<ProjectComponent>,
    #[serde(default)]
    pub settings: ProjectSettings,
    pub date_modified: String,
    pub is_recent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectError {
    #[error("project {0} not found")]
    UnknownProject(String),
    #[error("component {0} not found")]
    UnknownComponent(String),
}

/// Component list filter: `ALL` or an exact, case-sensitive type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Type(String),
}

impl TypeFilter {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == FILTER_ALL { Self::All } else { Self::Type(value.to_owned()) }
    }

    #[must_use]
    pub fn matches(&self, component: &ProjectComponent) -> bool {
        match self {
            Self::All => true,
            Self::Type(t) => component.type_name == *t,
        }
    }
}

/// Source of the filter dropdown entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOptions {
    /// `ALL` plus the types present in the project, first-seen order.
    #[default]
    Present,
    /// `ALL` plus every catalog kind.
    Catalog,
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl Project {
    /// New project holding one component of `initial_type`.
    #[must_use]
    pub fn new(name: impl Into<String>, initial_type: &str) -> Self {
        let mut project = Self {
            id: next_id().to_string(),
            name: name.into(),
            components_count: 0,
            components: Vec::new(),
            settings: ProjectSettings::default(),
            date_modified: today(),
            is_recent: true,
        };
        project.add_component(initial_type);
        project
    }

    fn touch(&mut self) {
        self.date_modified = today();
    }

    #[must_use]
    pub fn component(&self, id: &str) -> Option<&ProjectComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, ProjectError> {
        self.components
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ProjectError::UnknownComponent(id.to_owned()))
    }

    /// Append a component named `"{type} {n}"`, where `n` counts same-type
    /// components including the new one. Returns the new component's id.
    pub fn add_component(&mut self, type_name: &str) -> String {
        let same = self.components.iter().filter(|c| c.type_name == type_name).count();
        let component = ProjectComponent {
            id: format!("c_{}", next_id()),
            type_name: type_name.to_owned(),
            name: format!("{type_name} {}", same + 1),
            quantity: 1,
        };
        let id = component.id.clone();
        self.components.push(component);
        self.components_count += 1;
        self.touch();
        id
    }

    /// Rename the project. Blank or unchanged names are ignored.
    pub fn rename(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || name == self.name {
            return false;
        }
        name.clone_into(&mut self.name);
        self.touch();
        true
    }

    /// Rename a component. Blank or unchanged names are ignored.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownComponent`] when `id` is not in the project.
    pub fn rename_component(&mut self, id: &str, name: &str) -> Result<bool, ProjectError> {
        let idx = self.position(id)?;
        let name = name.trim();
        if name.is_empty() || name == self.components[idx].name {
            return Ok(false);
        }
        name.clone_into(&mut self.components[idx].name);
        self.touch();
        Ok(true)
    }

    /// Append a copy of a component with a fresh id and `" (Copy)"` suffix.
    /// Returns the copy's id.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownComponent`] when `id` is not in the project.
    pub fn duplicate_component(&mut self, id: &str) -> Result<String, ProjectError> {
        let idx = self.position(id)?;
        let source = &self.components[idx];
        let copy = ProjectComponent {
            id: format!("c_{}", next_id()),
            type_name: source.type_name.clone(),
            name: format!("{} (Copy)", source.name),
            quantity: source.quantity,
        };
        let copy_id = copy.id.clone();
        self.components.push(copy);
        self.components_count += 1;
        self.touch();
        Ok(copy_id)
    }

    /// Remove a component. The last remaining component is never removed.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownComponent`] when `id` is not in the project.
    pub fn delete_component(&mut self, id: &str) -> Result<bool, ProjectError> {
        let idx = self.position(id)?;
        if self.components.len() <= 1 {
            return Ok(false);
        }
        self.components.remove(idx);
        self.components_count = self.components.len();
        self.touch();
        Ok(true)
    }

    /// Components passing `filter`, in list order.
    #[must_use]
    pub fn filter(&self, filter: &TypeFilter) -> Vec<&ProjectComponent> {
        self.components.iter().filter(|c| filter.matches(c)).collect()
    }

    /// Entries for the type filter dropdown, `ALL` first.
    #[must_use]
    pub fn filter_options(&self, source: FilterOptions) -> Vec<String> {
        let mut options = vec![FILTER_ALL.to_owned()];
        match source {
            FilterOptions::Present => {
                for c in &self.components {
                    if !options.contains(&c.type_name) {
                        options.push(c.type_name.clone());
                    }
                }
            }
            FilterOptions::Catalog => {
                options.extend(ComponentKind::ALL.iter().map(|k| k.as_str().to_owned()));
            }
        }
        options
    }

    /// Replace the settings profile wholesale.
    pub fn save_settings(&mut self, settings: ProjectSettings) {
        self.settings = settings;
        self.touch();
    }

    /// `(stored, actual)` when `componentsCount` disagrees with the list.
    #[must_use]
    pub fn count_drift(&self) -> Option<(usize, usize)> {
        (self.components_count != self.components.len()).then_some((self.components_count, self.components.len()))
    }

    /// Reset `componentsCount` to the list length. Returns whether it changed.
    pub fn reconcile_count(&mut self) -> bool {
        let changed = self.count_drift().is_some();
        self.components_count = self.components.len();
        changed
    }
}
