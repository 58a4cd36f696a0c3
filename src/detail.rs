//! Project detail view state.
//!
//! Holds everything the detail screen tracks that is not part of the persisted
//! project: the active component, list filter, open dialogs, the settings
//! draft, the title rename session and the property bags being edited.
//!
//! Property bags are transient. Each component gets its own bag, seeded from
//! its type's defaults on first access; bags are never written back into
//! [`ProjectComponent`]. A duplicated component starts from defaults.

#[cfg(test)]
#[path = "detail_test.rs"]
mod detail_test;

use std::collections::HashMap;

use crate::bag::PropertyBag;
use crate::editor::{EditError, Form};
use crate::project::{Project, ProjectComponent, ProjectError, TypeFilter};
use crate::registry::Registry;
use crate::scene::Scene;
use crate::settings::SettingsDraft;

/// In-progress edit of the project title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSession {
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct DetailView {
    active_id: Option<String>,
    filter: TypeFilter,
    add_dialog_open: bool,
    settings: Option<SettingsDraft>,
    rename: Option<RenameSession>,
    bags: HashMap<String, PropertyBag>,
}

impl DetailView {
    /// Open `project` with its first component active.
    #[must_use]
    pub fn open(project: &Project) -> Self {
        Self { active_id: project.components.first().map(|c| c.id.clone()), ..Self::default() }
    }

    // =========================================================================
    // SELECTION & FILTER
    // =========================================================================

    /// Active component, falling back to the first one when the stored id is gone.
    #[must_use]
    pub fn active<'p>(&self, project: &'p Project) -> Option<&'p ProjectComponent> {
        self.active_id
            .as_deref()
            .and_then(|id| project.component(id))
            .or_else(|| project.components.first())
    }

    /// Make `id` active. Returns false for ids not in the project.
    pub fn select(&mut self, project: &Project, id: &str) -> bool {
        if project.component(id).is_none() {
            return false;
        }
        self.active_id = Some(id.to_owned());
        true
    }

    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.filter = filter;
    }

    #[must_use]
    pub fn filter(&self) -> &TypeFilter {
        &self.filter
    }

    /// Components listed in the sidebar under the current filter.
    #[must_use]
    pub fn visible<'p>(&self, project: &'p Project) -> Vec<&'p ProjectComponent> {
        project.filter(&self.filter)
    }

    // =========================================================================
    // COMPONENT OPERATIONS
    // =========================================================================

    pub fn open_add_dialog(&mut self) {
        self.add_dialog_open = true;
    }

    pub fn close_add_dialog(&mut self) {
        self.add_dialog_open = false;
    }

    #[must_use]
    pub fn is_add_dialog_open(&self) -> bool {
        self.add_dialog_open
    }

    /// Add a component, make it active and close the add dialog.
    pub fn add_component(&mut self, project: &mut Project, type_name: &str) -> String {
        let id = project.add_component(type_name);
        self.active_id = Some(id.clone());
        self.add_dialog_open = false;
        id
    }

    /// # Errors
    ///
    /// [`ProjectError::UnknownComponent`] for ids not in the project.
    pub fn duplicate_component(&mut self, project: &mut Project, id: &str) -> Result<String, ProjectError> {
        project.duplicate_component(id)
    }

    /// Delete a component; if it was active, the first remaining one becomes active.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownComponent`] for ids not in the project.
    pub fn delete_component(&mut self, project: &mut Project, id: &str) -> Result<bool, ProjectError> {
        if !project.delete_component(id)? {
            return Ok(false);
        }
        self.bags.remove(id);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = project.components.first().map(|c| c.id.clone());
        }
        Ok(true)
    }

    // =========================================================================
    // PROPERTIES & SCENE
    // =========================================================================

    /// Bag of the active component, or its type's defaults if not yet edited.
    #[must_use]
    pub fn bag(&self, project: &Project, registry: &Registry) -> PropertyBag {
        let Some(component) = self.active(project) else {
            return PropertyBag::new();
        };
        self.bags
            .get(&component.id)
            .cloned()
            .unwrap_or_else(|| registry.lookup(&component.type_name).defaults())
    }

    #[must_use]
    pub fn form(&self, project: &Project, registry: &Registry) -> Option<Form> {
        let component = self.active(project)?;
        Some(registry.lookup(&component.type_name).form(&self.bag(project, registry)))
    }

    #[must_use]
    pub fn scene(&self, project: &Project, registry: &Registry) -> Option<Scene> {
        let component = self.active(project)?;
        Some(registry.lookup(&component.type_name).render(&self.bag(project, registry)))
    }

    /// Apply one editor field change to the active component's bag.
    /// Returns false when there is no active component.
    ///
    /// # Errors
    ///
    /// Propagates the editor's rejection; the bag is left unchanged.
    pub fn edit_property(
        &mut self,
        project: &Project,
        registry: &Registry,
        field: &str,
        input: &str,
    ) -> Result<bool, EditError> {
        let Some(component) = self.active(project) else {
            return Ok(false);
        };
        let next = registry
            .lookup(&component.type_name)
            .edit(&self.bag(project, registry), field, input)?;
        self.bags.insert(component.id.clone(), next);
        Ok(true)
    }

    // =========================================================================
    // SETTINGS DIALOG
    // =========================================================================

    pub fn open_settings(&mut self, project: &Project) {
        self.settings = Some(SettingsDraft::open(&project.settings));
    }

    pub fn settings_draft(&mut self) -> Option<&mut SettingsDraft> {
        self.settings.as_mut()
    }

    /// Commit the draft into the project and close the dialog.
    pub fn save_settings(&mut self, project: &mut Project) -> bool {
        let Some(draft) = self.settings.take() else {
            return false;
        };
        project.save_settings(draft.commit());
        true
    }

    /// Close the dialog, discarding the draft.
    pub fn close_settings(&mut self) {
        self.settings = None;
    }

    // =========================================================================
    // TITLE RENAME
    // =========================================================================

    pub fn begin_rename(&mut self, project: &Project) {
        self.rename = Some(RenameSession { value: project.name.clone() });
    }

    pub fn rename_input(&mut self, value: &str) {
        if let Some(session) = self.rename.as_mut() {
            value.clone_into(&mut session.value);
        }
    }

    #[must_use]
    pub fn rename_session(&self) -> Option<&RenameSession> {
        self.rename.as_ref()
    }

    /// Enter or blur: end the session and apply the name. Returns whether the
    /// project changed.
    pub fn commit_rename(&mut self, project: &mut Project) -> bool {
        self.rename.take().is_some_and(|session| project.rename(&session.value))
    }

    /// Escape: end the session, keeping the current name.
    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }
}
