//! Type registry: resolves a component's `type` string to its definition.
//!
//! ARCHITECTURE
//! ============
//! A [`ComponentDefinition`] bundles the editor and visualizer for one type.
//! The registry is a table keyed by type name, built once through
//! [`RegistryBuilder`], which rejects duplicate or missing kinds. Lookup is
//! total: strings that name no kind resolve to the pending definition, which
//! renders a placeholder and offers no fields.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::bag::PropertyBag;
use crate::editor::{self, EditError, Form};
use crate::geometry::Geometry;
use crate::kind::ComponentKind;
use crate::scene::Scene;
use crate::visualize;

/// Registry key of the fallback entry.
pub const DEFAULT_KEY: &str = "Default";

/// Message shown by the pending entry's property panel.
pub const NO_PROPERTIES: &str = "No properties available for this type.";

/// Editor and visualizer capabilities of one component type.
pub trait ComponentDefinition: Send + Sync {
    /// Registry key.
    fn name(&self) -> &str;

    /// Bag the editor is seeded with.
    fn defaults(&self) -> PropertyBag;

    /// Editable form for `bag`.
    fn form(&self, bag: &PropertyBag) -> Form;

    /// Apply one field change, returning the full replacement bag.
    ///
    /// # Errors
    ///
    /// Returns [`EditError`] when the field or input is rejected.
    fn edit(&self, bag: &PropertyBag, field: &str, input: &str) -> Result<PropertyBag, EditError>;

    /// Schematic for `bag`. Never fails; missing fields use defaults.
    fn render(&self, bag: &PropertyBag) -> Scene;

    /// The kind this definition is registered for, if any.
    fn kind(&self) -> Option<ComponentKind>;
}

// =============================================================================
// DEFINITIONS
// =============================================================================

/// Definition backed by the field table and visualizer of a [`ComponentKind`].
#[derive(Debug, Clone, Copy)]
pub struct KindDefinition(pub ComponentKind);

impl ComponentDefinition for KindDefinition {
    fn name(&self) -> &str {
        self.0.as_str()
    }

    fn defaults(&self) -> PropertyBag {
        Geometry::defaults(self.0).to_bag()
    }

    fn form(&self, bag: &PropertyBag) -> Form {
        editor::form(self.0, bag)
    }

    fn edit(&self, bag: &PropertyBag, field: &str, input: &str) -> Result<PropertyBag, EditError> {
        editor::apply(self.0, bag, field, input)
    }

    fn render(&self, bag: &PropertyBag) -> Scene {
        visualize::render(&Geometry::from_bag(self.0, bag))
    }

    fn kind(&self) -> Option<ComponentKind> {
        Some(self.0)
    }
}

/// Fallback for type strings with no registered kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingDefinition;

impl ComponentDefinition for PendingDefinition {
    fn name(&self) -> &str {
        DEFAULT_KEY
    }

    fn defaults(&self) -> PropertyBag {
        PropertyBag::new()
    }

    fn form(&self, _bag: &PropertyBag) -> Form {
        Form { notice: Some(NO_PROPERTIES), ..Form::default() }
    }

    fn edit(&self, _bag: &PropertyBag, _field: &str, _input: &str) -> Result<PropertyBag, EditError> {
        Err(EditError::NotEditable(DEFAULT_KEY.to_owned()))
    }

    fn render(&self, _bag: &PropertyBag) -> Scene {
        visualize::pending()
    }

    fn kind(&self) -> Option<ComponentKind> {
        None
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("type {0:?} registered twice")]
    Duplicate(String),
    #[error("no definition registered for {0}")]
    Missing(ComponentKind),
    #[error("definition {name:?} registered under kind {kind}")]
    NameMismatch { name: String, kind: ComponentKind },
}

/// Immutable lookup table from type name to definition.
pub struct Registry {
    entries: BTreeMap<String, Box<dyn ComponentDefinition>>,
    fallback: Box<dyn ComponentDefinition>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("keys", &self.entries.keys().collect::<Vec<_>>()).finish()
    }
}

static STANDARD: LazyLock<Registry> = LazyLock::new(|| {
    let entries = ComponentKind::ALL
        .into_iter()
        .map(|kind| (kind.as_str().to_owned(), Box::new(KindDefinition(kind)) as Box<dyn ComponentDefinition>))
        .collect();
    Registry { entries, fallback: Box::new(PendingDefinition) }
});

impl Registry {
    /// The registry with every built-in kind.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Resolve `type_name`. Exact, case-sensitive; unknown names get the fallback.
    #[must_use]
    pub fn lookup(&self, type_name: &str) -> &dyn ComponentDefinition {
        match self.entries.get(type_name) {
            Some(def) => def.as_ref(),
            None => self.fallback.as_ref(),
        }
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Validating builder for custom registries.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<String, Box<dyn ComponentDefinition>>,
}

impl RegistryBuilder {
    /// Register a definition under its own name.
    ///
    /// # Errors
    ///
    /// Rejects a second definition for the same name, and a kind-backed
    /// definition whose name is not its kind's name.
    pub fn register(mut self, def: Box<dyn ComponentDefinition>) -> Result<Self, RegistryError> {
        if let Some(kind) = def.kind() {
            if def.name() != kind.as_str() {
                return Err(RegistryError::NameMismatch { name: def.name().to_owned(), kind });
            }
        }
        let name = def.name().to_owned();
        if self.entries.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.entries.insert(name, def);
        Ok(self)
    }

    /// Finish the table. Every [`ComponentKind`] must be present.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Missing`] for the first unregistered kind.
    pub fn build(self) -> Result<Registry, RegistryError> {
        if let Some(kind) = ComponentKind::ALL.into_iter().find(|k| !self.entries.contains_key(k.as_str())) {
            return Err(RegistryError::Missing(kind));
        }
        Ok(Registry { entries: self.entries, fallback: Box::new(PendingDefinition) })
    }
}
