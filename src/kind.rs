//! Component kinds and the "Add Component" catalog.
//!
//! A component's `type` travels as a free-form string on the wire. Strings that
//! name one of the [`ComponentKind`] variants are resolved to it; anything else
//! is kept verbatim and handled by the pending registry entry.

#[cfg(test)]
#[path = "kind_test.rs"]
mod kind_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of structural component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    #[serde(rename = "Beam")]
    Beam,
    #[serde(rename = "Column")]
    Column,
    #[serde(rename = "Steel Joist")]
    SteelJoist,
    #[serde(rename = "Composite Beam")]
    CompositeBeam,
    #[serde(rename = "Retaining Wall")]
    RetainingWall,
    #[serde(rename = "Spread Footing")]
    SpreadFooting,
    #[serde(rename = "Wall Footing")]
    WallFooting,
    #[serde(rename = "Drilled Pier")]
    DrilledPier,
    #[serde(rename = "Seismic Load")]
    SeismicLoad,
    #[serde(rename = "Wind Load")]
    WindLoad,
}

impl ComponentKind {
    /// Every kind, in catalog order.
    pub const ALL: [Self; 10] = [
        Self::Beam,
        Self::Column,
        Self::SteelJoist,
        Self::CompositeBeam,
        Self::RetainingWall,
        Self::SpreadFooting,
        Self::WallFooting,
        Self::DrilledPier,
        Self::SeismicLoad,
        Self::WindLoad,
    ];

    /// Display and registry key for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beam => "Beam",
            Self::Column => "Column",
            Self::SteelJoist => "Steel Joist",
            Self::CompositeBeam => "Composite Beam",
            Self::RetainingWall => "Retaining Wall",
            Self::SpreadFooting => "Spread Footing",
            Self::WallFooting => "Wall Footing",
            Self::DrilledPier => "Drilled Pier",
            Self::SeismicLoad => "Seismic Load",
            Self::WindLoad => "Wind Load",
        }
    }

    /// Catalog section the kind is listed under.
    #[must_use]
    pub const fn section(self) -> CatalogSection {
        match self {
            Self::Beam | Self::Column | Self::SteelJoist | Self::CompositeBeam => CatalogSection::BuildingStructure,
            Self::RetainingWall | Self::SpreadFooting | Self::WallFooting | Self::DrilledPier => {
                CatalogSection::Foundation
            }
            Self::SeismicLoad | Self::WindLoad => CatalogSection::Load,
        }
    }

    /// Resolve a free-form type string. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(type_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == type_name)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type string names no known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component type: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Groupings shown in the "Add Component" dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSection {
    BuildingStructure,
    Foundation,
    Load,
}

impl CatalogSection {
    pub const ALL: [Self; 3] = [Self::BuildingStructure, Self::Foundation, Self::Load];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BuildingStructure => "Building Structure Elements",
            Self::Foundation => "Foundation Elements",
            Self::Load => "Load",
        }
    }

    /// Kinds in this section, in catalog order.
    #[must_use]
    pub fn kinds(self) -> Vec<ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(|k| k.section() == self)
            .collect()
    }
}

/// One catalog section with its tiles, as served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogGroup {
    pub section: CatalogSection,
    pub title: &'static str,
    pub kinds: Vec<ComponentKind>,
}

/// The full "Add Component" catalog.
#[must_use]
pub fn catalog() -> Vec<CatalogGroup> {
    CatalogSection::ALL
        .into_iter()
        .map(|section| CatalogGroup { section, title: section.title(), kinds: section.kinds() })
        .collect()
}
