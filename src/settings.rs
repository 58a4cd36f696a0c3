//! Project settings profile and its edit draft.
//!
//! Settings are replaced wholesale on save. Edits go through a
//! [`SettingsDraft`]: code and unit selections are validated against their
//! option lists, and switching the unit system rewrites every unit field in a
//! single step.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// CODES
// =============================================================================

/// Design code per material or load family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Codes {
    pub hot_rolled_steel: String,
    pub composite_steel_beam: String,
    pub cold_formed_steel: String,
    pub concrete_beam_column: String,
    pub concrete_foundations: String,
    pub concrete_drilled_pier: String,
    pub wood: String,
    pub masonry: String,
    pub aluminum: String,
    pub stainless_steel: String,
    pub steel_joist: String,
    pub seismic: String,
    pub wind: String,
}

impl Default for Codes {
    fn default() -> Self {
        let mut codes = Self {
            hot_rolled_steel: String::new(),
            composite_steel_beam: String::new(),
            cold_formed_steel: String::new(),
            concrete_beam_column: String::new(),
            concrete_foundations: String::new(),
            concrete_drilled_pier: String::new(),
            wood: String::new(),
            masonry: String::new(),
            aluminum: String::new(),
            stainless_steel: String::new(),
            steel_joist: String::new(),
            seismic: String::new(),
            wind: String::new(),
        };
        for field in CodeField::ALL {
            *codes.slot_mut(field) = field.options()[0].to_owned();
        }
        codes
    }
}

impl Codes {
    #[must_use]
    pub fn get(&self, field: CodeField) -> &str {
        match field {
            CodeField::HotRolledSteel => &self.hot_rolled_steel,
            CodeField::CompositeSteelBeam => &self.composite_steel_beam,
            CodeField::ColdFormedSteel => &self.cold_formed_steel,
            CodeField::ConcreteBeamColumn => &self.concrete_beam_column,
            CodeField::ConcreteFoundations => &self.concrete_foundations,
            CodeField::ConcreteDrilledPier => &self.concrete_drilled_pier,
            CodeField::Wood => &self.wood,
            CodeField::Masonry => &self.masonry,
            CodeField::Aluminum => &self.aluminum,
            CodeField::StainlessSteel => &self.stainless_steel,
            CodeField::SteelJoist => &self.steel_joist,
            CodeField::Seismic => &self.seismic,
            CodeField::Wind => &self.wind,
        }
    }

    fn slot_mut(&mut self, field: CodeField) -> &mut String {
        match field {
            CodeField::HotRolledSteel => &mut self.hot_rolled_steel,
            CodeField::CompositeSteelBeam => &mut self.composite_steel_beam,
            CodeField::ColdFormedSteel => &mut self.cold_formed_steel,
            CodeField::ConcreteBeamColumn => &mut self.concrete_beam_column,
            CodeField::ConcreteFoundations => &mut self.concrete_foundations,
            CodeField::ConcreteDrilledPier => &mut self.concrete_drilled_pier,
            CodeField::Wood => &mut self.wood,
            CodeField::Masonry => &mut self.masonry,
            CodeField::Aluminum => &mut self.aluminum,
            CodeField::StainlessSteel => &mut self.stainless_steel,
            CodeField::SteelJoist => &mut self.steel_joist,
            CodeField::Seismic => &mut self.seismic,
            CodeField::Wind => &mut self.wind,
        }
    }
}

/// Selector for one entry of [`Codes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeField {
    HotRolledSteel,
    CompositeSteelBeam,
    ColdFormedSteel,
    ConcreteBeamColumn,
    ConcreteFoundations,
    ConcreteDrilledPier,
    Wood,
    Masonry,
    Aluminum,
    StainlessSteel,
    SteelJoist,
    Seismic,
    Wind,
}

const ASCE: &[&str] = &["ASCE 7-16", "ASCE 7-10", "ASCE 7-22"];

impl CodeField {
    pub const ALL: [Self; 13] = [
        Self::HotRolledSteel,
        Self::CompositeSteelBeam,
        Self::ColdFormedSteel,
        Self::ConcreteBeamColumn,
        Self::ConcreteFoundations,
        Self::ConcreteDrilledPier,
        Self::Wood,
        Self::Masonry,
        Self::Aluminum,
        Self::StainlessSteel,
        Self::SteelJoist,
        Self::Seismic,
        Self::Wind,
    ];

    /// Wire key, as it appears in [`Codes`] JSON.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::HotRolledSteel => "hotRolledSteel",
            Self::CompositeSteelBeam => "compositeSteelBeam",
            Self::ColdFormedSteel => "coldFormedSteel",
            Self::ConcreteBeamColumn => "concreteBeamColumn",
            Self::ConcreteFoundations => "concreteFoundations",
            Self::ConcreteDrilledPier => "concreteDrilledPier",
            Self::Wood => "wood",
            Self::Masonry => "masonry",
            Self::Aluminum => "aluminum",
            Self::StainlessSteel => "stainlessSteel",
            Self::SteelJoist => "steelJoist",
            Self::Seismic => "seismic",
            Self::Wind => "wind",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HotRolledSteel => "Hot Rolled Steel",
            Self::CompositeSteelBeam => "Composite Steel Beam",
            Self::ColdFormedSteel => "Cold Formed Steel",
            Self::ConcreteBeamColumn => "Concrete Beam/Column",
            Self::ConcreteFoundations => "Concrete Foundations",
            Self::ConcreteDrilledPier => "Concrete Drilled Pier",
            Self::Wood => "Wood",
            Self::Masonry => "Masonry",
            Self::Aluminum => "Aluminum",
            Self::StainlessSteel => "Stainless Steel",
            Self::SteelJoist => "Steel Joist",
            Self::Seismic => "Seismic",
            Self::Wind => "Wind",
        }
    }

    /// Selectable editions. The first entry is the default.
    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::HotRolledSteel => &["AISC 15th (360-16): LRFD", "AISC 14th (360-10): LRFD", "AISC 15th (360-16): ASD"],
            Self::CompositeSteelBeam => &["AISC 15th (360-16): LRFD", "AISC 14th (360-10): LRFD"],
            Self::ColdFormedSteel => &["AISI S100-20: LRFD", "AISI S100-16: LRFD"],
            Self::ConcreteBeamColumn | Self::ConcreteDrilledPier => &["ACI 318-19", "ACI 318-14"],
            Self::ConcreteFoundations => &["ACI 318-19", "ACI 318-14", "ACI 318-11"],
            Self::Wood => &["AWC NDS-18: ASD", "AWC NDS-15: ASD"],
            Self::Masonry => &["TMS 402-16: ASD", "TMS 402-13: ASD"],
            Self::Aluminum => &["AA ADM1-20: LRFD - Building", "AA ADM1-15: LRFD"],
            Self::StainlessSteel => &["AISC 14th (360-10): LRFD", "AISC 15th (360-16): LRFD"],
            Self::SteelJoist => &["SJI 43rd/44th Edition: ASD", "SJI 43rd/44th Edition: LRFD"],
            Self::Seismic | Self::Wind => ASCE,
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

// =============================================================================
// CONCRETE & COMPOSITE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcreteSettings {
    pub strength: String,
    pub density: String,
    pub rebar_grade: String,
    pub foundation_rebar_grade: String,
    pub stress_options: String,
    /// Percent of gross area.
    pub column_steel_min: f64,
    pub column_steel_max: f64,
    pub drilled_pier_steel_min: f64,
    pub drilled_pier_steel_max: f64,
    pub pedestal_steel: String,
    pub use_cracked_sections: bool,
    pub min_bar_spacing: bool,
    #[serde(rename = "optimizeOTMSliding")]
    pub optimize_otm_sliding: bool,
    pub friction_coefficient: f64,
}

impl Default for ConcreteSettings {
    fn default() -> Self {
        Self {
            strength: "4000 psi".into(),
            density: "150 pcf".into(),
            rebar_grade: "ASTM A615".into(),
            foundation_rebar_grade: "ASTM A615".into(),
            stress_options: "Rectangular Stress Block".into(),
            column_steel_min: 1.0,
            column_steel_max: 8.0,
            drilled_pier_steel_min: 1.0,
            drilled_pier_steel_max: 8.0,
            pedestal_steel: "Auto".into(),
            use_cracked_sections: true,
            min_bar_spacing: true,
            optimize_otm_sliding: true,
            friction_coefficient: 0.3,
        }
    }
}

/// Composite beam design limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeSettings {
    pub percent_composite_min: f64,
    pub percent_composite_max: f64,
    /// in.
    pub stud_spacing_min: f64,
    /// in.
    pub stud_spacing_max: f64,
    pub min_flange_width2_rows: f64,
    pub min_flange_width3_rows: f64,
    /// Percent of transformed moment of inertia.
    pub i_effective: f64,
}

impl Default for CompositeSettings {
    fn default() -> Self {
        Self {
            percent_composite_min: 25.0,
            percent_composite_max: 100.0,
            stud_spacing_min: 4.5,
            stud_spacing_max: 36.0,
            min_flange_width2_rows: 5.5,
            min_flange_width3_rows: 8.5,
            i_effective: 75.0,
        }
    }
}

// =============================================================================
// UNITS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Imperial => Self::Metric,
            Self::Metric => Self::Imperial,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imperial => "Imperial",
            Self::Metric => "Metric",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Imperial" => Some(Self::Imperial),
            "Metric" => Some(Self::Metric),
            _ => None,
        }
    }
}

/// Display unit per quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Units {
    pub length: String,
    pub dimensions: String,
    pub material_stiffness: String,
    pub weight_densities: String,
    pub forces: String,
    pub linear_forces: String,
    pub moments: String,
    pub linear_moments: String,
    pub surface_area_loads: String,
    pub deflections: String,
    pub stresses: String,
    pub area_length: String,
    pub area: String,
}

impl Default for Units {
    /// Imperial, except area/length which starts unset.
    fn default() -> Self {
        Self { area_length: String::new(), ..Self::for_system(UnitSystem::Imperial) }
    }
}

impl Units {
    /// Every field set to `system`'s default.
    #[must_use]
    pub fn for_system(system: UnitSystem) -> Self {
        let unit = |field: UnitField| field.default_for(system).to_owned();
        Self {
            length: unit(UnitField::Length),
            dimensions: unit(UnitField::Dimensions),
            material_stiffness: unit(UnitField::MaterialStiffness),
            weight_densities: unit(UnitField::WeightDensities),
            forces: unit(UnitField::Forces),
            linear_forces: unit(UnitField::LinearForces),
            moments: unit(UnitField::Moments),
            linear_moments: unit(UnitField::LinearMoments),
            surface_area_loads: unit(UnitField::SurfaceAreaLoads),
            deflections: unit(UnitField::Deflections),
            stresses: unit(UnitField::Stresses),
            area_length: unit(UnitField::AreaLength),
            area: unit(UnitField::Area),
        }
    }

    #[must_use]
    pub fn get(&self, field: UnitField) -> &str {
        match field {
            UnitField::Length => &self.length,
            UnitField::Dimensions => &self.dimensions,
            UnitField::MaterialStiffness => &self.material_stiffness,
            UnitField::WeightDensities => &self.weight_densities,
            UnitField::Forces => &self.forces,
            UnitField::LinearForces => &self.linear_forces,
            UnitField::Moments => &self.moments,
            UnitField::LinearMoments => &self.linear_moments,
            UnitField::SurfaceAreaLoads => &self.surface_area_loads,
            UnitField::Deflections => &self.deflections,
            UnitField::Stresses => &self.stresses,
            UnitField::AreaLength => &self.area_length,
            UnitField::Area => &self.area,
        }
    }

    fn slot_mut(&mut self, field: UnitField) -> &mut String {
        match field {
            UnitField::Length => &mut self.length,
            UnitField::Dimensions => &mut self.dimensions,
            UnitField::MaterialStiffness => &mut self.material_stiffness,
            UnitField::WeightDensities => &mut self.weight_densities,
            UnitField::Forces => &mut self.forces,
            UnitField::LinearForces => &mut self.linear_forces,
            UnitField::Moments => &mut self.moments,
            UnitField::LinearMoments => &mut self.linear_moments,
            UnitField::SurfaceAreaLoads => &mut self.surface_area_loads,
            UnitField::Deflections => &mut self.deflections,
            UnitField::Stresses => &mut self.stresses,
            UnitField::AreaLength => &mut self.area_length,
            UnitField::Area => &mut self.area,
        }
    }
}

/// Selector for one entry of [`Units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitField {
    Length,
    Dimensions,
    MaterialStiffness,
    WeightDensities,
    Forces,
    LinearForces,
    Moments,
    LinearMoments,
    SurfaceAreaLoads,
    Deflections,
    Stresses,
    AreaLength,
    Area,
}

impl UnitField {
    pub const ALL: [Self; 13] = [
        Self::Length,
        Self::Dimensions,
        Self::MaterialStiffness,
        Self::WeightDensities,
        Self::Forces,
        Self::LinearForces,
        Self::Moments,
        Self::LinearMoments,
        Self::SurfaceAreaLoads,
        Self::Deflections,
        Self::Stresses,
        Self::AreaLength,
        Self::Area,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Dimensions => "dimensions",
            Self::MaterialStiffness => "materialStiffness",
            Self::WeightDensities => "weightDensities",
            Self::Forces => "forces",
            Self::LinearForces => "linearForces",
            Self::Moments => "moments",
            Self::LinearMoments => "linearMoments",
            Self::SurfaceAreaLoads => "surfaceAreaLoads",
            Self::Deflections => "deflections",
            Self::Stresses => "stresses",
            Self::AreaLength => "areaLength",
            Self::Area => "area",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Length => "Length",
            Self::Dimensions => "Dimensions",
            Self::MaterialStiffness => "Material Stiffness",
            Self::WeightDensities => "Weight Densities",
            Self::Forces => "Forces",
            Self::LinearForces => "Linear Forces",
            Self::Moments => "Moments",
            Self::LinearMoments => "Linear Moments",
            Self::SurfaceAreaLoads => "Surface/Area Loads",
            Self::Deflections => "Deflections",
            Self::Stresses => "Stresses",
            Self::AreaLength => "Area/length",
            Self::Area => "Area",
        }
    }

    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Length => &["ft", "m", "cm", "in"],
            Self::Dimensions => &["in", "mm", "cm", "ft"],
            Self::MaterialStiffness => &["ksi", "GPa", "MPa", "psi"],
            Self::WeightDensities => &["k/ft³", "pcf", "kg/m³", "kN/m³"],
            Self::Forces => &["k", "lb", "kN", "N"],
            Self::LinearForces => &["klf", "plf", "kN/m", "N/m"],
            Self::Moments => &["k-ft", "lb-in", "kN-m", "N-m"],
            Self::LinearMoments => &["k-ft/ft", "kN-m/m", "N-m/m"],
            Self::SurfaceAreaLoads => &["ksf", "psf", "kPa", "N/m²"],
            Self::Deflections => &["in", "mm", "cm"],
            Self::Stresses => &["ksi", "psi", "MPa", "kPa"],
            Self::AreaLength => &["in²/ft", "cm²/m", "mm²/m"],
            Self::Area => &["ft²", "in²", "m²", "cm²"],
        }
    }

    /// Unit applied when switching to `system`.
    #[must_use]
    pub const fn default_for(self, system: UnitSystem) -> &'static str {
        match system {
            UnitSystem::Imperial => match self {
                Self::Length => "ft",
                Self::Dimensions | Self::Deflections => "in",
                Self::MaterialStiffness | Self::Stresses => "ksi",
                Self::WeightDensities => "k/ft³",
                Self::Forces => "k",
                Self::LinearForces => "klf",
                Self::Moments => "k-ft",
                Self::LinearMoments => "k-ft/ft",
                Self::SurfaceAreaLoads => "ksf",
                Self::AreaLength => "in²/ft",
                Self::Area => "ft²",
            },
            UnitSystem::Metric => match self {
                Self::Length => "m",
                Self::Dimensions | Self::Deflections => "mm",
                Self::MaterialStiffness | Self::Stresses => "MPa",
                Self::WeightDensities => "kg/m³",
                Self::Forces => "kN",
                Self::LinearForces => "kN/m",
                Self::Moments => "kN-m",
                Self::LinearMoments => "kN-m/m",
                Self::SurfaceAreaLoads => "kPa",
                Self::AreaLength => "in²/ft",
                Self::Area => "m²",
            },
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

// =============================================================================
// PROFILE & DRAFT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub codes: Codes,
    pub concrete: ConcreteSettings,
    pub composite: CompositeSettings,
    pub unit_system: UnitSystem,
    pub units: Units,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown settings field {0:?}")]
    UnknownField(String),
    #[error("{field}: {value:?} is not an available option")]
    InvalidOption { field: &'static str, value: String },
}

/// Working copy of a project's settings while the settings dialog is open.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDraft {
    draft: ProjectSettings,
}

impl SettingsDraft {
    #[must_use]
    pub fn open(current: &ProjectSettings) -> Self {
        Self { draft: current.clone() }
    }

    #[must_use]
    pub fn settings(&self) -> &ProjectSettings {
        &self.draft
    }

    /// Unvalidated access for the concrete and composite parameters.
    pub fn settings_mut(&mut self) -> &mut ProjectSettings {
        &mut self.draft
    }

    /// # Errors
    ///
    /// Rejects values outside the field's option list.
    pub fn set_code(&mut self, field: CodeField, value: &str) -> Result<(), SettingsError> {
        if !field.options().contains(&value) {
            return Err(SettingsError::InvalidOption { field: field.key(), value: value.to_owned() });
        }
        value.clone_into(self.draft.codes.slot_mut(field));
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects values outside the field's option list.
    pub fn set_unit(&mut self, field: UnitField, value: &str) -> Result<(), SettingsError> {
        if !field.options().contains(&value) {
            return Err(SettingsError::InvalidOption { field: field.key(), value: value.to_owned() });
        }
        value.clone_into(self.draft.units.slot_mut(field));
        Ok(())
    }

    /// Switch unit system, overwriting every unit with the system defaults.
    pub fn set_unit_system(&mut self, system: UnitSystem) {
        self.draft.unit_system = system;
        self.draft.units = Units::for_system(system);
    }

    pub fn toggle_unit_system(&mut self) -> UnitSystem {
        let next = self.draft.unit_system.toggled();
        self.set_unit_system(next);
        next
    }

    /// Finish editing; the result replaces the project's settings.
    #[must_use]
    pub fn commit(self) -> ProjectSettings {
        self.draft
    }
}
