//! Typed geometry per component kind.
//!
//! Each struct carries the defaults its property editor is seeded with.
//! [`Geometry::from_bag`] reads a loose [`PropertyBag`] field by field, so a bag
//! missing some keys still produces complete geometry. Lengths are in feet and
//! section dimensions in inches, matching the editor's unit labels.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde_json::json;

use crate::bag::{PropertyBag, Props, bag_from_value};
use crate::kind::ComponentKind;

// =============================================================================
// BEAM MATERIALS
// =============================================================================

/// Material families selectable for a beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamMaterial {
    HotRolledSteel,
    Wood,
    Concrete,
    ColdFormedSteel,
    Aluminum,
}

impl BeamMaterial {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HotRolledSteel => "Hot Rolled Steel",
            Self::Wood => "Wood",
            Self::Concrete => "Concrete",
            Self::ColdFormedSteel => "Cold Formed Steel",
            Self::Aluminum => "Aluminum",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Hot Rolled Steel" => Some(Self::HotRolledSteel),
            "Wood" => Some(Self::Wood),
            "Concrete" => Some(Self::Concrete),
            "Cold Formed Steel" => Some(Self::ColdFormedSteel),
            "Aluminum" => Some(Self::Aluminum),
            _ => None,
        }
    }
}

// =============================================================================
// PER-KIND GEOMETRY
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    pub material: BeamMaterial,
    /// Span, ft.
    pub length: f64,
    /// Section depth, in.
    pub depth: f64,
    pub section: String,
    pub grade: String,
    pub species: String,
    /// Concrete compressive strength, psi.
    pub strength: String,
}

impl Default for Beam {
    fn default() -> Self {
        Self {
            material: BeamMaterial::HotRolledSteel,
            length: 20.0,
            depth: 24.0,
            section: "W8x10".into(),
            grade: "A992".into(),
            species: "DF".into(),
            strength: "4000".into(),
        }
    }
}

impl Beam {
    /// One-line description shown above the beam editor.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.material {
            BeamMaterial::HotRolledSteel => format!("{} ({})", self.section, self.grade),
            BeamMaterial::Wood => match self.species.as_str() {
                "SP" => "Southern Pine".to_owned(),
                _ => "Douglas Fir-Larch".to_owned(),
            },
            BeamMaterial::Concrete => format!("{} psi", self.strength),
            other => other.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Clear height, ft.
    pub height: f64,
    /// in.
    pub width_x: f64,
    /// in.
    pub width_y: f64,
}

impl Default for Column {
    fn default() -> Self {
        Self { height: 12.0, width_x: 16.0, width_y: 16.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteelJoist {
    /// ft.
    pub length: f64,
    /// in.
    pub depth: f64,
}

impl Default for SteelJoist {
    fn default() -> Self {
        Self { length: 24.0, depth: 16.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeBeam {
    /// Span, ft.
    pub length: f64,
    /// in.
    pub slab_thickness: f64,
    /// in.
    pub beam_depth: f64,
}

impl Default for CompositeBeam {
    fn default() -> Self {
        Self { length: 30.0, slab_thickness: 4.0, beam_depth: 18.0 }
    }
}

/// Cantilever retaining wall with an optional shear key under the footing.
#[derive(Debug, Clone, PartialEq)]
pub struct RetainingWall {
    /// Run of wall, ft.
    pub length: f64,
    /// Stem height above the footing, ft.
    pub wall_height: f64,
    /// Stem thickness, in.
    pub wall_thickness: f64,
    /// ft.
    pub toe_length: f64,
    /// ft.
    pub heel_length: f64,
    /// in.
    pub footing_thickness: f64,
    pub has_key: bool,
    /// Key centerline offset from the stem centerline, ft.
    pub key_offset: f64,
    /// in.
    pub key_width: f64,
    /// in.
    pub key_depth: f64,
}

impl Default for RetainingWall {
    fn default() -> Self {
        Self {
            length: 10.0,
            wall_height: 5.0,
            wall_thickness: 12.0,
            toe_length: 2.0,
            heel_length: 4.0,
            footing_thickness: 12.0,
            has_key: true,
            key_offset: 0.0,
            key_width: 12.0,
            key_depth: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadFooting {
    /// Square pad side, ft.
    pub size: f64,
    /// in.
    pub thickness: f64,
}

impl Default for SpreadFooting {
    fn default() -> Self {
        Self { size: 6.0, thickness: 12.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WallFooting {
    /// ft.
    pub width: f64,
    /// in.
    pub thickness: f64,
}

impl Default for WallFooting {
    fn default() -> Self {
        Self { width: 2.0, thickness: 12.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrilledPier {
    /// in.
    pub diameter: f64,
    /// Embedded length, ft.
    pub length: f64,
}

impl Default for DrilledPier {
    fn default() -> Self {
        Self { diameter: 24.0, length: 20.0 }
    }
}

/// Design spectral response accelerations.
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicLoad {
    pub sds: f64,
    pub sd1: f64,
}

impl Default for SeismicLoad {
    fn default() -> Self {
        Self { sds: 1.0, sd1: 0.6 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindLoad {
    /// Basic wind speed, mph.
    pub wind_speed: f64,
}

impl Default for WindLoad {
    fn default() -> Self {
        Self { wind_speed: 115.0 }
    }
}

// =============================================================================
// GEOMETRY UNION
// =============================================================================

/// Strongly typed geometry, one variant per [`ComponentKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Beam(Beam),
    Column(Column),
    SteelJoist(SteelJoist),
    CompositeBeam(CompositeBeam),
    RetainingWall(RetainingWall),
    SpreadFooting(SpreadFooting),
    WallFooting(WallFooting),
    DrilledPier(DrilledPier),
    SeismicLoad(SeismicLoad),
    WindLoad(WindLoad),
}

impl Geometry {
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Beam(_) => ComponentKind::Beam,
            Self::Column(_) => ComponentKind::Column,
            Self::SteelJoist(_) => ComponentKind::SteelJoist,
            Self::CompositeBeam(_) => ComponentKind::CompositeBeam,
            Self::RetainingWall(_) => ComponentKind::RetainingWall,
            Self::SpreadFooting(_) => ComponentKind::SpreadFooting,
            Self::WallFooting(_) => ComponentKind::WallFooting,
            Self::DrilledPier(_) => ComponentKind::DrilledPier,
            Self::SeismicLoad(_) => ComponentKind::SeismicLoad,
            Self::WindLoad(_) => ComponentKind::WindLoad,
        }
    }

    /// Editor defaults for `kind`.
    #[must_use]
    pub fn defaults(kind: ComponentKind) -> Self {
        Self::from_bag(kind, &PropertyBag::new())
    }

    /// Read geometry for `kind` out of a loose bag, defaulting any missing field.
    #[must_use]
    pub fn from_bag(kind: ComponentKind, bag: &PropertyBag) -> Self {
        let p = Props::new(bag);
        match kind {
            ComponentKind::Beam => {
                let d = Beam::default();
                Self::Beam(Beam {
                    material: BeamMaterial::parse(&p.text("materialType", d.material.as_str())).unwrap_or(d.material),
                    length: p.number("length", d.length),
                    depth: p.number("depth", d.depth),
                    section: p.text("section", &d.section),
                    grade: p.text("grade", &d.grade),
                    species: p.text("species", &d.species),
                    strength: p.text("strength", &d.strength),
                })
            }
            ComponentKind::Column => {
                let d = Column::default();
                Self::Column(Column {
                    height: p.number("height", d.height),
                    width_x: p.number("widthX", d.width_x),
                    width_y: p.number("widthY", d.width_y),
                })
            }
            ComponentKind::SteelJoist => {
                let d = SteelJoist::default();
                Self::SteelJoist(SteelJoist { length: p.number("length", d.length), depth: p.number("depth", d.depth) })
            }
            ComponentKind::CompositeBeam => {
                let d = CompositeBeam::default();
                Self::CompositeBeam(CompositeBeam {
                    length: p.number("length", d.length),
                    slab_thickness: p.number("slabThickness", d.slab_thickness),
                    beam_depth: p.number("beamDepth", d.beam_depth),
                })
            }
            ComponentKind::RetainingWall => {
                let d = RetainingWall::default();
                Self::RetainingWall(RetainingWall {
                    length: p.number("length", d.length),
                    wall_height: p.number("wallHeight", d.wall_height),
                    wall_thickness: p.number("wallThickness", d.wall_thickness),
                    toe_length: p.number("toeLength", d.toe_length),
                    heel_length: p.number("heelLength", d.heel_length),
                    footing_thickness: p.number("footingThickness", d.footing_thickness),
                    has_key: p.flag("hasKey", d.has_key),
                    key_offset: p.number("keyOffset", d.key_offset),
                    key_width: p.number("keyWidth", d.key_width),
                    key_depth: p.number("keyDepth", d.key_depth),
                })
            }
            ComponentKind::SpreadFooting => {
                let d = SpreadFooting::default();
                Self::SpreadFooting(SpreadFooting {
                    size: p.number("size", d.size),
                    thickness: p.number("thickness", d.thickness),
                })
            }
            ComponentKind::WallFooting => {
                let d = WallFooting::default();
                Self::WallFooting(WallFooting {
                    width: p.number("width", d.width),
                    thickness: p.number("thickness", d.thickness),
                })
            }
            ComponentKind::DrilledPier => {
                let d = DrilledPier::default();
                Self::DrilledPier(DrilledPier {
                    diameter: p.number("diameter", d.diameter),
                    length: p.number("length", d.length),
                })
            }
            ComponentKind::SeismicLoad => {
                let d = SeismicLoad::default();
                Self::SeismicLoad(SeismicLoad { sds: p.number("SDS", d.sds), sd1: p.number("SD1", d.sd1) })
            }
            ComponentKind::WindLoad => {
                let d = WindLoad::default();
                Self::WindLoad(WindLoad { wind_speed: p.number("windSpeed", d.wind_speed) })
            }
        }
    }

    /// Serialize back into a complete bag (every field present).
    #[must_use]
    pub fn to_bag(&self) -> PropertyBag {
        let value = match self {
            Self::Beam(b) => json!({
                "materialType": b.material.as_str(),
                "length": b.length,
                "depth": b.depth,
                "section": b.section,
                "grade": b.grade,
                "species": b.species,
                "strength": b.strength,
            }),
            Self::Column(c) => json!({"height": c.height, "widthX": c.width_x, "widthY": c.width_y}),
            Self::SteelJoist(j) => json!({"length": j.length, "depth": j.depth}),
            Self::CompositeBeam(c) => json!({
                "length": c.length,
                "slabThickness": c.slab_thickness,
                "beamDepth": c.beam_depth,
            }),
            Self::RetainingWall(w) => json!({
                "length": w.length,
                "wallHeight": w.wall_height,
                "wallThickness": w.wall_thickness,
                "toeLength": w.toe_length,
                "heelLength": w.heel_length,
                "footingThickness": w.footing_thickness,
                "hasKey": w.has_key,
                "keyOffset": w.key_offset,
                "keyWidth": w.key_width,
                "keyDepth": w.key_depth,
            }),
            Self::SpreadFooting(f) => json!({"size": f.size, "thickness": f.thickness}),
            Self::WallFooting(f) => json!({"width": f.width, "thickness": f.thickness}),
            Self::DrilledPier(p) => json!({"diameter": p.diameter, "length": p.length}),
            Self::SeismicLoad(s) => json!({"SDS": s.sds, "SD1": s.sd1}),
            Self::WindLoad(w) => json!({"windSpeed": w.wind_speed}),
        };
        bag_from_value(value)
    }
}
