//! Property editors, described as data.
//!
//! DESIGN
//! ======
//! Every kind owns a static table of [`FieldSpec`]s. The table drives both
//! sides of the editor: [`form`] resolves it against a bag into the visible
//! fields with their current values, and [`apply`] validates one field change
//! and returns the entire replacement bag.
//!
//! COERCION
//! ========
//! Numeric fields accept any finite number, including zero and negatives. An
//! empty input coerces to 0. Toggles take "Yes" or "No"; choices take only
//! their listed option values.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use serde::Serialize;
use serde_json::Value;

use crate::bag::{PropertyBag, Props};
use crate::geometry::Geometry;
use crate::kind::ComponentKind;

// =============================================================================
// FIELD TABLES
// =============================================================================

/// One selectable option: stored value plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "input", rename_all = "camelCase")]
pub enum FieldKind {
    Number { unit: Option<&'static str> },
    Choice { options: &'static [ChoiceOption] },
    /// Boolean shown as a Yes/No selector.
    Toggle,
}

/// When a field is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Always,
    /// Shown while the boolean field is true.
    WhenFlag(&'static str),
    /// Shown while the choice field holds the value.
    WhenChoice(&'static str, &'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub visible: Visibility,
}

const fn number(key: &'static str, label: &'static str, unit: &'static str) -> FieldSpec {
    FieldSpec { key, label, kind: FieldKind::Number { unit: Some(unit) }, visible: Visibility::Always }
}

const fn unitless(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { key, label, kind: FieldKind::Number { unit: None }, visible: Visibility::Always }
}

const fn choice(key: &'static str, label: &'static str, options: &'static [ChoiceOption]) -> FieldSpec {
    FieldSpec { key, label, kind: FieldKind::Choice { options }, visible: Visibility::Always }
}

const fn toggle(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { key, label, kind: FieldKind::Toggle, visible: Visibility::Always }
}

impl FieldSpec {
    const fn when(self, visible: Visibility) -> Self {
        Self { visible, ..self }
    }

    /// Whether the field is shown for the given (complete) bag.
    #[must_use]
    pub fn is_visible(&self, bag: &PropertyBag) -> bool {
        let p = Props::new(bag);
        match self.visible {
            Visibility::Always => true,
            Visibility::WhenFlag(key) => p.flag(key, false),
            Visibility::WhenChoice(key, value) => p.text(key, "") == value,
        }
    }
}

const MATERIALS: &[ChoiceOption] = &[
    opt("Hot Rolled Steel", "Hot Rolled Steel"),
    opt("Wood", "Wood"),
    opt("Concrete", "Concrete"),
    opt("Cold Formed Steel", "Cold Formed Steel"),
    opt("Aluminum", "Aluminum"),
];
const SECTIONS: &[ChoiceOption] = &[opt("W8x10", "W8x10"), opt("W10x12", "W10x12"), opt("W12x14", "W12x14")];
const GRADES: &[ChoiceOption] = &[opt("A992", "A992 (Fy=50 ksi)"), opt("A36", "A36 (Fy=36 ksi)")];
const SPECIES: &[ChoiceOption] = &[opt("DF", "Douglas Fir-Larch"), opt("SP", "Southern Pine")];
const STRENGTHS: &[ChoiceOption] = &[opt("3000", "3000 psi"), opt("4000", "4000 psi"), opt("5000", "5000 psi")];

const BEAM: &[FieldSpec] = &[
    choice("materialType", "Material Type:", MATERIALS),
    number("length", "Length:", "ft"),
    number("depth", "Depth:", "in"),
    choice("section", "Shape:", SECTIONS).when(Visibility::WhenChoice("materialType", "Hot Rolled Steel")),
    choice("grade", "Steel Grade:", GRADES).when(Visibility::WhenChoice("materialType", "Hot Rolled Steel")),
    choice("species", "Species:", SPECIES).when(Visibility::WhenChoice("materialType", "Wood")),
    choice("strength", "f'c:", STRENGTHS).when(Visibility::WhenChoice("materialType", "Concrete")),
];

const COLUMN: &[FieldSpec] = &[
    number("height", "Height:", "ft"),
    number("widthX", "Width X:", "in"),
    number("widthY", "Width Y:", "in"),
];

const STEEL_JOIST: &[FieldSpec] = &[number("length", "Length:", "ft"), number("depth", "Depth:", "in")];

const COMPOSITE_BEAM: &[FieldSpec] = &[
    number("length", "Length:", "ft"),
    number("slabThickness", "Slab Thickness:", "in"),
    number("beamDepth", "Beam Depth:", "in"),
];

const RETAINING_WALL: &[FieldSpec] = &[
    number("length", "Length:", "ft"),
    number("wallHeight", "Wall Height", "ft"),
    number("wallThickness", "Wall Thickness", "in"),
    number("toeLength", "Toe Length:", "ft"),
    number("heelLength", "Heel Length:", "ft"),
    number("footingThickness", "Footing Thickness:", "in"),
    toggle("hasKey", "Key:"),
    number("keyOffset", "Key Offset:", "ft").when(Visibility::WhenFlag("hasKey")),
    number("keyWidth", "Key Width:", "in").when(Visibility::WhenFlag("hasKey")),
    number("keyDepth", "Key Depth:", "in").when(Visibility::WhenFlag("hasKey")),
];

const SPREAD_FOOTING: &[FieldSpec] = &[number("size", "Footing Size:", "ft"), number("thickness", "Thickness:", "in")];

const WALL_FOOTING: &[FieldSpec] = &[number("width", "Footing Width:", "ft"), number("thickness", "Thickness:", "in")];

const DRILLED_PIER: &[FieldSpec] = &[number("diameter", "Diameter:", "in"), number("length", "Length:", "ft")];

const SEISMIC_LOAD: &[FieldSpec] = &[unitless("SDS", "SDS:"), unitless("SD1", "SD1:")];

const WIND_LOAD: &[FieldSpec] = &[number("windSpeed", "Basic Wind Speed:", "mph")];

/// Field table for `kind`, in display order.
#[must_use]
pub const fn fields(kind: ComponentKind) -> &'static [FieldSpec] {
    match kind {
        ComponentKind::Beam => BEAM,
        ComponentKind::Column => COLUMN,
        ComponentKind::SteelJoist => STEEL_JOIST,
        ComponentKind::CompositeBeam => COMPOSITE_BEAM,
        ComponentKind::RetainingWall => RETAINING_WALL,
        ComponentKind::SpreadFooting => SPREAD_FOOTING,
        ComponentKind::WallFooting => WALL_FOOTING,
        ComponentKind::DrilledPier => DRILLED_PIER,
        ComponentKind::SeismicLoad => SEISMIC_LOAD,
        ComponentKind::WindLoad => WIND_LOAD,
    }
}

// =============================================================================
// FORMS
// =============================================================================

/// A visible field with its current value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub value: Value,
}

/// What a property panel shows for one bag.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Form {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Message shown in place of fields, for kinds with nothing to edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub fields: Vec<FormField>,
}

/// The bag with every field of `kind` present, keeping unrelated keys.
#[must_use]
pub fn complete(kind: ComponentKind, bag: &PropertyBag) -> PropertyBag {
    let mut out = bag.clone();
    out.extend(Geometry::from_bag(kind, bag).to_bag());
    out
}

/// Resolve the editor for `kind` against `bag`.
#[must_use]
pub fn form(kind: ComponentKind, bag: &PropertyBag) -> Form {
    let full = complete(kind, bag);
    let summary = match Geometry::from_bag(kind, &full) {
        Geometry::Beam(beam) => Some(beam.summary()),
        _ => None,
    };
    let fields = fields(kind)
        .iter()
        .filter(|spec| spec.is_visible(&full))
        .map(|spec| FormField {
            key: spec.key,
            label: spec.label,
            kind: spec.kind,
            value: display_value(spec, &full),
        })
        .collect();
    Form { summary, notice: None, fields }
}

fn display_value(spec: &FieldSpec, bag: &PropertyBag) -> Value {
    let raw = bag.get(spec.key).cloned().unwrap_or(Value::Null);
    match (spec.kind, raw) {
        (FieldKind::Toggle, Value::Bool(on)) => Value::from(if on { "Yes" } else { "No" }),
        (_, v) => v,
    }
}

// =============================================================================
// EDITS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("{kind} has no field {field:?}")]
    UnknownField { kind: String, field: String },
    #[error("{field}: {input:?} is not a number")]
    NotANumber { field: String, input: String },
    #[error("{field}: {input:?} is not one of the listed options")]
    InvalidChoice { field: String, input: String },
    #[error("type {0:?} has no editable properties")]
    NotEditable(String),
}

/// Apply one raw field input and return the entire replacement bag.
///
/// # Errors
///
/// Fails when `key` is not a field of `kind`, or when `input` does not coerce
/// to the field's type.
pub fn apply(kind: ComponentKind, bag: &PropertyBag, key: &str, input: &str) -> Result<PropertyBag, EditError> {
    let spec = fields(kind)
        .iter()
        .find(|spec| spec.key == key)
        .ok_or_else(|| EditError::UnknownField { kind: kind.to_string(), field: key.to_owned() })?;
    let value = coerce(spec, input)?;
    let mut out = complete(kind, bag);
    out.insert(spec.key.to_owned(), value);
    Ok(out)
}

fn coerce(spec: &FieldSpec, input: &str) -> Result<Value, EditError> {
    match spec.kind {
        FieldKind::Number { .. } => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Ok(Value::from(0.0));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Value::from)
                .ok_or_else(|| EditError::NotANumber { field: spec.key.to_owned(), input: input.to_owned() })
        }
        FieldKind::Toggle => match input {
            "Yes" => Ok(Value::Bool(true)),
            "No" => Ok(Value::Bool(false)),
            _ => Err(EditError::InvalidChoice { field: spec.key.to_owned(), input: input.to_owned() }),
        },
        FieldKind::Choice { options } => options
            .iter()
            .find(|o| o.value == input)
            .map(|o| Value::from(o.value))
            .ok_or_else(|| EditError::InvalidChoice { field: spec.key.to_owned(), input: input.to_owned() }),
    }
}
