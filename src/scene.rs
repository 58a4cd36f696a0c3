//! 2D schematic scenes and their SVG serialization.
//!
//! A [`Scene`] is what a visualizer produces: a fixed viewBox, one group
//! transform and a flat list of primitives in group-local coordinates.
//! Serialization goes through `Display`, so writing never allocates an error
//! path of its own.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt::{self, Write};

use serde::Serialize;

/// Side length of the square viewBox used by the structural drawings.
pub const VIEW_SIZE: f64 = 400.0;

// =============================================================================
// TYPES
// =============================================================================

/// Paint applied to a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f64,
}

impl Style {
    /// Light grey member fill with a mid-grey outline.
    pub const MEMBER: Self = Self { fill: "#f1f3f6", stroke: "#adb5bd", stroke_width: 1.0 };
    /// Concrete slab shading.
    pub const SLAB: Self = Self { fill: "#e9ecef", stroke: "#adb5bd", stroke_width: 1.0 };
    /// Ground and soil strokes.
    pub const SOIL: Self = Self { fill: "none", stroke: "#8B4513", stroke_width: 1.0 };
    pub const OUTLINE: Self = Self { fill: "none", stroke: "#adb5bd", stroke_width: 1.0 };
    /// Solid pin-support glyph.
    pub const SUPPORT: Self = Self { fill: "#adb5bd", stroke: "none", stroke_width: 0.0 };
    /// Load glyph strokes.
    pub const LOAD: Self = Self { fill: "none", stroke: "#3b82f6", stroke_width: 2.0 };
    pub const LOAD_FILL: Self = Self { fill: "#3b82f6", stroke: "none", stroke_width: 0.0 };
    pub const CAPTION: Self = Self { fill: "#6c757d", stroke: "none", stroke_width: 0.0 };

    #[must_use]
    pub const fn with_width(self, stroke_width: f64) -> Self {
        Self { stroke_width, ..self }
    }
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum Shape {
    Rect { x: f64, y: f64, width: f64, height: f64, style: Style },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, style: Style },
    /// Raw SVG path data, used for glyphs such as pin supports and arrows.
    Path { d: String, style: Style },
    Text { x: f64, y: f64, size: f64, content: String, style: Style },
}

/// Group transform: translate then uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self { tx: 0.0, ty: 0.0, scale: 1.0 };

    #[must_use]
    pub const fn new(tx: f64, ty: f64, scale: f64) -> Self {
        Self { tx, ty, scale }
    }

    /// Translate to the middle of the standard viewBox.
    #[must_use]
    pub const fn centered(scale: f64) -> Self {
        Self::new(VIEW_SIZE / 2.0, VIEW_SIZE / 2.0, scale)
    }
}

/// Output of a visualizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Width and height of the viewBox, anchored at the origin.
    pub view_size: f64,
    pub transform: Transform,
    pub shapes: Vec<Shape>,
}

impl Scene {
    #[must_use]
    pub fn new(view_size: f64, transform: Transform) -> Self {
        Self { view_size, transform, shapes: Vec::new() }
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: Style) -> &mut Self {
        self.shapes.push(Shape::Rect { x, y, width, height, style });
        self
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: Style) -> &mut Self {
        self.shapes.push(Shape::Line { x1, y1, x2, y2, style });
        self
    }

    pub fn path(&mut self, d: impl Into<String>, style: Style) -> &mut Self {
        self.shapes.push(Shape::Path { d: d.into(), style });
        self
    }

    pub fn text(&mut self, x: f64, y: f64, size: f64, content: impl Into<String>, style: Style) -> &mut Self {
        self.shapes.push(Shape::Text { x, y, size, content: content.into(), style });
        self
    }

    /// Serialize as a standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

// =============================================================================
// SVG SERIALIZATION
// =============================================================================

/// Coordinate formatter: three decimals at most, trailing zeros and `-0` dropped.
#[derive(Debug, Clone, Copy)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        if rounded == 0.0 || !rounded.is_finite() {
            return f.write_char('0');
        }
        write!(f, "{rounded}")
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                _ => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"fill="{}" stroke="{}""#, self.fill, self.stroke)?;
        if self.stroke != "none" {
            write!(f, r#" stroke-width="{}""#, Num(self.stroke_width))?;
        }
        Ok(())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rect { x, y, width, height, style } => write!(
                f,
                r#"<rect x="{}" y="{}" width="{}" height="{}" {style}/>"#,
                Num(*x),
                Num(*y),
                Num(*width),
                Num(*height),
            ),
            Self::Line { x1, y1, x2, y2, style } => write!(
                f,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {style}/>"#,
                Num(*x1),
                Num(*y1),
                Num(*x2),
                Num(*y2),
            ),
            Self::Path { d, style } => write!(f, r#"<path d="{}" {style}/>"#, Escaped(d)),
            Self::Text { x, y, size, content, style } => write!(
                f,
                r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" {style}>{}</text>"#,
                Num(*x),
                Num(*y),
                Num(*size),
                Escaped(content),
            ),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = Num(self.view_size);
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" preserveAspectRatio="xMidYMid meet">"#
        )?;
        let t = self.transform;
        writeln!(f, r#"  <g transform="translate({},{}) scale({})">"#, Num(t.tx), Num(t.ty), Num(t.scale))?;
        for shape in &self.shapes {
            writeln!(f, "    {shape}")?;
        }
        f.write_str("  </g>\n</svg>\n")
    }
}
