//! Schematic visualizers, one per component kind.
//!
//! Every drawing uses the same unit convention: [`PX_PER_FT`] scene units per
//! foot, with inch dimensions converted to feet first. Inputs are typed
//! [`Geometry`], so a visualizer cannot see a missing field; bag defaults are
//! resolved upstream by [`Geometry::from_bag`].

#[cfg(test)]
#[path = "visualize_test.rs"]
mod visualize_test;

use crate::geometry::{
    Beam, Column, CompositeBeam, DrilledPier, Geometry, RetainingWall, SpreadFooting, SteelJoist, WallFooting,
};
use crate::scene::{Num, Scene, Style, Transform, VIEW_SIZE};

/// Scene units per foot.
pub const PX_PER_FT: f64 = 10.0;

/// Side length of the smaller viewBox used by the load glyphs.
const LOAD_VIEW_SIZE: f64 = 100.0;

fn ft(feet: f64) -> f64 {
    feet * PX_PER_FT
}

fn inches(inches: f64) -> f64 {
    inches / 12.0 * PX_PER_FT
}

/// Triangular pin support hanging below `(x, y)`.
fn pin_support(scene: &mut Scene, x: f64, y: f64) {
    scene.path(format!("M{},{} l-5,10 h10 z", Num(x), Num(y)), Style::SUPPORT);
}

/// Draw the schematic for `geometry`.
#[must_use]
pub fn render(geometry: &Geometry) -> Scene {
    match geometry {
        Geometry::Beam(b) => beam(b),
        Geometry::Column(c) => column(c),
        Geometry::SteelJoist(j) => steel_joist(j),
        Geometry::CompositeBeam(c) => composite_beam(c),
        Geometry::RetainingWall(w) => retaining_wall(w),
        Geometry::SpreadFooting(f) => spread_footing(f),
        Geometry::WallFooting(f) => wall_footing(f),
        Geometry::DrilledPier(p) => drilled_pier(p),
        Geometry::SeismicLoad(_) => seismic_load(),
        Geometry::WindLoad(_) => wind_load(),
    }
}

/// Placeholder drawn for type strings with no registered kind.
#[must_use]
pub fn pending() -> Scene {
    let mut scene = Scene::new(VIEW_SIZE, Transform::centered(1.0));
    scene
        .rect(-40.0, -60.0, 80.0, 80.0, Style::OUTLINE.with_width(2.0))
        .line(-40.0, -60.0, 40.0, 20.0, Style::OUTLINE)
        .line(40.0, -60.0, -40.0, 20.0, Style::OUTLINE)
        .text(0.0, 50.0, 12.0, "TYPE VISUALIZATION PENDING", Style::CAPTION);
    scene
}

// =============================================================================
// BUILDING STRUCTURE
// =============================================================================

fn beam(b: &Beam) -> Scene {
    let w = ft(b.length);
    let h = inches(b.depth);
    let mut scene = Scene::new(VIEW_SIZE, Transform::centered(1.5));
    scene.rect(-w / 2.0, -h / 2.0, w, h, Style::MEMBER);
    pin_support(&mut scene, -w / 2.0, h / 2.0);
    pin_support(&mut scene, w / 2.0, h / 2.0);
    scene
}

fn column(c: &Column) -> Scene {
    let w = inches(c.width_x);
    let h = ft(c.height);
    let mut scene = Scene::new(VIEW_SIZE, Transform::centered(2.0));
    scene
        .rect(-w / 2.0, -h / 2.0, w, h, Style::MEMBER)
        .line(-w, h / 2.0, w, h / 2.0, Style::OUTLINE);
    scene
}

fn steel_joist(j: &SteelJoist) -> Scene {
    let w = ft(j.length);
    let h = inches(j.depth);
    let (left, top, bottom) = (-w / 2.0, -h / 2.0, h / 2.0);
    let web = format!(
        "M{},{} L{},{} L{},{} L{},{} L{},{}",
        Num(left),
        Num(top),
        Num(left + w / 4.0),
        Num(bottom),
        Num(left + w / 2.0),
        Num(top),
        Num(left + 3.0 * w / 4.0),
        Num(bottom),
        Num(w / 2.0),
        Num(top),
    );
    let mut scene = Scene::new(VIEW_SIZE, Transform::centered(1.5));
    scene.rect(left, top, w, h, Style::OUTLINE).path(web, Style::OUTLINE);
    pin_support(&mut scene, left, bottom);
    pin_support(&mut scene, w / 2.0, bottom);
    scene
}

fn composite_beam(c: &CompositeBeam) -> Scene {
    let w = ft(c.length);
    let slab = inches(c.slab_thickness);
    let beam = inches(c.beam_depth);
    let mut scene = Scene::new(VIEW_SIZE, Transform::centered(1.5));
    scene
        .rect(-w / 2.0, -slab - beam / 2.0, w, slab, Style::SLAB)
        .rect(-w / 2.0, -beam / 2.0, w, beam, Style::MEMBER);
    scene
}

// =============================================================================
// FOUNDATIONS
// =============================================================================

fn retaining_wall(wall: &RetainingWall) -> Scene {
    let thin = Style::MEMBER.with_width(0.5);
    let t = inches(wall.wall_thickness);
    let top = -ft(wall.wall_height);
    let soil_y = top + 20.0;
    let footing_h = inches(wall.footing_thickness);

    let mut scene = Scene::new(VIEW_SIZE, Transform::new(VIEW_SIZE / 2.0, 220.0, 4.0));
    scene.line(20.0, soil_y, 100.0, soil_y, Style::SOIL.with_width(0.5));
    let y = Num(soil_y);
    scene.path(format!("M20,{y} l5,5 M30,{y} l5,5 M40,{y} l5,5"), Style::SOIL.with_width(0.3));

    scene
        .rect(-t, top, t * 2.0, ft(wall.wall_height), thin)
        .rect(
            -ft(wall.toe_length) - t,
            0.0,
            ft(wall.toe_length) + t * 2.0 + ft(wall.heel_length),
            footing_h,
            thin,
        );
    if wall.has_key {
        let key_w = inches(wall.key_width);
        scene.rect(ft(wall.key_offset) - key_w / 2.0, footing_h, key_w, inches(wall.key_depth), thin);
    }
    scene
}

fn spread_footing(f: &SpreadFooting) -> Scene {
    let thin = Style::MEMBER.with_width(0.5);
    let w = ft(f.size);
    let mut scene = Scene::new(VIEW_SIZE, Transform::centered(4.0));
    scene
        .rect(-5.0, -15.0, 10.0, 15.0, thin)
        .rect(-w / 2.0, 0.0, w, inches(f.thickness), thin);
    scene
}

fn wall_footing(f: &WallFooting) -> Scene {
    // Drawn at twice the plan scale so narrow strips stay legible.
    let w = f.width * 2.0 * PX_PER_FT;
    let mut scene = Scene::new(VIEW_SIZE, Transform::centered(4.0));
    scene
        .line(0.0, -15.0, 0.0, 0.0, Style::OUTLINE.with_width(2.0))
        .rect(-w / 2.0, 0.0, w, inches(f.thickness), Style::MEMBER.with_width(0.5));
    scene
}

fn drilled_pier(p: &DrilledPier) -> Scene {
    let d = inches(p.diameter);
    let mut scene = Scene::new(VIEW_SIZE, Transform::new(VIEW_SIZE / 2.0, 150.0, 1.5));
    scene
        .line(-50.0, 0.0, 50.0, 0.0, Style::OUTLINE)
        .rect(-d / 2.0, 0.0, d, ft(p.length), Style::MEMBER);
    scene
}

// =============================================================================
// LOADS
// =============================================================================

fn seismic_load() -> Scene {
    let mut scene = Scene::new(LOAD_VIEW_SIZE, Transform::IDENTITY);
    scene
        .path("M10 50 L20 30 L30 70 L40 30 L50 70 L60 30 L70 70 L80 30 L90 50", Style::LOAD)
        .text(50.0, 20.0, 8.0, "SEISMIC SPECTRUM", Style::LOAD_FILL);
    scene
}

fn wind_load() -> Scene {
    let mut scene = Scene::new(LOAD_VIEW_SIZE, Transform::IDENTITY);
    scene.path("M10 30 h40 M10 50 h60 M10 70 h40", Style::LOAD);
    for (x, y) in [(50, 33), (70, 53), (50, 73)] {
        scene.path(format!("M{x} {y} l5-3 l-5-3 z"), Style::LOAD_FILL);
    }
    scene.text(50.0, 20.0, 8.0, "WIND PRESSURE", Style::LOAD_FILL);
    scene
}
