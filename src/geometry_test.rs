#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn bag(value: serde_json::Value) -> PropertyBag {
    bag_from_value(value)
}

#[test]
fn defaults_match_kind() {
    for kind in ComponentKind::ALL {
        assert_eq!(Geometry::defaults(kind).kind(), kind);
    }
}

#[test]
fn retaining_wall_defaults() {
    let Geometry::RetainingWall(w) = Geometry::defaults(ComponentKind::RetainingWall) else {
        panic!("expected retaining wall");
    };
    assert_eq!(w.length, 10.0);
    assert_eq!(w.wall_height, 5.0);
    assert_eq!(w.wall_thickness, 12.0);
    assert_eq!(w.toe_length, 2.0);
    assert_eq!(w.heel_length, 4.0);
    assert_eq!(w.footing_thickness, 12.0);
    assert!(w.has_key);
}

#[test]
fn partial_bag_keeps_given_fields_and_defaults_the_rest() {
    let b = bag(json!({"wallHeight": 8, "hasKey": false}));
    let Geometry::RetainingWall(w) = Geometry::from_bag(ComponentKind::RetainingWall, &b) else {
        panic!("expected retaining wall");
    };
    assert_eq!(w.wall_height, 8.0);
    assert!(!w.has_key);
    assert_eq!(w.heel_length, 4.0);
}

#[test]
fn foreign_bag_is_read_with_defaults() {
    // A retaining wall bag shown under a beam still yields a complete beam.
    let b = Geometry::defaults(ComponentKind::RetainingWall).to_bag();
    let Geometry::Beam(beam) = Geometry::from_bag(ComponentKind::Beam, &b) else {
        panic!("expected beam");
    };
    assert_eq!(beam.length, 10.0);
    assert_eq!(beam.depth, 24.0);
    assert_eq!(beam.material, BeamMaterial::HotRolledSteel);
}

#[test]
fn unknown_material_falls_back_to_default() {
    let b = bag(json!({"materialType": "Bamboo"}));
    let Geometry::Beam(beam) = Geometry::from_bag(ComponentKind::Beam, &b) else {
        panic!("expected beam");
    };
    assert_eq!(beam.material, BeamMaterial::HotRolledSteel);
}

#[test]
fn to_bag_then_from_bag_preserves_edits() {
    let mut w = RetainingWall::default();
    w.wall_height = -3.0;
    w.key_width = 0.0;
    let g = Geometry::RetainingWall(w);
    assert_eq!(Geometry::from_bag(ComponentKind::RetainingWall, &g.to_bag()), g);
}

#[test]
fn seismic_keys_are_upper_case() {
    let b = Geometry::defaults(ComponentKind::SeismicLoad).to_bag();
    assert_eq!(b.get("SDS"), Some(&json!(1.0)));
    assert_eq!(b.get("SD1"), Some(&json!(0.6)));
}

#[test]
fn beam_summary_follows_material() {
    let mut beam = Beam::default();
    assert_eq!(beam.summary(), "W8x10 (A992)");
    beam.material = BeamMaterial::Wood;
    assert_eq!(beam.summary(), "Douglas Fir-Larch");
    beam.material = BeamMaterial::Concrete;
    assert_eq!(beam.summary(), "4000 psi");
    beam.material = BeamMaterial::Aluminum;
    assert_eq!(beam.summary(), "Aluminum");
}
