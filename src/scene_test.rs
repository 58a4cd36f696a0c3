use super::*;

#[test]
fn num_trims_and_rounds() {
    assert_eq!(Num(10.0).to_string(), "10");
    assert_eq!(Num(1.5).to_string(), "1.5");
    assert_eq!(Num(0.1 + 0.2).to_string(), "0.3");
    assert_eq!(Num(2.0 / 3.0).to_string(), "0.667");
}

#[test]
fn num_normalizes_negative_zero_and_non_finite() {
    assert_eq!(Num(-0.0).to_string(), "0");
    assert_eq!(Num(-0.0001).to_string(), "0");
    assert_eq!(Num(f64::NAN).to_string(), "0");
    assert_eq!(Num(-12.5).to_string(), "-12.5");
}

#[test]
fn svg_has_viewbox_and_aspect() {
    let scene = Scene::new(VIEW_SIZE, Transform::centered(1.5));
    let svg = scene.to_svg();
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"viewBox="0 0 400 400""#));
    assert!(svg.contains(r#"preserveAspectRatio="xMidYMid meet""#));
    assert!(svg.contains(r#"transform="translate(200,200) scale(1.5)""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn shapes_serialize_in_order() {
    let mut scene = Scene::new(VIEW_SIZE, Transform::IDENTITY);
    scene
        .rect(-100.0, -10.0, 200.0, 20.0, Style::MEMBER)
        .line(0.0, 0.0, 5.0, 5.0, Style::SOIL);
    let svg = scene.to_svg();
    let rect = svg.find("<rect").unwrap();
    let line = svg.find("<line").unwrap();
    assert!(rect < line);
    assert!(svg.contains(
        r##"<rect x="-100" y="-10" width="200" height="20" fill="#f1f3f6" stroke="#adb5bd" stroke-width="1"/>"##
    ));
}

#[test]
fn text_is_escaped() {
    let mut scene = Scene::new(100.0, Transform::IDENTITY);
    scene.text(50.0, 90.0, 6.0, "A<B & \"C\"", Style::CAPTION);
    let svg = scene.to_svg();
    assert!(svg.contains("A&lt;B &amp; &quot;C&quot;"));
    assert!(!svg.contains("stroke-width"));
}

#[test]
fn scene_serializes_to_json_with_shape_tags() {
    let mut scene = Scene::new(VIEW_SIZE, Transform::IDENTITY);
    scene.path("M0,0 l-5,10 h10 z", Style::OUTLINE);
    let value = serde_json::to_value(&scene).unwrap();
    assert_eq!(value["viewSize"], 400.0);
    assert_eq!(value["shapes"][0]["shape"], "path");
    assert_eq!(value["shapes"][0]["style"]["strokeWidth"], 1.0);
}
