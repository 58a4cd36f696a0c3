use serde_json::json;

use super::*;
use crate::bag::bag_from_value;

#[test]
fn known_types_resolve_to_their_kind() {
    let registry = Registry::standard();
    for kind in ComponentKind::ALL {
        let def = registry.lookup(kind.as_str());
        assert_eq!(def.name(), kind.as_str());
        assert_eq!(def.kind(), Some(kind));
    }
}

#[test]
fn unknown_types_fall_back_to_pending() {
    let registry = Registry::standard();
    for name in ["", "beam", "Truss", "Default", "Retaining  Wall", "🚧"] {
        let def = registry.lookup(name);
        assert_eq!(def.name(), DEFAULT_KEY);
        assert_eq!(def.kind(), None);
        assert!(def.render(&PropertyBag::new()).to_svg().contains("TYPE VISUALIZATION PENDING"));
        assert_eq!(def.form(&PropertyBag::new()).notice, Some(NO_PROPERTIES));
    }
}

#[test]
fn pending_rejects_edits() {
    let def = Registry::standard().lookup("Truss");
    assert!(matches!(def.edit(&PropertyBag::new(), "x", "1"), Err(EditError::NotEditable(_))));
}

#[test]
fn render_tolerates_foreign_bags() {
    let wall_bag = bag_from_value(json!({"wallHeight": 9, "hasKey": true}));
    let scene = Registry::standard().lookup("Beam").render(&wall_bag);
    assert!(!scene.shapes.is_empty());
}

#[test]
fn standard_has_every_kind() {
    let keys: Vec<_> = Registry::standard().keys().collect();
    assert_eq!(keys.len(), ComponentKind::ALL.len());
    assert!(Registry::standard().contains("Wind Load"));
    assert!(!Registry::standard().contains(DEFAULT_KEY));
}

#[test]
fn builder_rejects_duplicates() {
    let Err(err) = Registry::builder()
        .register(Box::new(KindDefinition(ComponentKind::Beam)))
        .and_then(|b| b.register(Box::new(KindDefinition(ComponentKind::Beam))))
    else {
        panic!("expected duplicate");
    };
    assert_eq!(err, RegistryError::Duplicate("Beam".into()));
}

#[test]
fn builder_rejects_missing_kinds() {
    let Ok(builder) = Registry::builder().register(Box::new(KindDefinition(ComponentKind::Beam))) else {
        panic!("first registration failed");
    };
    let err = builder.build().unwrap_err();
    assert_eq!(err, RegistryError::Missing(ComponentKind::Column));
}

struct Misnamed;

impl ComponentDefinition for Misnamed {
    fn name(&self) -> &str {
        "Girder"
    }
    fn defaults(&self) -> PropertyBag {
        PropertyBag::new()
    }
    fn form(&self, _bag: &PropertyBag) -> Form {
        Form::default()
    }
    fn edit(&self, bag: &PropertyBag, _field: &str, _input: &str) -> Result<PropertyBag, EditError> {
        Ok(bag.clone())
    }
    fn render(&self, _bag: &PropertyBag) -> Scene {
        visualize::pending()
    }
    fn kind(&self) -> Option<ComponentKind> {
        Some(ComponentKind::Beam)
    }
}

#[test]
fn builder_rejects_name_mismatch() {
    let Err(err) = Registry::builder().register(Box::new(Misnamed)) else {
        panic!("expected mismatch");
    };
    assert_eq!(err, RegistryError::NameMismatch { name: "Girder".into(), kind: ComponentKind::Beam });
}

#[test]
fn builder_accepts_full_table() {
    let mut builder = Registry::builder();
    for kind in ComponentKind::ALL {
        let Ok(next) = builder.register(Box::new(KindDefinition(kind))) else {
            panic!("{kind} rejected");
        };
        builder = next;
    }
    let registry = builder.build().unwrap();
    assert_eq!(registry.lookup("Column").name(), "Column");
    assert_eq!(registry.lookup("Pillar").name(), DEFAULT_KEY);
}

#[test]
fn defaults_round_trip_through_edit() {
    let def = Registry::standard().lookup("Spread Footing");
    let bag = def.edit(&def.defaults(), "size", "8").unwrap();
    assert_eq!(bag.get("size"), Some(&json!(8.0)));
}
