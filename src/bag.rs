//! Untyped property bags and typed read access into them.
//!
//! The detail view holds component geometry as a loose JSON object. Readers
//! never fail on it: a missing or mistyped key yields the caller's default.

use serde_json::{Map, Value};

/// Loose key/value map describing one component's geometry and material.
pub type PropertyBag = Map<String, Value>;

/// Typed access to fields of a [`PropertyBag`].
pub struct Props<'a> {
    bag: &'a PropertyBag,
}

impl<'a> Props<'a> {
    #[must_use]
    pub fn new(bag: &'a PropertyBag) -> Self {
        Self { bag }
    }

    /// Numeric field, or `default` when absent, non-numeric or non-finite.
    #[must_use]
    pub fn number(&self, key: &str, default: f64) -> f64 {
        self.bag
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    /// Boolean field, or `default` when absent or not a boolean.
    #[must_use]
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.bag.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// String field, or `default` when absent or not a string.
    #[must_use]
    pub fn text(&self, key: &str, default: &str) -> String {
        self.bag
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_owned()
    }
}

/// Build a bag from a JSON value, discarding anything that is not an object.
#[must_use]
pub fn bag_from_value(value: Value) -> PropertyBag {
    match value {
        Value::Object(map) => map,
        _ => PropertyBag::new(),
    }
}
