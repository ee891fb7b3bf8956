//! Purpose: Collect the distinct (key, value type) pairs of a scene's `objects` entries.
//! Exports: `TypeTag`, `KeyTypePair`, `ObservedPairs`, `objects_field`, `scan_objects`, `scan_document`.
//! Role: Pure scanner over a parsed document; no I/O.
//! Invariants: Pairs are deduplicated and iterate in ascending (key, tag name) order.
//! Invariants: Non-object entries and absent/falsy `objects` never produce errors.
use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

/// Stable label for the kind of a JSON value.
///
/// Variants are declared in alphabetical order of their labels, so the
/// derived `Ord` sorts tags by name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TypeTag {
    Array,
    Boolean,
    Null,
    Number,
    Object,
    String,
}

impl TypeTag {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Object(_) => TypeTag::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Array => "array",
            TypeTag::Boolean => "boolean",
            TypeTag::Null => "null",
            TypeTag::Number => "number",
            TypeTag::Object => "object",
            TypeTag::String => "string",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct KeyTypePair {
    pub key: String,
    pub tag: TypeTag,
}

impl KeyTypePair {
    pub fn new(key: impl Into<String>, tag: TypeTag) -> Self {
        Self {
            key: key.into(),
            tag,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ObservedPairs {
    pairs: BTreeSet<KeyTypePair>,
}

impl ObservedPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the pair was already present.
    pub fn insert(&mut self, pair: KeyTypePair) -> bool {
        self.pairs.insert(pair)
    }

    pub fn contains(&self, key: &str, tag: TypeTag) -> bool {
        self.pairs.contains(&KeyTypePair::new(key, tag))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyTypePair> {
        self.pairs.iter()
    }
}

/// Returns the `objects` entries, or `None` when the field is absent or falsy.
///
/// A truthy `objects` that is not an array yields no entries.
pub fn objects_field(document: &Value) -> Option<&[Value]> {
    let objects = document.get("objects")?;
    if is_falsy(objects) {
        return None;
    }
    match objects {
        Value::Array(items) => Some(items.as_slice()),
        other => {
            tracing::debug!(tag = %TypeTag::of(other), "objects field is not an array");
            Some(&[])
        }
    }
}

pub fn scan_objects(entries: &[Value]) -> ObservedPairs {
    let mut observed = ObservedPairs::new();
    for (idx, entry) in entries.iter().enumerate() {
        let Value::Object(map) = entry else {
            tracing::trace!(idx, tag = %TypeTag::of(entry), "skipping non-object entry");
            continue;
        };
        for (key, value) in map {
            observed.insert(KeyTypePair::new(key.as_str(), TypeTag::of(value)));
        }
    }
    tracing::debug!(
        entries = entries.len(),
        pairs = observed.len(),
        "scanned objects"
    );
    observed
}

pub fn scan_document(document: &Value) -> ObservedPairs {
    match objects_field(document) {
        Some(entries) => scan_objects(entries),
        None => ObservedPairs::new(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(num) => num.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyTypePair, TypeTag, objects_field, scan_document};
    use serde_json::{Value, json};

    fn collect(document: &Value) -> Vec<(String, &'static str)> {
        scan_document(document)
            .iter()
            .map(|pair| (pair.key.clone(), pair.tag.as_str()))
            .collect()
    }

    #[test]
    fn absent_null_or_empty_objects_yield_nothing() {
        for document in [
            json!({}),
            json!({"objects": null}),
            json!({"objects": []}),
            json!({"objects": false}),
            json!({"objects": ""}),
            json!({"objects": 0}),
            json!({"objects": -0.0}),
            json!({"objects": {}}),
            json!([1, 2, 3]),
        ] {
            assert!(objects_field(&document).is_none());
            assert!(collect(&document).is_empty());
        }
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let document = json!({"objects": [1, "two", [3], null, true]});
        assert!(scan_document(&document).is_empty());
    }

    #[test]
    fn truthy_non_array_objects_yield_nothing() {
        for document in [
            json!({"objects": {"a": 1}}),
            json!({"objects": 5}),
            json!({"objects": -1.5}),
            json!({"objects": "text"}),
            json!({"objects": true}),
        ] {
            assert_eq!(objects_field(&document).map(<[Value]>::len), Some(0));
            assert!(scan_document(&document).is_empty());
        }
    }

    #[test]
    fn pairs_are_sorted_by_key() {
        let document = json!({"objects": [{"b": "x", "a": 1}, {"a": 2}]});
        assert_eq!(
            collect(&document),
            vec![("a".to_string(), "number"), ("b".to_string(), "string")]
        );
    }

    #[test]
    fn duplicate_pairs_appear_once() {
        let document = json!({"objects": [{"a": 1}, {"a": 2.5}, {"a": -7}]});
        let observed = scan_document(&document);
        assert_eq!(observed.len(), 1);
        assert!(observed.contains("a", TypeTag::Number));
    }

    #[test]
    fn same_key_with_different_types_yields_one_pair_per_type() {
        let document = json!({"objects": [{"a": "x"}, {"a": 1}, {"a": null}]});
        assert_eq!(
            collect(&document),
            vec![
                ("a".to_string(), "null"),
                ("a".to_string(), "number"),
                ("a".to_string(), "string"),
            ]
        );
    }

    #[test]
    fn every_tag_is_recognized() {
        let document = json!({"objects": [{
            "n": null,
            "b": false,
            "i": 3,
            "s": "s",
            "l": [],
            "o": {}
        }]});
        let observed = scan_document(&document);
        assert!(observed.contains("n", TypeTag::Null));
        assert!(observed.contains("b", TypeTag::Boolean));
        assert!(observed.contains("i", TypeTag::Number));
        assert!(observed.contains("s", TypeTag::String));
        assert!(observed.contains("l", TypeTag::Array));
        assert!(observed.contains("o", TypeTag::Object));
    }

    #[test]
    fn tag_order_follows_label_order() {
        let mut tags = [
            TypeTag::String,
            TypeTag::Object,
            TypeTag::Number,
            TypeTag::Null,
            TypeTag::Boolean,
            TypeTag::Array,
        ];
        tags.sort();
        let labels: Vec<&str> = tags.iter().map(|tag| tag.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut observed = super::ObservedPairs::new();
        assert!(observed.insert(KeyTypePair::new("id", TypeTag::Number)));
        assert!(!observed.insert(KeyTypePair::new("id", TypeTag::Number)));
        assert_eq!(observed.len(), 1);
    }
}
