use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// One class's student records, keyed by student name.
///
/// Records are arbitrary JSON objects. The chart subsystem stores score
/// fields in them; this layer only interprets the `avatar` field and must
/// carry everything else through serialization untouched, in insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassData(Map<String, Value>);

impl ClassData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds class data from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Adds a student with no avatar of their own.
    pub fn add_student(&mut self, name: impl Into<String>) {
        self.0.insert(name.into(), json!({ "avatar": null }));
    }

    /// Adds or replaces a student's full record.
    pub fn insert_student(&mut self, name: impl Into<String>, record: Value) {
        self.0.insert(name.into(), record);
    }

    pub fn get(&self, student: &str) -> Option<&Value> {
        self.0.get(student)
    }

    /// Student names in insertion order.
    pub fn student_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The student's avatar file name, or `None` when the record has a null
    /// or missing avatar field and the default image applies.
    pub fn avatar_for(&self, student: &str) -> Option<&str> {
        self.0.get(student)?.get("avatar")?.as_str()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Numbered student menu for one class: `{1: first student, 2: second, …}`,
/// following the roster's insertion order. Built fresh per display.
pub fn student_listing(data: &ClassData) -> BTreeMap<usize, String> {
    data.student_names()
        .enumerate()
        .map(|(i, name)| (i + 1, name.to_string()))
        .collect()
}
