//! # symbols
//!
//! The persistent name → [`Value`] store an interpreter evaluates against.
//!
//! The table is seeded with four built-in constants (`pi`, `e`, `nan`, `inf`)
//! which can be read like any variable but never rebound. Once a name is bound,
//! the tag of its value (number or boolean) is fixed until [`SymbolTable::reset`].

use crate::value::Value;
use std::collections::HashMap;

/// Names that are seeded on construction and reset, and are write-protected.
pub const CONSTANTS: [&str; 4] = ["pi", "e", "nan", "inf"];

#[derive(Debug, Clone)]
pub struct SymbolTable {
    values: HashMap<String, Value>,
}

impl SymbolTable {
    /// Creates a table holding only the built-in constants.
    pub fn new() -> Self {
        let mut table = Self {
            values: HashMap::new(),
        };
        table.seed_constants();
        table
    }

    /// Drops every binding and re-seeds the constants.
    pub fn reset(&mut self) {
        self.values.clear();
        self.seed_constants();
    }

    fn seed_constants(&mut self) {
        self.values
            .insert("pi".to_string(), Value::Number(4.0 * 1.0_f64.atan()));
        self.values
            .insert("e".to_string(), Value::Number(1.0_f64.exp()));
        self.values.insert("nan".to_string(), Value::Number(f64::NAN));
        self.values
            .insert("inf".to_string(), Value::Number(f64::INFINITY));
    }

    pub fn is_constant(name: &str) -> bool {
        CONSTANTS.contains(&name)
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Binds `name` unconditionally. Callers enforce the creation and tag rules.
    pub fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// `(name, type, value)` rows sorted by name, as a front end would display them.
    pub fn rows(&self) -> Vec<(String, &'static str, String)> {
        let mut rows: Vec<_> = self
            .values
            .iter()
            .map(|(name, value)| (name.clone(), value.type_name(), value.to_string()))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
