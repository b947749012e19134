//! Insertion-ordered constant table.
//!
//! The table owns the duplicate policy: the first definition of a name wins. A later definition with a different
//! rendered value is dropped with a warning; one with the same rendered value is dropped silently. The table never
//! overwrites, so declaration lists can be layered by prepending overrides.

use defconst_core::{ConstValue, ValueKind};
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::frontend::diagnostics::{Diagnostics, errors};

/// A validated, immutable constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    name: String,
    value: ConstValue,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: ConstValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn value(&self) -> &ConstValue {
        &self.value
    }

    /// Canonical literal text; see [`ConstValue::rendered`].
    pub fn rendered(&self) -> String {
        self.value.rendered()
    }
}

/// What [`ConstantTable::insert`] did with a constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// First definition of the name; stored
    Inserted,
    /// Same name, same rendered value; dropped silently
    Redeclared,
    /// Same name, different rendered value; dropped with a warning
    Conflict,
}

/// Name → constant, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantTable {
    constants: IndexMap<String, Constant>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a constant unless its name is already present.
    pub fn insert(&mut self, constant: Constant, diagnostics: &mut Diagnostics) -> Insertion {
        match self.constants.entry(constant.name.clone()) {
            Entry::Vacant(slot) => {
                tracing::debug!("Created constant '{}' = {}", constant.name, constant.rendered());
                slot.insert(constant);
                Insertion::Inserted
            }
            Entry::Occupied(existing) => {
                let existing_rendered = existing.get().rendered();
                let new_rendered = constant.rendered();
                if existing_rendered == new_rendered {
                    Insertion::Redeclared
                } else {
                    diagnostics.push(errors::duplicate(&constant.name, &existing_rendered, &new_rendered));
                    Insertion::Conflict
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Constant> {
        self.constants.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    /// Constants in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Constant> {
        self.constants.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constants.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConstantTable {
    type Item = &'a Constant;
    type IntoIter = indexmap::map::Values<'a, String, Constant>;

    fn into_iter(self) -> Self::IntoIter {
        self.constants.values()
    }
}
