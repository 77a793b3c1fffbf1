// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance property storage.
//!
//! A [`PropertyBag`] holds the live value of every property of one element
//! instance. Declared properties are installed as *accessor* slots, whose
//! writes report changes so the owner can notify subscribers. Deleting a slot
//! removes it entirely; writing the name again creates a *plain* slot that
//! stores silently, like an ordinary object field.
//!
//! # Implementation
//!
//! Slots live in insertion order in a `SmallVec` and are found by linear
//! scan. Enumeration order is part of the contract (it mirrors object key
//! order), and elements rarely declare more than a handful of properties.

use alloc::string::String;
use smallvec::SmallVec;

use crate::value::{Value, same_value};

/// Most elements declare fewer than 8 properties.
const INLINE_CAPACITY: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SlotKind {
    Accessor,
    Plain,
}

#[derive(Clone, Debug)]
struct Slot {
    name: String,
    value: Value,
    kind: SlotKind,
}

/// Result of [`PropertyBag::set`].
#[derive(Clone, Debug, PartialEq)]
pub enum Assignment {
    /// An accessor slot took a different value; carries the previous one.
    Changed(Value),
    /// An accessor slot was written with a value equal to its current one.
    Unchanged,
    /// A plain slot was written (or created). Plain writes are never reported.
    Plain,
}

impl Assignment {
    /// Returns the previous value if the write was an observable change.
    #[must_use]
    pub fn into_changed(self) -> Option<Value> {
        match self {
            Self::Changed(old) => Some(old),
            Self::Unchanged | Self::Plain => None,
        }
    }
}

/// Ordered name → value storage for one element instance.
///
/// # Example
///
/// ```rust
/// use elemental_property::{Assignment, PropertyBag};
/// use serde_json::json;
///
/// let mut bag = PropertyBag::new();
/// bag.define("foo", json!("bar"));
///
/// assert_eq!(bag.set("foo", json!("baz")), Assignment::Changed(json!("bar")));
/// assert_eq!(bag.set("foo", json!("baz")), Assignment::Unchanged);
///
/// assert!(bag.delete("foo"));
/// assert_eq!(bag.get("foo"), None);
///
/// // The accessor is gone; the name now behaves like a plain field.
/// assert_eq!(bag.set("foo", json!(1)), Assignment::Plain);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropertyBag {
    slots: SmallVec<[Slot; INLINE_CAPACITY]>,
}

impl PropertyBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name == name)
    }

    /// Installs an accessor slot for `name` holding `value`.
    ///
    /// An existing slot with the same name is converted in place, keeping its
    /// enumeration position.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => {
                let slot = &mut self.slots[idx];
                slot.value = value;
                slot.kind = SlotKind::Accessor;
            }
            None => self.slots.push(Slot {
                name,
                value,
                kind: SlotKind::Accessor,
            }),
        }
    }

    /// Returns the current value of `name`, or `None` if there is no slot.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|idx| &self.slots[idx].value)
    }

    /// Writes `value` to `name`.
    ///
    /// Accessor slots store the new value only if it differs from the old one,
    /// so an equal write keeps the stored form (`22` stays `22` after writing
    /// `22.0`). Missing names get a new plain slot at the end.
    pub fn set(&mut self, name: &str, value: Value) -> Assignment {
        let Some(idx) = self.position(name) else {
            self.slots.push(Slot {
                name: String::from(name),
                value,
                kind: SlotKind::Plain,
            });
            return Assignment::Plain;
        };
        let slot = &mut self.slots[idx];
        match slot.kind {
            SlotKind::Plain => {
                slot.value = value;
                Assignment::Plain
            }
            SlotKind::Accessor => {
                if same_value(&slot.value, &value) {
                    return Assignment::Unchanged;
                }
                Assignment::Changed(core::mem::replace(&mut slot.value, value))
            }
        }
    }

    /// Removes the slot for `name`.
    ///
    /// Returns `true` if a slot was removed. Deleting a missing name is a no-op.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.slots.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `name` has a slot.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns `true` if `name` is an accessor slot.
    #[must_use]
    pub fn is_accessor(&self, name: &str) -> bool {
        self.position(name)
            .is_some_and(|idx| self.slots[idx].kind == SlotKind::Accessor)
    }

    /// Returns the slot names in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Returns `(name, value)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.slots.iter().map(|slot| (slot.name.as_str(), &slot.value))
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the bag has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use serde_json::json;

    fn bag() -> PropertyBag {
        let mut bag = PropertyBag::new();
        bag.define("foo", json!("a"));
        bag.define("bar", json!(1));
        bag
    }

    #[test]
    fn define_and_get() {
        let bag = bag();
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get("foo"), Some(&json!("a")));
        assert_eq!(bag.get("bar"), Some(&json!(1)));
        assert_eq!(bag.get("baz"), None);
        assert!(bag.is_accessor("foo"));
    }

    #[test]
    fn accessor_reports_changes_only() {
        let mut bag = bag();
        assert_eq!(bag.set("foo", json!("b")), Assignment::Changed(json!("a")));
        assert_eq!(bag.get("foo"), Some(&json!("b")));
        assert_eq!(bag.set("foo", json!("b")), Assignment::Unchanged);
        assert_eq!(bag.set("bar", json!(1.0)), Assignment::Unchanged);
        assert_eq!(bag.set("bar", json!(2)).into_changed(), Some(json!(1)));
    }

    #[test]
    fn structural_values_compare_by_content() {
        let mut bag = PropertyBag::new();
        bag.define("items", json!([1, 2, 3]));
        assert_eq!(bag.set("items", json!([1, 2, 3])), Assignment::Unchanged);
        assert_eq!(
            bag.set("items", json!([1, 2, 3, 4])),
            Assignment::Changed(json!([1, 2, 3]))
        );
    }

    #[test]
    fn delete_then_write_creates_plain_slot_at_end() {
        let mut bag = bag();
        assert!(bag.delete("foo"));
        assert!(!bag.delete("foo"));
        assert_eq!(bag.get("foo"), None);
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["bar"]);

        assert_eq!(bag.set("foo", json!("x")), Assignment::Plain);
        assert_eq!(bag.set("foo", json!("y")), Assignment::Plain);
        assert_eq!(bag.get("foo"), Some(&json!("y")));
        assert!(!bag.is_accessor("foo"));
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["bar", "foo"]);
    }

    #[test]
    fn define_converts_plain_slot_in_place() {
        let mut bag = PropertyBag::new();
        assert_eq!(bag.set("foo", json!(1)), Assignment::Plain);
        bag.set("other", json!(2));
        bag.define("foo", json!("default"));
        assert!(bag.is_accessor("foo"));
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["foo", "other"]);
        assert_eq!(bag.get("foo"), Some(&json!("default")));
    }

    #[test]
    fn iter_pairs() {
        let bag = bag();
        let pairs: Vec<_> = bag.iter().collect();
        assert_eq!(pairs, vec![("foo", &json!("a")), ("bar", &json!(1))]);
    }
}
