// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property ↔ attribute name conversion.
//!
//! Property names are camelCase identifiers, attribute names are their
//! kebab-case counterparts: `fooBarBaz` ↔ `foo-bar-baz`. Both directions are
//! pure functions of their input, so results can be memoized by a
//! [`NameCache`] owned by whoever compiles schemas.

use alloc::string::String;
use hashbrown::HashMap;

/// Default number of entries each direction of a [`NameCache`] may hold.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Converts a camelCase property name to its kebab-case attribute name.
///
/// Every run of uppercase ASCII letters becomes a hyphen followed by the run
/// in lowercase. A `.` directly in front of such a run is dropped.
///
/// ```rust
/// use elemental_property::to_attribute_name;
///
/// assert_eq!(to_attribute_name("fooBarBaz"), "foo-bar-baz");
/// assert_eq!(to_attribute_name("fooURL"), "foo-url");
/// assert_eq!(to_attribute_name("foo"), "foo");
/// ```
#[must_use]
pub fn to_attribute_name(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    let mut chars = property.chars().peekable();
    let mut in_run = false;
    while let Some(c) = chars.next() {
        if c.is_ascii_uppercase() {
            if !in_run {
                out.push('-');
                in_run = true;
            }
            out.push(c.to_ascii_lowercase());
            continue;
        }
        in_run = false;
        if c == '.' && chars.peek().is_some_and(char::is_ascii_uppercase) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Converts a kebab-case attribute name back to a camelCase property name.
///
/// Each hyphen followed by a letter is removed and the letter uppercased.
/// This is the inverse of [`to_attribute_name`] for names without
/// consecutive uppercase letters; schemas store the exact pairing instead of
/// relying on this function.
///
/// ```rust
/// use elemental_property::to_property_name;
///
/// assert_eq!(to_property_name("foo-bar-baz"), "fooBarBaz");
/// assert_eq!(to_property_name("foo"), "foo");
/// ```
#[must_use]
pub fn to_property_name(attribute: &str) -> String {
    let mut out = String::with_capacity(attribute.len());
    let mut chars = attribute.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(next) = chars.next_if(char::is_ascii_alphabetic) {
                out.push(next.to_ascii_uppercase());
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Bounded memo table for name conversions in both directions.
///
/// Once a direction holds `capacity` entries, further names are converted
/// without being stored.
///
/// ```rust
/// use elemental_property::NameCache;
///
/// let mut cache = NameCache::new();
/// assert_eq!(cache.attribute_name("fooBar"), "foo-bar");
/// assert_eq!(cache.property_name("foo-bar"), "fooBar");
/// assert_eq!(cache.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct NameCache {
    to_attribute: HashMap<String, String>,
    to_property: HashMap<String, String>,
    capacity: usize,
}

impl Default for NameCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl NameCache {
    /// Creates a cache with [`DEFAULT_CACHE_CAPACITY`] entries per direction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache holding at most `capacity` entries per direction.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_attribute: HashMap::new(),
            to_property: HashMap::new(),
            capacity,
        }
    }

    /// Returns the attribute name for `property`, memoized.
    pub fn attribute_name(&mut self, property: &str) -> String {
        lookup(
            &mut self.to_attribute,
            self.capacity,
            property,
            to_attribute_name,
        )
    }

    /// Returns the property name for `attribute`, memoized.
    pub fn property_name(&mut self, attribute: &str) -> String {
        lookup(
            &mut self.to_property,
            self.capacity,
            attribute,
            to_property_name,
        )
    }

    /// Returns the total number of memoized conversions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_attribute.len() + self.to_property.len()
    }

    /// Returns `true` if nothing has been memoized yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every memoized conversion.
    pub fn clear(&mut self) {
        self.to_attribute.clear();
        self.to_property.clear();
    }
}

fn lookup(
    table: &mut HashMap<String, String>,
    capacity: usize,
    input: &str,
    convert: fn(&str) -> String,
) -> String {
    if let Some(hit) = table.get(input) {
        return hit.clone();
    }
    let converted = convert(input);
    if table.len() < capacity {
        table.insert(String::from(input), converted.clone());
    }
    converted
}
