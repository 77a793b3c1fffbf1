// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element schemas: declared properties, their attributes, and the watch list.
//!
//! A [`SchemaCompiler`] turns an ordered list of `(property, default)` pairs
//! into an [`ElementSchema`]. The schema is computed once per element
//! definition and shared read-only by all of its instances.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::name::NameCache;
use crate::value::{Value, is_observable};

/// Errors raised while compiling a schema.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A property was declared with an empty name.
    #[error("property names must not be empty")]
    EmptyName,
    /// The same property name was declared twice.
    #[error("property `{0}` is declared more than once")]
    DuplicateProperty(String),
    /// Two property names map to the same attribute name.
    #[error("properties `{first}` and `{second}` both reflect to attribute `{attribute}`")]
    AttributeCollision {
        /// The shared attribute name.
        attribute: String,
        /// The property declared first.
        first: String,
        /// The property declared second.
        second: String,
    },
}

/// One declared property.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertySchema {
    name: String,
    attribute: String,
    default: Value,
    observable: bool,
}

impl PropertySchema {
    /// Returns the property name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kebab-case attribute name.
    #[must_use]
    #[inline]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns the canonical default value.
    ///
    /// Instances clone this at initialization; it is never mutated.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Returns `true` if the attribute is watched for changes.
    #[must_use]
    #[inline]
    pub fn observable(&self) -> bool {
        self.observable
    }
}

/// The compiled property table of one element definition.
///
/// # Example
///
/// ```rust
/// use elemental_property::SchemaCompiler;
/// use serde_json::json;
///
/// let schema = SchemaCompiler::new()
///     .compile([("fooBar", json!("a")), ("items", json!([1, 2]))])
///     .unwrap();
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.by_attribute("foo-bar").map(|p| p.name()), Some("fooBar"));
/// // Lists are never watched.
/// assert_eq!(schema.observed_attributes(), ["foo-bar"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ElementSchema {
    properties: Vec<PropertySchema>,
    by_name: HashMap<String, usize>,
    by_attribute: HashMap<String, usize>,
    observed: Vec<String>,
}

impl ElementSchema {
    /// Returns an empty schema.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the declared properties in declaration order.
    #[must_use]
    #[inline]
    pub fn properties(&self) -> &[PropertySchema] {
        &self.properties
    }

    /// Returns the number of declared properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if no properties are declared.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertySchema> {
        self.index_of(name).map(|i| &self.properties[i])
    }

    /// Returns the declaration index of a property.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Looks up a property by its attribute name.
    #[must_use]
    pub fn by_attribute(&self, attribute: &str) -> Option<&PropertySchema> {
        self.by_attribute
            .get(attribute)
            .map(|&i| &self.properties[i])
    }

    /// Returns the attribute names the host runtime must watch.
    ///
    /// Only properties with a primitive default appear here. The list is fixed
    /// at compile time, whatever values the properties take later.
    #[must_use]
    #[inline]
    pub fn observed_attributes(&self) -> &[String] {
        &self.observed
    }

    /// Returns `true` if `attribute` is on the watch list.
    #[must_use]
    pub fn is_observed(&self, attribute: &str) -> bool {
        self.by_attribute(attribute).is_some_and(PropertySchema::observable)
    }
}

/// Compiles default-property declarations into [`ElementSchema`]s.
///
/// The compiler owns the [`NameCache`] used for attribute names, so several
/// definitions compiled by one compiler share conversions without any
/// process-wide state.
#[derive(Clone, Debug, Default)]
pub struct SchemaCompiler {
    names: NameCache,
}

impl SchemaCompiler {
    /// Creates a compiler with a default-sized name cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compiler whose name cache holds at most `capacity` entries per direction.
    #[must_use]
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            names: NameCache::with_capacity(capacity),
        }
    }

    /// Returns the compiler's name cache.
    #[must_use]
    pub fn names(&mut self) -> &mut NameCache {
        &mut self.names
    }

    /// Compiles `(name, default)` pairs, keeping their order.
    pub fn compile<I, K>(&mut self, defaults: I) -> Result<ElementSchema, SchemaError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut schema = ElementSchema::default();
        for (name, default) in defaults {
            let name: String = name.into();
            if name.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if schema.by_name.contains_key(&name) {
                return Err(SchemaError::DuplicateProperty(name));
            }
            let attribute = self.names.attribute_name(&name);
            if let Some(&existing) = schema.by_attribute.get(&attribute) {
                return Err(SchemaError::AttributeCollision {
                    attribute,
                    first: schema.properties[existing].name.clone(),
                    second: name,
                });
            }

            let index = schema.properties.len();
            let observable = is_observable(&default);
            if observable {
                schema.observed.push(attribute.clone());
            }
            schema.by_name.insert(name.clone(), index);
            schema.by_attribute.insert(attribute.clone(), index);
            schema.properties.push(PropertySchema {
                name,
                attribute,
                default,
                observable,
            });
        }
        Ok(schema)
    }
}
