// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elemental Property: attribute-reflected property schemas and storage.
//!
//! This crate holds the data side of a custom element: which properties an
//! element declares, which of them mirror an HTML attribute, how attribute
//! strings are coerced into values, and where each instance keeps its live
//! values. Event delivery lives in `elemental_channel`; lifecycle wiring in
//! `elemental`.
//!
//! ## Core Concepts
//!
//! ### Schemas
//!
//! A [`SchemaCompiler`] turns ordered `(name, default)` declarations into an
//! [`ElementSchema`]:
//!
//! - every property gets a kebab-case attribute name (`fooBar` → `foo-bar`),
//! - properties with a primitive default (`null`, boolean, number, string) are
//!   *observable*: their attributes go on the watch list,
//! - lists and records are stored but never watched.
//!
//! ### Coercion
//!
//! [`parse_attribute_value`] maps attribute strings to values: `""` → `true`,
//! canonical numerals → numbers, JSON-shaped text → parsed JSON, anything else
//! → the string itself.
//!
//! ### Storage
//!
//! [`PropertyBag`] stores one instance's values in declaration order and
//! reports observable changes from [`PropertyBag::set`].
//!
//! ## Quick Start
//!
//! ```rust
//! use elemental_property::{
//!     Assignment, PropertyBag, SchemaCompiler, parse_attribute_value, reflected_attribute,
//! };
//! use serde_json::json;
//!
//! let schema = SchemaCompiler::new()
//!     .compile([("label", json!("hi")), ("size", json!(null))])
//!     .unwrap();
//! assert_eq!(schema.observed_attributes(), ["label", "size"]);
//!
//! let mut bag = PropertyBag::new();
//! for property in schema.properties() {
//!     bag.define(property.name(), property.default_value().clone());
//! }
//!
//! // An attribute write arrives as a string and is coerced.
//! let size = parse_attribute_value("22");
//! assert_eq!(bag.set("size", size), Assignment::Changed(json!(null)));
//!
//! // Defaults reflect outward as strings.
//! assert_eq!(reflected_attribute(&json!(true)).as_deref(), Some(""));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod bag;
mod coerce;
mod name;
mod schema;
mod value;

pub use bag::{Assignment, PropertyBag};
pub use coerce::{parse_attribute_value, parse_optional_attribute};
pub use name::{DEFAULT_CACHE_CAPACITY, NameCache, to_attribute_name, to_property_name};
pub use schema::{ElementSchema, PropertySchema, SchemaCompiler, SchemaError};
pub use value::{
    Map, Value, format_number, is_observable, number_value, reflected_attribute, same_value,
};
