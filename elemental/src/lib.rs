// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elemental: custom elements with attribute-reflected properties.
//!
//! An element is defined once, by tag, from an ordered list of default
//! properties and an initializer. Every instance then gets:
//!
//! - one property per default, kept in sync with a kebab-case attribute:
//!   attributes present at first connection win over defaults, primitive
//!   defaults are written out as attributes, and later changes to observed
//!   attributes flow back into properties,
//! - a per-instance event channel with `mount`, `unmount`, `prop` and `attr`
//!   categories and keyed topics like `"prop:fooBar"`,
//! - a shadow root filled from whatever the initializer returns.
//!
//! The custom element runtime itself stays behind the [`ElementHost`] trait.
//! [`MemoryHost`] is a headless implementation used for tests; browser hosts
//! live in `elemental_web`.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use elemental::{Handler, MemoryHost, Registry, Value};
//! use serde_json::json;
//!
//! let mut registry = Registry::<MemoryHost>::new();
//! let counter = registry
//!     .define("x-counter", [("count", json!(0)), ("step", json!(1))], |element| {
//!         format!("<span>{}</span>", element.get("count").unwrap())
//!     })
//!     .unwrap();
//!
//! let element = counter.create(MemoryHost::with_attributes([("step", "5")]));
//! assert_eq!(element.get("count"), None);
//!
//! element.connected();
//! assert_eq!(element.get("step"), Some(json!(5)));
//! assert_eq!(element.get_attribute("count").as_deref(), Some("0"));
//! assert_eq!(element.html().unwrap().html, "<span>0</span>");
//!
//! let log: Rc<RefCell<Vec<(String, Value)>>> = Rc::default();
//! let sink = log.clone();
//! element
//!     .subscribe("prop", Handler::prop(move |name, new, _old| {
//!         sink.borrow_mut().push((name.to_owned(), new.clone()));
//!     }))
//!     .unwrap();
//!
//! element.set("count", 1);
//! element.set("count", 1);
//! element.set_attribute("step", "10");
//!
//! assert_eq!(
//!     *log.borrow(),
//!     [("count".to_owned(), json!(1)), ("step".to_owned(), json!(10))]
//! );
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `debug`/`trace` events for definitions, initialization
//!   and ignored attribute callbacks through the `tracing` facade.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod content;
mod definition;
mod element;
mod events;
mod host;
mod memory;

pub use content::{Content, Css, IntoContent};
pub use definition::{
    DefineError, DefinitionOptions, ElementDefinition, Initializer, Registry,
    is_valid_custom_element_name,
};
pub use element::Element;
pub use events::{
    AttrCallback, AttrKeyCallback, EventChannel, Handler, KeyedCallback, MountCallback,
    PropCallback, PropKeyCallback, UnmountCallback, filter_by,
};
pub use host::{ElementHost, ShadowMode};
pub use memory::{MemoryHost, MemoryShadow};

pub use elemental_channel::{Channel, Subscription, Topic};
pub use elemental_property::{ElementSchema, PropertySchema, SchemaCompiler, SchemaError, Value};
