// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless [`ElementHost`] for tests and non-browser targets.

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::content::Css;
use crate::host::{ElementHost, ShadowMode};

/// Snapshot of a [`MemoryHost`] shadow root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryShadow {
    /// Encapsulation mode the root was attached with.
    pub mode: ShadowMode,
    /// Serialized children.
    pub html: String,
    /// Applied styles, oldest first.
    pub styles: Vec<String>,
}

/// An element stand-in that keeps attributes and shadow content in memory.
///
/// Nodes, sheets and parents are plain strings: a node is its markup, a sheet
/// its source text and a parent its name. The host has no runtime behind it,
/// so [`Element`](crate::Element) delivers attribute callbacks itself.
///
/// ```rust
/// use elemental::{ElementHost, MemoryHost};
///
/// let host = MemoryHost::with_attributes([("size", "3")]);
/// host.set_attribute("label", "");
///
/// assert_eq!(host.get_attribute("size").as_deref(), Some("3"));
/// assert!(host.has_attribute("label"));
/// assert_eq!(host.attributes().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryHost {
    attributes: RefCell<Vec<(String, String)>>,
    parent: RefCell<Option<String>>,
    shadow: RefCell<Option<MemoryShadow>>,
}

impl MemoryHost {
    /// Creates a host with no attributes, no parent and no shadow root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host with the given attributes, as if parsed from markup.
    #[must_use]
    pub fn with_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let host = Self::new();
        for (name, value) in attributes {
            let (name, value): (String, String) = (name.into(), value.into());
            host.set_attribute(&name, &value);
        }
        host
    }

    /// Sets the parent reported to `mount` subscribers.
    pub fn set_parent(&self, parent: Option<&str>) {
        *self.parent.borrow_mut() = parent.map(String::from);
    }

    /// Returns every attribute in insertion order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.attributes.borrow().clone()
    }

    /// Returns a snapshot of the shadow root.
    #[must_use]
    pub fn shadow(&self) -> Option<MemoryShadow> {
        self.shadow.borrow().clone()
    }

    fn with_shadow(&self, f: impl FnOnce(&mut MemoryShadow)) {
        if let Some(shadow) = self.shadow.borrow_mut().as_mut() {
            f(shadow);
        }
    }
}

impl ElementHost for MemoryHost {
    type Parent = String;
    type Node = String;
    type Sheet = String;
    type Root = MemoryShadow;

    const DELIVERS_ATTRIBUTE_CALLBACKS: bool = false;

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut attributes = self.attributes.borrow_mut();
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => attributes.push((String::from(name), String::from(value))),
        }
    }

    fn remove_attribute(&self, name: &str) {
        self.attributes.borrow_mut().retain(|(n, _)| n != name);
    }

    fn parent(&self) -> Option<String> {
        self.parent.borrow().clone()
    }

    fn attach_shadow(&self, mode: ShadowMode) {
        let mut shadow = self.shadow.borrow_mut();
        if shadow.is_none() {
            *shadow = Some(MemoryShadow {
                mode,
                ..MemoryShadow::default()
            });
        }
    }

    fn shadow_root(&self) -> Option<MemoryShadow> {
        self.shadow()
    }

    fn set_shadow_html(&self, html: &str) {
        self.with_shadow(|shadow| {
            shadow.html.clear();
            shadow.html.push_str(html);
        });
    }

    fn append_shadow_node(&self, node: String) {
        self.with_shadow(|shadow| shadow.html.push_str(&node));
    }

    fn clear_shadow(&self) {
        self.with_shadow(|shadow| shadow.html.clear());
    }

    fn apply_styles(&self, css: Css<String, String>) {
        match css {
            Css::Text(text) | Css::Sheet(text) | Css::Element(text) => {
                self.with_shadow(|shadow| shadow.styles.push(text));
            }
            Css::List(items) => {
                for item in items {
                    self.apply_styles(item);
                }
            }
        }
    }
}
