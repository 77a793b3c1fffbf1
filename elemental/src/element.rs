// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element instances: property reflection and lifecycle.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use elemental_channel::Subscription;
use elemental_property::{
    ElementSchema, PropertyBag, Value, parse_attribute_value, parse_optional_attribute,
    reflected_attribute,
};

use crate::content::{Content, Css};
use crate::definition::ElementDefinition;
use crate::events::{EventChannel, Handler};
use crate::host::ElementHost;

/// One live instance of a defined element.
///
/// An element starts out uninitialized: it has no properties and every read
/// returns `None`. The first call to [`connected`](Self::connected) runs the
/// one-time setup:
///
/// 1. each declared property takes its attribute value if the attribute is
///    present (coerced), or a copy of its default otherwise, and primitive
///    defaults are reflected outward as attributes,
/// 2. the shadow root is attached,
/// 3. the definition's initializer runs and its content fills the shadow root.
///
/// Definitions made with [`Registry::elementize`](crate::Registry::elementize)
/// run the same setup from [`ElementDefinition::create`] instead.
///
/// After that, property writes that change a value notify `prop` subscribers
/// and observed attribute changes flow back into properties.
///
/// All methods take `&self`. Subscribers run with no internal borrow held, so
/// they may read and write the element, subscribe and unsubscribe freely.
///
/// The element owns its subscribers, so a callback that keeps the element
/// alive through a strong `Rc` forms a cycle and the element is never freed.
/// Capture a [`Weak`](alloc::rc::Weak) instead:
///
/// ```rust
/// use std::rc::Rc;
/// use elemental::{MemoryHost, Registry};
/// use serde_json::json;
///
/// let mut registry = Registry::<MemoryHost>::new();
/// let definition = registry
///     .define("x-mirror", [("a", json!(0)), ("b", json!(0))], |element| {
///         let weak = Rc::downgrade(element);
///         element.events().on_prop_key("a", move |new, _| {
///             if let Some(element) = weak.upgrade() {
///                 element.set("b", new.clone());
///             }
///         });
///     })
///     .unwrap();
///
/// let element = definition.create(MemoryHost::new());
/// element.connected();
/// element.set("a", 5);
/// assert_eq!(element.get("b"), Some(json!(5)));
/// ```
pub struct Element<H: ElementHost> {
    host: H,
    definition: Rc<ElementDefinition<H>>,
    properties: RefCell<PropertyBag>,
    initialized: Cell<bool>,
    events: EventChannel<H::Parent>,
}

impl<H: ElementHost> fmt::Debug for Element<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.definition.tag())
            .field("initialized", &self.initialized.get())
            .field("properties", &self.properties)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl<H: ElementHost> Element<H> {
    pub(crate) fn new(definition: Rc<ElementDefinition<H>>, host: H) -> Self {
        Self {
            host,
            definition,
            properties: RefCell::new(PropertyBag::new()),
            initialized: Cell::new(false),
            events: EventChannel::new(),
        }
    }

    /// Returns the tag name this element was defined under.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.definition.tag()
    }

    /// Returns the native element wrapper.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the definition this element was created from.
    #[must_use]
    pub fn definition(&self) -> &Rc<ElementDefinition<H>> {
        &self.definition
    }

    /// Returns the shared property schema.
    #[must_use]
    pub fn schema(&self) -> &ElementSchema {
        self.definition.schema()
    }

    /// Returns the per-instance event channel.
    #[must_use]
    pub fn events(&self) -> &EventChannel<H::Parent> {
        &self.events
    }

    /// Returns `true` once the first connection has completed setup.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    // Properties

    /// Reads a property.
    ///
    /// Returns `None` before initialization, after deletion, and for names
    /// that were never declared or assigned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.properties.borrow().get(name).cloned()
    }

    /// Writes a property.
    ///
    /// If `name` is a declared property and the value differs from the current
    /// one, `prop` subscribers receive `(name, new, old)`. Any other name is
    /// stored silently.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let assignment = self.properties.borrow_mut().set(name, value.clone());
        if let Some(old) = assignment.into_changed() {
            self.events.dispatch_prop(name, &value, &old);
        }
    }

    /// Deletes a property, returning `true` if it existed.
    ///
    /// A deleted property reads as `None`. Writing it again creates an
    /// ordinary field that no longer notifies `prop` subscribers.
    pub fn delete(&self, name: &str) -> bool {
        self.properties.borrow_mut().delete(name)
    }

    /// Returns `true` if `name` currently has a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.borrow().contains(name)
    }

    /// Returns the property names in enumeration order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.properties.borrow().keys().map(String::from).collect()
    }

    // Events

    /// Subscribes `handler` to a topic such as `"mount"` or `"prop:foo"`.
    ///
    /// Returns `None` for unknown topics. See [`EventChannel::subscribe`].
    pub fn subscribe(&self, topic: &str, handler: Handler<H::Parent>) -> Option<Subscription> {
        self.events.subscribe(topic, handler)
    }

    // Lifecycle

    /// Runtime callback: the element was inserted into a document.
    ///
    /// The first call performs the one-time setup. Every call then notifies
    /// `mount` subscribers with the current parent.
    pub fn connected(self: &Rc<Self>) {
        if !self.initialized.get() {
            self.set_up();
        }
        let parent = self.host.parent();
        self.events.dispatch_mount(parent.as_ref());
    }

    /// Runtime callback: the element was removed from its document.
    pub fn disconnected(&self) {
        self.events.dispatch_unmount();
    }

    /// Runtime callback: an observed attribute changed from `old` to `new`.
    ///
    /// Ignored before initialization, when the raw strings are equal, and for
    /// attributes that are not on the watch list. Otherwise the new string is
    /// coerced into the property (`None` sets it to `null`) and `attr`
    /// subscribers receive the raw `(name, new, old)` strings.
    pub fn attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>) {
        if !self.initialized.get() || old == new {
            return;
        }
        let Some(property) = self
            .definition
            .schema()
            .by_attribute(name)
            .filter(|property| property.observable())
        else {
            #[cfg(feature = "tracing")]
            tracing::trace!(tag = self.tag(), attribute = name, "ignoring unobserved attribute");
            return;
        };
        self.set(property.name(), parse_optional_attribute(new));
        self.events.dispatch_attr(name, new, old);
    }

    pub(crate) fn set_up(self: &Rc<Self>) {
        for property in self.definition.schema().properties() {
            let value = match self.host.get_attribute(property.attribute()) {
                Some(raw) => parse_attribute_value(&raw),
                None => {
                    let default = property.default_value();
                    if let Some(reflected) = reflected_attribute(default) {
                        self.host.set_attribute(property.attribute(), &reflected);
                    }
                    default.clone()
                }
            };
            self.properties.borrow_mut().define(property.name(), value);
        }
        self.initialized.set(true);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            tag = self.tag(),
            properties = self.definition.schema().len(),
            "initialized element"
        );

        self.host.attach_shadow(self.definition.options().shadow_mode);
        if let Some(content) = self.definition.initialize(self) {
            self.write_content(content);
        }
    }

    // Attributes

    /// Returns an attribute's raw value.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.host.get_attribute(name)
    }

    /// Returns `true` if the attribute is present.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.host.has_attribute(name)
    }

    /// Sets an attribute.
    ///
    /// Observed attributes flow back into their property, either through the
    /// runtime's own callback or, on hosts that lack one, directly.
    pub fn set_attribute(&self, name: &str, value: &str) {
        if H::DELIVERS_ATTRIBUTE_CALLBACKS || !self.schema().is_observed(name) {
            self.host.set_attribute(name, value);
            return;
        }
        let old = self.host.get_attribute(name);
        self.host.set_attribute(name, value);
        self.attribute_changed(name, old.as_deref(), Some(value));
    }

    /// Removes an attribute. See [`set_attribute`](Self::set_attribute).
    pub fn remove_attribute(&self, name: &str) {
        if H::DELIVERS_ATTRIBUTE_CALLBACKS || !self.schema().is_observed(name) {
            self.host.remove_attribute(name);
            return;
        }
        let old = self.host.get_attribute(name);
        self.host.remove_attribute(name);
        self.attribute_changed(name, old.as_deref(), None);
    }

    // Shadow content

    /// Returns the shadow root, once attached.
    #[must_use]
    pub fn html(&self) -> Option<H::Root> {
        self.host.shadow_root()
    }

    /// Replaces the shadow root's children with `content`.
    ///
    /// Does nothing before the shadow root is attached.
    pub fn set_html(&self, content: impl Into<Content<H::Node>>) {
        if self.host.shadow_root().is_none() {
            return;
        }
        self.host.clear_shadow();
        self.write_content(content.into());
    }

    /// Adds styles to the shadow root.
    ///
    /// Styles accumulate across calls. Does nothing before the shadow root is
    /// attached.
    pub fn set_css(&self, css: impl Into<Css<H::Sheet, H::Node>>) {
        if self.host.shadow_root().is_none() {
            return;
        }
        css.into().for_each(&mut |style| self.host.apply_styles(style));
    }

    fn write_content(&self, content: Content<H::Node>) {
        match content {
            Content::Html(html) => self.host.set_shadow_html(&html),
            Content::Node(node) => self.host.append_shadow_node(node),
        }
    }
}
