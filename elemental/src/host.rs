// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The custom-element runtime an [`Element`](crate::Element) runs inside.

use alloc::string::String;

use crate::content::Css;

/// Encapsulation mode of a shadow root.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShadowMode {
    /// The shadow root is reachable from outside the element.
    #[default]
    Open,
    /// The shadow root is hidden from outside the element.
    Closed,
}

/// Native element operations an element instance delegates to.
///
/// A host wraps one DOM element (or a stand-in for one). It owns the
/// attribute map and the shadow tree; the [`Element`](crate::Element) only
/// reads and writes through these methods. Methods take `&self` because
/// callbacks may re-enter the element while another operation is running.
///
/// Host failures are not reported: attribute and shadow writes are
/// best-effort, like the DOM calls they stand for.
pub trait ElementHost: 'static {
    /// What `mount` subscribers receive: the element's parent container.
    type Parent: 'static;
    /// A node that can be placed into the shadow root.
    type Node: 'static;
    /// A constructed style sheet.
    type Sheet: 'static;
    /// Handle to the shadow root.
    type Root: 'static;

    /// `true` if the runtime calls
    /// [`Element::attribute_changed`](crate::Element::attribute_changed) by itself
    /// whenever an observed attribute is written.
    ///
    /// When `false`, [`Element::set_attribute`](crate::Element::set_attribute) and
    /// [`Element::remove_attribute`](crate::Element::remove_attribute) deliver the
    /// callback instead.
    const DELIVERS_ATTRIBUTE_CALLBACKS: bool;

    /// Returns the attribute's value, or `None` if it is absent.
    fn get_attribute(&self, name: &str) -> Option<String>;

    /// Sets the attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Removes the attribute.
    fn remove_attribute(&self, name: &str);

    /// Returns `true` if the attribute is present.
    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Returns the current parent container, if any.
    fn parent(&self) -> Option<Self::Parent>;

    /// Creates the shadow root. Called at most once per element.
    fn attach_shadow(&self, mode: ShadowMode);

    /// Returns the shadow root, if one was attached.
    fn shadow_root(&self) -> Option<Self::Root>;

    /// Replaces the shadow root's children with parsed `html`.
    fn set_shadow_html(&self, html: &str);

    /// Appends `node` to the shadow root.
    fn append_shadow_node(&self, node: Self::Node);

    /// Removes every child of the shadow root.
    fn clear_shadow(&self);

    /// Adds one style to the shadow root.
    ///
    /// Elements flatten [`Css::List`] before calling this, so implementations
    /// only see the other variants.
    fn apply_styles(&self, css: Css<Self::Sheet, Self::Node>);
}
