// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host for `elemental` custom elements.
//!
//! This crate provides an [`ElementHost`](elemental::ElementHost)
//! implementation over `web_sys::HtmlElement` when targeting `wasm32`. On
//! other targets it is empty.
//!
//! # Usage
//!
//! The page registers a small custom element class with
//! `customElements.define`. Its `observedAttributes` comes from
//! `observed_attributes`, its constructor wraps `this` in a `WebHost` and
//! creates the element from the definition, and its three lifecycle callbacks
//! forward to [`Element::connected`](elemental::Element::connected),
//! [`Element::disconnected`](elemental::Element::disconnected) and
//! [`Element::attribute_changed`](elemental::Element::attribute_changed).
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn upgrade(
//!     definition: &std::rc::Rc<elemental::ElementDefinition<elemental_web::WebHost>>,
//!     this: web_sys::HtmlElement,
//! ) -> std::rc::Rc<elemental::Element<elemental_web::WebHost>> {
//!     definition.create(elemental_web::WebHost::new(this))
//! }
//! ```
//!
//! Notes:
//! - The browser delivers attribute callbacks itself, so
//!   `Element::set_attribute` only writes the attribute.
//! - Styles of every kind end up in the shadow root's `adoptedStyleSheets`.
//!   Text and `<style>` elements are compiled into constructed sheets; the
//!   `<style>` element is never inserted into the shadow tree.
//! - Browser errors are swallowed. With the `tracing` feature they are
//!   reported as `warn` events.

#![no_std]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod host;

#[cfg(target_arch = "wasm32")]
pub use host::{WebHost, observed_attributes};
