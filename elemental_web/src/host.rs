// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::cell::OnceCell;

use elemental::{Css, ElementDefinition, ElementHost, ShadowMode};
use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::{
    CssStyleSheet, Element, HtmlElement, Node, ShadowRoot, ShadowRootInit, ShadowRootMode,
};

/// [`ElementHost`] over a live DOM element.
///
/// The host keeps the shadow root it attached, so closed roots stay reachable
/// from Rust even though `element.shadowRoot` hides them.
#[derive(Clone, Debug)]
pub struct WebHost {
    element: HtmlElement,
    root: OnceCell<ShadowRoot>,
}

impl WebHost {
    /// Wraps the custom element instance the browser constructed.
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            root: OnceCell::new(),
        }
    }

    /// Returns the wrapped element.
    #[must_use]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn root(&self) -> Option<ShadowRoot> {
        self.root
            .get()
            .cloned()
            .or_else(|| self.element.shadow_root())
    }

    fn adopt(&self, sheet: &CssStyleSheet) {
        let Some(root) = self.root() else {
            return;
        };
        let sheets = root.adopted_style_sheets();
        sheets.push(sheet);
        root.set_adopted_style_sheets(&sheets);
    }

    fn adopt_text(&self, text: &str) {
        let sheet = match CssStyleSheet::new() {
            Ok(sheet) => sheet,
            Err(err) => return report(Err::<(), _>(err), "CSSStyleSheet()"),
        };
        let parsed = sheet.replace_sync(text);
        if parsed.is_ok() {
            self.adopt(&sheet);
        }
        report(parsed, "replaceSync");
    }
}

/// Returns the definition's watch list as a JS array, for `observedAttributes`.
#[must_use]
pub fn observed_attributes(definition: &ElementDefinition<WebHost>) -> Array {
    definition
        .observed_attributes()
        .iter()
        .map(|name| JsValue::from_str(name))
        .collect()
}

fn report<T>(result: Result<T, JsValue>, operation: &'static str) {
    if let Err(_err) = result {
        #[cfg(feature = "tracing")]
        tracing::warn!(operation, error = ?_err, "browser call failed");
        #[cfg(not(feature = "tracing"))]
        let _ = operation;
    }
}

impl ElementHost for WebHost {
    type Parent = Element;
    type Node = Node;
    type Sheet = CssStyleSheet;
    type Root = ShadowRoot;

    const DELIVERS_ATTRIBUTE_CALLBACKS: bool = true;

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        report(self.element.set_attribute(name, value), "setAttribute");
    }

    fn remove_attribute(&self, name: &str) {
        report(self.element.remove_attribute(name), "removeAttribute");
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.element.has_attribute(name)
    }

    fn parent(&self) -> Option<Element> {
        self.element.parent_element()
    }

    fn attach_shadow(&self, mode: ShadowMode) {
        let mode = match mode {
            ShadowMode::Open => ShadowRootMode::Open,
            ShadowMode::Closed => ShadowRootMode::Closed,
        };
        match self.element.attach_shadow(&ShadowRootInit::new(mode)) {
            Ok(root) => {
                let _ = self.root.set(root);
            }
            Err(err) => report(Err::<(), _>(err), "attachShadow"),
        }
    }

    fn shadow_root(&self) -> Option<ShadowRoot> {
        self.root()
    }

    fn set_shadow_html(&self, html: &str) {
        if let Some(root) = self.root() {
            root.set_inner_html(html);
        }
    }

    fn append_shadow_node(&self, node: Node) {
        if let Some(root) = self.root() {
            report(root.append_child(&node), "appendChild");
        }
    }

    fn clear_shadow(&self) {
        if let Some(root) = self.root() {
            root.replace_children_with_node_0();
        }
    }

    fn apply_styles(&self, css: Css<CssStyleSheet, Node>) {
        match css {
            Css::Text(text) => self.adopt_text(&text),
            Css::Sheet(sheet) => self.adopt(&sheet),
            Css::Element(style) => {
                if let Some(text) = style.text_content() {
                    self.adopt_text(&text);
                }
            }
            Css::List(items) => {
                for item in items {
                    self.apply_styles(item);
                }
            }
        }
    }
}
