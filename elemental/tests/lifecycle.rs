// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration, one-time initialization and shadow content.

use std::cell::Cell;
use std::rc::Rc;

use elemental::{Content, Css, DefineError, Element, MemoryHost, Registry, ShadowMode};
use serde_json::json;

#[test]
fn defines_and_creates_an_element() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let created: Rc<Cell<Option<*const Element<MemoryHost>>>> = Rc::default();
    let seen = created.clone();

    let mut registry = Registry::new();
    let definition = registry
        .define(
            "test-element-1",
            Vec::<(String, serde_json::Value)>::new(),
            move |element: &Rc<Element<MemoryHost>>| {
                counter.set(counter.get() + 1);
                seen.set(Some(Rc::as_ptr(element)));
            },
        )
        .unwrap();
    assert_eq!(calls.get(), 0);
    assert!(Rc::ptr_eq(registry.get("test-element-1").unwrap(), &definition));

    let element = definition.create(MemoryHost::new());
    assert_eq!(calls.get(), 0);
    assert_eq!(element.tag(), "test-element-1");

    element.connected();
    assert_eq!(calls.get(), 1);
    assert_eq!(created.get(), Some(Rc::as_ptr(&element)));
}

#[test]
fn initializer_runs_once() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry
        .define_bare("test-element-2", move |_| counter.set(counter.get() + 1))
        .unwrap();
    let element = definition.create(MemoryHost::new());

    element.connected();
    element.disconnected();
    element.connected();

    assert_eq!(calls.get(), 1);
}

#[test]
fn default_properties_are_optional() {
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry.define_bare("test-element-3", |_| ()).unwrap();
    assert!(definition.schema().is_empty());
    assert!(definition.observed_attributes().is_empty());

    let element = definition.create(MemoryHost::with_attributes([("title", "x")]));
    element.connected();
    assert!(element.keys().is_empty());
    assert!(element.is_initialized());
}

#[test]
fn each_instance_runs_the_initializer() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry
        .define_bare("test-element-4", move |_| counter.set(counter.get() + 1))
        .unwrap();

    let first = definition.create(MemoryHost::new());
    let second = definition.create(MemoryHost::new());
    first.connected();
    second.connected();
    assert_eq!(calls.get(), 2);
}

#[test]
fn registry_rejects_invalid_and_duplicate_tags() {
    let mut registry = Registry::<MemoryHost>::new();
    assert_eq!(
        registry.define_bare("Test-Element", |_| ()).unwrap_err(),
        DefineError::InvalidName("Test-Element".into())
    );
    registry.define_bare("test-element", |_| ()).unwrap();
    assert!(matches!(
        registry.define("test-element", [("a", json!(1))], |_| ()),
        Err(DefineError::AlreadyDefined(_))
    ));
    assert_eq!(registry.len(), 1);
}

#[test]
fn shadow_content_from_a_node() {
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry
        .define_bare("test-node", |_| Content::Node(String::from("foo")))
        .unwrap();
    let element = definition.create(MemoryHost::new());
    element.connected();
    assert_eq!(element.host().shadow().unwrap().html, "foo");
}

#[test]
fn shadow_content_from_strings() {
    let mut registry = Registry::<MemoryHost>::new();
    let text = registry.define_bare("test-text", |_| "foo").unwrap();
    let markup = registry
        .define_bare("test-markup", |_| String::from("<div>foo</div>"))
        .unwrap();

    let element = text.create(MemoryHost::new());
    element.connected();
    assert_eq!(element.html().unwrap().html, "foo");

    let element = markup.create(MemoryHost::new());
    element.connected();
    assert_eq!(element.html().unwrap().html, "<div>foo</div>");
}

#[test]
fn shadow_root_is_attached_open_by_default() {
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry.define_bare("test-open", |_| ()).unwrap();
    let element = definition.create(MemoryHost::new());
    assert!(element.html().is_none());

    element.connected();
    let root = element.html().unwrap();
    assert_eq!(root.mode, ShadowMode::Open);
    assert!(root.html.is_empty());
}

#[test]
fn html_setter_replaces_previous_content() {
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry
        .define_bare("test-html", |element| {
            element.set_html("<em></em>");
            assert_eq!(element.html().unwrap().html, "<em></em>");

            element.set_html(Content::Node(String::from("<span></span>")));
            assert_eq!(element.html().unwrap().html, "<span></span>");

            element.set_html("<div></div>");
            assert_eq!(element.html().unwrap().html, "<div></div>");

            element.set_html(Content::Node(String::from("<section></section>")));
            assert_eq!(element.html().unwrap().html, "<section></section>");
        })
        .unwrap();
    let element = definition.create(MemoryHost::new());
    element.connected();
    assert_eq!(element.html().unwrap().html, "<section></section>");
}

#[test]
fn html_setter_before_connection_is_a_no_op() {
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry.define_bare("test-early", |_| "late").unwrap();
    let element = definition.create(MemoryHost::new());

    element.set_html("early");
    element.set_css("div {}");
    assert!(element.html().is_none());

    element.connected();
    let root = element.html().unwrap();
    assert_eq!(root.html, "late");
    assert!(root.styles.is_empty());
}

#[test]
fn returned_content_follows_styles_set_in_the_initializer() {
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry
        .define_bare("test-css", |element| {
            element.set_css("div { width: 14px; }");
            "<div></div>"
        })
        .unwrap();
    let element = definition.create(MemoryHost::new());
    element.connected();

    let root = element.html().unwrap();
    assert_eq!(root.html, "<div></div>");
    assert_eq!(root.styles, ["div { width: 14px; }"]);
}

#[test]
fn styles_accumulate_across_assignments() {
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry
        .define_bare("test-styles", |element| {
            element.set_css("div { width: 55px; }");
            element.set_css(Css::Element(String::from("div { padding: 4px; }")));
            element.set_css(vec![Css::<String, String>::Sheet(String::from(
                "div { margin: 19px; }",
            ))]);
            "<div></div>"
        })
        .unwrap();
    let element = definition.create(MemoryHost::new());
    element.connected();

    let root = element.html().unwrap();
    assert_eq!(
        root.styles,
        [
            "div { width: 55px; }",
            "div { padding: 4px; }",
            "div { margin: 19px; }",
        ]
    );
    // Style elements are adopted, not inserted into the tree.
    assert_eq!(root.html, "<div></div>");
}

#[test]
fn style_lists_apply_in_order() {
    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry
        .define_bare("test-style-list", |element| {
            element.set_css(vec![
                Css::from("a"),
                Css::Element(String::from("b")),
                Css::Sheet(String::from("c")),
            ]);
        })
        .unwrap();
    let element = definition.create(MemoryHost::new());
    element.connected();
    assert_eq!(element.html().unwrap().styles, ["a", "b", "c"]);
}

#[test]
fn elementize_sets_up_at_creation() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let created: Rc<Cell<Option<*const Element<MemoryHost>>>> = Rc::default();
    let seen = created.clone();

    let mut registry = Registry::<MemoryHost>::new();
    let definition = registry
        .elementize("test-elementized", move |element| {
            counter.set(counter.get() + 1);
            seen.set(Some(Rc::as_ptr(element)));
            Content::Node(String::from("foo"))
        })
        .unwrap();
    assert_eq!(calls.get(), 0);
    assert!(Rc::ptr_eq(registry.get("test-elementized").unwrap(), &definition));
    assert!(definition.sets_up_on_create());
    assert!(definition.schema().is_empty());

    let element = definition.create(MemoryHost::new());
    assert_eq!(calls.get(), 1);
    assert_eq!(created.get(), Some(Rc::as_ptr(&element)));
    let root = element.html().unwrap();
    assert_eq!(root.mode, ShadowMode::Open);
    assert_eq!(root.html, "foo");

    element.connected();
    element.disconnected();
    element.connected();
    assert_eq!(calls.get(), 1);
}

#[test]
fn elementize_checks_tags_like_define() {
    let mut registry = Registry::<MemoryHost>::new();
    assert!(matches!(
        registry.elementize("plain", |_| ()),
        Err(DefineError::InvalidName(_))
    ));
    registry.define_bare("test-taken", |_| ()).unwrap();
    assert!(matches!(
        registry.elementize("test-taken", |_| ()),
        Err(DefineError::AlreadyDefined(_))
    ));
}
