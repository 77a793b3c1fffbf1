// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow content and style payloads.

use alloc::string::String;
use alloc::vec::Vec;

/// Content written into an element's shadow root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content<N> {
    /// Markup assigned as the shadow root's inner HTML.
    Html(String),
    /// A host node appended to the shadow root.
    Node(N),
}

impl<N> From<&str> for Content<N> {
    fn from(html: &str) -> Self {
        Self::Html(String::from(html))
    }
}

impl<N> From<String> for Content<N> {
    fn from(html: String) -> Self {
        Self::Html(html)
    }
}

/// Values an initializer may return.
///
/// Returning `()` or `None` leaves the shadow root empty; strings become
/// [`Content::Html`].
pub trait IntoContent<N> {
    /// Converts into optional shadow content.
    fn into_content(self) -> Option<Content<N>>;
}

impl<N> IntoContent<N> for () {
    fn into_content(self) -> Option<Content<N>> {
        None
    }
}

impl<N> IntoContent<N> for Content<N> {
    fn into_content(self) -> Option<Content<N>> {
        Some(self)
    }
}

impl<N> IntoContent<N> for Option<Content<N>> {
    fn into_content(self) -> Option<Content<N>> {
        self
    }
}

impl<N> IntoContent<N> for &str {
    fn into_content(self) -> Option<Content<N>> {
        Some(Content::from(self))
    }
}

impl<N> IntoContent<N> for String {
    fn into_content(self) -> Option<Content<N>> {
        Some(Content::Html(self))
    }
}

/// Styles applied to an element's shadow root.
///
/// Every application adds to the styles already in place; nothing is replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Css<S, N> {
    /// Style sheet source text.
    Text(String),
    /// A constructed host style sheet, adopted by the shadow root.
    Sheet(S),
    /// A host `<style>` element whose rules are adopted by the shadow root.
    ///
    /// The element itself is not inserted into the shadow tree.
    Element(N),
    /// Several styles, applied in order.
    List(Vec<Self>),
}

impl<S, N> Css<S, N> {
    /// Visits every non-list style in application order.
    pub fn for_each(self, f: &mut impl FnMut(Self)) {
        match self {
            Self::List(items) => {
                for item in items {
                    item.for_each(f);
                }
            }
            leaf => f(leaf),
        }
    }
}

impl<S, N> From<&str> for Css<S, N> {
    fn from(text: &str) -> Self {
        Self::Text(String::from(text))
    }
}

impl<S, N> From<String> for Css<S, N> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<S, N> From<Vec<Self>> for Css<S, N> {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn lists_flatten_in_order() {
        let css: Css<u8, u8> = Css::List(vec![
            Css::from("a"),
            Css::List(vec![Css::Sheet(1), Css::Element(2)]),
            Css::from("b"),
        ]);
        let mut seen = Vec::new();
        css.for_each(&mut |leaf| seen.push(leaf));
        assert_eq!(
            seen,
            vec![
                Css::from("a"),
                Css::Sheet(1),
                Css::Element(2),
                Css::from("b"),
            ]
        );
    }

    #[test]
    fn strings_become_html() {
        assert_eq!(
            IntoContent::<()>::into_content("<p></p>"),
            Some(Content::Html("<p></p>".into()))
        );
        assert_eq!(IntoContent::<()>::into_content(()), None);
    }
}
