// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element definitions and the tag registry.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;

use elemental_property::{ElementSchema, SchemaCompiler, SchemaError, Value};

use crate::content::{Content, IntoContent};
use crate::element::Element;
use crate::host::{ElementHost, ShadowMode};

/// Errors raised by [`Registry::define`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefineError {
    /// The tag is not a valid custom element name.
    #[error("`{0}` is not a valid custom element name")]
    InvalidName(String),
    /// The tag was already defined in this registry.
    #[error("`{0}` is already defined")]
    AlreadyDefined(String),
    /// The default properties do not form a valid schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Per-definition settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DefinitionOptions {
    /// Mode of the shadow root attached at first connection.
    pub shadow_mode: ShadowMode,
}

impl DefinitionOptions {
    /// Returns options with the given shadow root mode.
    #[must_use]
    pub fn with_shadow_mode(mut self, shadow_mode: ShadowMode) -> Self {
        self.shadow_mode = shadow_mode;
        self
    }
}

/// The setup function run once per instance, at first connection (or at
/// creation for [`Registry::elementize`] definitions).
///
/// It receives the freshly initialized element and may return content for
/// the shadow root.
pub type Initializer<H> = dyn Fn(&Rc<Element<H>>) -> Option<Content<<H as ElementHost>::Node>>;

/// A registered element: tag, compiled schema, options and initializer.
///
/// Definitions are shared by all their instances.
pub struct ElementDefinition<H: ElementHost> {
    tag: String,
    schema: ElementSchema,
    options: DefinitionOptions,
    eager: bool,
    initializer: Box<Initializer<H>>,
}

impl<H: ElementHost> fmt::Debug for ElementDefinition<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementDefinition")
            .field("tag", &self.tag)
            .field("schema", &self.schema)
            .field("options", &self.options)
            .field("eager", &self.eager)
            .finish_non_exhaustive()
    }
}

impl<H: ElementHost> ElementDefinition<H> {
    /// Returns the tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the compiled property schema.
    #[must_use]
    pub fn schema(&self) -> &ElementSchema {
        &self.schema
    }

    /// Returns the definition options.
    #[must_use]
    pub fn options(&self) -> DefinitionOptions {
        self.options
    }

    /// Returns the attribute names the runtime must watch.
    #[must_use]
    pub fn observed_attributes(&self) -> &[String] {
        self.schema.observed_attributes()
    }

    /// Returns `true` if instances are set up at creation rather than at
    /// first connection.
    #[must_use]
    pub fn sets_up_on_create(&self) -> bool {
        self.eager
    }

    /// Creates an instance around `host`.
    ///
    /// The instance stays inert until the runtime reports its first
    /// connection through [`Element::connected`], unless the definition came
    /// from [`Registry::elementize`], in which case the shadow root is
    /// attached and the initializer runs before this returns.
    #[must_use]
    pub fn create(self: &Rc<Self>, host: H) -> Rc<Element<H>> {
        let element = Rc::new(Element::new(Rc::clone(self), host));
        if self.eager {
            element.set_up();
        }
        element
    }

    pub(crate) fn initialize(&self, element: &Rc<Element<H>>) -> Option<Content<H::Node>> {
        (self.initializer)(element)
    }
}

/// Tag name → definition table; the registration call of the runtime.
///
/// # Example
///
/// ```rust
/// use elemental::{MemoryHost, Registry};
/// use serde_json::json;
///
/// let mut registry = Registry::<MemoryHost>::new();
/// let definition = registry
///     .define("x-greeting", [("name", json!("world"))], |element| {
///         let name = element.get("name").unwrap();
///         format!("<p>Hello, {}!</p>", name.as_str().unwrap())
///     })
///     .unwrap();
/// assert_eq!(definition.observed_attributes(), ["name"]);
///
/// let element = definition.create(MemoryHost::new());
/// element.connected();
///
/// assert_eq!(element.html().unwrap().html, "<p>Hello, world!</p>");
/// assert_eq!(element.get_attribute("name").as_deref(), Some("world"));
/// ```
pub struct Registry<H: ElementHost> {
    compiler: SchemaCompiler,
    definitions: HashMap<String, Rc<ElementDefinition<H>>>,
}

impl<H: ElementHost> Default for Registry<H> {
    fn default() -> Self {
        Self::with_compiler(SchemaCompiler::new())
    }
}

impl<H: ElementHost> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("Registry")
            .field("compiler", &self.compiler)
            .field("tags", &tags)
            .finish_non_exhaustive()
    }
}

impl<H: ElementHost> Registry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry compiling schemas with `compiler`.
    #[must_use]
    pub fn with_compiler(compiler: SchemaCompiler) -> Self {
        Self {
            compiler,
            definitions: HashMap::new(),
        }
    }

    /// Defines `tag` with ordered default properties and an initializer.
    pub fn define<I, K, F, R>(
        &mut self,
        tag: &str,
        defaults: I,
        initializer: F,
    ) -> Result<Rc<ElementDefinition<H>>, DefineError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
        F: Fn(&Rc<Element<H>>) -> R + 'static,
        R: IntoContent<H::Node>,
    {
        self.define_with_options(tag, defaults, DefinitionOptions::default(), initializer)
    }

    /// Defines `tag` without default properties.
    pub fn define_bare<F, R>(
        &mut self,
        tag: &str,
        initializer: F,
    ) -> Result<Rc<ElementDefinition<H>>, DefineError>
    where
        F: Fn(&Rc<Element<H>>) -> R + 'static,
        R: IntoContent<H::Node>,
    {
        self.define(tag, Vec::<(String, Value)>::new(), initializer)
    }

    /// Defines `tag` as a plain shadow-content element.
    ///
    /// The definition has no properties. Each instance attaches an open
    /// shadow root and runs `initializer` as soon as it is created, instead
    /// of waiting for its first connection.
    ///
    /// ```rust
    /// use elemental::{MemoryHost, Registry};
    ///
    /// let mut registry = Registry::<MemoryHost>::new();
    /// let definition = registry.elementize("x-badge", |_| "<b>new</b>").unwrap();
    ///
    /// let element = definition.create(MemoryHost::new());
    /// assert_eq!(element.html().unwrap().html, "<b>new</b>");
    /// ```
    pub fn elementize<F, R>(
        &mut self,
        tag: &str,
        initializer: F,
    ) -> Result<Rc<ElementDefinition<H>>, DefineError>
    where
        F: Fn(&Rc<Element<H>>) -> R + 'static,
        R: IntoContent<H::Node>,
    {
        self.insert(
            tag,
            Vec::<(String, Value)>::new(),
            DefinitionOptions::default(),
            true,
            initializer,
        )
    }

    /// Defines `tag` with explicit [`DefinitionOptions`].
    pub fn define_with_options<I, K, F, R>(
        &mut self,
        tag: &str,
        defaults: I,
        options: DefinitionOptions,
        initializer: F,
    ) -> Result<Rc<ElementDefinition<H>>, DefineError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
        F: Fn(&Rc<Element<H>>) -> R + 'static,
        R: IntoContent<H::Node>,
    {
        self.insert(tag, defaults, options, false, initializer)
    }

    fn insert<I, K, F, R>(
        &mut self,
        tag: &str,
        defaults: I,
        options: DefinitionOptions,
        eager: bool,
        initializer: F,
    ) -> Result<Rc<ElementDefinition<H>>, DefineError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
        F: Fn(&Rc<Element<H>>) -> R + 'static,
        R: IntoContent<H::Node>,
    {
        if !is_valid_custom_element_name(tag) {
            return Err(DefineError::InvalidName(String::from(tag)));
        }
        if self.definitions.contains_key(tag) {
            return Err(DefineError::AlreadyDefined(String::from(tag)));
        }
        let schema = self.compiler.compile(defaults)?;
        let definition = Rc::new(ElementDefinition {
            tag: String::from(tag),
            schema,
            options,
            eager,
            initializer: Box::new(move |element: &Rc<Element<H>>| {
                initializer(element).into_content()
            }),
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(
            tag,
            observed = definition.observed_attributes().len(),
            eager,
            "defined element"
        );
        self.definitions
            .insert(String::from(tag), Rc::clone(&definition));
        Ok(definition)
    }

    /// Returns the definition registered under `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Rc<ElementDefinition<H>>> {
        self.definitions.get(tag)
    }

    /// Returns `true` if `tag` is defined.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }

    /// Returns the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if nothing is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

const RESERVED_NAMES: [&str; 8] = [
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Returns `true` if `name` is a valid custom element name.
///
/// A valid name starts with a lowercase ASCII letter, contains a hyphen, has
/// no uppercase ASCII letters, uses only characters allowed in custom element
/// names, and is not one of the reserved SVG and MathML names.
///
/// ```rust
/// use elemental::is_valid_custom_element_name;
///
/// assert!(is_valid_custom_element_name("my-element"));
/// assert!(is_valid_custom_element_name("math-α"));
/// assert!(!is_valid_custom_element_name("element"));
/// assert!(!is_valid_custom_element_name("My-element"));
/// assert!(!is_valid_custom_element_name("font-face"));
/// ```
#[must_use]
pub fn is_valid_custom_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_lowercase()) {
        return false;
    }
    name.contains('-') && chars.all(is_name_char) && !RESERVED_NAMES.contains(&name)
}

fn is_name_char(c: char) -> bool {
    matches!(c,
        '-' | '.' | '0'..='9' | '_' | 'a'..='z'
        | '\u{B7}'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{203F}'..='\u{2040}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}
