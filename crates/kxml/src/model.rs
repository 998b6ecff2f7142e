//! Document data model

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parsed element with its subtree
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    pub name: String,
    pub namespace: Option<String>,
    /// Attributes in source order; duplicates are kept
    pub attributes: Vec<Attribute>,
    pub content: Vec<Content>,
}

/// Content node: a child element or a literal text run
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Content {
    Child(Element),
    Text(String),
}

/// Element attribute
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    pub name: String,
    pub namespace: Option<String>,
    pub value: String,
}

impl Element {
    /// Create an element with no namespace, attributes or content
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content.push(content);
        self
    }

    /// `prefix:name`, or just `name` when unprefixed
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Concatenated direct text children
    pub fn inner_text(&self) -> String {
        self.content.iter().filter_map(Content::as_text).collect()
    }

    /// Value of the first attribute with the given local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Direct child elements
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.content.iter().filter_map(Content::as_element)
    }
}

// Dropping a deep tree through the derived glue recurses once per level.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.content);
        while let Some(node) = pending.pop() {
            if let Content::Child(mut element) = node {
                pending.append(&mut element.content);
            }
        }
    }
}

impl Content {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Child(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Child(_) => None,
        }
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Self::Child(element)
    }
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            value: value.into(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}
