//! Tokenizer events and in-progress tag builders

use crate::model::Attribute;

/// Kind of a completed tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Start,
    /// `</name>`
    End,
    /// `<name ... />`
    SelfClosing,
    /// `<?name ...?>`
    Header,
}

/// A completed `<...>` construct
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    pub kind: TagKind,
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Tag {
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Events emitted by the tokenizer
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Raw text between tags, possibly empty
    Text(String),
    Tag(Tag),
}

/// Accumulator for a possibly prefixed name
#[derive(Clone, Debug, Default)]
pub(crate) struct NameBuf {
    first: String,
    second: String,
}

impl NameBuf {
    pub(crate) fn push_first(&mut self, ch: char) {
        self.first.push(ch);
    }

    pub(crate) fn push_second(&mut self, ch: char) {
        self.second.push(ch);
    }

    /// Split into `(namespace, name)`
    ///
    /// An empty part after `:` means the name is unprefixed.
    pub(crate) fn finish(self) -> (Option<String>, String) {
        if self.second.is_empty() {
            (None, self.first)
        } else {
            (Some(self.first), self.second)
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct AttrBuilder {
    pub(crate) name: NameBuf,
    pub(crate) value: String,
}

impl AttrBuilder {
    pub(crate) fn finish(self) -> Attribute {
        let (namespace, name) = self.name.finish();
        Attribute {
            name,
            namespace,
            // strips every leading/trailing quote, not just the delimiters
            value: self.value.trim_matches('"').to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct TagBuilder {
    pub(crate) kind: Option<TagKind>,
    pub(crate) name: NameBuf,
    pub(crate) attr: AttrBuilder,
    pub(crate) attributes: Vec<Attribute>,
}

impl TagBuilder {
    pub(crate) fn finish_attribute(&mut self) {
        let attr = std::mem::take(&mut self.attr);
        self.attributes.push(attr.finish());
    }

    /// Package the tag, or `None` if it was never classified
    pub(crate) fn finish(self) -> Option<Tag> {
        let kind = self.kind?;
        let (namespace, name) = self.name.finish();
        Some(Tag {
            kind,
            name,
            namespace,
            attributes: self.attributes,
        })
    }
}
