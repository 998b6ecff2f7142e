//! Tree builder: assembles tokenizer events into nested content

use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::lexer::{Event, Tag, TagKind, Tokenizer};
use crate::model::{Content, Element};

/// Configuration for the parser
///
/// The default applies no limits and accepts any end tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
    /// Keep empty text runs, e.g. between adjacent tags, as `Content::Text("")`
    pub keep_empty_text: bool,
    /// Reject end tags that do not match the innermost open element, or
    /// that have no open element at all
    pub strict_end_tags: bool,
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self::new(0, 0)
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
            keep_empty_text: false,
            strict_end_tags: false,
        }
    }

    pub const fn with_keep_empty_text(mut self, keep: bool) -> Self {
        self.keep_empty_text = keep;
        self
    }

    pub const fn with_strict_end_tags(mut self, strict: bool) -> Self {
        self.strict_end_tags = strict;
        self
    }
}

/// Parser over a complete input text
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    tokenizer: Tokenizer<'a>,
    config: Config,
}

/// An element whose end tag has not been seen yet
struct Open {
    start: Tag,
    content: Vec<Content>,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new parser with custom configuration
    pub fn with_config(input: &'a str, config: Config) -> Self {
        Self {
            input,
            tokenizer: Tokenizer::new(input),
            config,
        }
    }

    /// Parse the whole input into top-level content
    ///
    /// Open elements are kept on an explicit stack, so nesting depth is
    /// bounded only by `Config::max_depth`.
    pub fn parse(&mut self) -> Result<Vec<Content>> {
        if self.config.max_size > 0 && self.input.len() > self.config.max_size {
            return Err(Error::new(
                ErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                self.tokenizer.position(),
            ));
        }

        let mut root = Vec::new();
        let mut stack: Vec<Open> = Vec::new();

        while let Some(event) = self.tokenizer.next() {
            let tag = match event? {
                Event::Text(text) => {
                    if self.config.keep_empty_text || !text.is_empty() {
                        current(&mut stack, &mut root).push(Content::Text(text));
                    }
                    continue;
                }
                Event::Tag(tag) => tag,
            };

            match tag.kind {
                TagKind::Start => {
                    self.check_depth(stack.len())?;
                    stack.push(Open {
                        start: tag,
                        content: Vec::new(),
                    });
                }
                TagKind::SelfClosing | TagKind::Header => {
                    current(&mut stack, &mut root).push(Content::Child(Element {
                        name: tag.name,
                        namespace: tag.namespace,
                        attributes: tag.attributes,
                        content: Vec::new(),
                    }));
                }
                TagKind::End => {
                    let Some(open) = stack.pop() else {
                        return self.stray_end_tag(&tag, root);
                    };
                    let element = self.close(open, &tag)?;
                    current(&mut stack, &mut root).push(Content::Child(element));
                }
            }
        }

        if !stack.is_empty() {
            return Err(Error::new(
                ErrorKind::UnterminatedElement { depth: stack.len() },
                self.tokenizer.position(),
            ));
        }

        debug!(nodes = root.len(), "parsed document");
        Ok(root)
    }

    fn check_depth(&self, open: usize) -> Result<()> {
        let max = self.config.max_depth;
        if max > 0 && open >= usize::from(max) {
            return Err(Error::new(
                ErrorKind::MaxDepthExceeded { max },
                self.tokenizer.position(),
            ));
        }
        Ok(())
    }

    /// Build the element for `open`, checking `end` against it in strict mode
    fn close(&self, open: Open, end: &Tag) -> Result<Element> {
        let start = open.start;
        if self.config.strict_end_tags
            && (end.name != start.name || end.namespace != start.namespace)
        {
            return Err(Error::new(
                ErrorKind::MismatchedEndTag {
                    expected: start.qualified_name(),
                    found: end.qualified_name(),
                },
                self.tokenizer.position(),
            ));
        }
        Ok(Element {
            name: start.name,
            namespace: start.namespace,
            attributes: start.attributes,
            content: open.content,
        })
    }

    /// An end tag at the top level ends the document; the rest is ignored
    fn stray_end_tag(&self, end: &Tag, root: Vec<Content>) -> Result<Vec<Content>> {
        if self.config.strict_end_tags {
            return Err(Error::new(
                ErrorKind::UnexpectedEndTag {
                    name: end.qualified_name(),
                },
                self.tokenizer.position(),
            ));
        }
        debug!(end = %end.qualified_name(), nodes = root.len(), "stopped at unmatched end tag");
        Ok(root)
    }
}

/// Content list of the innermost open element, or the top level
fn current<'s>(stack: &'s mut [Open], root: &'s mut Vec<Content>) -> &'s mut Vec<Content> {
    match stack.last_mut() {
        Some(open) => &mut open.content,
        None => root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attribute;

    fn ensure_eq<T: PartialEq + std::fmt::Debug>(left: T, right: T) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Error::with_message(
                ErrorKind::UnterminatedElement { depth: 0 },
                crate::Pos::default(),
                format!("assertion failed: left={left:?} right={right:?}"),
            ))
        }
    }

    fn error_kind(input: &str, config: Config) -> Option<ErrorKind> {
        Parser::with_config(input, config)
            .parse()
            .err()
            .map(|e| e.kind().clone())
    }

    #[test]
    fn test_parse_nested() -> Result<()> {
        let content = Parser::new(r#"<a x="1"><b/>hi</a>"#).parse()?;
        let expected = Element::new("a")
            .with_attribute(Attribute::new("x", "1"))
            .with_content(Element::new("b").into())
            .with_content(Content::Text("hi".into()));
        ensure_eq(content, vec![Content::Child(expected)])
    }

    #[test]
    fn test_multiple_roots() -> Result<()> {
        let content = Parser::new("<a/> mid <b></b>").parse()?;
        ensure_eq(
            content,
            vec![
                Element::new("a").into(),
                Content::Text(" mid ".into()),
                Element::new("b").into(),
            ],
        )
    }

    #[test]
    fn test_keep_empty_text() -> Result<()> {
        let config = Config::default().with_keep_empty_text(true);
        let content = Parser::with_config("<a></a>", config).parse()?;
        ensure_eq(
            content,
            vec![
                Content::Text(String::new()),
                Element::new("a")
                    .with_content(Content::Text(String::new()))
                    .into(),
            ],
        )
    }

    #[test]
    fn test_mismatched_end_tag_permissive() -> Result<()> {
        let content = Parser::new("<a>text</b>").parse()?;
        ensure_eq(
            content,
            vec![Element::new("a").with_content(Content::Text("text".into())).into()],
        )
    }

    #[test]
    fn test_mismatched_end_tag_strict() -> Result<()> {
        let config = Config::default().with_strict_end_tags(true);
        ensure_eq(
            error_kind("<a>text</b>", config),
            Some(ErrorKind::MismatchedEndTag {
                expected: "a".into(),
                found: "b".into(),
            }),
        )?;
        ensure_eq(error_kind("<x:a></y:a>", config).is_some(), true)?;
        ensure_eq(error_kind("<x:a>t</x:a>", config), None)
    }

    #[test]
    fn test_unterminated_element() -> Result<()> {
        ensure_eq(
            error_kind("<a><b></b>", Config::default()),
            Some(ErrorKind::UnterminatedElement { depth: 1 }),
        )?;
        ensure_eq(
            error_kind("<a><b>", Config::default()),
            Some(ErrorKind::UnterminatedElement { depth: 2 }),
        )
    }

    #[test]
    fn test_stray_end_tag_ends_document() -> Result<()> {
        let content = Parser::new("hi</a>more").parse()?;
        ensure_eq(content, vec![Content::Text("hi".into())])?;
        let content = Parser::new("<a/></b><c/>").parse()?;
        ensure_eq(content, vec![Element::new("a").into()])
    }

    #[test]
    fn test_stray_end_tag_strict() -> Result<()> {
        let config = Config::default().with_strict_end_tags(true);
        ensure_eq(
            error_kind("hi</a>more", config),
            Some(ErrorKind::UnexpectedEndTag { name: "a".into() }),
        )
    }

    #[test]
    fn test_default_config_has_no_limits() -> Result<()> {
        ensure_eq(Config::default(), Config::unlimited())?;
        let depth = 300;
        let input = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        ensure_eq(error_kind(&input, Config::default()), None)
    }

    #[test]
    fn test_max_depth() -> Result<()> {
        let config = Config::new(2, 0);
        ensure_eq(error_kind("<a><b></b></a>", config), None)?;
        ensure_eq(
            error_kind("<a><b><c></c></b></a>", config),
            Some(ErrorKind::MaxDepthExceeded { max: 2 }),
        )
    }

    #[test]
    fn test_max_size() -> Result<()> {
        ensure_eq(
            error_kind("<abc/>", Config::new(0, 4)),
            Some(ErrorKind::MaxSizeExceeded { max: 4 }),
        )?;
        ensure_eq(error_kind("<abc/>", Config::unlimited()), None)
    }
}
