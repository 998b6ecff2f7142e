//! kxml - small markup parser built on a character-level state machine
//!
//! Input text is scanned once by a tokenizer that emits text runs and
//! completed tags; a tree builder then nests those events into [`Element`]s.
//!
//! # Quick Start
//!
//! ```
//! use kxml::{parse, Content};
//! # fn main() -> Result<(), kxml::Error> {
//! let content = parse(r#"<greeting lang="en">Hello<br/></greeting>"#)?;
//! let root = content.first().and_then(Content::as_element);
//! assert_eq!(root.map(|e| e.name.as_str()), Some("greeting"));
//! assert_eq!(root.and_then(|e| e.attribute("lang")), Some("en"));
//! assert_eq!(root.map(|e| e.inner_text()).as_deref(), Some("Hello"));
//! # Ok(())
//! # }
//! ```
//!
//! Not supported: entity decoding, comments, CDATA, DTDs, single-quoted
//! attribute values and error recovery.

#![forbid(unsafe_code)]

use tracing::instrument;

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result};

mod lexer;
pub use lexer::Mode;

pub mod model;
pub use model::{Attribute, Content, Element};

pub mod parser;
pub use parser::{Config, Parser};

/// Parse markup text into its top-level content
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse(text: &str) -> Result<Vec<Content>> {
    Parser::new(text).parse()
}

/// Parse with custom configuration
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse_with_config(text: &str, config: Config) -> Result<Vec<Content>> {
    Parser::with_config(text, config).parse()
}
