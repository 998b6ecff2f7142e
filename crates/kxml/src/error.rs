//! Error types for kxml

use std::fmt;
use thiserror::Error;

use crate::lexer::Mode;

/// Position in source text
///
/// `offset` is a byte offset into the caller's (untrimmed) input; `line` and
/// `col` are 1-based and count characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tokenizer has no transition for this character in this mode
    UnexpectedCharacter { mode: Mode, character: char },
    /// Input ended inside a tag or attribute
    UnexpectedEndOfInput { mode: Mode },
    /// Input ended with elements still open
    UnterminatedElement { depth: usize },
    /// End tag with no open element to close
    UnexpectedEndTag { name: String },
    /// End tag name differs from the open element (strict mode only)
    MismatchedEndTag { expected: String, found: String },
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter { mode, character } => {
                write!(f, "unexpected character {character:?} in mode {mode}")
            }
            Self::UnexpectedEndOfInput { mode } => {
                write!(f, "unexpected end of input in mode {mode}")
            }
            Self::UnterminatedElement { depth } => {
                write!(f, "unterminated element: {depth} still open")
            }
            Self::UnexpectedEndTag { name } => write!(f, "unexpected end tag: {name}"),
            Self::MismatchedEndTag { expected, found } => {
                write!(f, "mismatched end tag: expected {expected}, found {found}")
            }
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
        }
    }
}

/// Main error type for kxml
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    pos: Pos,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, pos: Pos) -> Self {
        let message = kind.to_string();
        Self { kind, pos, message }
    }

    pub fn with_message(kind: ErrorKind, pos: Pos, message: impl Into<String>) -> Self {
        Self {
            kind,
            pos,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at {}: {}", self.pos, self.message)
    }
}

/// Result type alias for kxml
pub type Result<T> = std::result::Result<T, Error>;
