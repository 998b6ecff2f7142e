//! Tokenizer modes and character classes

use std::fmt;

/// Active mode of the tokenizer state machine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Between tags, accumulating text
    #[default]
    Neutral,
    /// Just read `<`
    SeenLeftAngle,
    /// Read `=` after an attribute name, waiting for the opening quote
    SeenEquals,
    InTagName,
    /// Reading the local part of a `prefix:local` tag name
    InTagNamespace,
    /// Inside a tag, between name/attributes
    InTagBody,
    InAttrName,
    /// Reading the local part of a `prefix:local` attribute name
    InAttrNamespace,
    InAttrValue,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Classification of a single input character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    LeftAngle,
    RightAngle,
    Colon,
    Whitespace,
    Quote,
    Equals,
    Question,
    Slash,
    Ordinary,
}

impl CharClass {
    pub const fn of(ch: char) -> Self {
        match ch {
            '<' => Self::LeftAngle,
            '>' => Self::RightAngle,
            ':' => Self::Colon,
            ' ' | '\t' | '\r' | '\n' => Self::Whitespace,
            '"' => Self::Quote,
            '=' => Self::Equals,
            '?' => Self::Question,
            '/' => Self::Slash,
            _ => Self::Ordinary,
        }
    }
}
