//! Character-level tokenizer state machine

use tracing::trace;

use crate::error::{Error, ErrorKind, Pos, Result};
use crate::lexer::cursor::Cursor;
use crate::lexer::event::{Event, TagBuilder, TagKind};
use crate::lexer::state::{CharClass, Mode};

/// Single-pass tokenizer producing text runs and completed tags
///
/// The iterator is fused: after an error or the end of input it yields `None`.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    mode: Mode,
    tag: TagBuilder,
    text: String,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input` with surrounding whitespace ignored
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::trimmed(input),
            mode: Mode::Neutral,
            tag: TagBuilder::default(),
            text: String::new(),
            done: false,
        }
    }

    pub const fn position(&self) -> Pos {
        self.cursor.position()
    }

    /// Apply one character, returning the event it completes, if any
    fn step(&mut self, ch: char, pos: Pos) -> Result<Option<Event>> {
        use CharClass as C;
        use Mode as M;

        let before = self.mode;
        let mut event = None;

        match (self.mode, CharClass::of(ch)) {
            (M::Neutral, C::LeftAngle) => {
                event = Some(Event::Text(std::mem::take(&mut self.text)));
                self.mode = M::SeenLeftAngle;
            }
            (M::Neutral, _) => self.text.push(ch),

            (M::SeenLeftAngle, C::Question) => self.tag.kind = Some(TagKind::Header),
            (M::SeenLeftAngle, C::Slash) => self.tag.kind = Some(TagKind::End),
            (M::SeenLeftAngle, C::Ordinary) => {
                self.tag.name.push_first(ch);
                if self.tag.kind.is_none() {
                    self.tag.kind = Some(TagKind::Start);
                }
                self.mode = M::InTagName;
            }

            (M::InTagName | M::InTagNamespace | M::InTagBody, C::RightAngle) => {
                event = Some(self.complete_tag(ch, pos)?);
            }
            (M::InTagName, C::Colon) => self.mode = M::InTagNamespace,
            (M::InTagName | M::InTagNamespace, C::Whitespace) => self.mode = M::InTagBody,
            (M::InTagName | M::InTagNamespace, C::Slash) => {
                self.tag.kind = Some(TagKind::SelfClosing);
                self.mode = M::InTagBody;
            }
            (M::InTagName, C::Ordinary) => self.tag.name.push_first(ch),
            (M::InTagNamespace, C::Ordinary) => self.tag.name.push_second(ch),

            (M::InTagBody, C::Whitespace | C::Question) => {}
            (M::InTagBody, C::Slash) => self.tag.kind = Some(TagKind::SelfClosing),
            (M::InTagBody, C::Ordinary) => {
                self.tag.attr.name.push_first(ch);
                self.mode = M::InAttrName;
            }

            (
                M::InAttrName | M::InAttrNamespace,
                C::RightAngle | C::Whitespace | C::Question,
            ) => {
                self.tag.finish_attribute();
                self.mode = M::InTagBody;
            }
            (M::InAttrName | M::InAttrNamespace, C::Equals) => self.mode = M::SeenEquals,
            (M::InAttrName, C::Colon) => self.mode = M::InAttrNamespace,
            (M::InAttrName, C::Ordinary) => self.tag.attr.name.push_first(ch),
            (M::InAttrNamespace, C::Ordinary) => self.tag.attr.name.push_second(ch),

            (M::SeenEquals, C::Quote) => {
                self.tag.attr.value.push(ch);
                self.mode = M::InAttrValue;
            }

            (M::InAttrValue, C::Quote | C::Question) => {
                self.tag.finish_attribute();
                self.mode = M::InTagBody;
            }
            (
                M::InAttrValue,
                C::Colon | C::Whitespace | C::Equals | C::Slash | C::Ordinary,
            ) => self.tag.attr.value.push(ch),

            (mode, _) => return Err(unexpected(mode, ch, pos)),
        }

        trace!(?before, after = ?self.mode, ?ch, %pos, "transition");
        Ok(event)
    }

    fn complete_tag(&mut self, ch: char, pos: Pos) -> Result<Event> {
        let builder = std::mem::take(&mut self.tag);
        let tag = builder
            .finish()
            .ok_or_else(|| unexpected(self.mode, ch, pos))?;
        self.mode = Mode::Neutral;
        Ok(Event::Tag(tag))
    }

    fn finish(&mut self) -> Option<Result<Event>> {
        self.done = true;
        if self.mode != Mode::Neutral {
            return Some(Err(Error::new(
                ErrorKind::UnexpectedEndOfInput { mode: self.mode },
                self.cursor.position(),
            )));
        }
        if self.text.is_empty() {
            None
        } else {
            Some(Ok(Event::Text(std::mem::take(&mut self.text))))
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let pos = self.cursor.position();
            let Some(ch) = self.cursor.bump() else {
                return self.finish();
            };
            match self.step(ch, pos) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

fn unexpected(mode: Mode, character: char, pos: Pos) -> Error {
    Error::new(ErrorKind::UnexpectedCharacter { mode, character }, pos)
}
