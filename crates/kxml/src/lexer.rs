//! Tokenizer: characters in, text runs and completed tags out

pub mod cursor;
pub mod event;
pub mod state;
pub mod tokenizer;

pub use event::{Event, Tag, TagKind};
pub use state::Mode;
pub use tokenizer::Tokenizer;
