//! NLP annotation: tokens, part-of-speech tags and named entities for CV text.
//!
//! The matcher only ever sees a `Document`. How the document was produced is
//! hidden behind the `Annotator` trait, carried in `AppState` as
//! `Arc<dyn Annotator>` so tests can swap in a hand-built document.

pub mod entities;
pub mod lexicon;
pub mod pipeline;
pub mod tagger;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use lexicon::Lexicon;
pub use pipeline::RuleBasedAnnotator;

/// Universal part-of-speech tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PartOfSpeech {
    /// Common or proper noun.
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Propn)
    }
}

/// Named-entity categories, serialized with their conventional upper-case labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Org,
    Product,
    WorkOfArt,
    Skill,
    Person,
    Gpe,
    Language,
    Date,
    Cardinal,
}

/// A single token of the annotated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lower: String,
    pub pos: PartOfSpeech,
    /// Byte offset of the token in the source text.
    pub offset: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: PartOfSpeech, offset: usize) -> Self {
        let text = text.into();
        Self {
            lower: text.to_lowercase(),
            text,
            pos,
            offset,
        }
    }
}

/// A recognised entity span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
    /// Token index range `[start, end)`.
    pub start: usize,
    pub end: usize,
}

/// Annotated CV text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Turns raw text into a `Document`. Implementations must be pure with respect
/// to their input: the same text always yields the same document.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Document;
}
