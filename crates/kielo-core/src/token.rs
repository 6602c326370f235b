// Token and sentence values returned by text segmentation

use crate::enums::{SentenceType, TokenType};

/// A classified run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub token_type: TokenType,
    pub text: String,
    /// Start offset in characters.
    pub pos: usize,
}

impl Token {
    pub fn new(token_type: TokenType, text: impl Into<String>, pos: usize) -> Self {
        Self {
            token_type,
            text: text.into(),
            pos,
        }
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One sentence-level segment: how confidently the *next* sentence starts
/// after it, and its length in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sentence {
    pub sentence_type: SentenceType,
    pub len: usize,
}

impl Sentence {
    pub fn new(sentence_type: SentenceType, len: usize) -> Self {
        Self { sentence_type, len }
    }
}
