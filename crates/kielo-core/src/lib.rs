//! Value types shared by every kielo crate.
//!
//! Nothing in here touches transducer data. The types are plain owned values
//! so results can outlive the session that produced them.

pub mod analysis;
pub mod attributes;
pub mod case;
pub mod character;
pub mod enums;
pub mod grammar_error;
pub mod token;

pub use analysis::Analysis;
pub use enums::{SentenceType, SpellResult, TokenType};
pub use grammar_error::GrammarError;
pub use token::{Sentence, Token};
