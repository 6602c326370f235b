//! Finnish language engine over compiled VFST dictionaries.
//!
//! Every component works on `&[char]` words and plain owned results. The
//! components can be used on their own, but most callers want a
//! [`Session`] (feature `session`), which owns the dictionary, the
//! [`Options`] and the speller caches.
//!
//! - [`morphology`]: analyses from `mor.vfst` (feature `analyze`)
//! - [`speller`]: correctness checks with case and hyphen rules (`spell`)
//! - [`suggest`]: best-first edit search for corrections (`suggest`)
//! - [`hyphenator`]: hyphenation patterns (`hyphenate`)
//! - [`tokenizer`]: tokens and sentences (`tokenize`)
//! - [`grammar`]: paragraph-level grammar checks (`grammar`)

pub mod error;
pub mod options;

#[cfg(feature = "spell")]
pub mod cache;
#[cfg(feature = "grammar")]
pub mod grammar;
#[cfg(feature = "hyphenate")]
pub mod hyphenator;
#[cfg(feature = "analyze")]
pub mod morphology;
#[cfg(feature = "session")]
pub mod session;
#[cfg(feature = "spell")]
pub mod speller;
#[cfg(feature = "suggest")]
pub mod suggest;
#[cfg(feature = "tokenize")]
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod test_lexicon;

pub use error::{KieloError, Result};
pub use options::Options;

#[cfg(feature = "analyze")]
pub use morphology::{Analyzer, FinnishAnalyzer};
#[cfg(feature = "session")]
pub use session::Session;
#[cfg(feature = "spell")]
pub use speller::Speller;

/// Longer words are never looked up: they are misspelled and unanalyzable.
pub const MAX_WORD_CHARS: usize = 255;

/// Version reported by [`Session::version`] and the C interface.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
