// Shared setup for the integration tests

#![allow(dead_code)]

#[path = "../../src/test_lexicon.rs"]
mod test_lexicon;

use kielo_fi::{Options, Session};

pub use test_lexicon::{MORPHOLOGY, autocorrect, morphology};

/// A session over the test lexicon, with autocorrect.
pub fn session() -> Session {
    Session::open(&morphology(), Some(&autocorrect())).unwrap()
}

pub fn session_with(options: Options) -> Session {
    Session::with_options(&morphology(), Some(&autocorrect()), options).unwrap()
}

/// Every surface form of the test lexicon, once.
pub fn words() -> Vec<&'static str> {
    let mut words: Vec<&str> = MORPHOLOGY.iter().map(|&(surface, _)| surface).collect();
    words.dedup();
    words
}
