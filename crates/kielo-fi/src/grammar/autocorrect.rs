// Replacements of common misspellings from `autocorr.vfst`

use kielo_core::TokenType;
use kielo_core::character::{is_upper, simple_lower, simple_upper};
use kielo_core::grammar_error::{GCERR_INVALID_SPELLING, GrammarError};
use kielo_fst::TransducerStore;

use super::paragraph::GrammarSentence;

const SOFT_HYPHEN: char = '\u{00AD}';

/// Sentence text as the transducer sees it: every whitespace token is one
/// space and soft hyphens are gone.
struct Normalized {
    chars: Vec<char>,
    /// `(normalized, original)` offset of every token start and the end.
    boundaries: Vec<(usize, usize)>,
    /// `(normalized, original)` offset of every word start.
    words: Vec<(usize, usize)>,
}

impl Normalized {
    fn new(sentence: &GrammarSentence, lower_first: bool) -> Self {
        let mut chars = Vec::new();
        let mut boundaries = Vec::with_capacity(sentence.tokens.len() + 1);
        let mut words = Vec::new();

        for (i, token) in sentence.tokens.iter().enumerate() {
            boundaries.push((chars.len(), token.pos));
            if token.is_word() {
                words.push((chars.len(), token.pos));
            }
            if token.token_type == TokenType::Whitespace {
                chars.push(' ');
                continue;
            }
            for (k, &c) in token.text.iter().enumerate() {
                match c {
                    SOFT_HYPHEN => {}
                    c if lower_first && i == 0 && k == 0 => chars.push(simple_lower(c)),
                    c => chars.push(c),
                }
            }
        }
        if let Some(last) = sentence.tokens.last() {
            boundaries.push((chars.len(), last.end()));
        }

        Self {
            chars,
            boundaries,
            words,
        }
    }

    /// Look up replacements starting at each of the first `limit` words.
    /// Returns whether the first word started one.
    fn scan(
        &self,
        store: &TransducerStore,
        limit: usize,
        upper_first: bool,
        errors: &mut Vec<GrammarError>,
    ) -> bool {
        let mut first_matched = false;
        for (n, &(start, original)) in self.words.iter().take(limit).enumerate() {
            let Some(found) = store.prefix_lookup(&self.chars[start..]) else {
                continue;
            };
            let end = start + found.len;
            let Some(&(_, original_end)) = self.boundaries.iter().find(|&&(b, _)| b == end) else {
                continue;
            };

            let suggestion = if upper_first {
                capitalized(&found.output)
            } else {
                found.output
            };
            log::trace!("autocorrect at {original}: {suggestion}");
            errors.push(GrammarError::with_suggestions(
                GCERR_INVALID_SPELLING,
                original,
                original_end - original,
                vec![suggestion],
            ));
            first_matched |= n == 0;
        }
        first_matched
    }
}

fn capitalized(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => std::iter::once(simple_upper(first)).chain(chars).collect(),
        None => String::new(),
    }
}

/// Report every word sequence of `sentence` the autocorrect transducer has
/// a replacement for. A capitalized first word is also tried in lowercase.
pub(crate) fn check(
    sentence: &GrammarSentence,
    store: &TransducerStore,
    errors: &mut Vec<GrammarError>,
) {
    let normalized = Normalized::new(sentence, false);
    let first_matched = normalized.scan(store, usize::MAX, false, errors);

    let capitalized_start = sentence
        .tokens
        .first()
        .filter(|t| t.is_word())
        .and_then(|t| t.first())
        .is_some_and(is_upper);
    if !first_matched && capitalized_start {
        Normalized::new(sentence, true).scan(store, 1, true, errors);
    }
}
