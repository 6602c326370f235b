// Sentence boundaries over the token stream

use kielo_core::character::{is_hyphen, is_lower, is_quotation_mark, is_upper};
use kielo_core::{Sentence, SentenceType, TokenType};

use super::next_token;

/// Tells whether a word together with its trailing dot ("esim.") is a known
/// abbreviation.
pub type AbbreviationCheck<'a> = &'a dyn Fn(&[char]) -> bool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    /// `!`, `?` or a full stop.
    Strong,
    /// An ellipsis, a colon, an end inside a quotation or a dot after an
    /// initial, ordinal or abbreviation.
    Weak,
}

/// Still part of the ending sentence when they follow the end directly.
fn trails_end(c: char) -> bool {
    is_quotation_mark(c) || matches!(c, ')' | ']' | '}' | '\u{2019}' | '!' | '?' | '.' | '\u{2026}')
}

/// Find where the sentence starting `text` ends.
///
/// The length covers the terminating punctuation, any closing quotes and
/// brackets after it and the whitespace up to the next sentence. When no
/// further sentence starts, the rest of the text is returned as
/// [`SentenceType::NoStart`]. Empty input gives `(SentenceType::None, 0)`.
pub fn next_sentence(
    text: &[char],
    abbreviation: Option<AbbreviationCheck<'_>>,
) -> (SentenceType, usize) {
    if text.is_empty() {
        return (SentenceType::None, 0);
    }

    let mut pos = 0;
    let mut end: Option<End> = None;
    let mut spaced = false;
    let mut in_quote = false;
    let mut quoted_end = false;
    let mut word_start: Option<usize> = None;

    while pos < text.len() {
        let (token_type, len) = next_token(&text[pos..], false);
        let c = text[pos];

        if let Some(strength) = end {
            match token_type {
                TokenType::Whitespace => spaced = true,
                TokenType::Punctuation if !spaced && trails_end(c) => {
                    if is_quotation_mark(c) {
                        in_quote = false;
                    }
                }
                _ => {
                    let lowercase = token_type == TokenType::Word && is_lower(c);
                    let kind = match strength {
                        End::Strong if spaced && !lowercase => SentenceType::Probable,
                        _ => SentenceType::Possible,
                    };
                    return (kind, pos);
                }
            }
            pos += len;
            continue;
        }

        if token_type == TokenType::Punctuation {
            let found = match c {
                '!' | '?' => Some(End::Strong),
                '.' if len == 3 => Some(End::Weak),
                '.' => match word_start {
                    Some(start) if is_dot_word(&text[start..=pos], abbreviation) => {
                        Some(End::Weak)
                    }
                    _ => Some(End::Strong),
                },
                '\u{2026}' | ':' => Some(End::Weak),
                q if is_quotation_mark(q) => {
                    if in_quote && quoted_end && text.get(pos + 1) != Some(&',') {
                        end = Some(End::Weak);
                    }
                    in_quote = !in_quote;
                    quoted_end = false;
                    None
                }
                _ => None,
            };
            if let Some(found) = found {
                if in_quote {
                    quoted_end = true;
                } else {
                    end = Some(found);
                }
            }
        }

        word_start = (token_type == TokenType::Word).then_some(pos);
        pos += len;
    }

    (SentenceType::NoStart, text.len())
}

/// Split the whole text into sentences whose lengths add up to the text
/// length. The last one has type [`SentenceType::NoStart`].
pub fn sentences(text: &[char], abbreviation: Option<AbbreviationCheck<'_>>) -> Vec<Sentence> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let (sentence_type, len) = next_sentence(&text[pos..], abbreviation);
        if len == 0 {
            break;
        }
        out.push(Sentence::new(sentence_type, len));
        pos += len;
    }
    out
}

/// The dot belongs to the word: an initial, an ordinal number or an
/// abbreviation. `word` includes the dot.
pub(crate) fn is_dot_word(word: &[char], abbreviation: Option<AbbreviationCheck<'_>>) -> bool {
    let stem = &word[..word.len() - 1];
    let initial = stem.len() == 1 && is_upper(stem[0]);
    let ordinal = stem
        .iter()
        .all(|&c| c.is_ascii_digit() || c == '.' || is_hyphen(c));
    initial || ordinal || abbreviation.is_some_and(|is_abbreviation| is_abbreviation(word))
}
