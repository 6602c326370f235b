//! Tokens and sentences of running text.
//!
//! Both scanners work on `&[char]` starting at the beginning of the slice
//! and report the length of what they found, so callers walk the text by
//! re-slicing. Neither keeps state between calls.

mod links;
pub mod sentence;

use kielo_core::character::{CharType, is_finnish_quotation_mark, is_hyphen, is_whitespace};
use kielo_core::{Token, TokenType};

pub use sentence::{next_sentence, sentences};

/// Classify the token at the start of `text` and return its length.
///
/// Returns `(TokenType::None, 0)` for empty input. With `ignore_dot` a dot
/// that would end a word is kept as part of it.
pub fn next_token(text: &[char], ignore_dot: bool) -> (TokenType, usize) {
    let Some(&first) = text.first() else {
        return (TokenType::None, 0);
    };
    match CharType::of(first) {
        CharType::Letter | CharType::Digit => (TokenType::Word, word_length(text, ignore_dot)),
        CharType::Whitespace => {
            let n = text.iter().take_while(|&&c| is_whitespace(c)).count();
            (TokenType::Whitespace, n)
        }
        CharType::Punctuation if is_hyphen(first) && starts_word(&text[1..]) => {
            (TokenType::Word, 1 + word_length(&text[1..], ignore_dot))
        }
        CharType::Punctuation if text.starts_with(&['.', '.', '.']) => (TokenType::Punctuation, 3),
        CharType::Punctuation => (TokenType::Punctuation, 1),
        CharType::Unknown => (TokenType::Unknown, 1),
    }
}

/// Split the whole text into tokens. Token positions are char offsets.
pub fn tokens(text: &[char], ignore_dot: bool) -> Vec<Token> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let (token_type, len) = next_token(&text[pos..], ignore_dot);
        if len == 0 {
            break;
        }
        let word: String = text[pos..pos + len].iter().collect();
        out.push(Token::new(token_type, word, pos));
        pos += len;
    }
    log::trace!("{} tokens in {} chars", out.len(), text.len());
    out
}

fn starts_word(text: &[char]) -> bool {
    text.first()
        .is_some_and(|&c| matches!(CharType::of(c), CharType::Letter | CharType::Digit))
}

/// Length of the word starting `text`, which begins with a letter or digit.
fn word_length(text: &[char], ignore_dot: bool) -> usize {
    let link = links::link_length(text);
    if link > 0 {
        return link;
    }

    let mut letters = false;
    let mut in_number = false;
    for (i, &c) in text.iter().enumerate() {
        let next = text.get(i + 1).copied();
        let next_type = next.map(CharType::of);
        let joins = match CharType::of(c) {
            CharType::Letter => {
                letters = true;
                in_number = false;
                true
            }
            CharType::Digit => {
                in_number = true;
                true
            }
            CharType::Whitespace | CharType::Unknown => false,
            CharType::Punctuation => match c {
                // "vaa'an", "EU:n"
                '\'' | '\u{2019}' | ':' => next_type == Some(CharType::Letter),
                '-' | '\u{00AD}' | '\u{2010}' | '\u{2011}' => match next_type {
                    Some(CharType::Letter | CharType::Digit) => true,
                    // "linja- ja raitiovaunu", "EU-"
                    None | Some(CharType::Whitespace | CharType::Unknown) => return i + 1,
                    _ if next == Some(',') || next.is_some_and(is_finnish_quotation_mark) => {
                        return i + 1;
                    }
                    _ => false,
                },
                '.' => match next_type {
                    Some(CharType::Letter) => true,
                    Some(CharType::Digit) => !letters,
                    _ => return i + usize::from(ignore_dot),
                },
                ',' => in_number && next_type == Some(CharType::Digit),
                _ => false,
            },
        };
        if !joins {
            return i;
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(s: &str) -> Vec<(TokenType, String)> {
        let chars: Vec<char> = s.chars().collect();
        tokens(&chars, false)
            .into_iter()
            .map(|t| (t.token_type, t.text))
            .collect()
    }

    fn first(s: &str) -> (TokenType, usize) {
        let chars: Vec<char> = s.chars().collect();
        next_token(&chars, false)
    }

    fn words(s: &str) -> Vec<String> {
        split(s)
            .into_iter()
            .filter(|(t, _)| *t == TokenType::Word)
            .map(|(_, w)| w)
            .collect()
    }

    #[test]
    fn empty_text() {
        assert_eq!(first(""), (TokenType::None, 0));
        assert!(split("").is_empty());
    }

    #[test]
    fn simple_sentence() {
        assert_eq!(
            split("Koira juoksi."),
            vec![
                (TokenType::Word, "Koira".to_string()),
                (TokenType::Whitespace, " ".to_string()),
                (TokenType::Word, "juoksi".to_string()),
                (TokenType::Punctuation, ".".to_string()),
            ]
        );
    }

    #[test]
    fn whitespace_runs_are_one_token() {
        assert_eq!(first(" \t\n koira"), (TokenType::Whitespace, 4));
        assert_eq!(first("\u{00A0}x"), (TokenType::Whitespace, 1));
    }

    #[test]
    fn inner_punctuation_joins_words() {
        assert_eq!(words("linja-auto vaa'an EU:n 3.14 1,5 esim.koira"), [
            "linja-auto",
            "vaa'an",
            "EU:n",
            "3.14",
            "1,5",
            "esim.koira"
        ]);
    }

    #[test]
    fn hyphen_at_word_edges() {
        assert_eq!(words("linja- ja raitiovaunut"), ["linja-", "ja", "raitiovaunut"]);
        assert_eq!(words("-koira"), ["-koira"]);
        assert_eq!(words("EU-, USA-"), ["EU-", "USA-"]);
        assert_eq!(split("koira-."), vec![
            (TokenType::Word, "koira".to_string()),
            (TokenType::Punctuation, "-".to_string()),
            (TokenType::Punctuation, ".".to_string()),
        ]);
        assert_eq!(first("- koira"), (TokenType::Punctuation, 1));
        assert_eq!(first("--"), (TokenType::Punctuation, 1));
    }

    #[test]
    fn dots_end_words_unless_ignored() {
        assert_eq!(words("talo. Koira"), ["talo", "Koira"]);
        assert_eq!(words("v.2010"), ["v", "2010"]);
        let chars: Vec<char> = "esim. koira".chars().collect();
        assert_eq!(next_token(&chars, true), (TokenType::Word, 5));
    }

    #[test]
    fn ellipsis_and_quotes() {
        assert_eq!(first("..."), (TokenType::Punctuation, 3));
        assert_eq!(first(".."), (TokenType::Punctuation, 1));
        assert_eq!(first("\u{2026}"), (TokenType::Punctuation, 1));
        assert_eq!(first("\u{00BB}"), (TokenType::Punctuation, 1));
        assert_eq!(first("\""), (TokenType::Punctuation, 1));
    }

    #[test]
    fn unknown_characters() {
        assert_eq!(first("#"), (TokenType::Unknown, 1));
        assert_eq!(split("a@b"), vec![
            (TokenType::Word, "a".to_string()),
            (TokenType::Unknown, "@".to_string()),
            (TokenType::Word, "b".to_string()),
        ]);
    }

    #[test]
    fn links_are_single_words() {
        assert_eq!(words("katso https://example.com/a?b=c. Sitten"), [
            "katso",
            "https://example.com/a?b=c",
            "Sitten"
        ]);
        assert_eq!(words("posti: foo@bar.com."), ["posti", "foo@bar.com"]);
    }

    #[test]
    fn positions_cover_the_text() {
        let text: Vec<char> = "Hän sanoi: \u{201D}Hei!\u{201D} -- ja lähti...".chars().collect();
        let toks = tokens(&text, false);
        let mut pos = 0;
        for t in &toks {
            assert_eq!(t.pos, pos);
            pos += t.char_len();
        }
        assert_eq!(pos, text.len());
    }
}
