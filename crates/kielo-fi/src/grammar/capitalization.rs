// Capitalization across the sentences of a paragraph
//
// A small state machine walks from word to word. The separators between two
// words decide what case the next word should start with.

use kielo_core::TokenType;
use kielo_core::case::{CaseType, detect_case};
use kielo_core::character::{
    is_finnish_quotation_mark, is_lower, is_upper, simple_lower, simple_upper,
};
use kielo_core::grammar_error::{
    GCERR_MISPLACED_CLOSING_PARENTHESIS, GCERR_WRITE_FIRST_LOWERCASE, GCERR_WRITE_FIRST_UPPERCASE,
    GrammarError,
};

use super::GrammarOptions;
use super::paragraph::{GrammarSentence, GrammarToken, Paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initial,
    Upper,
    Lower,
    DontCare,
    Quoted,
}

/// Sentences in capitals or with foreign quotation marks are left alone.
fn skip_sentence(sentence: &GrammarSentence) -> bool {
    if sentence.tokens.iter().any(|t| t.first() == Some('\u{201C}')) {
        return true;
    }
    !sentence
        .tokens
        .iter()
        .filter(|t| t.is_word())
        .any(|t| t.text.iter().copied().any(is_lower))
}

struct Walker<'a> {
    tokens: Vec<&'a GrammarToken>,
    at: usize,
    word: Option<&'a GrammarToken>,
    before_word: Option<&'a GrammarToken>,
    /// Open quotation marks and brackets.
    open: Vec<char>,
    sentence_ended: bool,
    options: GrammarOptions,
    errors: Vec<GrammarError>,
}

impl<'a> Walker<'a> {
    /// Move to the next word and return the tokens passed on the way.
    fn advance(&mut self) -> Vec<&'a GrammarToken> {
        let mut separators = Vec::new();
        self.before_word = self.word;
        self.word = None;
        while let Some(&token) = self.tokens.get(self.at) {
            self.at += 1;
            if token.is_word() {
                self.word = Some(token);
                break;
            }
            separators.push(token);
            self.before_word = Some(token);
        }
        separators
    }

    /// Track quotes and brackets in `separators`. Returns whether there was
    /// a quotation mark among them.
    fn track(&mut self, separators: &[&GrammarToken]) -> bool {
        let mut quotes = false;
        for t in separators.iter().filter(|t| t.token_type == TokenType::Punctuation) {
            let Some(c) = t.first() else { continue };
            match c {
                q if is_finnish_quotation_mark(q) => {
                    quotes = true;
                    if self.open.last() == Some(&q) {
                        self.open.pop();
                    } else {
                        self.open.push(q);
                    }
                }
                '(' | '[' => self.open.push(c),
                ')' | ']' => match self.open.last() {
                    None => self.errors.push(GrammarError::new(
                        GCERR_MISPLACED_CLOSING_PARENTHESIS,
                        t.pos,
                        1,
                    )),
                    Some('(' | '[') => {
                        self.open.pop();
                    }
                    Some(_) => {}
                },
                '.' | '!' | '?' => self.sentence_ended = true,
                _ => {}
            }
        }
        quotes
    }

    fn initial(&mut self) -> State {
        let separators = self.advance();
        self.track(&separators);
        if !self.open.is_empty() {
            State::Quoted
        } else if self.options.accept_bulleted_lists || has_text(&separators, "-") {
            State::DontCare
        } else {
            State::Upper
        }
    }

    fn upper(&mut self, word: &'a GrammarToken) -> State {
        let before = self.before_word;
        let separators = self.advance();
        if list_item(word, &separators) {
            self.track(&separators[1..]);
            return State::DontCare;
        }
        if let Some(c) = word.first() {
            if !is_upper(c) && !c.is_ascii_digit() && !word.possible_sentence_start {
                self.errors.push(recased(GCERR_WRITE_FIRST_UPPERCASE, word, simple_upper));
            }
        }
        let after_symbol = before.is_some_and(|t| t.token_type != TokenType::Whitespace);
        self.after(State::Upper, word, &separators, after_symbol)
    }

    fn lower(&mut self, word: &'a GrammarToken) -> State {
        let wrong = word.valid
            && word.lowercase_first
            && !word.possible_sentence_start
            && !word.possible_geographical_name
            && word.first().is_some_and(is_upper)
            && word.len() > 1
            && !matches!(word.text[1], '-' | ':')
            && detect_case(&word.text) != CaseType::AllUpper;
        if wrong {
            self.errors.push(recased(GCERR_WRITE_FIRST_LOWERCASE, word, simple_lower));
        }
        let separators = self.advance();
        self.after(State::Lower, word, &separators, false)
    }

    fn dont_care(&mut self, word: &'a GrammarToken) -> State {
        let separators = self.advance();
        self.after(State::DontCare, word, &separators, false)
    }

    /// No word to look at: skip to the next one.
    fn skip(&mut self) -> State {
        let separators = self.advance();
        self.track(&separators);
        State::DontCare
    }

    fn quoted(&mut self) -> State {
        let separators = self.advance();
        let quotes = self.track(&separators);
        if !self.open.is_empty() {
            State::Quoted
        } else if ends_sentence(&separators) {
            self.sentence_ended = false;
            State::Upper
        } else if quotes || self.sentence_ended {
            self.sentence_ended = false;
            State::DontCare
        } else {
            State::Lower
        }
    }

    /// Next state after `word` and the separators following it.
    /// `after_symbol` is set for a word not preceded by whitespace.
    fn after(
        &mut self,
        from: State,
        word: &GrammarToken,
        separators: &[&GrammarToken],
        after_symbol: bool,
    ) -> State {
        if list_item(word, separators) {
            self.track(&separators[1..]);
            return State::DontCare;
        }
        self.track(separators);
        if !self.open.is_empty() {
            return State::Quoted;
        }
        let institution = from != State::DontCare
            && word.geographical_genitive
            && separators.len() == 1
            && separators[0].is(" ");
        let chapter =
            from != State::Lower && self.options.accept_titles && is_chapter_number(&word.text);
        // "§ 12" or "(3" continue without a new sentence
        let number = from == State::Upper && after_symbol && is_integer(&word.text);
        if has_text(separators, "\t") || institution || chapter || number {
            return State::DontCare;
        }
        if ends_sentence(separators) {
            self.sentence_ended = true;
            return State::Upper;
        }
        State::Lower
    }
}

/// Check capitalization over the whole paragraph.
pub(crate) fn check(
    paragraph: &Paragraph,
    options: &GrammarOptions,
    errors: &mut Vec<GrammarError>,
) {
    let tokens = paragraph
        .sentences
        .iter()
        .filter(|s| !skip_sentence(s))
        .flat_map(|s| s.tokens.iter())
        .collect();
    let mut walker = Walker {
        tokens,
        at: 0,
        word: None,
        before_word: None,
        open: Vec::new(),
        sentence_ended: false,
        options: *options,
        errors: Vec::new(),
    };

    let mut state = State::Initial;
    while walker.at < walker.tokens.len() || walker.word.is_some() {
        state = match (state, walker.word) {
            (State::Initial, _) => walker.initial(),
            (State::Quoted, _) => walker.quoted(),
            (_, None) => walker.skip(),
            (State::Upper, Some(word)) => walker.upper(word),
            (State::Lower, Some(word)) => walker.lower(word),
            (State::DontCare, Some(word)) => walker.dont_care(word),
        };
    }
    errors.append(&mut walker.errors);
}

fn recased(code: i32, word: &GrammarToken, map: fn(char) -> char) -> GrammarError {
    let mut text = word.text.clone();
    text[0] = map(text[0]);
    GrammarError::with_suggestions(code, word.pos, word.len(), vec![text.into_iter().collect()])
}

fn has_text(tokens: &[&GrammarToken], text: &str) -> bool {
    tokens.iter().any(|t| t.is(text))
}

/// The last punctuation mark other than a comma is `.`, `!` or `?`.
fn ends_sentence(tokens: &[&GrammarToken]) -> bool {
    tokens
        .iter()
        .rev()
        .find(|t| t.token_type == TokenType::Punctuation && t.first() != Some(','))
        .is_some_and(|t| matches!(t.first(), Some('.' | '!' | '?')))
}

/// "a)", "3.2)" or "iv)" opening a list item.
fn list_item(word: &GrammarToken, separators: &[&GrammarToken]) -> bool {
    separators.first().is_some_and(|t| t.first() == Some(')'))
        && (word.len() == 1 || is_chapter_number(&word.text) || is_roman_numeral(&word.text))
}

fn is_integer(word: &[char]) -> bool {
    !word.is_empty() && word.iter().all(char::is_ascii_digit)
}

/// "3", "3.4" or "3.65.3".
fn is_chapter_number(word: &[char]) -> bool {
    !word.is_empty()
        && word
            .split(|&c| c == '.')
            .all(|part| !part.is_empty() && part.iter().all(char::is_ascii_digit))
}

fn is_roman_numeral(word: &[char]) -> bool {
    !word.is_empty() && word.iter().all(|c| "ivxIVX".contains(*c))
}
