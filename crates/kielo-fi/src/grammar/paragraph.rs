// A paragraph split into sentences of annotated tokens

use kielo_core::analysis::{
    ATTR_CLASS, ATTR_MOOD, ATTR_NEGATIVE, ATTR_PARTICIPLE, ATTR_PERSON,
    ATTR_POSSIBLE_GEOGRAPHICAL_NAME, ATTR_REQUIRE_FOLLOWING_VERB, ATTR_SIJAMUOTO, ATTR_STRUCTURE,
};
use kielo_core::{SentenceType, TokenType};

use crate::morphology::Analyzer;
use crate::tokenizer::sentence::{AbbreviationCheck, is_dot_word};
use crate::tokenizer::{next_sentence, next_token};

/// Paragraphs with more sentences are not checked.
pub(crate) const MAX_SENTENCES: usize = 200;
/// Sentences with more tokens are not checked.
pub(crate) const MAX_TOKENS: usize = 500;

const SOFT_HYPHEN: char = '\u{00AD}';

/// A word after one of these may start a new sentence.
const SENTENCE_SEPARATORS: [char; 4] = [':', '\u{2026}', '\u{2013}', '\u{2014}'];

/// Infinitive a verb requires after it, or the infinitive a verb form is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Infinitive {
    #[default]
    None,
    A,
    Ma,
}

impl Infinitive {
    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("A-infinitive") => Infinitive::A,
            Some("MA-infinitive") => Infinitive::Ma,
            _ => Infinitive::None,
        }
    }
}

/// A token with what the checks need to know about the word.
///
/// "Is" flags hold only when every analysis agrees, "possible" flags when
/// at least one does.
#[derive(Debug, Clone, Default)]
pub(crate) struct GrammarToken {
    pub token_type: TokenType,
    pub text: Vec<char>,
    /// Offset in the paragraph.
    pub pos: usize,
    pub valid: bool,
    /// Every analysis wants a lowercase first letter.
    pub lowercase_first: bool,
    pub possible_sentence_start: bool,
    pub geographical_genitive: bool,
    pub possible_geographical_name: bool,
    pub possible_main_verb: bool,
    pub main_verb: bool,
    pub negative_verb: bool,
    pub positive_verb: bool,
    pub conjunction: bool,
    pub possible_conjunction: bool,
    pub requires: Infinitive,
    pub infinitive: Infinitive,
}

impl GrammarToken {
    pub fn new(token_type: TokenType, text: Vec<char>, pos: usize) -> Self {
        Self {
            token_type,
            text,
            pos,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn end(&self) -> usize {
        self.pos + self.text.len()
    }

    pub fn first(&self) -> Option<char> {
        self.text.first().copied()
    }

    pub fn is(&self, text: &str) -> bool {
        self.text.iter().copied().eq(text.chars())
    }

    pub fn is_word(&self) -> bool {
        self.token_type == TokenType::Word
    }

    pub fn is_punctuation(&self, c: char) -> bool {
        self.token_type == TokenType::Punctuation && self.first() == Some(c)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GrammarSentence {
    pub tokens: Vec<GrammarToken>,
    pub pos: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Paragraph {
    pub sentences: Vec<GrammarSentence>,
}

impl Paragraph {
    /// Split `text` into sentences and annotate every word. Sentence
    /// segments of uncertain end are joined to the next one.
    ///
    /// Returns `None` when the paragraph is too long to check.
    pub fn analyze(text: &[char], analyzer: &dyn Analyzer) -> Option<Self> {
        let abbreviation = |word: &[char]| !analyzer.analyze_brief(word).is_empty();
        let mut paragraph = Paragraph::default();
        let mut pos = 0;

        while pos < text.len() {
            let start = pos;
            loop {
                let (sentence_type, len) = next_sentence(&text[pos..], Some(&abbreviation));
                pos += len;
                if sentence_type != SentenceType::Possible || len == 0 {
                    break;
                }
            }
            if pos == start {
                break;
            }

            let tokens = sentence_tokens(&text[start..pos], start, analyzer, &abbreviation)?;
            paragraph.sentences.push(GrammarSentence {
                tokens,
                pos: start,
            });
            if paragraph.sentences.len() > MAX_SENTENCES {
                log::debug!("paragraph of {} chars has too many sentences", text.len());
                return None;
            }
        }
        Some(paragraph)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &GrammarToken> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }
}

fn sentence_tokens(
    text: &[char],
    offset: usize,
    analyzer: &dyn Analyzer,
    abbreviation: AbbreviationCheck<'_>,
) -> Option<Vec<GrammarToken>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut after_separator = false;

    while pos < text.len() {
        let (token_type, len) = next_token(&text[pos..], false);
        if len == 0 {
            break;
        }
        let mut token = GrammarToken::new(token_type, text[pos..pos + len].to_vec(), offset + pos);
        annotate(&mut token, analyzer);

        match token_type {
            TokenType::Word if after_separator => {
                token.possible_sentence_start = true;
                after_separator = false;
            }
            TokenType::Punctuation => {
                // a full stop inside a sentence follows an abbreviation
                let dot_word = text[pos] == '.'
                    && tokens.last().is_some_and(|t: &GrammarToken| {
                        t.is_word() && t.end() == offset + pos && {
                            let mut word = t.text.clone();
                            word.push('.');
                            is_dot_word(&word, Some(abbreviation))
                        }
                    });
                after_separator |= len == 3
                    || dot_word
                    || (len == 1 && SENTENCE_SEPARATORS.contains(&text[pos]));
            }
            _ => {}
        }

        tokens.push(token);
        if tokens.len() > MAX_TOKENS {
            log::debug!("sentence at {offset} has too many tokens");
            return None;
        }
        pos += len;
    }
    Some(tokens)
}

/// Fill in the word flags of `token` from its analyses.
pub(crate) fn annotate(token: &mut GrammarToken, analyzer: &dyn Analyzer) {
    if !token.is_word() {
        return;
    }
    let word: Vec<char> = token.text.iter().copied().filter(|&c| c != SOFT_HYPHEN).collect();
    let analyses = analyzer.analyze_brief(&word);
    if analyses.is_empty() {
        return;
    }

    token.valid = true;
    token.lowercase_first = true;
    token.main_verb = true;
    token.negative_verb = true;
    token.positive_verb = true;
    token.conjunction = true;
    let ends_with_a_umlaut = token.text.last() == Some(&'ä');
    let mut follower_seen = false;

    for (i, analysis) in analyses.iter().enumerate() {
        let class = analysis.get(ATTR_CLASS);
        let mood = analysis.get(ATTR_MOOD);
        let negative = analysis.get(ATTR_NEGATIVE);
        let case = analysis.get(ATTR_SIJAMUOTO);
        let structure = analysis.get(ATTR_STRUCTURE).unwrap_or("");

        if !matches!(structure.chars().nth(1), Some('p' | 'q')) {
            token.lowercase_first = false;
            if class == Some("paikannimi") && case == Some("omanto") {
                token.geographical_genitive = true;
            }
        }

        match class {
            // "enkä" is "ja en"
            Some("sidesana") => token.possible_conjunction = true,
            Some("kieltosana") if ends_with_a_umlaut => token.possible_conjunction = true,
            _ => token.conjunction = false,
        }

        match class {
            None => {
                token.positive_verb = false;
                token.possible_main_verb = true;
                token.main_verb = false;
                token.negative_verb = false;
            }
            Some("kieltosana") => {
                token.positive_verb = false;
                token.main_verb = false;
            }
            Some("teonsana") => {
                let person = analysis.get(ATTR_PERSON);
                let conditional_third = matches!(mood, None | Some("conditional"))
                    && matches!(person, None | Some("3"));
                if negative != Some("false") || conditional_third {
                    token.positive_verb = false;
                }
                let infinitive = matches!(mood, Some("A-infinitive" | "E-infinitive"));
                if !infinitive && negative != Some("true") {
                    token.possible_main_verb = true;
                }
                if mood != Some("indicative") {
                    token.main_verb = false;
                }
                token.negative_verb = false;
            }
            Some(_) => {
                token.positive_verb = false;
                token.main_verb = false;
                token.negative_verb = false;
            }
        }

        if analysis.is(ATTR_POSSIBLE_GEOGRAPHICAL_NAME, "true") {
            token.possible_geographical_name = true;
        }

        let required = Infinitive::from_value(analysis.get(ATTR_REQUIRE_FOLLOWING_VERB));
        if required == Infinitive::None || i == 0 {
            token.requires = required;
        } else if token.requires != required {
            token.requires = Infinitive::None;
        }

        match Infinitive::from_value(mood) {
            Infinitive::None => {
                let agent_abessive = analysis.get(ATTR_PARTICIPLE) == Some("agent")
                    && case == Some("vajanto");
                if agent_abessive {
                    token.infinitive = Infinitive::None;
                }
            }
            form if !follower_seen => {
                token.infinitive = form;
                follower_seen = true;
            }
            form if token.infinitive != form => token.infinitive = Infinitive::None,
            _ => {}
        }
    }
}
