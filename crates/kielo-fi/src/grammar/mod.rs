//! Grammar checking of Finnish text.
//!
//! Text is split into paragraphs at line breaks. Each paragraph is split
//! into sentences of annotated tokens ([`paragraph`]); sentence rules run
//! first, then the paragraph-wide capitalization and end punctuation checks.
//! Errors carry positions in the whole text, sorted by start.

mod autocorrect;
mod capitalization;
mod checks;
mod paragraph;

use kielo_core::grammar_error::{GrammarError, description_for};
use kielo_fst::TransducerStore;

use crate::error::{KieloError, Result};
use crate::morphology::Analyzer;
use crate::options::Options;

use paragraph::Paragraph;

/// Languages error descriptions are available in.
pub const DESCRIPTION_LANGUAGES: [&str; 2] = ["fi", "en"];

/// The options the grammar rules look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrammarOptions {
    /// A paragraph of one verbless sentence may be a title.
    pub accept_titles: bool,
    pub accept_unfinished_paragraphs: bool,
    pub accept_bulleted_lists: bool,
}

impl From<&Options> for GrammarOptions {
    fn from(options: &Options) -> Self {
        Self {
            accept_titles: options.accept_titles_in_gc,
            accept_unfinished_paragraphs: options.accept_unfinished_paragraphs_in_gc,
            accept_bulleted_lists: options.accept_bulleted_lists_in_gc,
        }
    }
}

/// Runs every grammar rule over a text.
pub struct GrammarChecker<'a> {
    analyzer: &'a dyn Analyzer,
    autocorrect: Option<&'a TransducerStore>,
    options: GrammarOptions,
}

impl<'a> GrammarChecker<'a> {
    pub fn new(analyzer: &'a dyn Analyzer, options: GrammarOptions) -> Self {
        Self {
            analyzer,
            autocorrect: None,
            options,
        }
    }

    /// Also report replacements found in an `autocorr.vfst` transducer.
    pub fn with_autocorrect(mut self, store: &'a TransducerStore) -> Self {
        self.autocorrect = Some(store);
        self
    }

    /// Check `text` and describe the errors in `language` ("fi" or "en").
    pub fn check(&self, text: &[char], language: &str) -> Result<Vec<GrammarError>> {
        if !DESCRIPTION_LANGUAGES.contains(&language) {
            return Err(KieloError::UnsupportedLanguage(language.to_string()));
        }

        let mut errors = Vec::new();
        for (start, paragraph) in paragraphs(text) {
            let found = self.check_paragraph(paragraph);
            errors.extend(found.into_iter().map(|mut e| {
                e.start += start;
                e.description = description_for(e.code, language)
                    .unwrap_or_default()
                    .to_string();
                e
            }));
        }
        errors.sort_by_key(|e| e.start);
        Ok(errors)
    }

    fn check_paragraph(&self, text: &[char]) -> Vec<GrammarError> {
        let mut errors = Vec::new();
        let Some(paragraph) = Paragraph::analyze(text, self.analyzer) else {
            return errors;
        };

        for sentence in &paragraph.sentences {
            checks::local_punctuation(sentence, &mut errors);
            checks::quotation_punctuation(sentence, &mut errors);
            checks::repeating_words(sentence, &mut errors);
            checks::main_verb(sentence, &self.options, &mut errors);
            checks::negative_verb(sentence, &mut errors);
            checks::compound_verb(sentence, &mut errors);
            checks::sidesana(sentence, &mut errors);
            if let Some(store) = self.autocorrect {
                autocorrect::check(sentence, store, &mut errors);
            }
        }
        capitalization::check(&paragraph, &self.options, &mut errors);
        checks::end_punctuation(&paragraph, &self.options, &mut errors);
        errors
    }
}

/// Non-empty paragraphs of `text` with their start offsets. A line break is
/// `\n` or `\r\n`.
fn paragraphs(text: &[char]) -> impl Iterator<Item = (usize, &[char])> {
    let mut start = 0;
    text.split_inclusive(|&c| c == '\n').filter_map(move |line| {
        let pos = start;
        start += line.len();
        let line = line.strip_suffix(&['\n']).unwrap_or(line);
        let line = line.strip_suffix(&['\r']).unwrap_or(line);
        (!line.is_empty()).then_some((pos, line))
    })
}
