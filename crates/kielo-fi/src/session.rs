// Session: one loaded dictionary, its options and caches

use std::cell::RefCell;

use kielo_core::{Analysis, GrammarError, Sentence, SentenceType, Token, TokenType};
use kielo_fst::TransducerStore;

use crate::MAX_WORD_CHARS;
use crate::cache::FifoCache;
use crate::error::{KieloError, Result};
use crate::grammar::{GrammarChecker, GrammarOptions};
use crate::hyphenator::{self, FinnishHyphenator, HyphenationOptions};
use crate::morphology::{Analyzer, FinnishAnalyzer};
use crate::options::{self, Options};
use crate::speller::pipeline::SpellCache;
use crate::speller::{AnalyzerSpeller, FinnishTweaks, normalize, spell_word};
use crate::suggest;
use crate::tokenizer;

type SuggestionCache = FifoCache<String, Vec<String>>;

/// An open engine instance.
///
/// A session owns its transducers, so results never borrow from it. The
/// caches are behind `RefCell`: a session is used from one thread at a
/// time, and may be moved between threads.
///
/// After [`close`](Self::close) every operation fails with
/// [`KieloError::SessionClosed`].
#[derive(Debug)]
pub struct Session {
    state: Option<Loaded>,
    options: Options,
}

#[derive(Debug)]
struct Loaded {
    analyzer: FinnishAnalyzer,
    autocorrect: Option<TransducerStore>,
    spell_cache: RefCell<SpellCache>,
    suggestion_cache: RefCell<SuggestionCache>,
}

impl Session {
    /// Load `mor.vfst` bytes and optional `autocorr.vfst` bytes.
    pub fn open(morphology: &[u8], autocorrect: Option<&[u8]>) -> Result<Self> {
        Self::with_options(morphology, autocorrect, Options::default())
    }

    pub fn with_options(
        morphology: &[u8],
        autocorrect: Option<&[u8]>,
        options: Options,
    ) -> Result<Self> {
        let store = TransducerStore::from_bytes(morphology)?;
        log::debug!(
            "session opened: {} symbols, {} states",
            store.symbols().len(),
            store.state_count()
        );
        let autocorrect = autocorrect
            .map(TransducerStore::from_bytes)
            .transpose()
            .map_err(KieloError::AutocorrectLoad)?;

        Ok(Self {
            state: Some(Loaded {
                analyzer: FinnishAnalyzer::new(store),
                autocorrect,
                spell_cache: RefCell::new(SpellCache::new(options.speller_cache_size)),
                suggestion_cache: RefCell::new(SuggestionCache::new(options.speller_cache_size)),
            }),
            options,
        })
    }

    /// Drop the dictionaries. Closing twice is fine.
    pub fn close(&mut self) {
        if self.state.take().is_some() {
            log::debug!("session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }

    fn loaded(&self) -> Result<&Loaded> {
        self.state.as_ref().ok_or(KieloError::SessionClosed)
    }

    pub fn version() -> &'static str {
        crate::VERSION
    }

    // -- words --

    pub fn spell(&self, word: &str) -> Result<bool> {
        let loaded = self.loaded()?;
        let word: Vec<char> = word.chars().collect();
        let base = AnalyzerSpeller::new(&loaded.analyzer);
        let speller =
            FinnishTweaks::new(&base, &loaded.analyzer, self.options.accept_extra_hyphens);
        let mut cache = loaded.spell_cache.borrow_mut();
        Ok(spell_word(&word, &speller, Some(&mut *cache), &self.options))
    }

    /// Corrections for `word`, best first. A correct word is its own only
    /// suggestion.
    pub fn suggest(&self, word: &str) -> Result<Vec<String>> {
        let loaded = self.loaded()?;
        if let Some(hit) = loaded.suggestion_cache.borrow().get(word) {
            return Ok(hit);
        }

        let chars: Vec<char> = word.chars().collect();
        let base = AnalyzerSpeller::new(&loaded.analyzer);
        let speller =
            FinnishTweaks::new(&base, &loaded.analyzer, self.options.accept_extra_hyphens);
        let spell = |w: &[char]| spell_word(w, &speller, None, &self.options);
        let found = suggest::suggestions(loaded.analyzer.store(), &chars, &self.options, &spell);

        loaded
            .suggestion_cache
            .borrow_mut()
            .insert(word.to_string(), found.clone());
        Ok(found)
    }

    /// Every analysis of `word`. Unknown words give an empty list.
    pub fn analyze(&self, word: &str) -> Result<Vec<Analysis>> {
        let loaded = self.loaded()?;
        let word: Vec<char> = word.chars().collect();
        if word.is_empty() || word.len() > MAX_WORD_CHARS {
            return Ok(Vec::new());
        }
        Ok(loaded.analyzer.analyze(&normalize(&word)))
    }

    /// Hyphenation pattern of `word`, one character per character of it.
    pub fn hyphenate(&self, word: &str) -> Result<String> {
        let loaded = self.loaded()?;
        let word: Vec<char> = word.chars().collect();
        Ok(self.hyphenator(loaded).hyphenate(&word))
    }

    /// Union of the breaks of every reading of `word`.
    pub fn all_hyphenation_positions(&self, word: &str) -> Result<String> {
        let loaded = self.loaded()?;
        let word: Vec<char> = word.chars().collect();
        Ok(self.hyphenator(loaded).all_hyphenation_positions(&word))
    }

    /// `word` with `separator` at every allowed break.
    pub fn insert_hyphens(
        &self,
        word: &str,
        separator: &str,
        allow_context_changes: bool,
    ) -> Result<String> {
        let loaded = self.loaded()?;
        let word: Vec<char> = word.chars().collect();
        let pattern = self.hyphenator(loaded).hyphenate(&word);
        Ok(hyphenator::insert_hyphens(
            &word,
            &pattern,
            separator,
            allow_context_changes,
        ))
    }

    fn hyphenator<'a>(&self, loaded: &'a Loaded) -> FinnishHyphenator<'a> {
        FinnishHyphenator::new(&loaded.analyzer, HyphenationOptions::from(&self.options))
    }

    // -- text --

    /// Grammar errors of `text`, described in `language` ("fi" or "en").
    pub fn grammar_errors(&self, text: &str, language: &str) -> Result<Vec<GrammarError>> {
        let loaded = self.loaded()?;
        let text: Vec<char> = text.chars().collect();
        let options = GrammarOptions::from(&self.options);
        let mut checker = GrammarChecker::new(&loaded.analyzer, options);
        if let Some(store) = &loaded.autocorrect {
            checker = checker.with_autocorrect(store);
        }
        checker.check(&text, language)
    }

    pub fn tokens(&self, text: &str) -> Result<Vec<Token>> {
        self.loaded()?;
        let text: Vec<char> = text.chars().collect();
        Ok(tokenizer::tokens(&text, self.options.ignore_dot))
    }

    /// Type and length of the first token of `text`.
    pub fn next_token(&self, text: &str) -> Result<(TokenType, usize)> {
        self.loaded()?;
        let text: Vec<char> = text.chars().collect();
        Ok(tokenizer::next_token(&text, self.options.ignore_dot))
    }

    /// Sentences of `text`. The lengths add up to the text length.
    pub fn sentences(&self, text: &str) -> Result<Vec<Sentence>> {
        let loaded = self.loaded()?;
        let text: Vec<char> = text.chars().collect();
        let abbreviation = |word: &[char]| !loaded.analyzer.analyze_brief(word).is_empty();
        Ok(tokenizer::sentences(&text, Some(&abbreviation)))
    }

    /// Type and length of the first sentence of `text`.
    pub fn next_sentence(&self, text: &str) -> Result<(SentenceType, usize)> {
        let loaded = self.loaded()?;
        let text: Vec<char> = text.chars().collect();
        let abbreviation = |word: &[char]| !loaded.analyzer.analyze_brief(word).is_empty();
        Ok(tokenizer::next_sentence(&text, Some(&abbreviation)))
    }

    // -- options --

    pub fn options(&self) -> Options {
        self.options
    }

    /// Replace every option at once. The caches start empty afterwards.
    pub fn set_options(&mut self, options: Options) -> Result<()> {
        let loaded = self.state.as_mut().ok_or(KieloError::SessionClosed)?;
        let size = options.speller_cache_size;
        *loaded.spell_cache.get_mut() = SpellCache::new(size);
        *loaded.suggestion_cache.get_mut() = SuggestionCache::new(size);
        self.options = options;
        Ok(())
    }

    fn update(&mut self, change: impl FnOnce(&mut Options) -> Result<()>) -> Result<()> {
        let mut options = self.options;
        change(&mut options)?;
        self.set_options(options)
    }

    /// Set a boolean option by its name, such as `"ignore_dot"`.
    pub fn set_bool_option(&mut self, name: &str, value: bool) -> Result<()> {
        self.update(|o| o.set_bool(name, value))
    }

    /// Set an integer option by its name, such as `"max_suggestions"`.
    pub fn set_int_option(&mut self, name: &str, value: i64) -> Result<()> {
        self.update(|o| o.set_int(name, value))
    }

    /// Set a boolean option by its stable numeric id.
    pub fn set_bool_option_id(&mut self, id: i32, value: bool) -> Result<()> {
        let name = options::bool_option_name(id)
            .ok_or_else(|| KieloError::UnknownOption(id.to_string()))?;
        self.set_bool_option(name, value)
    }

    /// Set an integer option by its stable numeric id.
    pub fn set_int_option_id(&mut self, id: i32, value: i64) -> Result<()> {
        let name = options::int_option_name(id)
            .ok_or_else(|| KieloError::UnknownOption(id.to_string()))?;
        self.set_int_option(name, value)
    }
}

macro_rules! setters {
    ($($setter:ident => $field:ident: $ty:ty),* $(,)?) => {
        impl Session {
            $(
                pub fn $setter(&mut self, value: $ty) -> Result<()> {
                    self.update(|o| {
                        o.$field = value;
                        Ok(())
                    })
                }
            )*
        }
    };
}

setters! {
    set_ignore_dot => ignore_dot: bool,
    set_ignore_numbers => ignore_numbers: bool,
    set_ignore_uppercase => ignore_uppercase: bool,
    set_no_ugly_hyphenation => no_ugly_hyphenation: bool,
    set_accept_first_uppercase => accept_first_uppercase: bool,
    set_accept_all_uppercase => accept_all_uppercase: bool,
    set_ocr_suggestions => ocr_suggestions: bool,
    set_ignore_nonwords => ignore_nonwords: bool,
    set_accept_extra_hyphens => accept_extra_hyphens: bool,
    set_accept_missing_hyphens => accept_missing_hyphens: bool,
    set_accept_titles_in_gc => accept_titles_in_gc: bool,
    set_accept_unfinished_paragraphs_in_gc => accept_unfinished_paragraphs_in_gc: bool,
    set_hyphenate_unknown_words => hyphenate_unknown_words: bool,
    set_accept_bulleted_lists_in_gc => accept_bulleted_lists_in_gc: bool,
    set_min_hyphenated_word_length => min_hyphenated_word_length: usize,
    set_max_suggestions => max_suggestions: usize,
    set_speller_cache_size => speller_cache_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_lexicon;
    use kielo_core::analysis::ATTR_BASEFORM;

    fn session() -> Session {
        Session::open(&test_lexicon::morphology(), Some(&test_lexicon::autocorrect())).unwrap()
    }

    #[test]
    fn words() {
        let s = session();
        assert!(s.spell("koira").unwrap());
        assert!(!s.spell("koirra").unwrap());
        assert!(s.suggest("koirra").unwrap().contains(&"koira".to_string()));
        assert_eq!(s.suggest("koira").unwrap(), vec!["koira".to_string()]);

        let analyses = s.analyze("koiralla").unwrap();
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].get(ATTR_BASEFORM), Some("koira"));
        assert!(s.analyze("xyzzy").unwrap().is_empty());
        assert!(s.analyze("").unwrap().is_empty());

        assert_eq!(s.hyphenate("koira").unwrap(), "   - ");
        assert_eq!(s.insert_hyphens("koira", "-", true).unwrap(), "koi-ra");
    }

    #[test]
    fn text() {
        let s = session();
        let tokens = s.tokens("Koira juoksee.").unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(s.next_token("Koira juoksee.").unwrap(), (TokenType::Word, 5));

        let sentences = s.sentences("Koira juoksee. Kissa juoksee.").unwrap();
        let total: usize = sentences.iter().map(|s| s.len).sum();
        assert_eq!(total, 29);
        assert_eq!(
            s.next_sentence("Koira juoksee. Kissa juoksee.").unwrap(),
            (SentenceType::Probable, 15)
        );

        assert!(s.grammar_errors("", "fi").unwrap().is_empty());
        let errors = s.grammar_errors("Se kuullostaa hyvältä.", "en").unwrap();
        assert!(errors.iter().any(|e| e.suggestions == ["kuulostaa"]));
    }

    #[test]
    fn options_by_name_and_id() {
        let mut s = session();
        s.set_bool_option("ignore_numbers", true).unwrap();
        assert!(s.options().ignore_numbers);
        s.set_int_option_id(30, 2).unwrap();
        assert_eq!(s.options().max_suggestions, 2);
        s.set_bool_option_id(0, true).unwrap();
        assert!(s.options().ignore_dot);

        assert!(matches!(
            s.set_bool_option("max_suggestions", true),
            Err(KieloError::UnknownOption(_))
        ));
        assert!(matches!(s.set_int_option_id(99, 1), Err(KieloError::UnknownOption(_))));
        assert!(matches!(s.set_bool_option("nonsense", true), Err(KieloError::UnknownOption(_))));
    }

    #[test]
    fn typed_setters_change_behaviour() {
        let mut s = session();
        assert!(!s.spell("koira.").unwrap());
        s.set_ignore_dot(true).unwrap();
        assert!(s.spell("koira.").unwrap());

        s.set_max_suggestions(1).unwrap();
        assert!(s.suggest("koirra").unwrap().len() <= 1);
    }

    #[test]
    fn cached_results_match_uncached() {
        let mut s = session();
        s.set_speller_cache_size(8).unwrap();
        for _ in 0..2 {
            assert!(s.spell("koira").unwrap());
            assert!(!s.spell("koirra").unwrap());
            assert!(s.suggest("koirra").unwrap().contains(&"koira".to_string()));
        }

        // an option change must not serve results cached under the old one
        s.set_max_suggestions(0).unwrap();
        assert!(s.suggest("koirra").unwrap().is_empty());
    }

    #[test]
    fn closed_session_refuses_everything() {
        let mut s = session();
        s.close();
        s.close();
        assert!(s.is_closed());
        assert!(matches!(s.spell("koira"), Err(KieloError::SessionClosed)));
        assert!(matches!(s.suggest("koira"), Err(KieloError::SessionClosed)));
        assert!(matches!(s.analyze("koira"), Err(KieloError::SessionClosed)));
        assert!(matches!(s.hyphenate("koira"), Err(KieloError::SessionClosed)));
        assert!(matches!(s.tokens("koira"), Err(KieloError::SessionClosed)));
        assert!(matches!(s.sentences("koira"), Err(KieloError::SessionClosed)));
        assert!(matches!(
            s.grammar_errors("koira", "fi"),
            Err(KieloError::SessionClosed)
        ));
        assert!(matches!(s.set_ignore_dot(true), Err(KieloError::SessionClosed)));
        assert!(format!("{s:?}").contains("state: None"));
    }

    #[test]
    fn load_failures_can_be_unwrapped() {
        let error = Session::open(b"not a transducer", None).unwrap_err();
        assert!(matches!(error, KieloError::MorphologyLoad(_)));
        assert!(format!("{:?}", session()).starts_with("Session"));
    }

    #[test]
    fn load_errors() {
        assert!(matches!(
            Session::open(b"not a transducer", None),
            Err(KieloError::MorphologyLoad(_))
        ));
        let morphology = test_lexicon::morphology();
        assert!(matches!(
            Session::open(&morphology, Some(&morphology[..10])),
            Err(KieloError::AutocorrectLoad(_))
        ));
        assert_eq!(Session::version(), crate::VERSION);
    }
}
