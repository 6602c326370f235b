// Morphological analysis over the morphology transducer

pub(crate) mod tags;

use kielo_core::analysis::{
    ATTR_BASEFORM, ATTR_CLASS, ATTR_COMPARISON, ATTR_FOCUS, ATTR_FSTOUTPUT, ATTR_KYSYMYSLIITE,
    ATTR_MALAGA_VAPAA_JALKIOSA, ATTR_MOOD, ATTR_NEGATIVE, ATTR_NUMBER, ATTR_PARTICIPLE,
    ATTR_PERSON, ATTR_POSSESSIVE, ATTR_POSSIBLE_GEOGRAPHICAL_NAME, ATTR_REQUIRE_FOLLOWING_VERB,
    ATTR_SIJAMUOTO, ATTR_STRUCTURE, ATTR_TENSE, ATTR_WEIGHT,
};
use kielo_core::case::to_lower;
use kielo_core::Analysis;
use kielo_fst::{FstError, TransducerStore};

use crate::MAX_WORD_CHARS;
use tags::TagReading;

/// Transducer paths read per word. Later paths are ignored.
pub(crate) const MAX_ANALYSIS_COUNT: usize = 100;

/// Anything that can turn a word into its analyses.
///
/// The speller, hyphenator and grammar checker only see this trait, so they
/// can be tested against canned analyses.
pub trait Analyzer {
    /// All valid analyses of `word`. Unknown words give an empty list.
    fn analyze(&self, word: &[char]) -> Vec<Analysis>;

    /// Analyses carrying at least STRUCTURE, for callers that never look at
    /// base forms or raw output.
    fn analyze_brief(&self, word: &[char]) -> Vec<Analysis> {
        self.analyze(word)
    }
}

/// Analyzer for Finnish backed by `mor.vfst`.
#[derive(Debug)]
pub struct FinnishAnalyzer {
    store: TransducerStore,
}

impl FinnishAnalyzer {
    pub fn new(store: TransducerStore) -> Self {
        Self { store }
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, FstError> {
        TransducerStore::from_bytes(data).map(Self::new)
    }

    pub fn store(&self) -> &TransducerStore {
        &self.store
    }

    /// Analyze `word`. With `full` set, BASEFORM, FSTOUTPUT and (for weighted
    /// dictionaries) WEIGHT are added; the speller does without them.
    pub fn analyze_with(&self, word: &[char], full: bool) -> Vec<Analysis> {
        if word.is_empty() || word.len() > MAX_WORD_CHARS {
            return Vec::new();
        }
        let lower = to_lower(word);
        let weighted = self.store.is_weighted();

        let mut analyses = Vec::new();
        for result in self.store.lookup(&lower).take(MAX_ANALYSIS_COUNT) {
            let events = tags::events(&result.output);
            if !tags::is_valid_analysis(&events) {
                continue;
            }

            let structure = tags::structure(&events, word.len());
            let mut analysis = Analysis::new();
            apply_reading(&mut analysis, &tags::read_tags(&events));
            post_process(&mut analysis);

            if full {
                if let Some(base) = tags::baseform(&events, &structure) {
                    analysis.set(ATTR_BASEFORM, base);
                }
                analysis.set(ATTR_FSTOUTPUT, result.output.as_str());
                if weighted {
                    analysis.set(ATTR_WEIGHT, result.weight.to_string());
                }
            }
            analysis.set(ATTR_STRUCTURE, structure);
            analyses.push(analysis);
        }
        analyses
    }
}

impl Analyzer for FinnishAnalyzer {
    fn analyze(&self, word: &[char]) -> Vec<Analysis> {
        self.analyze_with(word, true)
    }

    fn analyze_brief(&self, word: &[char]) -> Vec<Analysis> {
        self.analyze_with(word, false)
    }
}

fn apply_reading(analysis: &mut Analysis, r: &TagReading) {
    let pairs = [
        (ATTR_CLASS, r.class),
        (ATTR_SIJAMUOTO, r.case),
        (ATTR_NUMBER, r.number),
        (ATTR_PERSON, r.person),
        (ATTR_MOOD, r.mood),
        (ATTR_TENSE, r.tense),
        (ATTR_FOCUS, r.focus),
        (ATTR_POSSESSIVE, r.possessive),
        (ATTR_NEGATIVE, r.negative),
        (ATTR_COMPARISON, r.comparison),
        (ATTR_PARTICIPLE, r.participle),
        (ATTR_REQUIRE_FOLLOWING_VERB, r.require_following_verb),
    ];
    for (key, value) in pairs {
        if let Some(value) = value {
            analysis.set(key, value);
        }
    }
    for (key, flag) in [
        (ATTR_KYSYMYSLIITE, r.question_clitic),
        (ATTR_MALAGA_VAPAA_JALKIOSA, r.free_suffix),
        (ATTR_POSSIBLE_GEOGRAPHICAL_NAME, r.geographical_name),
    ] {
        if flag {
            analysis.set(key, "true");
        }
    }
}

/// Rules that look at several attributes at once.
fn post_process(analysis: &mut Analysis) {
    let verb = analysis.is(ATTR_CLASS, "teonsana");
    let nominal_infinitive = matches!(
        analysis.get(ATTR_MOOD),
        Some("E-infinitive" | "MA-infinitive" | "MINEN-infinitive")
    );
    let has_class = analysis.contains_key(ATTR_CLASS);
    if (has_class && !verb) || nominal_infinitive {
        analysis.remove(ATTR_NEGATIVE);
    }

    if analysis.is(ATTR_PARTICIPLE, "past_passive") {
        analysis.set(ATTR_CLASS, "laatusana");
    }

    if analysis.is(ATTR_SIJAMUOTO, "kerrontosti") {
        analysis.remove(ATTR_NUMBER);
    }

    match analysis.get(ATTR_CLASS) {
        Some("laatusana" | "nimisana_laatusana") if !analysis.contains_key(ATTR_COMPARISON) => {
            analysis.set(ATTR_COMPARISON, "positive");
        }
        Some("nimisana") => {
            analysis.remove(ATTR_COMPARISON);
        }
        _ => {}
    }
}
