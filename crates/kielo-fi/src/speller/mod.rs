// Spell checking: case rules from STRUCTURE, Finnish hyphen tweaks, and the
// option-driven pipeline in front of them

mod normalize;
pub mod pipeline;
pub mod tweaks;

use kielo_core::analysis::ATTR_STRUCTURE;
use kielo_core::character::{is_lower, is_upper};
use kielo_core::SpellResult;

use crate::morphology::Analyzer;

pub use normalize::{is_nonword, normalize};
pub use pipeline::spell_word;
pub use tweaks::FinnishTweaks;

/// Something that can judge a single word.
///
/// Words reach a speller lowercased, except where the caller wants the
/// exact case checked. Case is validated against STRUCTURE.
pub trait Speller {
    fn spell(&self, word: &[char]) -> SpellResult;
}

/// Compare the case of `word` with a STRUCTURE pattern.
///
/// A lowercase letter where `i`/`j` is expected gives `CapitalizeFirst` at
/// the first position and `CapitalizationError` anywhere else. An uppercase
/// letter where `p`/`q` is expected is always a `CapitalizationError`.
pub fn match_structure(word: &[char], structure: &str) -> SpellResult {
    let mut result = SpellResult::Ok;
    let mut expected = structure.chars().filter(|&c| c != '=');

    for (i, &c) in word.iter().enumerate() {
        let Some(want) = expected.next() else { break };
        let wants_upper = matches!(want, 'i' | 'j');
        let wants_lower = matches!(want, 'p' | 'q');

        if is_lower(c) && wants_upper {
            result = if i == 0 {
                SpellResult::CapitalizeFirst
            } else {
                SpellResult::CapitalizationError
            };
        }
        if is_upper(c) && wants_lower {
            result = SpellResult::CapitalizationError;
        }
        if result == SpellResult::CapitalizationError {
            break;
        }
    }
    result
}

/// Speller backed by morphological analysis: a word is known when it has an
/// analysis, and its best case match over all analyses is the result.
pub struct AnalyzerSpeller<'a> {
    analyzer: &'a dyn Analyzer,
}

impl<'a> AnalyzerSpeller<'a> {
    pub fn new(analyzer: &'a dyn Analyzer) -> Self {
        Self { analyzer }
    }
}

impl Speller for AnalyzerSpeller<'_> {
    fn spell(&self, word: &[char]) -> SpellResult {
        let mut best = SpellResult::Failed;
        for analysis in self.analyzer.analyze_brief(word) {
            let Some(structure) = analysis.get(ATTR_STRUCTURE) else {
                continue;
            };
            best = best.min(match_structure(word, structure));
            if best == SpellResult::Ok {
                break;
            }
        }
        best
    }
}
