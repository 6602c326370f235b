// Finnish adjustments around a base speller: soft hyphens, optional
// compound hyphens, and hyphenated forms the dictionary cannot list

use kielo_core::analysis::{ATTR_MALAGA_VAPAA_JALKIOSA, ATTR_STRUCTURE};
use kielo_core::character::{is_consonant, is_vowel, simple_lower};
use kielo_core::SpellResult;

use crate::morphology::Analyzer;
use crate::speller::{match_structure, Speller};

const SOFT_HYPHEN: char = '\u{AD}';

/// Wraps a speller with the Finnish hyphen rules:
///
/// 1. Soft hyphens are removed before checking. One at either end, or two
///    in a row, makes the word wrong.
/// 2. With `accept_extra_hyphens`, a hyphen at a compound boundary that
///    needs none is accepted.
/// 3. A repeated vowel-consonant pair around a hyphen is accepted when the
///    word without the hyphen is known ("pop-opisto").
/// 4. A known word followed by a hyphen and a free suffix part is accepted
///    ("ja-sana").
/// 5. A hyphen is accepted where the word without it reads both as a
///    compound split at that point and as a whole ("syy-silta").
pub struct FinnishTweaks<'a> {
    inner: &'a dyn Speller,
    analyzer: &'a dyn Analyzer,
    accept_extra_hyphens: bool,
}

impl<'a> FinnishTweaks<'a> {
    pub fn new(
        inner: &'a dyn Speller,
        analyzer: &'a dyn Analyzer,
        accept_extra_hyphens: bool,
    ) -> Self {
        Self {
            inner,
            analyzer,
            accept_extra_hyphens,
        }
    }

    fn spell_hyphenated(&self, word: &[char]) -> SpellResult {
        let result = self.inner.spell(word);
        let n = word.len();
        if result == SpellResult::Ok || n <= 3 {
            return result;
        }
        let Some(hyphen) = word[1..n - 1].iter().position(|&c| c == '-').map(|p| p + 1) else {
            return result;
        };

        let mut joined = Vec::with_capacity(n - 1);
        joined.extend_from_slice(&word[..hyphen]);
        joined.extend_from_slice(&word[hyphen + 1..]);

        if self.accept_extra_hyphens && hyphen > 1 && joined.get(hyphen) != Some(&'-') {
            let joined_result = self.spell_hyphenated(&joined);
            if joined_result == SpellResult::Ok {
                return joined_result;
            }
        }

        if hyphen >= 2 && n - hyphen >= 3 {
            let v = simple_lower(word[hyphen - 2]);
            let c = simple_lower(word[hyphen - 1]);
            if is_vowel(v)
                && is_consonant(c)
                && simple_lower(word[hyphen + 1]) == v
                && simple_lower(word[hyphen + 2]) == c
            {
                let joined_result = self.inner.spell(&joined);
                if joined_result != SpellResult::Failed && joined_result < result {
                    return joined_result;
                }
            }
        }

        if let Some(last) = word[1..n - 1].iter().rposition(|&c| c == '-').map(|p| p + 1) {
            let leading = self.spell(&word[..last]);
            if leading != SpellResult::Failed {
                let free_suffix = self
                    .analyzer
                    .analyze_brief(&word[last + 1..])
                    .iter()
                    .any(|a| a.is(ATTR_MALAGA_VAPAA_JALKIOSA, "true"));
                if free_suffix {
                    return leading;
                }
            }
        }

        let mut with_border = SpellResult::Failed;
        let mut without_border = SpellResult::Failed;
        for analysis in self.analyzer.analyze_brief(&joined) {
            let Some(structure) = analysis.get(ATTR_STRUCTURE) else {
                continue;
            };
            let Some(border) = border_after(structure, hyphen) else {
                continue;
            };
            let spelled = match_structure(&joined, structure);
            let slot = if border { &mut with_border } else { &mut without_border };
            *slot = (*slot).min(spelled);
        }
        if with_border != SpellResult::Failed
            && without_border != SpellResult::Failed
            && with_border < result
        {
            return with_border;
        }

        result
    }
}

/// Whether a STRUCTURE has a part boundary right after `chars` characters.
/// `None` when the structure is shorter than that.
fn border_after(structure: &str, chars: usize) -> Option<bool> {
    let mut seen = 0;
    let mut iter = structure.chars().peekable();
    while seen < chars {
        while iter.peek() == Some(&'=') {
            iter.next();
        }
        iter.next()?;
        seen += 1;
    }
    Some(iter.peek() == Some(&'='))
}

impl Speller for FinnishTweaks<'_> {
    fn spell(&self, word: &[char]) -> SpellResult {
        if !word.contains(&SOFT_HYPHEN) {
            return self.spell_hyphenated(word);
        }

        let mut stripped = Vec::with_capacity(word.len());
        let mut last_soft: Option<usize> = None;
        for (i, &c) in word.iter().enumerate() {
            if c != SOFT_HYPHEN {
                stripped.push(c);
                continue;
            }
            if stripped.is_empty() || i + 1 == word.len() || last_soft == Some(stripped.len()) {
                return SpellResult::Failed;
            }
            last_soft = Some(stripped.len());
        }
        self.spell_hyphenated(&stripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speller::tests::MockAnalyzer;
    use crate::speller::AnalyzerSpeller;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn mock() -> MockAnalyzer {
        let mut m = MockAnalyzer::structures(&[
            ("koira", "=ppppp"),
            ("helsinki", "=ippppppp"),
            ("ja", "=pp"),
            ("popopisto", "=ppp=pppppp"),
            ("syysilta", "=ppp=ppppp"),
            ("syysilta", "=pppppppp"),
        ]);
        let sana = [(ATTR_STRUCTURE, "=pppp"), (ATTR_MALAGA_VAPAA_JALKIOSA, "true")];
        m.0.push(("sana", sana.into_iter().collect()));
        m
    }

    fn spell(word: &str, accept_extra_hyphens: bool) -> SpellResult {
        let analyzer = mock();
        let base = AnalyzerSpeller::new(&analyzer);
        FinnishTweaks::new(&base, &analyzer, accept_extra_hyphens).spell(&chars(word))
    }

    #[test]
    fn plain_words_pass_through() {
        assert_eq!(spell("koira", false), SpellResult::Ok);
        assert_eq!(spell("helsinki", false), SpellResult::CapitalizeFirst);
        assert_eq!(spell("xyzzy", false), SpellResult::Failed);
    }

    #[test]
    fn soft_hyphens() {
        assert_eq!(spell("koi\u{AD}ra", false), SpellResult::Ok);
        assert_eq!(spell("\u{AD}koira", false), SpellResult::Failed);
        assert_eq!(spell("koira\u{AD}", false), SpellResult::Failed);
        assert_eq!(spell("ko\u{AD}\u{AD}ira", false), SpellResult::Failed);
    }

    #[test]
    fn vowel_consonant_overlap() {
        assert_eq!(spell("pop-opisto", false), SpellResult::Ok);
    }

    #[test]
    fn free_suffix_part() {
        assert_eq!(spell("ja-sana", false), SpellResult::Ok);
        assert_eq!(spell("xx-sana", false), SpellResult::Failed);
    }

    #[test]
    fn ambiguous_compound() {
        assert_eq!(spell("syy-silta", false), SpellResult::Ok);
    }

    #[test]
    fn extra_hyphens_need_the_option() {
        assert_eq!(spell("koi-ra", false), SpellResult::Failed);
        assert_eq!(spell("koi-ra", true), SpellResult::Ok);
    }

    #[test]
    fn border_positions() {
        assert_eq!(border_after("=ppp=ppppp", 3), Some(true));
        assert_eq!(border_after("=pppppppp", 3), Some(false));
        assert_eq!(border_after("=pp", 3), None);
    }
}
