// The option-driven spell check in front of a speller

use kielo_core::case::{detect_case, CaseType};
use kielo_core::character::{is_upper, simple_lower};
use kielo_core::SpellResult;

use crate::cache::FifoCache;
use crate::options::Options;
use crate::speller::{is_nonword, normalize, Speller};
use crate::MAX_WORD_CHARS;

/// Spell results of lowercased words.
pub type SpellCache = FifoCache<String, SpellResult>;

/// Check one word the way a user sees it: normalization, the `ignore_*`
/// shortcuts, case handling, the trailing-dot retry and missing hyphens.
///
/// `speller` receives lowercased words, except for words with a complex
/// case pattern, which are checked with only the first letter lowered.
/// Results for simple case patterns are memoized in `cache`.
pub fn spell_word(
    word: &[char],
    speller: &dyn Speller,
    mut cache: Option<&mut SpellCache>,
    options: &Options,
) -> bool {
    if word.is_empty() {
        return true;
    }
    if word.len() > MAX_WORD_CHARS {
        return false;
    }

    let word = normalize(word);
    if options.ignore_numbers && word.iter().any(char::is_ascii_digit) {
        return true;
    }

    let mut case = detect_case(&word);
    if options.ignore_uppercase && case == CaseType::AllUpper {
        return true;
    }
    if options.ignore_nonwords && is_nonword(&word) {
        return true;
    }
    if case == CaseType::AllUpper && !options.accept_all_uppercase {
        case = CaseType::Complex;
    }

    let trailing_dot = options.ignore_dot && word.last() == Some(&'.');
    let without_dot = if trailing_dot { word.len() - 1 } else { word.len() };

    if matches!(case, CaseType::Complex | CaseType::NoLetters) {
        let mut exact = word.clone();
        exact[0] = simple_lower(exact[0]);
        let accepted = |result: SpellResult| {
            result == SpellResult::Ok
                || (result == SpellResult::CapitalizeFirst
                    && options.accept_first_uppercase
                    && is_upper(word[0]))
        };
        let missing = options.accept_missing_hyphens;
        return accepted(hyphen_aware_spell(speller, &exact, missing))
            || (trailing_dot
                && accepted(hyphen_aware_spell(speller, &exact[..without_dot], missing)));
    }

    let lower: Vec<char> = word.iter().map(|&c| simple_lower(c)).collect();
    let result = cached_spell(cache.as_deref_mut(), speller, &lower[..without_dot], options);
    if accept_for_case(result, case, options) {
        return true;
    }
    trailing_dot && accept_for_case(cached_spell(cache, speller, &lower, options), case, options)
}

fn cached_spell(
    cache: Option<&mut SpellCache>,
    speller: &dyn Speller,
    word: &[char],
    options: &Options,
) -> SpellResult {
    let Some(cache) = cache else {
        return hyphen_aware_spell(speller, word, options.accept_missing_hyphens);
    };
    let key: String = word.iter().collect();
    if let Some(result) = cache.get(&key) {
        return result;
    }
    let result = hyphen_aware_spell(speller, word, options.accept_missing_hyphens);
    cache.insert(key, result);
    result
}

/// With `accept_missing_hyphens`, a failed word is retried with the hyphens
/// a word part may have lost: "kin" is accepted when "-kin" is a word.
fn hyphen_aware_spell(
    speller: &dyn Speller,
    word: &[char],
    accept_missing_hyphens: bool,
) -> SpellResult {
    let result = speller.spell(word);
    if result != SpellResult::Failed || !accept_missing_hyphens || word.len() < 2 {
        return result;
    }
    let leading = word[0] == '-';
    let trailing = word[word.len() - 1] == '-';
    let retries: &[(bool, bool)] = match (leading, trailing) {
        (true, true) => return SpellResult::Failed,
        (true, false) => &[(false, true)],
        (false, true) => &[(true, false)],
        (false, false) => &[(true, true), (true, false), (false, true)],
    };

    for &(add_leading, add_trailing) in retries {
        let mut hyphenated = Vec::with_capacity(word.len() + 2);
        if add_leading {
            hyphenated.push('-');
        }
        hyphenated.extend_from_slice(word);
        if add_trailing {
            hyphenated.push('-');
        }
        let result = speller.spell(&hyphenated);
        if result != SpellResult::Failed {
            return result;
        }
    }
    SpellResult::Failed
}

fn accept_for_case(result: SpellResult, case: CaseType, options: &Options) -> bool {
    match case {
        CaseType::AllLower => result == SpellResult::Ok,
        CaseType::FirstUpper => {
            (result == SpellResult::Ok && options.accept_first_uppercase)
                || result == SpellResult::CapitalizeFirst
        }
        CaseType::AllUpper => result != SpellResult::Failed,
        CaseType::Complex | CaseType::NoLetters => false,
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
        MockAnalyzer::structures(&[
            ("koira", "=ppppp"),
            ("helsinki", "=ippppppp"),
            ("eu", "=jj"),
            ("esim.", "=pppp"),
            ("-kin", "-ppp"),
        ])
    }

    fn check(word: &str, options: &Options) -> bool {
        let analyzer = mock();
        let speller = AnalyzerSpeller::new(&analyzer);
        spell_word(&chars(word), &speller, None, options)
    }

    fn with(f: impl FnOnce(&mut Options)) -> Options {
        let mut o = Options::default();
        f(&mut o);
        o
    }

    #[test]
    fn basic_words() {
        let o = Options::default();
        assert!(check("", &o));
        assert!(check("koira", &o));
        assert!(!check("xyzzy", &o));
        assert!(!check(&"a".repeat(MAX_WORD_CHARS + 1), &o));
    }

    #[test]
    fn capitalization() {
        let o = Options::default();
        assert!(check("Koira", &o));
        assert!(check("KOIRA", &o));
        assert!(check("Helsinki", &o));
        assert!(check("HELSINKI", &o));
        assert!(!check("helsinki", &o));
        assert!(check("EU", &o));
        assert!(!check("koIRA", &o));
    }

    #[test]
    fn first_uppercase_option() {
        let o = with(|o| o.accept_first_uppercase = false);
        assert!(!check("Koira", &o));
        assert!(check("Helsinki", &o));
    }

    #[test]
    fn all_uppercase_option() {
        let o = with(|o| o.accept_all_uppercase = false);
        assert!(!check("KOIRA", &o));
    }

    #[test]
    fn ignore_shortcuts() {
        assert!(check("abc123", &with(|o| o.ignore_numbers = true)));
        assert!(!check("abc123", &Options::default()));
        assert!(check("XYZZY", &with(|o| o.ignore_uppercase = true)));
        assert!(check("http://example.com", &Options::default()));
        assert!(!check("http://example.com", &with(|o| o.ignore_nonwords = false)));
    }

    #[test]
    fn trailing_dot() {
        assert!(!check("koira.", &Options::default()));
        let o = with(|o| o.ignore_dot = true);
        assert!(check("koira.", &o));
        assert!(check("esim.", &o));
        assert!(check("Koira.", &o));
    }

    #[test]
    fn missing_hyphens() {
        assert!(!check("kin", &Options::default()));
        assert!(check("kin", &with(|o| o.accept_missing_hyphens = true)));
    }

    #[test]
    fn normalized_before_checking() {
        let analyzer = MockAnalyzer::structures(&[("syy-silta", "=ppp-=ppppp")]);
        let speller = AnalyzerSpeller::new(&analyzer);
        assert!(spell_word(&chars("syy\u{2011}silta"), &speller, None, &Options::default()));
    }

    #[test]
    fn cache_remembers_results() {
        let analyzer = mock();
        let speller = AnalyzerSpeller::new(&analyzer);
        let mut cache = SpellCache::new(4);
        let o = Options::default();
        assert!(spell_word(&chars("Koira"), &speller, Some(&mut cache), &o));
        assert_eq!(cache.get("koira"), Some(SpellResult::Ok));
        assert!(!spell_word(&chars("xyzzy"), &speller, Some(&mut cache), &o));
        assert_eq!(cache.get("xyzzy"), Some(SpellResult::Failed));
        assert_eq!(cache.len(), 2);
    }
}
