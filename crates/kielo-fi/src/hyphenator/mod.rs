// Hyphenation: compound parts from STRUCTURE, syllable rules inside parts
//
// A pattern has one character per character of the word:
//   ' '  no break before this character
//   '-'  break before this character
//   '='  break that replaces this character (a hyphen or an apostrophe)
//   '~'  ugly break, only reported when ugly breaks are turned off

mod syllables;

use kielo_core::analysis::ATTR_STRUCTURE;
use kielo_core::case::to_lower;
use kielo_core::Analysis;

use crate::morphology::Analyzer;
use crate::options::Options;
use crate::speller::is_nonword;
use crate::MAX_WORD_CHARS;

/// Readings beyond this many are ignored.
const MAX_READINGS: usize = 31;

/// Break state of one position, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Mark {
    None,
    /// Inside an abbreviation: no rule breaks in this part.
    Forbidden,
    Ugly,
    Break,
    Replace,
}

impl Mark {
    fn is_boundary(self) -> bool {
        matches!(self, Mark::Break | Mark::Replace)
    }

    fn symbol(self, no_ugly: bool) -> char {
        match self {
            Mark::None | Mark::Forbidden => ' ',
            Mark::Ugly if no_ugly => '~',
            Mark::Ugly | Mark::Break => '-',
            Mark::Replace => '=',
        }
    }
}

/// The options a hyphenator reads.
#[derive(Debug, Clone, Copy)]
pub struct HyphenationOptions {
    pub no_ugly_hyphenation: bool,
    pub hyphenate_unknown_words: bool,
    pub min_hyphenated_word_length: usize,
    pub ignore_dot: bool,
}

impl From<&Options> for HyphenationOptions {
    fn from(o: &Options) -> Self {
        Self {
            no_ugly_hyphenation: o.no_ugly_hyphenation,
            hyphenate_unknown_words: o.hyphenate_unknown_words,
            min_hyphenated_word_length: o.min_hyphenated_word_length,
            ignore_dot: o.ignore_dot,
        }
    }
}

impl Default for HyphenationOptions {
    fn default() -> Self {
        Self::from(&Options::default())
    }
}

/// Finnish hyphenator over an analyzer.
///
/// Every analysis of the word gives one reading: its compound boundaries
/// from STRUCTURE, then syllable breaks inside each part. When some
/// reading is not a compound, compound readings are dropped. Readings are
/// then combined: [`hyphenate`](Self::hyphenate) keeps the breaks all
/// readings agree on, [`all_hyphenation_positions`](Self::all_hyphenation_positions)
/// keeps every break any reading has.
pub struct FinnishHyphenator<'a> {
    analyzer: &'a dyn Analyzer,
    options: HyphenationOptions,
}

impl<'a> FinnishHyphenator<'a> {
    pub fn new(analyzer: &'a dyn Analyzer, options: HyphenationOptions) -> Self {
        Self { analyzer, options }
    }

    pub fn hyphenate(&self, word: &[char]) -> String {
        self.pattern(word, std::cmp::min)
    }

    pub fn all_hyphenation_positions(&self, word: &[char]) -> String {
        self.pattern(word, std::cmp::max)
    }

    fn pattern(&self, word: &[char], combine: fn(Mark, Mark) -> Mark) -> String {
        let n = word.len();
        let blank = || " ".repeat(n);
        if n < self.options.min_hyphenated_word_length.max(2)
            || n > MAX_WORD_CHARS
            || is_nonword(word)
        {
            return blank();
        }

        let lower = to_lower(word);
        let mut len = n;
        let mut analyses = self.analyzer.analyze_brief(&lower);
        if analyses.is_empty() && self.options.ignore_dot && lower[n - 1] == '.' {
            analyses = self.analyzer.analyze_brief(&lower[..n - 1]);
            len = n - 1;
        }

        let mut readings: Vec<Vec<Mark>> = if analyses.is_empty() {
            if !self.options.hyphenate_unknown_words {
                return blank();
            }
            len = n;
            vec![hyphen_boundaries(&lower)]
        } else {
            analyses
                .iter()
                .take(MAX_READINGS)
                .map(|a| structure_boundaries(a, &lower[..len]))
                .collect()
        };
        drop_compound_readings(&mut readings);

        for marks in &mut readings {
            self.hyphenate_parts(&lower[..len], marks);
        }

        let mut combined = readings.swap_remove(0);
        for other in &readings {
            for (m, &o) in combined.iter_mut().zip(other) {
                *m = combine(*m, o);
            }
        }
        combined.resize(n, Mark::None);

        combined
            .iter()
            .map(|m| m.symbol(self.options.no_ugly_hyphenation))
            .collect()
    }

    /// Run the syllable rules on each part between boundaries. Parts shorter
    /// than the minimum length keep no breaks of their own.
    fn hyphenate_parts(&self, word: &[char], marks: &mut [Mark]) {
        let min = self.options.min_hyphenated_word_length;
        let mut start = 0;
        while start < word.len() {
            let end = (start + 1..word.len())
                .find(|&i| marks[i].is_boundary())
                .unwrap_or(word.len());
            let part_start = if marks[start] == Mark::Replace { start + 1 } else { start };
            if end > part_start && end - part_start >= min {
                // the part's own boundary mark stays outside the rules
                let saved = marks[part_start];
                if saved.is_boundary() {
                    marks[part_start] = Mark::None;
                }
                syllables::hyphenate_part(&word[part_start..end], &mut marks[part_start..end]);
                if saved.is_boundary() {
                    marks[part_start] = saved;
                }
            }
            start = end;
        }
    }
}

/// Boundaries of a word without analyses: only its inner hyphens.
fn hyphen_boundaries(word: &[char]) -> Vec<Mark> {
    let n = word.len();
    (0..n)
        .map(|i| {
            if i > 0 && i + 1 < n && word[i] == '-' {
                Mark::Replace
            } else {
                Mark::None
            }
        })
        .collect()
}

/// Part boundaries and abbreviation positions from STRUCTURE.
fn structure_boundaries(analysis: &Analysis, word: &[char]) -> Vec<Mark> {
    let mut marks = vec![Mark::None; word.len()];
    let Some(structure) = analysis.get(ATTR_STRUCTURE) else {
        return marks;
    };

    let mut i = 0;
    let mut boundary = false;
    for c in structure.chars() {
        if c == '=' {
            boundary = i > 0;
            continue;
        }
        if i >= word.len() {
            break;
        }
        if boundary {
            if word[i - 1] == '-' {
                marks[i - 1] = Mark::Replace;
            } else {
                marks[i] = Mark::Break;
            }
            boundary = false;
        }
        if matches!(c, 'j' | 'q') {
            marks[i] = Mark::Forbidden;
        }
        i += 1;
    }
    marks
}

fn drop_compound_readings(readings: &mut Vec<Vec<Mark>>) {
    let parts = |marks: &Vec<Mark>| 1 + marks.iter().filter(|m| m.is_boundary()).count();
    if readings.iter().any(|r| parts(r) == 1) {
        readings.retain(|r| parts(r) == 1);
    }
}

/// Render `word` with `separator` at each break of `pattern`.
///
/// A `'='` break replaces its character only when `allow_context_changes`
/// is set; an existing hyphen is kept as the break itself. Ugly breaks
/// (`'~'`) are never used.
pub fn insert_hyphens(
    word: &[char],
    pattern: &str,
    separator: &str,
    allow_context_changes: bool,
) -> String {
    let mut out = String::with_capacity(word.len() + separator.len() * 4);
    for (&c, mark) in word.iter().zip(pattern.chars()) {
        match mark {
            '-' => out.push_str(separator),
            '=' if allow_context_changes && c != '-' => {
                out.push_str(separator);
                continue;
            }
            _ => {}
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::FinnishAnalyzer;
    use crate::speller::tests::MockAnalyzer;
    use crate::test_lexicon;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn hyphenate_with(analyzer: &dyn Analyzer, word: &str, options: HyphenationOptions) -> String {
        let h = FinnishHyphenator::new(analyzer, options);
        let w = chars(word);
        insert_hyphens(&w, &h.hyphenate(&w), "-", true)
    }

    fn lexicon() -> FinnishAnalyzer {
        FinnishAnalyzer::from_bytes(&test_lexicon::morphology()).unwrap()
    }

    #[test]
    fn dictionary_words() {
        let a = lexicon();
        let o = HyphenationOptions::default();
        assert_eq!(hyphenate_with(&a, "koira", o), "koi-ra");
        assert_eq!(hyphenate_with(&a, "Koira", o), "Koi-ra");
        assert_eq!(hyphenate_with(&a, "koiratalo", o), "koi-ra-ta-lo");
        assert_eq!(hyphenate_with(&a, "auto", o), "au-to");
    }

    #[test]
    fn existing_hyphen_is_the_break() {
        let a = lexicon();
        let h = FinnishHyphenator::new(&a, HyphenationOptions::default());
        let w = chars("linja-auto");
        let pattern = h.hyphenate(&w);
        assert_eq!(pattern, "   - =  - ");
        assert_eq!(insert_hyphens(&w, &pattern, "-", true), "lin-ja-au-to");
        assert_eq!(insert_hyphens(&w, &pattern, "\u{AD}", false), "lin\u{AD}ja-au\u{AD}to");
    }

    #[test]
    fn abbreviations_stay_whole() {
        let a = lexicon();
        let h = FinnishHyphenator::new(&a, HyphenationOptions::default());
        assert_eq!(h.hyphenate(&chars("EU")), "  ");
        assert_eq!(h.hyphenate(&chars("EU:n")), "    ");
    }

    #[test]
    fn unknown_words_follow_the_option() {
        let a = lexicon();
        let mut o = HyphenationOptions::default();
        assert_eq!(hyphenate_with(&a, "kolmio", o), "kol-mi-o");
        o.hyphenate_unknown_words = false;
        assert_eq!(hyphenate_with(&a, "kolmio", o), "kolmio");
    }

    #[test]
    fn ugly_breaks_can_be_turned_off() {
        let a = lexicon();
        let o = HyphenationOptions {
            no_ugly_hyphenation: true,
            ..Default::default()
        };
        let h = FinnishHyphenator::new(&a, o);
        let w = chars("kolmio");
        let pattern = h.hyphenate(&w);
        assert_eq!(pattern, "   - ~");
        assert_eq!(insert_hyphens(&w, &pattern, "-", true), "kol-mio");
    }

    #[test]
    fn short_words_and_nonwords() {
        let a = lexicon();
        let mut o = HyphenationOptions::default();
        let h = FinnishHyphenator::new(&a, o);
        assert_eq!(h.hyphenate(&chars("a")), " ");
        assert_eq!(h.hyphenate(&[]), "");
        assert_eq!(h.hyphenate(&chars("www.kielo.fi")), " ".repeat(12));
        o.min_hyphenated_word_length = 6;
        let h = FinnishHyphenator::new(&a, o);
        assert_eq!(h.hyphenate(&chars("koira")), "     ");
    }

    #[test]
    fn trailing_dot() {
        let a = lexicon();
        let o = HyphenationOptions {
            ignore_dot: true,
            hyphenate_unknown_words: false,
            ..Default::default()
        };
        let h = FinnishHyphenator::new(&a, o);
        assert_eq!(h.hyphenate(&chars("koira.")), "   -  ");
    }

    #[test]
    fn non_compound_reading_wins() {
        let a = MockAnalyzer::structures(&[("syysilta", "=ppp=ppppp"), ("syysilta", "=pppppppp")]);
        let h = FinnishHyphenator::new(&a, HyphenationOptions::default());
        assert_eq!(h.hyphenate(&chars("syysilta")), "   -  - ");
    }

    #[test]
    fn intersection_and_union() {
        let a = MockAnalyzer::structures(&[("alusta", "=pppppp"), ("alusta", "=ppp=ppp")]);
        let h = FinnishHyphenator::new(&a, HyphenationOptions::default());
        let w = chars("alusta");
        // the compound reading is dropped
        assert_eq!(h.hyphenate(&w), " -  - ");

        let a = MockAnalyzer::structures(&[("abcd", "=pp=pp"), ("abcd", "=p=ppp")]);
        let h = FinnishHyphenator::new(&a, HyphenationOptions::default());
        let w = chars("abcd");
        assert_eq!(h.hyphenate(&w), "    ");
        assert_eq!(h.all_hyphenation_positions(&w), " -- ");
    }

    #[test]
    fn pattern_length_matches_word() {
        let a = lexicon();
        let h = FinnishHyphenator::new(&a, HyphenationOptions::default());
        for word in ["koira", "linja-auto", "vaa'an", "EU:n", "kissa.", "x"] {
            assert_eq!(h.hyphenate(&chars(word)).chars().count(), word.chars().count(), "{word}");
        }
    }
}
