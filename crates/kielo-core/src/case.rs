// Case pattern of a word and conversions between patterns

use crate::character::{is_lower, is_upper, simple_lower, simple_upper};

/// The capitalization pattern of a word. Non-letters are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    /// No cased letters at all: "1234", "--".
    NoLetters,
    /// "koira"
    AllLower,
    /// "Koira"
    FirstUpper,
    /// "KOIRA"
    AllUpper,
    /// Anything else: "koIRA", "McDonald".
    Complex,
}

/// Classify the capitalization of `word`.
pub fn detect_case(word: &[char]) -> CaseType {
    let Some((&first, rest)) = word.split_first() else {
        return CaseType::NoLetters;
    };

    let first_upper = is_upper(first);
    let mut any_letter = first_upper || is_lower(first);
    let mut any_lower = is_lower(first);
    let mut rest_upper = false;

    for &c in rest {
        if is_upper(c) {
            rest_upper = true;
            any_letter = true;
        } else if is_lower(c) {
            any_lower = true;
            any_letter = true;
        }
    }

    match (any_letter, any_lower, first_upper, rest_upper) {
        (false, ..) => CaseType::NoLetters,
        (true, false, ..) => CaseType::AllUpper,
        (true, true, _, true) => CaseType::Complex,
        (true, true, true, false) => CaseType::FirstUpper,
        (true, true, false, false) => CaseType::AllLower,
    }
}

/// Rewrite `word` in place to follow `case`. `Complex` and `NoLetters`
/// leave the word untouched.
pub fn apply_case(word: &mut [char], case: CaseType) {
    match case {
        CaseType::NoLetters | CaseType::Complex => {}
        CaseType::AllLower => word.iter_mut().for_each(|c| *c = simple_lower(*c)),
        CaseType::AllUpper => word.iter_mut().for_each(|c| *c = simple_upper(*c)),
        CaseType::FirstUpper => {
            if let Some((first, rest)) = word.split_first_mut() {
                *first = simple_upper(*first);
                rest.iter_mut().for_each(|c| *c = simple_lower(*c));
            }
        }
    }
}

/// Lowercase a whole word into a new buffer.
pub fn to_lower(word: &[char]) -> Vec<char> {
    word.iter().map(|&c| simple_lower(c)).collect()
}
