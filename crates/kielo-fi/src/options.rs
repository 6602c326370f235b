// Session options and their stable names and ids

use crate::error::{KieloError, Result};

/// Every tunable of a session. A plain value: sessions copy it in and out
/// wholesale with [`Session::set_options`](crate::Session::set_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Accept a word with a trailing dot if the word without it is correct.
    pub ignore_dot: bool,
    /// Accept words that contain digits.
    pub ignore_numbers: bool,
    /// Accept all-uppercase words without checking them.
    pub ignore_uppercase: bool,
    /// Do not break at ugly hyphenation points.
    pub no_ugly_hyphenation: bool,
    /// Accept a lowercase dictionary word written with a capital first letter.
    pub accept_first_uppercase: bool,
    /// Check all-uppercase words case-insensitively.
    pub accept_all_uppercase: bool,
    /// Rank suggestions for OCR errors instead of typing errors.
    pub ocr_suggestions: bool,
    /// Accept URLs, e-mail addresses and similar non-words.
    pub ignore_nonwords: bool,
    /// Accept hyphens at compound boundaries that need none.
    pub accept_extra_hyphens: bool,
    /// Accept a missing hyphen at the start or end of a word part.
    pub accept_missing_hyphens: bool,
    pub accept_titles_in_gc: bool,
    pub accept_unfinished_paragraphs_in_gc: bool,
    /// Hyphenate words the dictionary does not know.
    pub hyphenate_unknown_words: bool,
    pub accept_bulleted_lists_in_gc: bool,
    /// Shorter words are never hyphenated.
    pub min_hyphenated_word_length: usize,
    pub max_suggestions: usize,
    /// Entries in each speller cache. 0 disables caching.
    pub speller_cache_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ignore_dot: false,
            ignore_numbers: false,
            ignore_uppercase: false,
            no_ugly_hyphenation: false,
            accept_first_uppercase: true,
            accept_all_uppercase: true,
            ocr_suggestions: false,
            ignore_nonwords: true,
            accept_extra_hyphens: false,
            accept_missing_hyphens: false,
            accept_titles_in_gc: false,
            accept_unfinished_paragraphs_in_gc: false,
            hyphenate_unknown_words: true,
            accept_bulleted_lists_in_gc: false,
            min_hyphenated_word_length: 2,
            max_suggestions: 5,
            speller_cache_size: 0,
        }
    }
}

/// Boolean options by stable id.
pub const BOOL_OPTIONS: &[(i32, &str)] = &[
    (0, "ignore_dot"),
    (1, "ignore_numbers"),
    (3, "ignore_uppercase"),
    (4, "no_ugly_hyphenation"),
    (6, "accept_first_uppercase"),
    (7, "accept_all_uppercase"),
    (8, "ocr_suggestions"),
    (10, "ignore_nonwords"),
    (11, "accept_extra_hyphens"),
    (12, "accept_missing_hyphens"),
    (13, "accept_titles_in_gc"),
    (14, "accept_unfinished_paragraphs_in_gc"),
    (15, "hyphenate_unknown_words"),
    (16, "accept_bulleted_lists_in_gc"),
];

/// Integer options by stable id.
pub const INT_OPTIONS: &[(i32, &str)] = &[
    (9, "min_hyphenated_word_length"),
    (17, "speller_cache_size"),
    (30, "max_suggestions"),
];

/// Name of the boolean option with the given id.
pub fn bool_option_name(id: i32) -> Option<&'static str> {
    BOOL_OPTIONS.iter().find(|(i, _)| *i == id).map(|&(_, n)| n)
}

/// Name of the integer option with the given id.
pub fn int_option_name(id: i32) -> Option<&'static str> {
    INT_OPTIONS.iter().find(|(i, _)| *i == id).map(|&(_, n)| n)
}

impl Options {
    /// Set a boolean option by name.
    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<()> {
        let slot = match name {
            "ignore_dot" => &mut self.ignore_dot,
            "ignore_numbers" => &mut self.ignore_numbers,
            "ignore_uppercase" => &mut self.ignore_uppercase,
            "no_ugly_hyphenation" => &mut self.no_ugly_hyphenation,
            "accept_first_uppercase" => &mut self.accept_first_uppercase,
            "accept_all_uppercase" => &mut self.accept_all_uppercase,
            "ocr_suggestions" => &mut self.ocr_suggestions,
            "ignore_nonwords" => &mut self.ignore_nonwords,
            "accept_extra_hyphens" => &mut self.accept_extra_hyphens,
            "accept_missing_hyphens" => &mut self.accept_missing_hyphens,
            "accept_titles_in_gc" => &mut self.accept_titles_in_gc,
            "accept_unfinished_paragraphs_in_gc" => &mut self.accept_unfinished_paragraphs_in_gc,
            "hyphenate_unknown_words" => &mut self.hyphenate_unknown_words,
            "accept_bulleted_lists_in_gc" => &mut self.accept_bulleted_lists_in_gc,
            _ => return Err(KieloError::UnknownOption(name.to_string())),
        };
        *slot = value;
        Ok(())
    }

    /// Set an integer option by name. Negative values count as 0.
    pub fn set_int(&mut self, name: &str, value: i64) -> Result<()> {
        let slot = match name {
            "min_hyphenated_word_length" => &mut self.min_hyphenated_word_length,
            "max_suggestions" => &mut self.max_suggestions,
            "speller_cache_size" => &mut self.speller_cache_size,
            _ => return Err(KieloError::UnknownOption(name.to_string())),
        };
        *slot = usize::try_from(value).unwrap_or(0);
        Ok(())
    }

    /// Read a boolean option by name.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        Some(match name {
            "ignore_dot" => self.ignore_dot,
            "ignore_numbers" => self.ignore_numbers,
            "ignore_uppercase" => self.ignore_uppercase,
            "no_ugly_hyphenation" => self.no_ugly_hyphenation,
            "accept_first_uppercase" => self.accept_first_uppercase,
            "accept_all_uppercase" => self.accept_all_uppercase,
            "ocr_suggestions" => self.ocr_suggestions,
            "ignore_nonwords" => self.ignore_nonwords,
            "accept_extra_hyphens" => self.accept_extra_hyphens,
            "accept_missing_hyphens" => self.accept_missing_hyphens,
            "accept_titles_in_gc" => self.accept_titles_in_gc,
            "accept_unfinished_paragraphs_in_gc" => self.accept_unfinished_paragraphs_in_gc,
            "hyphenate_unknown_words" => self.hyphenate_unknown_words,
            "accept_bulleted_lists_in_gc" => self.accept_bulleted_lists_in_gc,
            _ => return None,
        })
    }

    /// Read an integer option by name.
    pub fn get_int(&self, name: &str) -> Option<usize> {
        match name {
            "min_hyphenated_word_length" => Some(self.min_hyphenated_word_length),
            "max_suggestions" => Some(self.max_suggestions),
            "speller_cache_size" => Some(self.speller_cache_size),
            _ => None,
        }
    }
}
