// Grammar errors: codes, descriptions and the error value itself

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

pub const GCERR_INVALID_SPELLING: i32 = 1;
pub const GCERR_EXTRA_WHITESPACE: i32 = 2;
pub const GCERR_SPACE_BEFORE_PUNCTUATION: i32 = 3;
pub const GCERR_EXTRA_COMMA: i32 = 4;
pub const GCERR_INVALID_SENTENCE_STARTER: i32 = 5;
pub const GCERR_WRITE_FIRST_LOWERCASE: i32 = 6;
pub const GCERR_WRITE_FIRST_UPPERCASE: i32 = 7;
pub const GCERR_REPEATING_WORD: i32 = 8;
pub const GCERR_TERMINATING_PUNCTUATION_MISSING: i32 = 9;
pub const GCERR_INVALID_PUNCTUATION_AT_END_OF_QUOTATION: i32 = 10;
pub const GCERR_FOREIGN_QUOTATION_MARK: i32 = 11;
pub const GCERR_MISPLACED_CLOSING_PARENTHESIS: i32 = 12;
pub const GCERR_NEGATIVE_VERB_MISMATCH: i32 = 13;
pub const GCERR_A_INFINITIVE_REQUIRED: i32 = 14;
pub const GCERR_MA_INFINITIVE_REQUIRED: i32 = 15;
pub const GCERR_MISPLACED_SIDESANA: i32 = 16;
pub const GCERR_MISSING_MAIN_VERB: i32 = 17;
pub const GCERR_EXTRA_MAIN_VERB: i32 = 18;

/// Languages grammar error descriptions are available in.
pub const DESCRIPTION_LANGUAGES: &[&str] = &["fi", "en"];

/// `(code, Finnish, English)`
const DESCRIPTIONS: &[(i32, &str, &str)] = &[
    (
        GCERR_INVALID_SPELLING,
        "Virheellinen kirjoitusasu",
        "Incorrect spelling of word(s)",
    ),
    (
        GCERR_EXTRA_WHITESPACE,
        "Poista ylimääräinen välilyönti.",
        "Remove extra space.",
    ),
    (
        GCERR_SPACE_BEFORE_PUNCTUATION,
        "Ylimääräinen välilyönti ennen välimerkkiä",
        "Remove space before punctuation.",
    ),
    (
        GCERR_EXTRA_COMMA,
        "Poista ylimääräinen pilkku.",
        "Remove extra comma.",
    ),
    (
        GCERR_INVALID_SENTENCE_STARTER,
        "Virheellinen virkkeen aloittava merkki",
        "Invalid character at the start of a sentence.",
    ),
    (
        GCERR_WRITE_FIRST_LOWERCASE,
        "Harkitse sanan kirjoittamista pienellä alkukirjaimella.",
        "Consider writing the word with a lowercase first letter.",
    ),
    (
        GCERR_WRITE_FIRST_UPPERCASE,
        "Sana on kirjoitettava isolla alkukirjaimella.",
        "The word should start with an uppercase letter.",
    ),
    (
        GCERR_REPEATING_WORD,
        "Sana on kirjoitettu kahteen kertaan.",
        "Remove the duplicated word.",
    ),
    (
        GCERR_TERMINATING_PUNCTUATION_MISSING,
        "Virkkeen lopusta puuttuu välimerkki.",
        "Terminating punctuation is missing.",
    ),
    (
        GCERR_INVALID_PUNCTUATION_AT_END_OF_QUOTATION,
        "Virheelliset välimerkit lainauksen lopussa",
        "Invalid punctuation at the end of a quotation.",
    ),
    (
        GCERR_FOREIGN_QUOTATION_MARK,
        "Suomenkielisessä tekstissä suositellaan lainausmerkkiä ”.",
        "The preferred quotation mark in Finnish text is ”.",
    ),
    (
        GCERR_MISPLACED_CLOSING_PARENTHESIS,
        "Virheellisesti sijoitettu sulkumerkki",
        "Misplaced closing parenthesis.",
    ),
    (
        GCERR_NEGATIVE_VERB_MISMATCH,
        "Kieltoverbi ja pääverbi eivät sovi yhteen.",
        "The negative verb does not agree with the main verb.",
    ),
    (
        GCERR_A_INFINITIVE_REQUIRED,
        "Pääverbin jälkeen odotetaan A-infinitiiviä.",
        "An A-infinitive is required after the main verb.",
    ),
    (
        GCERR_MA_INFINITIVE_REQUIRED,
        "Pääverbin jälkeen odotetaan MA-infinitiiviä.",
        "A MA-infinitive is required after the main verb.",
    ),
    (
        GCERR_MISPLACED_SIDESANA,
        "Sidesana ei voi olla virkkeen viimeinen sana.",
        "A conjunction cannot end a sentence.",
    ),
    (
        GCERR_MISSING_MAIN_VERB,
        "Virkkeestä puuttuu pääverbi.",
        "The sentence has no main verb.",
    ),
    (
        GCERR_EXTRA_MAIN_VERB,
        "Virkkeessä saattaa olla ylimääräinen pääverbi.",
        "The sentence may contain an extra main verb.",
    ),
];

/// Short description of `code` in `language` ("fi" or "en").
///
/// Returns `None` for an unknown code or a language without descriptions.
pub fn description_for(code: i32, language: &str) -> Option<&'static str> {
    let finnish = match language {
        "fi" => true,
        "en" => false,
        _ => return None,
    };
    DESCRIPTIONS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|&(_, fi, en)| if finnish { fi } else { en })
}

/// A grammar problem found in checked text. Positions count characters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrammarError {
    pub code: i32,
    pub start: usize,
    pub len: usize,
    pub description: String,
    pub suggestions: Vec<String>,
}

impl GrammarError {
    /// A new error without suggestions. The description is filled in by the
    /// checker once the output language is known.
    pub fn new(code: i32, start: usize, len: usize) -> Self {
        Self {
            code,
            start,
            len,
            description: String::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(code: i32, start: usize, len: usize, suggestions: Vec<String>) -> Self {
        Self {
            suggestions,
            ..Self::new(code, start, len)
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}
