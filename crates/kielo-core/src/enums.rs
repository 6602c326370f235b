// Token, sentence and spell-result enumerations with their stable codes

/// Classification of a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenType {
    /// No token: end of text.
    #[default]
    None,
    Word,
    Punctuation,
    Whitespace,
    /// A character no supported language uses.
    Unknown,
}

impl TokenType {
    /// Stable numeric code used across the C boundary.
    pub fn code(self) -> i32 {
        match self {
            TokenType::None => 0,
            TokenType::Word => 1,
            TokenType::Punctuation => 2,
            TokenType::Whitespace => 3,
            TokenType::Unknown => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenType::None => "NONE",
            TokenType::Word => "WORD",
            TokenType::Punctuation => "PUNCTUATION",
            TokenType::Whitespace => "WHITESPACE",
            TokenType::Unknown => "UNKNOWN",
        }
    }
}

/// Confidence that a new sentence starts after a boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SentenceType {
    /// Nothing left to scan.
    #[default]
    None,
    /// The segment runs to the end of the text without a new sentence.
    NoStart,
    Probable,
    Possible,
}

impl SentenceType {
    pub fn code(self) -> i32 {
        match self {
            SentenceType::None => 0,
            SentenceType::NoStart => 1,
            SentenceType::Probable => 2,
            SentenceType::Possible => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SentenceType::None => "NONE",
            SentenceType::NoStart => "NO_START",
            SentenceType::Probable => "PROBABLE",
            SentenceType::Possible => "POSSIBLE",
        }
    }
}

/// Outcome of checking a single word against the dictionary, from best to
/// worst. The ordering is used to pick the best result among several
/// readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpellResult {
    Ok,
    /// Correct once the first letter is capitalized ("helsinki").
    CapitalizeFirst,
    /// Letters are right but capitalization is wrong somewhere else.
    CapitalizationError,
    Failed,
}

impl SpellResult {
    pub fn is_ok(self) -> bool {
        self == SpellResult::Ok
    }
}
