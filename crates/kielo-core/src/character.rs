// Character classes used by the tokenizer, hyphenator and speller

/// Coarse class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharType {
    Letter,
    Digit,
    Whitespace,
    Punctuation,
    Unknown,
}

impl CharType {
    pub fn of(c: char) -> Self {
        if is_letter(c) {
            CharType::Letter
        } else if c.is_ascii_digit() {
            CharType::Digit
        } else if is_whitespace(c) {
            CharType::Whitespace
        } else if is_punctuation(c) || is_quotation_mark(c) {
            CharType::Punctuation
        } else {
            CharType::Unknown
        }
    }
}

/// Letters of the scripts the Finnish dictionary can contain: Latin with
/// extensions, Cyrillic, Canadian syllabics (Sámi place names) and the Latin
/// ligatures U+FB00..U+FB04.
pub fn is_letter(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02AF}'
        | '\u{0400}'..='\u{0481}'
        | '\u{048A}'..='\u{0527}'
        | '\u{1400}'..='\u{15C3}'
        | '\u{FB00}'..='\u{FB04}')
}

pub fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | ';'
            | ':'
            | '!'
            | '?'
            | '-'
            | '\''
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '/'
            | '&'
            | '\u{00AD}'
            | '\u{2010}'
            | '\u{2011}'
            | '\u{2013}'
            | '\u{2014}'
            | '\u{2018}'
            | '\u{2019}'
            | '\u{2026}'
    )
}

/// Quotation marks that are correct in Finnish text: `"`, `”` and `»`.
pub fn is_finnish_quotation_mark(c: char) -> bool {
    matches!(c, '"' | '\u{201D}' | '\u{00BB}')
}

/// Any double quotation mark, including the ones foreign to Finnish.
pub fn is_quotation_mark(c: char) -> bool {
    is_finnish_quotation_mark(c) || matches!(c, '\u{201C}' | '\u{201E}' | '\u{00AB}')
}

/// Hyphen-like characters that join the parts of a word.
pub fn is_hyphen(c: char) -> bool {
    matches!(c, '-' | '\u{2010}' | '\u{2011}')
}

pub fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

pub fn is_whitespace(c: char) -> bool {
    matches!(c,
        '\t'..='\r'
        | ' '
        | '\u{0085}'
        | '\u{00A0}'
        | '\u{1680}'
        | '\u{180E}'
        | '\u{2000}'..='\u{200A}'
        | '\u{2028}'
        | '\u{2029}'
        | '\u{202F}'
        | '\u{205F}'
        | '\u{3000}')
}

// ---------------------------------------------------------------------------
// Finnish phonology
// ---------------------------------------------------------------------------

/// a e i o u y ä ö, either case.
pub fn is_vowel(c: char) -> bool {
    matches!(
        simple_lower(c),
        'a' | 'e' | 'i' | 'o' | 'u' | 'y' | '\u{00E4}' | '\u{00F6}'
    )
}

/// Consonants of the Finnish alphabet including š and ž, either case.
pub fn is_consonant(c: char) -> bool {
    let c = simple_lower(c);
    (c.is_ascii_lowercase() && !is_vowel(c)) || matches!(c, '\u{0161}' | '\u{017E}')
}

// ---------------------------------------------------------------------------
// Case mapping
// ---------------------------------------------------------------------------

/// One-to-one lowercase mapping. Characters whose lowercase form expands to
/// several code points keep only the first one.
pub fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// One-to-one uppercase mapping, see [`simple_lower`].
pub fn simple_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

pub fn is_upper(c: char) -> bool {
    c != simple_lower(c)
}

pub fn is_lower(c: char) -> bool {
    c != simple_upper(c)
}

/// Compare two words letter by letter ignoring case.
pub fn eq_ignore_case(a: &[char], b: &[char]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(&x, &y)| simple_lower(x) == simple_lower(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_finnish_letters() {
        for c in ['a', 'Z', 'ä', 'Ö', 'š', 'Ž', 'я'] {
            assert_eq!(CharType::of(c), CharType::Letter, "{c}");
        }
    }

    #[test]
    fn classifies_other_types() {
        assert_eq!(CharType::of('7'), CharType::Digit);
        assert_eq!(CharType::of('\u{00A0}'), CharType::Whitespace);
        assert_eq!(CharType::of('\n'), CharType::Whitespace);
        assert_eq!(CharType::of('”'), CharType::Punctuation);
        assert_eq!(CharType::of('“'), CharType::Punctuation);
        assert_eq!(CharType::of('…'), CharType::Punctuation);
        assert_eq!(CharType::of('€'), CharType::Unknown);
        assert_eq!(CharType::of('#'), CharType::Unknown);
    }

    #[test]
    fn vowels_and_consonants() {
        assert!(is_vowel('ä'));
        assert!(is_vowel('Y'));
        assert!(!is_vowel('k'));
        assert!(is_consonant('K'));
        assert!(is_consonant('š'));
        assert!(!is_consonant('ö'));
        assert!(!is_consonant('-'));
    }

    #[test]
    fn quotation_marks() {
        assert!(is_finnish_quotation_mark('”'));
        assert!(is_finnish_quotation_mark('»'));
        assert!(!is_finnish_quotation_mark('“'));
        assert!(is_quotation_mark('“'));
        assert!(!is_quotation_mark('\''));
    }

    #[test]
    fn case_helpers() {
        assert_eq!(simple_upper('ä'), 'Ä');
        assert_eq!(simple_lower('Ö'), 'ö');
        assert!(is_upper('Å'));
        assert!(is_lower('å'));
        assert!(!is_upper('1'));
        assert!(!is_lower('-'));
    }

    #[test]
    fn ignore_case_comparison() {
        let a: Vec<char> = "Äiti".chars().collect();
        let b: Vec<char> = "äITI".chars().collect();
        let c: Vec<char> = "äidit".chars().collect();
        assert!(eq_ignore_case(&a, &b));
        assert!(!eq_ignore_case(&a, &c));
    }
}
