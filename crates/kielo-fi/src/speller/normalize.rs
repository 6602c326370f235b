// Typographic normalization and non-word detection

use kielo_core::character::simple_lower;

/// Replace typographic variants with the plain characters the dictionary
/// uses: hyphen variants, Latin ligatures, and degree signs.
pub fn normalize(word: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(word.len() + 2);
    for &c in word {
        match c {
            '\u{2010}' | '\u{2011}' => out.push('-'),
            '\u{FB00}' => out.extend(['f', 'f']),
            '\u{FB01}' => out.extend(['f', 'i']),
            '\u{FB02}' => out.extend(['f', 'l']),
            '\u{FB03}' => out.extend(['f', 'f', 'i']),
            '\u{FB04}' => out.extend(['f', 'f', 'l']),
            '\u{2103}' => out.extend(['\u{B0}', 'C']),
            '\u{2109}' => out.extend(['\u{B0}', 'F']),
            c => out.push(c),
        }
    }
    out
}

/// `true` for URLs, e-mail addresses and `www.` host names.
///
/// - `X*//X*.X+`
/// - `X+@X*.X+`
/// - `www.X+.X+`
pub fn is_nonword(word: &[char]) -> bool {
    let n = word.len();
    if n < 4 {
        return false;
    }

    if let Some(slash) = word[..n - 3].iter().position(|&c| c == '/') {
        if word[slash + 1] == '/' && word[slash + 2..].contains(&'.') {
            return true;
        }
    }

    if let Some(at) = word.iter().position(|&c| c == '@') {
        if at > 0 && word[at + 1..].contains(&'.') {
            return true;
        }
    }

    n >= 5
        && word[..3].iter().all(|&c| simple_lower(c) == 'w')
        && word[3] == '.'
        && word[4..].contains(&'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn plain_words_are_unchanged() {
        assert_eq!(normalize(&chars("koira")), chars("koira"));
    }

    #[test]
    fn hyphens_ligatures_and_degrees() {
        assert_eq!(normalize(&chars("syy\u{2010}silta")), chars("syy-silta"));
        assert_eq!(normalize(&chars("syy\u{2011}silta")), chars("syy-silta"));
        assert_eq!(normalize(&chars("\u{FB01}nni")), chars("finni"));
        assert_eq!(normalize(&chars("\u{FB04}")), chars("ffl"));
        assert_eq!(normalize(&chars("5\u{2103}")), chars("5°C"));
    }

    #[test]
    fn nonwords() {
        assert!(is_nonword(&chars("http://example.com")));
        assert!(is_nonword(&chars("user@example.com")));
        assert!(is_nonword(&chars("www.example.com")));
        assert!(is_nonword(&chars("WWW.kielo.fi")));
        assert!(!is_nonword(&chars("koira")));
        assert!(!is_nonword(&chars("abc")));
        assert!(!is_nonword(&chars("@example.com")));
        assert!(!is_nonword(&chars("a//b")));
    }
}
