// URLs and e-mail addresses, kept whole as word tokens

use kielo_core::character::{CharType, is_letter, is_quotation_mark};

const SCHEMES: [&str; 3] = ["https://", "http://", "www."];

/// Unknown-class characters that may appear inside a URL.
const URL_SYMBOLS: &str = "=#%~_+@$*";

/// Dropped from the end of a link; they belong to the sentence around it.
const TRAILING: [char; 9] = ['.', ',', '!', '?', ':', ';', ')', ']', '\''];

/// Length of the URL or e-mail address starting `text`, 0 when there is none.
pub(crate) fn link_length(text: &[char]) -> usize {
    url_length(text).or_else(|| email_length(text)).unwrap_or(0)
}

fn scheme_length(text: &[char]) -> Option<usize> {
    SCHEMES.iter().find_map(|scheme| {
        let n = scheme.chars().count();
        (text.len() >= n && text.iter().zip(scheme.chars()).all(|(&a, b)| a == b)).then_some(n)
    })
}

fn url_length(text: &[char]) -> Option<usize> {
    let start = scheme_length(text)?;
    let mut end = start;
    for (i, &c) in text.iter().enumerate().skip(start) {
        let inside = match CharType::of(c) {
            CharType::Letter | CharType::Digit => true,
            CharType::Punctuation => !is_quotation_mark(c),
            CharType::Unknown => URL_SYMBOLS.contains(c),
            CharType::Whitespace => false,
        };
        if !inside {
            break;
        }
        end = i + 1;
    }
    while end > start && TRAILING.contains(&text[end - 1]) {
        end -= 1;
    }

    let host = &text[start..end];
    let plausible = host.len() >= 4 && (start != 4 || host.contains(&'.'));
    plausible.then_some(end)
}

fn is_local_part(c: char) -> bool {
    is_letter(c) || c.is_ascii_digit() || "._%+-'".contains(c)
}

fn is_domain(c: char) -> bool {
    is_letter(c) || c.is_ascii_digit() || c == '-' || c == '.'
}

fn email_length(text: &[char]) -> Option<usize> {
    let at = text.iter().position(|&c| !is_local_part(c))?;
    if at == 0 || text[at] != '@' {
        return None;
    }
    let domain_start = at + 1;
    let mut end = domain_start
        + text[domain_start..]
            .iter()
            .take_while(|&&c| is_domain(c))
            .count();
    while end > domain_start && text[end - 1] == '.' {
        end -= 1;
    }

    let domain = &text[domain_start..end];
    let valid = domain.len() >= 3 && domain[0] != '.' && domain.contains(&'.');
    valid.then_some(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(s: &str) -> usize {
        let chars: Vec<char> = s.chars().collect();
        link_length(&chars)
    }

    #[test]
    fn urls() {
        assert_eq!(len("https://voikko.puimula.org"), 26);
        assert_eq!(len("http://example.com/path?q=1&x=%20 loppu"), 33);
        assert_eq!(len("www.kotus.fi."), 12);
        assert_eq!(len("http://example.com)"), 18);
        assert_eq!(len("http://a"), 0);
        assert_eq!(len("www.koira"), 0);
    }

    #[test]
    fn email_addresses() {
        assert_eq!(len("etu.suku@example.fi"), 19);
        assert_eq!(len("foo@bar.com. Seuraava"), 11);
        assert_eq!(len("foo@bar "), 0);
        assert_eq!(len("foo@@bar.com"), 0);
        assert_eq!(len("@bar.com"), 0);
    }

    #[test]
    fn plain_words_are_not_links() {
        assert_eq!(len("koira"), 0);
        assert_eq!(len("koira kissa"), 0);
        assert_eq!(len("EU:n"), 0);
    }
}
