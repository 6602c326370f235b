// Sentence-level rules and the end-of-paragraph check

use kielo_core::TokenType;
use kielo_core::character::{
    eq_ignore_case, is_finnish_quotation_mark, is_lower, is_quotation_mark,
};
use kielo_core::grammar_error::{
    GCERR_A_INFINITIVE_REQUIRED, GCERR_EXTRA_COMMA, GCERR_EXTRA_MAIN_VERB, GCERR_EXTRA_WHITESPACE,
    GCERR_FOREIGN_QUOTATION_MARK, GCERR_INVALID_PUNCTUATION_AT_END_OF_QUOTATION,
    GCERR_INVALID_SENTENCE_STARTER, GCERR_MA_INFINITIVE_REQUIRED, GCERR_MISPLACED_SIDESANA,
    GCERR_MISSING_MAIN_VERB, GCERR_NEGATIVE_VERB_MISMATCH, GCERR_REPEATING_WORD,
    GCERR_SPACE_BEFORE_PUNCTUATION, GCERR_TERMINATING_PUNCTUATION_MISSING, GrammarError,
};

use super::GrammarOptions;
use super::paragraph::{GrammarSentence, GrammarToken, Infinitive, Paragraph};

/// Words that may legitimately appear twice in a row.
const REPEATABLE: [&str; 3] = ["ollut", "olleet", "sillä"];

/// Punctuation a sentence may start with.
fn starts_sentence(c: char) -> bool {
    matches!(c, '(' | ')' | '\'' | '-' | '\u{2013}' | '\u{2014}') || is_quotation_mark(c)
}

/// Three tokens `word, whitespace, word`.
fn word_pairs(tokens: &[GrammarToken]) -> impl Iterator<Item = (&GrammarToken, &GrammarToken)> {
    tokens.windows(3).filter_map(|w| {
        let spaced = w[0].is_word()
            && w[1].token_type == TokenType::Whitespace
            && w[2].is_word();
        spaced.then(|| (&w[0], &w[2]))
    })
}

fn span(code: i32, first: &GrammarToken, last: &GrammarToken) -> GrammarError {
    GrammarError::new(code, first.pos, last.end() - first.pos)
}

/// Extra whitespace, space before a comma, doubled commas and punctuation
/// that cannot start a sentence.
pub(crate) fn local_punctuation(sentence: &GrammarSentence, errors: &mut Vec<GrammarError>) {
    let tokens = &sentence.tokens;
    let mut i = 0;
    while i < tokens.len() {
        let t = &tokens[i];
        let next = tokens.get(i + 1);
        match t.token_type {
            TokenType::Whitespace if t.len() > 1 => errors.push(GrammarError::with_suggestions(
                GCERR_EXTRA_WHITESPACE,
                t.pos,
                t.len(),
                vec![" ".into()],
            )),
            TokenType::Whitespace if next.is_some_and(|n| n.is_punctuation(',')) => {
                errors.push(GrammarError::with_suggestions(
                    GCERR_SPACE_BEFORE_PUNCTUATION,
                    t.pos,
                    2,
                    vec![",".into()],
                ));
            }
            // footnote reference "[1]"
            TokenType::Punctuation
                if t.first() == Some('[') && tokens.get(i + 2).is_some_and(|c| c.is("]")) =>
            {
                i += 3;
                continue;
            }
            TokenType::Punctuation if i == 0 => {
                if !t.first().is_some_and(starts_sentence) {
                    let (start, len) = if t.pos == 0 { (0, 1) } else { (t.pos - 1, 2) };
                    errors.push(GrammarError::new(GCERR_INVALID_SENTENCE_STARTER, start, len));
                }
            }
            TokenType::Punctuation
                if t.first() == Some(',') && next.is_some_and(|n| n.is_punctuation(',')) =>
            {
                errors.push(GrammarError::with_suggestions(
                    GCERR_EXTRA_COMMA,
                    t.pos,
                    2,
                    vec![",".into()],
                ));
            }
            _ => {}
        }
        i += 1;
    }
}

/// Quotation marks foreign to Finnish, and a full stop, question mark or
/// exclamation mark followed by a closing quote and a comma.
pub(crate) fn quotation_punctuation(sentence: &GrammarSentence, errors: &mut Vec<GrammarError>) {
    let tokens = &sentence.tokens;
    for t in tokens.iter().filter(|t| t.token_type == TokenType::Punctuation) {
        let Some(c) = t.first() else { continue };
        if is_quotation_mark(c) && !is_finnish_quotation_mark(c) {
            let preferred = if c == '\u{00AB}' { "\u{00BB}" } else { "\u{201D}" };
            errors.push(GrammarError::with_suggestions(
                GCERR_FOREIGN_QUOTATION_MARK,
                t.pos,
                1,
                vec![preferred.into()],
            ));
        }
    }

    for w in tokens.windows(3) {
        let (Some(mark), Some(quote)) = (w[0].first(), w[1].first()) else {
            continue;
        };
        let closes = w.iter().all(|t| t.token_type == TokenType::Punctuation)
            && is_finnish_quotation_mark(quote)
            && w[2].first() == Some(',');
        if !closes {
            continue;
        }
        let suggestion = match mark {
            '.' => format!("{quote},"),
            '!' | '?' => format!("{mark}{quote}"),
            _ => continue,
        };
        errors.push(GrammarError::with_suggestions(
            GCERR_INVALID_PUNCTUATION_AT_END_OF_QUOTATION,
            w[0].pos,
            3,
            vec![suggestion],
        ));
    }
}

/// The same word twice in a row.
pub(crate) fn repeating_words(sentence: &GrammarSentence, errors: &mut Vec<GrammarError>) {
    for (first, second) in word_pairs(&sentence.tokens) {
        if !eq_ignore_case(&first.text, &second.text)
            || first.first().is_some_and(|c| c.is_ascii_digit())
        {
            continue;
        }
        let lower: String = first.text.iter().flat_map(|c| c.to_lowercase()).collect();
        if REPEATABLE.contains(&lower.as_str()) {
            continue;
        }
        let mut error = span(GCERR_REPEATING_WORD, first, second);
        error.suggestions.push(first.text.iter().collect());
        errors.push(error);
    }
}

/// "en juoksen": a negative verb followed by a positive form.
pub(crate) fn negative_verb(sentence: &GrammarSentence, errors: &mut Vec<GrammarError>) {
    for (negative, verb) in word_pairs(&sentence.tokens) {
        if negative.negative_verb && verb.positive_verb {
            errors.push(span(GCERR_NEGATIVE_VERB_MISMATCH, negative, verb));
        }
    }
}

/// "alkaa juoksemaan": the infinitive does not match what the verb requires.
pub(crate) fn compound_verb(sentence: &GrammarSentence, errors: &mut Vec<GrammarError>) {
    for (verb, follower) in word_pairs(&sentence.tokens) {
        let code = match (verb.requires, follower.infinitive) {
            (Infinitive::A, Infinitive::Ma) => GCERR_A_INFINITIVE_REQUIRED,
            (Infinitive::Ma, Infinitive::A) => GCERR_MA_INFINITIVE_REQUIRED,
            _ => continue,
        };
        errors.push(span(code, verb, follower));
    }
}

/// A conjunction right before the full stop.
pub(crate) fn sidesana(sentence: &GrammarSentence, errors: &mut Vec<GrammarError>) {
    let mut tokens = sentence.tokens.as_slice();
    if let Some((last, rest)) = tokens.split_last() {
        if last.token_type == TokenType::Whitespace {
            tokens = rest;
        }
    }
    if let [.., conjunction, stop] = tokens {
        let full_stop = stop.is_punctuation('.') && stop.len() == 1;
        if conjunction.conjunction && !conjunction.is("vaan") && full_stop {
            errors.push(GrammarError::new(
                GCERR_MISPLACED_SIDESANA,
                conjunction.pos,
                conjunction.len(),
            ));
        }
    }
}

/// A sentence of several words without any verb, or a clause with two main
/// verbs.
pub(crate) fn main_verb(
    sentence: &GrammarSentence,
    options: &GrammarOptions,
    errors: &mut Vec<GrammarError>,
) {
    let tokens = &sentence.tokens;
    let Some(first) = tokens.first() else {
        return;
    };
    if first.token_type == TokenType::Punctuation {
        return;
    }
    if options.accept_bulleted_lists
        && sentence.pos == 0
        && (first.first().is_some_and(is_lower) || !first.lowercase_first)
    {
        return;
    }
    if tokens.iter().any(|t| t.first() == Some('\t')) {
        return;
    }

    let starts_with = |i: usize, prefix: &str| {
        tokens.get(i).is_some_and(|t| {
            let n = prefix.chars().count();
            t.text.iter().copied().take(n).eq(prefix.chars())
        })
    };

    let mut words = 0;
    let mut verb_found = false;
    // index of the main verb of the current clause
    let mut clause_verb: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        match token.token_type {
            TokenType::Word => {
                words += 1;
                if !token.valid || token.possible_main_verb || token.negative_verb {
                    verb_found = true;
                }
                let clause_break = token.possible_conjunction
                    || (starts_with(i, "siinä") && starts_with(i + 2, "missä"))
                    || (starts_with(i, "kävi") && starts_with(i + 2, "miten"));
                if clause_break {
                    clause_verb = None;
                } else if token.main_verb {
                    match clause_verb {
                        Some(v) => {
                            let repeated = i == v + 2 && tokens[v].text == token.text;
                            if !repeated {
                                errors.push(span(GCERR_EXTRA_MAIN_VERB, &tokens[v], token));
                            }
                            clause_verb = None;
                        }
                        None => clause_verb = Some(i),
                    }
                }
            }
            TokenType::Punctuation => clause_verb = None,
            _ => {}
        }
    }

    if verb_found || words < 2 {
        return;
    }
    let Some(last) = tokens.iter().rev().find(|t| t.token_type != TokenType::Whitespace) else {
        return;
    };
    if last.is(".") || last.is("?") {
        errors.push(GrammarError::new(
            GCERR_MISSING_MAIN_VERB,
            sentence.pos,
            last.end() - sentence.pos,
        ));
    }
}

/// The paragraph does not end in punctuation.
pub(crate) fn end_punctuation(
    paragraph: &Paragraph,
    options: &GrammarOptions,
    errors: &mut Vec<GrammarError>,
) {
    if options.accept_unfinished_paragraphs || options.accept_bulleted_lists {
        return;
    }
    if options.accept_titles
        && paragraph.sentences.len() == 1
        && !paragraph
            .tokens()
            .any(|t| t.possible_main_verb || t.negative_verb)
    {
        return;
    }

    let Some(last) = paragraph
        .tokens()
        .filter(|t| t.token_type != TokenType::Whitespace)
        .last()
    else {
        return;
    };
    if last.token_type != TokenType::Punctuation {
        errors.push(GrammarError::new(
            GCERR_TERMINATING_PUNCTUATION_MISSING,
            last.pos,
            last.len(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::FinnishAnalyzer;
    use crate::test_lexicon;

    fn paragraph(text: &str) -> Paragraph {
        let analyzer = FinnishAnalyzer::from_bytes(&test_lexicon::morphology()).unwrap();
        let chars: Vec<char> = text.chars().collect();
        Paragraph::analyze(&chars, &analyzer).unwrap()
    }

    fn run(text: &str, check: fn(&GrammarSentence, &mut Vec<GrammarError>)) -> Vec<GrammarError> {
        let mut errors = Vec::new();
        for sentence in &paragraph(text).sentences {
            check(sentence, &mut errors);
        }
        errors
    }

    fn spans(errors: &[GrammarError]) -> Vec<(i32, usize, usize)> {
        errors.iter().map(|e| (e.code, e.start, e.len)).collect()
    }

    #[test]
    fn whitespace_and_commas() {
        let errors = run("Koira  juoksee , ja kissa,, talo.", local_punctuation);
        assert_eq!(spans(&errors), [
            (GCERR_EXTRA_WHITESPACE, 5, 2),
            (GCERR_SPACE_BEFORE_PUNCTUATION, 14, 2),
            (GCERR_EXTRA_COMMA, 25, 2),
        ]);
        assert_eq!(errors[0].suggestions, [" "]);
        assert_eq!(errors[2].suggestions, [","]);
    }

    #[test]
    fn sentence_starters() {
        assert_eq!(spans(&run(", koira juoksee.", local_punctuation)), [(
            GCERR_INVALID_SENTENCE_STARTER,
            0,
            1
        )]);
        assert!(run("(Koira juoksee.)", local_punctuation).is_empty());
        assert!(run("\"Koira juoksee.\"", local_punctuation).is_empty());
        assert!(run("Koira [1] juoksee.", local_punctuation).is_empty());
    }

    #[test]
    fn quotation_marks() {
        let errors = run("Hän sanoi \u{201C}hei\u{201D}.", quotation_punctuation);
        assert_eq!(spans(&errors), [(GCERR_FOREIGN_QUOTATION_MARK, 10, 1)]);
        assert_eq!(errors[0].suggestions, ["\u{201D}"]);

        let errors = run("\"Koira juoksee.\", hän sanoi.", quotation_punctuation);
        assert_eq!(spans(&errors), [(GCERR_INVALID_PUNCTUATION_AT_END_OF_QUOTATION, 14, 3)]);
        assert_eq!(errors[0].suggestions, ["\","]);

        let errors = run("\"Juokse!\", hän sanoi.", quotation_punctuation);
        assert_eq!(errors[0].suggestions, ["!\""]);
    }

    #[test]
    fn repeated_words() {
        let errors = run("Koira koira juoksee.", repeating_words);
        assert_eq!(spans(&errors), [(GCERR_REPEATING_WORD, 0, 11)]);
        assert_eq!(errors[0].suggestions, ["Koira"]);
        assert!(run("Hän on ollut ollut täällä.", repeating_words).is_empty());
        assert!(run("Vuonna 1918 1918 oli.", repeating_words).is_empty());
        assert!(run("Koira, koira.", repeating_words).is_empty());
    }

    #[test]
    fn negative_verb_agreement() {
        assert_eq!(spans(&run("En juoksen.", negative_verb)), [(
            GCERR_NEGATIVE_VERB_MISMATCH,
            0,
            10
        )]);
        assert!(run("En juokse.", negative_verb).is_empty());
    }

    #[test]
    fn infinitive_after_verb() {
        assert_eq!(spans(&run("Koira alkaa juoksemaan.", compound_verb)), [(
            GCERR_A_INFINITIVE_REQUIRED,
            6,
            16
        )]);
        assert!(run("Koira alkaa juosta.", compound_verb).is_empty());
    }

    #[test]
    fn conjunction_at_the_end() {
        assert_eq!(spans(&run("Koira juoksee ja.", sidesana)), [(
            GCERR_MISPLACED_SIDESANA,
            14,
            2
        )]);
        assert!(run("Koira ja kissa.", sidesana).is_empty());
        assert!(run("Koira juoksee ja...", sidesana).is_empty());
    }

    #[test]
    fn main_verbs() {
        let options = GrammarOptions::default();
        let check = |text: &str| {
            let mut errors = Vec::new();
            for s in &paragraph(text).sentences {
                main_verb(s, &options, &mut errors);
            }
            spans(&errors)
        };
        assert_eq!(check("Koira ja kissa."), [(GCERR_MISSING_MAIN_VERB, 0, 15)]);
        assert_eq!(check("Koira on juoksee."), [(GCERR_EXTRA_MAIN_VERB, 6, 10)]);
        assert!(check("Koira juoksee.").is_empty());
        assert!(check("Koira juoksee juoksee.").is_empty());
        assert!(check("Koira on, kissa juoksee.").is_empty());
        assert!(check("Koira ja xyzzy.").is_empty());
        assert!(check("Koira ja kissa").is_empty());
        assert!(check("Koira.").is_empty());
    }

    #[test]
    fn terminating_punctuation() {
        let check = |text: &str, options: GrammarOptions| {
            let mut errors = Vec::new();
            end_punctuation(&paragraph(text), &options, &mut errors);
            spans(&errors)
        };
        let defaults = GrammarOptions::default();
        assert_eq!(check("Koira juoksee", defaults), [(
            GCERR_TERMINATING_PUNCTUATION_MISSING,
            6,
            7
        )]);
        assert_eq!(check("Koira juoksee ", defaults), [(
            GCERR_TERMINATING_PUNCTUATION_MISSING,
            6,
            7
        )]);
        assert!(check("Koira juoksee.", defaults).is_empty());
        assert!(check("", defaults).is_empty());

        let unfinished = GrammarOptions {
            accept_unfinished_paragraphs: true,
            ..defaults
        };
        assert!(check("Koira juoksee", unfinished).is_empty());

        let titles = GrammarOptions {
            accept_titles: true,
            ..defaults
        };
        assert!(check("Koira ja kissa", titles).is_empty());
        assert_eq!(check("Koira juoksee", titles).len(), 1);
    }
}
