// Subcommand output, as text or JSON lines

use std::collections::HashMap;
use std::io::{BufRead, Write};

use anyhow::Result;
use kielo_core::analysis::{ATTR_BASEFORM, ATTR_STRUCTURE};
use kielo_core::{Analysis, GrammarError, SentenceType, Token, TokenType};
use kielo_fi::Session;
use serde::Serialize;

use crate::{Command, items, text};

/// Run `command`, reading from `input` when it has no arguments.
pub fn execute(
    session: &Session,
    command: &Command,
    json: bool,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut printer = Printer { out, json };
    match command {
        Command::Spell { suggest, words } => {
            for word in items(words, input)? {
                spell(session, &word, *suggest, &mut printer)?;
            }
        }
        Command::Suggest { words } => {
            for word in items(words, input)? {
                suggest(session, &word, &mut printer)?;
            }
        }
        Command::Analyze { words } => {
            for word in items(words, input)? {
                analyze(session, &word, &mut printer)?;
            }
        }
        Command::Baseform { text: args } => baseform(session, &text(args, input)?, &mut printer)?,
        Command::Hyphenate {
            separator,
            pattern,
            all,
            words,
        } => {
            let mode = match (*pattern, *all) {
                (_, true) => HyphenMode::AllPositions,
                (true, false) => HyphenMode::Pattern,
                (false, false) => HyphenMode::Insert(separator),
            };
            for word in items(words, input)? {
                hyphenate(session, &word, mode, &mut printer)?;
            }
        }
        Command::Tokenize { text: args } => tokenize(session, &text(args, input)?, &mut printer)?,
        Command::Sentences { text: args } => {
            sentences(session, &text(args, input)?, &mut printer)?
        }
        Command::Grammar {
            language,
            empty_line,
            text: args,
        } => {
            let text = text(args, input)?;
            for paragraph in paragraphs(&text, *empty_line) {
                grammar(session, &paragraph, language, &mut printer)?;
            }
        }
    }
    Ok(())
}

struct Printer<'a, W> {
    out: &'a mut W,
    json: bool,
}

impl<W: Write> Printer<'_, W> {
    /// Write `value` as one JSON line, or the lines from `text` otherwise.
    fn emit(
        &mut self,
        value: &impl Serialize,
        text: impl FnOnce(&mut W) -> std::io::Result<()>,
    ) -> Result<()> {
        if self.json {
            serde_json::to_writer(&mut *self.out, value)?;
            writeln!(self.out)?;
        } else {
            text(self.out)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SpellResult<'a> {
    word: &'a str,
    correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<Vec<String>>,
}

fn spell<W: Write>(
    session: &Session,
    word: &str,
    with_suggestions: bool,
    printer: &mut Printer<'_, W>,
) -> Result<()> {
    let correct = session.spell(word)?;
    let suggestions = if with_suggestions && !correct {
        Some(session.suggest(word)?)
    } else {
        None
    };
    let result = SpellResult {
        word,
        correct,
        suggestions,
    };
    printer.emit(&result, |out| {
        writeln!(out, "{}: {word}", if correct { 'C' } else { 'W' })?;
        for suggestion in result.suggestions.iter().flatten() {
            writeln!(out, "S: {suggestion}")?;
        }
        Ok(())
    })
}

fn suggest<W: Write>(session: &Session, word: &str, printer: &mut Printer<'_, W>) -> Result<()> {
    let correct = session.spell(word)?;
    let result = SpellResult {
        word,
        correct,
        suggestions: Some(session.suggest(word)?),
    };
    printer.emit(&result, |out| {
        let suggestions = result.suggestions.as_deref().unwrap_or_default();
        if correct {
            writeln!(out, "{word} (correct)")
        } else if suggestions.is_empty() {
            writeln!(out, "{word}: (no suggestions)")
        } else {
            writeln!(out, "{word}:")?;
            suggestions.iter().try_for_each(|s| writeln!(out, "  {s}"))
        }
    })
}

#[derive(Serialize)]
struct Analyses<'a> {
    word: &'a str,
    analyses: Vec<Analysis>,
}

fn analyze<W: Write>(session: &Session, word: &str, printer: &mut Printer<'_, W>) -> Result<()> {
    let result = Analyses {
        word,
        analyses: session.analyze(word)?,
    };
    printer.emit(&result, |out| {
        if result.analyses.is_empty() {
            return writeln!(out, "{word}: (no analysis)");
        }
        writeln!(out, "{word}:")?;
        for (i, analysis) in result.analyses.iter().enumerate() {
            writeln!(out, "  Analysis {}:", i + 1)?;
            for (key, value) in analysis.iter() {
                writeln!(out, "    {key}={value}")?;
            }
        }
        Ok(())
    })
}

/// Keep only common-noun readings of a lowercase word when it has any.
fn prefer_common_readings(analyses: Vec<Analysis>, word: &str) -> Vec<Analysis> {
    if !word.chars().next().is_some_and(char::is_lowercase) {
        return analyses;
    }
    let common: Vec<Analysis> = analyses
        .iter()
        .filter(|a| !a.get(ATTR_STRUCTURE).is_some_and(|s| s.starts_with("=i")))
        .cloned()
        .collect();
    if common.is_empty() { analyses } else { common }
}

#[derive(Serialize)]
struct Frequencies {
    known: Vec<(String, f64)>,
    unknown: Vec<(String, u64)>,
}

fn baseform<W: Write>(session: &Session, text: &str, printer: &mut Printer<'_, W>) -> Result<()> {
    let mut known: HashMap<String, f64> = HashMap::new();
    let mut unknown: HashMap<String, u64> = HashMap::new();

    for token in session.tokens(text)? {
        if token.token_type != TokenType::Word {
            continue;
        }
        let analyses = prefer_common_readings(session.analyze(&token.text)?, &token.text);
        if analyses.is_empty() {
            *unknown.entry(token.text).or_default() += 1;
            continue;
        }
        // An ambiguous word counts evenly towards each reading.
        let weight = 1.0 / analyses.len() as f64;
        for analysis in &analyses {
            let baseform = analysis.get(ATTR_BASEFORM).unwrap_or(token.text.as_str());
            *known.entry(baseform.to_string()).or_default() += weight;
        }
    }

    let mut known: Vec<(String, f64)> = known.into_iter().collect();
    known.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let mut unknown: Vec<(String, u64)> = unknown.into_iter().collect();
    unknown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let result = Frequencies { known, unknown };
    printer.emit(&result, |out| {
        writeln!(out, "=== Known words ===")?;
        for (word, frequency) in &result.known {
            writeln!(out, "{word}\t{frequency}")?;
        }
        writeln!(out, "=== Unknown words ===")?;
        for (word, frequency) in &result.unknown {
            writeln!(out, "{word}\t{frequency}")?;
        }
        Ok(())
    })
}

#[derive(Clone, Copy)]
enum HyphenMode<'a> {
    Insert(&'a str),
    Pattern,
    AllPositions,
}

#[derive(Serialize)]
struct Hyphenation<'a> {
    word: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hyphenated: Option<String>,
}

fn hyphenate<W: Write>(
    session: &Session,
    word: &str,
    mode: HyphenMode<'_>,
    printer: &mut Printer<'_, W>,
) -> Result<()> {
    let result = match mode {
        HyphenMode::Insert(separator) => Hyphenation {
            word,
            pattern: None,
            hyphenated: Some(session.insert_hyphens(word, separator, true)?),
        },
        HyphenMode::Pattern => Hyphenation {
            word,
            pattern: Some(session.hyphenate(word)?),
            hyphenated: None,
        },
        HyphenMode::AllPositions => Hyphenation {
            word,
            pattern: Some(session.all_hyphenation_positions(word)?),
            hyphenated: None,
        },
    };
    printer.emit(&result, |out| match (&result.pattern, &result.hyphenated) {
        (Some(pattern), _) => writeln!(out, "{word} {pattern}"),
        (None, Some(hyphenated)) => writeln!(out, "{hyphenated}"),
        (None, None) => Ok(()),
    })
}

/// Control characters shown escaped so every item stays on one line.
fn escaped(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn tokenize<W: Write>(session: &Session, text: &str, printer: &mut Printer<'_, W>) -> Result<()> {
    let tokens: Vec<Token> = session.tokens(text)?;
    printer.emit(&tokens, |out| {
        for token in &tokens {
            writeln!(
                out,
                "{:13} [{:>4}..{:>4}]: {}",
                token.token_type.name(),
                token.pos,
                token.pos + token.char_len(),
                escaped(&token.text)
            )?;
        }
        Ok(())
    })
}

#[derive(Serialize)]
struct SentenceSpan {
    sentence_type: SentenceType,
    start: usize,
    len: usize,
    text: String,
}

fn sentences<W: Write>(session: &Session, text: &str, printer: &mut Printer<'_, W>) -> Result<()> {
    let chars: Vec<char> = text.chars().collect();
    let mut start = 0;
    let spans: Vec<SentenceSpan> = session
        .sentences(text)?
        .into_iter()
        .map(|sentence| {
            let end = (start + sentence.len).min(chars.len());
            let span = SentenceSpan {
                sentence_type: sentence.sentence_type,
                start,
                len: sentence.len,
                text: chars[start.min(end)..end].iter().collect(),
            };
            start = end;
            span
        })
        .collect();

    printer.emit(&spans, |out| {
        for span in &spans {
            writeln!(
                out,
                "{:8} [{:>4}..{:>4}]: {}",
                span.sentence_type.name(),
                span.start,
                span.start + span.len,
                escaped(&span.text)
            )?;
        }
        Ok(())
    })
}

/// Paragraphs of `text`: every non-empty line, or runs of lines separated
/// by empty ones.
fn paragraphs(text: &str, empty_line_separates: bool) -> Vec<String> {
    let lines = text.lines().map(str::trim);
    if !empty_line_separates {
        return lines.filter(|l| !l.is_empty()).map(String::from).collect();
    }
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines.chain([""]) {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    paragraphs
}

#[derive(Serialize)]
struct ParagraphErrors<'a> {
    paragraph: &'a str,
    errors: Vec<GrammarError>,
}

fn grammar<W: Write>(
    session: &Session,
    paragraph: &str,
    language: &str,
    printer: &mut Printer<'_, W>,
) -> Result<()> {
    let result = ParagraphErrors {
        paragraph,
        errors: session.grammar_errors(paragraph, language)?,
    };
    let chars: Vec<char> = paragraph.chars().collect();
    printer.emit(&result, |out| {
        for error in &result.errors {
            let end = (error.start + error.len).min(chars.len());
            let span: String = chars[error.start.min(end)..end].iter().collect();
            writeln!(out, "{paragraph}")?;
            writeln!(out, "E: {} (start={})", error.description, error.start)?;
            writeln!(out, "E: \"{span}\"")?;
            for suggestion in &error.suggestions {
                writeln!(out, "S:  \"{suggestion}\"")?;
            }
            writeln!(out, "{}", "=".repeat(49))?;
        }
        Ok(())
    })
}
