// The C interface driven the way a C caller would

#[path = "../../kielo-fi/src/test_lexicon.rs"]
mod test_lexicon;

use std::ffi::{CStr, CString, c_char};
use std::ptr;
use std::slice;

use kielo_core::grammar_error::{GCERR_EXTRA_WHITESPACE, GCERR_INVALID_SPELLING};
use kielo_ffi::*;
use kielo_fi::Session;

struct Handle {
    session: *mut Session,
}

impl Handle {
    fn open() -> Self {
        let mor = test_lexicon::morphology();
        let autocorr = test_lexicon::autocorrect();
        let mut error = ptr::null_mut();
        let session = unsafe {
            kielo_new(mor.as_ptr(), mor.len(), autocorr.as_ptr(), autocorr.len(), &mut error)
        };
        assert!(!session.is_null());
        assert!(error.is_null());
        Self { session }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        unsafe { kielo_free(self.session) };
    }
}

fn c(s: &str) -> CString {
    CString::new(s).unwrap()
}

unsafe fn owned(s: *mut c_char) -> String {
    assert!(!s.is_null());
    let text = unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string();
    unsafe { kielo_free_str(s) };
    text
}

unsafe fn strings(items: *mut *mut c_char, count: usize) -> Vec<String> {
    if items.is_null() {
        return Vec::new();
    }
    let list = unsafe { slice::from_raw_parts(items, count + 1) };
    assert!(list[count].is_null());
    list[..count]
        .iter()
        .map(|&s| unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string())
        .collect()
}

#[test]
fn bad_dictionaries_report_an_error() {
    let mut error = ptr::null_mut();
    let garbage = [1u8, 2, 3, 4];
    let session =
        unsafe { kielo_new(garbage.as_ptr(), garbage.len(), ptr::null(), 0, &mut error) };
    assert!(session.is_null());
    assert!(!unsafe { owned(error) }.is_empty());

    let mut error = ptr::null_mut();
    let session = unsafe { kielo_new(ptr::null(), 0, ptr::null(), 0, &mut error) };
    assert!(session.is_null());
    assert!(!error.is_null());
    unsafe { kielo_free_str(error) };

    let session = unsafe { kielo_new(ptr::null(), 0, ptr::null(), 0, ptr::null_mut()) };
    assert!(session.is_null());
}

#[test]
fn spell_and_suggest() {
    let h = Handle::open();
    unsafe {
        assert_eq!(kielo_spell(h.session, c("koira").as_ptr()), 1);
        assert_eq!(kielo_spell(h.session, c("koirra").as_ptr()), 0);
        assert_eq!(kielo_spell(h.session, ptr::null()), -1);
        assert_eq!(kielo_spell(ptr::null(), c("koira").as_ptr()), -1);

        let found = kielo_suggest(h.session, c("koirra").as_ptr());
        let words = strings(found.items, found.count);
        assert!(words.contains(&"koira".to_string()));
        kielo_free_string_array(found);
    }
}

#[test]
fn analyze() {
    let h = Handle::open();
    unsafe {
        let found = kielo_analyze(h.session, c("koiralla").as_ptr());
        assert_eq!(found.count, 1);
        let analysis = &*found.analyses;
        let keys = strings(analysis.keys, analysis.count);
        let values = strings(analysis.values, analysis.count);
        let baseform = keys.iter().position(|k| k == "BASEFORM").unwrap();
        assert_eq!(values[baseform], "koira");
        kielo_free_analyses(found);

        let none = kielo_analyze(h.session, c("koirra").as_ptr());
        assert_eq!(none.count, 0);
        assert!(none.analyses.is_null());
        kielo_free_analyses(none);
    }
}

#[test]
fn hyphenate() {
    let h = Handle::open();
    unsafe {
        let pattern = owned(kielo_hyphenate(h.session, c("koira").as_ptr()));
        assert_eq!(pattern.chars().count(), 5);

        let hyphenated = kielo_insert_hyphens(
            h.session,
            c("koiratalo").as_ptr(),
            c("-").as_ptr(),
            1,
        );
        assert_eq!(owned(hyphenated), "koi-ra-ta-lo");
    }
}

#[test]
fn grammar_errors() {
    let h = Handle::open();
    unsafe {
        let found = kielo_grammar_errors(h.session, c("Koira  juoksee.").as_ptr(), ptr::null());
        assert_eq!(found.count, 1);
        let error = &*found.errors;
        assert_eq!(error.code, GCERR_EXTRA_WHITESPACE);
        assert_eq!((error.start, error.len), (5, 2));
        assert!(!CStr::from_ptr(error.description).to_bytes().is_empty());
        kielo_free_grammar_errors(found);

        let text = c("Se kuullostaa hyvältä.");
        let found = kielo_grammar_errors(h.session, text.as_ptr(), c("en").as_ptr());
        let errors = slice::from_raw_parts(found.errors, found.count);
        let spelling = errors.iter().find(|e| e.code == GCERR_INVALID_SPELLING).unwrap();
        assert_eq!(
            strings(spelling.suggestions.items, spelling.suggestions.count),
            vec!["kuulostaa".to_string()]
        );
        kielo_free_grammar_errors(found);

        let unsupported = kielo_grammar_errors(h.session, text.as_ptr(), c("sv").as_ptr());
        assert_eq!(unsupported.count, 0);
        kielo_free_grammar_errors(unsupported);
    }
}

#[test]
fn tokens_and_sentences() {
    let h = Handle::open();
    unsafe {
        let found = kielo_tokens(h.session, c("Koira juoksee.").as_ptr());
        let tokens = slice::from_raw_parts(found.tokens, found.count);
        let types: Vec<i32> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(types, vec![1, 3, 1, 2]);
        assert_eq!(tokens[2].pos, 6);
        assert_eq!(CStr::from_ptr(tokens[2].text).to_str().unwrap(), "juoksee");
        kielo_free_tokens(found);

        let found = kielo_sentences(h.session, c("Koira juoksee. Kissa juoksee.").as_ptr());
        let sentences = slice::from_raw_parts(found.sentences, found.count);
        assert_eq!(sentences[0].sentence_type, 2);
        assert_eq!(sentences[0].len, 15);
        assert_eq!(sentences.iter().map(|s| s.len).sum::<usize>(), 29);
        kielo_free_sentences(found);
    }
}

#[test]
fn options() {
    let h = Handle::open();
    unsafe {
        assert_eq!(kielo_spell(h.session, c("koira.").as_ptr()), 0);
        assert_eq!(kielo_set_ignore_dot(h.session, 1), 1);
        assert_eq!(kielo_spell(h.session, c("koira.").as_ptr()), 1);
        assert_eq!(kielo_set_bool_option(h.session, 0, 0), 1);
        assert_eq!(kielo_spell(h.session, c("koira.").as_ptr()), 0);

        assert_eq!(kielo_set_int_option(h.session, 30, 1), 1);
        let found = kielo_suggest(h.session, c("koirra").as_ptr());
        assert!(found.count <= 1);
        kielo_free_string_array(found);

        assert_eq!(kielo_set_bool_option(h.session, 99, 1), 0);
        assert_eq!(kielo_set_int_option(h.session, 99, 1), 0);
        assert_eq!(kielo_set_bool_option(ptr::null_mut(), 0, 1), -1);
        assert_eq!(kielo_set_max_suggestions(ptr::null_mut(), 3), -1);
    }
}

#[test]
fn closed_handles_fail() {
    let h = Handle::open();
    unsafe {
        kielo_close(h.session);
        kielo_close(h.session);
        assert_eq!(kielo_spell(h.session, c("koira").as_ptr()), -1);
        assert!(kielo_hyphenate(h.session, c("koira").as_ptr()).is_null());
        assert_eq!(kielo_suggest(h.session, c("koirra").as_ptr()).count, 0);
        assert_eq!(kielo_tokens(h.session, c("Koira").as_ptr()).count, 0);
        assert_eq!(kielo_set_ignore_dot(h.session, 1), -1);
        assert_eq!(kielo_set_bool_option(h.session, 0, 1), -1);
    }
    unsafe { kielo_free(ptr::null_mut()) };
}

#[test]
fn static_data() {
    let version = unsafe { CStr::from_ptr(kielo_version()) };
    assert_eq!(version.to_str().unwrap(), Session::version());

    unsafe {
        let values = kielo_attribute_values(c("NUMBER").as_ptr());
        assert_eq!(strings(values.items, values.count), vec!["singular", "plural"]);
        kielo_free_string_array(values);

        let unknown = kielo_attribute_values(c("BASEFORM").as_ptr());
        assert!(unknown.items.is_null());
        assert_eq!(unknown.count, 0);
        kielo_free_string_array(unknown);
    }
}

const HEADER: &str = include_str!("../include/kielo.h");
const SOURCE: &str = include_str!("../src/lib.rs");

/// Names of the functions the library exports, including the ones the
/// setter macro generates.
fn exported_functions() -> Vec<&'static str> {
    let mut names = Vec::new();
    for line in SOURCE.lines().map(str::trim) {
        let name = if let Some((_, rest)) = line.split_once("extern \"C\" fn ") {
            rest.split('(').next()
        } else if line.starts_with("kielo_set_") && line.contains("=>") {
            line.split_whitespace().next()
        } else {
            None
        };
        names.extend(name.filter(|n| n.starts_with("kielo_")));
    }
    names
}

/// Names of the functions the header declares.
fn declared_functions() -> Vec<&'static str> {
    HEADER
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim_start().starts_with(['/', '*']))
        .filter_map(|line| {
            let start = line.find("kielo_")?;
            let name = &line[start..line[start..].find('(')? + start];
            Some(name)
        })
        .collect()
}

fn define(name: &str) -> i32 {
    HEADER
        .lines()
        .find_map(|line| {
            let mut parts = line.split_whitespace();
            (parts.next() == Some("#define") && parts.next() == Some(name))
                .then(|| parts.next())
                .flatten()
        })
        .unwrap_or_else(|| panic!("{name} is not defined"))
        .parse()
        .unwrap()
}

#[test]
fn header_declares_every_export() {
    let mut exported = exported_functions();
    let mut declared = declared_functions();
    assert!(exported.contains(&"kielo_new"));
    assert!(exported.contains(&"kielo_set_speller_cache_size"));
    exported.sort_unstable();
    declared.sort_unstable();
    assert_eq!(declared, exported);

    for name in [
        "KieloStringArray",
        "KieloAnalysis",
        "KieloAnalysisArray",
        "KieloGrammarError",
        "KieloGrammarErrorArray",
        "KieloToken",
        "KieloTokenArray",
        "KieloSentence",
        "KieloSentenceArray",
    ] {
        assert!(HEADER.contains(&format!("}} {name};")), "{name} is not declared");
    }
}

#[test]
fn header_constants_match_the_library() {
    use kielo_core::{SentenceType, TokenType};
    use kielo_fi::options::{BOOL_OPTIONS, INT_OPTIONS};

    assert_eq!(define("KIELO_TOKEN_NONE"), TokenType::None.code());
    assert_eq!(define("KIELO_TOKEN_WORD"), TokenType::Word.code());
    assert_eq!(define("KIELO_TOKEN_PUNCTUATION"), TokenType::Punctuation.code());
    assert_eq!(define("KIELO_TOKEN_WHITESPACE"), TokenType::Whitespace.code());
    assert_eq!(define("KIELO_TOKEN_UNKNOWN"), TokenType::Unknown.code());

    assert_eq!(define("KIELO_SENTENCE_NONE"), SentenceType::None.code());
    assert_eq!(define("KIELO_SENTENCE_NO_START"), SentenceType::NoStart.code());
    assert_eq!(define("KIELO_SENTENCE_PROBABLE"), SentenceType::Probable.code());
    assert_eq!(define("KIELO_SENTENCE_POSSIBLE"), SentenceType::Possible.code());

    for &(id, name) in BOOL_OPTIONS {
        assert_eq!(define(&format!("KIELO_OPT_{}", name.to_uppercase())), id);
    }
    for &(id, name) in INT_OPTIONS {
        assert_eq!(define(&format!("KIELO_INTOPT_{}", name.to_uppercase())), id);
    }
}
