// Every exported function takes raw pointers from the caller; the contract
// for each is in its doc comment.
#![allow(clippy::missing_safety_doc)]

//! C ABI over [`kielo_fi::Session`].
//!
//! Ownership rules:
//! - `kielo_new` returns a handle, released with `kielo_free`.
//!   `kielo_close` drops the dictionaries but keeps the handle; every call
//!   on it then fails.
//! - Strings come back as `char *`, released with `kielo_free_str`.
//! - Arrays come back by value with a count, each with its own release
//!   function. String arrays are also NULL-terminated.
//! - Input strings are NUL-terminated UTF-8.
//!
//! A failed call returns -1, NULL, or an empty array.

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;
use std::slice;
use std::sync::LazyLock;

use kielo_core::attributes::attribute_values;
use kielo_fi::Session;

// ── Handle lifecycle ─────────────────────────────────────────────

/// Open a session over `mor.vfst` bytes and optional `autocorr.vfst` bytes
/// (NULL or zero length to skip).
///
/// Returns NULL on failure. If `error_out` is non-NULL it then receives a
/// message to release with `kielo_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_new(
    mor_data: *const u8,
    mor_len: usize,
    autocorr_data: *const u8,
    autocorr_len: usize,
    error_out: *mut *mut c_char,
) -> *mut Session {
    if mor_data.is_null() || mor_len == 0 {
        set_error(error_out, "morphology data is missing");
        return ptr::null_mut();
    }
    let morphology = unsafe { slice::from_raw_parts(mor_data, mor_len) };
    let autocorrect = (!autocorr_data.is_null() && autocorr_len > 0)
        .then(|| unsafe { slice::from_raw_parts(autocorr_data, autocorr_len) });

    match Session::open(morphology, autocorrect) {
        Ok(session) => Box::into_raw(Box::new(session)),
        Err(e) => {
            set_error(error_out, &e.to_string());
            ptr::null_mut()
        }
    }
}

/// Close the session but keep the handle. Later calls on it fail. NULL and
/// closed handles are ignored.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_close(handle: *mut Session) {
    if let Some(session) = unsafe { handle.as_mut() } {
        session.close();
    }
}

/// Release a handle from `kielo_new`. NULL is ignored.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_free(handle: *mut Session) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

// ── Words ───────────────────────────────────────────────────────

/// 1 for a correct word, 0 for a misspelled one, -1 on failure.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_spell(handle: *const Session, word: *const c_char) -> c_int {
    let (Some(session), Some(word)) = (unsafe { handle.as_ref() }, str_from_c(word)) else {
        return -1;
    };
    match session.spell(word) {
        Ok(correct) => c_int::from(correct),
        Err(_) => -1,
    }
}

/// A list of C strings with its length. `items` has a NULL after the last
/// string.
#[repr(C)]
pub struct KieloStringArray {
    pub items: *mut *mut c_char,
    pub count: usize,
}

impl KieloStringArray {
    fn empty() -> Self {
        Self {
            items: ptr::null_mut(),
            count: 0,
        }
    }
}

/// Suggestions for `word`, best first. Release with
/// `kielo_free_string_array`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_suggest(
    handle: *const Session,
    word: *const c_char,
) -> KieloStringArray {
    let (Some(session), Some(word)) = (unsafe { handle.as_ref() }, str_from_c(word)) else {
        return KieloStringArray::empty();
    };
    session
        .suggest(word)
        .map(|found| string_array(&found))
        .unwrap_or_else(|_| KieloStringArray::empty())
}

/// One analysis: `count` attribute names with their values. Both lists are
/// NULL-terminated.
#[repr(C)]
pub struct KieloAnalysis {
    pub keys: *mut *mut c_char,
    pub values: *mut *mut c_char,
    pub count: usize,
}

#[repr(C)]
pub struct KieloAnalysisArray {
    pub analyses: *mut KieloAnalysis,
    pub count: usize,
}

/// Every analysis of `word`. Release with `kielo_free_analyses`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_analyze(
    handle: *const Session,
    word: *const c_char,
) -> KieloAnalysisArray {
    let empty = KieloAnalysisArray {
        analyses: ptr::null_mut(),
        count: 0,
    };
    let (Some(session), Some(word)) = (unsafe { handle.as_ref() }, str_from_c(word)) else {
        return empty;
    };
    let Ok(analyses) = session.analyze(word) else {
        return empty;
    };

    let converted: Vec<KieloAnalysis> = analyses
        .iter()
        .map(|analysis| {
            let (keys, values): (Vec<&str>, Vec<&str>) = analysis.iter().unzip();
            KieloAnalysis {
                keys: null_terminated(keys.iter().map(|k| string_to_c(k)).collect()),
                values: null_terminated(values.iter().map(|v| string_to_c(v)).collect()),
                count: keys.len(),
            }
        })
        .collect();
    let (analyses, count) = leak(converted);
    KieloAnalysisArray { analyses, count }
}

// ── Hyphenation ─────────────────────────────────────────────────

/// Hyphenation pattern of `word`. Release with `kielo_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_hyphenate(
    handle: *const Session,
    word: *const c_char,
) -> *mut c_char {
    let (Some(session), Some(word)) = (unsafe { handle.as_ref() }, str_from_c(word)) else {
        return ptr::null_mut();
    };
    session
        .hyphenate(word)
        .map_or(ptr::null_mut(), |pattern| string_to_c(&pattern))
}

/// `word` with `separator` at every break. Release with `kielo_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_insert_hyphens(
    handle: *const Session,
    word: *const c_char,
    separator: *const c_char,
    allow_context_changes: c_int,
) -> *mut c_char {
    let (Some(session), Some(word), Some(separator)) = (
        unsafe { handle.as_ref() },
        str_from_c(word),
        str_from_c(separator),
    ) else {
        return ptr::null_mut();
    };
    session
        .insert_hyphens(word, separator, allow_context_changes != 0)
        .map_or(ptr::null_mut(), |hyphenated| string_to_c(&hyphenated))
}

// ── Grammar ─────────────────────────────────────────────────────

#[repr(C)]
pub struct KieloGrammarError {
    pub code: c_int,
    pub start: usize,
    pub len: usize,
    pub description: *mut c_char,
    pub suggestions: KieloStringArray,
}

#[repr(C)]
pub struct KieloGrammarErrorArray {
    pub errors: *mut KieloGrammarError,
    pub count: usize,
}

/// Grammar errors of `text` with descriptions in `language` ("fi" when
/// NULL). Release with `kielo_free_grammar_errors`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_grammar_errors(
    handle: *const Session,
    text: *const c_char,
    language: *const c_char,
) -> KieloGrammarErrorArray {
    let empty = KieloGrammarErrorArray {
        errors: ptr::null_mut(),
        count: 0,
    };
    let (Some(session), Some(text)) = (unsafe { handle.as_ref() }, str_from_c(text)) else {
        return empty;
    };
    let language = str_from_c(language).unwrap_or("fi");
    let Ok(errors) = session.grammar_errors(text, language) else {
        return empty;
    };

    let converted = errors
        .iter()
        .map(|e| KieloGrammarError {
            code: e.code,
            start: e.start,
            len: e.len,
            description: string_to_c(&e.description),
            suggestions: string_array(&e.suggestions),
        })
        .collect();
    let (errors, count) = leak(converted);
    KieloGrammarErrorArray { errors, count }
}

// ── Tokens and sentences ────────────────────────────────────────

#[repr(C)]
pub struct KieloToken {
    /// 0 none, 1 word, 2 punctuation, 3 whitespace, 4 unknown
    pub token_type: c_int,
    pub text: *mut c_char,
    /// Offset in characters.
    pub pos: usize,
}

#[repr(C)]
pub struct KieloTokenArray {
    pub tokens: *mut KieloToken,
    pub count: usize,
}

/// Tokens of `text`. Release with `kielo_free_tokens`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_tokens(
    handle: *const Session,
    text: *const c_char,
) -> KieloTokenArray {
    let empty = KieloTokenArray {
        tokens: ptr::null_mut(),
        count: 0,
    };
    let (Some(session), Some(text)) = (unsafe { handle.as_ref() }, str_from_c(text)) else {
        return empty;
    };
    let Ok(tokens) = session.tokens(text) else {
        return empty;
    };

    let converted = tokens
        .iter()
        .map(|t| KieloToken {
            token_type: t.token_type.code(),
            text: string_to_c(&t.text),
            pos: t.pos,
        })
        .collect();
    let (tokens, count) = leak(converted);
    KieloTokenArray { tokens, count }
}

#[repr(C)]
pub struct KieloSentence {
    /// 0 none, 1 no start, 2 probable, 3 possible
    pub sentence_type: c_int,
    /// Length in characters.
    pub len: usize,
}

#[repr(C)]
pub struct KieloSentenceArray {
    pub sentences: *mut KieloSentence,
    pub count: usize,
}

/// Sentences of `text`. Release with `kielo_free_sentences`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_sentences(
    handle: *const Session,
    text: *const c_char,
) -> KieloSentenceArray {
    let empty = KieloSentenceArray {
        sentences: ptr::null_mut(),
        count: 0,
    };
    let (Some(session), Some(text)) = (unsafe { handle.as_ref() }, str_from_c(text)) else {
        return empty;
    };
    let Ok(sentences) = session.sentences(text) else {
        return empty;
    };

    let converted = sentences
        .iter()
        .map(|s| KieloSentence {
            sentence_type: s.sentence_type.code(),
            len: s.len,
        })
        .collect();
    let (sentences, count) = leak(converted);
    KieloSentenceArray { sentences, count }
}

// ── Options ─────────────────────────────────────────────────────

macro_rules! option_setters {
    ($($name:ident => $setter:ident($convert:expr)),* $(,)?) => {
        $(
            /// 1 on success, -1 for a NULL or closed handle.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(handle: *mut Session, value: c_int) -> c_int {
                let Some(session) = (unsafe { handle.as_mut() }) else {
                    return -1;
                };
                match session.$setter($convert(value)) {
                    Ok(()) => 1,
                    Err(_) => -1,
                }
            }
        )*
    };
}

fn flag(value: c_int) -> bool {
    value != 0
}

fn count(value: c_int) -> usize {
    usize::try_from(value).unwrap_or(0)
}

option_setters! {
    kielo_set_ignore_dot => set_ignore_dot(flag),
    kielo_set_ignore_numbers => set_ignore_numbers(flag),
    kielo_set_ignore_uppercase => set_ignore_uppercase(flag),
    kielo_set_no_ugly_hyphenation => set_no_ugly_hyphenation(flag),
    kielo_set_accept_first_uppercase => set_accept_first_uppercase(flag),
    kielo_set_accept_all_uppercase => set_accept_all_uppercase(flag),
    kielo_set_ocr_suggestions => set_ocr_suggestions(flag),
    kielo_set_ignore_nonwords => set_ignore_nonwords(flag),
    kielo_set_accept_extra_hyphens => set_accept_extra_hyphens(flag),
    kielo_set_accept_missing_hyphens => set_accept_missing_hyphens(flag),
    kielo_set_accept_titles_in_gc => set_accept_titles_in_gc(flag),
    kielo_set_accept_unfinished_paragraphs_in_gc => set_accept_unfinished_paragraphs_in_gc(flag),
    kielo_set_hyphenate_unknown_words => set_hyphenate_unknown_words(flag),
    kielo_set_accept_bulleted_lists_in_gc => set_accept_bulleted_lists_in_gc(flag),
    kielo_set_min_hyphenated_word_length => set_min_hyphenated_word_length(count),
    kielo_set_max_suggestions => set_max_suggestions(count),
    kielo_set_speller_cache_size => set_speller_cache_size(count),
}

/// Set a boolean option by id. 1 on success, 0 for an unknown id, -1 for a
/// NULL or closed handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_set_bool_option(
    handle: *mut Session,
    id: c_int,
    value: c_int,
) -> c_int {
    let Some(session) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    setter_status(session, |s| s.set_bool_option_id(id, value != 0))
}

/// Set an integer option by id. Same return values as
/// `kielo_set_bool_option`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_set_int_option(
    handle: *mut Session,
    id: c_int,
    value: c_int,
) -> c_int {
    let Some(session) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    setter_status(session, |s| s.set_int_option_id(id, i64::from(value)))
}

fn setter_status(
    session: &mut Session,
    set: impl FnOnce(&mut Session) -> kielo_fi::Result<()>,
) -> c_int {
    if session.is_closed() {
        return -1;
    }
    match set(session) {
        Ok(()) => 1,
        Err(_) => 0,
    }
}

// ── Static data ─────────────────────────────────────────────────

/// Library version. The string is static; do not free it.
#[unsafe(no_mangle)]
pub extern "C" fn kielo_version() -> *const c_char {
    static VERSION: LazyLock<CString> =
        LazyLock::new(|| CString::new(Session::version()).unwrap_or_default());
    VERSION.as_ptr()
}

/// Legal values of a morphological attribute such as "CLASS". An unknown
/// or free-form attribute gives NULL `items`. Release with
/// `kielo_free_string_array`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_attribute_values(name: *const c_char) -> KieloStringArray {
    match str_from_c(name).and_then(attribute_values) {
        Some(values) => {
            let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            string_array(&values)
        }
        None => KieloStringArray::empty(),
    }
}

// ── Release ─────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_free_str(s: *mut c_char) {
    free_c_string(s);
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_free_string_array(array: KieloStringArray) {
    free_string_list(array.items, array.count);
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_free_analyses(array: KieloAnalysisArray) {
    for analysis in unsafe { reclaim(array.analyses, array.count) } {
        free_string_list(analysis.keys, analysis.count);
        free_string_list(analysis.values, analysis.count);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_free_grammar_errors(array: KieloGrammarErrorArray) {
    for error in unsafe { reclaim(array.errors, array.count) } {
        free_c_string(error.description);
        free_string_list(error.suggestions.items, error.suggestions.count);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_free_tokens(array: KieloTokenArray) {
    for token in unsafe { reclaim(array.tokens, array.count) } {
        free_c_string(token.text);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn kielo_free_sentences(array: KieloSentenceArray) {
    drop(unsafe { reclaim(array.sentences, array.count) });
}

// ── Helpers ─────────────────────────────────────────────────────

fn str_from_c<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

/// Strings with an interior NUL come out empty.
fn string_to_c(s: &str) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

fn set_error(out: *mut *mut c_char, message: &str) {
    if !out.is_null() {
        unsafe { *out = string_to_c(message) };
    }
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Hand a vector to the caller as pointer and length. Capacity equals
/// length so [`reclaim`] can rebuild it.
fn leak<T>(items: Vec<T>) -> (*mut T, usize) {
    if items.is_empty() {
        return (ptr::null_mut(), 0);
    }
    let items = Box::into_raw(items.into_boxed_slice());
    let count = items.len();
    (items.cast::<T>(), count)
}

/// Take back a vector given out by [`leak`].
unsafe fn reclaim<T>(items: *mut T, count: usize) -> Vec<T> {
    if items.is_null() || count == 0 {
        return Vec::new();
    }
    unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(items, count)) }.into_vec()
}

fn null_terminated(mut items: Vec<*mut c_char>) -> *mut *mut c_char {
    items.push(ptr::null_mut());
    leak(items).0
}

fn string_array(strings: &[String]) -> KieloStringArray {
    if strings.is_empty() {
        return KieloStringArray::empty();
    }
    KieloStringArray {
        items: null_terminated(strings.iter().map(|s| string_to_c(s)).collect()),
        count: strings.len(),
    }
}

/// Free `count` strings and the NULL-terminated list holding them.
fn free_string_list(items: *mut *mut c_char, count: usize) {
    if items.is_null() {
        return;
    }
    for s in unsafe { reclaim(items, count + 1) } {
        free_c_string(s);
    }
}
