// Reading analyses out of the tag strings the morphology transducer prints
//
// A typical output is `[Ln][Xp]koira[X]koir[Sn][Ny]a`: bracketed tags,
// `[X?]...[X]` blocks carrying lexical data, and the surface characters of
// the word in between.

use kielo_core::character::{is_vowel, simple_lower, simple_upper};

/// Kind of an `[X?]...[X]` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Block {
    /// `[Xp]` and `[Xj]`: the base form of the current word part.
    Base,
    /// `[Xr]`: an explicit STRUCTURE for the characters that follow.
    Structure,
    /// Any other block, such as word ids in `[Xs]`.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event<'a> {
    /// A tag outside `X` blocks, without its brackets.
    Tag(&'a str),
    /// A surface character.
    Char(char),
    Block(Block, String),
}

/// Split transducer output into events.
pub(crate) fn events(output: &str) -> Vec<Event<'_>> {
    let mut out = Vec::new();
    let mut open: Option<(Block, String)> = None;
    let mut rest = output;

    while let Some(c) = rest.chars().next() {
        let tag = if c == '[' {
            rest.find(']').map(|end| (&rest[1..end], end + 1))
        } else {
            None
        };
        let Some((tag, consumed)) = tag else {
            match open.as_mut() {
                Some((_, text)) => text.push(c),
                None => out.push(Event::Char(c)),
            }
            rest = &rest[c.len_utf8()..];
            continue;
        };
        rest = &rest[consumed..];

        if let Some((kind, text)) = open.take() {
            out.push(Event::Block(kind, text));
            if tag == "X" {
                continue;
            }
        }
        match tag {
            "Xp" | "Xj" => open = Some((Block::Base, String::new())),
            "Xr" => open = Some((Block::Structure, String::new())),
            "X" => {}
            t if t.starts_with('X') => open = Some((Block::Other, String::new())),
            t => out.push(Event::Tag(t)),
        }
    }
    if let Some((kind, text)) = open {
        out.push(Event::Block(kind, text));
    }
    out
}

fn is_boundary(tag: &str) -> bool {
    tag.len() == 2 && tag.starts_with('B') && tag != "Bh"
}

// ---------------------------------------------------------------------------
// STRUCTURE
// ---------------------------------------------------------------------------

struct StructureWriter {
    out: Vec<char>,
    written: usize,
    limit: usize,
    title: bool,
    abbr: bool,
    pending: usize,
    /// Upcoming surface characters already described by an `[Xr]` block.
    covered: usize,
}

impl StructureWriter {
    fn push(&mut self, c: char) {
        if c == '=' {
            if self.out.last() != Some(&'=') {
                self.out.push('=');
            }
        } else if self.written < self.limit {
            self.out.push(c);
            self.written += 1;
        }
    }

    fn flush(&mut self) {
        for _ in 0..std::mem::take(&mut self.pending) {
            let c = match (self.title, self.abbr) {
                (true, true) => 'j',
                (true, false) => 'i',
                (false, true) => 'q',
                (false, false) => 'p',
            };
            self.title = false;
            self.push(c);
        }
    }

    fn surface(&mut self, c: char) {
        if self.covered > 0 {
            self.covered -= 1;
            return;
        }
        match c {
            '-' => {
                self.flush();
                if self.out == ['='] {
                    self.out[0] = '-';
                    self.written += 1;
                } else {
                    self.push('-');
                }
            }
            ':' => {
                self.flush();
                self.abbr = false;
                self.push(':');
            }
            _ => self.pending += 1,
        }
    }
}

/// Build the STRUCTURE attribute: `=` before every word part, then one
/// letter per character of the word: `i`/`p` for an upper/lowercase letter,
/// `j`/`q` for the same inside abbreviations, `-` and `:` for themselves.
pub(crate) fn structure(events: &[Event<'_>], word_len: usize) -> String {
    let mut w = StructureWriter {
        out: vec!['='],
        written: 0,
        limit: word_len,
        title: false,
        abbr: false,
        pending: 0,
        covered: 0,
    };

    for event in events {
        match event {
            Event::Tag(t) if is_boundary(t) => {
                w.flush();
                w.push('=');
            }
            Event::Tag(t) if t.starts_with("Le") => {
                w.title = true;
                w.abbr = false;
            }
            Event::Tag("La" | "Lur") => w.abbr = true,
            Event::Tag(t) if t.starts_with('L') => w.abbr = false,
            Event::Tag(_) => {}
            Event::Block(Block::Structure, text) => {
                w.title = false;
                for c in text.chars() {
                    w.push(c);
                    if c != '=' {
                        w.covered += 1;
                    }
                }
            }
            Event::Block(..) => {}
            Event::Char(c) => w.surface(*c),
        }
    }

    w.pending = w.limit.saturating_sub(w.written);
    w.flush();
    while w.out.len() > 1 && w.out.last() == Some(&'=') {
        w.out.pop();
    }
    w.out.into_iter().collect()
}

// ---------------------------------------------------------------------------
// BASEFORM
// ---------------------------------------------------------------------------

/// Build the base form: the surface of all word parts but the last, then
/// the last `[Xp]` block. Letters are capitalized where STRUCTURE asks for
/// an uppercase letter.
pub(crate) fn baseform(events: &[Event<'_>], structure: &str) -> Option<String> {
    let letters: Vec<char> = structure.chars().filter(|&c| c != '=').collect();
    let upper_at = |i: usize| matches!(letters.get(i), Some('i' | 'j'));

    let mut base: Vec<char> = Vec::new();
    let mut latest: Option<(usize, &str)> = None;

    for event in events {
        match event {
            Event::Char(c) => {
                let i = base.len();
                base.push(if upper_at(i) { simple_upper(*c) } else { *c });
            }
            Event::Block(Block::Base, text) => latest = Some((base.len(), text.as_str())),
            _ => {}
        }
    }

    if let Some((start, text)) = latest {
        base.truncate(start);
        for c in text.chars().filter(|&c| c != '=') {
            let i = base.len();
            base.push(if upper_at(i) { simple_upper(c) } else { c });
        }
    }

    if base.is_empty() {
        None
    } else {
        Some(base.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Compound boundary validation
// ---------------------------------------------------------------------------

/// Reject analyses whose compound boundaries break the hyphen rules.
///
/// At any boundary, the same vowel on both sides, or a digit before it,
/// requires a hyphen. At `[Bh]` a hyphen is also refused where it is not
/// needed, unless `[Isf]` allows it. A proper noun may not start a compound
/// that ends in a common noun without a hyphen between them.
pub(crate) fn is_valid_analysis(events: &[Event<'_>]) -> bool {
    let mut last: Option<char> = None;
    let mut before_last: Option<char> = None;
    let mut boundary: Option<&str> = None;
    let mut hyphen = false;
    let mut hyphen_free = false;
    let mut proper_start = false;
    let mut noun_end = false;

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Tag(t) if *t == "Bh" || is_boundary(t) => {
                boundary = Some(*t);
                hyphen = matches!(i.checked_sub(1).map(|p| &events[p]), Some(Event::Char('-')))
                    || (hyphen && *t == "Bc");
            }
            Event::Tag("Isf") => hyphen_free = true,
            Event::Tag("Ica") => noun_end = false,
            Event::Tag("Dg") => proper_start = false,
            Event::Tag(t) if t.starts_with("Le") => {
                proper_start = last.is_none();
                noun_end = false;
            }
            Event::Tag("Ln") => noun_end = true,
            Event::Tag(_) | Event::Block(..) => {}
            Event::Char('-') => {
                proper_start = false;
                noun_end = false;
                if boundary.is_some() {
                    hyphen = true;
                }
            }
            Event::Char(c) => {
                if let (Some(tag), Some(prev)) = (boundary.take(), last) {
                    let prev = simple_lower(prev);
                    let same_vowel = is_vowel(prev) && prev == simple_lower(*c);
                    let need = same_vowel || prev.is_ascii_digit();
                    let free = hyphen_free || (before_last == Some('i') && prev == 's');
                    if need && !hyphen {
                        return false;
                    }
                    if tag == "Bh" && hyphen && !need && !free {
                        return false;
                    }
                    hyphen_free = false;
                }
                boundary = None;
                hyphen = false;
                before_last = last;
                last = Some(*c);
            }
        }
    }

    !(proper_start && noun_end)
}

// ---------------------------------------------------------------------------
// Attribute tags
// ---------------------------------------------------------------------------

/// Human-readable value of a one-letter tag group and its code.
pub(crate) fn tag_value(group: char, code: &str) -> Option<&'static str> {
    let value = match (group, code) {
        ('L', "n") => "nimisana",
        ('L', "l") => "laatusana",
        ('L', "nl") => "nimisana_laatusana",
        ('L', "h") => "huudahdussana",
        ('L', "ee") => "etunimi",
        ('L', "es") => "sukunimi",
        ('L', "ep") => "paikannimi",
        ('L', "em") => "nimi",
        ('L', "t") => "teonsana",
        ('L', "a") => "lyhenne",
        ('L', "s") => "seikkasana",
        ('L', "u" | "ur") => "lukusana",
        ('L', "r") => "asemosana",
        ('L', "c") => "sidesana",
        ('L', "d") => "suhdesana",
        ('L', "k") => "kieltosana",
        ('L', "p") => "etuliite",

        ('S', "n") => "nimento",
        ('S', "g") => "omanto",
        ('S', "p") => "osanto",
        ('S', "es") => "olento",
        ('S', "tr") => "tulento",
        ('S', "ine") => "sisaolento",
        ('S', "ela") => "sisaeronto",
        ('S', "ill") => "sisatulento",
        ('S', "ade") => "ulkoolento",
        ('S', "abl") => "ulkoeronto",
        ('S', "all") => "ulkotulento",
        ('S', "ab") => "vajanto",
        ('S', "ko") => "seuranto",
        ('S', "in") => "keinonto",
        ('S', "sti") => "kerrontosti",
        ('S', "ak") => "kohdanto",

        ('C', "c") => "comparative",
        ('C', "s") => "superlative",

        ('T', "n1") => "A-infinitive",
        ('T', "n2") => "E-infinitive",
        ('T', "n3") => "MA-infinitive",
        ('T', "n4") => "MINEN-infinitive",
        ('T', "n5") => "MAINEN-infinitive",
        ('T', "t") => "indicative",
        ('T', "e") => "conditional",
        ('T', "k") => "imperative",
        ('T', "m") => "potential",

        ('N', "y") => "singular",
        ('N', "m") => "plural",

        ('P', "1") => "1",
        ('P', "2") => "2",
        ('P', "3") => "3",
        ('P', "4") => "4",

        ('A', "p") => "present_simple",
        ('A', "i") => "past_imperfective",

        ('F', "kin") => "kin",
        ('F', "kaan") => "kAAn",

        ('O', "1y") => "1s",
        ('O', "2y") => "2s",
        ('O', "1m") => "1p",
        ('O', "2m") => "2p",
        ('O', "3") => "3",

        ('E', "t") => "true",
        ('E', "f") => "false",
        ('E', "b") => "both",

        ('R', "v") => "present_active",
        ('R', "a") => "present_passive",
        ('R', "u") => "past_active",
        ('R', "t") => "past_passive",
        ('R', "m") => "agent",
        ('R', "e") => "negation",

        _ => return None,
    };
    Some(value)
}

/// Grammatical attributes read from the tags of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TagReading {
    pub class: Option<&'static str>,
    pub case: Option<&'static str>,
    pub number: Option<&'static str>,
    pub person: Option<&'static str>,
    pub mood: Option<&'static str>,
    pub tense: Option<&'static str>,
    pub focus: Option<&'static str>,
    pub possessive: Option<&'static str>,
    pub negative: Option<&'static str>,
    pub comparison: Option<&'static str>,
    pub participle: Option<&'static str>,
    pub question_clitic: bool,
    pub require_following_verb: Option<&'static str>,
    pub free_suffix: bool,
    pub geographical_name: bool,
}

/// Read the attribute tags. Inflectional tags come after the stem, so each
/// group is decided by its last occurrence: the scan runs from the end and
/// keeps the first value it meets.
pub(crate) fn read_tags(events: &[Event<'_>]) -> TagReading {
    let mut r = TagReading::default();
    let mut class_set = false;
    let mut sti_seen = false;
    let mut boundary_passed = false;
    let mut later_tags: Vec<&str> = Vec::new();
    let starts_with_hyphen = matches!(events.first(), Some(Event::Char('-')));
    let ends_with_noun = matches!(events.last(), Some(Event::Tag("Ln")));

    for (i, event) in events.iter().enumerate().rev() {
        let Event::Tag(tag) = event else { continue };
        let mut chars = tag.chars();
        let Some(group) = chars.next() else { continue };
        let code = chars.as_str();

        match group {
            'L' if !class_set => {
                r.class = if code == "nl" {
                    let graded = matches!(r.comparison, Some("comparative" | "superlative"));
                    if sti_seen || graded {
                        Some("laatusana")
                    } else {
                        Some("nimisana_laatusana")
                    }
                } else {
                    tag_value('L', code).or(r.class)
                };
                class_set = true;
            }
            'N' | 'S' => {
                let closed = matches!(r.class, Some("etuliite" | "seikkasana"));
                let slot = if group == 'N' { &mut r.number } else { &mut r.case };
                if slot.is_none() && !closed {
                    *slot = tag_value(group, code);
                    if group == 'S' && code == "sti" {
                        sti_seen = true;
                    }
                }
            }
            'T' if r.class.is_none() && r.mood.is_none() => r.mood = tag_value('T', code),
            'C' if r.class.is_none() && r.comparison.is_none() => {
                r.comparison = tag_value('C', code);
            }
            'P' if r.person.is_none() => r.person = tag_value('P', code),
            'A' if r.tense.is_none() => r.tense = tag_value('A', code),
            'O' if r.possessive.is_none() => r.possessive = tag_value('O', code),
            'E' if r.negative.is_none() => r.negative = tag_value('E', code),
            'F' if code == "ko" => r.question_clitic = true,
            'F' if r.focus.is_none() => r.focus = tag_value('F', code),
            'R' if !boundary_passed && r.participle.is_none() => {
                let blocked = r.class.is_some_and(|c| c != "laatusana") && !ends_with_noun;
                if !blocked {
                    r.participle = tag_value('R', code);
                }
            }
            'I' => read_info_tag(&mut r, code, &later_tags, starts_with_hyphen),
            'B' if code == "c" => {
                let after_hyphen = match i.checked_sub(1).map(|p| &events[p]) {
                    Some(Event::Char('-')) => true,
                    Some(Event::Tag("Bh")) => {
                        matches!(i.checked_sub(2).map(|p| &events[p]), Some(Event::Char('-')))
                    }
                    _ => false,
                };
                if !class_set && r.class.is_none() && after_hyphen {
                    r.class = Some("etuliite");
                    class_set = true;
                }
                boundary_passed = true;
            }
            _ => {}
        }
        later_tags.push(*tag);
    }

    r
}

fn read_info_tag(r: &mut TagReading, code: &str, later_tags: &[&str], starts_with_hyphen: bool) {
    let nominal_infinitive = matches!(
        r.mood,
        Some("E-infinitive" | "MINEN-infinitive" | "MA-infinitive")
    );
    match code {
        "vj" if !starts_with_hyphen => r.free_suffix = true,
        "ca" => {
            let compound_follows = later_tags.iter().any(|t| matches!(*t, "Bc" | "Ll"));
            if !compound_follows && matches!(r.class, None | Some("nimisana")) {
                r.geographical_name = true;
            }
        }
        "ra" | "rm" if r.require_following_verb.is_none() => {
            if !nominal_infinitive && matches!(r.class, None | Some("teonsana")) {
                r.require_following_verb = Some(if code == "ra" {
                    "A-infinitive"
                } else {
                    "MA-infinitive"
                });
            }
        }
        _ => {}
    }
}
