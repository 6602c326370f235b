// Finnish syllable rules applied to one word part

use kielo_core::character::{is_consonant, is_vowel};

use super::Mark;

/// Vowel pairs that belong to different syllables.
const SPLIT_VOWELS: [[char; 2]; 18] = [
    ['a', 'e'],
    ['a', 'o'],
    ['e', 'a'],
    ['e', 'o'],
    ['i', 'a'],
    ['i', 'o'],
    ['o', 'a'],
    ['o', 'e'],
    ['u', 'a'],
    ['u', 'e'],
    ['y', 'e'],
    ['e', 'ä'],
    ['e', 'ö'],
    ['i', 'ä'],
    ['i', 'ö'],
    ['y', 'ä'],
    ['ä', 'e'],
    ['ö', 'e'],
];

/// Diphthongs after which a third vowel starts a new syllable ("tie-en").
const SPLIT_AFTER: [[char; 2]; 2] = [['i', 'e'], ['a', 'i']];

/// Consonant clusters of loan words that are never split.
const LONG_CONSONANTS: [&[char]; 5] = [
    &['s', 'h', 't', 's', 'h'],
    &['š', 't', 'š'],
    &['t', 's', 'h'],
    &['t', 'š'],
    &['z', 'h'],
];

/// No break directly after these.
const NO_BREAK_AFTER: [char; 6] = ['/', '.', ':', '&', '%', '\''];

fn is_set(mark: Mark) -> bool {
    matches!(mark, Mark::Break | Mark::Ugly | Mark::Replace)
}

/// Mark syllable breaks inside `part` (lowercase). `marks` has one slot per
/// character of the part; existing marks are part boundaries and stay.
///
/// Splits between two vowels and splits leaving a single letter at either
/// edge of the part are marked [`Mark::Ugly`].
pub(super) fn hyphenate_part(part: &[char], marks: &mut [Mark]) {
    let n = part.len();
    if n < 2 || marks.contains(&Mark::Forbidden) || part[n - 1].is_ascii_digit() {
        return;
    }

    // -CV
    let mut seen_vowel = false;
    for i in 0..n - 1 {
        if is_consonant(part[i])
            && is_vowel(part[i + 1])
            && seen_vowel
            && !NO_BREAK_AFTER.contains(&part[i - 1])
        {
            marks[i] = Mark::Break;
        }
        seen_vowel |= is_vowel(part[i]);
    }

    // 'V: the break takes the apostrophe's place
    for i in 1..n - 1 {
        if part[i] == '\'' && is_vowel(part[i + 1]) {
            marks[i] = Mark::Replace;
        }
    }

    // around long vowels
    for i in 1..n - 1 {
        if !(is_vowel(part[i]) && part[i] == part[i + 1]) {
            continue;
        }
        if is_vowel(part[i - 1]) && good_position(part, marks, i) {
            marks[i] = Mark::Ugly;
        }
        if i + 2 < n && marks[i + 2] == Mark::None && good_position(part, marks, i + 2) {
            marks[i + 2] = if is_vowel(part[i + 2]) {
                Mark::Ugly
            } else {
                Mark::Break
            };
        }
    }

    // V-V
    for i in 0..n - 1 {
        if marks[i + 1] == Mark::None && SPLIT_VOWELS.contains(&[part[i], part[i + 1]]) {
            marks[i + 1] = Mark::Ugly;
        }
    }

    for i in 1..n - 1 {
        for cluster in LONG_CONSONANTS {
            if !part[i..].starts_with(cluster) {
                continue;
            }
            let inside = (i + 1)..(i + cluster.len()).min(n);
            if marks[inside.clone()].iter().any(|&m| m == Mark::Break) {
                marks[inside].iter_mut().for_each(|m| {
                    if *m == Mark::Break {
                        *m = Mark::None;
                    }
                });
                marks[i] = Mark::Break;
            }
        }
    }

    // VV-V
    for i in 0..n.saturating_sub(3) {
        if marks[i + 1] != Mark::Break
            && SPLIT_AFTER.contains(&[part[i], part[i + 1]])
            && is_vowel(part[i + 2])
            && marks[i + 2] == Mark::None
            && good_position(part, marks, i + 2)
        {
            marks[i + 2] = Mark::Ugly;
        }
    }

    for i in 1..n {
        if marks[i] == Mark::Break && is_vowel(part[i - 1]) && is_vowel(part[i]) {
            marks[i] = Mark::Ugly;
        }
    }
    for edge in [1, n - 1] {
        if marks[edge] == Mark::Break {
            marks[edge] = Mark::Ugly;
        }
    }
}

/// A break at `pos` leaves a vowel in both neighbouring syllables.
fn good_position(part: &[char], marks: &[Mark], pos: usize) -> bool {
    if pos == 0 || pos + 1 >= part.len() {
        return false;
    }

    let mut before = false;
    for i in (0..pos).rev() {
        before |= is_vowel(part[i]);
        if is_set(marks[i]) {
            break;
        }
    }

    let after = part[pos..]
        .iter()
        .zip(&marks[pos..])
        .enumerate()
        .take_while(|&(k, (&c, &m))| c != '.' && (k == 0 || !is_set(m)))
        .any(|(_, (&c, _))| is_vowel(c));

    before && after
}
