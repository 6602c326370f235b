// Edit costs for the suggestion search

use kielo_core::character::simple_lower;

pub const SUBSTITUTION: u32 = 10;
pub const KEYBOARD_NEIGHBOUR: u32 = 6;
pub const VOWEL_HARMONY: u32 = 4;
pub const OCR_CONFUSABLE: u32 = 1;
pub const INSERTION: u32 = 10;
pub const DELETION: u32 = 10;
pub const TRANSPOSITION: u32 = 8;
/// Inserting a copy of the previous letter, or dropping a repeated one.
pub const DOUBLING: u32 = 5;
/// Splitting a run-together word in two with a space.
pub const SPLIT: u32 = 10;

/// Most expensive edit path the search follows.
pub const MAX_COST: u32 = 20;

/// Finnish QWERTY, unshifted.
const KEYBOARD_ROWS: [&str; 4] = ["1234567890+", "qwertyuiopå", "asdfghjklöä", "zxcvbnm,.-"];

const HARMONY_PAIRS: [(char, char); 3] = [('a', 'ä'), ('o', 'ö'), ('u', 'y')];

const OCR_PAIRS: [(char, char); 10] = [
    ('l', '1'),
    ('l', 'i'),
    ('o', '0'),
    ('i', '1'),
    ('s', '5'),
    ('b', '8'),
    ('e', 'c'),
    ('u', 'v'),
    ('a', 'ä'),
    ('o', 'ö'),
];

fn key_position(c: char) -> Option<(usize, usize)> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .find_map(|(row, keys)| keys.chars().position(|k| k == c).map(|col| (row, col)))
}

fn is_pair(pairs: &[(char, char)], a: char, b: char) -> bool {
    pairs.iter().any(|&(x, y)| (x, y) == (a, b) || (y, x) == (a, b))
}

/// Keys touching each other on the keyboard, including the diagonal
/// neighbours in the rows above and below.
pub fn keyboard_neighbours(a: char, b: char) -> bool {
    let (Some((ra, ca)), Some((rb, cb))) = (key_position(a), key_position(b)) else {
        return false;
    };
    a != b && ra.abs_diff(rb) <= 1 && ca.abs_diff(cb) <= 1
}

/// Cost of writing `typed` where the dictionary has `wanted`.
#[derive(Debug, Clone, Copy)]
pub struct CostModel {
    pub ocr: bool,
}

impl CostModel {
    pub fn substitution(&self, typed: char, wanted: char) -> u32 {
        let (typed, wanted) = (simple_lower(typed), simple_lower(wanted));
        if typed == wanted {
            return 0;
        }
        if self.ocr && is_pair(&OCR_PAIRS, typed, wanted) {
            OCR_CONFUSABLE
        } else if is_pair(&HARMONY_PAIRS, typed, wanted) {
            VOWEL_HARMONY
        } else if keyboard_neighbours(typed, wanted) {
            KEYBOARD_NEIGHBOUR
        } else {
            SUBSTITUTION
        }
    }

    /// Cost of a letter missing from the typed word, after `previous`.
    pub fn insertion(&self, inserted: char, previous: Option<char>) -> u32 {
        if previous == Some(inserted) {
            DOUBLING
        } else {
            INSERTION
        }
    }

    /// Cost of a typed letter the dictionary word does not have.
    pub fn deletion(&self, deleted: char, previous: Option<char>) -> u32 {
        if previous == Some(deleted) {
            DOUBLING
        } else {
            DELETION
        }
    }
}
