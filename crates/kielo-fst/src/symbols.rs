// Symbol table: the alphabet of a transducer
//
// Stored after the header as a u16 count followed by NUL-terminated UTF-8
// strings, in this order: epsilon (always index 0), flag diacritics,
// single characters, multi-character tags such as "[Ln]".

use hashbrown::HashMap;

use crate::FstError;
use crate::flags::{FlagDiacritic, FlagInterner};

/// Index of a symbol in the table.
pub type SymbolId = u32;

pub const EPSILON: SymbolId = 0;

/// A classified symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol<'a> {
    Epsilon,
    Flag(FlagDiacritic),
    Char(char),
    /// Multi-character symbol, only meaningful on the output side.
    Tag(&'a str),
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Epsilon,
    Flag(FlagDiacritic),
    Char(char),
    Tag,
}

#[derive(Debug)]
pub struct SymbolTable {
    strings: Vec<String>,
    kinds: Vec<Kind>,
    by_char: HashMap<char, SymbolId>,
    feature_count: usize,
}

impl SymbolTable {
    /// Parse the table starting at `offset`. Returns the table and the
    /// offset of the first byte after it.
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize), FstError> {
        let count_bytes = data.get(offset..offset + 2).ok_or(FstError::TooShort {
            expected: offset + 2,
            actual: data.len(),
        })?;
        let count = usize::from(u16::from_le_bytes([count_bytes[0], count_bytes[1]]));

        let mut strings = Vec::with_capacity(count);
        let mut kinds = Vec::with_capacity(count);
        let mut by_char = HashMap::new();
        let mut interner = FlagInterner::new();
        let mut seen_normal = false;
        let mut pos = offset + 2;

        for index in 0..count {
            let len = data[pos.min(data.len())..]
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| {
                    FstError::InvalidSymbolTable(format!("symbol {index} is not terminated"))
                })?;
            let text = std::str::from_utf8(&data[pos..pos + len]).map_err(|_| {
                FstError::InvalidSymbolTable(format!("symbol {index} is not valid UTF-8"))
            })?;
            pos += len + 1;

            let kind = if index == 0 {
                Kind::Epsilon
            } else if !seen_normal && text.starts_with('@') {
                Kind::Flag(interner.parse(text)?)
            } else {
                seen_normal = true;
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        // Symbol ids fit in u32 because count is a u16.
                        by_char.entry(c).or_insert(index as SymbolId);
                        Kind::Char(c)
                    }
                    _ => Kind::Tag,
                }
            };
            strings.push(if index == 0 { String::new() } else { text.to_owned() });
            kinds.push(kind);
        }

        if count == 0 {
            return Err(FstError::InvalidSymbolTable("no epsilon symbol".into()));
        }

        Ok((
            Self {
                strings,
                kinds,
                by_char,
                feature_count: interner.feature_count(),
            },
            pos,
        ))
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Classify a symbol. Ids past the end read as epsilon.
    pub fn get(&self, id: SymbolId) -> Symbol<'_> {
        let index = id as usize;
        match self.kinds.get(index) {
            Some(Kind::Flag(f)) => Symbol::Flag(*f),
            Some(Kind::Char(c)) => Symbol::Char(*c),
            Some(Kind::Tag) => Symbol::Tag(&self.strings[index]),
            Some(Kind::Epsilon) | None => Symbol::Epsilon,
        }
    }

    /// The text a symbol contributes to lookup output. Epsilon and flag
    /// diacritics contribute nothing.
    pub fn output_text(&self, id: SymbolId) -> &str {
        match self.kinds.get(id as usize) {
            Some(Kind::Char(_) | Kind::Tag) => &self.strings[id as usize],
            _ => "",
        }
    }

    /// Raw symbol string, including flag diacritic spellings.
    pub fn text(&self, id: SymbolId) -> Option<&str> {
        self.strings.get(id as usize).map(String::as_str)
    }

    /// The input symbol for a character, if the alphabet has one.
    pub fn lookup_char(&self, c: char) -> Option<SymbolId> {
        self.by_char.get(&c).copied()
    }

    /// `true` for epsilon and flag diacritics, the symbols that do not
    /// consume input.
    pub fn is_silent(&self, id: SymbolId) -> bool {
        matches!(
            self.kinds.get(id as usize),
            Some(Kind::Epsilon | Kind::Flag(_)) | None
        )
    }

    /// Number of distinct flag features.
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }
}
