// Flag diacritics: feature constraints evaluated while walking the graph

use hashbrown::HashMap;

use crate::FstError;

/// Value of a feature that has not been set.
pub const NEUTRAL: u16 = 0;

/// Wildcard value used by `R` and `D` without an explicit value.
pub const ANY: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOp {
    /// `P`: set the feature.
    Positive,
    /// `C`: reset the feature to neutral.
    Clear,
    /// `U`: set if neutral, pass if equal, block otherwise.
    Unify,
    /// `R`: pass only if the feature has the value (or any value).
    Require,
    /// `D`: block if the feature has the value (or any value).
    Disallow,
}

/// A parsed `@OP.FEATURE.VALUE@` symbol. Features and values are interned
/// into small integers per transducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDiacritic {
    pub op: FlagOp,
    pub feature: u16,
    pub value: u16,
}

impl FlagDiacritic {
    /// The feature's value after passing this flag, or `None` if the flag
    /// blocks the path.
    pub fn apply_to(&self, current: u16) -> Option<u16> {
        match self.op {
            FlagOp::Positive => Some(self.value),
            FlagOp::Clear => Some(NEUTRAL),
            FlagOp::Unify if current == NEUTRAL => Some(self.value),
            FlagOp::Unify => (current == self.value).then_some(current),
            FlagOp::Require => {
                let ok = if self.value == ANY {
                    current != NEUTRAL
                } else {
                    current == self.value
                };
                ok.then_some(current)
            }
            FlagOp::Disallow => {
                let blocked = (self.value == ANY && current != NEUTRAL) || current == self.value;
                (!blocked).then_some(current)
            }
        }
    }
}

/// Current values of every feature along one path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagState {
    values: Vec<u16>,
}

impl FlagState {
    pub fn new(feature_count: usize) -> Self {
        Self {
            values: vec![NEUTRAL; feature_count],
        }
    }

    /// Apply `flag`. On success returns the previous value so the caller can
    /// undo the step when backtracking.
    pub fn apply(&mut self, flag: &FlagDiacritic) -> Option<u16> {
        let slot = self.values.get_mut(usize::from(flag.feature))?;
        let old = *slot;
        *slot = flag.apply_to(old)?;
        Some(old)
    }

    /// Restore a feature to a value returned by [`FlagState::apply`].
    pub fn restore(&mut self, feature: u16, value: u16) {
        if let Some(slot) = self.values.get_mut(usize::from(feature)) {
            *slot = value;
        }
    }

    pub fn reset(&mut self) {
        self.values.fill(NEUTRAL);
    }
}

/// Interns feature and value names while the symbol table is read.
pub(crate) struct FlagInterner {
    features: HashMap<String, u16>,
    values: HashMap<String, u16>,
}

impl FlagInterner {
    pub(crate) fn new() -> Self {
        let mut values = HashMap::new();
        values.insert(String::new(), NEUTRAL);
        values.insert("@".to_owned(), ANY);
        Self {
            features: HashMap::new(),
            values,
        }
    }

    pub(crate) fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Parse `@P.FEAT.VAL@` or `@C.FEAT@`. A missing value means [`ANY`].
    pub(crate) fn parse(&mut self, symbol: &str) -> Result<FlagDiacritic, FstError> {
        let bad = |why: &str| FstError::InvalidFlagDiacritic(format!("{why}: {symbol:?}"));

        let body = symbol
            .strip_prefix('@')
            .and_then(|s| s.strip_suffix('@'))
            .ok_or_else(|| bad("not delimited by '@'"))?;
        let mut parts = body.splitn(3, '.');
        let op = match parts.next() {
            Some("P") => FlagOp::Positive,
            Some("C") => FlagOp::Clear,
            Some("U") => FlagOp::Unify,
            Some("R") => FlagOp::Require,
            Some("D") => FlagOp::Disallow,
            _ => return Err(bad("unknown operation")),
        };
        let feature = parts
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| bad("missing feature"))?;
        let value = parts.next().unwrap_or("@");

        let feature = intern(&mut self.features, feature)?;
        let value = intern(&mut self.values, value)?;
        Ok(FlagDiacritic { op, feature, value })
    }
}

fn intern(map: &mut HashMap<String, u16>, name: &str) -> Result<u16, FstError> {
    if let Some(&id) = map.get(name) {
        return Ok(id);
    }
    let id = u16::try_from(map.len())
        .map_err(|_| FstError::InvalidFlagDiacritic("too many features or values".into()))?;
    map.insert(name.to_owned(), id);
    Ok(id)
}
