// Morphological analysis: one attribute map per accepted parse

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Attribute names
// ---------------------------------------------------------------------------

pub const ATTR_BASEFORM: &str = "BASEFORM";
pub const ATTR_CLASS: &str = "CLASS";
pub const ATTR_COMPARISON: &str = "COMPARISON";
pub const ATTR_FOCUS: &str = "FOCUS";
pub const ATTR_FSTOUTPUT: &str = "FSTOUTPUT";
pub const ATTR_KYSYMYSLIITE: &str = "KYSYMYSLIITE";
pub const ATTR_MALAGA_VAPAA_JALKIOSA: &str = "MALAGA_VAPAA_JALKIOSA";
pub const ATTR_MOOD: &str = "MOOD";
pub const ATTR_NEGATIVE: &str = "NEGATIVE";
pub const ATTR_NUMBER: &str = "NUMBER";
pub const ATTR_PARTICIPLE: &str = "PARTICIPLE";
pub const ATTR_PERSON: &str = "PERSON";
pub const ATTR_POSSESSIVE: &str = "POSSESSIVE";
pub const ATTR_POSSIBLE_GEOGRAPHICAL_NAME: &str = "POSSIBLE_GEOGRAPHICAL_NAME";
pub const ATTR_REQUIRE_FOLLOWING_VERB: &str = "REQUIRE_FOLLOWING_VERB";
pub const ATTR_SIJAMUOTO: &str = "SIJAMUOTO";
pub const ATTR_STRUCTURE: &str = "STRUCTURE";
pub const ATTR_TENSE: &str = "TENSE";
pub const ATTR_WEIGHT: &str = "WEIGHT";

/// One morphological reading of a word.
///
/// Attributes are kept in a sorted map so that every consumer (the C ABI,
/// JSON output of the CLI, tests) sees them in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Analysis {
    attributes: BTreeMap<String, String>,
}

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any earlier value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Remove an attribute and return its old value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// `true` if `key` is present with exactly `value`.
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Analysis {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
