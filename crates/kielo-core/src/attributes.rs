// Legal values of the enumerated morphological attributes

use crate::analysis::{
    ATTR_CLASS, ATTR_COMPARISON, ATTR_FOCUS, ATTR_KYSYMYSLIITE, ATTR_MOOD, ATTR_NEGATIVE,
    ATTR_NUMBER, ATTR_PARTICIPLE, ATTR_PERSON, ATTR_POSSESSIVE, ATTR_SIJAMUOTO, ATTR_TENSE,
};

const CLASS_VALUES: &[&str] = &[
    "nimisana",
    "laatusana",
    "nimisana_laatusana",
    "teonsana",
    "seikkasana",
    "asemosana",
    "suhdesana",
    "huudahdussana",
    "sidesana",
    "etuliite",
    "lukusana",
    "lyhenne",
    "kieltosana",
    "etunimi",
    "sukunimi",
    "paikannimi",
    "nimi",
];

const SIJAMUOTO_VALUES: &[&str] = &[
    "nimento",
    "omanto",
    "osanto",
    "olento",
    "tulento",
    "kohdanto",
    "sisaolento",
    "sisaeronto",
    "sisatulento",
    "ulkoolento",
    "ulkoeronto",
    "ulkotulento",
    "vajanto",
    "seuranto",
    "keinonto",
    "kerrontosti",
];

const MOOD_VALUES: &[&str] = &[
    "indicative",
    "conditional",
    "potential",
    "imperative",
    "A-infinitive",
    "E-infinitive",
    "MA-infinitive",
    "MINEN-infinitive",
    "MAINEN-infinitive",
];

const PARTICIPLE_VALUES: &[&str] = &[
    "present_active",
    "present_passive",
    "past_active",
    "past_passive",
    "agent",
    "negation",
];

/// Return the legal values of an enumerated attribute, or `None` when the
/// attribute is unknown or free-form (BASEFORM, STRUCTURE, ...).
pub fn attribute_values(name: &str) -> Option<&'static [&'static str]> {
    let values: &'static [&'static str] = match name {
        ATTR_CLASS => CLASS_VALUES,
        ATTR_SIJAMUOTO => SIJAMUOTO_VALUES,
        ATTR_MOOD => MOOD_VALUES,
        ATTR_PARTICIPLE => PARTICIPLE_VALUES,
        ATTR_NUMBER => &["singular", "plural"],
        ATTR_PERSON => &["1", "2", "3", "4"],
        ATTR_TENSE => &["present_simple", "past_imperfective"],
        ATTR_COMPARISON => &["positive", "comparative", "superlative"],
        ATTR_NEGATIVE => &["false", "true", "both"],
        ATTR_POSSESSIVE => &["1s", "2s", "1p", "2p", "3"],
        ATTR_FOCUS => &["kin", "kAAn"],
        ATTR_KYSYMYSLIITE => &["true"],
        _ => return None,
    };
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_has_all_word_classes() {
        let vals = attribute_values("CLASS").unwrap();
        assert_eq!(vals.len(), 17);
        assert!(vals.contains(&"teonsana"));
        assert!(vals.contains(&"paikannimi"));
    }

    #[test]
    fn sijamuoto_has_sixteen_cases() {
        let vals = attribute_values("SIJAMUOTO").unwrap();
        assert_eq!(vals.len(), 16);
        assert_eq!(vals[0], "nimento");
    }

    #[test]
    fn free_form_attributes_are_not_enumerated() {
        assert_eq!(attribute_values("BASEFORM"), None);
        assert_eq!(attribute_values("STRUCTURE"), None);
        assert_eq!(attribute_values("no-such-attribute"), None);
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(attribute_values("class").is_none());
        assert!(attribute_values("NUMBER").is_some());
    }
}
