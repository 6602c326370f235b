// Dictionaries built from the shared test lexicon

use std::fs;
use std::path::Path;

use kielo_fi::Session;

use crate::test_lexicon;

/// Write `mor.vfst`, and `autocorr.vfst` when asked, into `dir`.
pub fn write_dictionary(dir: &Path, autocorrect: bool) {
    fs::write(dir.join("mor.vfst"), test_lexicon::morphology()).unwrap();
    if autocorrect {
        fs::write(dir.join("autocorr.vfst"), test_lexicon::autocorrect()).unwrap();
    }
}

pub fn session() -> Session {
    Session::open(&test_lexicon::morphology(), Some(&test_lexicon::autocorrect())).unwrap()
}
