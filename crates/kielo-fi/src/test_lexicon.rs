// Small Finnish dictionary compiled at test time
//
// Outputs follow the tag layout of the real `mor.vfst`: class tags, base
// form blocks, the surface characters, then inflection tags.

#![allow(dead_code)]

use kielo_fst::builder::VfstBuilder;

pub const MORPHOLOGY: &[(&str, &str)] = &[
    // nouns
    ("koira", "[Ln][Xp]koira[X]koira[Sn][Ny]"),
    ("koiran", "[Ln][Xp]koira[X]koira[Sg][Ny]n"),
    ("koiralla", "[Ln][Xp]koira[X]koira[Sade][Ny]lla"),
    ("koirat", "[Ln][Xp]koira[X]koira[Sn][Nm]t"),
    ("kissa", "[Ln][Xp]kissa[X]kissa[Sn][Ny]"),
    ("talo", "[Ln][Xp]talo[X]talo[Sn][Ny]"),
    ("talossa", "[Ln][Xp]talo[X]talo[Sine][Ny]ssa"),
    ("salo", "[Ln][Xp]salo[X]salo[Sn][Ny]"),
    ("auto", "[Ln][Xp]auto[X]auto[Sn][Ny]"),
    ("sana", "[Ln][Ivj][Xp]sana[X]sana[Sn][Ny]"),
    (
        "koiratalo",
        "[Ln][Xp]koira[X]koira[Sn][Ny][Bc][Ln][Xp]talo[X]talo[Sn][Ny]",
    ),
    (
        "linja-auto",
        "[Ln][Xp]linja[X]linja-[Bc][Ln][Xp]auto[X]auto[Sn][Ny]",
    ),
    ("kuusi", "[Ln][Xp]kuusi[X]kuusi[Sn][Ny]"),
    ("kuusi", "[Lu][Xp]kuusi[X]kuusi[Sn][Ny]"),
    // proper nouns and abbreviations
    ("helsinki", "[Lep][Xp]helsinki[X]helsinki[Sn][Ny]"),
    ("helsingissä", "[Lep][Xp]helsinki[X]helsingi[Sine][Ny]ssä"),
    ("eu", "[La][Xr]jj[X]eu"),
    ("eu:n", "[La][Xr]jj[X]eu:[Sg]n"),
    // adjectives
    ("hyvä", "[Ll][Xp]hyvä[X]hyvä[Sn][Ny]"),
    // verbs
    ("juoksen", "[Lt][Xp]juosta[X]juoks[Tt][Ap][P1][Ny][Ef]en"),
    ("juoksee", "[Lt][Xp]juosta[X]juokse[Tt][Ap][P3][Ny][Ef]e"),
    ("juokse", "[Lt][Xp]juosta[X]juokse[Tk][Ap][Et]"),
    ("juosta", "[Lt][Xp]juosta[X]juost[Tn1]a"),
    ("juoksemaan", "[Lt][Xp]juosta[X]juokse[Tn3][Sill]maan"),
    ("on", "[Lt][Xp]olla[X]o[Tt][Ap][P3][Ny][Ef]n"),
    ("alkaa", "[Lt][Ira][Xp]alkaa[X]alka[Tt][Ap][P3][Ny][Ef]a"),
    ("ei", "[Lk][Xp]ei[X]e[P3][Ny]i"),
    ("en", "[Lk][Xp]ei[X]e[P1][Ny]n"),
    // function words
    ("ja", "[Lc][Xp]ja[X]ja"),
    ("mutta", "[Lc][Xp]mutta[X]mutta"),
    ("hei", "[Lh][Xp]hei[X]hei"),
];

pub const AUTOCORRECT: &[(&str, &str)] = &[
    ("kuullostaa", "kuulostaa"),
    ("sivu mennen", "sivumennen"),
];

fn compile(entries: &[(&str, &str)]) -> Vec<u8> {
    entries
        .iter()
        .fold(VfstBuilder::new(), |b, (surface, output)| b.entry(surface, output))
        .build()
}

/// `mor.vfst` bytes of the test dictionary.
pub fn morphology() -> Vec<u8> {
    compile(MORPHOLOGY)
}

/// `autocorr.vfst` bytes of the test dictionary.
pub fn autocorrect() -> Vec<u8> {
    compile(AUTOCORRECT)
}
