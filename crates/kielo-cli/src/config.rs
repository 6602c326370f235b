// Session options from defaults, a TOML file and command-line flags

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use kielo_fi::Options;

/// Option overrides. A boolean flag alone means `true`; `--flag=false`
/// turns a default-on option off.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionFlags {
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub ignore_dot: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub ignore_numbers: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub ignore_uppercase: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub no_ugly_hyphenation: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub accept_first_uppercase: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub accept_all_uppercase: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub ocr_suggestions: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub ignore_nonwords: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub accept_extra_hyphens: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub accept_missing_hyphens: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub accept_titles_in_gc: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub accept_unfinished_paragraphs_in_gc: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub hyphenate_unknown_words: Option<bool>,
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub accept_bulleted_lists_in_gc: Option<bool>,

    #[arg(long, global = true, value_name = "N")]
    pub min_hyphenated_word_length: Option<usize>,
    #[arg(long, global = true, value_name = "N")]
    pub max_suggestions: Option<usize>,
    #[arg(long, global = true, value_name = "N")]
    pub speller_cache_size: Option<usize>,
}

macro_rules! apply_flags {
    ($flags:expr, $options:expr, $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = $flags.$field {
                $options.$field = value;
            }
        )*
    };
}

impl OptionFlags {
    /// Overwrite every option given on the command line.
    pub fn apply(&self, options: &mut Options) {
        apply_flags!(
            self,
            options,
            ignore_dot,
            ignore_numbers,
            ignore_uppercase,
            no_ugly_hyphenation,
            accept_first_uppercase,
            accept_all_uppercase,
            ocr_suggestions,
            ignore_nonwords,
            accept_extra_hyphens,
            accept_missing_hyphens,
            accept_titles_in_gc,
            accept_unfinished_paragraphs_in_gc,
            hyphenate_unknown_words,
            accept_bulleted_lists_in_gc,
            min_hyphenated_word_length,
            max_suggestions,
            speller_cache_size,
        );
    }
}

/// Parse a TOML options table. Missing keys keep their defaults.
pub fn parse_options(text: &str) -> Result<Options> {
    toml::from_str(text).context("invalid options")
}

/// Defaults, then the config file, then the flags.
pub fn load_options(config: Option<&Path>, flags: &OptionFlags) -> Result<Options> {
    let mut options = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_options(&text).with_context(|| format!("in {}", path.display()))?
        }
        None => Options::default(),
    };
    flags.apply(&mut options);
    log::debug!("options: {options:?}");
    Ok(options)
}
