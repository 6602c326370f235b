//! The `kielo` command-line tool.
//!
//! Every subcommand opens one session and reads its input either from the
//! positional arguments or from stdin, one item per line.

pub mod commands;
pub mod config;
pub mod dictionary;

#[cfg(test)]
#[path = "../../kielo-fi/src/test_lexicon.rs"]
mod test_lexicon;
#[cfg(test)]
mod test_support;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::OptionFlags;
use dictionary::Dictionary;

#[derive(Debug, Parser)]
#[command(name = "kielo", version, about = "Finnish spelling, analysis and grammar checking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Dictionary directory holding mor.vfst (or 5/mor-standard/mor.vfst)
    #[arg(long, global = true, env = "KIELO_DICT_PATH", value_name = "DIR")]
    pub dict: Option<PathBuf>,

    /// TOML file of session options
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub options: OptionFlags,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the spelling of words
    Spell {
        /// Also list suggestions for misspelled words
        #[arg(short, long)]
        suggest: bool,
        words: Vec<String>,
    },
    /// Suggest corrections for words
    Suggest { words: Vec<String> },
    /// Print every morphological analysis of words
    Analyze { words: Vec<String> },
    /// Count base forms in running text
    Baseform { text: Vec<String> },
    /// Hyphenate words
    Hyphenate {
        /// Text inserted at each break
        #[arg(long, default_value = "-")]
        separator: String,
        /// Print the raw pattern instead
        #[arg(long, conflicts_with = "all")]
        pattern: bool,
        /// Print the pattern of every possible break, ignoring the options
        #[arg(long)]
        all: bool,
        words: Vec<String>,
    },
    /// Split text into tokens
    Tokenize { text: Vec<String> },
    /// Split text into sentences
    Sentences { text: Vec<String> },
    /// Check the grammar of text, one paragraph per line
    Grammar {
        /// Language of the error descriptions
        #[arg(long, default_value = "fi")]
        language: String,
        /// Paragraphs are separated by empty lines
        #[arg(long)]
        empty_line: bool,
        text: Vec<String>,
    },
}

impl Cli {
    /// Log level for `-v` counts. `RUST_LOG` takes precedence.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Run the parsed command line against stdin and stdout.
pub fn run(cli: &Cli) -> Result<()> {
    let options = config::load_options(cli.config.as_deref(), &cli.options)?;
    let session = Dictionary::find(cli.dict.as_deref())?.open(options)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    commands::execute(&session, &cli.command, cli.json, stdin.lock(), &mut out)?;
    out.flush().context("failed to write output")
}

/// Arguments as items, or the non-empty lines of `input` when there are
/// none.
pub(crate) fn items(args: &[String], input: impl BufRead) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args.to_vec());
    }
    let mut items = Vec::new();
    for line in input.lines() {
        let line = line.context("failed to read stdin")?;
        let item = line.trim();
        if !item.is_empty() {
            items.push(item.to_string());
        }
    }
    Ok(items)
}

/// Arguments joined by spaces, or all of `input`.
pub(crate) fn text(args: &[String], mut input: impl BufRead) -> Result<String> {
    if !args.is_empty() {
        return Ok(args.join(" "));
    }
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}
