//! Transducer store for compiled VFST dictionaries.
//!
//! A VFST file is a finite-state transducer in one of two binary layouts,
//! unweighted (`mor.vfst`, `autocorr.vfst`) or weighted. Loading parses
//! either layout once into a single normalized arc table; every lookup after
//! that works on the normalized form and cannot fail.
//!
//! - [`format`]: file header
//! - [`symbols`]: symbol table and symbol classification
//! - [`flags`]: flag diacritic evaluation
//! - [`store`]: loading and graph access (`transitions_from`, `is_final`)
//! - [`lookup`]: exact and prefix lookups
//! - `builder` (feature): compiles word lists into VFST blobs

pub mod flags;
pub mod format;
pub mod lookup;
mod raw;
pub mod store;
pub mod symbols;

#[cfg(feature = "builder")]
pub mod builder;

pub use lookup::{Lookup, LookupResult, PrefixMatch};
pub use store::{Arc, StateId, TransducerStore, Transition};
pub use symbols::{Symbol, SymbolId};

/// Upper bound on traversal steps for a single lookup result.
pub const MAX_LOOP_COUNT: u32 = 100_000;

/// Deepest path a lookup follows before giving up on it.
pub const MAX_PATH_DEPTH: usize = 2000;

/// Errors raised while loading a transducer. Lookups never fail.
#[derive(Debug, thiserror::Error)]
pub enum FstError {
    #[error("data too short: need at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("not a VFST file or unsupported format version")]
    InvalidMagic,
    #[error("invalid symbol table: {0}")]
    InvalidSymbolTable(String),
    #[error("invalid flag diacritic: {0}")]
    InvalidFlagDiacritic(String),
    #[error("corrupt transition table: {0}")]
    CorruptData(String),
}
