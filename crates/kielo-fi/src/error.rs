// Errors surfaced by the Finnish engine

use kielo_fst::FstError;

/// Failure of a session operation.
///
/// Lookup misses are never errors: an unknown word gives `Ok(false)` or an
/// empty list.
#[derive(Debug, thiserror::Error)]
pub enum KieloError {
    /// `mor.vfst` could not be parsed. The session is never created.
    #[error("failed to load morphology transducer: {0}")]
    MorphologyLoad(#[from] FstError),

    /// `autocorr.vfst` was given but could not be parsed.
    #[error("failed to load autocorrect transducer: {0}")]
    AutocorrectLoad(FstError),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The session was closed; no further operations are possible.
    #[error("session has been closed")]
    SessionClosed,

    /// Option name or id not recognized, or given a value of the wrong type.
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

pub type Result<T, E = KieloError> = std::result::Result<T, E>;
