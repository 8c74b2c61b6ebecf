use lexicon_phonetic::PhoneticError;
use lexicon_store::StoreError;
use thiserror::Error;

/// Everything a compile or search call can fail with.
///
/// An empty result is not an error; it comes back as a [`SearchResult`]
/// with `total == 0`.
///
/// [`SearchResult`]: crate::SearchResult
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid pattern at {token:?}: {reason}")]
    InvalidPattern { token: String, reason: String },
    #[error("{slot} expands to {size} variants, over the limit of {bound}")]
    ExpansionTooLarge {
        slot: String,
        size: usize,
        bound: usize,
    },
    /// Every slot is within bounds but the generated regex as a whole is not.
    #[error("pattern {pattern:?} compiles past the {limit}-byte regex size limit")]
    PatternTooLarge { pattern: String, limit: usize },
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
}

impl SearchError {
    pub(crate) fn invalid(token: impl Into<String>, reason: impl Into<String>) -> Self {
        SearchError::InvalidPattern {
            token: token.into(),
            reason: reason.into(),
        }
    }
}

impl From<PhoneticError> for SearchError {
    fn from(err: PhoneticError) -> Self {
        match err {
            PhoneticError::InvalidSyllable { raw } => {
                SearchError::invalid(raw, "not a pinyin syllable")
            }
            PhoneticError::Unsegmentable { run } => {
                SearchError::invalid(run, "cannot be split into pinyin syllables")
            }
            PhoneticError::ExpansionTooLarge { slot, size, bound } => {
                SearchError::ExpansionTooLarge { slot, size, bound }
            }
        }
    }
}

impl From<StoreError> for SearchError {
    fn from(err: StoreError) -> Self {
        SearchError::DataUnavailable(err.to_string())
    }
}
