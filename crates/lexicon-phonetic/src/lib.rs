//! Pinyin knowledge used by the pattern compiler.
//!
//! The crate knows nothing about the corpus. It answers three questions:
//! how a toned syllable decomposes ([`parse_syllable`]), how a run of pinyin
//! letters splits into slots ([`segment_run`]), and which syllables a slot
//! stands for once open finals and confusable sounds are taken into account
//! ([`Expander`]).
//!
//! # Example
//! ```
//! use lexicon_phonetic::{Expander, segment_run};
//!
//! let slots = segment_run("t@cai").unwrap();
//! let expansions = Expander::new(false).expand_all(&slots).unwrap();
//! assert!(expansions[0].accepts("tian"));
//! assert!(expansions[1].accepts("cai"));
//! ```
//!
//! For a runnable demo, see `cargo run -p lexicon-phonetic --example expand -- <run> [--homophone]`.

use thiserror::Error;

pub mod confusable;
mod expand;
mod segment;
mod syllable;
pub mod tables;

pub use confusable::abbreviation_variants;
pub use expand::{DEFAULT_SLOT_BOUND, Expander, Expansion};
pub use segment::{OPEN_FINAL, SlotSpec, segment_run};
pub use syllable::{parse_reading, parse_syllable};
pub use tables::{is_legal, split_syllable};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneticError {
    #[error("invalid pinyin syllable {raw:?}")]
    InvalidSyllable { raw: String },
    #[error("cannot split {run:?} into pinyin syllables")]
    Unsegmentable { run: String },
    #[error("{slot} expands to {size} variants, over the limit of {bound}")]
    ExpansionTooLarge {
        slot: String,
        size: usize,
        bound: usize,
    },
}
