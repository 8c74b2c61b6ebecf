use std::collections::BTreeSet;

use serde::Serialize;

use crate::PhoneticError;
use crate::confusable::{close_final, close_initial};
use crate::segment::SlotSpec;
use crate::tables::{finals_for, is_legal, split_syllable};

/// Largest number of syllables a single slot may stand for.
pub const DEFAULT_SLOT_BOUND: usize = 256;

/// The syllables one slot accepts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expansion {
    /// Any syllable, left unenumerated.
    Any,
    /// Sorted, deduplicated legal syllables.
    Syllables(Vec<String>),
}

impl Expansion {
    pub fn accepts(&self, syllable: &str) -> bool {
        match self {
            Expansion::Any => true,
            Expansion::Syllables(list) => list.binary_search_by(|s| s.as_str().cmp(syllable)).is_ok(),
        }
    }

    /// `None` for [`Expansion::Any`].
    pub fn len(&self) -> Option<usize> {
        match self {
            Expansion::Any => None,
            Expansion::Syllables(list) => Some(list.len()),
        }
    }
}

/// Turns slot specs into syllable sets.
#[derive(Clone, Copy, Debug)]
pub struct Expander {
    homophone: bool,
    bound: usize,
}

impl Expander {
    pub fn new(homophone: bool) -> Self {
        Self {
            homophone,
            bound: DEFAULT_SLOT_BOUND,
        }
    }

    pub fn with_bound(mut self, bound: usize) -> Self {
        self.bound = bound;
        self
    }

    pub fn expand(&self, slot: &SlotSpec) -> Result<Expansion, PhoneticError> {
        let syllables: BTreeSet<String> = match slot {
            SlotSpec::Any => return Ok(Expansion::Any),
            SlotSpec::Fixed { syllable } if !self.homophone => BTreeSet::from([syllable.clone()]),
            SlotSpec::Fixed { syllable } => {
                let (initial, final_) = split_syllable(syllable);
                let mut out = BTreeSet::from([syllable.clone()]);
                for i in close_initial(initial) {
                    for f in close_final(final_) {
                        let candidate = format!("{i}{f}");
                        if is_legal(&candidate) {
                            out.insert(candidate);
                        }
                    }
                }
                out
            }
            SlotSpec::OpenFinal { initial } => {
                let initials = if self.homophone {
                    close_initial(initial)
                } else {
                    vec![initial.as_str()]
                };
                initials
                    .into_iter()
                    .flat_map(|i| finals_for(i).iter().map(move |f| format!("{i}{f}")))
                    .collect()
            }
        };

        if syllables.len() > self.bound {
            return Err(PhoneticError::ExpansionTooLarge {
                slot: slot.to_string(),
                size: syllables.len(),
                bound: self.bound,
            });
        }
        Ok(Expansion::Syllables(syllables.into_iter().collect()))
    }

    pub fn expand_all(&self, slots: &[SlotSpec]) -> Result<Vec<Expansion>, PhoneticError> {
        slots.iter().map(|slot| self.expand(slot)).collect()
    }
}
