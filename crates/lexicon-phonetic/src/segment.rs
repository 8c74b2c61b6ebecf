use std::fmt;

use serde::Serialize;

use crate::PhoneticError;
use crate::tables::{INITIALS, MAX_SYLLABLE_LEN, is_legal};

/// Marker for an open final in a pinyin run (`t@` is any syllable starting with `t`).
pub const OPEN_FINAL: char = '@';

/// What one syllable position of a phonetic pattern may be.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotSpec {
    /// A single legal syllable.
    Fixed { syllable: String },
    /// Any legal syllable with this initial (possibly empty).
    OpenFinal { initial: String },
    /// Any syllable at all.
    Any,
}

impl SlotSpec {
    pub fn fixed(syllable: impl Into<String>) -> Self {
        SlotSpec::Fixed {
            syllable: syllable.into(),
        }
    }

    pub fn open(initial: impl Into<String>) -> Self {
        SlotSpec::OpenFinal {
            initial: initial.into(),
        }
    }
}

impl fmt::Display for SlotSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotSpec::Fixed { syllable } => f.write_str(syllable),
            SlotSpec::OpenFinal { initial } => write!(f, "{initial}{OPEN_FINAL}"),
            SlotSpec::Any => f.write_str("."),
        }
    }
}

/// Split a run of pinyin letters into syllable slots.
///
/// Apostrophes and whitespace force a boundary (`xi'an`). Inside a chunk the
/// longest legal syllable is tried first, backing off when the rest cannot be
/// segmented, so `xian` is one slot while `xi'an` is two.
pub fn segment_run(run: &str) -> Result<Vec<SlotSpec>, PhoneticError> {
    let unsegmentable = || PhoneticError::Unsegmentable {
        run: run.to_string(),
    };

    let normalized: String = run
        .chars()
        .map(|c| match c {
            'ü' | 'Ü' => 'v',
            other => other.to_ascii_lowercase(),
        })
        .collect();

    let mut slots = Vec::new();
    for chunk in normalized
        .split(|c: char| c == '\'' || c.is_whitespace())
        .filter(|chunk| !chunk.is_empty())
    {
        if !chunk
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b == OPEN_FINAL as u8)
        {
            return Err(unsegmentable());
        }
        let bytes = chunk.as_bytes();
        let mut dead = vec![false; bytes.len()];
        if !segment_from(bytes, 0, &mut slots, &mut dead) {
            return Err(unsegmentable());
        }
    }

    if slots.is_empty() {
        return Err(unsegmentable());
    }
    Ok(slots)
}

fn segment_from(chunk: &[u8], pos: usize, out: &mut Vec<SlotSpec>, dead: &mut [bool]) -> bool {
    if pos == chunk.len() {
        return true;
    }
    if dead[pos] {
        return false;
    }
    for (len, slot) in choices_at(chunk, pos) {
        out.push(slot);
        if segment_from(chunk, pos + len, out, dead) {
            return true;
        }
        out.pop();
    }
    dead[pos] = true;
    false
}

/// Candidate slots starting at `pos`, open finals first, then syllables longest first.
fn choices_at(chunk: &[u8], pos: usize) -> Vec<(usize, SlotSpec)> {
    let rest = &chunk[pos..];
    let mut choices = Vec::new();

    if rest.first() == Some(&(OPEN_FINAL as u8)) {
        choices.push((1, SlotSpec::open("")));
        return choices;
    }
    for initial in INITIALS {
        if rest.starts_with(initial.as_bytes())
            && rest.get(initial.len()) == Some(&(OPEN_FINAL as u8))
        {
            choices.push((initial.len() + 1, SlotSpec::open(*initial)));
        }
    }
    for len in (1..=MAX_SYLLABLE_LEN.min(rest.len())).rev() {
        let candidate = &rest[..len];
        if candidate.contains(&(OPEN_FINAL as u8)) {
            continue;
        }
        // chunk is ASCII, checked by the caller
        if let Ok(text) = std::str::from_utf8(candidate)
            && is_legal(text)
        {
            choices.push((len, SlotSpec::fixed(text)));
        }
    }
    choices
}
