//! Immutable entry store built from raw corpus records.
//!
//! [`EntryStore::build`] derives phonetic readings, the character count and
//! the structure tag of every record and rejects anything that would break
//! the invariants the matcher relies on: at least one reading, one syllable
//! per character, and no control characters in the text. Entry ids are
//! positions in the input, so result order follows corpus order.
//!
//! [`load_records`] reads the JSON corpus files (see [`loader`]) and
//! [`fingerprint`] hashes a record set for snapshot invalidation.
//!
//! # Example
//! ```no_run
//! use lexicon_store::{EntryStore, LoadMode, load_records};
//!
//! # fn main() -> anyhow::Result<()> {
//! let records = load_records("/path/to/corpus", LoadMode::Mmap)?;
//! let store = EntryStore::build(&records)?;
//! println!("{} entries", store.len());
//! # Ok(()) }
//! ```

use std::collections::BTreeMap;

use lexicon_phonetic::{PhoneticError, parse_reading};
use lexicon_types::{Category, Entry, EntryId, RawRecord, Reading, StructureTag};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub mod derive;
pub mod loader;

pub use derive::{MAX_DERIVED_READINGS, derive_readings};
pub use loader::{Buffer, LoadMode, load_records, parse_records, read_bytes};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corpus contains no records")]
    Empty,
    #[error("entry {text:?} has no readings")]
    NoReadings { text: String },
    #[error("entry {text:?}: reading {reading:?} has {found} syllables for {expected} characters")]
    SyllableCountMismatch {
        text: String,
        reading: String,
        expected: usize,
        found: usize,
    },
    #[error("entry {text:?}: {source}")]
    InvalidReading {
        text: String,
        #[source]
        source: PhoneticError,
    },
    #[error("entry {text:?}: unknown category {label:?}")]
    UnknownCategory { text: String, label: String },
    #[error("entry {text:?} contains a control character")]
    ControlCharacter { text: String },
    #[error("too many entries for 32-bit ids")]
    TooManyEntries,
}

/// Entries addressed by [`EntryId`], in corpus order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    /// Build the store from raw records, failing on the first invalid one.
    pub fn build(records: &[RawRecord]) -> Result<Self, StoreError> {
        if records.is_empty() {
            return Err(StoreError::Empty);
        }
        let entries = records
            .iter()
            .map(entry_from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    /// Wrap already derived entries after re-checking their invariants.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, StoreError> {
        if entries.is_empty() {
            return Err(StoreError::Empty);
        }
        if u32::try_from(entries.len()).is_err() {
            return Err(StoreError::TooManyEntries);
        }
        for entry in &entries {
            check_entry(entry)?;
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id as usize)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry)> {
        // from_entries guarantees every position fits in an EntryId
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i as EntryId, entry))
    }

    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.category).or_insert(0) += 1;
        }
        counts
    }
}

/// Derive a validated [`Entry`] from one raw record.
///
/// Text is trimmed, readings are parsed and deduplicated (first occurrence
/// wins), and the structure tag is computed from the characters.
pub fn entry_from_record(record: &RawRecord) -> Result<Entry, StoreError> {
    let text = record.text.trim().to_string();
    let label = record.category.as_deref().unwrap_or_default();
    let category = Category::from_label(label).ok_or_else(|| StoreError::UnknownCategory {
        text: text.clone(),
        label: label.to_string(),
    })?;

    let mut readings: Vec<Reading> = Vec::with_capacity(record.readings.len());
    for raw in &record.readings {
        let reading = parse_reading(raw).map_err(|source| StoreError::InvalidReading {
            text: text.clone(),
            source,
        })?;
        if !readings.contains(&reading) {
            readings.push(reading);
        }
    }

    let chars: Vec<char> = text.chars().collect();
    let entry = Entry {
        structure: StructureTag::detect(&chars),
        text,
        chars,
        category,
        readings,
        definition: non_empty(&record.definition),
        source: non_empty(&record.source),
        example: non_empty(&record.example),
    };
    check_entry(&entry)?;
    Ok(entry)
}

fn check_entry(entry: &Entry) -> Result<(), StoreError> {
    if entry.text.chars().any(char::is_control) {
        return Err(StoreError::ControlCharacter {
            text: entry.text.clone(),
        });
    }
    if entry.readings.is_empty() {
        return Err(StoreError::NoReadings {
            text: entry.text.clone(),
        });
    }
    for reading in &entry.readings {
        if reading.len() != entry.len() {
            return Err(StoreError::SyllableCountMismatch {
                text: entry.text.clone(),
                reading: reading.to_string(),
                expected: entry.len(),
                found: reading.len(),
            });
        }
    }
    Ok(())
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// SHA-256 over the serialized records, as lowercase hex.
pub fn fingerprint(records: &[RawRecord]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((records.len() as u64).to_le_bytes());
    for record in records {
        // RawRecord holds only strings, so serialization cannot fail
        let bytes = serde_json::to_vec(record).unwrap_or_default();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }
    format!("{:x}", hasher.finalize())
}
