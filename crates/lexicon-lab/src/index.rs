use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use bitvec::prelude::*;
use lexicon_store::EntryStore;
use lexicon_types::{Category, EntryId, StructureTag};
use serde::{Deserialize, Serialize};
use tracing::info;

pub(crate) type BitSet = BitVec<usize, Lsb0>;

/// Inverted mappings from entry attributes to ascending entry ids.
///
/// Phonetic keys are collected from every reading, so a polyphonic entry is
/// reachable through each of its pronunciations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBundle {
    entry_count: usize,
    by_first_char: HashMap<char, Vec<EntryId>>,
    by_last_char: HashMap<char, Vec<EntryId>>,
    by_char: HashMap<char, Vec<EntryId>>,
    by_length: BTreeMap<usize, Vec<EntryId>>,
    by_category: BTreeMap<Category, Vec<EntryId>>,
    by_structure: HashMap<StructureTag, Vec<EntryId>>,
    by_initials: HashMap<String, Vec<EntryId>>,
    by_pinyin: HashMap<String, Vec<EntryId>>,
    by_rhyme: HashMap<String, Vec<EntryId>>,
}

/// Lookup key for [`IndexBundle::postings`].
#[derive(Clone, Copy, Debug)]
pub enum IndexKey<'a> {
    FirstChar(char),
    LastChar(char),
    Char(char),
    Length(usize),
    Category(Category),
    Structure(StructureTag),
    /// Initials string such as `zy`.
    Initials(&'a str),
    /// Untoned, space separated syllables such as `zhao yang`.
    Pinyin(&'a str),
    /// Written-out final of the last syllable (`ian`, `v`).
    Rhyme(&'a str),
}

impl IndexBundle {
    pub fn build(store: &EntryStore) -> Self {
        let mut index = IndexBundle {
            entry_count: store.len(),
            ..IndexBundle::default()
        };

        for (id, entry) in store.iter() {
            if let Some(c) = entry.first_char() {
                index.by_first_char.entry(c).or_default().push(id);
            }
            if let Some(c) = entry.last_char() {
                index.by_last_char.entry(c).or_default().push(id);
            }
            for c in &entry.chars {
                push_once(index.by_char.entry(*c).or_default(), id);
            }
            index.by_length.entry(entry.len()).or_default().push(id);
            index.by_category.entry(entry.category).or_default().push(id);
            if let Some(tag) = entry.structure {
                index.by_structure.entry(tag).or_default().push(id);
            }
            for reading in &entry.readings {
                push_once(index.by_initials.entry(reading.initials()).or_default(), id);
                push_once(index.by_pinyin.entry(reading.untoned()).or_default(), id);
                if let Some(rhyme) = reading.rhyme() {
                    push_once(index.by_rhyme.entry(rhyme).or_default(), id);
                }
            }
        }

        for (category, ids) in &index.by_category {
            info!("indexed {} entries in category {category}", ids.len());
        }
        info!(
            "index built over {} entries ({} keys)",
            index.entry_count,
            index.key_count()
        );
        index
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn postings(&self, key: IndexKey<'_>) -> &[EntryId] {
        let ids = match key {
            IndexKey::FirstChar(c) => self.by_first_char.get(&c),
            IndexKey::LastChar(c) => self.by_last_char.get(&c),
            IndexKey::Char(c) => self.by_char.get(&c),
            IndexKey::Length(len) => self.by_length.get(&len),
            IndexKey::Category(category) => self.by_category.get(&category),
            IndexKey::Structure(tag) => self.by_structure.get(&tag),
            IndexKey::Initials(s) => self.by_initials.get(s),
            IndexKey::Pinyin(s) => self.by_pinyin.get(s),
            IndexKey::Rhyme(s) => self.by_rhyme.get(s),
        };
        ids.map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every initials string present in the corpus.
    pub fn initials_keys(&self) -> impl Iterator<Item = &str> {
        self.by_initials.keys().map(String::as_str)
    }

    /// Entries whose length lies in `min..=max` (`max = None` is unbounded).
    pub fn length_range_mask(&self, min: usize, max: Option<usize>) -> BitSet {
        let mut bits = self.none();
        if max.is_some_and(|max| max < min) {
            return bits;
        }
        let upper = max.map_or(Bound::Unbounded, Bound::Included);
        for ids in self.by_length.range((Bound::Included(min), upper)).map(|(_, ids)| ids) {
            set_all(&mut bits, ids);
        }
        bits
    }

    pub fn mask(&self, ids: &[EntryId]) -> BitSet {
        let mut bits = self.none();
        set_all(&mut bits, ids);
        bits
    }

    pub fn all(&self) -> BitSet {
        bitvec![usize, Lsb0; 1; self.entry_count]
    }

    fn none(&self) -> BitSet {
        bitvec![usize, Lsb0; 0; self.entry_count]
    }

    fn key_count(&self) -> usize {
        self.by_first_char.len()
            + self.by_last_char.len()
            + self.by_char.len()
            + self.by_length.len()
            + self.by_category.len()
            + self.by_structure.len()
            + self.by_initials.len()
            + self.by_pinyin.len()
            + self.by_rhyme.len()
    }

    /// Check that the bundle fits a store of `entry_count` entries.
    pub(crate) fn validate(&self, entry_count: usize) -> Result<(), String> {
        if self.entry_count != entry_count {
            return Err(format!(
                "index covers {} entries but the store holds {entry_count}",
                self.entry_count
            ));
        }
        let postings = self
            .by_first_char
            .values()
            .chain(self.by_last_char.values())
            .chain(self.by_char.values())
            .chain(self.by_length.values())
            .chain(self.by_category.values())
            .chain(self.by_structure.values())
            .chain(self.by_initials.values())
            .chain(self.by_pinyin.values())
            .chain(self.by_rhyme.values());
        for ids in postings {
            if let Some(id) = ids.iter().find(|id| **id as usize >= entry_count) {
                return Err(format!("posting refers to missing entry {id}"));
            }
        }
        Ok(())
    }
}

fn push_once(ids: &mut Vec<EntryId>, id: EntryId) {
    if ids.last() != Some(&id) {
        ids.push(id);
    }
}

fn set_all(bits: &mut BitSet, ids: &[EntryId]) {
    for id in ids {
        let idx = *id as usize;
        if idx < bits.len() {
            bits.set(idx, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon_types::RawRecord;

    fn store() -> EntryStore {
        let record = |text: &str, category: &str, readings: &[&str]| RawRecord {
            text: text.into(),
            category: Some(category.into()),
            readings: readings.iter().map(|r| r.to_string()).collect(),
            ..RawRecord::default()
        };
        EntryStore::build(&[
            record("心心相印", "成语", &["xīn xīn xiāng yìn"]),
            record("朝阳", "词语", &["zhāo yáng", "cháo yáng"]),
            record("新年", "词语", &["xīn nián"]),
        ])
        .unwrap()
    }

    #[test]
    fn indexes_characters_once_per_entry() {
        let index = IndexBundle::build(&store());
        assert_eq!(index.postings(IndexKey::Char('心')), &[0]);
        assert_eq!(index.postings(IndexKey::FirstChar('朝')), &[1]);
        assert_eq!(index.postings(IndexKey::LastChar('年')), &[2]);
        assert_eq!(index.postings(IndexKey::Length(2)), &[1, 2]);
        assert_eq!(index.postings(IndexKey::Category(Category::Idiom)), &[0]);
        assert_eq!(index.postings(IndexKey::Structure(StructureTag::Aabc)), &[0]);
        assert!(index.postings(IndexKey::Char('龙')).is_empty());
    }

    #[test]
    fn phonetic_keys_cover_every_reading() {
        let index = IndexBundle::build(&store());
        assert_eq!(index.postings(IndexKey::Initials("zy")), &[1]);
        assert_eq!(index.postings(IndexKey::Initials("cy")), &[1]);
        assert_eq!(index.postings(IndexKey::Pinyin("chao yang")), &[1]);
        assert_eq!(index.postings(IndexKey::Rhyme("iang")), &[1]);
        assert!(index.postings(IndexKey::Rhyme("ang")).is_empty());
        assert_eq!(index.postings(IndexKey::Rhyme("ian")), &[2]);
        assert_eq!(index.postings(IndexKey::Rhyme("in")), &[0]);
        let mut keys: Vec<&str> = index.initials_keys().collect();
        keys.sort();
        assert_eq!(keys, ["cy", "xn", "xxxy", "zy"]);
    }

    #[test]
    fn masks_and_length_ranges() {
        let index = IndexBundle::build(&store());
        assert_eq!(index.all().count_ones(), 3);
        assert_eq!(index.mask(&[0, 2, 9]).iter_ones().collect::<Vec<_>>(), [0, 2]);
        assert_eq!(index.length_range_mask(3, None).iter_ones().collect::<Vec<_>>(), [0]);
        assert_eq!(index.length_range_mask(1, Some(2)).count_ones(), 2);
        assert!(index.length_range_mask(3, Some(2)).not_any());
        assert!(index.validate(3).is_ok());
        assert!(index.validate(2).is_err());
    }
}
