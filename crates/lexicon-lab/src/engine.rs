use lexicon_phonetic::{DEFAULT_SLOT_BOUND, abbreviation_variants};
use lexicon_store::EntryStore;
use lexicon_types::{Entry, EntryId, RawRecord, Reading};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SearchError;
use crate::index::{BitSet, IndexBundle, IndexKey};
use crate::pattern::{CompiledPattern, MatchMode, compile};
use crate::query::{Hit, SearchQuery, SearchResult, normalize_initials, normalize_rhyme};

/// Bounds applied to every compile and search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Syllables a single pattern slot may expand to.
    pub max_slot_expansion: usize,
    /// Variants a homophone initials query may expand to.
    pub max_initials_variants: usize,
    /// Largest bound accepted in a `{m,n}` quantifier.
    pub max_repeat: u32,
    /// Compiled size allowed for the generated regex.
    pub max_regex_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_slot_expansion: DEFAULT_SLOT_BOUND,
            max_initials_variants: 512,
            max_repeat: 32,
            max_regex_bytes: 8 << 20,
        }
    }
}

/// Entry store plus index, built once and shared read-only by every query.
#[derive(Clone, Debug)]
pub struct Lexicon {
    store: EntryStore,
    index: IndexBundle,
    limits: Limits,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    entries: &'a [Entry],
    index: &'a IndexBundle,
}

#[derive(Deserialize)]
struct SnapshotBody {
    entries: Vec<Entry>,
    index: IndexBundle,
}

impl Lexicon {
    pub fn build(records: &[RawRecord]) -> Result<Self, SearchError> {
        let store = EntryStore::build(records)?;
        Ok(Self::from_store(store))
    }

    pub fn from_store(store: EntryStore) -> Self {
        let index = IndexBundle::build(&store);
        Self {
            store,
            index,
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn index(&self) -> &IndexBundle {
        &self.index
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Validate and compile a pattern without running it.
    pub fn compile(
        &self,
        pattern: &str,
        mode: MatchMode,
        homophone: bool,
    ) -> Result<CompiledPattern, SearchError> {
        compile(pattern, mode, homophone, &self.limits)
    }

    pub fn search(&self, query: &SearchQuery) -> Result<SearchResult<'_>, SearchError> {
        let compiled = match query.pattern.as_deref().map(str::trim) {
            Some(pattern) if !pattern.is_empty() => {
                Some(self.compile(pattern, query.mode, query.homophone)?)
            }
            _ => None,
        };
        if let Some(tones) = &query.tones
            && tones.iter().any(|t| !(1..=5).contains(t))
        {
            return Err(SearchError::invalid(format!("{tones:?}"), "tones must be 1-5"));
        }

        let Some(candidates) = self.candidates(query, compiled.as_ref())? else {
            return Ok(SearchResult::empty());
        };

        let tones = query.tones.as_deref();
        let limit = if query.limit == 0 { usize::MAX } else { query.limit };
        let mut total = 0usize;
        let mut items = Vec::with_capacity(query.limit.min(64));
        for idx in candidates.iter_ones() {
            let id = idx as EntryId;
            let Some(entry) = self.store.get(id) else {
                continue;
            };
            if !verify(entry, compiled.as_ref(), tones) {
                continue;
            }
            total += 1;
            if total > query.offset && items.len() < limit {
                items.push(Hit { id, entry });
            }
        }

        let has_more = query.offset.saturating_add(items.len()) < total;
        debug!(total, returned = items.len(), "search finished");
        Ok(SearchResult {
            total,
            has_more,
            items,
        })
    }

    /// Intersect every index posting the query pins down. `None` means no
    /// entry can match.
    fn candidates(
        &self,
        query: &SearchQuery,
        compiled: Option<&CompiledPattern>,
    ) -> Result<Option<BitSet>, SearchError> {
        let mut candidates = self.index.all();
        let mut narrow = |mask: BitSet| {
            candidates &= &mask;
            candidates.any()
        };

        if let Some(category) = query.category
            && !narrow(self.index.mask(self.index.postings(IndexKey::Category(category))))
        {
            return Ok(None);
        }
        if let Some(length) = query.length
            && !narrow(self.index.mask(self.index.postings(IndexKey::Length(length))))
        {
            return Ok(None);
        }
        if let Some(tag) = query.structure
            && !narrow(self.index.mask(self.index.postings(IndexKey::Structure(tag))))
        {
            return Ok(None);
        }
        if let Some(rhyme) = &query.rhyme {
            let rhyme = normalize_rhyme(rhyme);
            if !narrow(self.index.mask(self.index.postings(IndexKey::Rhyme(&rhyme)))) {
                return Ok(None);
            }
        }
        if let Some(initials) = &query.initials {
            let initials = normalize_initials(initials)?;
            let variants = if query.homophone {
                abbreviation_variants(&initials, self.limits.max_initials_variants)?
            } else {
                vec![initials]
            };
            let mut mask = self.index.mask(&[]);
            for variant in &variants {
                mask |= &self.index.mask(self.index.postings(IndexKey::Initials(variant)));
            }
            if !narrow(mask) {
                return Ok(None);
            }
        }

        if let Some(compiled) = compiled {
            let hints = compiled.hints();
            if let Some(c) = hints.first_char
                && !narrow(self.index.mask(self.index.postings(IndexKey::FirstChar(c))))
            {
                return Ok(None);
            }
            if let Some(c) = hints.last_char
                && !narrow(self.index.mask(self.index.postings(IndexKey::LastChar(c))))
            {
                return Ok(None);
            }
            for c in &hints.required_chars {
                if !narrow(self.index.mask(self.index.postings(IndexKey::Char(*c)))) {
                    return Ok(None);
                }
            }
            if let Some(key) = &hints.pinyin_key
                && !narrow(self.index.mask(self.index.postings(IndexKey::Pinyin(key))))
            {
                return Ok(None);
            }
            if (hints.min_len > 1 || hints.max_len.is_some())
                && !narrow(self.index.length_range_mask(hints.min_len, hints.max_len))
            {
                return Ok(None);
            }
        }

        Ok(Some(candidates))
    }

    /// Serialize store and index for a snapshot file.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SearchError> {
        let body = SnapshotRef {
            entries: self.store.entries(),
            index: &self.index,
        };
        bincode::serialize(&body)
            .map_err(|err| SearchError::DataUnavailable(format!("serialize lexicon: {err}")))
    }

    /// Restore a lexicon written by [`Lexicon::to_bytes`], re-checking its invariants.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SearchError> {
        let body: SnapshotBody = bincode::deserialize(bytes)
            .map_err(|err| SearchError::DataUnavailable(format!("deserialize lexicon: {err}")))?;
        let store = EntryStore::from_entries(body.entries)?;
        body.index
            .validate(store.len())
            .map_err(SearchError::DataUnavailable)?;
        info!("restored lexicon with {} entries", store.len());
        Ok(Self {
            store,
            index: body.index,
            limits: Limits::default(),
        })
    }
}

/// Full check of one candidate. In phonetic mode the tone sequence must hold
/// on a reading that also satisfies the pattern.
fn verify(entry: &Entry, compiled: Option<&CompiledPattern>, tones: Option<&[u8]>) -> bool {
    let tones_hold = |reading: &Reading| {
        tones.is_none_or(|tones| {
            reading.len() == tones.len() && reading.syllables.iter().zip(tones).all(|(s, t)| s.tone == *t)
        })
    };
    match compiled {
        None => entry.readings.iter().any(tones_hold),
        Some(compiled) => match compiled.mode() {
            MatchMode::Character => {
                compiled.is_match(entry) && entry.readings.iter().any(tones_hold)
            }
            MatchMode::Phonetic => compiled.matching_readings(entry).any(tones_hold),
        },
    }
}
