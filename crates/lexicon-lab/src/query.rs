use lexicon_types::{Category, Entry, EntryId, StructureTag};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::pattern::MatchMode;

/// One search request. Every filter is optional; an absent pattern matches
/// every entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub pattern: Option<String>,
    pub mode: MatchMode,
    pub homophone: bool,
    /// Initials string such as `zgcd`.
    pub initials: Option<String>,
    pub category: Option<Category>,
    pub length: Option<usize>,
    pub structure: Option<StructureTag>,
    pub rhyme: Option<String>,
    pub tones: Option<Vec<u8>>,
    /// Page size; 0 returns every match.
    pub limit: usize,
    pub offset: usize,
}

impl SearchQuery {
    pub fn new(pattern: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            pattern: Some(pattern.into()),
            mode,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: Pagination) -> Self {
        self.limit = page.limit;
        self.offset = page.offset;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Pagination {
    /// 1-based page of `size` entries. Page 0 is treated as page 1.
    pub fn page(page: usize, size: usize) -> Self {
        Self {
            limit: size,
            offset: page.saturating_sub(1).saturating_mul(size),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Hit<'a> {
    pub id: EntryId,
    pub entry: &'a Entry,
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchResult<'a> {
    pub total: usize,
    pub has_more: bool,
    pub items: Vec<Hit<'a>>,
}

impl SearchResult<'_> {
    pub fn empty() -> Self {
        SearchResult {
            total: 0,
            has_more: false,
            items: Vec::new(),
        }
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.items.iter().map(|hit| hit.id).collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|hit| hit.entry.text.as_str()).collect()
    }
}

/// Parse a tone sequence written as `1,2,3,4` or `1234`.
pub fn parse_tones(raw: &str) -> Result<Vec<u8>, SearchError> {
    let invalid = || SearchError::invalid(raw, "tones must be digits 1-5");
    let tones: Vec<u8> = if raw.contains(',') {
        raw.split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<_, _>>()?
    } else {
        raw.trim()
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8).ok_or_else(invalid))
            .collect::<Result<_, _>>()?
    };
    if tones.is_empty() || tones.iter().any(|t| !(1..=5).contains(t)) {
        return Err(invalid());
    }
    Ok(tones)
}

/// Lowercase an initials query, rejecting anything but ASCII letters.
pub(crate) fn normalize_initials(raw: &str) -> Result<String, SearchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SearchError::invalid(raw, "initials must be ASCII letters"));
    }
    Ok(trimmed.to_ascii_lowercase())
}

/// Bring a rhyme query into the indexed spelling: `ü`/`u:` as `v`, and the
/// contracted `iu`/`ui`/`un` written out.
pub(crate) fn normalize_rhyme(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase().replace("u:", "v").replace('ü', "v");
    match lowered.as_str() {
        "iu" => "iou".to_string(),
        "ui" => "uei".to_string(),
        "un" => "uen".to_string(),
        _ => lowered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_one_based() {
        assert_eq!(Pagination::page(1, 20), Pagination { limit: 20, offset: 0 });
        assert_eq!(Pagination::page(3, 20).offset, 40);
        assert_eq!(Pagination::page(0, 20).offset, 0);
        assert_eq!(Pagination::page(usize::MAX, 2).offset, usize::MAX);
    }

    #[test]
    fn tone_sequences() {
        assert_eq!(parse_tones("1,2, 3,4").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(parse_tones("4425").unwrap(), vec![4, 4, 2, 5]);
        assert!(parse_tones("").is_err());
        assert!(parse_tones("16").is_err());
        assert!(parse_tones("1,x").is_err());
    }

    #[test]
    fn initials_and_rhymes_normalize() {
        assert_eq!(normalize_initials(" ZGCD ").unwrap(), "zgcd");
        assert!(normalize_initials("z1").is_err());
        assert!(normalize_initials("").is_err());
        assert_eq!(normalize_rhyme("ÜE"), "ve");
        assert_eq!(normalize_rhyme("u:"), "v");
        assert_eq!(normalize_rhyme(" iu"), "iou");
        assert_eq!(normalize_rhyme("ian"), "ian");
    }

    #[test]
    fn queries_deserialize_with_defaults() {
        let query: SearchQuery =
            serde_json::from_str(r#"{"pattern": "t@cai", "mode": "pinyin", "limit": 5}"#).unwrap();
        assert_eq!(query.mode, MatchMode::Phonetic);
        assert_eq!(query.limit, 5);
        assert!(!query.homophone);
    }
}
