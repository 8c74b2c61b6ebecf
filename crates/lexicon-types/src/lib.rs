//! Shared types describing a corpus of Chinese multi-character entries.
//!
//! An [`Entry`] is immutable once the store is built and is addressed by its
//! position ([`EntryId`]). Every entry carries one or more [`Reading`]s, each
//! holding exactly one [`Syllable`] per character, so polyphonic entries such
//! as 朝阳 (`zhāo yáng` / `cháo yáng`) keep all their pronunciations.
//!
//! [`RawRecord`] is the shape supplied by corpus loaders before readings are
//! derived, and [`StructureTag`] labels the repetition shape of four-character
//! entries.
//!
//! ```rust
//! use lexicon_types::{Category, StructureTag};
//!
//! let chars: Vec<char> = "高高兴兴".chars().collect();
//! assert_eq!(StructureTag::detect(&chars), Some(StructureTag::Aabb));
//! assert_eq!(Category::from_label("成语"), Some(Category::Idiom));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable position of an entry inside the entry store.
pub type EntryId = u32;

/// Fixed set of corpus categories.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// 成语
    Idiom,
    /// 词语
    Word,
    /// 歇后语
    Xiehouyu,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Idiom, Category::Word, Category::Xiehouyu];

    /// Parse either the Chinese label used by the corpus or an ASCII alias.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "成语" => Some(Category::Idiom),
            "词语" => Some(Category::Word),
            "歇后语" => Some(Category::Xiehouyu),
            other => match other.to_ascii_lowercase().as_str() {
                "idiom" | "chengyu" => Some(Category::Idiom),
                "word" | "ciyu" | "ci" => Some(Category::Word),
                "xiehouyu" => Some(Category::Xiehouyu),
                _ => None,
            },
        }
    }

    /// Chinese label as stored in corpus files.
    pub fn label(self) -> &'static str {
        match self {
            Category::Idiom => "成语",
            Category::Word => "词语",
            Category::Xiehouyu => "歇后语",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Positional repetition shape of a four-character entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StructureTag {
    Aabb,
    Abab,
    Abac,
    Abcc,
    Aabc,
    Abcb,
}

impl StructureTag {
    pub const ALL: [StructureTag; 6] = [
        StructureTag::Aabb,
        StructureTag::Abab,
        StructureTag::Abac,
        StructureTag::Abcc,
        StructureTag::Aabc,
        StructureTag::Abcb,
    ];

    /// Detect the shape of an entry. Only four-character entries carry a tag.
    ///
    /// Shapes are tried in a fixed order, so 哈哈哈哈 is reported as `AABB`.
    pub fn detect(chars: &[char]) -> Option<Self> {
        let [a, b, c, d] = chars else {
            return None;
        };
        if a == b && c == d {
            Some(StructureTag::Aabb)
        } else if a == c && b == d {
            Some(StructureTag::Abab)
        } else if a == c {
            Some(StructureTag::Abac)
        } else if c == d {
            Some(StructureTag::Abcc)
        } else if a == b {
            Some(StructureTag::Aabc)
        } else if b == d {
            Some(StructureTag::Abcb)
        } else {
            None
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AABB" => Some(StructureTag::Aabb),
            "ABAB" => Some(StructureTag::Abab),
            "ABAC" => Some(StructureTag::Abac),
            "ABCC" => Some(StructureTag::Abcc),
            "AABC" => Some(StructureTag::Aabc),
            "ABCB" => Some(StructureTag::Abcb),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StructureTag::Aabb => "AABB",
            StructureTag::Abab => "ABAB",
            StructureTag::Abac => "ABAC",
            StructureTag::Abcc => "ABCC",
            StructureTag::Aabc => "AABC",
            StructureTag::Abcb => "ABCB",
        }
    }
}

impl fmt::Display for StructureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One Mandarin syllable: initial (possibly empty), final and tone.
///
/// `tone` is 1-4, or 5 for the neutral tone. Letters are lowercase ASCII with
/// `ü` written as `v`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Syllable {
    pub initial: String,
    pub final_: String,
    pub tone: u8,
}

impl Syllable {
    /// Initial and final concatenated, without tone (`zhao`).
    pub fn untoned(&self) -> String {
        let mut out = String::with_capacity(self.initial.len() + self.final_.len());
        out.push_str(&self.initial);
        out.push_str(&self.final_);
        out
    }

    /// The final written out in full, as rhyme dictionaries list it.
    ///
    /// Spelling contractions are undone: `ü` after `j`/`q`/`x`/`y` becomes
    /// `v` (`ju`, `yu` → `v`), `y`/`w` stand for `i`/`u` (`yan` → `ian`,
    /// `wei` → `uei`), and `iu`/`ui`/`un` expand to `iou`/`uei`/`uen`.
    pub fn rhyme(&self) -> String {
        let final_ = self.final_.as_str();
        match self.initial.as_str() {
            "j" | "q" | "x" | "y" if final_.starts_with('u') => format!("v{}", &final_[1..]),
            "y" if final_.starts_with('i') => final_.to_string(),
            "y" if final_ == "ou" => "iou".to_string(),
            "y" => format!("i{final_}"),
            "w" if final_.starts_with('u') => final_.to_string(),
            "w" => format!("u{final_}"),
            _ => match final_ {
                "iu" => "iou".to_string(),
                "ui" => "uei".to_string(),
                "un" => "uen".to_string(),
                other => other.to_string(),
            },
        }
    }

    /// First letter of the initial, or of the final when the initial is empty.
    pub fn abbreviation(&self) -> Option<char> {
        self.initial.chars().next().or_else(|| self.final_.chars().next())
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.initial, self.final_, self.tone)
    }
}

/// One full pronunciation of an entry, one syllable per character.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Reading {
    pub syllables: Vec<Syllable>,
}

impl Reading {
    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    /// Space separated untoned syllables (`zhao yang`).
    pub fn untoned(&self) -> String {
        self.syllables
            .iter()
            .map(Syllable::untoned)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Initials string (`zy`).
    pub fn initials(&self) -> String {
        self.syllables
            .iter()
            .filter_map(Syllable::abbreviation)
            .collect()
    }

    pub fn tones(&self) -> Vec<u8> {
        self.syllables.iter().map(|s| s.tone).collect()
    }

    /// Rhyme of the last syllable, see [`Syllable::rhyme`].
    pub fn rhyme(&self) -> Option<String> {
        self.syllables.last().map(Syllable::rhyme)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, syllable) in self.syllables.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{syllable}")?;
        }
        Ok(())
    }
}

/// Corpus entry with its derived phonetic readings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
    pub text: String,
    pub chars: Vec<char>,
    pub category: Category,
    pub readings: Vec<Reading>,
    pub structure: Option<StructureTag>,
    pub definition: Option<String>,
    pub source: Option<String>,
    pub example: Option<String>,
}

impl Entry {
    /// Character count.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn first_char(&self) -> Option<char> {
        self.chars.first().copied()
    }

    pub fn last_char(&self) -> Option<char> {
        self.chars.last().copied()
    }
}

/// Record as supplied by a corpus loader, before readings are derived.
///
/// Field aliases cover the dialects of the bundled JSON files (`word`, `ci`
/// and `riddle` for the text, `pinyin` for a single reading, and so on).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(alias = "word", alias = "ci", alias = "riddle")]
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "pinyin", deserialize_with = "one_or_many")]
    pub readings: Vec<String>,
    #[serde(default, alias = "explanation", alias = "answer")]
    pub definition: Option<String>,
    #[serde(default, alias = "derivation")]
    pub source: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Missing(Option<()>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.trim().is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
        OneOrMany::Missing(_) => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn syl(initial: &str, final_: &str, tone: u8) -> Syllable {
        Syllable {
            initial: initial.into(),
            final_: final_.into(),
            tone,
        }
    }

    #[test]
    fn detects_structures() {
        assert_eq!(StructureTag::detect(&chars("高高兴兴")), Some(StructureTag::Aabb));
        assert_eq!(StructureTag::detect(&chars("研究研究")), Some(StructureTag::Abab));
        assert_eq!(StructureTag::detect(&chars("一心一意")), Some(StructureTag::Abac));
        assert_eq!(StructureTag::detect(&chars("想入非非")), Some(StructureTag::Abcc));
        assert_eq!(StructureTag::detect(&chars("心心相印")), Some(StructureTag::Aabc));
        assert_eq!(StructureTag::detect(&chars("天长地久")), None);
        assert_eq!(StructureTag::detect(&chars("哈哈哈哈")), Some(StructureTag::Aabb));
        assert_eq!(StructureTag::detect(&chars("朝阳")), None);
        assert_eq!(StructureTag::detect(&chars("好好学习吧")), None);
    }

    #[test]
    fn structure_tags_round_trip_through_labels() {
        for tag in StructureTag::ALL {
            assert_eq!(StructureTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(StructureTag::parse("abab"), Some(StructureTag::Abab));
        assert_eq!(StructureTag::parse("AAAA"), None);
    }

    #[test]
    fn category_labels() {
        assert_eq!(Category::from_label("歇后语"), Some(Category::Xiehouyu));
        assert_eq!(Category::from_label("Idiom"), Some(Category::Idiom));
        assert_eq!(Category::from_label("名词"), None);
        assert_eq!(Category::Word.to_string(), "词语");
    }

    #[test]
    fn reading_projections() {
        let reading = Reading {
            syllables: vec![syl("zh", "ao", 1), syl("y", "ang", 2)],
        };
        assert_eq!(reading.untoned(), "zhao yang");
        assert_eq!(reading.initials(), "zy");
        assert_eq!(reading.tones(), vec![1, 2]);
        assert_eq!(reading.rhyme().as_deref(), Some("iang"));
        assert_eq!(reading.to_string(), "zhao1 yang2");

        let zero_initial = syl("", "er", 4);
        assert_eq!(zero_initial.abbreviation(), Some('e'));
    }

    #[test]
    fn rhymes_spell_out_the_final() {
        let cases = [
            (("j", "u"), "v"),
            (("y", "u"), "v"),
            (("x", "ue"), "ve"),
            (("y", "uan"), "van"),
            (("q", "un"), "vn"),
            (("zh", "u"), "u"),
            (("l", "v"), "v"),
            (("y", "an"), "ian"),
            (("y", "i"), "i"),
            (("y", "ing"), "ing"),
            (("y", "ou"), "iou"),
            (("w", "u"), "u"),
            (("w", "ei"), "uei"),
            (("", "an"), "an"),
            (("j", "iu"), "iou"),
            (("g", "ui"), "uei"),
            (("d", "un"), "uen"),
            (("g", "uo"), "uo"),
        ];
        for ((initial, final_), rhyme) in cases {
            assert_eq!(syl(initial, final_, 1).rhyme(), rhyme, "{initial}{final_}");
        }
    }

    #[test]
    fn raw_record_accepts_corpus_dialects() {
        let idiom: RawRecord = serde_json::from_str(
            r#"{"word": "阿鼻地狱", "pinyin": "ā bí dì yù", "explanation": "佛教语", "derivation": "法华经"}"#,
        )
        .unwrap();
        assert_eq!(idiom.text, "阿鼻地狱");
        assert_eq!(idiom.readings, vec!["ā bí dì yù".to_string()]);
        assert_eq!(idiom.definition.as_deref(), Some("佛教语"));
        assert_eq!(idiom.source.as_deref(), Some("法华经"));

        let many: RawRecord =
            serde_json::from_str(r#"{"text": "朝阳", "readings": ["zhāo yáng", "cháo yáng"]}"#)
                .unwrap();
        assert_eq!(many.readings.len(), 2);

        let none: RawRecord = serde_json::from_str(r#"{"ci": "词语"}"#).unwrap();
        assert!(none.readings.is_empty());
    }
}
