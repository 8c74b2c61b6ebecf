//! Pattern compiler.
//!
//! A pattern is parsed into pieces (literal character, character set, `.`,
//! and in phonetic mode runs of pinyin letters), each optionally quantified.
//! Every piece stands for one entry character, so quantifiers always count
//! characters, never letters.
//!
//! Character mode turns the pieces into a regex over the entry text.
//! Phonetic mode segments each run into syllable slots, expands the slots
//! into syllable sets and builds a regex over a per-reading haystack in which
//! every character is followed by its untoned syllable and a separator:
//!
//! ```text
//! 中国 / zhōng guó  =>  \x1F中zhong\x1F国guo\x1F
//! ```
//!
//! Each slot matches exactly one `char syllable \x1F` cell and the pattern
//! starts right after a separator, so slot boundaries always line up with
//! syllable boundaries.

use lexicon_phonetic::{Expander, Expansion, segment_run};
use lexicon_types::{Entry, Reading};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::Limits;
use crate::error::SearchError;

const SEP: char = '\u{1F}';
const SEP_RE: &str = r"\x1F";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Pattern pieces match entry characters.
    #[default]
    Character,
    /// Letters in the pattern match pinyin syllables.
    #[serde(alias = "pinyin")]
    Phonetic,
}

impl MatchMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "character" | "char" | "hanzi" => Some(MatchMode::Character),
            "phonetic" | "pinyin" => Some(MatchMode::Phonetic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Character => "character",
            MatchMode::Phonetic => "phonetic",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Atom {
    Char(char),
    Set { chars: Vec<char>, negated: bool },
    Any,
    Run(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Piece {
    atom: Atom,
    min: u32,
    max: Option<u32>,
    quantified: bool,
}

impl Piece {
    fn once(atom: Atom) -> Self {
        Self {
            atom,
            min: 1,
            max: Some(1),
            quantified: false,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Parsed {
    anchored_start: bool,
    anchored_end: bool,
    pieces: Vec<Piece>,
}

/// What a single entry character (and its syllable) must look like.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotMatcher {
    /// One of these untoned syllables, with any character.
    Syllables { spec: String, syllables: Vec<String> },
    Char { char: char },
    Set { chars: Vec<char>, negated: bool },
    Any,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompiledSlot {
    pub matcher: SlotMatcher,
    pub min: u32,
    pub max: Option<u32>,
    #[serde(skip)]
    fragment: String,
}

/// Facts about every possible match, used to pre-filter candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Hints {
    pub min_len: usize,
    /// Only known when the pattern is anchored at both ends.
    pub max_len: Option<usize>,
    pub first_char: Option<char>,
    pub last_char: Option<char>,
    pub required_chars: Vec<char>,
    /// Exact untoned pinyin when every slot is one fixed syllable.
    pub pinyin_key: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CompiledPattern {
    source: String,
    mode: MatchMode,
    homophone: bool,
    slots: Vec<CompiledSlot>,
    regex: Regex,
    hints: Hints,
}

impl CompiledPattern {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn homophone(&self) -> bool {
        self.homophone
    }

    pub fn slots(&self) -> &[CompiledSlot] {
        &self.slots
    }

    pub fn hints(&self) -> &Hints {
        &self.hints
    }

    /// The generated regex, for diagnostics.
    pub fn regex_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Character mode tests the text; phonetic mode needs one matching reading.
    pub fn is_match(&self, entry: &Entry) -> bool {
        match self.mode {
            MatchMode::Character => self.regex.is_match(&entry.text),
            MatchMode::Phonetic => self.matching_readings(entry).next().is_some(),
        }
    }

    /// Readings of `entry` that satisfy the pattern. In character mode that is
    /// every reading when the text matches.
    pub fn matching_readings<'a>(
        &'a self,
        entry: &'a Entry,
    ) -> impl Iterator<Item = &'a Reading> + 'a {
        let text_matches = self.mode == MatchMode::Character && self.regex.is_match(&entry.text);
        entry.readings.iter().filter(move |reading| match self.mode {
            MatchMode::Character => text_matches,
            MatchMode::Phonetic => self.regex.is_match(&phonetic_haystack(entry, reading)),
        })
    }
}

/// Haystack searched by phonetic patterns for one reading of an entry.
pub fn phonetic_haystack(entry: &Entry, reading: &Reading) -> String {
    let mut out = String::with_capacity(entry.text.len() + reading.len() * 8 + 1);
    out.push(SEP);
    for (c, syllable) in entry.chars.iter().zip(&reading.syllables) {
        out.push(*c);
        out.push_str(&syllable.initial);
        out.push_str(&syllable.final_);
        out.push(SEP);
    }
    out
}

pub fn compile(
    pattern: &str,
    mode: MatchMode,
    homophone: bool,
    limits: &Limits,
) -> Result<CompiledPattern, SearchError> {
    let source = pattern.trim();
    let parsed = parse(source, mode, limits.max_repeat)?;
    let expander = Expander::new(homophone).with_bound(limits.max_slot_expansion);

    let mut slots = Vec::with_capacity(parsed.pieces.len());
    for piece in parsed.pieces {
        match piece.atom {
            Atom::Run(run) => {
                let specs = segment_run(&run)?;
                let last = specs.len().saturating_sub(1);
                for (i, spec) in specs.iter().enumerate() {
                    let matcher = match expander.expand(spec)? {
                        Expansion::Any => SlotMatcher::Any,
                        Expansion::Syllables(syllables) => SlotMatcher::Syllables {
                            spec: spec.to_string(),
                            syllables,
                        },
                    };
                    let (min, max) = if i == last {
                        (piece.min, piece.max)
                    } else {
                        (1, Some(1))
                    };
                    slots.push(slot(mode, matcher, min, max));
                }
            }
            Atom::Char(c) => slots.push(slot(mode, SlotMatcher::Char { char: c }, piece.min, piece.max)),
            Atom::Set { chars, negated } => slots.push(slot(
                mode,
                SlotMatcher::Set { chars, negated },
                piece.min,
                piece.max,
            )),
            Atom::Any => slots.push(slot(mode, SlotMatcher::Any, piece.min, piece.max)),
        }
    }

    let mut re = String::new();
    if parsed.anchored_start {
        re.push_str(r"\A");
    }
    if mode == MatchMode::Phonetic {
        re.push_str(SEP_RE);
    }
    for slot in &slots {
        re.push_str(&slot.fragment);
    }
    if parsed.anchored_end {
        re.push_str(r"\z");
    }

    let regex = RegexBuilder::new(&re)
        .size_limit(limits.max_regex_bytes)
        .build()
        .map_err(|err| match err {
            regex::Error::CompiledTooBig(limit) => SearchError::PatternTooLarge {
                pattern: source.to_string(),
                limit,
            },
            other => SearchError::invalid(source, other.to_string()),
        })?;
    debug!(pattern = source, mode = mode.as_str(), regex = %re, "compiled pattern");

    let hints = hints(mode, parsed.anchored_start, parsed.anchored_end, &slots);
    Ok(CompiledPattern {
        source: source.to_string(),
        mode,
        homophone,
        slots,
        regex,
        hints,
    })
}

fn slot(mode: MatchMode, matcher: SlotMatcher, min: u32, max: Option<u32>) -> CompiledSlot {
    let cell = match (&matcher, mode) {
        (SlotMatcher::Syllables { syllables, .. }, _) => {
            let alternatives: Vec<String> = syllables.iter().map(|s| regex::escape(s)).collect();
            format!("[^{SEP_RE}](?:{}){SEP_RE}", alternatives.join("|"))
        }
        (SlotMatcher::Char { char }, MatchMode::Character) => regex::escape(&char.to_string()),
        (SlotMatcher::Char { char }, MatchMode::Phonetic) => {
            format!("{}[a-z]+{SEP_RE}", regex::escape(&char.to_string()))
        }
        (SlotMatcher::Set { chars, negated }, MatchMode::Character) => class(chars, *negated, ""),
        (SlotMatcher::Set { chars, negated }, MatchMode::Phonetic) => {
            format!("{}[a-z]+{SEP_RE}", class(chars, *negated, SEP_RE))
        }
        (SlotMatcher::Any, MatchMode::Character) => ".".to_string(),
        (SlotMatcher::Any, MatchMode::Phonetic) => format!("[^{SEP_RE}][a-z]+{SEP_RE}"),
    };
    let fragment = match (min, max) {
        (1, Some(1)) => cell,
        (min, Some(max)) if min == max => format!("(?:{cell}){{{min}}}"),
        (min, Some(max)) => format!("(?:{cell}){{{min},{max}}}"),
        (min, None) => format!("(?:{cell}){{{min},}}"),
    };
    CompiledSlot {
        matcher,
        min,
        max,
        fragment,
    }
}

fn class(chars: &[char], negated: bool, also_excluded: &str) -> String {
    let mut out = String::from("[");
    if negated {
        out.push('^');
        out.push_str(also_excluded);
    }
    for c in chars {
        out.push_str(&regex::escape(&c.to_string()));
    }
    out.push(']');
    out
}

fn hints(mode: MatchMode, anchored_start: bool, anchored_end: bool, slots: &[CompiledSlot]) -> Hints {
    let fixed_char = |slot: Option<&CompiledSlot>| match slot {
        Some(CompiledSlot {
            matcher: SlotMatcher::Char { char },
            min,
            ..
        }) if *min >= 1 => Some(*char),
        _ => None,
    };

    let mut required_chars: Vec<char> = Vec::new();
    for slot in slots {
        if let SlotMatcher::Char { char } = slot.matcher
            && slot.min >= 1
            && !required_chars.contains(&char)
        {
            required_chars.push(char);
        }
    }

    let anchored = anchored_start && anchored_end;
    let max_len = if anchored {
        slots
            .iter()
            .map(|slot| slot.max.map(|m| m as usize))
            .sum::<Option<usize>>()
    } else {
        None
    };

    let pinyin_key = if mode == MatchMode::Phonetic && anchored && !slots.is_empty() {
        slots
            .iter()
            .map(|slot| match &slot.matcher {
                SlotMatcher::Syllables { syllables, .. }
                    if syllables.len() == 1 && slot.min == 1 && slot.max == Some(1) =>
                {
                    Some(syllables[0].as_str())
                }
                _ => None,
            })
            .collect::<Option<Vec<&str>>>()
            .map(|parts| parts.join(" "))
    } else {
        None
    };

    Hints {
        min_len: slots.iter().map(|slot| slot.min as usize).sum(),
        max_len,
        first_char: if anchored_start { fixed_char(slots.first()) } else { None },
        last_char: if anchored_end { fixed_char(slots.last()) } else { None },
        required_chars,
        pinyin_key,
    }
}

fn is_run_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '@' | 'ü' | 'Ü' | '\'') || c.is_whitespace()
}

fn flush_run(run: &mut String, pieces: &mut Vec<Piece>) {
    if run.chars().any(|c| c.is_alphabetic() || c == '@') {
        pieces.push(Piece::once(Atom::Run(run.clone())));
    }
    run.clear();
}

fn parse(pattern: &str, mode: MatchMode, max_repeat: u32) -> Result<Parsed, SearchError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut parsed = Parsed::default();
    let mut run = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if mode == MatchMode::Phonetic && is_run_char(c) {
            run.push(c);
            i += 1;
            continue;
        }
        flush_run(&mut run, &mut parsed.pieces);

        match c {
            '^' if i == 0 => parsed.anchored_start = true,
            '^' => return Err(SearchError::invalid("^", "`^` is only allowed at the start")),
            '$' if i + 1 == chars.len() => parsed.anchored_end = true,
            '$' => return Err(SearchError::invalid("$", "`$` is only allowed at the end")),
            '(' | ')' | '|' => {
                return Err(SearchError::invalid(
                    c,
                    "groups and alternation are not supported",
                ));
            }
            '.' => parsed.pieces.push(Piece::once(Atom::Any)),
            '[' => {
                let (atom, next) = parse_set(&chars, i)?;
                parsed.pieces.push(Piece::once(atom));
                i = next;
                continue;
            }
            ']' => return Err(SearchError::invalid("]", "unmatched `]`")),
            '\\' => {
                let Some(&escaped) = chars.get(i + 1) else {
                    return Err(SearchError::invalid("\\", "dangling escape"));
                };
                parsed.pieces.push(Piece::once(Atom::Char(escaped)));
                i += 2;
                continue;
            }
            '*' => quantify(&mut parsed.pieces, "*", 0, None)?,
            '+' => quantify(&mut parsed.pieces, "+", 1, None)?,
            '?' => quantify(&mut parsed.pieces, "?", 0, Some(1))?,
            '{' => {
                let Some(close) = chars[i..].iter().position(|c| *c == '}').map(|p| i + p) else {
                    return Err(SearchError::invalid(
                        chars[i..].iter().collect::<String>(),
                        "unclosed quantifier",
                    ));
                };
                let token: String = chars[i..=close].iter().collect();
                let body: String = chars[i + 1..close].iter().collect();
                let (min, max) = parse_bounds(&token, &body, max_repeat)?;
                quantify(&mut parsed.pieces, &token, min, max)?;
                i = close + 1;
                continue;
            }
            '}' => return Err(SearchError::invalid("}", "unmatched `}`")),
            // whitespace is literal here; phonetic runs already absorbed theirs
            other => parsed.pieces.push(Piece::once(Atom::Char(other))),
        }
        i += 1;
    }
    flush_run(&mut run, &mut parsed.pieces);
    Ok(parsed)
}

/// Attach a quantifier to the previous piece. A `*` with nothing before it is
/// the unbounded wildcard.
fn quantify(
    pieces: &mut Vec<Piece>,
    token: &str,
    min: u32,
    max: Option<u32>,
) -> Result<(), SearchError> {
    match pieces.last_mut() {
        Some(piece) if !piece.quantified => {
            piece.min = min;
            piece.max = max;
            piece.quantified = true;
            Ok(())
        }
        Some(_) => Err(SearchError::invalid(token, "token is already quantified")),
        None if token == "*" => {
            pieces.push(Piece {
                atom: Atom::Any,
                min: 0,
                max: None,
                quantified: true,
            });
            Ok(())
        }
        None => Err(SearchError::invalid(token, "quantifier has nothing to repeat")),
    }
}

fn parse_bounds(token: &str, body: &str, max_repeat: u32) -> Result<(u32, Option<u32>), SearchError> {
    let bound = |raw: &str| {
        raw.trim()
            .parse::<u32>()
            .map_err(|_| SearchError::invalid(token, "quantifier bounds must be numbers"))
    };
    let (min, max) = match body.split_once(',') {
        None => {
            let n = bound(body)?;
            (n, Some(n))
        }
        Some((lo, hi)) if lo.trim().is_empty() && hi.trim().is_empty() => {
            return Err(SearchError::invalid(token, "empty quantifier"));
        }
        Some((lo, hi)) => {
            let min = if lo.trim().is_empty() { 0 } else { bound(lo)? };
            let max = if hi.trim().is_empty() {
                None
            } else {
                Some(bound(hi)?)
            };
            (min, max)
        }
    };
    if let Some(max) = max
        && min > max
    {
        return Err(SearchError::invalid(token, "lower bound exceeds upper bound"));
    }
    if min > max_repeat || max.is_some_and(|max| max > max_repeat) {
        return Err(SearchError::invalid(
            token,
            format!("repeat bound exceeds {max_repeat}"),
        ));
    }
    Ok((min, max))
}

/// Parse `[...]` starting at `start`; returns the atom and the index after `]`.
fn parse_set(chars: &[char], start: usize) -> Result<(Atom, usize), SearchError> {
    let mut i = start + 1;
    let negated = chars.get(i) == Some(&'^');
    if negated {
        i += 1;
    }
    let mut set = Vec::new();
    while let Some(&c) = chars.get(i) {
        match c {
            ']' => {
                if set.is_empty() {
                    return Err(SearchError::invalid(
                        chars[start..=i].iter().collect::<String>(),
                        "empty character set",
                    ));
                }
                return Ok((Atom::Set { chars: set, negated }, i + 1));
            }
            '\\' => {
                let Some(&escaped) = chars.get(i + 1) else {
                    break;
                };
                set.push(escaped);
                i += 2;
            }
            other => {
                if !set.contains(&other) {
                    set.push(other);
                }
                i += 1;
            }
        }
    }
    Err(SearchError::invalid(
        chars[start..].iter().collect::<String>(),
        "unclosed character set",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon_store::entry_from_record;
    use lexicon_types::RawRecord;

    fn entry(text: &str, readings: &[&str]) -> Entry {
        entry_from_record(&RawRecord {
            text: text.into(),
            category: Some("词语".into()),
            readings: readings.iter().map(|r| r.to_string()).collect(),
            ..RawRecord::default()
        })
        .unwrap()
    }

    fn phonetic(pattern: &str) -> CompiledPattern {
        compile(pattern, MatchMode::Phonetic, false, &Limits::default()).unwrap()
    }

    fn invalid_token(pattern: &str, mode: MatchMode) -> String {
        match compile(pattern, mode, false, &Limits::default()) {
            Err(SearchError::InvalidPattern { token, .. }) => token,
            other => panic!("expected InvalidPattern for {pattern:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_quantifiers_onto_previous_piece() {
        let parsed = parse("^天.{2,3}地*$", MatchMode::Character, 32).unwrap();
        assert!(parsed.anchored_start && parsed.anchored_end);
        let bounds: Vec<(u32, Option<u32>)> = parsed.pieces.iter().map(|p| (p.min, p.max)).collect();
        assert_eq!(bounds, [(1, Some(1)), (2, Some(3)), (0, None)]);

        let bare = parse("*", MatchMode::Character, 32).unwrap();
        assert_eq!(bare.pieces[0].atom, Atom::Any);
        assert_eq!((bare.pieces[0].min, bare.pieces[0].max), (0, None));

        let open_low = parse(".{,3}", MatchMode::Character, 32).unwrap();
        assert_eq!((open_low.pieces[0].min, open_low.pieces[0].max), (0, Some(3)));
    }

    #[test]
    fn rejects_malformed_patterns() {
        assert_eq!(invalid_token("a{3,1}", MatchMode::Character), "{3,1}");
        assert_eq!(invalid_token(".{2}{3}", MatchMode::Character), "{3}");
        assert_eq!(invalid_token(".**", MatchMode::Character), "*");
        assert_eq!(invalid_token("+", MatchMode::Character), "+");
        assert_eq!(invalid_token(".{99}", MatchMode::Character), "{99}");
        assert_eq!(invalid_token(".{2", MatchMode::Character), "{2");
        assert_eq!(invalid_token(".{}", MatchMode::Character), "{}");
        assert_eq!(invalid_token("天^", MatchMode::Character), "^");
        assert_eq!(invalid_token("天$地", MatchMode::Character), "$");
        assert_eq!(invalid_token("(天|地)", MatchMode::Character), "(");
        assert_eq!(invalid_token("[天", MatchMode::Character), "[天");
        assert_eq!(invalid_token("[]", MatchMode::Character), "[]");
        assert_eq!(invalid_token("天\\", MatchMode::Character), "\\");
        assert_eq!(invalid_token("^zzz$", MatchMode::Phonetic), "zzz");
    }

    #[test]
    fn runs_split_into_slots_and_quantify_the_last_one() {
        let compiled = phonetic("^zuoci.{2}$");
        let specs: Vec<(String, u32, Option<u32>)> = compiled
            .slots()
            .iter()
            .map(|slot| {
                let label = match &slot.matcher {
                    SlotMatcher::Syllables { spec, .. } => spec.clone(),
                    SlotMatcher::Any => ".".into(),
                    other => format!("{other:?}"),
                };
                (label, slot.min, slot.max)
            })
            .collect();
        assert_eq!(
            specs,
            [
                ("zuo".to_string(), 1, Some(1)),
                ("ci".to_string(), 1, Some(1)),
                (".".to_string(), 2, Some(2)),
            ]
        );
        assert_eq!(compiled.hints().min_len, 4);
        assert_eq!(compiled.hints().max_len, Some(4));

        let quantified_run = phonetic("^xin{2}$");
        assert_eq!(quantified_run.slots()[0].min, 2);
    }

    #[test]
    fn hints_follow_anchors() {
        let limits = Limits::default();
        let anchored = compile("^天.地$", MatchMode::Character, false, &limits).unwrap();
        assert_eq!(anchored.hints().first_char, Some('天'));
        assert_eq!(anchored.hints().last_char, Some('地'));
        assert_eq!(anchored.hints().required_chars, vec!['天', '地']);
        assert_eq!(anchored.hints().max_len, Some(3));

        let floating = compile("天.*", MatchMode::Character, false, &limits).unwrap();
        assert_eq!(floating.hints().first_char, None);
        assert_eq!(floating.hints().max_len, None);
        assert_eq!(floating.hints().min_len, 1);

        assert_eq!(phonetic("^zhongguo$").hints().pinyin_key.as_deref(), Some("zhong guo"));
        assert_eq!(phonetic("zhongguo").hints().pinyin_key, None);
        assert_eq!(phonetic("^t@cai$").hints().pinyin_key, None);
    }

    #[test]
    fn phonetic_slots_never_split_syllables() {
        let zhongguo = entry("中国", &["zhōng guó"]);
        assert_eq!(
            phonetic_haystack(&zhongguo, &zhongguo.readings[0]),
            "\u{1F}中zhong\u{1F}国guo\u{1F}"
        );

        assert!(phonetic("^zhongguo$").is_match(&zhongguo));
        assert!(phonetic("guo$").is_match(&zhongguo));
        // `hong` is a suffix of `zhong`, not a whole syllable
        assert!(!phonetic("hongguo").is_match(&zhongguo));
        assert!(phonetic("^..$").is_match(&zhongguo));
        assert!(!phonetic("^.$").is_match(&zhongguo));
        assert!(phonetic("^中guo$").is_match(&zhongguo));
        assert!(!phonetic("^国.$").is_match(&zhongguo));
        assert!(phonetic("^[中华]g@$").is_match(&zhongguo));
        assert!(!phonetic("^[^中]g@$").is_match(&zhongguo));
    }

    #[test]
    fn polyphonic_entries_match_through_any_reading() {
        let zhaoyang = entry("朝阳", &["zhāo yáng", "cháo yáng"]);
        let compiled = phonetic("^chaoyang$");
        assert!(compiled.is_match(&zhaoyang));
        let readings: Vec<String> = compiled
            .matching_readings(&zhaoyang)
            .map(|r| r.untoned())
            .collect();
        assert_eq!(readings, ["chao yang"]);
    }

    #[test]
    fn character_mode_keeps_inner_whitespace() {
        let compiled = compile("天 才", MatchMode::Character, false, &Limits::default()).unwrap();
        assert_eq!(compiled.slots().len(), 3);
        assert_eq!(compiled.hints().required_chars, vec!['天', ' ', '才']);
        assert!(!compiled.is_match(&entry("天才", &["tiān cái"])));

        let spaced = phonetic("zhong guo");
        assert_eq!(spaced.slots().len(), 2);
    }

    #[test]
    fn oversized_regex_is_reported_separately() {
        let limits = Limits {
            max_regex_bytes: 1024,
            ..Limits::default()
        };
        match compile("^.{32}$", MatchMode::Phonetic, false, &limits) {
            Err(SearchError::PatternTooLarge { pattern, limit }) => {
                assert_eq!(pattern, "^.{32}$");
                assert_eq!(limit, 1024);
            }
            other => panic!("expected PatternTooLarge, got {other:?}"),
        }
        assert!(compile("^.{32}$", MatchMode::Phonetic, false, &Limits::default()).is_ok());
    }

    #[test]
    fn character_mode_treats_letters_literally() {
        let compiled = compile("^zhong$", MatchMode::Character, false, &Limits::default()).unwrap();
        assert!(!compiled.is_match(&entry("中", &["zhōng"])));
        assert_eq!(compiled.regex_str(), r"\Azhong\z");
    }
}
