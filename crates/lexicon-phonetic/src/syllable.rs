use lexicon_types::{Reading, Syllable};
use unicode_normalization::UnicodeNormalization;

use crate::PhoneticError;
use crate::tables::split_syllable;

/// Parse one pinyin syllable written with tone marks (`zhōng`), tone digits
/// (`zhong1`) or no tone at all (neutral, tone 5).
pub fn parse_syllable(raw: &str) -> Result<Syllable, PhoneticError> {
    let invalid = || PhoneticError::InvalidSyllable {
        raw: raw.to_string(),
    };

    let mut letters = String::with_capacity(raw.len());
    let mut tone = None;
    for c in raw.trim().nfd() {
        match c {
            'a'..='z' => letters.push(c),
            'A'..='Z' => letters.push(c.to_ascii_lowercase()),
            '\u{0304}' => tone = Some(1),
            '\u{0301}' => tone = Some(2),
            '\u{030C}' => tone = Some(3),
            '\u{0300}' => tone = Some(4),
            // ü, either as a diaeresis or the `u:` spelling
            '\u{0308}' | ':' if letters.ends_with('u') => {
                letters.pop();
                letters.push('v');
            }
            // ê
            '\u{0302}' => {}
            '1'..='4' if !letters.is_empty() => tone = Some(c as u8 - b'0'),
            '0' | '5' if !letters.is_empty() => tone = Some(5),
            _ => return Err(invalid()),
        }
    }
    if letters.is_empty() {
        return Err(invalid());
    }

    let (initial, final_) = split_syllable(&letters);
    Ok(Syllable {
        initial: initial.to_string(),
        final_: final_.to_string(),
        tone: tone.unwrap_or(5),
    })
}

/// Parse a whitespace separated reading such as `zhāo yáng`.
pub fn parse_reading(raw: &str) -> Result<Reading, PhoneticError> {
    let syllables = raw
        .split_whitespace()
        .map(parse_syllable)
        .collect::<Result<Vec<_>, _>>()?;
    if syllables.is_empty() {
        return Err(PhoneticError::InvalidSyllable {
            raw: raw.to_string(),
        });
    }
    Ok(Reading { syllables })
}
