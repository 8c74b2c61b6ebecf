//! Readings for records that arrive without pinyin.
//!
//! Each character contributes every dictionary pronunciation it has, and the
//! readings are the combinations of those, most common pronunciation first.

use lexicon_phonetic::parse_syllable;
use pinyin::ToPinyinMulti;

/// Combinations kept per entry. Long entries full of heteronyms would
/// otherwise multiply out.
pub const MAX_DERIVED_READINGS: usize = 16;

/// Toned readings (`zhāo yáng`) for `text`, at most `bound` of them.
///
/// Empty when a character has no known pronunciation (punctuation, Latin
/// letters), since such text cannot carry one syllable per character.
pub fn derive_readings(text: &str, bound: usize) -> Vec<String> {
    let mut per_char: Vec<Vec<&'static str>> = Vec::new();
    for multi in text.to_pinyin_multi() {
        let Some(multi) = multi else {
            return Vec::new();
        };
        let options: Vec<&'static str> = multi
            .into_iter()
            .map(|p| p.with_tone())
            .filter(|s| parse_syllable(s).is_ok())
            .collect();
        if options.is_empty() {
            return Vec::new();
        }
        per_char.push(options);
    }
    if per_char.is_empty() || bound == 0 {
        return Vec::new();
    }

    let mut readings = vec![String::new()];
    for options in &per_char {
        let mut next = Vec::with_capacity(bound.min(readings.len() * options.len()));
        'fill: for prefix in &readings {
            for option in options {
                if next.len() == bound {
                    break 'fill;
                }
                let mut reading = prefix.clone();
                if !reading.is_empty() {
                    reading.push(' ');
                }
                reading.push_str(option);
                next.push(reading);
            }
        }
        readings = next;
    }
    readings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heteronyms_multiply_out() {
        let readings = derive_readings("朝阳", MAX_DERIVED_READINGS);
        assert!(readings.iter().any(|r| r == "zhāo yáng"), "{readings:?}");
        assert!(readings.iter().any(|r| r == "cháo yáng"), "{readings:?}");
        assert!(readings.iter().all(|r| r.split(' ').count() == 2));
    }

    #[test]
    fn unknown_characters_yield_nothing() {
        assert!(derive_readings("一不做，二不休", MAX_DERIVED_READINGS).is_empty());
        assert!(derive_readings("abc", MAX_DERIVED_READINGS).is_empty());
        assert!(derive_readings("", MAX_DERIVED_READINGS).is_empty());
    }

    #[test]
    fn product_is_bounded() {
        let all = derive_readings("中中中中", 1000);
        assert!(all.len() > 2);
        let capped = derive_readings("中中中中", 2);
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0], all[0]);
    }
}
