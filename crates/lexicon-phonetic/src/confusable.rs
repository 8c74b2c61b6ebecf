//! Sound classes that speakers commonly confuse.
//!
//! Two tables apply at different levels. Syllable slots are closed over
//! initial and final classes (`zh`/`z`, `ang`/`an`). Initials strings are
//! closed letter by letter over [`ABBREVIATION_CLASSES`], where `z`, `c` and
//! `s` also stand for `zh`, `ch` and `sh`.

use std::collections::BTreeSet;

use crate::PhoneticError;

pub const INITIAL_CLASSES: &[&[&str]] = &[
    &["z", "zh"],
    &["c", "ch"],
    &["s", "sh"],
    &["n", "l"],
    &["f", "h"],
];

pub const FINAL_CLASSES: &[&[&str]] = &[
    &["an", "ang"],
    &["en", "eng"],
    &["in", "ing"],
    &["ian", "iang"],
    &["uan", "uang"],
];

pub const ABBREVIATION_CLASSES: &[&[char]] = &[&['z', 'c', 's'], &['n', 'l'], &['f', 'h']];

fn close<'a>(classes: &[&[&'a str]], member: &'a str) -> Vec<&'a str> {
    classes
        .iter()
        .find(|class| class.contains(&member))
        .map(|class| class.to_vec())
        .unwrap_or_else(|| vec![member])
}

/// Initials confusable with `initial`, itself included.
pub fn close_initial(initial: &str) -> Vec<&str> {
    close(INITIAL_CLASSES, initial)
}

/// Finals confusable with `final_`, itself included.
pub fn close_final(final_: &str) -> Vec<&str> {
    close(FINAL_CLASSES, final_)
}

/// Letters confusable with an abbreviation letter, itself included.
pub fn abbreviation_class(letter: char) -> Vec<char> {
    ABBREVIATION_CLASSES
        .iter()
        .find(|class| class.contains(&letter))
        .map(|class| class.to_vec())
        .unwrap_or_else(|| vec![letter])
}

/// Every initials string reachable by swapping letters within their class.
///
/// The variant count is the product of the class sizes; it is checked against
/// `bound` before anything is generated. The result is sorted.
pub fn abbreviation_variants(initials: &str, bound: usize) -> Result<Vec<String>, PhoneticError> {
    let classes: Vec<Vec<char>> = initials
        .chars()
        .map(|c| abbreviation_class(c.to_ascii_lowercase()))
        .collect();
    let size = classes
        .iter()
        .fold(1usize, |acc, class| acc.saturating_mul(class.len()));
    if size > bound {
        return Err(PhoneticError::ExpansionTooLarge {
            slot: initials.to_string(),
            size,
            bound,
        });
    }

    let mut variants = vec![String::new()];
    for class in &classes {
        variants = variants
            .iter()
            .flat_map(|prefix| {
                class.iter().map(move |c| {
                    let mut next = prefix.clone();
                    next.push(*c);
                    next
                })
            })
            .collect();
    }
    Ok(variants
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect())
}
