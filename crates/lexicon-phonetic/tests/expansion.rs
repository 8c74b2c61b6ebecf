use lexicon_phonetic::{
    Expander, Expansion, PhoneticError, SlotSpec, abbreviation_variants, parse_reading,
    segment_run,
};

fn expand_run(run: &str, homophone: bool) -> Vec<Expansion> {
    let slots = segment_run(run).expect("segment");
    Expander::new(homophone).expand_all(&slots).expect("expand")
}

#[test]
fn open_final_wildcard_before_fixed_syllable() {
    let expansions = expand_run("t@cai", false);
    assert_eq!(expansions.len(), 2);
    assert_eq!(expansions[1], Expansion::Syllables(vec!["cai".into()]));

    let Expansion::Syllables(first) = &expansions[0] else {
        panic!("t@ should enumerate");
    };
    for expected in ["tian", "ten", "ta", "tu"] {
        assert!(first.contains(&expected.to_string()), "{expected}");
    }
    for absent in ["tiang", "tv", "tong1"] {
        assert!(!first.contains(&absent.to_string()), "{absent}");
    }
}

#[test]
fn homophone_open_final_covers_confusable_initials() {
    let expansions = expand_run("h@", true);
    assert!(expansions[0].accepts("hao"));
    assert!(expansions[0].accepts("fang"));
    assert!(!expansions[0].accepts("gao"));
}

#[test]
fn parsed_readings_feed_expansions() {
    let reading = parse_reading("zuò cí zuò qǔ").unwrap();
    let expansions = expand_run("zuoci", false);
    for (slot, syllable) in expansions.iter().zip(&reading.syllables) {
        assert!(slot.accepts(&syllable.untoned()));
    }
}

#[test]
fn initials_abbreviation_variants() {
    let variants = abbreviation_variants("zgcd", 512).unwrap();
    for expected in ["zgcd", "cgcd", "sgcd", "zgsd"] {
        assert!(variants.iter().any(|v| v == expected), "{expected}");
    }
    assert!(matches!(
        abbreviation_variants("zcszcszc", 512),
        Err(PhoneticError::ExpansionTooLarge { .. })
    ));
}

#[test]
fn slot_specs_render_like_the_pattern_syntax() {
    let rendered: Vec<String> = segment_run("zh@ guo")
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(rendered, ["zh@", "guo"]);
    assert_eq!(SlotSpec::Any.to_string(), ".");
}
