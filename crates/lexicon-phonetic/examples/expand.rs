use std::env;

use anyhow::{Context, Result, bail};
use lexicon_phonetic::{Expander, Expansion, abbreviation_variants, segment_run};

const USAGE: &str = "usage: cargo run -p lexicon-phonetic --example expand -- <run> [--homophone]";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let run = args.next().context(USAGE)?;
    let homophone = match args.next().as_deref() {
        None => false,
        Some("--homophone") => true,
        Some(other) => bail!("unexpected argument {other:?}\n{USAGE}"),
    };

    let slots = segment_run(&run).with_context(|| format!("segmenting {run:?}"))?;
    let expander = Expander::new(homophone);

    println!("Run: {run} (homophone: {homophone})");
    for slot in &slots {
        match expander.expand(slot)? {
            Expansion::Any => println!("  {:<8} any syllable", slot.to_string()),
            Expansion::Syllables(list) => {
                println!("  {:<8} {} syllables", slot.to_string(), list.len());
                println!("           {}", list.join(" "));
            }
        }
    }

    if homophone && run.bytes().all(|b| b.is_ascii_lowercase()) {
        let variants = abbreviation_variants(&run, 512)?;
        println!("\nAs initials: {}", variants.join(" "));
    }

    Ok(())
}
