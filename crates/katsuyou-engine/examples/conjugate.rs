use std::env;

use anyhow::{Context, Result, bail};
use katsuyou_engine::{align_furigana, classify, conjugate_all};
use katsuyou_types::{LexicalEntry, VerbGroup};

const USAGE: &str =
    "usage: cargo run -p katsuyou-engine --example conjugate -- <word> <reading> [group]";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let word = args.next().context(USAGE)?;
    let reading = args.next().context(USAGE)?;
    let group = args
        .next()
        .map(|g| g.parse::<VerbGroup>())
        .transpose()
        .context("group must be ichidan, godan, irregular_suru or irregular_kuru")?;
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let entry = LexicalEntry::verb(&word, &reading, group);
    let group = classify(&entry).with_context(|| format!("classifying {word}"))?;
    println!("{word} ({reading}) is {group}");

    for (form, result) in conjugate_all(&entry)? {
        let ruby: Vec<String> = align_furigana(&result.surface, &result.reading)
            .into_iter()
            .map(|s| {
                if s.has_reading() {
                    format!("{}[{}]", s.text, s.reading)
                } else {
                    s.text
                }
            })
            .collect();
        println!(
            "{:<2} {:<22} {:<14} {:<24} {}",
            form.phase().number(),
            form.label(),
            result.surface,
            ruby.concat(),
            result.romaji.unwrap_or_default()
        );
    }
    Ok(())
}
