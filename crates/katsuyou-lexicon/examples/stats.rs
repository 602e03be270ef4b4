use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use katsuyou_lexicon::{EntryFilter, Lexicon, LoadMode};
use katsuyou_types::{Group, JlptLevel, VerbGroup, WordKind};

fn main() -> Result<()> {
    let lexicon = match env::args().nth(1).map(PathBuf::from) {
        Some(path) => Lexicon::load_with_mode(&path, LoadMode::Mmap)
            .with_context(|| format!("loading lexicon from {}", path.display()))?,
        None => Lexicon::builtin()?,
    };

    println!("Entries      : {}", lexicon.len());
    for kind in [WordKind::Verb, WordKind::Adjective] {
        let selection = lexicon.select(&EntryFilter {
            kinds: &[kind],
            ..EntryFilter::default()
        });
        println!("{:<13}: {}", kind.id(), selection.total);
    }
    for level in JlptLevel::ALL {
        let selection = lexicon.select(&EntryFilter {
            levels: &[level],
            ..EntryFilter::default()
        });
        println!("{:<13}: {}", level.id(), selection.total);
    }
    for group in VerbGroup::ALL {
        let groups = [Group::Verb(group)];
        let selection = lexicon.select(&EntryFilter {
            groups: &groups,
            ..EntryFilter::default()
        });
        println!("{:<13}: {}", group.id(), selection.total);
    }
    println!("Heuristic disagreements: {}", lexicon.mismatch_count());

    let table = lexicon.conjugation_table();
    let failures: Vec<_> = table.iter().filter(|(_, forms)| forms.is_err()).collect();
    let forms: usize = table
        .iter()
        .filter_map(|(_, forms)| forms.as_ref().ok())
        .map(Vec::len)
        .sum();
    println!("Verb forms computed: {forms}");
    for (entry, err) in failures {
        if let Err(err) = err {
            println!("  failed {}: {err}", entry.dictionary_form);
        }
    }

    Ok(())
}
