//! Verb and adjective datasets for the katsuyou engine.
//!
//! A lexicon is a JSON document with `verbs` and `adjectives` arrays of
//! authored records. Loading validates every record (group identifiers, JLPT
//! tags, duplicate dictionary forms), resolves a group for entries that were
//! authored without one, and builds a bitset index for selecting entries by
//! level, kind and group. Callers choose between memory-mapped files or owned
//! buffers at runtime via [`LoadMode`].
//!
//! # Example
//! ```
//! use katsuyou_lexicon::{EntryFilter, Lexicon};
//! use katsuyou_types::{JlptLevel, WordKind};
//!
//! # fn main() -> anyhow::Result<()> {
//! let lexicon = Lexicon::builtin()?;
//! let taberu = lexicon.verb("食べる").expect("bundled verb");
//! assert_eq!(taberu.reading, "たべる");
//!
//! let page = lexicon.select(&EntryFilter {
//!     levels: &[JlptLevel::N5],
//!     kinds: &[WordKind::Adjective],
//!     page_size: 5,
//!     ..EntryFilter::default()
//! });
//! assert!(page.items.len() <= 5);
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p katsuyou-lexicon --example stats -- [lexicon.json]`.

mod index;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use katsuyou_engine::{
    ConjugationError, classify, classify_adjective, conjugate_all, guess_verb_group,
    strip_na_marker, to_romaji,
};
use katsuyou_types::{
    AdjectiveType, ConjugationForm, ConjugationResult, Group, JlptLevel, LexicalEntry, VerbGroup,
    WordKind,
};
use memmap2::Mmap;
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info};

pub use index::EntryFilter;
use index::SelectionIndex;

const BUILTIN: &[u8] = include_bytes!("../data/lexicon.json");

/// Strategy for reading a lexicon file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file and parse straight out of the mapping.
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

impl std::str::FromStr for LoadMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mmap" => Ok(LoadMode::Mmap),
            "owned" => Ok(LoadMode::Owned),
            other => bail!("unknown load mode {other:?} (expected mmap or owned)"),
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Deserialize)]
struct RawLexicon {
    #[serde(default)]
    verbs: Vec<RawEntry>,
    #[serde(default)]
    adjectives: Vec<RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    dictionary_form: String,
    #[serde(default)]
    reading: String,
    #[serde(default)]
    romaji: String,
    #[serde(default)]
    meaning: String,
    #[serde(default)]
    group: Option<String>,
    jlpt: String,
    #[serde(default)]
    transitive: Option<bool>,
}

impl RawEntry {
    fn into_entry(self, kind: WordKind) -> Result<LexicalEntry> {
        let dictionary_form = self.dictionary_form.trim().to_string();
        if dictionary_form.is_empty() {
            bail!("{kind} with an empty dictionary form");
        }
        let group = match (kind, self.group.as_deref()) {
            (_, None) => None,
            (WordKind::Verb, Some(g)) => Some(Group::Verb(
                g.parse::<VerbGroup>()
                    .with_context(|| format!("verb {dictionary_form}"))?,
            )),
            (WordKind::Adjective, Some(g)) => Some(Group::Adjective(
                g.parse::<AdjectiveType>()
                    .with_context(|| format!("adjective {dictionary_form}"))?,
            )),
        };
        let jlpt = self
            .jlpt
            .parse::<JlptLevel>()
            .with_context(|| format!("{kind} {dictionary_form}"))?;
        let reading = self.reading.trim().to_string();
        let romaji = if self.romaji.is_empty() {
            to_romaji(if reading.is_empty() { &dictionary_form } else { &reading })
        } else {
            self.romaji
        };
        Ok(LexicalEntry {
            dictionary_form,
            reading,
            romaji,
            meaning: self.meaning,
            kind,
            group,
            jlpt,
            transitive: self.transitive,
        })
    }
}

/// One page of entries matching an [`EntryFilter`].
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub total: usize,
    pub items: Vec<&'a LexicalEntry>,
    pub has_more: bool,
}

/// All verb forms for one entry, or the reason they could not be built.
pub type ConjugationRow<'a> = (
    &'a LexicalEntry,
    Result<Vec<(ConjugationForm, ConjugationResult)>, ConjugationError>,
);

/// Immutable, validated set of lexical entries.
pub struct Lexicon {
    entries: Vec<LexicalEntry>,
    groups: Vec<Group>,
    verbs: HashMap<String, usize>,
    adjectives: HashMap<String, usize>,
    index: SelectionIndex,
    mismatches: usize,
}

impl Lexicon {
    /// Load a lexicon file using memory-mapped I/O.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    /// Load a lexicon file with the chosen backing strategy.
    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let buffer = load_file(path, mode)?;
        let lexicon = Self::from_json(buffer.as_slice())
            .with_context(|| format!("parsing {}", path.display()))?;
        info!(
            "loaded {} entries from {} ({mode:?})",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// The N5/N4 dataset compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN).context("parsing bundled lexicon")
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let raw: RawLexicon = serde_json::from_slice(bytes).context("invalid lexicon json")?;
        let mut entries = Vec::with_capacity(raw.verbs.len() + raw.adjectives.len());
        for record in raw.verbs {
            entries.push(record.into_entry(WordKind::Verb)?);
        }
        for record in raw.adjectives {
            entries.push(record.into_entry(WordKind::Adjective)?);
        }
        Self::from_entries(entries)
    }

    /// Validate authored entries and build the lookup tables.
    pub fn from_entries(entries: Vec<LexicalEntry>) -> Result<Self> {
        let mut verbs = HashMap::new();
        let mut adjectives = HashMap::new();
        let mut groups = Vec::with_capacity(entries.len());
        let mut keys = Vec::with_capacity(entries.len());
        let mut mismatches = 0usize;

        for (idx, entry) in entries.iter().enumerate() {
            let group = match entry.kind {
                WordKind::Verb => {
                    let resolved = classify(entry)
                        .with_context(|| format!("verb {}", entry.dictionary_form))?;
                    if let Some(authored) = entry.verb_group()
                        && let Some(guess) =
                            guess_verb_group(&entry.dictionary_form, &entry.reading)
                        && guess != authored
                    {
                        mismatches += 1;
                    }
                    if verbs.insert(entry.dictionary_form.clone(), idx).is_some() {
                        bail!("duplicate verb {}", entry.dictionary_form);
                    }
                    Group::Verb(resolved)
                }
                WordKind::Adjective => {
                    let resolved = classify_adjective(entry)
                        .with_context(|| format!("adjective {}", entry.dictionary_form))?;
                    let key = strip_na_marker(&entry.dictionary_form).to_string();
                    if adjectives.insert(key, idx).is_some() {
                        bail!("duplicate adjective {}", entry.dictionary_form);
                    }
                    Group::Adjective(resolved)
                }
            };
            groups.push(group);
            keys.push((entry.jlpt, entry.kind, group));
        }

        if mismatches > 0 {
            info!("{mismatches} verbs disagree with the suffix heuristic (authored group kept)");
        }
        debug!(
            "indexed {} verbs and {} adjectives",
            verbs.len(),
            adjectives.len()
        );

        Ok(Self {
            index: SelectionIndex::build(&keys),
            entries,
            groups,
            verbs,
            adjectives,
            mismatches,
        })
    }

    pub fn entries(&self) -> &[LexicalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn verb(&self, dictionary_form: &str) -> Option<&LexicalEntry> {
        self.verbs
            .get(dictionary_form.trim())
            .map(|idx| &self.entries[*idx])
    }

    pub fn adjective(&self, dictionary_form: &str) -> Option<&LexicalEntry> {
        self.adjectives
            .get(strip_na_marker(dictionary_form))
            .map(|idx| &self.entries[*idx])
    }

    /// Look up by kind, or try verbs first and then adjectives.
    pub fn get(&self, kind: Option<WordKind>, dictionary_form: &str) -> Option<&LexicalEntry> {
        match kind {
            Some(WordKind::Verb) => self.verb(dictionary_form),
            Some(WordKind::Adjective) => self.adjective(dictionary_form),
            None => self
                .verb(dictionary_form)
                .or_else(|| self.adjective(dictionary_form)),
        }
    }

    /// Group of an entry after resolution (authored, or inferred at load).
    pub fn group_of(&self, entry: &LexicalEntry) -> Option<Group> {
        let idx = match entry.kind {
            WordKind::Verb => self.verbs.get(&entry.dictionary_form)?,
            WordKind::Adjective => self
                .adjectives
                .get(strip_na_marker(&entry.dictionary_form))?,
        };
        self.groups.get(*idx).copied()
    }

    /// Verbs whose authored group differs from the suffix heuristic.
    pub fn mismatch_count(&self) -> usize {
        self.mismatches
    }

    /// Every entry passing `filter`, ignoring its paging fields.
    pub fn matching(&self, filter: &EntryFilter<'_>) -> Vec<&LexicalEntry> {
        self.index
            .candidates(filter)
            .iter_ones()
            .filter_map(|idx| self.entries.get(idx))
            .collect()
    }

    /// One page (1-based) of entries passing `filter`.
    pub fn select(&self, filter: &EntryFilter<'_>) -> Selection<'_> {
        let candidates = self.index.candidates(filter);
        let total = candidates.count_ones();
        let offset = filter
            .page
            .saturating_sub(1)
            .saturating_mul(filter.page_size);
        let items: Vec<&LexicalEntry> = candidates
            .iter_ones()
            .skip(offset)
            .take(filter.page_size)
            .filter_map(|idx| self.entries.get(idx))
            .collect();
        let has_more = offset + items.len() < total;
        Selection {
            total,
            items,
            has_more,
        }
    }

    /// Every form of every verb, computed in parallel across entries.
    pub fn conjugation_table(&self) -> Vec<ConjugationRow<'_>> {
        self.entries
            .par_iter()
            .filter(|entry| entry.kind == WordKind::Verb)
            .map(|entry| (entry, conjugate_all(entry)))
            .collect()
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lexicon_loads_and_conjugates() {
        let lexicon = Lexicon::builtin().expect("bundled lexicon");
        assert!(lexicon.len() > 40);
        for (entry, forms) in lexicon.conjugation_table() {
            let forms = forms.unwrap_or_else(|e| panic!("{}: {e}", entry.dictionary_form));
            assert_eq!(forms.len(), ConjugationForm::ALL.len());
        }
    }

    #[test]
    fn builtin_covers_irregulars_and_exceptions() {
        let lexicon = Lexicon::builtin().unwrap();
        for verb in ["する", "来る", "行く", "ある", "勉強する"] {
            assert!(lexicon.verb(verb).is_some(), "{verb}");
        }
        assert!(lexicon.adjective("いい").is_some());
        assert!(lexicon.adjective("静か").is_some());
        assert_eq!(
            lexicon.group_of(lexicon.verb("帰る").unwrap()),
            Some(Group::Verb(VerbGroup::Godan))
        );
        assert!(lexicon.mismatch_count() >= 1);
    }

    #[test]
    fn missing_romaji_is_derived_from_reading() {
        let lexicon = Lexicon::from_json(
            r#"{"verbs": [{"dictionary_form": "書く", "reading": "かく", "jlpt": "N5"}]}"#.as_bytes(),
        )
        .unwrap();
        let kaku = lexicon.verb("書く").unwrap();
        assert_eq!(kaku.romaji, "kaku");
        assert_eq!(kaku.group, None);
        assert_eq!(lexicon.group_of(kaku), Some(Group::Verb(VerbGroup::Godan)));
    }

    #[test]
    fn rejects_bad_records() {
        let unknown_group =
            r#"{"verbs": [{"dictionary_form": "書く", "reading": "かく", "group": "nidan", "jlpt": "N5"}]}"#.as_bytes();
        assert!(Lexicon::from_json(unknown_group).is_err());

        let adjective_group_on_verb =
            r#"{"verbs": [{"dictionary_form": "書く", "reading": "かく", "group": "i", "jlpt": "N5"}]}"#.as_bytes();
        assert!(Lexicon::from_json(adjective_group_on_verb).is_err());

        let duplicate = r#"{"verbs": [
            {"dictionary_form": "書く", "reading": "かく", "jlpt": "N5"},
            {"dictionary_form": "書く", "reading": "かく", "jlpt": "N4"}
        ]}"#.as_bytes();
        assert!(Lexicon::from_json(duplicate).is_err());

        let bad_level = r#"{"adjectives": [{"dictionary_form": "高い", "jlpt": "N9"}]}"#.as_bytes();
        assert!(Lexicon::from_json(bad_level).is_err());

        let unclassifiable = r#"{"adjectives": [{"dictionary_form": "元気", "jlpt": "N5"}]}"#.as_bytes();
        assert!(Lexicon::from_json(unclassifiable).is_err());
    }

    #[test]
    fn parses_load_modes() {
        assert_eq!("mmap".parse::<LoadMode>().unwrap(), LoadMode::Mmap);
        assert_eq!("OWNED".parse::<LoadMode>().unwrap(), LoadMode::Owned);
        assert!("disk".parse::<LoadMode>().is_err());
    }
}
