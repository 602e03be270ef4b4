//! Stem tables and the stem generator primitives.
//!
//! Every stem is produced twice, once over the dictionary spelling and once
//! over the reading, so that kanji stay in place on the surface while the
//! reading carries the pronunciation.

use katsuyou_types::{ConjugationForm, ConjugationResult, LexicalEntry, StemRow};

use crate::error::ConjugationError;
use crate::kana::{contains_kanji, to_romaji};

/// Godan ending → `[a, i, u, e, o]` row variants.
#[rustfmt::skip]
pub const STEM_TABLE: [(char, [&str; 5]); 9] = [
    ('う', ["わ", "い", "う", "え", "お"]),
    ('く', ["か", "き", "く", "け", "こ"]),
    ('ぐ', ["が", "ぎ", "ぐ", "げ", "ご"]),
    ('す', ["さ", "し", "す", "せ", "そ"]),
    ('つ', ["た", "ち", "つ", "て", "と"]),
    ('ぬ', ["な", "に", "ぬ", "ね", "の"]),
    ('ぶ', ["ば", "び", "ぶ", "べ", "ぼ"]),
    ('む', ["ま", "み", "む", "め", "も"]),
    ('る', ["ら", "り", "る", "れ", "ろ"]),
];

/// て/た cluster replacing a godan ending (gemination, nasalization, イ音便).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SoundChange {
    pub te: &'static str,
    pub ta: &'static str,
}

const fn sc(te: &'static str, ta: &'static str) -> SoundChange {
    SoundChange { te, ta }
}

#[rustfmt::skip]
pub const SOUND_CHANGE_TABLE: [(char, SoundChange); 9] = [
    ('う', sc("って", "った")),
    ('つ', sc("って", "った")),
    ('る', sc("って", "った")),
    ('む', sc("んで", "んだ")),
    ('ぶ', sc("んで", "んだ")),
    ('ぬ', sc("んで", "んだ")),
    ('く', sc("いて", "いた")),
    ('ぐ', sc("いで", "いだ")),
    ('す', sc("して", "した")),
];

pub fn godan_row(ending: char, row: StemRow) -> Option<&'static str> {
    STEM_TABLE
        .iter()
        .find(|(c, _)| *c == ending)
        .map(|(_, rows)| rows[row.index()])
}

pub fn sound_change(ending: char) -> Option<SoundChange> {
    SOUND_CHANGE_TABLE
        .iter()
        .find(|(c, _)| *c == ending)
        .map(|(_, change)| *change)
}

pub fn is_godan_ending(c: char) -> bool {
    STEM_TABLE.iter().any(|(ending, _)| *ending == c)
}

/// Which stem a rule asks the generator for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StemSelector {
    /// Row variant (godan), bare base (ichidan), row override (irregular).
    Row(StemRow),
    /// Stem including the て cluster.
    Te,
    /// Stem including the た cluster.
    Ta,
    /// The dictionary form unchanged.
    Dictionary,
    /// Lexical replacement of the inflecting tail, e.g. する → でき.
    Lexical {
        surface: &'static str,
        reading: &'static str,
    },
    /// Another form's result minus its final る.
    Derived(ConjugationForm),
}

/// Borrowed `(spelling, reading)` pair in dictionary form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Word<'a> {
    pub surface: &'a str,
    pub reading: &'a str,
}

impl<'a> Word<'a> {
    /// Validate a dictionary form. A missing reading is accepted for kana-only
    /// spellings, where the spelling is its own reading.
    pub fn new(surface: &'a str, reading: &'a str) -> Result<Self, ConjugationError> {
        let surface = surface.trim();
        let reading = reading.trim();
        if surface.is_empty() {
            return Err(ConjugationError::malformed(surface, "empty dictionary form"));
        }
        if reading.is_empty() {
            if contains_kanji(surface) {
                return Err(ConjugationError::malformed(
                    surface,
                    "kanji spelling without a reading",
                ));
            }
            return Ok(Self {
                surface,
                reading: surface,
            });
        }
        Ok(Self { surface, reading })
    }

    pub fn from_entry(entry: &'a LexicalEntry) -> Result<Self, ConjugationError> {
        Self::new(&entry.dictionary_form, &entry.reading)
    }

    pub(crate) fn last_char(&self) -> Option<char> {
        self.surface.chars().next_back()
    }

    /// Drop the final character of both spellings; they must agree on it.
    pub(crate) fn okurigana_base(&self) -> Result<(&'a str, &'a str, char), ConjugationError> {
        let (Some(ending), Some(reading_ending)) =
            (self.last_char(), self.reading.chars().next_back())
        else {
            return Err(ConjugationError::malformed(self.surface, "empty dictionary form"));
        };
        if ending != reading_ending {
            return Err(ConjugationError::malformed(
                self.surface,
                "dictionary form and reading end differently",
            ));
        }
        Ok((
            drop_chars(self.surface, 1),
            drop_chars(self.reading, 1),
            ending,
        ))
    }
}

/// Stem text on both tiers; suffixes are attached to produce a result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stem {
    pub surface: String,
    pub reading: String,
}

impl Stem {
    pub(crate) fn new(surface_base: &str, reading_base: &str, surface: &str, reading: &str) -> Self {
        Self {
            surface: format!("{surface_base}{surface}"),
            reading: format!("{reading_base}{reading}"),
        }
    }

    pub(crate) fn whole(word: &Word<'_>) -> Self {
        Self {
            surface: word.surface.to_string(),
            reading: word.reading.to_string(),
        }
    }

    pub fn attach(self, suffix: &str, reading_suffix: &str) -> ConjugationResult {
        let Stem {
            mut surface,
            mut reading,
        } = self;
        surface.push_str(suffix);
        reading.push_str(reading_suffix);
        let romaji = to_romaji(&reading);
        ConjugationResult {
            surface,
            reading,
            romaji: (!romaji.is_empty()).then_some(romaji),
        }
    }
}

/// `text` without its last `n` characters (empty if shorter).
pub(crate) fn drop_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return text;
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &text[..idx],
        None => "",
    }
}

pub(crate) fn godan_stem(
    word: &Word<'_>,
    selector: StemSelector,
) -> Result<Stem, ConjugationError> {
    let (surface_base, reading_base, ending) = word.okurigana_base()?;
    if !is_godan_ending(ending) {
        return Err(ConjugationError::UnsupportedEnding {
            word: word.surface.to_string(),
            ending,
        });
    }
    let unsupported = || ConjugationError::UnsupportedEnding {
        word: word.surface.to_string(),
        ending,
    };
    let tail = match selector {
        StemSelector::Row(row) => godan_row(ending, row).ok_or_else(unsupported)?,
        StemSelector::Te => sound_change(ending).ok_or_else(unsupported)?.te,
        StemSelector::Ta => sound_change(ending).ok_or_else(unsupported)?.ta,
        StemSelector::Dictionary => return Ok(Stem::whole(word)),
        StemSelector::Lexical { surface, reading } => {
            return Ok(Stem::new(surface_base, reading_base, surface, reading));
        }
        StemSelector::Derived(form) => {
            return Err(ConjugationError::unsupported(word.surface, form, "godan stem"));
        }
    };
    Ok(Stem::new(surface_base, reading_base, tail, tail))
}

pub(crate) fn ichidan_stem(
    word: &Word<'_>,
    selector: StemSelector,
) -> Result<Stem, ConjugationError> {
    let (surface_base, reading_base, ending) = word.okurigana_base()?;
    if ending != 'る' {
        return Err(ConjugationError::malformed(
            word.surface,
            "ichidan verb must end in る",
        ));
    }
    let tail = match selector {
        StemSelector::Row(_) => "",
        StemSelector::Te => "て",
        StemSelector::Ta => "た",
        StemSelector::Dictionary => return Ok(Stem::whole(word)),
        StemSelector::Lexical { surface, reading } => {
            return Ok(Stem::new(surface_base, reading_base, surface, reading));
        }
        StemSelector::Derived(form) => {
            return Err(ConjugationError::unsupported(word.surface, form, "ichidan stem"));
        }
    };
    Ok(Stem::new(surface_base, reading_base, tail, tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word<'a>(surface: &'a str, reading: &'a str) -> Word<'a> {
        Word::new(surface, reading).unwrap()
    }

    #[test]
    fn stem_table_covers_every_sound_change_ending() {
        for (ending, _) in STEM_TABLE {
            assert!(sound_change(ending).is_some(), "no sound change for {ending}");
        }
        assert_eq!(godan_row('う', StemRow::A), Some("わ"));
        assert_eq!(godan_row('ず', StemRow::A), None);
    }

    #[test]
    fn godan_rows_follow_the_table() {
        let w = word("書く", "かく");
        let a = godan_stem(&w, StemSelector::Row(StemRow::A)).unwrap();
        assert_eq!((a.surface.as_str(), a.reading.as_str()), ("書か", "かか"));
        let e = godan_stem(&w, StemSelector::Row(StemRow::E)).unwrap();
        assert_eq!(e.surface, "書け");
        let te = godan_stem(&w, StemSelector::Te).unwrap();
        assert_eq!((te.surface.as_str(), te.reading.as_str()), ("書いて", "かいて"));
    }

    #[test]
    fn godan_rejects_unknown_ending() {
        let w = word("ぽよ", "");
        assert_eq!(
            godan_stem(&w, StemSelector::Row(StemRow::I)),
            Err(ConjugationError::UnsupportedEnding {
                word: "ぽよ".into(),
                ending: 'よ'
            })
        );
    }

    #[test]
    fn ichidan_ignores_row() {
        let w = word("食べる", "たべる");
        for row in StemRow::ALL {
            let s = ichidan_stem(&w, StemSelector::Row(row)).unwrap();
            assert_eq!((s.surface.as_str(), s.reading.as_str()), ("食べ", "たべ"));
        }
        assert!(ichidan_stem(&word("書く", "かく"), StemSelector::Te).is_err());
    }

    #[test]
    fn kana_only_word_reads_as_itself() {
        let w = word("たべる", "");
        assert_eq!(w.reading, "たべる");
        assert!(Word::new("食べる", "").is_err());
        assert!(Word::new("  ", "たべる").is_err());
    }

    #[test]
    fn mismatched_okurigana_is_malformed() {
        let w = word("書く", "かう");
        assert!(matches!(
            godan_stem(&w, StemSelector::Te),
            Err(ConjugationError::MalformedEntry { .. })
        ));
    }

    #[test]
    fn drops_characters_not_bytes() {
        assert_eq!(drop_chars("食べる", 1), "食べ");
        assert_eq!(drop_chars("食べる", 3), "");
        assert_eq!(drop_chars("る", 4), "");
        assert_eq!(drop_chars("る", 0), "る");
    }
}
