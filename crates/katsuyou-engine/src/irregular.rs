//! する and 来る: per-verb row overrides and rule tables.
//!
//! Any text before the verb (勉強する, 持って来る) is carried through
//! unchanged on both tiers. 来る keeps its kanji on the surface while the
//! reading moves between こ, き and く.

use katsuyou_types::{ConjugationForm, StemRow};

use crate::error::ConjugationError;
use crate::rules::{ConjugationStrategy, Rule};
use crate::stem::{Stem, StemSelector, Word};

/// `(kanji surface, kana)` for one override slot.
type Slot = (&'static str, &'static str);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IrregularVerb {
    Suru,
    Kuru,
}

struct OverrideTable {
    kanji_tail: Option<&'static str>,
    kana_tail: &'static str,
    rows: [Slot; 5],
    te: Slot,
    ta: Slot,
}

#[rustfmt::skip]
const SURU: OverrideTable = OverrideTable {
    kanji_tail: None,
    kana_tail: "する",
    rows: [("さ", "さ"), ("し", "し"), ("す", "す"), ("すれ", "すれ"), ("し", "し")],
    te: ("して", "して"),
    ta: ("した", "した"),
};

#[rustfmt::skip]
const KURU: OverrideTable = OverrideTable {
    kanji_tail: Some("来る"),
    kana_tail: "くる",
    rows: [("来", "こ"), ("来", "き"), ("来", "く"), ("来れ", "くれ"), ("来", "こ")],
    te: ("来て", "きて"),
    ta: ("来た", "きた"),
};

impl IrregularVerb {
    fn table(self) -> &'static OverrideTable {
        match self {
            IrregularVerb::Suru => &SURU,
            IrregularVerb::Kuru => &KURU,
        }
    }

    /// Split the word into `(surface prefix, reading prefix, written in kanji)`.
    fn split<'a>(self, word: &Word<'a>) -> Result<(&'a str, &'a str, bool), ConjugationError> {
        let table = self.table();
        let kanji_prefix = table
            .kanji_tail
            .and_then(|tail| word.surface.strip_suffix(tail));
        let (surface_prefix, kanji) = match kanji_prefix {
            Some(prefix) => (prefix, true),
            None => match word.surface.strip_suffix(table.kana_tail) {
                Some(prefix) => (prefix, false),
                None => {
                    return Err(ConjugationError::malformed(
                        word.surface,
                        "irregular verb does not end in する or 来る",
                    ));
                }
            },
        };
        let reading_prefix = word.reading.strip_suffix(table.kana_tail).ok_or_else(|| {
            ConjugationError::malformed(word.surface, "reading does not end in する or くる")
        })?;
        Ok((surface_prefix, reading_prefix, kanji))
    }
}

impl ConjugationStrategy for IrregularVerb {
    fn name(&self) -> &'static str {
        match self {
            IrregularVerb::Suru => "irregular_suru",
            IrregularVerb::Kuru => "irregular_kuru",
        }
    }

    fn rule(&self, form: ConjugationForm) -> Rule {
        use ConjugationForm::*;
        use IrregularVerb::*;
        use StemSelector::*;
        match (*self, form) {
            (_, MasuPositive) => Rule::new(Row(StemRow::I), "ます"),
            (_, MasuNegative) => Rule::new(Row(StemRow::I), "ません"),
            (_, MasuPastPositive) => Rule::new(Row(StemRow::I), "ました"),
            (_, MasuPastNegative) => Rule::new(Row(StemRow::I), "ませんでした"),
            (_, PlainPositive) => Rule::new(Dictionary, ""),
            (Suru, PlainNegative) => Rule::new(Row(StemRow::I), "ない"),
            (Kuru, PlainNegative) => Rule::new(Row(StemRow::A), "ない"),
            (_, PlainPastPositive) => Rule::new(Ta, ""),
            (Suru, PlainPastNegative) => Rule::new(Row(StemRow::I), "なかった"),
            (Kuru, PlainPastNegative) => Rule::new(Row(StemRow::A), "なかった"),
            (_, TeForm) => Rule::new(Te, ""),
            (_, TeIru) => Rule::new(Te, "いる"),
            (_, TeIruNegative) => Rule::new(Te, "いない"),
            (_, TaiPositive) => Rule::new(Row(StemRow::I), "たい"),
            (_, TaiNegative) => Rule::new(Row(StemRow::I), "たくない"),
            (_, TaiPast) => Rule::new(Row(StemRow::I), "たかった"),
            (_, VolitionalPositive) => Rule::new(Row(StemRow::O), "よう"),
            (_, VolitionalPolite) => Rule::new(Row(StemRow::I), "ましょう"),
            (Suru, PotentialPositive) => Rule::new(
                Lexical {
                    surface: "でき",
                    reading: "でき",
                },
                "る",
            ),
            (Kuru, PotentialPositive) => Rule::new(Row(StemRow::O), "られる"),
            (_, PotentialNegative) => Rule::new(Derived(PotentialPositive), "ない"),
            (_, ConditionalBa) => Rule::new(Row(StemRow::E), "ば"),
            (_, ConditionalTara) => Rule::new(Ta, "ら"),
            (_, ConditionalNara) => Rule::new(Dictionary, "なら"),
            (_, ConditionalTo) => Rule::new(Dictionary, "と"),
            (Suru, Passive) => Rule::new(Row(StemRow::A), "れる"),
            (Kuru, Passive) => Rule::new(Row(StemRow::A), "られる"),
            (Suru, Causative) => Rule::new(Row(StemRow::A), "せる"),
            (Kuru, Causative) => Rule::new(Row(StemRow::A), "させる"),
            (_, CausativePassive) => Rule::new(Derived(Causative), "られる"),
            (Suru, ImperativePositive) => Rule::new(Row(StemRow::I), "ろ"),
            (Kuru, ImperativePositive) => Rule::new(Row(StemRow::O), "い"),
            (_, ImperativeNegative) => Rule::new(Dictionary, "な"),
        }
    }

    fn stem(&self, word: &Word<'_>, selector: StemSelector) -> Result<Stem, ConjugationError> {
        let (surface_prefix, reading_prefix, kanji) = self.split(word)?;
        let table = self.table();
        let (kanji_slot, kana_slot) = match selector {
            StemSelector::Row(row) => table.rows[row.index()],
            StemSelector::Te => table.te,
            StemSelector::Ta => table.ta,
            StemSelector::Dictionary => return Ok(Stem::whole(word)),
            StemSelector::Lexical { surface, reading } => (surface, reading),
            StemSelector::Derived(form) => {
                return Err(ConjugationError::unsupported(word.surface, form, self.name()));
            }
        };
        let surface = if kanji { kanji_slot } else { kana_slot };
        Ok(Stem::new(surface_prefix, reading_prefix, surface, kana_slot))
    }
}
