//! Rule tables and the interpreter that applies them.
//!
//! A rule is `(stem selector, suffix, reading suffix)`. Each verb group is a
//! [`ConjugationStrategy`] owning one rule table (an exhaustive `match`, so a
//! form without a rule does not compile) and a stem generator. The
//! interpreter asks the strategy for the rule, builds the stem, attaches the
//! suffixes, then hands the candidate to the exception table.

use katsuyou_types::{ConjugationForm, ConjugationResult, LexicalEntry, StemRow, VerbGroup, WordKind};

use crate::classify::classify;
use crate::error::ConjugationError;
use crate::exceptions::{InflectionKey, apply_exceptions};
use crate::irregular::IrregularVerb;
use crate::stem::{Stem, StemSelector, Word, godan_stem, ichidan_stem};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rule {
    pub stem: StemSelector,
    pub suffix: &'static str,
    pub reading_suffix: &'static str,
}

impl Rule {
    /// Rule whose suffix is pure kana, so both tiers take the same text.
    pub const fn new(stem: StemSelector, suffix: &'static str) -> Self {
        Self {
            stem,
            suffix,
            reading_suffix: suffix,
        }
    }
}

/// Per-group conjugation behaviour behind one interface.
pub trait ConjugationStrategy: Sync {
    fn name(&self) -> &'static str;

    fn rule(&self, form: ConjugationForm) -> Rule;

    /// Produce the stem named by `selector`. [`StemSelector::Derived`] is
    /// resolved by the interpreter and never reaches a strategy.
    fn stem(&self, word: &Word<'_>, selector: StemSelector) -> Result<Stem, ConjugationError>;
}

/// 一段: no vowel alternation, the suffix carries the distinction.
#[derive(Clone, Copy, Debug)]
pub struct Ichidan;

/// 五段: row alternation plus the て/た sound changes.
#[derive(Clone, Copy, Debug)]
pub struct Godan;

impl ConjugationStrategy for Ichidan {
    fn name(&self) -> &'static str {
        "ichidan"
    }

    fn rule(&self, form: ConjugationForm) -> Rule {
        use ConjugationForm::*;
        use StemSelector::*;
        const BASE: StemSelector = Row(StemRow::I);
        match form {
            MasuPositive => Rule::new(BASE, "ます"),
            MasuNegative => Rule::new(BASE, "ません"),
            MasuPastPositive => Rule::new(BASE, "ました"),
            MasuPastNegative => Rule::new(BASE, "ませんでした"),
            PlainPositive => Rule::new(Dictionary, ""),
            PlainNegative => Rule::new(BASE, "ない"),
            PlainPastPositive => Rule::new(Ta, ""),
            PlainPastNegative => Rule::new(BASE, "なかった"),
            TeForm => Rule::new(Te, ""),
            TeIru => Rule::new(Te, "いる"),
            TeIruNegative => Rule::new(Te, "いない"),
            TaiPositive => Rule::new(BASE, "たい"),
            TaiNegative => Rule::new(BASE, "たくない"),
            TaiPast => Rule::new(BASE, "たかった"),
            VolitionalPositive => Rule::new(BASE, "よう"),
            VolitionalPolite => Rule::new(BASE, "ましょう"),
            PotentialPositive => Rule::new(BASE, "られる"),
            PotentialNegative => Rule::new(Derived(PotentialPositive), "ない"),
            ConditionalBa => Rule::new(BASE, "れば"),
            ConditionalTara => Rule::new(Ta, "ら"),
            ConditionalNara => Rule::new(Dictionary, "なら"),
            ConditionalTo => Rule::new(Dictionary, "と"),
            Passive => Rule::new(BASE, "られる"),
            Causative => Rule::new(BASE, "させる"),
            CausativePassive => Rule::new(Derived(Causative), "られる"),
            ImperativePositive => Rule::new(BASE, "ろ"),
            ImperativeNegative => Rule::new(Dictionary, "な"),
        }
    }

    fn stem(&self, word: &Word<'_>, selector: StemSelector) -> Result<Stem, ConjugationError> {
        ichidan_stem(word, selector)
    }
}

impl ConjugationStrategy for Godan {
    fn name(&self) -> &'static str {
        "godan"
    }

    fn rule(&self, form: ConjugationForm) -> Rule {
        use ConjugationForm::*;
        use StemSelector::*;
        match form {
            MasuPositive => Rule::new(Row(StemRow::I), "ます"),
            MasuNegative => Rule::new(Row(StemRow::I), "ません"),
            MasuPastPositive => Rule::new(Row(StemRow::I), "ました"),
            MasuPastNegative => Rule::new(Row(StemRow::I), "ませんでした"),
            PlainPositive => Rule::new(Dictionary, ""),
            PlainNegative => Rule::new(Row(StemRow::A), "ない"),
            PlainPastPositive => Rule::new(Ta, ""),
            PlainPastNegative => Rule::new(Row(StemRow::A), "なかった"),
            TeForm => Rule::new(Te, ""),
            TeIru => Rule::new(Te, "いる"),
            TeIruNegative => Rule::new(Te, "いない"),
            TaiPositive => Rule::new(Row(StemRow::I), "たい"),
            TaiNegative => Rule::new(Row(StemRow::I), "たくない"),
            TaiPast => Rule::new(Row(StemRow::I), "たかった"),
            VolitionalPositive => Rule::new(Row(StemRow::O), "う"),
            VolitionalPolite => Rule::new(Row(StemRow::I), "ましょう"),
            PotentialPositive => Rule::new(Row(StemRow::E), "る"),
            PotentialNegative => Rule::new(Derived(PotentialPositive), "ない"),
            ConditionalBa => Rule::new(Row(StemRow::E), "ば"),
            ConditionalTara => Rule::new(Ta, "ら"),
            ConditionalNara => Rule::new(Dictionary, "なら"),
            ConditionalTo => Rule::new(Dictionary, "と"),
            Passive => Rule::new(Row(StemRow::A), "れる"),
            Causative => Rule::new(Row(StemRow::A), "せる"),
            CausativePassive => Rule::new(Derived(Causative), "られる"),
            ImperativePositive => Rule::new(Row(StemRow::E), ""),
            ImperativeNegative => Rule::new(Dictionary, "な"),
        }
    }

    fn stem(&self, word: &Word<'_>, selector: StemSelector) -> Result<Stem, ConjugationError> {
        godan_stem(word, selector)
    }
}

pub fn strategy_for(group: VerbGroup) -> &'static dyn ConjugationStrategy {
    match group {
        VerbGroup::Ichidan => &Ichidan,
        VerbGroup::Godan => &Godan,
        VerbGroup::IrregularSuru => &IrregularVerb::Suru,
        VerbGroup::IrregularKuru => &IrregularVerb::Kuru,
    }
}

/// Stem of `word` for the given row, as the stem generator sees it.
pub fn stem(word: &Word<'_>, group: VerbGroup, row: StemRow) -> Result<Stem, ConjugationError> {
    strategy_for(group).stem(word, StemSelector::Row(row))
}

/// Conjugate a verb entry into `form`.
///
/// The authored group decides the strategy (see [`classify`]); lexical
/// exceptions are applied last.
pub fn conjugate(
    entry: &LexicalEntry,
    form: ConjugationForm,
) -> Result<ConjugationResult, ConjugationError> {
    if entry.kind == WordKind::Adjective {
        return Err(ConjugationError::unsupported(
            &entry.dictionary_form,
            form,
            WordKind::Adjective,
        ));
    }
    let group = classify(entry)?;
    let word = Word::from_entry(entry)?;
    conjugate_word(&word, group, form)
}

/// Every form for a verb entry, in curriculum order.
pub fn conjugate_all(
    entry: &LexicalEntry,
) -> Result<Vec<(ConjugationForm, ConjugationResult)>, ConjugationError> {
    if entry.kind == WordKind::Adjective {
        return Err(ConjugationError::unsupported(
            &entry.dictionary_form,
            "verb forms",
            WordKind::Adjective,
        ));
    }
    let group = classify(entry)?;
    let word = Word::from_entry(entry)?;
    ConjugationForm::ALL
        .into_iter()
        .map(|form| conjugate_word(&word, group, form).map(|result| (form, result)))
        .collect()
}

/// Conjugate an already validated word with a known group.
pub fn conjugate_word(
    word: &Word<'_>,
    group: VerbGroup,
    form: ConjugationForm,
) -> Result<ConjugationResult, ConjugationError> {
    let strategy = strategy_for(group);
    let rule = strategy.rule(form);
    let stem = match rule.stem {
        StemSelector::Derived(base) => derived_stem(word, group, base, form)?,
        selector => strategy.stem(word, selector)?,
    };
    let candidate = stem.attach(rule.suffix, rule.reading_suffix);
    Ok(apply_exceptions(word, InflectionKey::Verb(form), candidate))
}

// The derived verb (potential, causative) conjugates like an ichidan verb.
fn derived_stem(
    word: &Word<'_>,
    group: VerbGroup,
    base: ConjugationForm,
    form: ConjugationForm,
) -> Result<Stem, ConjugationError> {
    let derived = conjugate_word(word, group, base)?;
    match (
        derived.surface.strip_suffix('る'),
        derived.reading.strip_suffix('る'),
    ) {
        (Some(surface), Some(reading)) => Ok(Stem {
            surface: surface.to_string(),
            reading: reading.to_string(),
        }),
        _ => Err(ConjugationError::unsupported(word.surface, form, group)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces(group: VerbGroup, surface: &str, reading: &str, form: ConjugationForm) -> (String, String) {
        let word = Word::new(surface, reading).unwrap();
        let result = conjugate_word(&word, group, form).unwrap();
        (result.surface, result.reading)
    }

    #[test]
    fn derived_rules_never_chain_twice() {
        for group in VerbGroup::ALL {
            let strategy = strategy_for(group);
            for form in ConjugationForm::ALL {
                if let StemSelector::Derived(base) = strategy.rule(form).stem {
                    assert!(
                        !matches!(strategy.rule(base).stem, StemSelector::Derived(_)),
                        "{group}: {form} derives from derived form {base}"
                    );
                }
            }
        }
    }

    #[test]
    fn godan_table_matches_textbook_forms() {
        use ConjugationForm::*;
        let cases = [
            (MasuPositive, "書きます"),
            (PlainNegative, "書かない"),
            (PlainPastPositive, "書いた"),
            (TeIru, "書いている"),
            (TaiPast, "書きたかった"),
            (VolitionalPositive, "書こう"),
            (PotentialPositive, "書ける"),
            (PotentialNegative, "書けない"),
            (ConditionalBa, "書けば"),
            (ConditionalTara, "書いたら"),
            (Passive, "書かれる"),
            (Causative, "書かせる"),
            (CausativePassive, "書かせられる"),
            (ImperativePositive, "書け"),
            (ImperativeNegative, "書くな"),
        ];
        for (form, expected) in cases {
            assert_eq!(surfaces(VerbGroup::Godan, "書く", "かく", form).0, expected, "{form}");
        }
    }

    #[test]
    fn godan_u_ending_uses_wa_row() {
        let (surface, reading) = surfaces(VerbGroup::Godan, "買う", "かう", ConjugationForm::PlainNegative);
        assert_eq!((surface.as_str(), reading.as_str()), ("買わない", "かわない"));
    }

    #[test]
    fn ichidan_table_matches_textbook_forms() {
        use ConjugationForm::*;
        let cases = [
            (PlainNegative, "食べない"),
            (TeForm, "食べて"),
            (VolitionalPositive, "食べよう"),
            (PotentialNegative, "食べられない"),
            (ConditionalBa, "食べれば"),
            (CausativePassive, "食べさせられる"),
            (ImperativePositive, "食べろ"),
        ];
        for (form, expected) in cases {
            assert_eq!(surfaces(VerbGroup::Ichidan, "食べる", "たべる", form).0, expected, "{form}");
        }
    }

    #[test]
    fn suru_potential_is_a_lexical_substitution() {
        let (surface, reading) =
            surfaces(VerbGroup::IrregularSuru, "する", "する", ConjugationForm::PotentialPositive);
        assert_eq!((surface.as_str(), reading.as_str()), ("できる", "できる"));
        let (surface, _) = surfaces(
            VerbGroup::IrregularSuru,
            "勉強する",
            "べんきょうする",
            ConjugationForm::PotentialNegative,
        );
        assert_eq!(surface, "勉強できない");
    }

    #[test]
    fn kuru_reading_alternates_under_fixed_kanji() {
        use ConjugationForm::*;
        let cases = [
            (PlainNegative, "来ない", "こない"),
            (MasuPositive, "来ます", "きます"),
            (ConditionalBa, "来れば", "くれば"),
            (VolitionalPositive, "来よう", "こよう"),
            (ImperativePositive, "来い", "こい"),
            (CausativePassive, "来させられる", "こさせられる"),
        ];
        for (form, surface, reading) in cases {
            assert_eq!(
                surfaces(VerbGroup::IrregularKuru, "来る", "くる", form),
                (surface.to_string(), reading.to_string()),
                "{form}"
            );
        }
    }
}
