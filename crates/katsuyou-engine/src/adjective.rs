//! い- and な-adjective conjugation.

use katsuyou_types::{AdjectiveForm, AdjectiveType, ConjugationResult, LexicalEntry, WordKind};

use crate::classify::classify_adjective;
use crate::error::ConjugationError;
use crate::exceptions::{InflectionKey, apply_exceptions};
use crate::stem::{Stem, Word, drop_chars};

/// `keep_final: false` drops the dictionary form's final い before `suffix`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdjectiveRule {
    pub keep_final: bool,
    pub suffix: &'static str,
}

const fn keep(suffix: &'static str) -> AdjectiveRule {
    AdjectiveRule {
        keep_final: true,
        suffix,
    }
}

const fn drop_i(suffix: &'static str) -> AdjectiveRule {
    AdjectiveRule {
        keep_final: false,
        suffix,
    }
}

pub fn adjective_rule(ty: AdjectiveType, form: AdjectiveForm) -> AdjectiveRule {
    use AdjectiveForm::*;
    match (ty, form) {
        (AdjectiveType::I, Present) => keep(""),
        (AdjectiveType::I, Polite) => keep("です"),
        (AdjectiveType::I, Negative) => drop_i("くない"),
        (AdjectiveType::I, Past) => drop_i("かった"),
        (AdjectiveType::I, NegativePast) => drop_i("くなかった"),
        (AdjectiveType::I, TeForm) => drop_i("くて"),
        (AdjectiveType::I, Adverbial) => drop_i("く"),
        (AdjectiveType::Na, Present) => keep("だ"),
        (AdjectiveType::Na, Polite) => keep("です"),
        (AdjectiveType::Na, Negative) => keep("じゃない"),
        (AdjectiveType::Na, Past) => keep("だった"),
        (AdjectiveType::Na, NegativePast) => keep("じゃなかった"),
        (AdjectiveType::Na, TeForm) => keep("で"),
        (AdjectiveType::Na, Adverbial) => keep("に"),
    }
}

/// Strip the `(な)` marker some datasets append to な-adjectives.
pub fn strip_na_marker(text: &str) -> &str {
    let text = text.trim();
    text.strip_suffix("(な)")
        .or_else(|| text.strip_suffix("（な）"))
        .map(str::trim_end)
        .unwrap_or(text)
}

pub fn conjugate_adjective(
    entry: &LexicalEntry,
    form: AdjectiveForm,
) -> Result<ConjugationResult, ConjugationError> {
    if entry.kind == WordKind::Verb {
        return Err(ConjugationError::unsupported(
            &entry.dictionary_form,
            form,
            WordKind::Verb,
        ));
    }
    let ty = classify_adjective(entry)?;
    let word = Word::new(
        strip_na_marker(&entry.dictionary_form),
        strip_na_marker(&entry.reading),
    )?;
    conjugate_adjective_word(&word, ty, form)
}

pub fn conjugate_adjective_word(
    word: &Word<'_>,
    ty: AdjectiveType,
    form: AdjectiveForm,
) -> Result<ConjugationResult, ConjugationError> {
    let rule = adjective_rule(ty, form);
    let stem = if rule.keep_final {
        Stem::whole(word)
    } else {
        if !word.surface.ends_with('い') || !word.reading.ends_with('い') {
            return Err(ConjugationError::malformed(
                word.surface,
                "i-adjective must end in い",
            ));
        }
        Stem::new(drop_chars(word.surface, 1), drop_chars(word.reading, 1), "", "")
    };
    let candidate = stem.attach(rule.suffix, rule.suffix);
    Ok(apply_exceptions(word, InflectionKey::Adjective(form), candidate))
}
