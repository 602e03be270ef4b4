//! Lexical exceptions, consulted after the generic rule.
//!
//! Entries are keyed by the exact dictionary form (optionally pinned to a
//! reading) and the requested inflection, because they are idiosyncrasies of
//! single words rather than phonology. Compounds built on these words
//! (出て行く, かっこいい) are not covered.

use katsuyou_types::{AdjectiveForm, ConjugationForm, ConjugationResult};
use tracing::debug;

use crate::kana::to_romaji;
use crate::stem::{Word, drop_chars};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum InflectionKey {
    Verb(ConjugationForm),
    Adjective(AdjectiveForm),
}

/// Drop `drop` trailing characters, then append `tail`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Splice {
    pub drop: usize,
    pub tail: &'static str,
}

impl Splice {
    fn apply(&self, text: &str) -> String {
        format!("{}{}", drop_chars(text, self.drop), self.tail)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LexicalException {
    pub lexeme: &'static str,
    /// Restricts the entry to one reading of the lexeme.
    pub reading: Option<&'static str>,
    pub key: InflectionKey,
    pub surface_splice: Splice,
    pub reading_splice: Splice,
}

impl LexicalException {
    pub fn matches(&self, word: &Word<'_>, key: InflectionKey) -> bool {
        self.key == key
            && self.lexeme == word.surface
            && self.reading.is_none_or(|r| r == word.reading)
    }

    pub fn apply(&self, word: &Word<'_>) -> ConjugationResult {
        let surface = self.surface_splice.apply(word.surface);
        let reading = self.reading_splice.apply(word.reading);
        let romaji = to_romaji(&reading);
        ConjugationResult {
            surface,
            reading,
            romaji: (!romaji.is_empty()).then_some(romaji),
        }
    }
}

const fn same(
    lexeme: &'static str,
    key: InflectionKey,
    drop: usize,
    tail: &'static str,
) -> LexicalException {
    LexicalException {
        lexeme,
        reading: None,
        key,
        surface_splice: Splice { drop, tail },
        reading_splice: Splice { drop, tail },
    }
}

// 良い read いい keeps its kanji: 良くない over よくない.
const fn yoi(
    form: AdjectiveForm,
    tail: &'static str,
    kanji_tail: &'static str,
) -> [LexicalException; 2] {
    let key = InflectionKey::Adjective(form);
    [
        same("いい", key, 2, tail),
        LexicalException {
            lexeme: "良い",
            reading: Some("いい"),
            key,
            surface_splice: Splice {
                drop: 1,
                tail: kanji_tail,
            },
            reading_splice: Splice { drop: 2, tail },
        },
    ]
}

const fn iku(lexeme: &'static str) -> [LexicalException; 5] {
    use ConjugationForm::*;
    [
        same(lexeme, InflectionKey::Verb(PlainPastPositive), 1, "った"),
        same(lexeme, InflectionKey::Verb(TeForm), 1, "って"),
        same(lexeme, InflectionKey::Verb(TeIru), 1, "っている"),
        same(lexeme, InflectionKey::Verb(TeIruNegative), 1, "っていない"),
        same(lexeme, InflectionKey::Verb(ConditionalTara), 1, "ったら"),
    ]
}

const fn aru(lexeme: &'static str) -> [LexicalException; 2] {
    [
        same(lexeme, InflectionKey::Verb(ConjugationForm::PlainNegative), 2, "ない"),
        same(lexeme, InflectionKey::Verb(ConjugationForm::PlainPastNegative), 2, "なかった"),
    ]
}

static IKU: [[LexicalException; 5]; 3] = [iku("行く"), iku("いく"), iku("ゆく")];
static ARU: [[LexicalException; 2]; 2] = [aru("ある"), aru("有る")];
static YOI: [[LexicalException; 2]; 5] = [
    yoi(AdjectiveForm::Negative, "よくない", "くない"),
    yoi(AdjectiveForm::Past, "よかった", "かった"),
    yoi(AdjectiveForm::NegativePast, "よくなかった", "くなかった"),
    yoi(AdjectiveForm::TeForm, "よくて", "くて"),
    yoi(AdjectiveForm::Adverbial, "よく", "く"),
];

/// Every lexical exception known to the engine.
pub fn exception_table() -> impl Iterator<Item = &'static LexicalException> {
    IKU.iter()
        .flatten()
        .chain(ARU.iter().flatten())
        .chain(YOI.iter().flatten())
}

pub fn lookup_exception(word: &Word<'_>, key: InflectionKey) -> Option<&'static LexicalException> {
    exception_table().find(|e| e.matches(word, key))
}

/// Replace `candidate` when `(word, key)` is a known lexical exception.
pub fn apply_exceptions(
    word: &Word<'_>,
    key: InflectionKey,
    candidate: ConjugationResult,
) -> ConjugationResult {
    match lookup_exception(word, key) {
        Some(exception) => {
            let result = exception.apply(word);
            debug!(
                "exception for {} {:?}: {} -> {}",
                word.surface, key, candidate.surface, result.surface
            );
            result
        }
        None => candidate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yoi_surface_tail_drops_the_yo() {
        let [_, kanji] = yoi(AdjectiveForm::Negative, "よくない", "くない");
        assert_eq!(kanji.surface_splice.tail, "くない");
        let w = Word::new("良い", "いい").unwrap();
        let r = kanji.apply(&w);
        assert_eq!((r.surface.as_str(), r.reading.as_str()), ("良くない", "よくない"));
    }

    #[test]
    fn reading_pin_is_respected() {
        let key = InflectionKey::Adjective(AdjectiveForm::Negative);
        assert!(lookup_exception(&Word::new("良い", "いい").unwrap(), key).is_some());
        assert!(lookup_exception(&Word::new("良い", "よい").unwrap(), key).is_none());
    }

    #[test]
    fn untouched_candidates_pass_through() {
        let w = Word::new("書く", "かく").unwrap();
        let candidate = ConjugationResult {
            surface: "書いて".into(),
            reading: "かいて".into(),
            romaji: None,
        };
        let out = apply_exceptions(&w, InflectionKey::Verb(ConjugationForm::TeForm), candidate.clone());
        assert_eq!(out, candidate);
    }

    #[test]
    fn table_has_no_duplicate_keys() {
        let entries: Vec<_> = exception_table().collect();
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                assert!(
                    !(a.lexeme == b.lexeme && a.reading == b.reading && a.key == b.key),
                    "duplicate exception for {} {:?}",
                    a.lexeme,
                    a.key
                );
            }
        }
    }
}
