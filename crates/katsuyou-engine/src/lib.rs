//! Japanese verb and adjective conjugation over fixed rule tables.
//!
//! Every verb group is a [`ConjugationStrategy`] with one rule per
//! [`ConjugationForm`]; a small interpreter builds the requested stem (on the
//! written form and the reading in parallel), attaches the suffixes, and then
//! consults a single table of lexical exceptions (行く, ある, いい).
//!
//! # How it works
//! 1. [`classify`] picks the verb group: the authored one, or a suffix guess.
//! 2. The strategy's rule names a stem selector and a suffix.
//! 3. The stem generator produces the stem from the row tables, the て/た
//!    sound-change table, or the する/来る override tables.
//! 4. [`apply_exceptions`] replaces the candidate for known idiosyncrasies.
//!
//! [`align_furigana`] and [`check_answer`] are independent helpers for
//! rendering and grading.
//!
//! # Example
//! ```
//! use katsuyou_engine::{align_furigana, check_answer, conjugate};
//! use katsuyou_types::{ConjugationForm, LexicalEntry, VerbGroup};
//!
//! # fn main() -> Result<(), katsuyou_engine::ConjugationError> {
//! let taberu = LexicalEntry::verb("食べる", "たべる", Some(VerbGroup::Ichidan));
//! let polite = conjugate(&taberu, ConjugationForm::MasuPositive)?;
//! assert_eq!(polite.surface, "食べます");
//! assert!(check_answer("たべます", &polite));
//!
//! let ruby = align_furigana(&polite.surface, &polite.reading);
//! assert_eq!(ruby[0].text, "食");
//! assert_eq!(ruby[0].reading, "た");
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p katsuyou-engine --example conjugate -- <word> <reading> [group]`.

mod adjective;
mod answer;
mod classify;
mod error;
mod exceptions;
mod furigana;
mod irregular;
mod kana;
mod rules;
mod stem;

pub use adjective::{
    AdjectiveRule, adjective_rule, conjugate_adjective, conjugate_adjective_word, strip_na_marker,
};
pub use answer::{check_answer, normalize_answer};
pub use classify::{classify, classify_adjective, guess_verb_group};
pub use error::ConjugationError;
pub use exceptions::{
    InflectionKey, LexicalException, Splice, apply_exceptions, exception_table, lookup_exception,
};
pub use furigana::align_furigana;
pub use irregular::IrregularVerb;
pub use kana::{contains_kanji, is_hiragana, is_kana, is_kanji, to_romaji, vowel_row};
pub use rules::{
    ConjugationStrategy, Godan, Ichidan, Rule, conjugate, conjugate_all, conjugate_word, stem,
    strategy_for,
};
pub use stem::{
    STEM_TABLE, SOUND_CHANGE_TABLE, SoundChange, Stem, StemSelector, Word, godan_row,
    is_godan_ending, sound_change,
};
