//! Verb and adjective classification.
//!
//! The authored group on a [`LexicalEntry`] is authoritative. The suffix
//! heuristic below only fills in when nothing was authored, and otherwise
//! serves as a consistency check whose disagreements are logged.

use katsuyou_types::{AdjectiveType, LexicalEntry, StemRow, VerbGroup, WordKind};
use tracing::debug;

use crate::adjective::strip_na_marker;
use crate::error::ConjugationError;
use crate::kana::vowel_row;
use crate::stem::is_godan_ending;

/// Verb group for `entry`.
pub fn classify(entry: &LexicalEntry) -> Result<VerbGroup, ConjugationError> {
    let surface = entry.dictionary_form.trim();
    if surface.is_empty() {
        return Err(ConjugationError::malformed(surface, "empty dictionary form"));
    }
    if entry.kind == WordKind::Adjective || entry.adjective_type().is_some() {
        return Err(ConjugationError::malformed(
            surface,
            "adjective entry cannot be classified as a verb",
        ));
    }
    let guessed = guess_verb_group(surface, entry.reading.trim());
    match (entry.verb_group(), guessed) {
        (Some(authored), Some(guess)) => {
            if authored != guess {
                debug!("{surface}: authored {authored}, suffix suggests {guess}");
            }
            Ok(authored)
        }
        (Some(authored), None) => Ok(authored),
        (None, Some(guess)) => {
            debug!("{surface}: no authored group, inferred {guess}");
            Ok(guess)
        }
        (None, None) => Err(ConjugationError::UnknownGroup {
            word: surface.to_string(),
        }),
    }
}

/// Suffix heuristic over a dictionary form and its reading.
///
/// Pure kana `くる` and anything ending in `来る` count as 来る; つくる and
/// other words that merely end in the sound くる do not.
pub fn guess_verb_group(dictionary_form: &str, reading: &str) -> Option<VerbGroup> {
    let reading = if reading.is_empty() { dictionary_form } else { reading };
    if dictionary_form.ends_with("する") {
        return Some(VerbGroup::IrregularSuru);
    }
    if dictionary_form == "くる" || dictionary_form.ends_with("来る") {
        return Some(VerbGroup::IrregularKuru);
    }
    let mut tail = reading.chars().rev();
    let last = tail.next()?;
    if last == 'る'
        && let Some(row) = tail.next().and_then(vowel_row)
        && matches!(row, StemRow::I | StemRow::E)
    {
        return Some(VerbGroup::Ichidan);
    }
    is_godan_ending(last).then_some(VerbGroup::Godan)
}

/// Adjective type for `entry`: authored type first, then the form's shape.
pub fn classify_adjective(entry: &LexicalEntry) -> Result<AdjectiveType, ConjugationError> {
    let surface = entry.dictionary_form.trim();
    if surface.is_empty() {
        return Err(ConjugationError::malformed(surface, "empty dictionary form"));
    }
    if entry.kind == WordKind::Verb || entry.verb_group().is_some() {
        return Err(ConjugationError::malformed(
            surface,
            "verb entry cannot be classified as an adjective",
        ));
    }
    if let Some(ty) = entry.adjective_type() {
        return Ok(ty);
    }
    let bare = strip_na_marker(surface);
    if bare.len() != surface.len() {
        return Ok(AdjectiveType::Na);
    }
    if bare.ends_with('い') {
        debug!("{surface}: no authored type, inferred i-adjective");
        return Ok(AdjectiveType::I);
    }
    Err(ConjugationError::UnknownGroup {
        word: surface.to_string(),
    })
}
