//! Multiple-choice question generation over a lexicon.
//!
//! The random source is always supplied by the caller, so a fixed seed
//! reproduces the same question.

use katsuyou_engine::{
    ConjugationError, align_furigana, check_answer, conjugate, conjugate_adjective,
};
use katsuyou_lexicon::{EntryFilter, Lexicon};
use katsuyou_types::{
    AdjectiveForm, ConjugationForm, ConjugationResult, FuriganaSegment, JlptLevel, LexicalEntry,
    Phase, WordKind,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CHOICES: usize = 4;
pub const MAX_CHOICES: usize = 8;

#[derive(Clone, Copy, Debug)]
pub struct QuizOptions<'a> {
    pub levels: &'a [JlptLevel],
    pub kinds: &'a [WordKind],
    /// Verb forms are drawn from this phase and the ones before it.
    pub max_phase: Phase,
    /// Number of options including the answer; 1 means no distractors.
    pub choices: usize,
}

impl Default for QuizOptions<'_> {
    fn default() -> Self {
        Self {
            levels: &[],
            kinds: &[],
            max_phase: Phase::VoiceAndMood,
            choices: DEFAULT_CHOICES,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Question {
    pub dictionary_form: String,
    pub reading: String,
    pub meaning: String,
    pub kind: WordKind,
    pub form: &'static str,
    pub form_label: &'static str,
    pub furigana: Vec<FuriganaSegment>,
    pub answer: ConjugationResult,
    pub choices: Vec<String>,
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("no entries match the requested levels and kinds")]
    NoCandidates,
    #[error(transparent)]
    Conjugation(#[from] ConjugationError),
}

/// A form of either kind, so verbs and adjectives share one code path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AnyForm {
    Verb(ConjugationForm),
    Adjective(AdjectiveForm),
}

impl AnyForm {
    fn id(self) -> &'static str {
        match self {
            AnyForm::Verb(f) => f.id(),
            AnyForm::Adjective(f) => f.id(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            AnyForm::Verb(f) => f.label(),
            AnyForm::Adjective(f) => f.label(),
        }
    }

    fn apply(self, entry: &LexicalEntry) -> Result<ConjugationResult, ConjugationError> {
        match self {
            AnyForm::Verb(f) => conjugate(entry, f),
            AnyForm::Adjective(f) => conjugate_adjective(entry, f),
        }
    }
}

fn forms_for(kind: WordKind, max_phase: Phase) -> Vec<AnyForm> {
    match kind {
        WordKind::Verb => ConjugationForm::up_to_phase(max_phase)
            .map(AnyForm::Verb)
            .collect(),
        WordKind::Adjective => AdjectiveForm::ALL.into_iter().map(AnyForm::Adjective).collect(),
    }
}

/// Pick an entry and a form, and build the answer plus shuffled options.
///
/// Distractors are the same entry's other forms, so every option is a real
/// inflection of the prompted word.
pub fn generate_question<R: Rng + ?Sized>(
    rng: &mut R,
    lexicon: &Lexicon,
    opts: &QuizOptions<'_>,
) -> Result<Question, QuizError> {
    let candidates = lexicon.matching(&EntryFilter {
        levels: opts.levels,
        kinds: opts.kinds,
        ..EntryFilter::default()
    });
    let entry = *candidates.choose(rng).ok_or(QuizError::NoCandidates)?;

    let forms = forms_for(entry.kind, opts.max_phase);
    let form = *forms.choose(rng).ok_or(QuizError::NoCandidates)?;
    let answer = form.apply(entry)?;

    let mut distractors: Vec<String> = Vec::new();
    let pool = match entry.kind {
        WordKind::Verb => forms_for(WordKind::Verb, Phase::VoiceAndMood),
        WordKind::Adjective => forms,
    };
    for other in pool.into_iter().filter(|f| *f != form) {
        let result = match other.apply(entry) {
            Ok(result) => result,
            Err(err) => {
                debug!("no {} distractor for {}: {err}", other.id(), entry.dictionary_form);
                continue;
            }
        };
        // Options the checker would also accept (高い vs 高いです) are not distractors.
        if check_answer(&result.surface, &answer) || distractors.contains(&result.surface) {
            continue;
        }
        distractors.push(result.surface);
    }
    distractors.shuffle(rng);
    distractors.truncate(opts.choices.clamp(1, MAX_CHOICES) - 1);

    let mut choices = distractors;
    choices.push(answer.surface.clone());
    choices.shuffle(rng);

    Ok(Question {
        dictionary_form: entry.dictionary_form.clone(),
        reading: entry.reading.clone(),
        meaning: entry.meaning.clone(),
        kind: entry.kind,
        form: form.id(),
        form_label: form.label(),
        furigana: align_furigana(&entry.dictionary_form, &entry.reading),
        answer,
        choices,
    })
}
