use thiserror::Error;

/// Data errors surfaced by the engine. All are deterministic for a given
/// input; none are worth retrying.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConjugationError {
    #[error("no group authored for {word} and none could be inferred")]
    UnknownGroup { word: String },
    #[error("{word}: final character '{ending}' is not a godan ending")]
    UnsupportedEnding { word: String, ending: char },
    #[error("{word}: no {form} rule for {class}")]
    UnsupportedForm {
        word: String,
        form: String,
        class: String,
    },
    #[error("malformed entry {word:?}: {reason}")]
    MalformedEntry { word: String, reason: &'static str },
}

impl ConjugationError {
    pub(crate) fn malformed(word: &str, reason: &'static str) -> Self {
        ConjugationError::MalformedEntry {
            word: word.to_string(),
            reason,
        }
    }

    pub(crate) fn unsupported(word: &str, form: impl ToString, class: impl ToString) -> Self {
        ConjugationError::UnsupportedForm {
            word: word.to_string(),
            form: form.to_string(),
            class: class.to_string(),
        }
    }
}
