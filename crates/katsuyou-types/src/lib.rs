//! Shared types for the katsuyou conjugation engine.
//!
//! Lexical entries are authored data: the verb group or adjective type lives
//! on the record and is never rewritten at runtime. Everything else here is a
//! pure value produced by the engine ([`ConjugationResult`],
//! [`FuriganaSegment`]) or a closed identifier the engine dispatches on
//! ([`ConjugationForm`], [`AdjectiveForm`], [`StemRow`]).
//!
//! ```rust
//! use katsuyou_types::{ConjugationForm, Phase};
//!
//! let form: ConjugationForm = "te_iru".parse().unwrap();
//! assert_eq!(form, ConjugationForm::TeIru);
//! assert_eq!(form.phase(), Phase::Te);
//! assert_eq!(ConjugationForm::ALL.len(), 27);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Conjugation class of a verb.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbGroup {
    Ichidan,
    Godan,
    IrregularSuru,
    IrregularKuru,
}

impl VerbGroup {
    pub const ALL: [VerbGroup; 4] = [
        VerbGroup::Ichidan,
        VerbGroup::Godan,
        VerbGroup::IrregularSuru,
        VerbGroup::IrregularKuru,
    ];

    pub fn id(self) -> &'static str {
        match self {
            VerbGroup::Ichidan => "ichidan",
            VerbGroup::Godan => "godan",
            VerbGroup::IrregularSuru => "irregular_suru",
            VerbGroup::IrregularKuru => "irregular_kuru",
        }
    }

    pub fn is_irregular(self) -> bool {
        matches!(self, VerbGroup::IrregularSuru | VerbGroup::IrregularKuru)
    }
}

impl fmt::Display for VerbGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for VerbGroup {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VerbGroup::ALL
            .into_iter()
            .find(|g| g.id() == s)
            .ok_or_else(|| ParseIdError::new("verb group", s))
    }
}

/// Adjective class.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum AdjectiveType {
    #[serde(rename = "i")]
    I,
    #[serde(rename = "na")]
    Na,
}

impl AdjectiveType {
    pub fn id(self) -> &'static str {
        match self {
            AdjectiveType::I => "i",
            AdjectiveType::Na => "na",
        }
    }
}

impl fmt::Display for AdjectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AdjectiveType {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "i" => Ok(AdjectiveType::I),
            "na" => Ok(AdjectiveType::Na),
            other => Err(ParseIdError::new("adjective type", other)),
        }
    }
}

/// Authored class of a lexical entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Group {
    Verb(VerbGroup),
    Adjective(AdjectiveType),
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Verb(g) => g.fmt(f),
            Group::Adjective(t) => t.fmt(f),
        }
    }
}

impl FromStr for Group {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<VerbGroup>()
            .map(Group::Verb)
            .or_else(|_| s.parse::<AdjectiveType>().map(Group::Adjective))
            .map_err(|_| ParseIdError::new("group", s))
    }
}

/// Whether an entry is a verb or an adjective.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
    Verb,
    Adjective,
}

impl WordKind {
    pub fn id(self) -> &'static str {
        match self {
            WordKind::Verb => "verb",
            WordKind::Adjective => "adjective",
        }
    }
}

impl fmt::Display for WordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for WordKind {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verb" => Ok(WordKind::Verb),
            "adjective" => Ok(WordKind::Adjective),
            other => Err(ParseIdError::new("word kind", other)),
        }
    }
}

/// JLPT level tag, ordered from easiest (`N5`) to hardest (`N1`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    pub const ALL: [JlptLevel; 5] = [
        JlptLevel::N5,
        JlptLevel::N4,
        JlptLevel::N3,
        JlptLevel::N2,
        JlptLevel::N1,
    ];

    /// Dense index in `0..5`, easiest first.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn id(self) -> &'static str {
        match self {
            JlptLevel::N5 => "N5",
            JlptLevel::N4 => "N4",
            JlptLevel::N3 => "N3",
            JlptLevel::N2 => "N2",
            JlptLevel::N1 => "N1",
        }
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for JlptLevel {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JlptLevel::ALL
            .into_iter()
            .find(|l| l.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseIdError::new("JLPT level", s))
    }
}

/// A verb or adjective in dictionary form, as authored in a dataset.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LexicalEntry {
    pub dictionary_form: String,
    pub reading: String,
    pub romaji: String,
    pub meaning: String,
    pub kind: WordKind,
    pub group: Option<Group>,
    pub jlpt: JlptLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitive: Option<bool>,
}

impl LexicalEntry {
    /// Minimal verb entry; handy for callers that only know the spelling.
    pub fn verb(dictionary_form: &str, reading: &str, group: Option<VerbGroup>) -> Self {
        Self {
            dictionary_form: dictionary_form.to_string(),
            reading: reading.to_string(),
            romaji: String::new(),
            meaning: String::new(),
            kind: WordKind::Verb,
            group: group.map(Group::Verb),
            jlpt: JlptLevel::N5,
            transitive: None,
        }
    }

    /// Minimal adjective entry.
    pub fn adjective(dictionary_form: &str, reading: &str, ty: Option<AdjectiveType>) -> Self {
        Self {
            dictionary_form: dictionary_form.to_string(),
            reading: reading.to_string(),
            romaji: String::new(),
            meaning: String::new(),
            kind: WordKind::Adjective,
            group: ty.map(Group::Adjective),
            jlpt: JlptLevel::N5,
            transitive: None,
        }
    }

    pub fn verb_group(&self) -> Option<VerbGroup> {
        match self.group {
            Some(Group::Verb(g)) => Some(g),
            _ => None,
        }
    }

    pub fn adjective_type(&self) -> Option<AdjectiveType> {
        match self.group {
            Some(Group::Adjective(t)) => Some(t),
            _ => None,
        }
    }
}

/// Curriculum phase; forms are introduced phase by phase in this order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Polite,
    Plain,
    Te,
    Desire,
    Volitional,
    Potential,
    Conditional,
    VoiceAndMood,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::Polite,
        Phase::Plain,
        Phase::Te,
        Phase::Desire,
        Phase::Volitional,
        Phase::Potential,
        Phase::Conditional,
        Phase::VoiceAndMood,
    ];

    /// 1-based position in the curriculum.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Phase::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn forms(self) -> impl Iterator<Item = ConjugationForm> {
        ConjugationForm::ALL
            .into_iter()
            .filter(move |f| f.phase() == self)
    }
}

/// Target grammatical form for verbs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConjugationForm {
    MasuPositive,
    MasuNegative,
    MasuPastPositive,
    MasuPastNegative,
    PlainPositive,
    PlainNegative,
    PlainPastPositive,
    PlainPastNegative,
    TeForm,
    TeIru,
    TeIruNegative,
    TaiPositive,
    TaiNegative,
    TaiPast,
    VolitionalPositive,
    VolitionalPolite,
    PotentialPositive,
    PotentialNegative,
    ConditionalBa,
    ConditionalTara,
    ConditionalNara,
    ConditionalTo,
    Passive,
    Causative,
    CausativePassive,
    ImperativePositive,
    ImperativeNegative,
}

impl ConjugationForm {
    /// All forms in curriculum order.
    pub const ALL: [ConjugationForm; 27] = [
        ConjugationForm::MasuPositive,
        ConjugationForm::MasuNegative,
        ConjugationForm::MasuPastPositive,
        ConjugationForm::MasuPastNegative,
        ConjugationForm::PlainPositive,
        ConjugationForm::PlainNegative,
        ConjugationForm::PlainPastPositive,
        ConjugationForm::PlainPastNegative,
        ConjugationForm::TeForm,
        ConjugationForm::TeIru,
        ConjugationForm::TeIruNegative,
        ConjugationForm::TaiPositive,
        ConjugationForm::TaiNegative,
        ConjugationForm::TaiPast,
        ConjugationForm::VolitionalPositive,
        ConjugationForm::VolitionalPolite,
        ConjugationForm::PotentialPositive,
        ConjugationForm::PotentialNegative,
        ConjugationForm::ConditionalBa,
        ConjugationForm::ConditionalTara,
        ConjugationForm::ConditionalNara,
        ConjugationForm::ConditionalTo,
        ConjugationForm::Passive,
        ConjugationForm::Causative,
        ConjugationForm::CausativePassive,
        ConjugationForm::ImperativePositive,
        ConjugationForm::ImperativeNegative,
    ];

    pub fn phase(self) -> Phase {
        use ConjugationForm::*;
        match self {
            MasuPositive | MasuNegative | MasuPastPositive | MasuPastNegative => Phase::Polite,
            PlainPositive | PlainNegative | PlainPastPositive | PlainPastNegative => Phase::Plain,
            TeForm | TeIru | TeIruNegative => Phase::Te,
            TaiPositive | TaiNegative | TaiPast => Phase::Desire,
            VolitionalPositive | VolitionalPolite => Phase::Volitional,
            PotentialPositive | PotentialNegative => Phase::Potential,
            ConditionalBa | ConditionalTara | ConditionalNara | ConditionalTo => Phase::Conditional,
            Passive | Causative | CausativePassive | ImperativePositive | ImperativeNegative => {
                Phase::VoiceAndMood
            }
        }
    }

    /// Stable snake_case identifier, matching the serde representation.
    pub fn id(self) -> &'static str {
        use ConjugationForm::*;
        match self {
            MasuPositive => "masu_positive",
            MasuNegative => "masu_negative",
            MasuPastPositive => "masu_past_positive",
            MasuPastNegative => "masu_past_negative",
            PlainPositive => "plain_positive",
            PlainNegative => "plain_negative",
            PlainPastPositive => "plain_past_positive",
            PlainPastNegative => "plain_past_negative",
            TeForm => "te_form",
            TeIru => "te_iru",
            TeIruNegative => "te_iru_negative",
            TaiPositive => "tai_positive",
            TaiNegative => "tai_negative",
            TaiPast => "tai_past",
            VolitionalPositive => "volitional_positive",
            VolitionalPolite => "volitional_polite",
            PotentialPositive => "potential_positive",
            PotentialNegative => "potential_negative",
            ConditionalBa => "conditional_ba",
            ConditionalTara => "conditional_tara",
            ConditionalNara => "conditional_nara",
            ConditionalTo => "conditional_to",
            Passive => "passive",
            Causative => "causative",
            CausativePassive => "causative_passive",
            ImperativePositive => "imperative_positive",
            ImperativeNegative => "imperative_negative",
        }
    }

    /// Human-readable label for prompts.
    pub fn label(self) -> &'static str {
        use ConjugationForm::*;
        match self {
            MasuPositive => "polite present",
            MasuNegative => "polite negative",
            MasuPastPositive => "polite past",
            MasuPastNegative => "polite past negative",
            PlainPositive => "plain present",
            PlainNegative => "plain negative",
            PlainPastPositive => "plain past",
            PlainPastNegative => "plain past negative",
            TeForm => "te-form",
            TeIru => "progressive (te-iru)",
            TeIruNegative => "progressive negative (te-inai)",
            TaiPositive => "want to (tai)",
            TaiNegative => "don't want to (takunai)",
            TaiPast => "wanted to (takatta)",
            VolitionalPositive => "volitional (let's)",
            VolitionalPolite => "polite volitional (mashou)",
            PotentialPositive => "potential",
            PotentialNegative => "potential negative",
            ConditionalBa => "conditional (ba)",
            ConditionalTara => "conditional (tara)",
            ConditionalNara => "conditional (nara)",
            ConditionalTo => "conditional (to)",
            Passive => "passive",
            Causative => "causative",
            CausativePassive => "causative-passive",
            ImperativePositive => "imperative",
            ImperativeNegative => "prohibitive (na)",
        }
    }

    /// Forms introduced up to and including `phase`.
    pub fn up_to_phase(phase: Phase) -> impl Iterator<Item = ConjugationForm> {
        ConjugationForm::ALL
            .into_iter()
            .filter(move |f| f.phase() <= phase)
    }
}

impl fmt::Display for ConjugationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ConjugationForm {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConjugationForm::ALL
            .into_iter()
            .find(|f| f.id() == s)
            .ok_or_else(|| ParseIdError::new("conjugation form", s))
    }
}

/// Target form for adjectives.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjectiveForm {
    Present,
    Polite,
    Negative,
    Past,
    NegativePast,
    TeForm,
    Adverbial,
}

impl AdjectiveForm {
    pub const ALL: [AdjectiveForm; 7] = [
        AdjectiveForm::Present,
        AdjectiveForm::Polite,
        AdjectiveForm::Negative,
        AdjectiveForm::Past,
        AdjectiveForm::NegativePast,
        AdjectiveForm::TeForm,
        AdjectiveForm::Adverbial,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AdjectiveForm::Present => "present",
            AdjectiveForm::Polite => "polite",
            AdjectiveForm::Negative => "negative",
            AdjectiveForm::Past => "past",
            AdjectiveForm::NegativePast => "negative_past",
            AdjectiveForm::TeForm => "te_form",
            AdjectiveForm::Adverbial => "adverbial",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdjectiveForm::Present => "plain present",
            AdjectiveForm::Polite => "polite present",
            AdjectiveForm::Negative => "negative",
            AdjectiveForm::Past => "past",
            AdjectiveForm::NegativePast => "past negative",
            AdjectiveForm::TeForm => "te-form",
            AdjectiveForm::Adverbial => "adverbial",
        }
    }
}

impl fmt::Display for AdjectiveForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AdjectiveForm {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdjectiveForm::ALL
            .into_iter()
            .find(|f| f.id() == s)
            .ok_or_else(|| ParseIdError::new("adjective form", s))
    }
}

/// One of the five vowel rows a godan stem alternates through.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StemRow {
    A,
    I,
    U,
    E,
    O,
}

impl StemRow {
    pub const ALL: [StemRow; 5] = [StemRow::A, StemRow::I, StemRow::U, StemRow::E, StemRow::O];

    /// Column index into a five-row table.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Output of the engine: conjugated spelling plus its pronunciation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ConjugationResult {
    pub surface: String,
    /// Full hiragana pronunciation of `surface`.
    pub reading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romaji: Option<String>,
}

/// Display segment: `text` with its ruby `reading`, or plain kana when the
/// reading is empty.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FuriganaSegment {
    pub text: String,
    pub reading: String,
}

impl FuriganaSegment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reading: String::new(),
        }
    }

    pub fn ruby(text: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reading: reading.into(),
        }
    }

    pub fn has_reading(&self) -> bool {
        !self.reading.is_empty()
    }
}

/// Unknown identifier passed to one of the `FromStr` impls.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseIdError {
    what: &'static str,
    value: String,
}

impl ParseIdError {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.what, self.value)
    }
}

impl std::error::Error for ParseIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phase_has_forms_in_order() {
        let mut last = Phase::Polite;
        for form in ConjugationForm::ALL {
            assert!(form.phase() >= last, "{form} out of curriculum order");
            last = form.phase();
        }
        for phase in Phase::ALL {
            assert!(phase.forms().count() > 0, "{phase:?} has no forms");
        }
        assert_eq!(Phase::from_number(1), Some(Phase::Polite));
        assert_eq!(Phase::from_number(8), Some(Phase::VoiceAndMood));
        assert_eq!(Phase::from_number(0), None);
        assert_eq!(Phase::from_number(9), None);
    }

    #[test]
    fn form_ids_round_trip_through_serde() {
        for form in ConjugationForm::ALL {
            let json = serde_json::to_string(&form).unwrap();
            assert_eq!(json, format!("\"{}\"", form.id()));
            assert_eq!(form.id().parse::<ConjugationForm>(), Ok(form));
        }
        assert!("masu".parse::<ConjugationForm>().is_err());
    }

    #[test]
    fn group_deserializes_untagged() {
        let g: Group = serde_json::from_str("\"godan\"").unwrap();
        assert_eq!(g, Group::Verb(VerbGroup::Godan));
        let g: Group = serde_json::from_str("\"na\"").unwrap();
        assert_eq!(g, Group::Adjective(AdjectiveType::Na));
        assert!(serde_json::from_str::<Group>("\"nidan\"").is_err());
        assert_eq!("i".parse::<Group>(), Ok(Group::Adjective(AdjectiveType::I)));
        assert_eq!("irregular_kuru".parse::<Group>(), Ok(Group::Verb(VerbGroup::IrregularKuru)));
    }

    #[test]
    fn up_to_phase_is_cumulative() {
        assert_eq!(ConjugationForm::up_to_phase(Phase::Polite).count(), 4);
        assert_eq!(ConjugationForm::up_to_phase(Phase::Plain).count(), 8);
        assert_eq!(ConjugationForm::up_to_phase(Phase::VoiceAndMood).count(), 27);
    }

    #[test]
    fn jlpt_levels_parse_case_insensitively() {
        assert_eq!("n4".parse::<JlptLevel>(), Ok(JlptLevel::N4));
        assert!(JlptLevel::N5 < JlptLevel::N1);
        assert!("N6".parse::<JlptLevel>().is_err());
    }
}
