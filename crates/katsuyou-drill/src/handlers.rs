use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use katsuyou_engine::{
    ConjugationError, align_furigana, check_answer, classify, classify_adjective, conjugate,
    conjugate_adjective,
};
use katsuyou_lexicon::{EntryFilter, Lexicon};
use katsuyou_types::{
    AdjectiveForm, AdjectiveType, ConjugationForm, ConjugationResult, FuriganaSegment, Group,
    JlptLevel, LexicalEntry, Phase, VerbGroup, WordKind,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::quiz::{DEFAULT_CHOICES, MAX_CHOICES, QuizError, QuizOptions, generate_question};

#[derive(Clone)]
pub struct AppState {
    pub lexicon: Arc<Lexicon>,
    pub max_page_size: usize,
    pub disable_cache: bool,
}

#[derive(Deserialize)]
pub struct EntriesQuery {
    pub level: Option<String>,
    pub kind: Option<String>,
    pub group: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Deserialize)]
pub struct ConjugateQuery {
    pub word: String,
    pub form: Option<String>,
    pub reading: Option<String>,
    pub group: Option<String>,
}

#[derive(Deserialize)]
pub struct FuriganaQuery {
    pub text: String,
    #[serde(default)]
    pub reading: String,
}

#[derive(Deserialize)]
pub struct CheckRequest {
    pub word: String,
    pub form: String,
    pub answer: String,
    pub kind: Option<WordKind>,
}

#[derive(Deserialize)]
pub struct QuizQuery {
    pub seed: Option<u64>,
    pub level: Option<String>,
    pub kind: Option<String>,
    pub max_phase: Option<u8>,
    pub choices: Option<usize>,
}

#[derive(Serialize)]
pub struct EntriesResponse<'a> {
    page: usize,
    page_size: usize,
    total: usize,
    has_more: bool,
    items: Vec<&'a LexicalEntry>,
}

#[derive(Serialize)]
pub struct FormResult {
    form: &'static str,
    label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phase: Option<u8>,
    #[serde(flatten)]
    result: ConjugationResult,
    furigana: Vec<FuriganaSegment>,
}

#[derive(Serialize)]
pub struct ConjugateResponse {
    word: String,
    reading: String,
    group: Group,
    forms: Vec<FormResult>,
}

#[derive(Serialize)]
pub struct CheckResponse {
    correct: bool,
    expected: ConjugationResult,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/forms", get(forms))
        .route("/v1/entries", get(entries))
        .route("/v1/conjugate", get(conjugate_verb))
        .route("/v1/adjective", get(conjugate_adj))
        .route("/v1/furigana", get(furigana))
        .route("/v1/check", post(check))
        .route("/v1/quiz", get(quiz))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn forms(State(state): State<AppState>) -> Response {
    let verb: Vec<_> = ConjugationForm::ALL
        .iter()
        .map(|f| json!({ "id": f.id(), "label": f.label(), "phase": f.phase().number() }))
        .collect();
    let adjective: Vec<_> = AdjectiveForm::ALL
        .iter()
        .map(|f| json!({ "id": f.id(), "label": f.label() }))
        .collect();
    cached(
        &state,
        "public, max-age=86400",
        Json(json!({ "verb": verb, "adjective": adjective })),
    )
}

async fn entries(
    State(state): State<AppState>,
    Query(params): Query<EntriesQuery>,
) -> Result<Response, ApiError> {
    let levels: Vec<JlptLevel> = parse_list(params.level.as_deref())?;
    let kinds: Vec<WordKind> = parse_list(params.kind.as_deref())?;
    let groups: Vec<Group> = parse_list(params.group.as_deref())?;
    let (page, page_size) = paging(&state, params.page, params.page_size)?;

    let selection = state.lexicon.select(&EntryFilter {
        levels: &levels,
        kinds: &kinds,
        groups: &groups,
        page,
        page_size,
    });
    let response = EntriesResponse {
        page,
        page_size,
        total: selection.total,
        has_more: selection.has_more,
        items: selection.items,
    };
    Ok(cached(&state, "public, max-age=300", Json(response)))
}

async fn conjugate_verb(
    State(state): State<AppState>,
    Query(params): Query<ConjugateQuery>,
) -> Result<Response, ApiError> {
    let form: Option<ConjugationForm> = parse_opt(params.form.as_deref())?;
    let group: Option<VerbGroup> = parse_opt(params.group.as_deref())?;
    let adhoc;
    let entry = match state.lexicon.verb(&params.word) {
        Some(entry) => entry,
        None => {
            adhoc = adhoc_entry(&params, WordKind::Verb, group.map(Group::Verb))?;
            &adhoc
        }
    };
    let forms = match form {
        Some(form) => vec![form],
        None => ConjugationForm::ALL.to_vec(),
    };
    let mut results = Vec::with_capacity(forms.len());
    for form in forms {
        results.push(form_result(
            form.id(),
            form.label(),
            Some(form.phase().number()),
            conjugate(entry, form)?,
        ));
    }
    let group = classify(entry)?;
    respond_forms(&state, entry, Group::Verb(group), results)
}

async fn conjugate_adj(
    State(state): State<AppState>,
    Query(params): Query<ConjugateQuery>,
) -> Result<Response, ApiError> {
    let form: Option<AdjectiveForm> = parse_opt(params.form.as_deref())?;
    let ty: Option<AdjectiveType> = parse_opt(params.group.as_deref())?;
    let adhoc;
    let entry = match state.lexicon.adjective(&params.word) {
        Some(entry) => entry,
        None => {
            adhoc = adhoc_entry(&params, WordKind::Adjective, ty.map(Group::Adjective))?;
            &adhoc
        }
    };
    let forms = match form {
        Some(form) => vec![form],
        None => AdjectiveForm::ALL.to_vec(),
    };
    let mut results = Vec::with_capacity(forms.len());
    for form in forms {
        results.push(form_result(
            form.id(),
            form.label(),
            None,
            conjugate_adjective(entry, form)?,
        ));
    }
    let ty = classify_adjective(entry)?;
    respond_forms(&state, entry, Group::Adjective(ty), results)
}

async fn furigana(
    State(state): State<AppState>,
    Query(params): Query<FuriganaQuery>,
) -> Result<Response, ApiError> {
    let text = params.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request("text is required"));
    }
    let segments = align_furigana(text, params.reading.trim());
    Ok(cached(
        &state,
        "public, max-age=3600",
        Json(json!({ "text": text, "reading": params.reading.trim(), "segments": segments })),
    ))
}

async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Response, ApiError> {
    let entry = state
        .lexicon
        .get(request.kind, &request.word)
        .ok_or_else(|| ApiError::not_found(format!("unknown word {}", request.word)))?;
    let expected = match entry.kind {
        WordKind::Verb => conjugate(entry, parse_id::<ConjugationForm>(&request.form)?)?,
        WordKind::Adjective => {
            conjugate_adjective(entry, parse_id::<AdjectiveForm>(&request.form)?)?
        }
    };
    let correct = check_answer(&request.answer, &expected);
    debug!(
        "check {} {}: {:?} -> {correct}",
        entry.dictionary_form, request.form, request.answer
    );
    Ok(Json(CheckResponse { correct, expected }).into_response())
}

async fn quiz(
    State(state): State<AppState>,
    Query(params): Query<QuizQuery>,
) -> Result<Response, ApiError> {
    let levels: Vec<JlptLevel> = parse_list(params.level.as_deref())?;
    let kinds: Vec<WordKind> = parse_list(params.kind.as_deref())?;
    let max_phase = match params.max_phase {
        None => Phase::VoiceAndMood,
        Some(n) => Phase::from_number(n).ok_or_else(|| {
            ApiError::bad_request(format!("max_phase must be between 1 and {}", Phase::ALL.len()))
        })?,
    };
    let choices = params.choices.unwrap_or(DEFAULT_CHOICES);
    if choices == 0 || choices > MAX_CHOICES {
        return Err(ApiError::bad_request(format!(
            "choices must be between 1 and {MAX_CHOICES}"
        )));
    }

    let opts = QuizOptions {
        levels: &levels,
        kinds: &kinds,
        max_phase,
        choices,
    };
    let question = match params.seed {
        Some(seed) => generate_question(&mut StdRng::seed_from_u64(seed), &state.lexicon, &opts)?,
        None => generate_question(&mut StdRng::from_entropy(), &state.lexicon, &opts)?,
    };
    if params.seed.is_some() {
        Ok(cached(&state, "public, max-age=300", Json(question)))
    } else {
        Ok(Json(question).into_response())
    }
}

fn adhoc_entry(
    params: &ConjugateQuery,
    kind: WordKind,
    group: Option<Group>,
) -> Result<LexicalEntry, ApiError> {
    let word = params.word.trim();
    if word.is_empty() {
        return Err(ApiError::bad_request("word is required"));
    }
    let (Some(reading), Some(group)) = (params.reading.as_deref(), group) else {
        return Err(ApiError::not_found(format!(
            "unknown {kind} {word}; pass reading and group to conjugate it anyway"
        )));
    };
    let mut entry = match kind {
        WordKind::Verb => LexicalEntry::verb(word, reading, None),
        WordKind::Adjective => LexicalEntry::adjective(word, reading, None),
    };
    entry.group = Some(group);
    Ok(entry)
}

fn form_result(
    form: &'static str,
    label: &'static str,
    phase: Option<u8>,
    result: ConjugationResult,
) -> FormResult {
    FormResult {
        form,
        label,
        phase,
        furigana: align_furigana(&result.surface, &result.reading),
        result,
    }
}

fn respond_forms(
    state: &AppState,
    entry: &LexicalEntry,
    group: Group,
    forms: Vec<FormResult>,
) -> Result<Response, ApiError> {
    let response = ConjugateResponse {
        word: entry.dictionary_form.clone(),
        reading: entry.reading.clone(),
        group,
        forms,
    };
    Ok(cached(state, "public, max-age=3600", Json(response)))
}

fn paging(
    state: &AppState,
    page: Option<usize>,
    page_size: Option<usize>,
) -> Result<(usize, usize), ApiError> {
    let page = page.unwrap_or(1);
    if page == 0 {
        return Err(ApiError::bad_request("page must be >= 1"));
    }
    let page_size = page_size.unwrap_or(50);
    if page_size == 0 {
        return Err(ApiError::bad_request("page_size must be >= 1"));
    }
    Ok((page, page_size.min(state.max_page_size)))
}

fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ApiError::bad_request(e.to_string()))
}

fn parse_opt<T: FromStr>(raw: Option<&str>) -> Result<Option<T>, ApiError>
where
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_id(raw).map(Some),
    }
}

/// Comma separated list; absent or empty means no constraint.
fn parse_list<T: FromStr>(raw: Option<&str>) -> Result<Vec<T>, ApiError>
where
    T::Err: std::fmt::Display,
{
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_id::<T>)
        .collect()
}

fn cached(state: &AppState, policy: &'static str, body: impl IntoResponse) -> Response {
    if state.disable_cache {
        return body.into_response();
    }
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static(policy))],
        body,
    )
        .into_response()
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Conjugation(#[from] ConjugationError),
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }

    fn not_found<T: Into<String>>(msg: T) -> Self {
        ApiError::NotFound(msg.into())
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::NoCandidates => ApiError::NotFound(QuizError::NoCandidates.to_string()),
            QuizError::Conjugation(e) => ApiError::Conjugation(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conjugation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
