use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lexicon_types::{Category, StructureTag};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::engine::Lexicon;
use crate::error::SearchError;
use crate::pattern::{CompiledSlot, Hints, MatchMode};
use crate::query::{Pagination, SearchQuery, parse_tones};

const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Clone)]
pub struct AppState {
    pub lexicon: Arc<Lexicon>,
    pub max_page_size: usize,
    pub disable_cache: bool,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub pattern: Option<String>,
    pub mode: Option<String>,
    pub homophone: Option<bool>,
    pub initials: Option<String>,
    pub category: Option<String>,
    pub length: Option<usize>,
    pub structure: Option<String>,
    pub rhyme: Option<String>,
    pub tones: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Deserialize)]
pub struct CompileParams {
    pub pattern: String,
    pub mode: Option<String>,
    pub homophone: Option<bool>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pattern: Option<String>,
    mode: &'static str,
    page: usize,
    page_size: usize,
    total: usize,
    has_more: bool,
    items: Vec<EntryView>,
}

#[derive(Serialize)]
struct EntryView {
    id: u32,
    text: String,
    category: &'static str,
    pinyin: Vec<String>,
    structure: Option<&'static str>,
    definition: Option<String>,
}

#[derive(Serialize)]
pub struct CompileResponse<'a> {
    pattern: &'a str,
    mode: &'static str,
    homophone: bool,
    regex: &'a str,
    min_len: usize,
    max_len: Option<usize>,
    hints: &'a Hints,
    slots: &'a [CompiledSlot],
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/search", get(search))
        .route("/v1/compile", get(compile))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let mode = parse_mode(params.mode.as_deref())?;

    let page = params.page.unwrap_or(1);
    if page == 0 {
        return Err(ApiError::bad_request("page must be >= 1"));
    }
    let mut page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err(ApiError::bad_request("page_size must be >= 1"));
    }
    if page_size > state.max_page_size {
        page_size = state.max_page_size;
    }

    let category = params
        .category
        .as_deref()
        .map(|raw| {
            Category::from_label(raw)
                .ok_or_else(|| ApiError::bad_request(format!("unknown category {raw:?}")))
        })
        .transpose()?;
    let structure = params
        .structure
        .as_deref()
        .map(|raw| {
            StructureTag::parse(raw)
                .ok_or_else(|| ApiError::bad_request(format!("unknown structure {raw:?}")))
        })
        .transpose()?;
    let tones = params.tones.as_deref().map(parse_tones).transpose()?;

    let query = SearchQuery {
        pattern: params.pattern.clone(),
        mode,
        homophone: params.homophone.unwrap_or(false),
        initials: params.initials,
        category,
        length: params.length,
        structure,
        rhyme: params.rhyme,
        tones,
        ..SearchQuery::default()
    }
    .with_page(Pagination::page(page, page_size));

    let result = state.lexicon.search(&query)?;
    let items = result
        .items
        .iter()
        .map(|hit| EntryView {
            id: hit.id,
            text: hit.entry.text.clone(),
            category: hit.entry.category.label(),
            pinyin: hit.entry.readings.iter().map(ToString::to_string).collect(),
            structure: hit.entry.structure.map(StructureTag::as_str),
            definition: hit.entry.definition.clone(),
        })
        .collect();

    let response = SearchResponse {
        pattern: params.pattern,
        mode: mode.as_str(),
        page,
        page_size,
        total: result.total,
        has_more: result.has_more,
        items,
    };
    Ok(cacheable(state.disable_cache, Json(response)))
}

async fn compile(
    State(state): State<AppState>,
    Query(params): Query<CompileParams>,
) -> Result<Response, ApiError> {
    if params.pattern.trim().is_empty() {
        return Err(ApiError::bad_request("pattern is required"));
    }
    let mode = parse_mode(params.mode.as_deref())?;
    let homophone = params.homophone.unwrap_or(false);
    let compiled = state.lexicon.compile(&params.pattern, mode, homophone)?;

    let response = CompileResponse {
        pattern: compiled.source(),
        mode: mode.as_str(),
        homophone,
        regex: compiled.regex_str(),
        min_len: compiled.hints().min_len,
        max_len: compiled.hints().max_len,
        hints: compiled.hints(),
        slots: compiled.slots(),
    };
    Ok(cacheable(state.disable_cache, Json(response)))
}

fn parse_mode(raw: Option<&str>) -> Result<MatchMode, ApiError> {
    match raw {
        None => Ok(MatchMode::Character),
        Some(raw) => MatchMode::parse(raw)
            .ok_or_else(|| ApiError::bad_request(format!("unknown mode {raw:?}"))),
    }
}

fn cacheable(disable_cache: bool, body: impl IntoResponse) -> Response {
    if disable_cache {
        return body.into_response();
    }
    (
        [(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=300"),
        )],
        body,
    )
        .into_response()
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidPattern { .. } => ApiError::BadRequest(err.to_string()),
            SearchError::ExpansionTooLarge { .. } | SearchError::PatternTooLarge { .. } => {
                ApiError::Unprocessable(err.to_string())
            }
            SearchError::DataUnavailable(_) => {
                error!("search failed: {err}");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Unprocessable(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
