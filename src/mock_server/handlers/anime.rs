//! Anime endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;

use super::auth::{authorize, error_response, Caller};
use crate::mock_server::state::MockState;
use crate::{AnimeDetail, Paging, RankingType, Season, SeasonSort};

/// Fields returned when the request has no `fields` parameter, besides the
/// always-present `id` and `title`.
const DEFAULT_FIELDS: &[&str] = &["main_picture"];

const SEARCH_MAX_LIMIT: u32 = 100;
const LIST_MAX_LIMIT: u32 = 500;

/// Query parameters shared by the anime endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AnimeListQuery {
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub fields: Option<String>,
    pub ranking_type: Option<String>,
    pub sort: Option<String>,
}

/// Serialize `detail` keeping `id`, `title` and the requested fields.
/// Absent values are omitted rather than sent as `null`.
fn project(detail: &AnimeDetail, fields: Option<&str>) -> Value {
    let requested: Vec<&str> = match fields {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect(),
        None => DEFAULT_FIELDS.to_vec(),
    };

    let mut value = serde_json::to_value(detail).unwrap_or(Value::Null);
    if let Value::Object(ref mut map) = value {
        map.retain(|key, v| {
            (key == "id" || key == "title" || requested.contains(&key.as_str())) && !v.is_null()
        });
    }
    value
}

fn bad_request(message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, "bad_request", message)
}

fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "not_found", "")
}

/// Resolve `limit`/`offset`, rejecting out-of-range limits.
fn window(
    query: &AnimeListQuery,
    default_limit: u32,
    max_limit: u32,
) -> Result<(usize, usize), Response> {
    let limit = query.limit.unwrap_or(default_limit);
    if limit == 0 || limit > max_limit {
        return Err(bad_request("invalid limit"));
    }
    Ok((query.offset.unwrap_or(0) as usize, limit as usize))
}

fn paging(path: &str, offset: usize, limit: usize, total: usize) -> Paging {
    let link = |at: usize| format!("{path}?offset={at}&limit={limit}");
    Paging {
        previous: (offset > 0).then(|| link(offset.saturating_sub(limit))),
        next: (offset + limit < total).then(|| link(offset + limit)),
    }
}

/// Build a `{data: [{node}], paging}` response.
fn node_page(
    path: &str,
    items: Vec<&AnimeDetail>,
    offset: usize,
    limit: usize,
    fields: Option<&str>,
) -> Response {
    let total = items.len();
    let data: Vec<Value> = items
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|d| serde_json::json!({ "node": project(d, fields) }))
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "data": data,
            "paging": paging(path, offset, limit, total),
        })),
    )
        .into_response()
}

/// GET /anime
pub async fn search_anime(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<AnimeListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let q = match query.q.as_deref().map(str::trim) {
        Some(q) if q.chars().count() >= 3 => q,
        _ => return bad_request("invalid q"),
    };
    let (offset, limit) = match window(&query, SEARCH_MAX_LIMIT, SEARCH_MAX_LIMIT) {
        Ok(w) => w,
        Err(rejection) => return rejection,
    };

    node_page("/anime", state.search(q), offset, limit, query.fields.as_deref())
}

/// GET /anime/{anime_id}
pub async fn get_anime_detail(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(anime_id): Path<u64>,
    Query(query): Query<AnimeListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get_anime(anime_id) {
        Some(detail) => {
            (StatusCode::OK, Json(project(detail, query.fields.as_deref()))).into_response()
        }
        None => not_found(),
    }
}

/// GET /anime/ranking
pub async fn get_anime_ranking(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<AnimeListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let ranking_type = match query.ranking_type.as_deref() {
        None => RankingType::All,
        Some(raw) => match raw.parse::<RankingType>() {
            Ok(t) => t,
            Err(_) => return bad_request("invalid ranking_type"),
        },
    };
    let (offset, limit) = match window(&query, 100, LIST_MAX_LIMIT) {
        Ok(w) => w,
        Err(rejection) => return rejection,
    };

    let ranked = state.ranking(ranking_type);
    let total = ranked.len();
    let data: Vec<Value> = ranked
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(limit)
        .map(|(i, d)| {
            serde_json::json!({
                "node": project(d, query.fields.as_deref()),
                "ranking": { "rank": i + 1 },
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "data": data,
            "paging": paging("/anime/ranking", offset, limit, total),
        })),
    )
        .into_response()
}

/// GET /anime/season/{year}/{season}
pub async fn get_seasonal_anime(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((year, season)): Path<(u32, String)>,
    Query(query): Query<AnimeListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let season: Season = match season.parse() {
        Ok(s) => s,
        Err(_) => return bad_request("invalid season"),
    };
    let sort = match query.sort.as_deref().map(str::parse::<SeasonSort>) {
        None => None,
        Some(Ok(sort)) => Some(sort),
        Some(Err(_)) => return bad_request("invalid sort"),
    };
    let (offset, limit) = match window(&query, 100, LIST_MAX_LIMIT) {
        Ok(w) => w,
        Err(rejection) => return rejection,
    };

    match state.seasonal(year, season, sort) {
        Some(items) => node_page(
            &format!("/anime/season/{year}/{season}"),
            items,
            offset,
            limit,
            query.fields.as_deref(),
        ),
        None => not_found(),
    }
}

/// GET /anime/suggestions
pub async fn get_suggested_anime(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<AnimeListQuery>,
) -> Response {
    let state = state.read().await;
    match authorize(&state, &headers) {
        Ok(Caller::User) => {}
        Ok(Caller::App) => {
            return error_response(StatusCode::UNAUTHORIZED, "invalid_token", "invalid token")
        }
        Err(rejection) => return rejection,
    }

    let (offset, limit) = match window(&query, 100, SEARCH_MAX_LIMIT) {
        Ok(w) => w,
        Err(rejection) => return rejection,
    };

    node_page(
        "/anime/suggestions",
        state.suggested(),
        offset,
        limit,
        query.fields.as_deref(),
    )
}
