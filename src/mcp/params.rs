//! MCP tool parameter types with JSON Schema support.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    AnimeDetailField, AnimeField, DetailQuery, RankingQuery, RankingType, SearchQuery, Season,
    SeasonSort, SeasonalQuery, SuggestionQuery,
};

/// Parameters for the `search_anime` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search text.
    pub q: String,
    /// Maximum number of results (default 100, max 100).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of results to skip (default 0).
    #[serde(default)]
    pub offset: Option<u32>,
    /// Fields to return. Omit for every field.
    #[serde(default)]
    pub fields: Option<Vec<AnimeField>>,
}

/// Parameters for the `get_anime_detail` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DetailParams {
    /// MyAnimeList anime id.
    pub anime_id: u64,
    /// Fields to return. Omit for every field.
    #[serde(default)]
    pub fields: Option<Vec<AnimeDetailField>>,
}

/// Parameters for the `get_anime_ranking` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RankingParams {
    /// Ranking category (default `all`).
    #[serde(default)]
    pub ranking_type: Option<RankingType>,
    /// Maximum number of results (default 100, max 500).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of results to skip (default 0).
    #[serde(default)]
    pub offset: Option<u32>,
    /// Fields to return. Omit for every field.
    #[serde(default)]
    pub fields: Option<Vec<AnimeField>>,
}

/// Parameters for the `get_seasonal_anime` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SeasonalParams {
    /// Year, e.g. 2023.
    pub year: u32,
    /// Broadcast season.
    pub season: Season,
    /// Sort order.
    #[serde(default)]
    pub sort: Option<SeasonSort>,
    /// Maximum number of results.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(default)]
    pub offset: Option<u32>,
    /// Fields to return. Omit for every field.
    #[serde(default)]
    pub fields: Option<Vec<AnimeField>>,
}

/// Parameters for the `get_suggested_anime` MCP tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SuggestionParams {
    /// Maximum number of results.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(default)]
    pub offset: Option<u32>,
    /// Fields to return. Omit for every field.
    #[serde(default)]
    pub fields: Option<Vec<AnimeField>>,
}

impl From<SearchParams> for SearchQuery {
    fn from(p: SearchParams) -> Self {
        Self {
            q: p.q,
            limit: p.limit,
            offset: p.offset,
            fields: p.fields,
        }
    }
}

impl From<DetailParams> for DetailQuery {
    fn from(p: DetailParams) -> Self {
        Self {
            anime_id: p.anime_id,
            fields: p.fields,
        }
    }
}

impl From<RankingParams> for RankingQuery {
    fn from(p: RankingParams) -> Self {
        Self {
            ranking_type: p.ranking_type.unwrap_or_default(),
            limit: p.limit,
            offset: p.offset,
            fields: p.fields,
        }
    }
}

impl From<SeasonalParams> for SeasonalQuery {
    fn from(p: SeasonalParams) -> Self {
        Self {
            year: p.year,
            season: p.season,
            sort: p.sort,
            limit: p.limit,
            offset: p.offset,
            fields: p.fields,
        }
    }
}

impl From<SuggestionParams> for SuggestionQuery {
    fn from(p: SuggestionParams) -> Self {
        Self {
            limit: p.limit,
            offset: p.offset,
            fields: p.fields,
        }
    }
}
