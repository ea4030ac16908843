//! Anime rankings.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::client::MalClient;
use crate::error::Result;
use crate::fields::{field_list, AnimeField};
use crate::models::anime::{Anime, PartialAnime};
use crate::models::projection::{AnimeNode, Projected};
use crate::pagination::{Page, RankedNode, DEFAULT_LIMIT};
use crate::uri::{build_uri, QueryValue};

/// Ranking categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RankingType {
    /// Top anime series.
    #[default]
    All,
    /// Top airing anime.
    Airing,
    /// Top upcoming anime.
    Upcoming,
    /// Top anime TV series.
    Tv,
    /// Top anime OVA series.
    Ova,
    /// Top anime movies.
    Movie,
    /// Top anime specials.
    Special,
    /// Top anime by popularity.
    Bypopularity,
    /// Top favorited anime.
    Favorite,
}

impl RankingType {
    pub const ALL: [RankingType; 9] = [
        Self::All,
        Self::Airing,
        Self::Upcoming,
        Self::Tv,
        Self::Ova,
        Self::Movie,
        Self::Special,
        Self::Bypopularity,
        Self::Favorite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Airing => "airing",
            Self::Upcoming => "upcoming",
            Self::Tv => "tv",
            Self::Ova => "ova",
            Self::Movie => "movie",
            Self::Special => "special",
            Self::Bypopularity => "bypopularity",
            Self::Favorite => "favorite",
        }
    }
}

impl fmt::Display for RankingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown ranking type '{s}'"))
    }
}

/// Position of an anime within a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingInfo {
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_rank: Option<u32>,
}

/// An anime paired with its ranking position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAnime {
    pub anime: AnimeNode,
    pub ranking: RankingInfo,
}

/// Query parameters for [`MalClient::get_anime_ranking`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingQuery {
    pub ranking_type: RankingType,
    /// Defaults to 100. Zero is treated as unset.
    pub limit: Option<u32>,
    /// Defaults to 0.
    pub offset: Option<u32>,
    pub fields: Option<Vec<AnimeField>>,
}

impl RankingQuery {
    pub fn new(ranking_type: RankingType) -> Self {
        Self {
            ranking_type,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = AnimeField>) -> Self {
        self.fields = Some(fields.into_iter().collect());
        self
    }
}

impl MalClient {
    /// Anime ranked within a category, paired with their ranking info.
    ///
    /// # Errors
    ///
    /// Returns the mapped upstream status, or
    /// [`MalError::Network`](crate::MalError::Network).
    #[tracing::instrument(skip(self))]
    pub async fn get_anime_ranking(&self, query: &RankingQuery) -> Result<Vec<RankedAnime>> {
        let auth = self.credentials().auth_scheme();
        let url = build_uri(
            self.endpoint("anime/ranking")?.as_str(),
            [
                ("ranking_type", Some(QueryValue::from(query.ranking_type.as_str()))),
                (
                    "limit",
                    Some(query.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT).into()),
                ),
                ("offset", Some(query.offset.unwrap_or(0).into())),
                ("fields", Some(field_list(query.fields.as_deref()).into())),
            ],
        )?;

        if query.fields.is_some() {
            let page: Page<RankedNode<PartialAnime>> = self.fetch_json(url, &auth).await?;
            Ok(page
                .into_iter()
                .map(|item| RankedAnime {
                    anime: Projected::Partial(item.node),
                    ranking: item.ranking,
                })
                .collect())
        } else {
            let page: Page<RankedNode<Anime>> = self.fetch_json(url, &auth).await?;
            Ok(page
                .into_iter()
                .map(|item| RankedAnime {
                    anime: Projected::Full(item.node),
                    ranking: item.ranking,
                })
                .collect())
        }
    }
}
