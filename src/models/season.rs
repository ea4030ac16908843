//! Seasonal anime listing.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::client::MalClient;
use crate::error::Result;
use crate::fields::{field_list, AnimeField};
use crate::models::projection::AnimeNode;
use crate::uri::{build_uri, QueryValue};

/// A broadcast quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// January to March.
    Winter,
    /// April to June.
    Spring,
    /// July to September.
    Summer,
    /// October to December.
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|season| season.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown season '{s}': expected winter, spring, summer or fall"))
    }
}

/// The season an anime started airing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSeason {
    pub year: u32,
    pub season: Season,
}

/// Sort order for seasonal listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeasonSort {
    /// Highest score first.
    AnimeScore,
    /// Most list users first.
    AnimeNumListUsers,
}

impl SeasonSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnimeScore => "anime_score",
            Self::AnimeNumListUsers => "anime_num_list_users",
        }
    }
}

impl fmt::Display for SeasonSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "anime_score" => Ok(Self::AnimeScore),
            "anime_num_list_users" => Ok(Self::AnimeNumListUsers),
            other => Err(format!(
                "unknown sort '{other}': expected anime_score or anime_num_list_users"
            )),
        }
    }
}

/// Query parameters for [`MalClient::get_seasonal_anime`].
///
/// `sort`, `limit` and `offset` are only sent when set; the server's own
/// defaults apply otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonalQuery {
    pub year: u32,
    pub season: Season,
    pub sort: Option<SeasonSort>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub fields: Option<Vec<AnimeField>>,
}

impl SeasonalQuery {
    pub fn new(year: u32, season: Season) -> Self {
        Self {
            year,
            season,
            sort: None,
            limit: None,
            offset: None,
            fields: None,
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SeasonSort) -> Self {
        self.sort = Some(sort);
        self
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
    /// Anime that started airing in the given year and season.
    ///
    /// # Errors
    ///
    /// Returns the mapped upstream status (a year with no data is
    /// [`MalError::NotFound`](crate::MalError::NotFound)), or
    /// [`MalError::Network`](crate::MalError::Network).
    #[tracing::instrument(skip(self))]
    pub async fn get_seasonal_anime(&self, query: &SeasonalQuery) -> Result<Vec<AnimeNode>> {
        let auth = self.credentials().auth_scheme();
        let path = format!("anime/season/{}/{}", query.year, query.season);
        let url = build_uri(
            self.endpoint(&path)?.as_str(),
            [
                ("sort", query.sort.map(|s| QueryValue::from(s.as_str()))),
                ("limit", query.limit.map(QueryValue::from)),
                ("offset", query.offset.map(QueryValue::from)),
                ("fields", Some(field_list(query.fields.as_deref()).into())),
            ],
        )?;

        self.fetch_anime_nodes(url, &auth, query.fields.is_some())
            .await
    }
}
