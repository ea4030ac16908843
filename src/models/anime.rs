//! Anime list resource, search and suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::{AuthScheme, MalClient};
use crate::error::{MalError, Result};
use crate::fields::{field_list, AnimeField};
use crate::models::projection::{Anchored, AnimeNode, Projected};
use crate::models::season::StartSeason;
use crate::pagination::{Node, Page, DEFAULT_LIMIT};
use crate::uri::{build_uri, QueryValue};

/// An anime as returned by the list endpoints when every field is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub main_picture: Option<Picture>,
    #[serde(default)]
    pub alternative_titles: Option<AlternativeTitles>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub popularity: Option<u32>,
    pub num_list_users: u64,
    pub num_scoring_users: u64,
    #[serde(default)]
    pub nsfw: Option<Nsfw>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub media_type: MediaType,
    pub status: AiringStatus,
    /// Only present when authenticated with a user access token.
    #[serde(default)]
    pub my_list_status: Option<ListStatus>,
    /// 0 when unknown.
    pub num_episodes: u32,
    #[serde(default)]
    pub start_season: Option<StartSeason>,
    #[serde(default)]
    pub broadcast: Option<Broadcast>,
    #[serde(default)]
    pub source: Option<Source>,
    /// Seconds.
    #[serde(default)]
    pub average_episode_duration: Option<u32>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub studios: Vec<Studio>,
}

/// An anime restricted to a caller-chosen field selection.
///
/// `id` and `title` are always returned by the API; everything else is
/// present only if it was selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialAnime {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_picture: Option<Picture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_titles: Option<AlternativeTitles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_list_users: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_scoring_users: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<Nsfw>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AiringStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_list_status: Option<ListStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_season: Option<StartSeason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<Broadcast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_episode_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub studios: Option<Vec<Studio>>,
}

impl From<Anime> for PartialAnime {
    fn from(a: Anime) -> Self {
        Self {
            id: a.id,
            title: a.title,
            main_picture: a.main_picture,
            alternative_titles: a.alternative_titles,
            start_date: a.start_date,
            end_date: a.end_date,
            synopsis: a.synopsis,
            mean: a.mean,
            rank: a.rank,
            popularity: a.popularity,
            num_list_users: Some(a.num_list_users),
            num_scoring_users: Some(a.num_scoring_users),
            nsfw: a.nsfw,
            genres: Some(a.genres),
            created_at: Some(a.created_at),
            updated_at: Some(a.updated_at),
            media_type: Some(a.media_type),
            status: Some(a.status),
            my_list_status: a.my_list_status,
            num_episodes: Some(a.num_episodes),
            start_season: a.start_season,
            broadcast: a.broadcast,
            source: a.source,
            average_episode_duration: a.average_episode_duration,
            rating: a.rating,
            studios: Some(a.studios),
        }
    }
}

impl Anchored for Anime {
    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Anchored for PartialAnime {
    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// Cover image URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    #[serde(default)]
    pub large: Option<String>,
    pub medium: String,
}

/// Titles in other languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeTitles {
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub ja: Option<String>,
}

/// Content safety rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nsfw {
    /// Safe for work.
    White,
    /// May not be safe for work.
    Gray,
    /// Not safe for work.
    Black,
    #[serde(other)]
    Unknown,
}

/// A genre tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// An animation studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Studio {
    pub id: u64,
    pub name: String,
}

/// Broadcast format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Tv,
    Ova,
    Movie,
    Special,
    Ona,
    Music,
    TvSpecial,
    Cm,
    Pv,
    #[serde(other)]
    Unknown,
}

/// Airing status of an anime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiringStatus {
    FinishedAiring,
    CurrentlyAiring,
    NotYetAired,
    #[serde(other)]
    Unknown,
}

/// A user's list status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

/// The authenticated user's entry for an anime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStatus {
    #[serde(default)]
    pub status: Option<WatchStatus>,
    #[serde(default)]
    pub score: u8,
    #[serde(default)]
    pub num_episodes_watched: u32,
    #[serde(default)]
    pub is_rewatching: bool,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub finish_date: Option<String>,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub num_times_rewatched: u32,
    #[serde(default)]
    pub rewatch_value: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comments: String,
    pub updated_at: DateTime<Utc>,
}

/// Broadcast weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    #[serde(other)]
    Other,
}

/// Weekly broadcast slot (JST).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    pub day_of_the_week: DayOfWeek,
    /// `HH:MM`
    #[serde(default)]
    pub start_time: Option<String>,
}

/// Original work the anime is adapted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Original,
    Manga,
    #[serde(rename = "4_koma_manga")]
    FourKomaManga,
    WebManga,
    DigitalManga,
    Novel,
    LightNovel,
    VisualNovel,
    Game,
    CardGame,
    Book,
    PictureBook,
    Radio,
    Music,
    MixedMedia,
    WebNovel,
    #[serde(other)]
    Other,
}

/// Audience rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "g")]
    G,
    #[serde(rename = "pg")]
    Pg,
    #[serde(rename = "pg_13")]
    Pg13,
    #[serde(rename = "r")]
    R,
    #[serde(rename = "r+")]
    RPlus,
    #[serde(rename = "rx")]
    Rx,
    #[serde(other, rename = "unknown")]
    Unknown,
}

/// Query parameters for [`MalClient::search_anime`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search text.
    pub q: String,
    /// Maximum results (upstream caps this at 100). Defaults to 100.
    pub limit: Option<u32>,
    /// Results to skip. Defaults to 0.
    pub offset: Option<u32>,
    /// Fields to return. `None` requests every field and yields
    /// [`Projected::Full`] records.
    pub fields: Option<Vec<AnimeField>>,
}

impl SearchQuery {
    /// Search for `q` with default paging and every field.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
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

/// Query parameters for [`MalClient::get_suggested_anime`].
///
/// Unlike search, absent `limit`/`offset` are left to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub fields: Option<Vec<AnimeField>>,
}

impl SuggestionQuery {
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
    /// Search anime by title.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use malapi::{AnimeField, MalClient, SearchQuery};
    ///
    /// # async fn example() -> malapi::Result<()> {
    /// let client = MalClient::new("client-id", None)?;
    /// let results = client
    ///     .search_anime(&SearchQuery::new("one punch man").with_limit(10).with_fields([AnimeField::Mean]))
    ///     .await?;
    /// for anime in &results {
    ///     println!("{} {}", anime.id(), anime.title());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the mapped upstream status, or [`MalError::Network`].
    #[tracing::instrument(skip(self))]
    pub async fn search_anime(&self, query: &SearchQuery) -> Result<Vec<AnimeNode>> {
        let auth = self.credentials().auth_scheme();
        let url = build_uri(
            self.endpoint("anime")?.as_str(),
            [
                ("q", Some(QueryValue::from(query.q.as_str()))),
                ("limit", Some(query.limit.unwrap_or(DEFAULT_LIMIT).into())),
                ("offset", Some(query.offset.unwrap_or(0).into())),
                ("fields", Some(field_list(query.fields.as_deref()).into())),
            ],
        )?;

        self.fetch_anime_nodes(url, &auth, query.fields.is_some())
            .await
    }

    /// Anime suggested for the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`MalError::MissingCredential`] without sending anything when
    /// no access token is set; otherwise the mapped upstream status, or
    /// [`MalError::Network`].
    #[tracing::instrument(skip(self))]
    pub async fn get_suggested_anime(&self, query: &SuggestionQuery) -> Result<Vec<AnimeNode>> {
        let credentials = self.credentials();
        if !credentials.has_access_token() {
            tracing::debug!("suggestions need an access token; not sending request");
            return Err(MalError::MissingCredential);
        }
        let auth = credentials.auth_scheme();

        let url = build_uri(
            self.endpoint("anime/suggestions")?.as_str(),
            [
                ("limit", query.limit.map(QueryValue::from)),
                ("offset", query.offset.map(QueryValue::from)),
                ("fields", Some(field_list(query.fields.as_deref()).into())),
            ],
        )?;

        self.fetch_anime_nodes(url, &auth, query.fields.is_some())
            .await
    }

    /// Fetch a `{data: [{node}]}` envelope and unwrap the nodes, decoding
    /// them as partial records when a field selection was sent.
    pub(crate) async fn fetch_anime_nodes(
        &self,
        url: Url,
        auth: &AuthScheme,
        partial: bool,
    ) -> Result<Vec<AnimeNode>> {
        if partial {
            let page: Page<Node<PartialAnime>> = self.fetch_json(url, auth).await?;
            Ok(page.into_nodes().into_iter().map(Projected::Partial).collect())
        } else {
            let page: Page<Node<Anime>> = self.fetch_json(url, auth).await?;
            Ok(page.into_nodes().into_iter().map(Projected::Full).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_anime_json() -> serde_json::Value {
        json!({
            "id": 30276,
            "title": "One Punch Man",
            "main_picture": {"medium": "https://cdn.myanimelist.net/images/anime/12/76049.jpg"},
            "alternative_titles": {"synonyms": ["One Punch-Man"], "en": "One-Punch Man", "ja": "ワンパンマン"},
            "start_date": "2015-10-05",
            "end_date": "2015-12-21",
            "synopsis": "The seemingly unimpressive Saitama...",
            "mean": 8.5,
            "rank": 130,
            "popularity": 5,
            "num_list_users": 3_500_000,
            "num_scoring_users": 2_300_000,
            "nsfw": "white",
            "genres": [{"id": 1, "name": "Action"}],
            "created_at": "2015-03-02T06:03:11+00:00",
            "updated_at": "2024-01-01T00:00:00+00:00",
            "media_type": "tv",
            "status": "finished_airing",
            "num_episodes": 12,
            "start_season": {"year": 2015, "season": "fall"},
            "broadcast": {"day_of_the_week": "monday", "start_time": "01:05"},
            "source": "web_manga",
            "average_episode_duration": 1440,
            "rating": "r",
            "studios": [{"id": 11, "name": "Madhouse"}]
        })
    }

    #[test]
    fn test_full_anime_decodes() {
        let anime: Anime = serde_json::from_value(full_anime_json()).unwrap();
        assert_eq!(anime.id, 30276);
        assert_eq!(anime.media_type, MediaType::Tv);
        assert_eq!(anime.source, Some(Source::WebManga));
        assert_eq!(anime.rating, Some(Rating::R));
        assert_eq!(anime.nsfw, Some(Nsfw::White));
        assert_eq!(anime.broadcast.unwrap().day_of_the_week, DayOfWeek::Monday);
    }

    #[test]
    fn test_unknown_enum_values_fall_back() {
        let mut value = full_anime_json();
        value["media_type"] = json!("something_new");
        value["source"] = json!("4_koma_manga");
        let anime: Anime = serde_json::from_value(value).unwrap();
        assert_eq!(anime.media_type, MediaType::Unknown);
        assert_eq!(anime.source, Some(Source::FourKomaManga));
    }

    #[test]
    fn test_new_upstream_values_do_not_fail_decoding() {
        let mut value = full_anime_json();
        value["nsfw"] = json!("purple");
        value["status"] = json!("on_hiatus");
        value["rating"] = json!("nc_17");
        value["source"] = json!("audio_drama");
        let anime: Anime = serde_json::from_value(value).unwrap();
        assert_eq!(anime.nsfw, Some(Nsfw::Unknown));
        assert_eq!(anime.status, AiringStatus::Unknown);
        assert_eq!(anime.rating, Some(Rating::Unknown));
        assert_eq!(anime.source, Some(Source::Other));
    }

    #[test]
    fn test_partial_anime_only_anchors_required() {
        let anime: PartialAnime =
            serde_json::from_value(json!({"id": 1, "title": "Cowboy Bebop", "mean": 8.75})).unwrap();
        assert_eq!(anime.mean, Some(8.75));
        assert!(anime.nsfw.is_none());

        let out = serde_json::to_value(&anime).unwrap();
        assert_eq!(out, json!({"id": 1, "title": "Cowboy Bebop", "mean": 8.75}));
    }

    #[test]
    fn test_full_converts_to_partial() {
        let anime: Anime = serde_json::from_value(full_anime_json()).unwrap();
        let partial = PartialAnime::from(anime.clone());
        assert_eq!(partial.id, anime.id);
        assert_eq!(partial.num_episodes, Some(12));
        assert_eq!(partial.genres.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_search_query_builder() {
        let query = SearchQuery::new("naruto")
            .with_limit(4)
            .with_offset(2)
            .with_fields([AnimeField::Mean]);
        assert_eq!(query.q, "naruto");
        assert_eq!(query.limit, Some(4));
        assert_eq!(query.offset, Some(2));
        assert_eq!(query.fields, Some(vec![AnimeField::Mean]));
    }
}
