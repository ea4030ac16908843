//! Single-anime detail lookup.

use serde::{Deserialize, Deserializer, Serialize};

use crate::client::MalClient;
use crate::error::Result;
use crate::fields::{field_list, AnimeDetailField};
use crate::models::anime::{Anime, PartialAnime, Picture};
use crate::models::projection::{Anchored, AnimeDetailRecord, Projected};
use crate::uri::build_uri;

/// An anime with every detail field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetail {
    #[serde(flatten)]
    pub anime: Anime,
    #[serde(default)]
    pub pictures: Vec<Picture>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub related_anime: Vec<RelatedAnime>,
    #[serde(default)]
    pub related_manga: Vec<RelatedManga>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

/// An anime detail restricted to a caller-chosen field selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialAnimeDetail {
    #[serde(flatten)]
    pub anime: PartialAnime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pictures: Option<Vec<Picture>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_anime: Option<Vec<RelatedAnime>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_manga: Option<Vec<RelatedManga>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
}

impl From<AnimeDetail> for PartialAnimeDetail {
    fn from(d: AnimeDetail) -> Self {
        Self {
            anime: d.anime.into(),
            pictures: Some(d.pictures),
            background: d.background,
            related_anime: Some(d.related_anime),
            related_manga: Some(d.related_manga),
            recommendations: Some(d.recommendations),
            statistics: d.statistics,
        }
    }
}

impl Anchored for AnimeDetail {
    fn id(&self) -> u64 {
        self.anime.id
    }

    fn title(&self) -> &str {
        &self.anime.title
    }
}

impl Anchored for PartialAnimeDetail {
    fn id(&self) -> u64 {
        self.anime.id
    }

    fn title(&self) -> &str {
        &self.anime.title
    }
}

/// Minimal reference to another entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub main_picture: Option<Picture>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Sequel,
    Prequel,
    AlternativeSetting,
    AlternativeVersion,
    SideStory,
    ParentStory,
    Summary,
    FullStory,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedAnime {
    pub node: MediaRef,
    pub relation_type: RelationType,
    #[serde(default)]
    pub relation_type_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedManga {
    #[serde(default)]
    pub node: Option<MediaRef>,
    pub relation_type: RelationType,
    #[serde(default)]
    pub relation_type_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub node: MediaRef,
    pub num_recommendations: u32,
}

/// List-user statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(deserialize_with = "deserialize_count")]
    pub num_list_users: u64,
    pub status: StatusCounts,
}

/// Number of users per list status. The API sends these as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub watching: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub completed: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub on_hold: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub dropped: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub plan_to_watch: u64,
}

fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Query parameters for [`MalClient::get_anime_detail`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailQuery {
    pub anime_id: u64,
    /// Fields to return. `None` requests every detail field and yields
    /// [`Projected::Full`].
    pub fields: Option<Vec<AnimeDetailField>>,
}

impl DetailQuery {
    pub fn new(anime_id: u64) -> Self {
        Self {
            anime_id,
            fields: None,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = AnimeDetailField>) -> Self {
        self.fields = Some(fields.into_iter().collect());
        self
    }
}

impl MalClient {
    /// Look up one anime by id.
    ///
    /// The detail endpoint returns the bare object, not a list envelope.
    ///
    /// # Errors
    ///
    /// Returns the mapped upstream status (unknown ids are
    /// [`MalError::NotFound`](crate::MalError::NotFound)), or
    /// [`MalError::Network`](crate::MalError::Network).
    #[tracing::instrument(skip(self))]
    pub async fn get_anime_detail(&self, query: &DetailQuery) -> Result<AnimeDetailRecord> {
        let auth = self.credentials().auth_scheme();
        let path = format!("anime/{}", query.anime_id);
        let url = build_uri(
            self.endpoint(&path)?.as_str(),
            [("fields", Some(field_list(query.fields.as_deref()).into()))],
        )?;

        if query.fields.is_some() {
            let detail: PartialAnimeDetail = self.fetch_json(url, &auth).await?;
            Ok(Projected::Partial(detail))
        } else {
            let detail: AnimeDetail = self.fetch_json(url, &auth).await?;
            Ok(Projected::Full(detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_statistics_accepts_strings_and_numbers() {
        let stats: Statistics = serde_json::from_value(json!({
            "num_list_users": 3_000_000,
            "status": {
                "watching": "100",
                "completed": 2000,
                "on_hold": "3",
                "dropped": "4",
                "plan_to_watch": "5"
            }
        }))
        .unwrap();
        assert_eq!(stats.status.watching, 100);
        assert_eq!(stats.status.completed, 2000);
        assert_eq!(stats.status.plan_to_watch, 5);
    }

    #[test]
    fn test_partial_detail_flattens() {
        let detail: PartialAnimeDetail = serde_json::from_value(json!({
            "id": 5114,
            "title": "Fullmetal Alchemist: Brotherhood",
            "mean": 9.09,
            "start_date": "2009-04-05",
            "related_anime": []
        }))
        .unwrap();
        assert_eq!(detail.anime.id, 5114);
        assert_eq!(detail.anime.mean, Some(9.09));
        assert_eq!(detail.related_anime, Some(vec![]));
        assert!(detail.statistics.is_none());

        let out = serde_json::to_value(&detail).unwrap();
        assert!(out.get("nsfw").is_none());
        assert!(out.get("genres").is_none());
        assert!(out.get("statistics").is_none());
        assert_eq!(out["start_date"], "2009-04-05");
    }

    #[test]
    fn test_detail_query_builder() {
        let query = DetailQuery::new(5114).with_fields([AnimeDetailField::Mean]);
        assert_eq!(query.anime_id, 5114);
        assert_eq!(query.fields, Some(vec![AnimeDetailField::Mean]));
    }
}
