//! Field selections.
//!
//! Every endpoint takes an optional list of fields. When the caller leaves
//! it out, the full list for the resource is sent instead, so the API is
//! never queried with its own default field set.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field name that can be requested from the API.
pub trait Field: Copy + PartialEq + 'static {
    /// Every field of the resource, in the order sent when no selection is
    /// given.
    const ALL: &'static [Self];

    /// Fields the API returns for every selection. Sent in place of an
    /// empty selection.
    const ANCHORS: &'static [Self];

    /// The wire name of the field.
    fn as_str(&self) -> &'static str;
}

/// A field name that is not part of the resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

/// Render a field selection as the comma-separated `fields` parameter.
///
/// `None` expands to [`Field::ALL`] and an empty selection to
/// [`Field::ANCHORS`], so the parameter is never empty. Duplicates are
/// dropped, keeping the first occurrence.
pub fn field_list<F: Field>(selected: Option<&[F]>) -> String {
    let fields = match selected {
        None => F::ALL,
        Some([]) => F::ANCHORS,
        Some(fields) => fields,
    };
    let mut seen: Vec<F> = Vec::with_capacity(fields.len());
    for field in fields {
        if !seen.contains(field) {
            seen.push(*field);
        }
    }
    seen.iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_field<F: Field>(s: &str) -> Result<F, UnknownField> {
    let s = s.trim();
    F::ALL
        .iter()
        .copied()
        .find(|f| f.as_str() == s)
        .ok_or_else(|| UnknownField(s.to_string()))
}

/// Fields of a list resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnimeField {
    Id,
    Title,
    MainPicture,
    AlternativeTitles,
    StartDate,
    EndDate,
    Synopsis,
    Mean,
    Rank,
    Popularity,
    NumListUsers,
    NumScoringUsers,
    Nsfw,
    Genres,
    CreatedAt,
    UpdatedAt,
    MediaType,
    Status,
    MyListStatus,
    NumEpisodes,
    StartSeason,
    Broadcast,
    Source,
    AverageEpisodeDuration,
    Rating,
    Studios,
}

impl Field for AnimeField {
    const ANCHORS: &'static [Self] = &[Self::Id, Self::Title];

    const ALL: &'static [Self] = &[
        Self::Status,
        Self::Nsfw,
        Self::Studios,
        Self::Rating,
        Self::AverageEpisodeDuration,
        Self::Source,
        Self::Broadcast,
        Self::StartSeason,
        Self::Id,
        Self::Mean,
        Self::Rank,
        Self::Title,
        Self::Genres,
        Self::EndDate,
        Self::Synopsis,
        Self::StartDate,
        Self::Popularity,
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::MediaType,
        Self::MainPicture,
        Self::NumEpisodes,
        Self::NumListUsers,
        Self::MyListStatus,
        Self::NumScoringUsers,
        Self::AlternativeTitles,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::MainPicture => "main_picture",
            Self::AlternativeTitles => "alternative_titles",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Synopsis => "synopsis",
            Self::Mean => "mean",
            Self::Rank => "rank",
            Self::Popularity => "popularity",
            Self::NumListUsers => "num_list_users",
            Self::NumScoringUsers => "num_scoring_users",
            Self::Nsfw => "nsfw",
            Self::Genres => "genres",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::MediaType => "media_type",
            Self::Status => "status",
            Self::MyListStatus => "my_list_status",
            Self::NumEpisodes => "num_episodes",
            Self::StartSeason => "start_season",
            Self::Broadcast => "broadcast",
            Self::Source => "source",
            Self::AverageEpisodeDuration => "average_episode_duration",
            Self::Rating => "rating",
            Self::Studios => "studios",
        }
    }
}

impl fmt::Display for AnimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimeField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field(s)
    }
}

/// Fields of a detail resource: every [`AnimeField`] plus the detail-only
/// ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnimeDetailField {
    Id,
    Title,
    MainPicture,
    AlternativeTitles,
    StartDate,
    EndDate,
    Synopsis,
    Mean,
    Rank,
    Popularity,
    NumListUsers,
    NumScoringUsers,
    Nsfw,
    Genres,
    CreatedAt,
    UpdatedAt,
    MediaType,
    Status,
    MyListStatus,
    NumEpisodes,
    StartSeason,
    Broadcast,
    Source,
    AverageEpisodeDuration,
    Rating,
    Studios,
    Pictures,
    Background,
    RelatedAnime,
    RelatedManga,
    Recommendations,
    Statistics,
}

impl Field for AnimeDetailField {
    const ANCHORS: &'static [Self] = &[Self::Id, Self::Title];

    const ALL: &'static [Self] = &[
        Self::Status,
        Self::Nsfw,
        Self::Studios,
        Self::Rating,
        Self::AverageEpisodeDuration,
        Self::Source,
        Self::Broadcast,
        Self::StartSeason,
        Self::Id,
        Self::Mean,
        Self::Rank,
        Self::Title,
        Self::Genres,
        Self::EndDate,
        Self::Synopsis,
        Self::StartDate,
        Self::Popularity,
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::MediaType,
        Self::MainPicture,
        Self::NumEpisodes,
        Self::NumListUsers,
        Self::MyListStatus,
        Self::NumScoringUsers,
        Self::AlternativeTitles,
        Self::Pictures,
        Self::Background,
        Self::RelatedAnime,
        Self::RelatedManga,
        Self::Recommendations,
        Self::Statistics,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pictures => "pictures",
            Self::Background => "background",
            Self::RelatedAnime => "related_anime",
            Self::RelatedManga => "related_manga",
            Self::Recommendations => "recommendations",
            Self::Statistics => "statistics",
            Self::Id => "id",
            Self::Title => "title",
            Self::MainPicture => "main_picture",
            Self::AlternativeTitles => "alternative_titles",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Synopsis => "synopsis",
            Self::Mean => "mean",
            Self::Rank => "rank",
            Self::Popularity => "popularity",
            Self::NumListUsers => "num_list_users",
            Self::NumScoringUsers => "num_scoring_users",
            Self::Nsfw => "nsfw",
            Self::Genres => "genres",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::MediaType => "media_type",
            Self::Status => "status",
            Self::MyListStatus => "my_list_status",
            Self::NumEpisodes => "num_episodes",
            Self::StartSeason => "start_season",
            Self::Broadcast => "broadcast",
            Self::Source => "source",
            Self::AverageEpisodeDuration => "average_episode_duration",
            Self::Rating => "rating",
            Self::Studios => "studios",
        }
    }
}

impl From<AnimeField> for AnimeDetailField {
    fn from(field: AnimeField) -> Self {
        match field {
            AnimeField::Id => Self::Id,
            AnimeField::Title => Self::Title,
            AnimeField::MainPicture => Self::MainPicture,
            AnimeField::AlternativeTitles => Self::AlternativeTitles,
            AnimeField::StartDate => Self::StartDate,
            AnimeField::EndDate => Self::EndDate,
            AnimeField::Synopsis => Self::Synopsis,
            AnimeField::Mean => Self::Mean,
            AnimeField::Rank => Self::Rank,
            AnimeField::Popularity => Self::Popularity,
            AnimeField::NumListUsers => Self::NumListUsers,
            AnimeField::NumScoringUsers => Self::NumScoringUsers,
            AnimeField::Nsfw => Self::Nsfw,
            AnimeField::Genres => Self::Genres,
            AnimeField::CreatedAt => Self::CreatedAt,
            AnimeField::UpdatedAt => Self::UpdatedAt,
            AnimeField::MediaType => Self::MediaType,
            AnimeField::Status => Self::Status,
            AnimeField::MyListStatus => Self::MyListStatus,
            AnimeField::NumEpisodes => Self::NumEpisodes,
            AnimeField::StartSeason => Self::StartSeason,
            AnimeField::Broadcast => Self::Broadcast,
            AnimeField::Source => Self::Source,
            AnimeField::AverageEpisodeDuration => Self::AverageEpisodeDuration,
            AnimeField::Rating => Self::Rating,
            AnimeField::Studios => Self::Studios,
        }
    }
}

impl TryFrom<AnimeDetailField> for AnimeField {
    type Error = AnimeDetailField;

    /// Fails for the detail-only fields, returning them unchanged.
    fn try_from(field: AnimeDetailField) -> Result<Self, Self::Error> {
        AnimeField::ALL
            .iter()
            .copied()
            .find(|f| AnimeDetailField::from(*f) == field)
            .ok_or(field)
    }
}

impl fmt::Display for AnimeDetailField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimeDetailField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_selection_expands_to_all() {
        let list = field_list::<AnimeField>(None);
        assert_eq!(list.split(',').count(), AnimeField::ALL.len());
        assert!(list.starts_with("status,nsfw,studios"));
        assert!(list.ends_with("num_scoring_users,alternative_titles"));

        let detail = field_list::<AnimeDetailField>(None);
        assert_eq!(detail.split(',').count(), 32);
        assert!(detail.ends_with("recommendations,statistics"));
    }

    #[test]
    fn test_selection_keeps_order_and_drops_duplicates() {
        let list = field_list(Some(&[
            AnimeField::Mean,
            AnimeField::StartDate,
            AnimeField::Mean,
            AnimeField::Id,
        ][..]));
        assert_eq!(list, "mean,start_date,id");
    }

    #[test]
    fn test_empty_selection_sends_anchors() {
        assert_eq!(field_list::<AnimeField>(Some(&[])), "id,title");
        assert_eq!(field_list::<AnimeDetailField>(Some(&[])), "id,title");
    }

    #[test]
    fn test_wire_names_round_trip_through_serde_and_from_str() {
        for field in AnimeDetailField::ALL {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, serde_json::Value::String(field.as_str().to_string()));
            assert_eq!(field.as_str().parse::<AnimeDetailField>().unwrap(), *field);
        }
        for field in AnimeField::ALL {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, serde_json::Value::String(field.as_str().to_string()));
            assert_eq!(
                AnimeDetailField::from(*field).as_str(),
                field.as_str(),
                "detail field name must match list field name"
            );
        }
    }

    #[test]
    fn test_unknown_field() {
        let err = "sypnosis".parse::<AnimeField>().unwrap_err();
        assert_eq!(err, UnknownField("sypnosis".to_string()));
        assert!("statistics".parse::<AnimeField>().is_err());
        assert!("statistics".parse::<AnimeDetailField>().is_ok());
    }

    #[test]
    fn test_detail_only_fields_do_not_narrow() {
        assert_eq!(
            AnimeField::try_from(AnimeDetailField::Pictures),
            Err(AnimeDetailField::Pictures)
        );
        assert_eq!(
            AnimeField::try_from(AnimeDetailField::Mean),
            Ok(AnimeField::Mean)
        );
    }
}
