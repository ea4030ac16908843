//! Mock server state management.
//!
//! Provides the in-memory anime catalog for the mock MyAnimeList API server.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{AiringStatus, AnimeDetail, MediaType, RankingType, Season, SeasonSort};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Catalog indexed by anime id. List endpoints project from these records.
    pub anime: BTreeMap<u64, AnimeDetail>,

    /// Ids returned, in order, by the suggestions endpoint.
    pub suggestions: Vec<u64>,

    /// Optional access token. If set, bearer requests must carry exactly this token.
    pub required_token: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an anime to the catalog.
    pub fn with_anime(mut self, anime: AnimeDetail) -> Self {
        self.anime.insert(anime.anime.id, anime);
        self
    }

    /// Set the ids served as suggestions.
    pub fn with_suggestions(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.suggestions = ids.into_iter().collect();
        self
    }

    /// Set the required access token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Get an anime by id.
    pub fn get_anime(&self, id: u64) -> Option<&AnimeDetail> {
        self.anime.get(&id)
    }

    /// Anime whose title or alternative titles contain `q`, ignoring case.
    pub fn search(&self, q: &str) -> Vec<&AnimeDetail> {
        let needle = q.to_lowercase();
        self.anime
            .values()
            .filter(|d| {
                let a = &d.anime;
                let alternative = a.alternative_titles.iter().flat_map(|t| {
                    t.synonyms
                        .iter()
                        .chain(t.en.iter())
                        .chain(t.ja.iter())
                });
                std::iter::once(&a.title)
                    .chain(alternative)
                    .any(|title| title.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Anime in ranking order for a category.
    pub fn ranking(&self, ranking_type: RankingType) -> Vec<&AnimeDetail> {
        let mut ranked: Vec<&AnimeDetail> = match ranking_type {
            RankingType::All | RankingType::Bypopularity | RankingType::Favorite => {
                self.anime.values().collect()
            }
            RankingType::Airing => self
                .anime
                .values()
                .filter(|d| d.anime.status == AiringStatus::CurrentlyAiring)
                .collect(),
            RankingType::Upcoming => self
                .anime
                .values()
                .filter(|d| d.anime.status == AiringStatus::NotYetAired)
                .collect(),
            RankingType::Tv => self.anime.values().filter(of_media(MediaType::Tv)).collect(),
            RankingType::Ova => self.anime.values().filter(of_media(MediaType::Ova)).collect(),
            RankingType::Movie => self.anime.values().filter(of_media(MediaType::Movie)).collect(),
            RankingType::Special => self
                .anime
                .values()
                .filter(of_media(MediaType::Special))
                .collect(),
        };

        match ranking_type {
            RankingType::Bypopularity | RankingType::Upcoming => {
                ranked.sort_by_key(|d| d.anime.popularity.unwrap_or(u32::MAX))
            }
            RankingType::Favorite => {
                ranked.sort_by(|a, b| b.anime.num_list_users.cmp(&a.anime.num_list_users))
            }
            _ => ranked.sort_by(|a, b| by_score(b).total_cmp(&by_score(a))),
        }
        ranked
    }

    /// Anime that started in `year`/`season`, or `None` when nothing in the
    /// catalog started in `year` at all.
    pub fn seasonal(
        &self,
        year: u32,
        season: Season,
        sort: Option<SeasonSort>,
    ) -> Option<Vec<&AnimeDetail>> {
        let in_year: Vec<&AnimeDetail> = self
            .anime
            .values()
            .filter(|d| d.anime.start_season.is_some_and(|s| s.year == year))
            .collect();
        if in_year.is_empty() {
            return None;
        }

        let mut matching: Vec<&AnimeDetail> = in_year
            .into_iter()
            .filter(|d| d.anime.start_season.is_some_and(|s| s.season == season))
            .collect();
        match sort {
            Some(SeasonSort::AnimeScore) => {
                matching.sort_by(|a, b| by_score(b).total_cmp(&by_score(a)))
            }
            Some(SeasonSort::AnimeNumListUsers) => {
                matching.sort_by(|a, b| b.anime.num_list_users.cmp(&a.anime.num_list_users))
            }
            None => {}
        }
        Some(matching)
    }

    /// Suggested anime that exist in the catalog.
    pub fn suggested(&self) -> Vec<&AnimeDetail> {
        self.suggestions
            .iter()
            .filter_map(|id| self.anime.get(id))
            .collect()
    }
}

fn of_media(media_type: MediaType) -> impl Fn(&&AnimeDetail) -> bool {
    move |d| d.anime.media_type == media_type
}

fn by_score(d: &AnimeDetail) -> f64 {
    d.anime.mean.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    fn sample_state() -> MockState {
        let mut movie = Fixtures::minimal_anime(199, "Sen to Chihiro no Kamikakushi");
        movie.anime.media_type = MediaType::Movie;
        movie.anime.mean = Some(8.77);

        let mut airing = Fixtures::minimal_anime(21, "One Piece");
        airing.anime.status = AiringStatus::CurrentlyAiring;
        airing.anime.mean = Some(8.72);

        let mut top = Fixtures::minimal_anime(5114, "Fullmetal Alchemist: Brotherhood");
        top.anime.mean = Some(9.1);

        MockState::new()
            .with_anime(movie)
            .with_anime(airing)
            .with_anime(top)
    }

    #[test]
    fn test_state_add_and_get_anime() {
        let state = sample_state();
        let anime = state.get_anime(21);
        assert!(anime.is_some());
        assert_eq!(anime.unwrap().anime.title, "One Piece");
        assert!(state.get_anime(1).is_none());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let state = sample_state();
        assert_eq!(state.search("ONE PIECE").len(), 1);
        assert_eq!(state.search("alchemist").len(), 1);
        assert!(state.search("bebop").is_empty());
    }

    #[test]
    fn test_ranking_orders_by_score() {
        let state = sample_state();
        let ids: Vec<u64> = state
            .ranking(RankingType::All)
            .iter()
            .map(|d| d.anime.id)
            .collect();
        assert_eq!(ids, vec![5114, 199, 21]);

        let airing = state.ranking(RankingType::Airing);
        assert_eq!(airing.len(), 1);
        assert_eq!(airing[0].anime.id, 21);

        let movies = state.ranking(RankingType::Movie);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].anime.id, 199);
    }

    #[test]
    fn test_seasonal_unknown_year_is_none() {
        let mut anime = Fixtures::minimal_anime(1, "Cowboy Bebop");
        anime.anime.start_season = Some(crate::StartSeason {
            year: 1998,
            season: Season::Spring,
        });
        let state = MockState::new().with_anime(anime);

        assert_eq!(state.seasonal(1998, Season::Spring, None).map(|v| v.len()), Some(1));
        assert_eq!(state.seasonal(1998, Season::Fall, None).map(|v| v.len()), Some(0));
        assert!(state.seasonal(3000, Season::Spring, None).is_none());
    }
}
