//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    AiringStatus, AlternativeTitles, Anime, AnimeDetail, Broadcast, DayOfWeek, Genre, MediaRef,
    MediaType, Nsfw, Picture, Rating, Recommendation, RelatedAnime, RelationType, Season, Source,
    StartSeason, Statistics, StatusCounts, Studio,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The catalog served by [`MockServer::start`](super::MockServer::start).
pub struct DefaultScenario {
    pub anime: Vec<AnimeDetail>,
    pub suggestions: Vec<u64>,
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

fn genre(id: u64, name: &str) -> Genre {
    Genre {
        id,
        name: name.to_string(),
    }
}

fn studio(id: u64, name: &str) -> Studio {
    Studio {
        id,
        name: name.to_string(),
    }
}

fn picture(path: &str) -> Picture {
    Picture {
        large: Some(format!("https://cdn.myanimelist.net/images/anime/{path}l.jpg")),
        medium: format!("https://cdn.myanimelist.net/images/anime/{path}.jpg"),
    }
}

fn media_ref(id: u64, title: &str) -> MediaRef {
    MediaRef {
        id,
        title: title.to_string(),
        main_picture: None,
    }
}

impl Fixtures {
    // =========================================================================
    // Anime Fixtures
    // =========================================================================

    /// Create an anime with only the fields a full record requires.
    pub fn minimal_anime(id: u64, title: &str) -> AnimeDetail {
        AnimeDetail {
            anime: Anime {
                id,
                title: title.to_string(),
                main_picture: None,
                alternative_titles: None,
                start_date: None,
                end_date: None,
                synopsis: None,
                mean: None,
                rank: None,
                popularity: None,
                num_list_users: 0,
                num_scoring_users: 0,
                nsfw: Some(Nsfw::White),
                genres: vec![],
                created_at: timestamp(1_200_000_000),
                updated_at: timestamp(1_700_000_000),
                media_type: MediaType::Tv,
                status: AiringStatus::FinishedAiring,
                my_list_status: None,
                num_episodes: 0,
                start_season: None,
                broadcast: None,
                source: None,
                average_episode_duration: None,
                rating: None,
                studios: vec![],
            },
            pictures: vec![],
            background: None,
            related_anime: vec![],
            related_manga: vec![],
            recommendations: vec![],
            statistics: None,
        }
    }

    /// Create a scored TV series that started in the given season.
    #[allow(clippy::too_many_arguments)]
    pub fn series(
        id: u64,
        title: &str,
        episodes: u32,
        mean: f64,
        rank: u32,
        popularity: u32,
        members: u64,
        year: u32,
        season: Season,
    ) -> AnimeDetail {
        let mut detail = Self::minimal_anime(id, title);
        let a = &mut detail.anime;
        a.num_episodes = episodes;
        a.mean = Some(mean);
        a.rank = Some(rank);
        a.popularity = Some(popularity);
        a.num_list_users = members;
        a.num_scoring_users = members * 2 / 3;
        a.start_season = Some(StartSeason { year, season });
        a.average_episode_duration = Some(1440);
        detail
    }

    /// Create a list-status statistics block.
    pub fn statistics(
        watching: u64,
        completed: u64,
        on_hold: u64,
        dropped: u64,
        planned: u64,
    ) -> Statistics {
        Statistics {
            num_list_users: watching + completed + on_hold + dropped + planned,
            status: StatusCounts {
                watching,
                completed,
                on_hold,
                dropped,
                plan_to_watch: planned,
            },
        }
    }

    // =========================================================================
    // Scenario Fixtures
    // =========================================================================

    /// A small catalog spanning several seasons, media types and statuses.
    pub fn default_scenario() -> DefaultScenario {
        let mut fmab = Self::series(
            5114,
            "Fullmetal Alchemist: Brotherhood",
            64,
            9.09,
            2,
            3,
            3_400_000,
            2009,
            Season::Spring,
        );
        {
            let a = &mut fmab.anime;
            a.main_picture = Some(picture("1223/96541"));
            a.alternative_titles = Some(AlternativeTitles {
                synonyms: vec!["Hagane no Renkinjutsushi: Fullmetal Alchemist".to_string()],
                en: Some("Fullmetal Alchemist: Brotherhood".to_string()),
                ja: Some("鋼の錬金術師 FULLMETAL ALCHEMIST".to_string()),
            });
            a.start_date = Some("2009-04-05".to_string());
            a.end_date = Some("2010-07-04".to_string());
            a.synopsis = Some(
                "After a horrific alchemy experiment goes wrong in the Elric household, \
                 brothers Edward and Alphonse are left in a catastrophic new reality."
                    .to_string(),
            );
            a.genres = vec![
                genre(1, "Action"),
                genre(2, "Adventure"),
                genre(8, "Drama"),
                genre(10, "Fantasy"),
            ];
            a.studios = vec![studio(4, "Bones")];
            a.source = Some(Source::Manga);
            a.rating = Some(Rating::R);
            a.broadcast = Some(Broadcast {
                day_of_the_week: DayOfWeek::Sunday,
                start_time: Some("17:00".to_string()),
            });
        }
        fmab.pictures = vec![picture("1223/96541")];
        fmab.statistics = Some(Self::statistics(180_000, 2_900_000, 60_000, 30_000, 230_000));

        let mut frieren = Self::series(
            52991,
            "Sousou no Frieren",
            28,
            9.31,
            1,
            150,
            1_000_000,
            2023,
            Season::Fall,
        );
        {
            let a = &mut frieren.anime;
            a.alternative_titles = Some(AlternativeTitles {
                synonyms: vec!["Frieren at the Funeral".to_string()],
                en: Some("Frieren: Beyond Journey's End".to_string()),
                ja: Some("葬送のフリーレン".to_string()),
            });
            a.start_date = Some("2023-09-29".to_string());
            a.end_date = Some("2024-03-22".to_string());
            a.genres = vec![genre(2, "Adventure"), genre(8, "Drama"), genre(10, "Fantasy")];
            a.studios = vec![studio(11, "Madhouse")];
            a.source = Some(Source::Manga);
            a.rating = Some(Rating::Pg13);
        }

        let mut opm = Self::series(
            30276,
            "One Punch Man",
            12,
            8.49,
            130,
            5,
            3_200_000,
            2015,
            Season::Fall,
        );
        {
            let a = &mut opm.anime;
            a.alternative_titles = Some(AlternativeTitles {
                synonyms: vec!["One Punch-Man".to_string(), "OPM".to_string()],
                en: Some("One-Punch Man".to_string()),
                ja: Some("ワンパンマン".to_string()),
            });
            a.start_date = Some("2015-10-05".to_string());
            a.end_date = Some("2015-12-21".to_string());
            a.genres = vec![genre(1, "Action"), genre(4, "Comedy")];
            a.studios = vec![studio(11, "Madhouse")];
            a.source = Some(Source::WebManga);
            a.rating = Some(Rating::R);
        }
        opm.related_anime = vec![RelatedAnime {
            node: media_ref(34134, "One Punch Man 2nd Season"),
            relation_type: RelationType::Sequel,
            relation_type_formatted: "Sequel".to_string(),
        }];

        let mut opm2 = Self::series(
            34134,
            "One Punch Man 2nd Season",
            12,
            7.5,
            2000,
            100,
            1_500_000,
            2019,
            Season::Spring,
        );
        {
            let a = &mut opm2.anime;
            a.alternative_titles = Some(AlternativeTitles {
                synonyms: vec!["One Punch-Man 2".to_string()],
                en: Some("One-Punch Man Season 2".to_string()),
                ja: Some("ワンパンマン".to_string()),
            });
            a.genres = vec![genre(1, "Action"), genre(4, "Comedy")];
            a.studios = vec![studio(7, "J.C.Staff")];
            a.source = Some(Source::WebManga);
            a.rating = Some(Rating::R);
        }
        opm2.related_anime = vec![RelatedAnime {
            node: media_ref(30276, "One Punch Man"),
            relation_type: RelationType::Prequel,
            relation_type_formatted: "Prequel".to_string(),
        }];

        let mut one_piece = Self::series(
            21,
            "One Piece",
            0,
            8.72,
            50,
            20,
            2_300_000,
            1999,
            Season::Fall,
        );
        {
            let a = &mut one_piece.anime;
            a.status = AiringStatus::CurrentlyAiring;
            a.start_date = Some("1999-10-20".to_string());
            a.genres = vec![genre(1, "Action"), genre(2, "Adventure"), genre(10, "Fantasy")];
            a.studios = vec![studio(18, "Toei Animation")];
            a.source = Some(Source::Manga);
            a.rating = Some(Rating::Pg13);
        }

        let mut steins_gate = Self::series(
            9253,
            "Steins;Gate",
            24,
            9.07,
            3,
            13,
            2_600_000,
            2011,
            Season::Spring,
        );
        {
            let a = &mut steins_gate.anime;
            a.genres = vec![genre(8, "Drama"), genre(24, "Sci-Fi"), genre(41, "Suspense")];
            a.studios = vec![studio(314, "White Fox")];
            a.source = Some(Source::VisualNovel);
            a.rating = Some(Rating::Pg13);
        }
        steins_gate.recommendations = vec![Recommendation {
            node: media_ref(5114, "Fullmetal Alchemist: Brotherhood"),
            num_recommendations: 42,
        }];

        let mut hxh = Self::series(
            11061,
            "Hunter x Hunter (2011)",
            148,
            9.03,
            4,
            10,
            2_900_000,
            2011,
            Season::Fall,
        );
        {
            let a = &mut hxh.anime;
            a.genres = vec![genre(1, "Action"), genre(2, "Adventure"), genre(10, "Fantasy")];
            a.studios = vec![studio(11, "Madhouse")];
            a.source = Some(Source::Manga);
            a.rating = Some(Rating::Pg13);
        }

        let mut spirited_away = Self::series(
            199,
            "Sen to Chihiro no Kamikakushi",
            1,
            8.77,
            40,
            35,
            1_900_000,
            2001,
            Season::Summer,
        );
        {
            let a = &mut spirited_away.anime;
            a.media_type = MediaType::Movie;
            a.alternative_titles = Some(AlternativeTitles {
                synonyms: vec![],
                en: Some("Spirited Away".to_string()),
                ja: Some("千と千尋の神隠し".to_string()),
            });
            a.average_episode_duration = Some(7500);
            a.genres = vec![genre(2, "Adventure"), genre(10, "Fantasy")];
            a.studios = vec![studio(21, "Studio Ghibli")];
            a.source = Some(Source::Original);
            a.rating = Some(Rating::Pg);
        }

        DefaultScenario {
            anime: vec![
                fmab,
                frieren,
                opm,
                opm2,
                one_piece,
                steins_gate,
                hxh,
                spirited_away,
            ],
            suggestions: vec![52991, 9253],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_anime() {
        let detail = Fixtures::minimal_anime(1, "Cowboy Bebop");
        assert_eq!(detail.anime.id, 1);
        assert_eq!(detail.anime.title, "Cowboy Bebop");
        assert!(detail.anime.mean.is_none());
    }

    #[test]
    fn test_default_scenario_ids_unique() {
        let scenario = Fixtures::default_scenario();
        let mut ids: Vec<u64> = scenario.anime.iter().map(|d| d.anime.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), scenario.anime.len());
        for id in &scenario.suggestions {
            assert!(ids.contains(id));
        }
    }

    #[test]
    fn test_fixture_round_trips_as_full_record() {
        let scenario = Fixtures::default_scenario();
        let json = serde_json::to_value(&scenario.anime[0]).unwrap();
        let back: AnimeDetail = serde_json::from_value(json).unwrap();
        assert_eq!(back.anime.id, scenario.anime[0].anime.id);
        assert_eq!(back.anime.genres, scenario.anime[0].anime.genres);
        assert_eq!(back.statistics, scenario.anime[0].statistics);
    }
}
