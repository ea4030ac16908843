//! MyAnimeList API client library.
//!
//! A typed client for the MyAnimeList v2 REST API. Every endpoint takes an
//! optional field selection: leave it out and every field is requested and
//! decoded into the full record; pass one and only those fields come back,
//! decoded into the partial record.
//!
//! # Quick Start
//!
//! ```no_run
//! use malapi::{AnimeField, DetailQuery, MalClient, RankingQuery, RankingType, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> malapi::Result<()> {
//!     // Create client from environment variables
//!     let client = MalClient::from_env()?;
//!
//!     // Search, asking for two fields only
//!     let results = client
//!         .search_anime(&SearchQuery::new("one punch man").with_fields([AnimeField::Mean]))
//!         .await?;
//!     println!("Found {} anime", results.len());
//!
//!     // Full detail record
//!     let detail = client.get_anime_detail(&DetailQuery::new(5114)).await?;
//!     println!("Detail: {}", detail.title());
//!
//!     // Top airing anime
//!     let ranking = client
//!         .get_anime_ranking(&RankingQuery::new(RankingType::Airing).with_limit(10))
//!         .await?;
//!     for entry in &ranking {
//!         println!("#{} {}", entry.ranking.rank, entry.anime.title());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Authentication
//!
//! Requests carry `Authorization: Bearer <token>` when a non-empty access
//! token is set, and `X-MAL-CLIENT-ID: <id>` otherwise. Suggestions need an
//! access token and fail locally without one.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `MAL_CLIENT_ID` (required) - Your MyAnimeList client id
//! - `MAL_ACCESS_TOKEN` (optional) - OAuth access token
//! - `MAL_API_URL` (optional) - Base URL (defaults to `https://api.myanimelist.net/v2`)

pub mod cli;
mod client;
mod error;
pub mod fields;
pub mod mcp;
mod models;
pub mod output;
mod pagination;
pub mod uri;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{AuthScheme, Credentials, MalClient, CLIENT_ID_HEADER, DEFAULT_API_URL};
pub use error::{MalError, Result, LOCAL_FAILURE_STATUS};
pub use fields::{AnimeDetailField, AnimeField, Field, UnknownField};
pub use pagination::{Node, Page, Paging, RankedNode, DEFAULT_LIMIT};

// Re-export models
pub use models::{
    // Anime types
    AiringStatus,
    AlternativeTitles,
    Anime,
    Broadcast,
    DayOfWeek,
    Genre,
    ListStatus,
    MediaType,
    Nsfw,
    PartialAnime,
    Picture,
    Rating,
    SearchQuery,
    Source,
    Studio,
    SuggestionQuery,
    WatchStatus,
    // Detail types
    AnimeDetail,
    DetailQuery,
    MediaRef,
    PartialAnimeDetail,
    Recommendation,
    RelatedAnime,
    RelatedManga,
    RelationType,
    Statistics,
    StatusCounts,
    // Projection types
    Anchored,
    AnimeDetailRecord,
    AnimeNode,
    Projected,
    // Ranking types
    RankedAnime,
    RankingInfo,
    RankingQuery,
    RankingType,
    // Season types
    Season,
    SeasonSort,
    SeasonalQuery,
    StartSeason,
};
