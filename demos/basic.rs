//! Basic example demonstrating the MyAnimeList API client.
//!
//! Run with:
//! ```
//! MAL_CLIENT_ID=your-client-id cargo run --example basic
//! ```

use malapi::{
    AnimeDetailField, AnimeField, DetailQuery, MalClient, RankingQuery, RankingType, SearchQuery,
    Season, SeasonSort, SeasonalQuery, SuggestionQuery,
};

#[tokio::main]
async fn main() -> malapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating MyAnimeList client...");
    let client = MalClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Search with a narrow field selection
    println!("\n--- Searching 'one punch man' ---");
    let results = client
        .search_anime(
            &SearchQuery::new("one punch man")
                .with_limit(5)
                .with_fields([AnimeField::Mean, AnimeField::NumEpisodes]),
        )
        .await?;
    println!("Found {} anime", results.len());

    for node in &results {
        let partial = node.clone().into_partial();
        println!(
            "  - {} ({}) score {:?}, {:?} episodes",
            partial.title, partial.id, partial.mean, partial.num_episodes
        );
    }

    // Full detail for the first result
    if let Some(first) = results.first() {
        println!("\n--- Anime Details ---");
        let detail = client.get_anime_detail(&DetailQuery::new(first.id())).await?;
        if let Some(full) = detail.as_full() {
            println!("Title: {}", full.anime.title);
            println!("  Type: {:?}", full.anime.media_type);
            println!("  Status: {:?}", full.anime.status);
            println!("  Genres: {}", full.anime.genres.len());
            println!("  Related anime: {}", full.related_anime.len());
        }

        // Only the statistics block
        let stats = client
            .get_anime_detail(
                &DetailQuery::new(first.id()).with_fields([AnimeDetailField::Statistics]),
            )
            .await?;
        if let Some(s) = stats.as_partial().and_then(|p| p.statistics.as_ref()) {
            println!("  Completed by: {}", s.status.completed);
        }
    }

    // Top airing
    println!("\n--- Top 5 Airing ---");
    let ranking = client
        .get_anime_ranking(
            &RankingQuery::new(RankingType::Airing)
                .with_limit(5)
                .with_fields([AnimeField::Mean]),
        )
        .await?;
    for entry in &ranking {
        println!("  #{} {}", entry.ranking.rank, entry.anime.title());
    }

    // A season, most popular first
    println!("\n--- Fall 2023 ---");
    let seasonal = client
        .get_seasonal_anime(
            &SeasonalQuery::new(2023, Season::Fall)
                .with_sort(SeasonSort::AnimeNumListUsers)
                .with_limit(5)
                .with_fields([AnimeField::NumListUsers]),
        )
        .await?;
    for node in &seasonal {
        println!("  - {}", node.title());
    }

    // Suggestions need MAL_ACCESS_TOKEN
    if client.credentials().has_access_token() {
        println!("\n--- Suggestions ---");
        let suggestions = client
            .get_suggested_anime(&SuggestionQuery::default().with_limit(5))
            .await?;
        for node in &suggestions {
            println!("  - {}", node.title());
        }
    }

    println!("\nDone!");
    Ok(())
}
