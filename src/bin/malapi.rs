//! MyAnimeList API CLI binary.
//!
//! A command-line interface for querying the MyAnimeList API.

use clap::Parser;
use malapi::cli::{Cli, Command};
use malapi::output::PrettyPrint;
use malapi::{
    AnimeNode, DetailQuery, MalClient, MalError, PartialAnime, RankedAnime, RankingQuery,
    SearchQuery, SeasonalQuery, SuggestionQuery,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let client = match MalClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            report(&e);
            eprintln!("Hint: Set MAL_CLIENT_ID (and optionally MAL_ACCESS_TOKEN) environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            if matches!(e, MalError::MissingCredential) {
                eprintln!("Hint: Set MAL_ACCESS_TOKEN to an OAuth access token");
            }
            ExitCode::FAILURE
        }
    }
}

fn report(err: &MalError) {
    eprintln!("Error: {} (status {})", err, err.status());
}

async fn run(client: &MalClient, cli: Cli) -> malapi::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Search {
            q,
            limit,
            offset,
            fields,
        } => {
            let query = SearchQuery {
                q,
                limit,
                offset,
                fields,
            };
            let results = client.search_anime(&query).await?;
            output_list(&results, json, |n| AnimeRow::from(n));
        }
        Command::Detail { id, fields } => {
            let query = DetailQuery {
                anime_id: id,
                fields,
            };
            let detail = client.get_anime_detail(&query).await?;
            output_single(&detail, json);
        }
        Command::Ranking {
            ranking_type,
            limit,
            offset,
            fields,
        } => {
            let query = RankingQuery {
                ranking_type,
                limit,
                offset,
                fields,
            };
            let ranking = client.get_anime_ranking(&query).await?;
            output_list(&ranking, json, |r| RankedRow::from(r));
        }
        Command::Seasonal {
            year,
            season,
            sort,
            limit,
            offset,
            fields,
        } => {
            let query = SeasonalQuery {
                year,
                season,
                sort,
                limit,
                offset,
                fields,
            };
            let results = client.get_seasonal_anime(&query).await?;
            output_list(&results, json, |n| AnimeRow::from(n));
        }
        Command::Suggestions {
            limit,
            offset,
            fields,
        } => {
            let query = SuggestionQuery {
                limit,
                offset,
                fields,
            };
            let results = client.get_suggested_anime(&query).await?;
            output_list(&results, json, |n| AnimeRow::from(n));
        }
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(item: &T) -> String {
    serde_json::to_string_pretty(item).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) {
    if json {
        println!("{}", to_json(item));
    } else {
        println!("{}", item.pretty_print());
    }
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", to_json(items));
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} results", items.len());
    }
}

// Table row types for non-JSON output

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn wire<T: Serialize>(value: Option<T>) -> String {
    value
        .and_then(|v| serde_json::to_value(v).ok())
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

#[derive(Tabled)]
struct AnimeRow {
    id: u64,
    title: String,
    #[tabled(rename = "type")]
    media_type: String,
    episodes: String,
    score: String,
    season: String,
}

impl From<&PartialAnime> for AnimeRow {
    fn from(a: &PartialAnime) -> Self {
        Self {
            id: a.id,
            title: a.title.clone(),
            media_type: wire(a.media_type),
            episodes: opt(a.num_episodes.filter(|&n| n > 0)),
            score: opt(a.mean.map(|m| format!("{m:.2}"))),
            season: opt(a.start_season.map(|s| format!("{} {}", s.season, s.year))),
        }
    }
}

impl From<&AnimeNode> for AnimeRow {
    fn from(node: &AnimeNode) -> Self {
        AnimeRow::from(&node.clone().into_partial())
    }
}

#[derive(Tabled)]
struct RankedRow {
    rank: u32,
    #[tabled(rename = "prev")]
    previous_rank: String,
    #[tabled(inline)]
    anime: AnimeRow,
}

impl From<&RankedAnime> for RankedRow {
    fn from(r: &RankedAnime) -> Self {
        Self {
            rank: r.ranking.rank,
            previous_rank: opt(r.ranking.previous_rank),
            anime: AnimeRow::from(&r.anime),
        }
    }
}
