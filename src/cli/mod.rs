//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the malapi binary.

use clap::{Parser, Subcommand};

use crate::{AnimeDetailField, AnimeField, RankingType, Season, SeasonSort};

/// MyAnimeList API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "malapi", about = "MyAnimeList API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and responses to stderr.
    #[arg(long, short, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search anime by title.
    Search {
        /// Search text.
        q: String,

        /// Maximum number of results (default 100).
        #[arg(long)]
        limit: Option<u32>,

        /// Number of results to skip.
        #[arg(long)]
        offset: Option<u32>,

        /// Comma-separated fields to return (default: all).
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<AnimeField>>,
    },

    /// Show a single anime.
    Detail {
        /// MyAnimeList anime id.
        id: u64,

        /// Comma-separated fields to return (default: all).
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<AnimeDetailField>>,
    },

    /// List ranked anime.
    Ranking {
        /// Ranking category.
        #[arg(default_value = "all")]
        ranking_type: RankingType,

        /// Maximum number of results (default 100).
        #[arg(long)]
        limit: Option<u32>,

        /// Number of results to skip.
        #[arg(long)]
        offset: Option<u32>,

        /// Comma-separated fields to return (default: all).
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<AnimeField>>,
    },

    /// List anime from one broadcast season.
    Seasonal {
        /// Year, e.g. 2023.
        year: u32,

        /// winter, spring, summer or fall.
        season: Season,

        /// anime_score or anime_num_list_users.
        #[arg(long)]
        sort: Option<SeasonSort>,

        /// Maximum number of results.
        #[arg(long)]
        limit: Option<u32>,

        /// Number of results to skip.
        #[arg(long)]
        offset: Option<u32>,

        /// Comma-separated fields to return (default: all).
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<AnimeField>>,
    },

    /// List anime suggested for the authenticated user (needs MAL_ACCESS_TOKEN).
    Suggestions {
        /// Maximum number of results.
        #[arg(long)]
        limit: Option<u32>,

        /// Number of results to skip.
        #[arg(long)]
        offset: Option<u32>,

        /// Comma-separated fields to return (default: all).
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<AnimeField>>,
    },
}
