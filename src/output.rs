//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde::Serialize;

use crate::{Anime, AnimeDetail, PartialAnime, PartialAnimeDetail, Projected};

/// Trait for human-readable key-value output.
///
/// Implemented by record types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

/// Render an enum by its wire name.
fn wire<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn header(id: u64, title: &str) -> Vec<String> {
    let header = format!("Anime #{id}: {title}");
    let divider = "─".repeat(header.chars().count().max(30));
    vec![header, divider]
}

impl PrettyPrint for PartialAnime {
    fn pretty_print(&self) -> String {
        let mut lines = header(self.id, &self.title);

        if let Some(ref titles) = self.alternative_titles {
            if let Some(en) = titles.en.as_ref().filter(|s| !s.is_empty()) {
                lines.push(format!("English:        {}", en));
            }
            if let Some(ja) = titles.ja.as_ref().filter(|s| !s.is_empty()) {
                lines.push(format!("Japanese:       {}", ja));
            }
        }

        if let Some(ref media_type) = self.media_type {
            lines.push(format!("Type:           {}", wire(media_type)));
        }

        if let Some(ref status) = self.status {
            lines.push(format!("Status:         {}", wire(status)));
        }

        if let Some(episodes) = self.num_episodes {
            let episodes = if episodes == 0 {
                "unknown".to_string()
            } else {
                episodes.to_string()
            };
            lines.push(format!("Episodes:       {}", episodes));
        }

        if let Some(ref season) = self.start_season {
            lines.push(format!("Season:         {} {}", season.season, season.year));
        }

        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => lines.push(format!("Aired:          {} to {}", start, end)),
            (Some(start), None) => lines.push(format!("Aired:          {} to ?", start)),
            _ => {}
        }

        if let Some(mean) = self.mean {
            lines.push(format!("Score:          {:.2}", mean));
        }

        if let Some(rank) = self.rank {
            lines.push(format!("Rank:           #{}", rank));
        }

        if let Some(popularity) = self.popularity {
            lines.push(format!("Popularity:     #{}", popularity));
        }

        if let Some(users) = self.num_list_users {
            lines.push(format!("Members:        {}", users));
        }

        if let Some(genres) = self.genres.as_ref().filter(|g| !g.is_empty()) {
            let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
            lines.push(format!("Genres:         {}", names.join(", ")));
        }

        if let Some(studios) = self.studios.as_ref().filter(|s| !s.is_empty()) {
            let names: Vec<&str> = studios.iter().map(|s| s.name.as_str()).collect();
            lines.push(format!("Studios:        {}", names.join(", ")));
        }

        if let Some(ref source) = self.source {
            lines.push(format!("Source:         {}", wire(source)));
        }

        if let Some(ref rating) = self.rating {
            lines.push(format!("Rating:         {}", wire(rating)));
        }

        if let Some(ref status) = self.my_list_status {
            if let Some(ref watch) = status.status {
                lines.push(format!(
                    "My List:        {} ({} eps, score {})",
                    wire(watch),
                    status.num_episodes_watched,
                    status.score
                ));
            }
        }

        if let Some(ref synopsis) = self.synopsis {
            lines.push(String::new());
            lines.push(synopsis.clone());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Anime {
    fn pretty_print(&self) -> String {
        PartialAnime::from(self.clone()).pretty_print()
    }
}

impl PrettyPrint for PartialAnimeDetail {
    fn pretty_print(&self) -> String {
        let mut out = self.anime.pretty_print();

        if let Some(ref stats) = self.statistics {
            out.push_str(&format!(
                "\n\nStatistics:     {} watching, {} completed, {} on hold, {} dropped, {} planned",
                stats.status.watching,
                stats.status.completed,
                stats.status.on_hold,
                stats.status.dropped,
                stats.status.plan_to_watch
            ));
        }

        if let Some(related) = self.related_anime.as_ref().filter(|r| !r.is_empty()) {
            out.push_str("\n\nRelated:");
            for entry in related.iter() {
                let relation = if entry.relation_type_formatted.is_empty() {
                    wire(&entry.relation_type)
                } else {
                    entry.relation_type_formatted.clone()
                };
                out.push_str(&format!("\n  {:<20} {}", relation, entry.node.title));
            }
        }

        if let Some(recs) = self.recommendations.as_ref().filter(|r| !r.is_empty()) {
            out.push_str("\n\nRecommended:");
            for rec in recs.iter() {
                out.push_str(&format!("\n  {} ({})", rec.node.title, rec.num_recommendations));
            }
        }

        if let Some(background) = self.background.as_ref().filter(|b| !b.is_empty()) {
            out.push_str("\n\n");
            out.push_str(background);
        }

        out
    }
}

impl PrettyPrint for AnimeDetail {
    fn pretty_print(&self) -> String {
        PartialAnimeDetail::from(self.clone()).pretty_print()
    }
}

impl<F: PrettyPrint, P: PrettyPrint> PrettyPrint for Projected<F, P> {
    fn pretty_print(&self) -> String {
        match self {
            Projected::Full(f) => f.pretty_print(),
            Projected::Partial(p) => p.pretty_print(),
        }
    }
}
