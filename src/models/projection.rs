//! Full versus field-selected records.

use serde::Serialize;

use crate::models::anime::{Anime, PartialAnime};
use crate::models::detail::{AnimeDetail, PartialAnimeDetail};

/// Fields the API returns regardless of the field selection.
pub trait Anchored {
    fn id(&self) -> u64;
    fn title(&self) -> &str;
}

/// A record decoded either with every field (`Full`) or with a caller-chosen
/// subset (`Partial`). Which one is decided by whether the caller passed a
/// field selection, and every record of one response has the same variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Projected<F, P> {
    Full(F),
    Partial(P),
}

/// A list resource as returned by search, seasonal, suggestions and ranking.
pub type AnimeNode = Projected<Anime, PartialAnime>;

/// A detail resource as returned by the single-anime lookup.
pub type AnimeDetailRecord = Projected<AnimeDetail, PartialAnimeDetail>;

impl<F, P> Projected<F, P> {
    /// Whether every field was requested.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    /// The full record, if every field was requested.
    pub fn as_full(&self) -> Option<&F> {
        match self {
            Self::Full(f) => Some(f),
            Self::Partial(_) => None,
        }
    }

    /// The partial record, if a field selection was sent.
    pub fn as_partial(&self) -> Option<&P> {
        match self {
            Self::Full(_) => None,
            Self::Partial(p) => Some(p),
        }
    }

    /// Widen to the partial shape, which can represent either variant.
    pub fn into_partial(self) -> P
    where
        F: Into<P>,
    {
        match self {
            Self::Full(f) => f.into(),
            Self::Partial(p) => p,
        }
    }
}

impl<F: Anchored, P: Anchored> Projected<F, P> {
    pub fn id(&self) -> u64 {
        match self {
            Self::Full(f) => f.id(),
            Self::Partial(p) => p.id(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Full(f) => f.title(),
            Self::Partial(p) => p.title(),
        }
    }
}
