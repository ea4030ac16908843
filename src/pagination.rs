//! Response envelopes for list endpoints.

use serde::{Deserialize, Serialize};

use crate::models::RankingInfo;

/// Default `limit` sent by search and ranking when the caller gives none.
pub const DEFAULT_LIMIT: u32 = 100;

/// The list envelope returned by every list endpoint:
/// `{ "data": [...], "paging": { "previous": ..., "next": ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub data: Vec<T>,
    /// Cursor URLs for neighbouring pages. Exposed, never followed.
    #[serde(default)]
    pub paging: Paging,
}

/// Pagination cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// URL of the previous page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// URL of the next page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl Paging {
    /// Whether the server advertised a next page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A list item wrapping a resource: `{ "node": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node<T> {
    pub node: T,
}

/// A ranking list item: `{ "node": {...}, "ranking": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedNode<T> {
    pub node: T,
    pub ranking: RankingInfo,
}

impl<T> Page<T> {
    /// Create a page from items and cursors.
    #[must_use]
    pub fn new(data: Vec<T>, paging: Paging) -> Self {
        Self { data, paging }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            paging: self.paging,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> Page<Node<T>> {
    /// Unwrap `data[].node`, discarding the cursors.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.data.into_iter().map(|n| n.node).collect()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
