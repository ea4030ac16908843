//! Query URL construction.

use std::fmt;

use url::Url;

use crate::error::Result;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Free text. Empty text is treated as absent.
    Text(String),
    /// An integer, rendered as plain decimal.
    Int(i64),
}

impl QueryValue {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Build a request URL from a base URL and an ordered list of parameters.
///
/// Parameters whose value is `None` or empty text are skipped. Parameters
/// already present on `base_url` are kept ahead of the new ones, and the new
/// ones follow the iteration order of `params`.
///
/// # Errors
///
/// Returns [`MalError::MalformedUrl`](crate::MalError::MalformedUrl) if
/// `base_url` is not an absolute URL.
pub fn build_uri<'a, I>(base_url: &str, params: I) -> Result<Url>
where
    I: IntoIterator<Item = (&'a str, Option<QueryValue>)>,
{
    let mut url = Url::parse(base_url)?;

    let pairs: Vec<(&str, String)> = params
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(v) if !v.is_empty() => Some((key, v.to_string())),
            _ => None,
        })
        .collect();

    // Touching query_pairs_mut on a URL without a query leaves a dangling '?'
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
}
