use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::version::Version;
use crate::common::error::HelperError;

/// Sort direction for tag listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(HelperError::validation_error(
                "direction",
                "expected ASC or DESC",
                Some(s.to_string()),
            )),
        }
    }
}

/// Total order over tag names.
///
/// Tags that parse as versions compare numerically and sort after every tag
/// that does not; unparseable tags compare as raw strings among themselves.
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// All tags of a repository, ordered by [`compare_tags`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagSequence {
    tags: Vec<String>,
    direction: SortDirection,
}

impl TagSequence {
    pub fn new(tags: impl IntoIterator<Item = String>, direction: SortDirection) -> Self {
        let mut tags: Vec<String> = tags.into_iter().collect();
        tags.sort_by(|a, b| compare_tags(a, b));
        tags.dedup();
        if direction == SortDirection::Desc {
            tags.reverse();
        }
        Self { tags, direction }
    }

    /// Builds a sequence from newline separated `git tag` output.
    pub fn from_listing(listing: &str, direction: SortDirection) -> Self {
        Self::new(
            listing
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
            direction,
        )
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    /// Highest tag that parses as a version, regardless of direction.
    pub fn highest_version(&self) -> Option<&str> {
        self.tags
            .iter()
            .filter_map(|tag| Version::parse(tag).map(|v| (v, tag)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, tag)| tag.as_str())
    }

    /// Consecutive `(earlier, later)` pairs in sequence order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

impl<'a> IntoIterator for &'a TagSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
