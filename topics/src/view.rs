//! Derived topic view: filter, sort, and emptiness classification.
//!
//! Everything here is pure. Inputs are borrowed and the result is a new
//! vector of shared handles, so the stored order is never disturbed.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use serde::{Deserialize, Serialize};

use crate::error::TopicError;
use crate::topic::Topic;

/// Display order for the topic list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::NameAsc, Self::NameDesc, Self::Newest, Self::Oldest];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    /// Menu label shown next to the sort selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "A-Z",
            Self::NameDesc => "Z-A",
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| TopicError::InvalidSortKey(s.to_owned()))
    }
}

/// Which affordance the list should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// No topics at all.
    Empty,
    /// Topics exist but none match the search.
    NoMatch,
    Populated,
}

impl ViewState {
    #[must_use]
    pub fn classify(total: usize, visible: usize) -> Self {
        if total == 0 {
            Self::Empty
        } else if visible == 0 {
            Self::NoMatch
        } else {
            Self::Populated
        }
    }
}

/// Case-insensitive substring match on name or content.
#[must_use]
pub fn matches(topic: &Topic, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    topic.name.to_lowercase().contains(&needle) || topic.content.to_lowercase().contains(&needle)
}

/// Root-locale collator, built once from compiled data.
fn root_collator() -> Option<&'static CollatorBorrowed<'static>> {
    static VALUE: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();
    VALUE
        .get_or_init(|| {
            Collator::try_new(CollatorPreferences::default(), CollatorOptions::default())
                .inspect_err(|e| tracing::warn!(error = %e, "root collator unavailable; using case-folded order"))
                .ok()
        })
        .as_ref()
}

/// Locale-aware collation for topic names (Unicode root order, lowercase
/// before uppercase on a tie). The raw string breaks any remaining tie.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    let order = match root_collator() {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };
    order.then_with(|| a.cmp(b))
}

/// Compare two topics under `key`.
#[must_use]
pub fn compare(a: &Topic, b: &Topic, key: SortKey) -> Ordering {
    match key {
        SortKey::NameAsc => collate(&a.name, &b.name),
        SortKey::NameDesc => collate(&b.name, &a.name),
        SortKey::Newest => b.updated_ms().cmp(&a.updated_ms()),
        SortKey::Oldest => a.updated_ms().cmp(&b.updated_ms()),
    }
}

/// Filter then sort. The input slice is left as-is.
#[must_use]
pub fn derive(topics: &[Arc<Topic>], query: &str, key: SortKey) -> Vec<Arc<Topic>> {
    let mut out: Vec<Arc<Topic>> = topics
        .iter()
        .filter(|topic| matches(topic, query))
        .cloned()
        .collect();
    out.sort_by(|a, b| compare(a, b, key));
    out
}
