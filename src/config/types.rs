use serde::{Deserialize, Serialize};

use crate::catalog::{InMemoryCatalog, Movie};
use crate::profiles::{InMemoryProfileStore, Profile};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexers: Vec<IndexerConfig>,

    #[serde(default)]
    pub profiles: Vec<Profile>,

    #[serde(default)]
    pub movies: Vec<Movie>,
}

impl Config {
    /// Movie catalog seeded from the `[[movies]]` tables.
    pub fn catalog(&self) -> InMemoryCatalog {
        self.movies.iter().cloned().collect()
    }

    /// Profile store seeded from the `[[profiles]]` tables.
    pub fn profile_store(&self) -> InMemoryProfileStore {
        self.profiles.iter().cloned().collect()
    }

    /// The `[[indexers]]` entry with this name.
    pub fn indexer(&self, name: &str) -> Option<&IndexerConfig> {
        self.indexers.iter().find(|i| i.name == name)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexerConfig {
    pub name: String,

    #[serde(default)]
    pub kind: IndexerKind,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    /// Newznab category ids to search (default: movies, 2000)
    #[serde(default = "default_categories")]
    pub categories: Vec<u32>,

    /// Include in RSS/background searches (default: true)
    #[serde(default = "default_true")]
    pub enable_automatic_search: bool,

    /// Include in manual searches (default: true)
    #[serde(default = "default_true")]
    pub enable_interactive_search: bool,

    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl IndexerConfig {
    /// Enabled for at least one search mode.
    pub fn is_enabled(&self) -> bool {
        self.enable_automatic_search || self.enable_interactive_search
    }
}

/// Wire dialect spoken by an indexer.
///
/// Both kinds go through the same Newznab client and request JSON output
/// (`o=json`). A Torznab endpoint that only answers in XML (Jackett, for one)
/// fails every search with a parse error, which is reported as that
/// indexer's failure. The kind is informational until an XML reader exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexerKind {
    #[default]
    Newznab,
    Torznab,
}

impl std::fmt::Display for IndexerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexerKind::Newznab => write!(f, "newznab"),
            IndexerKind::Torznab => write!(f, "torznab"),
        }
    }
}

fn default_categories() -> Vec<u32> {
    vec![2000]
}

fn default_true() -> bool {
    true
}

fn default_requests_per_second() -> u32 {
    2
}

fn default_timeout() -> u64 {
    30
}
