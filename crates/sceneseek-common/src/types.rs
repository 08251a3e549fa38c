//! Core type definitions shared by profiles, the catalog, and search.
//!
//! All enums serialize in lowercase so they can be written by hand in the
//! TOML configuration file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spoken or title language.
///
/// Each language carries a stable numeric id. Id `0` is reserved for
/// [`Language::Unknown`]; format specifications refer to languages by id and
/// only positive ids denote a concrete language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Unknown,
    English,
    French,
    Spanish,
    German,
    Italian,
    Danish,
    Dutch,
    Japanese,
    Icelandic,
    Chinese,
    Russian,
    Polish,
    Vietnamese,
    Swedish,
    Norwegian,
    Finnish,
    Turkish,
    Portuguese,
    Flemish,
    Greek,
    Korean,
    Hungarian,
    Hebrew,
    Lithuanian,
    Czech,
}

const LANGUAGES: [Language; 26] = [
    Language::Unknown,
    Language::English,
    Language::French,
    Language::Spanish,
    Language::German,
    Language::Italian,
    Language::Danish,
    Language::Dutch,
    Language::Japanese,
    Language::Icelandic,
    Language::Chinese,
    Language::Russian,
    Language::Polish,
    Language::Vietnamese,
    Language::Swedish,
    Language::Norwegian,
    Language::Finnish,
    Language::Turkish,
    Language::Portuguese,
    Language::Flemish,
    Language::Greek,
    Language::Korean,
    Language::Hungarian,
    Language::Hebrew,
    Language::Lithuanian,
    Language::Czech,
];

impl Language {
    /// Numeric id of this language.
    pub fn id(self) -> i32 {
        LANGUAGES
            .iter()
            .position(|l| *l == self)
            .map(|i| i as i32)
            .unwrap_or(0)
    }

    /// Look a language up by numeric id. Unassigned ids yield `None`.
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| LANGUAGES.get(i).copied())
    }

    /// `false` only for [`Language::Unknown`].
    pub fn is_known(self) -> bool {
        self != Language::Unknown
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug names are the canonical English names.
        write!(f, "{:?}", self)
    }
}

/// Where an alternative title was recorded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Imported from TMDB alternative titles.
    Tmdb,
    /// Imported from scene mappings.
    Mappings,
    /// Added by a user.
    User,
    /// Learned from an indexer release.
    Indexer,
    /// A generic alias without language semantics.
    Alias,
    /// An official translation of the title into a specific language.
    Translation,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tmdb => write!(f, "tmdb"),
            Self::Mappings => write!(f, "mappings"),
            Self::User => write!(f, "user"),
            Self::Indexer => write!(f, "indexer"),
            Self::Alias => write!(f, "alias"),
            Self::Translation => write!(f, "translation"),
        }
    }
}

/// Which indexer toggle a search consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Background search whose results are grabbed without a human.
    Automatic,
    /// Search whose results are shown to a human for manual selection.
    Interactive,
}

impl SearchMode {
    /// Map an "interactive" flag onto a mode.
    pub fn from_interactive(interactive: bool) -> Self {
        if interactive {
            Self::Interactive
        } else {
            Self::Automatic
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Automatic => write!(f, "automatic"),
            Self::Interactive => write!(f, "interactive"),
        }
    }
}
