//! Movie catalog records and lookup.
//!
//! The catalog is owned elsewhere; searches only read from it. Records are
//! plain data so they can be declared in the configuration file.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use sceneseek_common::{Error, Language, MovieId, ProfileId, Result, SourceType};

/// An alternative title recorded for a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeTitle {
    pub title: String,
    #[serde(default)]
    pub language: Language,
    pub source_type: SourceType,
}

impl AlternativeTitle {
    pub fn new(title: impl Into<String>, language: Language, source_type: SourceType) -> Self {
        Self {
            title: title.into(),
            language,
            source_type,
        }
    }

    /// Whether this title is a translation (rather than a generic alias).
    pub fn is_translation(&self) -> bool {
        self.source_type == SourceType::Translation
    }
}

/// A movie in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,

    /// Canonical display title.
    pub title: String,

    #[serde(default)]
    pub year: Option<u16>,

    #[serde(default)]
    pub imdb_id: Option<String>,

    pub profile_id: ProfileId,

    #[serde(default)]
    pub alternative_titles: Vec<AlternativeTitle>,
}

/// Resolves movies by id.
pub trait MovieCatalog: Send + Sync {
    /// Fetch a movie, failing with [`Error::NotFound`] when the id is unknown.
    fn get_movie(&self, id: MovieId) -> Result<Movie>;
}

/// A [`MovieCatalog`] backed by a map, populated from configuration.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    movies: HashMap<MovieId, Movie>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a movie.
    pub fn insert(&mut self, movie: Movie) {
        self.movies.insert(movie.id, movie);
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl FromIterator<Movie> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for movie in iter {
            catalog.insert(movie);
        }
        catalog
    }
}

impl MovieCatalog for InMemoryCatalog {
    fn get_movie(&self, id: MovieId) -> Result<Movie> {
        self.movies
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("movie", id))
    }
}
