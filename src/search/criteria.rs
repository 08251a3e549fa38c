//! Search criteria and their construction from a movie and its profile.

use std::fmt;

use sceneseek_common::{Result, SearchMode};

use crate::catalog::Movie;
use crate::profiles::{Profile, ProfileStore};

/// Everything an indexer needs to search for one movie.
///
/// Built once per search and never mutated afterwards, so a single instance
/// is shared read-only by every concurrent indexer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    movie: Movie,
    user_invoked: bool,
    interactive: bool,
    scene_titles: Vec<String>,
}

impl SearchCriteria {
    /// Build criteria for `movie` using an already resolved `profile`.
    ///
    /// Scene titles start with the canonical title, followed by every distinct
    /// alternative title that is a translation into one of the profile's
    /// wanted languages, in first-seen order. Aliases and other non-translated
    /// titles never appear. No string appears twice.
    pub fn new(movie: Movie, profile: &Profile, user_invoked: bool, interactive: bool) -> Self {
        let wanted = profile.wanted_languages();

        let mut scene_titles = vec![movie.title.clone()];
        for alternative in movie
            .alternative_titles
            .iter()
            .filter(|alt| alt.is_translation() && wanted.contains(&alt.language))
        {
            if !scene_titles.contains(&alternative.title) {
                scene_titles.push(alternative.title.clone());
            }
        }

        Self {
            movie,
            user_invoked,
            interactive,
            scene_titles,
        }
    }

    /// Resolve the movie's profile from `profiles` and build criteria.
    ///
    /// Fails with `NotFound` when the profile id does not resolve.
    pub fn for_movie(
        movie: Movie,
        profiles: &dyn ProfileStore,
        user_invoked: bool,
        interactive: bool,
    ) -> Result<Self> {
        let profile = profiles.get(movie.profile_id)?;
        Ok(Self::new(movie, &profile, user_invoked, interactive))
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    /// A human explicitly triggered this search.
    pub fn user_invoked(&self) -> bool {
        self.user_invoked
    }

    /// Results will be presented for manual selection.
    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn mode(&self) -> SearchMode {
        SearchMode::from_interactive(self.interactive)
    }

    /// Titles to present to indexers, canonical title first.
    pub fn scene_titles(&self) -> &[String] {
        &self.scene_titles
    }
}

impl fmt::Display for SearchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.movie.title)
    }
}
