//! Entry point for "search indexers for this movie".

use std::sync::Arc;

use anyhow::Result;
use sceneseek_common::MovieId;
use tracing::instrument;

use super::{IndexerDispatcher, SearchCriteria};
use crate::catalog::{Movie, MovieCatalog};
use crate::decision::Decision;
use crate::profiles::ProfileStore;

/// Builds criteria for a movie and dispatches them to the indexers.
#[derive(Clone)]
pub struct SearchService {
    catalog: Arc<dyn MovieCatalog>,
    profiles: Arc<dyn ProfileStore>,
    dispatcher: IndexerDispatcher,
}

impl SearchService {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        profiles: Arc<dyn ProfileStore>,
        dispatcher: IndexerDispatcher,
    ) -> Self {
        Self {
            catalog,
            profiles,
            dispatcher,
        }
    }

    /// Look up a movie by id and search for it.
    ///
    /// An unknown movie id fails with `NotFound` before any indexer is
    /// contacted.
    #[instrument(skip(self))]
    pub async fn search_by_movie_id(
        &self,
        movie_id: MovieId,
        user_invoked: bool,
        interactive: bool,
    ) -> Result<Vec<Decision>> {
        let movie = self.catalog.get_movie(movie_id)?;
        self.search_by_movie(movie, user_invoked, interactive).await
    }

    /// Search every enabled indexer for `movie` and return ranked decisions.
    pub async fn search_by_movie(
        &self,
        movie: Movie,
        user_invoked: bool,
        interactive: bool,
    ) -> Result<Vec<Decision>> {
        let criteria = Arc::new(SearchCriteria::for_movie(
            movie,
            self.profiles.as_ref(),
            user_invoked,
            interactive,
        )?);

        let shared = Arc::clone(&criteria);
        self.dispatcher
            .dispatch(
                move |indexer| {
                    let criteria = Arc::clone(&shared);
                    async move { indexer.fetch(&criteria).await }
                },
                &criteria,
            )
            .await
    }
}
