//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which wires an in-memory catalog, profile store,
//! indexer registry and the default decision maker into a [`SearchService`].
//! Indexers are scripted with [`ScriptedIndexer`].

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use sceneseek::catalog::{AlternativeTitle, InMemoryCatalog, Movie};
use sceneseek::decision::QualityDecisionMaker;
use sceneseek::indexers::{Indexer, IndexerRegistry, ReleaseInfo, SearchToggles};
use sceneseek::profiles::{InMemoryProfileStore, Profile, ProfileStore, Quality, QualityItem};
use sceneseek::search::{IndexerDispatcher, SearchCriteria, SearchService};
use sceneseek_common::{Language, MovieId, ProfileId, SourceType};

/// What a [`ScriptedIndexer`] does when called.
#[derive(Clone)]
pub enum Script {
    /// Return these release titles, after an optional delay.
    Releases(Vec<&'static str>, Duration),
    /// Fail with this message.
    Fail(&'static str),
}

/// An indexer with canned behaviour that records the criteria it saw.
pub struct ScriptedIndexer {
    name: String,
    script: Script,
    pub calls: AtomicUsize,
    pub seen_titles: Mutex<Vec<Vec<String>>>,
}

impl ScriptedIndexer {
    pub fn new(name: &str, script: Script) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            script,
            calls: AtomicUsize::new(0),
            seen_titles: Mutex::new(Vec::new()),
        })
    }

    pub fn returning(name: &str, titles: Vec<&'static str>) -> Arc<Self> {
        Self::new(name, Script::Releases(titles, Duration::ZERO))
    }

    pub fn failing(name: &str, message: &'static str) -> Arc<Self> {
        Self::new(name, Script::Fail(message))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Indexer for ScriptedIndexer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, criteria: &SearchCriteria) -> anyhow::Result<Vec<ReleaseInfo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_titles.lock().push(criteria.scene_titles().to_vec());

        match &self.script {
            Script::Releases(titles, delay) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(titles
                    .iter()
                    .enumerate()
                    .map(|(i, title)| release(&self.name, i, title))
                    .collect())
            }
            Script::Fail(message) => anyhow::bail!("{}", message),
        }
    }
}

pub fn release(indexer: &str, n: usize, title: &str) -> ReleaseInfo {
    ReleaseInfo {
        guid: format!("{indexer}-{n}"),
        title: title.to_string(),
        size: 1_000_000 * (n as u64 + 1),
        download_url: format!("https://{indexer}.test/get/{n}"),
        info_url: None,
        indexer: indexer.to_string(),
        publish_date: None,
        categories: vec![2000],
    }
}

/// English profile allowing 720p HDTV through 1080p Bluray.
pub fn hd_profile() -> Profile {
    let items = [
        (Quality::Sdtv, false),
        (Quality::Hdtv720p, true),
        (Quality::Webdl1080p, true),
        (Quality::Bluray1080p, true),
        (Quality::Remux2160p, false),
    ]
    .into_iter()
    .map(|(quality, allowed)| QualityItem { quality, allowed })
    .collect();

    Profile {
        id: ProfileId::new(1),
        name: "HD".to_string(),
        cutoff: Quality::Bluray1080p,
        items,
        preferred_tags: Vec::new(),
        language: Language::English,
        format_items: Vec::new(),
    }
}

pub fn the_film() -> Movie {
    Movie {
        id: MovieId::new(1),
        title: "The Film".to_string(),
        year: Some(2019),
        imdb_id: None,
        profile_id: ProfileId::new(1),
        alternative_titles: vec![
            AlternativeTitle::new("Le Film", Language::French, SourceType::Translation),
            AlternativeTitle::new("TheFilmAlias", Language::English, SourceType::Alias),
        ],
    }
}

/// Test harness wrapping a fully-constructed [`SearchService`].
pub struct TestHarness {
    pub service: SearchService,
    pub dispatcher: IndexerDispatcher,
    pub profiles: Arc<InMemoryProfileStore>,
}

impl TestHarness {
    /// Create a harness searching `indexers` (enabled for every mode) with the
    /// default movie and profile.
    pub fn new(indexers: Vec<Arc<ScriptedIndexer>>) -> Self {
        let mut registry = IndexerRegistry::new();
        for indexer in indexers {
            registry.register(indexer, SearchToggles::ALL);
        }
        Self::with_registry(registry, vec![hd_profile()], vec![the_film()])
    }

    pub fn with_registry(registry: IndexerRegistry, profiles: Vec<Profile>, movies: Vec<Movie>) -> Self {
        let profiles: Arc<InMemoryProfileStore> = Arc::new(profiles.into_iter().collect());
        let store: Arc<dyn ProfileStore> = profiles.clone();
        let catalog: InMemoryCatalog = movies.into_iter().collect();

        let dispatcher = IndexerDispatcher::new(
            Arc::new(registry),
            Arc::new(QualityDecisionMaker::new(store.clone())),
        );
        let service = SearchService::new(Arc::new(catalog), store, dispatcher.clone());

        Self {
            service,
            dispatcher,
            profiles,
        }
    }

    /// Criteria for `movie` resolved against the harness profiles.
    pub fn criteria(&self, movie: Movie, interactive: bool) -> SearchCriteria {
        SearchCriteria::for_movie(movie, self.profiles.as_ref(), false, interactive)
            .expect("movie profile should resolve")
    }
}
