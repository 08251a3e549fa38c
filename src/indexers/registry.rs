//! Indexer registry for resolving which [`Indexer`]s take part in a search.
//!
//! The [`IndexerRegistry`] holds every configured indexer together with its
//! automatic/interactive search toggles. Searches ask it, through the
//! [`IndexerSource`] trait, for the indexers enabled in a given
//! [`SearchMode`].

use std::sync::Arc;

use anyhow::{Context, Result};

use sceneseek_common::SearchMode;

use super::indexer::Indexer;
use super::newznab::NewznabIndexer;
use crate::config::IndexerConfig;

/// Source of the indexers enabled for a search mode.
///
/// Lookups are side-effect free. An empty list is a valid answer.
pub trait IndexerSource: Send + Sync {
    fn enabled_for(&self, mode: SearchMode) -> Result<Vec<Arc<dyn Indexer>>>;
}

/// Per-indexer search toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToggles {
    pub automatic: bool,
    pub interactive: bool,
}

impl SearchToggles {
    /// Enabled for both automatic and interactive searches.
    pub const ALL: Self = Self {
        automatic: true,
        interactive: true,
    };

    fn allows(self, mode: SearchMode) -> bool {
        match mode {
            SearchMode::Automatic => self.automatic,
            SearchMode::Interactive => self.interactive,
        }
    }
}

impl Default for SearchToggles {
    fn default() -> Self {
        Self::ALL
    }
}

struct RegisteredIndexer {
    indexer: Arc<dyn Indexer>,
    toggles: SearchToggles,
}

/// A registry that manages multiple [`Indexer`] implementations.
///
/// Indexers are stored in registration order, and [`IndexerSource::enabled_for`]
/// preserves that order.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use sceneseek::indexers::{IndexerRegistry, SearchToggles};
///
/// let mut registry = IndexerRegistry::new();
/// registry.register(Arc::new(my_indexer), SearchToggles::ALL);
/// ```
pub struct IndexerRegistry {
    indexers: Vec<RegisteredIndexer>,
}

impl IndexerRegistry {
    /// Create an empty registry with no indexers.
    pub fn new() -> Self {
        Self {
            indexers: Vec::new(),
        }
    }

    /// Build a registry from configuration, creating one HTTP indexer per
    /// entry. Entries disabled for both modes are skipped.
    pub fn from_config(configs: &[IndexerConfig]) -> Result<Self> {
        let mut registry = Self::new();
        for config in configs {
            let toggles = SearchToggles {
                automatic: config.enable_automatic_search,
                interactive: config.enable_interactive_search,
            };
            if !toggles.automatic && !toggles.interactive {
                tracing::debug!(indexer = %config.name, "Indexer disabled for all searches, skipping");
                continue;
            }
            let indexer = NewznabIndexer::new(config)
                .with_context(|| format!("Failed to create indexer '{}'", config.name))?;
            registry.register(Arc::new(indexer), toggles);
        }
        Ok(registry)
    }

    /// Register an indexer with its search toggles.
    pub fn register(&mut self, indexer: Arc<dyn Indexer>, toggles: SearchToggles) {
        self.indexers.push(RegisteredIndexer { indexer, toggles });
    }

    /// Look up an indexer by its [`Indexer::name`].
    pub fn get(&self, name: &str) -> Option<&dyn Indexer> {
        self.indexers
            .iter()
            .find(|r| r.indexer.name() == name)
            .map(|r| r.indexer.as_ref())
    }

    /// Number of registered indexers, regardless of toggles.
    pub fn len(&self) -> usize {
        self.indexers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexers.is_empty()
    }

    /// Indexers enabled for automatic searches.
    pub fn automatic_search_enabled(&self) -> Vec<Arc<dyn Indexer>> {
        self.filter(SearchMode::Automatic)
    }

    /// Indexers enabled for interactive searches.
    pub fn interactive_search_enabled(&self) -> Vec<Arc<dyn Indexer>> {
        self.filter(SearchMode::Interactive)
    }

    fn filter(&self, mode: SearchMode) -> Vec<Arc<dyn Indexer>> {
        self.indexers
            .iter()
            .filter(|r| r.toggles.allows(mode))
            .map(|r| Arc::clone(&r.indexer))
            .collect()
    }
}

impl Default for IndexerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexerSource for IndexerRegistry {
    fn enabled_for(&self, mode: SearchMode) -> Result<Vec<Arc<dyn Indexer>>> {
        Ok(match mode {
            SearchMode::Automatic => self.automatic_search_enabled(),
            SearchMode::Interactive => self.interactive_search_enabled(),
        })
    }
}
