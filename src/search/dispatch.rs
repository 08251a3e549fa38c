//! Concurrent fan-out of one search across every enabled indexer.
//!
//! Each indexer runs in its own Tokio task. The search action is invoked
//! inside that task, on the blocking pool, so an action that does eager work
//! before returning its future does not hold up the other indexers.
//! Successful results are appended to a single mutex-guarded collection; a
//! failing (or panicking) indexer is logged and dropped without affecting the
//! others. Once every task has finished, the merged batch goes to the
//! [`DecisionMaker`] exactly once.
//!
//! There is no timeout or cancellation at this layer. An indexer call that
//! never completes keeps the whole search waiting; indexers bound their own
//! requests.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::task::{self, JoinSet};
use tracing::{debug, error, info};

use crate::decision::{Decision, DecisionMaker};
use crate::indexers::{Indexer, IndexerSource, ReleaseInfo};

use super::SearchCriteria;

/// An indexer that failed during a search.
#[derive(Debug)]
pub struct IndexerFailure {
    pub indexer: String,
    pub error: anyhow::Error,
}

/// Everything gathered from one fan-out, before any decisions are made.
#[derive(Debug, Default)]
pub struct SearchBatch {
    /// Merged results of every indexer that succeeded. No ordering across
    /// indexers; each indexer's own order is preserved.
    pub reports: Vec<ReleaseInfo>,
    /// Indexers whose call failed. None of their results are in `reports`.
    pub failures: Vec<IndexerFailure>,
    /// Number of indexers searched.
    pub searched: usize,
}

/// Runs search criteria against all enabled indexers and hands the merged
/// results to a [`DecisionMaker`].
#[derive(Clone)]
pub struct IndexerDispatcher {
    indexers: Arc<dyn IndexerSource>,
    decisions: Arc<dyn DecisionMaker>,
}

impl IndexerDispatcher {
    pub fn new(indexers: Arc<dyn IndexerSource>, decisions: Arc<dyn DecisionMaker>) -> Self {
        Self {
            indexers,
            decisions,
        }
    }

    /// Fan `search_action` out over the indexers enabled for the criteria's
    /// mode, then rank the merged results.
    ///
    /// Individual indexer failures never fail the call. Errors come only from
    /// resolving the indexer set or from the decision maker, and are returned
    /// unchanged.
    pub async fn dispatch<F, Fut>(
        &self,
        search_action: F,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Decision>>
    where
        F: Fn(Arc<dyn Indexer>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<ReleaseInfo>>> + Send + 'static,
    {
        let batch = self.gather(search_action, criteria).await?;
        self.decisions.search_decisions(batch.reports, criteria)
    }

    /// Fan out and collect, without deciding.
    ///
    /// Blocks until every indexer task has finished.
    pub async fn gather<F, Fut>(
        &self,
        search_action: F,
        criteria: &SearchCriteria,
    ) -> Result<SearchBatch>
    where
        F: Fn(Arc<dyn Indexer>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<ReleaseInfo>>> + Send + 'static,
    {
        let indexers = self.indexers.enabled_for(criteria.mode())?;
        let searched = indexers.len();

        info!("Searching {} indexers for {}", searched, criteria);

        let search_action = Arc::new(search_action);
        let reports: Arc<Mutex<Vec<ReleaseInfo>>> = Arc::new(Mutex::new(Vec::new()));
        let mut workers = JoinSet::new();
        let mut names = HashMap::new();

        for indexer in indexers {
            let name = indexer.name().to_string();
            let action = Arc::clone(&search_action);
            let reports = Arc::clone(&reports);
            let label = criteria.to_string();
            let worker_name = name.clone();

            let handle = workers.spawn(async move {
                let name = worker_name;
                match run_search(action, indexer).await {
                    Ok(found) => {
                        debug!(indexer = %name, count = found.len(), "Indexer search finished");
                        reports.lock().extend(found);
                        None
                    }
                    Err(e) => {
                        error!(
                            indexer = %name,
                            error = %e,
                            "Error while searching for {}", label
                        );
                        Some(IndexerFailure {
                            indexer: name,
                            error: e,
                        })
                    }
                }
            });
            names.insert(handle.id(), name);
        }

        let failures = join_workers(workers, names, criteria).await;
        let reports = std::mem::take(&mut *reports.lock());

        debug!(
            "Total of {} reports were found for {} from {} indexers",
            reports.len(),
            criteria,
            searched
        );

        Ok(SearchBatch {
            reports,
            failures,
            searched,
        })
    }
}

/// Invoke the action for one indexer and drive the resulting search.
///
/// The action itself runs on the blocking pool, so synchronous work done
/// before the future is returned happens in parallel across indexers. Panics
/// in either the action or the future become errors.
async fn run_search<F, Fut>(action: Arc<F>, indexer: Arc<dyn Indexer>) -> Result<Vec<ReleaseInfo>>
where
    F: Fn(Arc<dyn Indexer>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<ReleaseInfo>>> + Send + 'static,
{
    let search = match task::spawn_blocking(move || action(indexer)).await {
        Ok(search) => search,
        Err(e) if e.is_panic() => {
            return Err(anyhow!(
                "indexer search panicked: {}",
                panic_message(e.into_panic().as_ref())
            ))
        }
        Err(e) => return Err(anyhow!("indexer search did not start: {e}")),
    };

    match AssertUnwindSafe(search).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => Err(anyhow!(
            "indexer search panicked: {}",
            panic_message(panic.as_ref())
        )),
    }
}

/// Wait for every worker. Workers that end without reporting (cancelled by
/// runtime shutdown or an abort) are recorded as failures of their indexer.
async fn join_workers(
    mut workers: JoinSet<Option<IndexerFailure>>,
    mut names: HashMap<task::Id, String>,
    criteria: &SearchCriteria,
) -> Vec<IndexerFailure> {
    let mut failures = Vec::new();

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(Some(failure)) => failures.push(failure),
            Ok(None) => {}
            Err(e) => {
                let indexer = names
                    .remove(&e.id())
                    .unwrap_or_else(|| "<unknown>".to_string());
                error!(
                    indexer = %indexer,
                    error = %e,
                    "Indexer task did not complete for {}", criteria
                );
                failures.push(IndexerFailure {
                    indexer,
                    error: anyhow::Error::new(e),
                });
            }
        }
    }

    failures
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
