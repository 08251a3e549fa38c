//! Download decisions for search results.
//!
//! A [`DecisionMaker`] turns the merged, unranked releases of a search into an
//! ordered list of [`Decision`]s. The search core treats it as opaque and
//! calls it exactly once per search.
//!
//! # Module layout
//!
//! - [`quality`] -- Default decision maker driven by the profile's quality ladder.

pub mod quality;

use serde::Serialize;

use crate::indexers::ReleaseInfo;
use crate::profiles::Quality;
use crate::search::SearchCriteria;

pub use quality::QualityDecisionMaker;

/// Whether a rejection may clear up on a later search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RejectionKind {
    Permanent,
    Temporary,
}

/// Why a release was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub reason: String,
    pub kind: RejectionKind,
}

impl Rejection {
    pub fn permanent(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            kind: RejectionKind::Permanent,
        }
    }
}

/// The verdict for one release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub release: ReleaseInfo,
    pub quality: Quality,
    pub rejections: Vec<Rejection>,
}

impl Decision {
    pub fn accept(release: ReleaseInfo, quality: Quality) -> Self {
        Self {
            release,
            quality,
            rejections: Vec::new(),
        }
    }

    pub fn reject(release: ReleaseInfo, quality: Quality, rejections: Vec<Rejection>) -> Self {
        Self {
            release,
            quality,
            rejections,
        }
    }

    /// Accepted when nothing rejected it.
    pub fn approved(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// Ranks the merged results of a search.
pub trait DecisionMaker: Send + Sync {
    /// Produce one decision per release, ordered best first.
    ///
    /// Errors are returned to the search caller unchanged.
    fn search_decisions(
        &self,
        reports: Vec<ReleaseInfo>,
        criteria: &SearchCriteria,
    ) -> anyhow::Result<Vec<Decision>>;
}
